// Shelfmark services
// Stateless or self-contained logic: storage boundary, validation, ordering, rendering, settings, logging.

pub mod logging;
pub mod settings_engine;
pub mod sorter;
pub mod storage;
pub mod validation;
pub mod view_renderer;
