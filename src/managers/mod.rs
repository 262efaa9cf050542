// Shelfmark state managers
// Managers hold state across events: the SQLite store, the page model and the form controller.

pub mod form_controller;
pub mod page_state;
pub mod storage_manager;
