//! App Core for Shelfmark.
//!
//! Wires settings, the database, the storage manager and the form controller
//! together, and exposes the page snapshot hosts render from.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::database::connection::Database;
use crate::managers::form_controller::FormController;
use crate::managers::page_state::{AlertQueue, PageState};
use crate::managers::storage_manager::StorageManager;
use crate::platform;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::view_renderer::ViewRenderer;
use crate::types::errors::{AppError, SettingsError};

/// The form controller as wired by the app.
pub type PageController = FormController<StorageManager, PageState, AlertQueue>;

/// Central application struct.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub controller: PageController,
}

impl App {
    /// Opens the database at `db_path` and loads settings from `settings_path`
    /// (platform default when `None`).
    ///
    /// A settings file that fails to load is logged and replaced by defaults.
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, AppError> {
        let db = Database::open(db_path)?;
        Ok(Self::with_database(db, Self::load_settings(settings_path)))
    }

    /// Like [`App::new`] but with a throwaway in-memory database.
    pub fn in_memory(settings_path: Option<String>) -> Result<Self, AppError> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(db, Self::load_settings(settings_path)))
    }

    /// Resolves the database location from settings (or the platform data
    /// directory), creating its directory, then opens the app.
    pub fn from_settings(settings_path: Option<String>) -> Result<Self, AppError> {
        Self::from_engine(Self::load_settings(settings_path))
    }

    /// Reads settings without logging, for hosts that install the log
    /// subscriber from the loaded level. On failure the engine holds defaults
    /// and the error is handed back.
    pub fn open_settings(settings_path: Option<String>) -> (SettingsEngine, Option<SettingsError>) {
        let mut engine = SettingsEngine::new(settings_path);
        let error = engine.load().err();
        (engine, error)
    }

    /// Like [`App::from_settings`] with an already loaded settings engine.
    pub fn from_engine(settings_engine: SettingsEngine) -> Result<Self, AppError> {
        let db_path = settings_engine
            .get_settings()
            .general
            .database_path
            .clone()
            .map(PathBuf::from)
            .unwrap_or_else(platform::default_database_path);

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Database(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let db = Database::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "database opened");
        Ok(Self::with_database(db, settings_engine))
    }

    /// Builds the app around an already opened database.
    pub fn with_database(db: Database, settings_engine: SettingsEngine) -> Self {
        let db = Arc::new(db);
        let renderer = ViewRenderer::new(settings_engine.get_settings().display.clone());
        let controller = FormController::new(
            StorageManager::new(db.clone()),
            PageState::new(),
            AlertQueue::new(),
            renderer,
        );

        Self {
            db,
            settings_engine,
            controller,
        }
    }

    fn load_settings(settings_path: Option<String>) -> SettingsEngine {
        let (engine, error) = Self::open_settings(settings_path);
        if let Some(e) = error {
            warn_default_settings(&engine, &e);
        }
        engine
    }

    /// Startup sequence: register configured users, then run the initial render.
    pub fn startup(&mut self) -> Result<(), AppError> {
        let users = self.settings_engine.get_settings().general.user_ids();
        self.controller.storage().seed_users(&users)?;
        self.controller.initialize()?;
        Ok(())
    }

    /// Rebuilds the renderer from current display settings and re-renders
    /// the selected user's list.
    pub fn apply_display_settings(&mut self) {
        let display = self.settings_engine.get_settings().display.clone();
        self.controller.set_renderer(ViewRenderer::new(display));
        if let Some(user_id) = self.controller.selected_user().cloned() {
            self.controller.display_bookmarks(&user_id);
        }
    }

    /// Current page plus any alerts raised since the last snapshot.
    pub fn page_snapshot(&mut self) -> Value {
        let alerts = self.controller.notifier_mut().drain();
        let page = self.controller.view();
        json!({
            "users": page.users,
            "selected_user": self.controller.selected_user().map(|id| id.to_string()),
            "inputs_enabled": page.inputs_enabled,
            "fields": page.fields,
            "results": page.results,
            "alerts": alerts,
        })
    }
}

/// Logs that a settings file was unusable and defaults are in effect.
pub fn warn_default_settings(engine: &SettingsEngine, error: &SettingsError) {
    tracing::warn!(path = %engine.get_config_path(), error = %error, "using default settings");
}
