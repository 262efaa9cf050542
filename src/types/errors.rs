use std::fmt;

// === StorageError ===

/// Errors raised by a storage collaborator.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// A stored bookmark sequence could not be encoded or decoded.
    SerializationError(String),
    /// The user is not registered with the store.
    UnknownUser(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StorageError::UnknownUser(id) => write!(f, "Unknown user: {}", id),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

// === ValidationError ===

/// Reasons a candidate bookmark fails validation.
///
/// The `Display` text is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one of url, title or description is blank.
    MissingFields,
    /// The url is not a well-formed absolute URL.
    InvalidUrl(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields => {
                write!(f, "Please fill out all fields before saving.")
            }
            ValidationError::InvalidUrl(_) => write!(
                f,
                "Invalid URL format. Please enter a valid one (e.g., https://example.com)."
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

// === SubmitRejection ===

/// Why a form submission was refused. Nothing is persisted when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    /// No user is selected in the dropdown.
    NoUserSelected,
    /// The candidate failed validation.
    Invalid(ValidationError),
    /// The user already has a bookmark with this url.
    Duplicate(String),
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejection::NoUserSelected => write!(f, "Please select a user first."),
            SubmitRejection::Invalid(e) => write!(f, "{}", e),
            SubmitRejection::Duplicate(_) => {
                write!(f, "This bookmark already exists for this user.")
            }
        }
    }
}

impl std::error::Error for SubmitRejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitRejection::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for SubmitRejection {
    fn from(e: ValidationError) -> Self {
        SubmitRejection::Invalid(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === AppError ===

/// Errors raised while wiring the application together at startup.
#[derive(Debug)]
pub enum AppError {
    /// The database could not be opened or migrated.
    Database(String),
    /// The storage collaborator failed.
    Storage(StorageError),
    /// Settings could not be loaded.
    Settings(SettingsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(msg) => write!(f, "Database initialization failed: {}", msg),
            AppError::Storage(e) => write!(f, "{}", e),
            AppError::Settings(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Database(_) => None,
            AppError::Storage(e) => Some(e),
            AppError::Settings(e) => Some(e),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        AppError::Settings(e)
    }
}
