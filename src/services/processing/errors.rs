use sea_orm::DbErr;
use std::fmt;

/// Failure taxonomy of the Excel import pipeline.
///
/// Structural problems (`UnsupportedRole`, `NoDatesFound`, `NoNamesFound`,
/// `InvalidWorkbook`) abort the whole call; cell-level anomalies never reach
/// this type, they are skipped inside the extractor. `Storage` means the
/// backing database was unavailable mid-import and is the only variant that
/// maps to a server error.
#[derive(Debug)]
pub enum ImportError {
    /// No built-in or stored layout profile exists for the requested role.
    UnsupportedRole(String),
    /// The date header row contained no day-of-month numbers.
    NoDatesFound,
    /// The name column contained no plausible employee names.
    NoNamesFound,
    /// The uploaded file could not be read as a spreadsheet.
    InvalidWorkbook(String),
    /// Bad request parameters (month out of range and similar).
    InvalidRequest(String),
    /// The schedule store failed during delete or insert.
    Storage(DbErr),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnsupportedRole(role) => {
                write!(f, "No spreadsheet layout profile exists for role '{role}'")
            }
            ImportError::NoDatesFound => {
                write!(f, "No day-of-month values found in the date header row")
            }
            ImportError::NoNamesFound => {
                write!(f, "No employee names found in the name column")
            }
            ImportError::InvalidWorkbook(message) => {
                write!(f, "Could not read spreadsheet: {message}")
            }
            ImportError::InvalidRequest(message) => write!(f, "{message}"),
            ImportError::Storage(err) => write!(f, "Schedule store error: {err}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for ImportError {
    fn from(err: DbErr) -> Self {
        ImportError::Storage(err)
    }
}
