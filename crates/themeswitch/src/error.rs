//! Configuration errors.

use std::path::PathBuf;

/// Error returned when theme options are invalid or cannot be loaded.
///
/// Runtime operations on a controller never fail; only building one can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The list of available themes is empty
    EmptyAvailable,
    /// The configured default theme is not one of the available themes
    UnknownDefault { name: String },
    /// Option text could not be parsed
    Parse {
        /// Source format ("yaml" or "json")
        format: &'static str,
        /// Error message from the parser
        message: String,
    },
    /// An option file could not be read
    Load { path: PathBuf, message: String },
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::EmptyAvailable => {
                write!(f, "at least one available theme is required")
            }
            OptionsError::UnknownDefault { name } => {
                write!(f, "default theme '{}' is not an available theme", name)
            }
            OptionsError::Parse { format, message } => {
                write!(f, "failed to parse {} theme options: {}", format, message)
            }
            OptionsError::Load { path, message } => {
                write!(
                    f,
                    "failed to read theme options \"{}\": {}",
                    path.display(),
                    message
                )
            }
        }
    }
}

impl std::error::Error for OptionsError {}
