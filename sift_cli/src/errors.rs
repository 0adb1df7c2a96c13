//! Coarse-grained CLI error type mapped to exit codes

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CliError {
    /// Bad user input (unknown filter key, unparseable value)
    InputError,
    /// Params file could not be read or written
    FileError,
    /// The filter engine rejected the request
    FilterError,
    /// An interactive prompt was cancelled or failed
    PromptError,
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InputError => 2,
            CliError::FileError => 3,
            CliError::FilterError => 4,
            CliError::PromptError => 5,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputError => write!(f, "Invalid input"),
            CliError::FileError => write!(f, "Couldn't read or write the params file"),
            CliError::FilterError => write!(f, "Filter operation failed"),
            CliError::PromptError => write!(f, "Prompt cancelled"),
        }
    }
}

impl std::error::Error for CliError {}
