//! Library error types
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use thiserror::Error;

/// Errors raised while turning docstrings into slash command definitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    #[error("Unsupported docstring style '{0}'")]
    UnsupportedStyle(String),

    #[error("Callback '{command}' has no doc string")]
    MissingDocstring { command: String },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Description for '{field}' is {length} characters long (max {max})")]
    DescriptionTooLong {
        field: String,
        length: usize,
        max: usize,
    },

    #[error("Missing description for option '{option}' of command '{command}'")]
    MissingOptionDescription { command: String, option: String },
}

/// User-facing failures of component interactions
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    #[error("You cannot use this button")]
    NotAuthor,

    #[error("This help command instance is out of date")]
    OutOfDate,

    #[error("Page not found")]
    PageNotFound,

    #[error("Not a valid number")]
    InvalidNumber,
}

pub type Result<T> = std::result::Result<T, DocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DocError::MissingDocstring { command: "ban".into() }.to_string(),
            "Callback 'ban' has no doc string"
        );
        assert_eq!(
            DocError::DescriptionTooLong { field: "ban".into(), length: 101, max: 100 }.to_string(),
            "Description for 'ban' is 101 characters long (max 100)"
        );
        assert_eq!(
            InteractionError::OutOfDate.to_string(),
            "This help command instance is out of date"
        );
    }
}
