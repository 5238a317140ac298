//! Validation rules for user-entered board fields.
//!
//! Each rule is a pure function over the value and the active
//! [`BoardConfig`]. Rules fail on the first violation so the caller can show
//! one inline message per field.

use crate::board::{
    config::BoardConfig,
    domain::{BoardDomainError, ColumnTitle, TaskDetails},
};

/// Validates a title length against the configured limit.
///
/// # Errors
///
/// Returns [`BoardDomainError::TitleTooLong`] when the title is longer than
/// `config.max_title_length` characters.
pub fn validate_title_length(
    title: &str,
    config: &BoardConfig,
) -> Result<(), BoardDomainError> {
    let actual = title.chars().count();
    if actual > config.max_title_length {
        return Err(BoardDomainError::TitleTooLong {
            max: config.max_title_length,
            actual,
        });
    }
    Ok(())
}

/// Validates task fields against the configured limits.
///
/// # Errors
///
/// Returns [`BoardDomainError::TitleTooLong`],
/// [`BoardDomainError::DescriptionTooLong`], or
/// [`BoardDomainError::TooManyLabels`] for the first limit exceeded.
pub fn validate_task_details(
    details: &TaskDetails,
    config: &BoardConfig,
) -> Result<(), BoardDomainError> {
    validate_title_length(details.title().as_str(), config)?;

    if let Some(description) = details.description() {
        let actual = description.chars().count();
        if actual > config.max_description_length {
            return Err(BoardDomainError::DescriptionTooLong {
                max: config.max_description_length,
                actual,
            });
        }
    }

    let labels = details.labels().len();
    if labels > config.max_labels {
        return Err(BoardDomainError::TooManyLabels {
            max: config.max_labels,
            actual: labels,
        });
    }
    Ok(())
}

/// Parses and validates a column title.
///
/// # Errors
///
/// Returns [`BoardDomainError::EmptyColumnTitle`] for a blank title or
/// [`BoardDomainError::TitleTooLong`] when it exceeds the configured limit.
pub fn validate_column_title(
    title: &str,
    config: &BoardConfig,
) -> Result<ColumnTitle, BoardDomainError> {
    let parsed = ColumnTitle::new(title)?;
    validate_title_length(parsed.as_str(), config)?;
    Ok(parsed)
}
