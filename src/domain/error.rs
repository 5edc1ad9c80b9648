use thiserror::Error;

/// Submission blocked because a required form field is missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::Missing { field }
    }
}

/// Only the empty string counts as missing; whitespace is a value.
pub fn ensure_present(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_values_are_missing() {
        assert_eq!(
            ensure_present("", "title"),
            Err(ValidationError::missing("title"))
        );
        assert!(ensure_present("x", "title").is_ok());
        assert!(ensure_present("   ", "title").is_ok());
        assert_eq!(
            ValidationError::missing("email").to_string(),
            "email is required"
        );
    }
}
