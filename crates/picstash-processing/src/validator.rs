/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// Longest accepted caller-supplied base name, in characters
pub const MAX_BASE_NAME_LEN: usize = 200;

/// Upload validator
pub struct FileValidator;

impl FileValidator {
    /// Validate file size against the configured maximum
    pub fn validate_size(size: usize, max: usize) -> Result<(), ValidationError> {
        if size > max {
            return Err(ValidationError::FileTooLarge { size, max });
        }
        Ok(())
    }

    /// Validate a caller-supplied base name (the stored file name without
    /// its extension). It must be a single path segment: no separators, not
    /// `.` or `..`, no NUL or other control characters, and at most
    /// [`MAX_BASE_NAME_LEN`] characters.
    pub fn validate_base_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::InvalidFilename(
                "Name must not be empty".to_string(),
            ));
        }

        if name.chars().count() > MAX_BASE_NAME_LEN {
            return Err(ValidationError::InvalidFilename(format!(
                "Name must be at most {} characters",
                MAX_BASE_NAME_LEN
            )));
        }

        if name.contains('/') || name.contains('\\') {
            return Err(ValidationError::InvalidFilename(
                "Name must not contain path separators".to_string(),
            ));
        }

        if name == "." || name == ".." {
            return Err(ValidationError::InvalidFilename(
                "Name must not be a relative path segment".to_string(),
            ));
        }

        if name.chars().any(|c| c.is_control()) {
            return Err(ValidationError::InvalidFilename(
                "Name contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}
