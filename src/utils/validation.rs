use crate::utils::error::{Result, ShapeError};
use chrono::format::{Item, StrftimeItems};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ShapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ShapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ShapeError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Value is required".to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 檢查 chrono 的 strftime 格式字串
pub fn validate_strftime(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ShapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Invalid strftime format".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output", "./out.json").is_ok());
        assert!(validate_path("output", "").is_err());
        assert!(validate_path("output", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("%Y".to_string());
        let missing: Option<String> = None;

        assert_eq!(validate_required_field("fmt", &present).unwrap(), "%Y");
        assert!(validate_required_field("fmt", &missing).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("shaping.redact", "password").is_ok());
        assert!(validate_non_empty_string("shaping.redact", "   ").is_err());
    }

    #[test]
    fn test_validate_strftime() {
        assert!(validate_strftime("fmt", "%Y-%m-%d %H:%M").is_ok());
        assert!(validate_strftime("fmt", "%Q").is_err());
        assert!(validate_strftime("fmt", "").is_err());
    }
}
