//! Ready-made converters for `shape_with` and friends.

use crate::core::BoxedConverter;
use crate::utils::error::{Result, ShapeError};
use chrono::DateTime;
use serde_json::Value;
use std::fmt::Write;

fn name_set<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

fn listed(names: &[String], property: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(property))
}

/// Renders every non-null value as a string. Strings pass through unchanged.
pub fn stringify<'a, T: 'a>() -> BoxedConverter<'a, T> {
    Box::new(|_: &T, _: &str, value: Value| -> Result<Value> {
        Ok(match value {
            Value::Null => Value::Null,
            Value::String(s) => Value::String(s),
            other => Value::String(other.to_string()),
        })
    })
}

/// 將指定欄位的值換成遮罩字串
pub fn redact<'a, T: 'a, I, S>(names: I, placeholder: impl Into<String>) -> BoxedConverter<'a, T>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names = name_set(names);
    let placeholder = placeholder.into();
    Box::new(move |_: &T, property: &str, value: Value| -> Result<Value> {
        if listed(&names, property) {
            Ok(Value::String(placeholder.clone()))
        } else {
            Ok(value)
        }
    })
}

/// Re-renders RFC 3339 timestamps of the listed properties with a
/// `strftime` format. Non-string values are left alone.
pub fn reformat_datetime<'a, T: 'a, I, S>(
    names: I,
    format: impl Into<String>,
) -> BoxedConverter<'a, T>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names = name_set(names);
    let format = format.into();
    Box::new(move |_: &T, property: &str, value: Value| -> Result<Value> {
        if !listed(&names, property) {
            return Ok(value);
        }
        match value {
            Value::String(text) => {
                let parsed =
                    DateTime::parse_from_rfc3339(&text).map_err(|e| ShapeError::Conversion {
                        property: property.to_string(),
                        message: format!("'{}' is not an RFC 3339 timestamp: {}", text, e),
                    })?;
                // 無效的 strftime 格式會讓 DelayedFormat 回傳 fmt::Error
                let mut rendered = String::new();
                write!(rendered, "{}", parsed.format(&format)).map_err(|_| {
                    ShapeError::Conversion {
                        property: property.to_string(),
                        message: format!("invalid datetime format '{}'", format),
                    }
                })?;
                Ok(Value::String(rendered))
            }
            other => Ok(other),
        }
    })
}

/// Applies `first`, then `second` to its output.
pub fn chain<'a, T: 'a>(
    mut first: BoxedConverter<'a, T>,
    mut second: BoxedConverter<'a, T>,
) -> BoxedConverter<'a, T> {
    Box::new(move |source: &T, property: &str, value: Value| -> Result<Value> {
        let value = first(source, property, value)?;
        second(source, property, value)
    })
}
