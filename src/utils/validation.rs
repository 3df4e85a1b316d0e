use crate::utils::error::{Result, ScaffoldError};
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Attributes `Field` writes itself; extra attributes may not repeat them.
pub const GENERATED_ATTRIBUTES: &[&str] =
    &["type", "name", "value", "placeholder", "required", "selected"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepts absolute http(s) URLs and relative references such as `/submit`.
pub fn validate_action(field_name: &str, action: &str) -> Result<()> {
    if action.trim().is_empty() {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: action.to_string(),
            reason: "Form action cannot be empty".to_string(),
        });
    }

    match Url::parse(action) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScaffoldError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: action.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            // 相對路徑：以虛擬 base 驗證
            let base = Url::parse("http://localhost/").map_err(|e| ScaffoldError::ConfigError {
                message: e.to_string(),
            })?;
            base.join(action)
                .map(|_| ())
                .map_err(|e| ScaffoldError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: action.to_string(),
                    reason: format!("Invalid relative URL: {}", e),
                })
        }
        Err(e) => Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: action.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ScaffoldError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Field names must be unique".to_string(),
            });
        }
    }
    Ok(())
}

/// Attribute keys are written unescaped, so they must be plain HTML names.
pub fn validate_attribute_key(field_name: &str, key: &str) -> Result<()> {
    let re = Regex::new(r"^[A-Za-z_:][-A-Za-z0-9_:.]*$").map_err(|e| ScaffoldError::ConfigError {
        message: format!("Invalid attribute pattern: {}", e),
    })?;

    if !re.is_match(key) {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "Not a valid HTML attribute name".to_string(),
        });
    }

    if GENERATED_ATTRIBUTES
        .iter()
        .any(|generated| generated.eq_ignore_ascii_case(key))
    {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: format!(
                "Attribute is generated from the field definition ({})",
                GENERATED_ATTRIBUTES.join(", ")
            ),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ScaffoldError::MissingConfigError {
        field: field_name.to_string(),
    })
}
