use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid override '{0}'. Expected 'section.key=value' (e.g., 'system.density=0.5').")]
    InvalidOverrideFormat(String),

    #[error("Component '{component}' cannot be empty in override '{raw}'.")]
    EmptyComponent {
        component: &'static str,
        raw: String,
    },
}

/// A single `section.key=value` override from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetValue<'a> {
    pub section: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

pub fn parse_set_value(raw: &str) -> Result<SetValue<'_>, ParseError> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidOverrideFormat(raw.to_string()))?;
    let (section, key) = path
        .trim()
        .split_once('.')
        .ok_or_else(|| ParseError::InvalidOverrideFormat(raw.to_string()))?;

    let empty = |component| ParseError::EmptyComponent {
        component,
        raw: raw.to_string(),
    };
    if section.is_empty() {
        return Err(empty("section"));
    }
    if key.is_empty() {
        return Err(empty("key"));
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(empty("value"));
    }
    Ok(SetValue {
        section,
        key,
        value,
    })
}
