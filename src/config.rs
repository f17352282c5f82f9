// src/config.rs

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Widget kind for a single field. Unknown tags fall back to `Text` so a
/// config written against a newer field vocabulary still renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Boolean,
    Select,
    Date,
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "text" => FieldType::Text,
            "boolean" => FieldType::Boolean,
            "select" => FieldType::Select,
            "date" => FieldType::Date,
            other => {
                log::warn!("unknown field type '{other}', rendering as text");
                FieldType::Text
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldConfig {
    /// Dotted path into the changes map, unique within its section.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// For select fields.
    #[serde(default)]
    pub options: Vec<SelectOption>,

    /// 1 (one column, default) or 2 (full row in the two-column grid).
    #[serde(default = "default_col_span", rename = "colSpan")]
    pub col_span: u8,

    /// Visual marker only; nothing enforces presence.
    #[serde(default)]
    pub required: bool,
}

fn default_col_span() -> u8 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLayout {
    #[default]
    Full,
    Left,
    Right,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    /// Render order; not necessarily contiguous. Ties keep config sequence.
    pub order: i64,
    #[serde(default)]
    pub layout: SectionLayout,
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormConfig {
    pub sections: Vec<SectionConfig>,
}

impl FormConfig {
    pub fn section_ids(&self) -> BTreeSet<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }
}

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    Parse(json5::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigLoadError::Parse(e) => write!(f, "Config parse error: {e}"),
            ConfigLoadError::Validation(msg) => write!(f, "Config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

impl From<std::io::Error> for ConfigLoadError {
    fn from(e: std::io::Error) -> Self {
        ConfigLoadError::Io(e)
    }
}

impl From<json5::Error> for ConfigLoadError {
    fn from(e: json5::Error) -> Self {
        ConfigLoadError::Parse(e)
    }
}

/// Parse a JSON5 form config string.
pub fn parse_config_str(s: &str) -> Result<FormConfig, ConfigLoadError> {
    let cfg: FormConfig = json5::from_str(s)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load a JSON5 form config from disk.
pub fn load_config_path(path: impl AsRef<Path>) -> Result<FormConfig, ConfigLoadError> {
    let s = fs::read_to_string(path)?;
    parse_config_str(&s)
}

/// Structural validation only; field values are never validated at runtime.
pub fn validate_config(cfg: &FormConfig) -> Result<(), ConfigLoadError> {
    let mut section_ids = BTreeSet::new();

    for (i, s) in cfg.sections.iter().enumerate() {
        if s.id.trim().is_empty() {
            return Err(ConfigLoadError::Validation(format!(
                "sections[{i}].id must be non-empty"
            )));
        }
        if !section_ids.insert(s.id.trim().to_string()) {
            return Err(ConfigLoadError::Validation(format!(
                "sections[{i}].id must be unique; duplicate found for '{}'",
                s.id
            )));
        }
        if s.title.trim().is_empty() {
            return Err(ConfigLoadError::Validation(format!(
                "sections[{i}].title must be non-empty"
            )));
        }

        let mut field_keys = BTreeSet::new();
        for (j, f) in s.fields.iter().enumerate() {
            if f.key.trim().is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "sections[{i}].fields[{j}].key must be non-empty"
                )));
            }
            if !field_keys.insert(f.key.trim().to_string()) {
                return Err(ConfigLoadError::Validation(format!(
                    "sections[{i}].fields[{j}].key must be unique within the section; \
                     duplicate found for '{}'",
                    f.key
                )));
            }
            if f.label.trim().is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "sections[{i}].fields[{j}].label must be non-empty"
                )));
            }
            if !matches!(f.col_span, 1 | 2) {
                return Err(ConfigLoadError::Validation(format!(
                    "sections[{i}].fields[{j}].colSpan must be 1 or 2"
                )));
            }

            // Select sanity
            if matches!(f.field_type, FieldType::Select) && f.options.is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "sections[{i}].fields[{j}] type=select requires options"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let s = r#"
        {
          sections: [
            {
              id: "personal",
              title: "Personal Information",
              order: 1,
              fields: [
                { key: "name", label: "Full Name", type: "text", colSpan: 2, required: true }
              ]
            }
          ]
        }
        "#;

        let cfg = parse_config_str(s).expect("parse ok");
        assert_eq!(cfg.sections.len(), 1);
        assert_eq!(cfg.sections[0].fields.len(), 1);
        assert_eq!(cfg.sections[0].fields[0].col_span, 2);
        assert!(cfg.sections[0].fields[0].required);
        assert_eq!(cfg.sections[0].layout, SectionLayout::Full);
    }

    #[test]
    fn unknown_field_type_falls_back_to_text() {
        let s = r#"
        {
          sections: [
            {
              id: "s1",
              title: "S1",
              order: 1,
              fields: [
                { key: "x", label: "X", type: "signature" }
              ]
            }
          ]
        }
        "#;

        let cfg = parse_config_str(s).expect("parse ok");
        assert_eq!(cfg.sections[0].fields[0].field_type, FieldType::Text);
    }

    #[test]
    fn rejects_duplicate_section_ids() {
        let s = r#"
        {
          sections: [
            { id: "a", title: "A", order: 1, fields: [] },
            { id: "a", title: "A again", order: 2, fields: [] }
          ]
        }
        "#;

        let err = parse_config_str(s).unwrap_err();
        match err {
            ConfigLoadError::Validation(msg) => assert!(msg.contains("unique")),
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn rejects_duplicate_field_keys_within_section() {
        let s = r#"
        {
          sections: [
            {
              id: "a", title: "A", order: 1,
              fields: [
                { key: "x", label: "X", type: "text" },
                { key: "x", label: "X2", type: "text" }
              ]
            }
          ]
        }
        "#;

        let err = parse_config_str(s).unwrap_err();
        match err {
            ConfigLoadError::Validation(msg) => assert!(msg.contains("unique within the section")),
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn rejects_select_without_options() {
        let s = r#"
        {
          sections: [
            {
              id: "a", title: "A", order: 1,
              fields: [
                { key: "country", label: "Country", type: "select" }
              ]
            }
          ]
        }
        "#;

        let err = parse_config_str(s).unwrap_err();
        match err {
            ConfigLoadError::Validation(msg) => assert!(msg.contains("requires options")),
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn rejects_bad_col_span() {
        let s = r#"
        {
          sections: [
            {
              id: "a", title: "A", order: 1,
              fields: [
                { key: "x", label: "X", type: "text", colSpan: 3 }
              ]
            }
          ]
        }
        "#;

        let err = parse_config_str(s).unwrap_err();
        match err {
            ConfigLoadError::Validation(msg) => assert!(msg.contains("colSpan")),
            _ => panic!("expected validation error"),
        }
    }
}
