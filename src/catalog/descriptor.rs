//! Tool descriptors and catalog entries
//!
//! A ToolDescriptor is display metadata plus the attachment capability flag.
//! A ToolEntry pairs a descriptor with the tool's declared field schema.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BotdeskError, Result};
use crate::schema::{FieldKind, FieldSpec};

/// Immutable metadata for one research bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique stable key, used in the backend route
    pub id: String,
    /// Display name
    pub name: String,
    /// Display category (no behavioral effect)
    #[serde(default)]
    pub category: String,
    /// Display version (no behavioral effect)
    #[serde(default)]
    pub version: String,
    /// Whether this tool's schema may include a file field
    #[serde(default)]
    pub accepts_attachment: bool,
}

impl ToolDescriptor {
    /// Create a new descriptor
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            version: String::new(),
            accepts_attachment: false,
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Allow a file field in this tool's schema
    pub fn with_attachment(mut self) -> Self {
        self.accepts_attachment = true;
        self
    }
}

/// A descriptor plus its declared field schema, in declaration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    pub fields: Vec<FieldSpec>,
}

impl ToolEntry {
    /// Create a new entry
    pub fn new(descriptor: ToolDescriptor, fields: Vec<FieldSpec>) -> Self {
        Self { descriptor, fields }
    }

    /// Tool id shorthand
    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    /// Find a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Structural validation, applied to catalog files before acceptance.
    ///
    /// Rejects: empty schemas, schemas with no unconditional field, duplicate
    /// field names, choice fields without choices or with an out-of-list
    /// default, dependencies on undeclared or non-scalar fields, file fields
    /// on tools that do not accept attachments, and more than one file field.
    pub fn validate(&self) -> Result<()> {
        let id = self.id();

        if self.fields.is_empty() {
            return Err(BotdeskError::Catalog(format!(
                "tool '{}' declares no fields",
                id
            )));
        }
        if !self.fields.iter().any(|f| f.is_unconditional()) {
            return Err(BotdeskError::Catalog(format!(
                "tool '{}' has no unconditional field; its active schema could be empty",
                id
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(BotdeskError::Catalog(format!(
                    "tool '{}' declares field '{}' twice",
                    id, field.name
                )));
            }
        }

        let mut file_fields = 0;
        for field in &self.fields {
            match field.kind {
                FieldKind::Choice => {
                    if field.choices.is_empty() {
                        return Err(BotdeskError::Catalog(format!(
                            "choice field '{}' of tool '{}' has no choices",
                            field.name, id
                        )));
                    }
                    match &field.default {
                        Some(default) if field.choices.contains(default) => {}
                        Some(default) => {
                            return Err(BotdeskError::Catalog(format!(
                                "default '{}' of field '{}' of tool '{}' is not among its choices",
                                default, field.name, id
                            )));
                        }
                        None => {
                            return Err(BotdeskError::Catalog(format!(
                                "choice field '{}' of tool '{}' has no default",
                                field.name, id
                            )));
                        }
                    }
                }
                FieldKind::File => {
                    file_fields += 1;
                    if !self.descriptor.accepts_attachment {
                        return Err(BotdeskError::Catalog(format!(
                            "tool '{}' declares file field '{}' but does not accept attachments",
                            id, field.name
                        )));
                    }
                }
                _ => {}
            }

            if let Some(dep) = &field.depends_on {
                let controlling = self.field(&dep.field).ok_or_else(|| {
                    BotdeskError::Catalog(format!(
                        "field '{}' of tool '{}' depends on undeclared field '{}'",
                        field.name, id, dep.field
                    ))
                })?;
                if !controlling.kind.is_scalar() {
                    return Err(BotdeskError::Catalog(format!(
                        "field '{}' of tool '{}' depends on non-scalar field '{}'",
                        field.name, id, dep.field
                    )));
                }
            }
        }

        if file_fields > 1 {
            return Err(BotdeskError::Catalog(format!(
                "tool '{}' declares {} file fields; at most one is allowed",
                id, file_fields
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(descriptor: ToolDescriptor, fields: Vec<FieldSpec>) -> ToolEntry {
        ToolEntry::new(descriptor, fields)
    }

    #[test]
    fn test_descriptor_builder() {
        let descriptor = ToolDescriptor::new("topic-explorer", "Topic Explorer")
            .with_category("analysis")
            .with_version("1.2")
            .with_attachment();

        assert_eq!(descriptor.id, "topic-explorer");
        assert_eq!(descriptor.name, "Topic Explorer");
        assert_eq!(descriptor.category, "analysis");
        assert_eq!(descriptor.version, "1.2");
        assert!(descriptor.accepts_attachment);
    }

    #[test]
    fn test_entry_field_lookup() {
        let e = entry(
            ToolDescriptor::new("t", "T"),
            vec![FieldSpec::text("topic"), FieldSpec::number("count")],
        );

        assert!(e.field("topic").is_some());
        assert!(e.field("count").is_some());
        assert!(e.field("missing").is_none());
    }

    #[test]
    fn test_validate_ok() {
        let e = entry(
            ToolDescriptor::new("t", "T"),
            vec![
                FieldSpec::choice("mode", vec!["a", "b"]),
                FieldSpec::number("x").when("mode", "a"),
            ],
        );
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_schema() {
        let e = entry(ToolDescriptor::new("t", "T"), vec![]);
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("declares no fields"));
    }

    #[test]
    fn test_validate_no_unconditional_field() {
        let e = entry(
            ToolDescriptor::new("t", "T"),
            vec![FieldSpec::text("x").when("x", "1")],
        );
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("no unconditional field"));
    }

    #[test]
    fn test_validate_duplicate_field_names() {
        let e = entry(
            ToolDescriptor::new("t", "T"),
            vec![FieldSpec::text("topic"), FieldSpec::number("topic")],
        );
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_validate_choice_without_choices() {
        let mut field = FieldSpec::choice("mode", vec!["a"]);
        field.choices.clear();
        field.default = None;
        let e = entry(ToolDescriptor::new("t", "T"), vec![field]);
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_validate_choice_default_outside_choices() {
        let field = FieldSpec::choice("mode", vec!["a", "b"]).with_default("c");
        let e = entry(ToolDescriptor::new("t", "T"), vec![field]);
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("not among its choices"));
    }

    #[test]
    fn test_validate_dependency_on_undeclared_field() {
        let e = entry(
            ToolDescriptor::new("t", "T"),
            vec![
                FieldSpec::text("topic"),
                FieldSpec::number("x").when("mode", "a"),
            ],
        );
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("undeclared field 'mode'"));
    }

    #[test]
    fn test_validate_file_field_without_attachment_flag() {
        let e = entry(
            ToolDescriptor::new("t", "T"),
            vec![FieldSpec::text("q"), FieldSpec::file("document")],
        );
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("does not accept attachments"));
    }

    #[test]
    fn test_validate_multiple_file_fields() {
        let e = entry(
            ToolDescriptor::new("t", "T").with_attachment(),
            vec![
                FieldSpec::text("q"),
                FieldSpec::file("a"),
                FieldSpec::file("b"),
            ],
        );
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("at most one"));
    }

    #[test]
    fn test_validate_dependency_on_file_field() {
        let e = entry(
            ToolDescriptor::new("t", "T").with_attachment(),
            vec![
                FieldSpec::file("document"),
                FieldSpec::text("note").when("document", "x"),
            ],
        );
        let err = e.validate().unwrap_err();
        assert!(err.to_string().contains("non-scalar"));
    }
}
