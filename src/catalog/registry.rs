//! Tool catalog loading and lookup
//!
//! The catalog is read-only after initialization. It is either the compiled-in
//! builtin set or an operator override loaded from a TOML file.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BotdeskError, Result};
use crate::schema::{Dependency, FieldKind, FieldSpec};

use super::descriptor::{ToolDescriptor, ToolEntry};

/// TOML representation of a field dependency
#[derive(Debug, Deserialize)]
struct TomlDependency {
    field: String,
    value: String,
}

/// TOML representation of a field
#[derive(Debug, Deserialize)]
struct TomlField {
    name: String,
    kind: String,
    label: Option<String>,
    #[serde(default)]
    choices: Vec<String>,
    default: Option<String>,
    depends_on: Option<TomlDependency>,
    required: Option<bool>,
}

/// TOML representation of a tool definition
#[derive(Debug, Deserialize)]
struct TomlTool {
    id: String,
    name: String,
    category: Option<String>,
    version: Option<String>,
    accepts_attachment: Option<bool>,
    #[serde(rename = "field", default)]
    fields: Vec<TomlField>,
}

/// TOML file structure
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(rename = "tool")]
    tools: Vec<TomlTool>,
}

/// Registry of research bots, keyed by tool id
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: HashMap<String, ToolEntry>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Load catalog from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            BotdeskError::Catalog(format!("failed to read catalog file: {}", e))
        })?;
        Self::from_toml(&content)
    }

    /// Load catalog from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: TomlCatalog = toml::from_str(content)
            .map_err(|e| BotdeskError::Catalog(format!("failed to parse TOML: {}", e)))?;

        let mut result = Self::new();
        for toml_tool in catalog.tools {
            result.insert(Self::convert_toml_tool(toml_tool)?)?;
        }

        Ok(result)
    }

    /// Convert a TOML tool to a ToolEntry
    fn convert_toml_tool(toml_tool: TomlTool) -> Result<ToolEntry> {
        let mut descriptor = ToolDescriptor::new(toml_tool.id, toml_tool.name);
        if let Some(category) = toml_tool.category {
            descriptor = descriptor.with_category(category);
        }
        if let Some(version) = toml_tool.version {
            descriptor = descriptor.with_version(version);
        }
        if toml_tool.accepts_attachment.unwrap_or(false) {
            descriptor = descriptor.with_attachment();
        }

        let mut fields = Vec::with_capacity(toml_tool.fields.len());
        for toml_field in toml_tool.fields {
            let kind = FieldKind::from_str(&toml_field.kind).ok_or_else(|| {
                BotdeskError::Catalog(format!(
                    "invalid kind '{}' for field '{}' of tool '{}'",
                    toml_field.kind, toml_field.name, descriptor.id
                ))
            })?;

            // Choice fields fall back to their first choice as the default.
            let default = toml_field
                .default
                .or_else(|| match kind {
                    FieldKind::Choice => toml_field.choices.first().cloned(),
                    _ => None,
                });

            fields.push(FieldSpec {
                label: toml_field.label.unwrap_or_else(|| toml_field.name.clone()),
                name: toml_field.name,
                kind,
                choices: toml_field.choices,
                default,
                depends_on: toml_field.depends_on.map(|d| Dependency {
                    field: d.field,
                    value: d.value,
                }),
                required: toml_field.required.unwrap_or(true),
            });
        }

        Ok(ToolEntry::new(descriptor, fields))
    }

    /// Add a validated entry, rejecting duplicate ids
    pub fn insert(&mut self, entry: ToolEntry) -> Result<()> {
        entry.validate()?;
        let id = entry.id().to_string();
        if self.tools.contains_key(&id) {
            return Err(BotdeskError::Catalog(format!("duplicate tool id '{}'", id)));
        }
        self.tools.insert(id, entry);
        Ok(())
    }

    /// Get an entry by tool id
    pub fn get(&self, id: &str) -> Option<&ToolEntry> {
        self.tools.get(id)
    }

    /// Get an entry by tool id, failing with UnknownTool
    pub fn entry(&self, id: &str) -> Result<&ToolEntry> {
        self.tools
            .get(id)
            .ok_or_else(|| BotdeskError::UnknownTool(id.to_string()))
    }

    /// Check if a tool exists
    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(id)
    }

    /// Active schema for a tool given the values collected so far
    pub fn active_fields(
        &self,
        tool_id: &str,
        values: &HashMap<String, String>,
    ) -> Result<Vec<&FieldSpec>> {
        let entry = self.entry(tool_id)?;
        Ok(crate::schema::resolver::active_fields(entry, values))
    }

    /// List all tool ids, sorted for stable display
    pub fn list(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// All entries
    pub fn all(&self) -> impl Iterator<Item = &ToolEntry> {
        self.tools.values()
    }

    /// Entries in the given category
    pub fn by_category(&self, category: &str) -> Vec<&ToolEntry> {
        let mut entries: Vec<&ToolEntry> = self
            .tools
            .values()
            .filter(|e| e.descriptor.category == category)
            .collect();
        entries.sort_by(|a, b| a.id().cmp(b.id()));
        entries
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .tools
            .values()
            .map(|e| e.descriptor.category.as_str())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}
