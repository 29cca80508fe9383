//! Field specifications for tool input schemas
//!
//! A tool's schema is an ordered list of FieldSpec values. Fields may be
//! conditional: a `depends_on` clause ties a field to a specific value of
//! another field, which is how mode selectors add and remove input groups.

use serde::{Deserialize, Serialize};

/// The kind of input a field collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    LongText,
    /// Numeric value (validated as f64 before submission)
    Number,
    /// One value out of a fixed, ordered set
    Choice,
    /// Binary file attachment
    File,
}

impl FieldKind {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "long-text" | "longtext" | "long_text" => Some(Self::LongText),
            "number" => Some(Self::Number),
            "choice" => Some(Self::Choice),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// Check if this kind carries a value in the fields map (files travel
    /// as the attachment instead)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::File)
    }
}

/// Condition tying a field to a specific value of another field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name of the controlling field
    pub field: String,
    /// Value the controlling field must hold for this field to be active
    pub value: String,
}

/// One input the schema resolver requires for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key used in the outgoing request
    pub name: String,
    /// Human-readable label shown when describing the tool
    pub label: String,
    /// Input kind
    pub kind: FieldKind,
    /// Allowed values, only for Choice fields (non-empty, ordered)
    #[serde(default)]
    pub choices: Vec<String>,
    /// Initial value; Choice fields always have one
    #[serde(default)]
    pub default: Option<String>,
    /// Condition under which this field is part of the active schema
    #[serde(default)]
    pub depends_on: Option<Dependency>,
    /// Whether a value must be present before submission
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl FieldSpec {
    fn base(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            choices: Vec::new(),
            default: None,
            depends_on: None,
            required: true,
        }
    }

    /// Create a single-line text field
    pub fn text(name: impl Into<String>) -> Self {
        Self::base(name, FieldKind::Text)
    }

    /// Create a multi-line text field
    pub fn long_text(name: impl Into<String>) -> Self {
        Self::base(name, FieldKind::LongText)
    }

    /// Create a numeric field
    pub fn number(name: impl Into<String>) -> Self {
        Self::base(name, FieldKind::Number)
    }

    /// Create a choice field; the first choice is the designated default
    pub fn choice<S: Into<String>>(name: impl Into<String>, choices: Vec<S>) -> Self {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        let mut field = Self::base(name, FieldKind::Choice);
        field.default = choices.first().cloned();
        field.choices = choices;
        field
    }

    /// Create a file attachment field
    pub fn file(name: impl Into<String>) -> Self {
        Self::base(name, FieldKind::File)
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Make this field conditional on another field holding `value`
    pub fn when(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.depends_on = Some(Dependency {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Mark this field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Check if this field is unconditional (always in the active schema)
    pub fn is_unconditional(&self) -> bool {
        self.depends_on.is_none()
    }
}
