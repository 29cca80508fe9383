//! Request schema resolution
//!
//! Computes the active field set for a tool given the values collected so
//! far, fills defaults, and validates a submission before any network call.
//!
//! Resolution is a pure function: identical inputs always yield the same
//! field list in declaration order, so toggling a mode selector adds and
//! removes its dependent group without reordering unrelated fields.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::ToolEntry;
use crate::error::{BotdeskError, Result};

use super::field::{FieldKind, FieldSpec};

/// The subset of a tool's declared fields that is currently required, in
/// declaration order.
///
/// A conditional field is included while the *effective* value of its
/// controlling field equals the dependency value. The effective value is the
/// collected value or, when the controlling field is unset or was cleared,
/// its declared default. Falling back to the default keeps the active schema
/// from collapsing when a mode selection is removed.
pub fn active_fields<'a>(
    entry: &'a ToolEntry,
    values: &HashMap<String, String>,
) -> Vec<&'a FieldSpec> {
    entry
        .fields
        .iter()
        .filter(|field| match &field.depends_on {
            None => true,
            Some(dep) => {
                let effective = values
                    .get(&dep.field)
                    .map(String::as_str)
                    .or_else(|| entry.field(&dep.field).and_then(|f| f.default.as_deref()));
                effective == Some(dep.value.as_str())
            }
        })
        .collect()
}

/// Build the submission map for the active schema: collected values, with
/// absent fields filled from their declared defaults. File fields travel as
/// the attachment and are never part of the map; values for fields outside
/// the active schema are dropped.
pub fn collect(entry: &ToolEntry, values: &HashMap<String, String>) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for field in active_fields(entry, values) {
        if !field.kind.is_scalar() {
            continue;
        }
        if let Some(value) = values.get(&field.name) {
            collected.insert(field.name.clone(), value.clone());
        } else if let Some(default) = &field.default {
            collected.insert(field.name.clone(), default.clone());
        }
    }
    collected
}

/// Validate a submission against the active schema.
///
/// Fires before any network call: missing required fields (an empty string
/// counts as present), non-numeric values in number fields, choice values
/// outside the declared list, an attachment without an active file field,
/// and a missing required attachment are all Validation errors.
pub fn validate(
    entry: &ToolEntry,
    values: &HashMap<String, String>,
    has_attachment: bool,
) -> Result<()> {
    let collected = collect(entry, values);
    let mut file_field: Option<&FieldSpec> = None;

    for field in active_fields(entry, values) {
        if field.kind == FieldKind::File {
            file_field = Some(field);
            continue;
        }

        let value = collected.get(&field.name);
        match value {
            None if field.required => {
                return Err(BotdeskError::Validation(format!(
                    "missing required field '{}'",
                    field.name
                )));
            }
            None => {}
            Some(value) => match field.kind {
                FieldKind::Number => {
                    if value.trim().parse::<f64>().is_err() {
                        return Err(BotdeskError::Validation(format!(
                            "field '{}' expects a number, got '{}'",
                            field.name, value
                        )));
                    }
                }
                FieldKind::Choice => {
                    if !field.choices.iter().any(|c| c == value) {
                        return Err(BotdeskError::Validation(format!(
                            "'{}' is not an allowed choice for field '{}' (allowed: {})",
                            value,
                            field.name,
                            field.choices.join(", ")
                        )));
                    }
                }
                _ => {}
            },
        }
    }

    match file_field {
        Some(field) if field.required && !has_attachment => Err(BotdeskError::Validation(
            format!("missing required attachment '{}'", field.name),
        )),
        None if has_attachment => Err(BotdeskError::Validation(
            "an attachment was supplied but the active schema has no file field".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ToolCatalog, ToolDescriptor, ToolEntry};
    use crate::schema::FieldSpec;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn names(fields: &[&FieldSpec]) -> Vec<String> {
        fields.iter().map(|f| f.name.clone()).collect()
    }

    fn stats_entry() -> ToolEntry {
        ToolCatalog::builtin()
            .get("stats-calculator")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_active_fields_non_empty_for_all_builtin_tools() {
        let catalog = ToolCatalog::builtin();
        for entry in catalog.all() {
            let active = active_fields(entry, &HashMap::new());
            assert!(!active.is_empty(), "empty active schema for '{}'", entry.id());
        }
    }

    #[test]
    fn test_active_fields_duplicate_free_and_idempotent() {
        let entry = stats_entry();
        let vals = values(&[("mode", "confidence-interval")]);

        let first = names(&active_fields(&entry, &vals));
        let second = names(&active_fields(&entry, &vals));
        assert_eq!(first, second);

        let mut deduped = first.clone();
        deduped.dedup();
        assert_eq!(first, deduped);
    }

    #[test]
    fn test_active_fields_uses_default_mode_when_unset() {
        let entry = stats_entry();
        let active = names(&active_fields(&entry, &HashMap::new()));
        assert_eq!(
            active,
            vec!["mode", "population", "margin_of_error", "confidence"]
        );
    }

    #[test]
    fn test_active_fields_follows_selected_mode() {
        let entry = stats_entry();
        let active = names(&active_fields(&entry, &values(&[("mode", "confidence-interval")])));
        assert_eq!(active, vec!["mode", "mean", "std_dev", "sample_count"]);
    }

    #[test]
    fn test_active_fields_mode_toggle_round_trip() {
        let entry = stats_entry();

        let initial = names(&active_fields(&entry, &HashMap::new()));
        let toggled = names(&active_fields(&entry, &values(&[("mode", "confidence-interval")])));
        assert_ne!(initial, toggled);

        // Clearing the controlling value falls back to its default.
        let cleared = names(&active_fields(&entry, &HashMap::new()));
        assert_eq!(initial, cleared);
    }

    #[test]
    fn test_active_fields_declaration_order_stable() {
        let entry = ToolEntry::new(
            ToolDescriptor::new("t", "T"),
            vec![
                FieldSpec::text("first"),
                FieldSpec::choice("mode", vec!["a", "b"]),
                FieldSpec::number("middle").when("mode", "a"),
                FieldSpec::text("last"),
            ],
        );

        let with_group = names(&active_fields(&entry, &HashMap::new()));
        assert_eq!(with_group, vec!["first", "mode", "middle", "last"]);

        let without_group = names(&active_fields(&entry, &values(&[("mode", "b")])));
        assert_eq!(without_group, vec!["first", "mode", "last"]);
    }

    #[test]
    fn test_collect_fills_defaults() {
        let entry = stats_entry();
        let collected = collect(&entry, &values(&[("population", "1200"), ("margin_of_error", "5")]));

        assert_eq!(collected.get("mode").map(String::as_str), Some("sample-size"));
        assert_eq!(collected.get("confidence").map(String::as_str), Some("95"));
        assert_eq!(collected.get("population").map(String::as_str), Some("1200"));
    }

    #[test]
    fn test_collect_user_value_overrides_default() {
        let entry = stats_entry();
        let collected = collect(&entry, &values(&[("confidence", "99")]));
        assert_eq!(collected.get("confidence").map(String::as_str), Some("99"));
    }

    #[test]
    fn test_collect_drops_inactive_values() {
        let entry = stats_entry();
        // mean belongs to the confidence-interval group, inactive by default
        let collected = collect(&entry, &values(&[("mean", "3.5")]));
        assert!(!collected.contains_key("mean"));
    }

    #[test]
    fn test_collect_skips_absent_optional_without_default() {
        let catalog = ToolCatalog::builtin();
        let entry = catalog.get("research-summarizer").unwrap();
        let collected = collect(entry, &values(&[("topic", "photosynthesis")]));

        assert!(!collected.contains_key("focus"));
        assert_eq!(collected.get("depth").map(String::as_str), Some("standard"));
    }

    #[test]
    fn test_collect_excludes_file_fields() {
        let catalog = ToolCatalog::builtin();
        let entry = catalog.get("document-analyzer").unwrap();
        let collected = collect(entry, &HashMap::new());
        assert!(!collected.contains_key("document"));
    }

    #[test]
    fn test_validate_ok() {
        let entry = stats_entry();
        let vals = values(&[("population", "1200"), ("margin_of_error", "5")]);
        assert!(validate(&entry, &vals, false).is_ok());
    }

    #[test]
    fn test_validate_missing_required_field() {
        let entry = stats_entry();
        // population and margin_of_error have no defaults
        let err = validate(&entry, &HashMap::new(), false).unwrap_err();
        assert!(matches!(err, BotdeskError::Validation(_)));
        assert!(err.to_string().contains("missing required field"));
    }

    #[test]
    fn test_validate_empty_string_counts_as_present() {
        let catalog = ToolCatalog::builtin();
        let entry = catalog.get("topic-explorer").unwrap();
        assert!(validate(entry, &values(&[("topic", "")]), false).is_ok());
    }

    #[test]
    fn test_validate_non_numeric_number() {
        let entry = stats_entry();
        let vals = values(&[("population", "many"), ("margin_of_error", "5")]);
        let err = validate(&entry, &vals, false).unwrap_err();
        assert!(err.to_string().contains("expects a number"));
    }

    #[test]
    fn test_validate_choice_outside_list() {
        let entry = stats_entry();
        let vals = values(&[
            ("population", "1200"),
            ("margin_of_error", "5"),
            ("confidence", "85"),
        ]);
        let err = validate(&entry, &vals, false).unwrap_err();
        assert!(err.to_string().contains("not an allowed choice"));
    }

    #[test]
    fn test_validate_attachment_without_file_field() {
        let entry = stats_entry();
        let vals = values(&[("population", "1200"), ("margin_of_error", "5")]);
        let err = validate(&entry, &vals, true).unwrap_err();
        assert!(err.to_string().contains("no file field"));
    }

    #[test]
    fn test_validate_missing_required_attachment() {
        let catalog = ToolCatalog::builtin();
        let entry = catalog.get("plagiarism-screen").unwrap();
        let err = validate(entry, &HashMap::new(), false).unwrap_err();
        assert!(err.to_string().contains("missing required attachment 'document'"));
    }

    #[test]
    fn test_validate_attachment_satisfies_file_field() {
        let catalog = ToolCatalog::builtin();
        let entry = catalog.get("plagiarism-screen").unwrap();
        assert!(validate(entry, &HashMap::new(), true).is_ok());
    }

    #[test]
    fn test_validate_ignores_values_outside_active_schema() {
        let entry = stats_entry();
        let vals = values(&[
            ("population", "1200"),
            ("margin_of_error", "5"),
            // inactive group; "not-a-number" must not fail validation
            ("mean", "not-a-number"),
            ("unrelated", "x"),
        ]);
        assert!(validate(&entry, &vals, false).is_ok());
    }
}
