//! Compiled-in research bot catalog
//!
//! The default tool set shipped with the binary. Operators can replace it
//! with a TOML catalog file via configuration.

use crate::schema::FieldSpec;

use super::descriptor::{ToolDescriptor, ToolEntry};
use super::registry::ToolCatalog;

impl ToolCatalog {
    /// The builtin research bot catalog
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for entry in builtin_entries() {
            // Fixed at compile time; unit tests assert validity and uniqueness.
            catalog
                .insert(entry)
                .expect("builtin catalog entry is valid");
        }
        catalog
    }
}

fn builtin_entries() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            ToolDescriptor::new("research-summarizer", "Research Summarizer")
                .with_category("analysis")
                .with_version("1.2"),
            vec![
                FieldSpec::text("topic").with_label("Research topic"),
                FieldSpec::choice("depth", vec!["brief", "standard", "detailed"])
                    .with_default("standard")
                    .with_label("Summary depth"),
                FieldSpec::long_text("focus")
                    .with_label("Aspects to focus on")
                    .optional(),
            ],
        ),
        ToolEntry::new(
            ToolDescriptor::new("citation-formatter", "Citation Formatter")
                .with_category("writing")
                .with_version("1.0"),
            vec![
                FieldSpec::long_text("source").with_label("Source details"),
                FieldSpec::choice("style", vec!["apa", "mla", "chicago", "harvard"])
                    .with_label("Citation style"),
            ],
        ),
        ToolEntry::new(
            ToolDescriptor::new("plagiarism-screen", "Plagiarism Screen")
                .with_category("integrity")
                .with_version("2.0")
                .with_attachment(),
            vec![
                FieldSpec::file("document").with_label("Document to screen"),
                FieldSpec::choice("strictness", vec!["low", "medium", "high"])
                    .with_default("medium")
                    .with_label("Match strictness"),
            ],
        ),
        ToolEntry::new(
            ToolDescriptor::new("topic-explorer", "Topic Explorer")
                .with_category("analysis")
                .with_version("1.1"),
            vec![
                FieldSpec::text("topic").with_label("Topic to explore"),
                FieldSpec::choice("audience", vec!["school", "undergraduate", "graduate"])
                    .with_default("undergraduate")
                    .with_label("Target audience"),
            ],
        ),
        ToolEntry::new(
            ToolDescriptor::new("stats-calculator", "Statistics Calculator")
                .with_category("data")
                .with_version("1.3"),
            vec![
                FieldSpec::choice("mode", vec!["sample-size", "confidence-interval"])
                    .with_label("Calculation mode"),
                // sample-size inputs
                FieldSpec::number("population")
                    .with_label("Population size")
                    .when("mode", "sample-size"),
                FieldSpec::number("margin_of_error")
                    .with_label("Margin of error (%)")
                    .when("mode", "sample-size"),
                FieldSpec::choice("confidence", vec!["90", "95", "99"])
                    .with_default("95")
                    .with_label("Confidence level (%)")
                    .when("mode", "sample-size"),
                // confidence-interval inputs
                FieldSpec::number("mean")
                    .with_label("Sample mean")
                    .when("mode", "confidence-interval"),
                FieldSpec::number("std_dev")
                    .with_label("Standard deviation")
                    .when("mode", "confidence-interval"),
                FieldSpec::number("sample_count")
                    .with_label("Sample count")
                    .when("mode", "confidence-interval"),
            ],
        ),
        ToolEntry::new(
            ToolDescriptor::new("document-analyzer", "Document Analyzer")
                .with_category("documents")
                .with_version("1.0")
                .with_attachment(),
            vec![
                FieldSpec::file("document").with_label("Document to analyze"),
                FieldSpec::long_text("question")
                    .with_label("Question about the document")
                    .optional(),
            ],
        ),
    ]
}
