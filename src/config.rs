//! Engine and renderer option surfaces.
//!
//! Options are plain data: construct them directly, or deserialize them
//! from a caller-owned config file. Unknown keys are ignored on
//! deserialization and missing keys take the documented defaults, so a
//! config section written for a newer version stays loadable.

use serde::{Deserialize, Serialize};

/// The unit size a diff is currently computed and rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Whole text lines. The top-level default.
    #[default]
    Lines,
    /// Word tokens (a whitespace run plus the word following it).
    Words,
    /// Single Unicode scalar values.
    Characters,
}

impl Granularity {
    /// The next-finer granularity. `Characters` is the fixed point, so
    /// recursion over this always terminates.
    #[must_use]
    pub const fn finer(self) -> Self {
        match self {
            Self::Lines => Self::Words,
            Self::Words | Self::Characters => Self::Characters,
        }
    }
}

/// Options for the diff engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Pair an adjacent delete+insert run into a single
    /// [`DiffOp::Change`](crate::script::DiffOp::Change) whenever both
    /// sides are present at a boundary. Applied at every boundary or
    /// none. Defaults to `true`; the inline renderer's recursive
    /// sub-diffing only triggers on `Change` operations.
    #[serde(default = "default_merge_changes")]
    pub merge_changes: bool,

    /// Abandon the computation with
    /// [`DiffError::TooLarge`](crate::error::DiffError::TooLarge) once
    /// the edit distance exceeds this ceiling. `None` (the default)
    /// never abandons; set a ceiling when diffing untrusted input sizes.
    #[serde(default)]
    pub max_edit_distance: Option<usize>,
}

/// Serde default for [`DiffOptions::merge_changes`].
const fn default_merge_changes() -> bool {
    true
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            merge_changes: true,
            max_edit_distance: None,
        }
    }
}

/// Options controlling a renderer.
///
/// The defaults are the inline renderer's: practically unbounded context
/// windows (inline presentation wants the full surrounding text) and
/// HTML `<ins>`/`<del>` markers. Unified-style rendering wants small
/// windows; see [`RenderConfig::unified`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Unchanged units preserved before each change.
    #[serde(default = "default_context_lines")]
    pub leading_context_lines: usize,

    /// Unchanged units preserved after each change.
    #[serde(default = "default_context_lines")]
    pub trailing_context_lines: usize,

    /// Marker emitted before an inserted run.
    #[serde(default = "default_insert_prefix")]
    pub insert_prefix: String,

    /// Marker emitted after an inserted run.
    #[serde(default = "default_insert_suffix")]
    pub insert_suffix: String,

    /// Marker emitted before a deleted run.
    #[serde(default = "default_delete_prefix")]
    pub delete_prefix: String,

    /// Marker emitted after a deleted run.
    #[serde(default = "default_delete_suffix")]
    pub delete_suffix: String,

    /// Template for each display block's header. Recognized
    /// placeholders: `{xbeg}`, `{xlen}`, `{ybeg}`, `{ylen}` (1-based
    /// source/target ranges). Empty (the default) emits no header.
    #[serde(default)]
    pub block_header_template: String,

    /// Granularity the renderer is currently splitting at. Callers keep
    /// the `Lines` default; the inline renderer advances it per
    /// recursion step.
    #[serde(default)]
    pub split_granularity: Granularity,

    /// Skip the word stage and recurse straight to characters.
    #[serde(default)]
    pub split_to_characters: bool,
}

/// Serde default for the context window fields.
const fn default_context_lines() -> usize {
    10_000
}

/// Serde default for [`RenderConfig::insert_prefix`].
fn default_insert_prefix() -> String {
    "<ins>".to_string()
}

/// Serde default for [`RenderConfig::insert_suffix`].
fn default_insert_suffix() -> String {
    "</ins>".to_string()
}

/// Serde default for [`RenderConfig::delete_prefix`].
fn default_delete_prefix() -> String {
    "<del>".to_string()
}

/// Serde default for [`RenderConfig::delete_suffix`].
fn default_delete_suffix() -> String {
    "</del>".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            leading_context_lines: default_context_lines(),
            trailing_context_lines: default_context_lines(),
            insert_prefix: default_insert_prefix(),
            insert_suffix: default_insert_suffix(),
            delete_prefix: default_delete_prefix(),
            delete_suffix: default_delete_suffix(),
            block_header_template: String::new(),
            split_granularity: Granularity::default(),
            split_to_characters: false,
        }
    }
}

impl RenderConfig {
    /// Preset for unified-style output: three context lines each side,
    /// hunk-style block headers.
    #[must_use]
    pub fn unified() -> Self {
        Self {
            leading_context_lines: 3,
            trailing_context_lines: 3,
            block_header_template: "@@ -{xbeg},{xlen} +{ybeg},{ylen} @@".to_string(),
            ..Self::default()
        }
    }

    /// Copy of this config with the granularity replaced. Used by the
    /// inline renderer to build each nested sub-render's config.
    #[must_use]
    pub fn with_granularity(&self, granularity: Granularity) -> Self {
        Self {
            split_granularity: granularity,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_strictly_decreases() {
        assert_eq!(Granularity::Lines.finer(), Granularity::Words);
        assert_eq!(Granularity::Words.finer(), Granularity::Characters);
        assert_eq!(Granularity::Characters.finer(), Granularity::Characters);
    }

    #[test]
    fn test_render_defaults_match_inline() {
        let config = RenderConfig::default();
        assert_eq!(config.leading_context_lines, 10_000);
        assert_eq!(config.trailing_context_lines, 10_000);
        assert_eq!(config.insert_prefix, "<ins>");
        assert_eq!(config.delete_suffix, "</del>");
        assert!(config.block_header_template.is_empty());
        assert_eq!(config.split_granularity, Granularity::Lines);
        assert!(!config.split_to_characters);
    }

    #[test]
    fn test_unified_preset() {
        let config = RenderConfig::unified();
        assert_eq!(config.leading_context_lines, 3);
        assert_eq!(config.trailing_context_lines, 3);
        assert!(config.block_header_template.contains("{xbeg}"));
    }

    #[test]
    fn test_with_granularity_overrides_one_field() {
        let config = RenderConfig::default();
        let nested = config.with_granularity(Granularity::Words);
        assert_eq!(nested.split_granularity, Granularity::Words);
        assert_eq!(
            nested.leading_context_lines,
            config.leading_context_lines
        );
        assert_eq!(nested.insert_prefix, config.insert_prefix);
    }

    #[test]
    fn test_deserialize_ignores_unknown_and_fills_defaults() {
        let toml = r#"
            leading_context_lines = 4
            some_future_option = "ignored"
        "#;
        let config: RenderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.leading_context_lines, 4);
        assert_eq!(config.trailing_context_lines, 10_000);
        assert_eq!(config.insert_prefix, "<ins>");
    }

    #[test]
    fn test_diff_options_defaults() {
        let options: DiffOptions = toml::from_str("").unwrap();
        assert!(options.merge_changes);
        assert!(options.max_edit_distance.is_none());
        assert_eq!(options, DiffOptions::default());
    }
}
