//! Wiki-style inline renderer.
//!
//! Deletions and insertions are wrapped in distinct markers in a single
//! text flow. A changed region is not shown as a flat deleted run plus
//! inserted run: its two sides are re-tokenized and re-diffed at word
//! granularity, and changed words are re-diffed again at character
//! granularity, so the output highlights exactly the sub-spans that
//! differ.

use crate::config::{DiffOptions, Granularity, RenderConfig};
use crate::engine::myers;
use crate::render::{FormatHooks, Renderer, escape_html, render_with_hooks};
use crate::script::EditScript;
use anyhow::Result;
use tracing::{Level, span};

/// Placeholder substituted for literal newlines before word/character
/// tokenization, so an embedded newline is never mistaken for a token
/// boundary. Restored after the nested render. Any U+0000 already in
/// the input is dropped first to keep the substitution reversible.
const NEWLINE_MARK: char = '\0';

/// Renderer producing inline markup with recursive sub-span
/// highlighting.
///
/// Context windows default to 10_000 units each side — inline
/// presentation wants the full surrounding text, not clipped hunks.
/// Identical inputs therefore render as an empty string (a script with
/// no changes produces no display blocks).
#[derive(Debug, Clone)]
pub struct InlineRenderer {
    /// Render options; `split_granularity` tracks the recursion level.
    config: RenderConfig,
    /// Options for the nested sub-diffs of changed regions.
    options: DiffOptions,
}

impl Default for InlineRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl InlineRenderer {
    /// Create a renderer with the given config.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            options: DiffOptions::default(),
        }
    }

    /// Replace the options used for nested sub-diffs. Merging stays
    /// forced on regardless: the recursion only triggers on `Change`
    /// operations.
    #[must_use]
    pub fn with_diff_options(mut self, options: DiffOptions) -> Self {
        self.options = DiffOptions {
            merge_changes: true,
            ..options
        };
        self
    }

    /// The render options in effect.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Join formatted units per the current granularity: full lines are
    /// newline-terminated, word and character tokens concatenate as-is.
    fn join(&self, units: &[String]) -> String {
        if self.config.split_granularity == Granularity::Lines {
            let mut joined = units.join("\n");
            joined.push('\n');
            joined
        } else {
            units.concat()
        }
    }

    /// Escape a run and wrap it in the given markers: prefix before the
    /// first unit, suffix after the last.
    fn wrap(&self, units: &[String], prefix: &str, suffix: &str) -> String {
        let mut escaped: Vec<String> = units.iter().map(|unit| escape_html(unit)).collect();
        if let Some(first) = escaped.first_mut() {
            first.insert_str(0, prefix);
        }
        if let Some(last) = escaped.last_mut() {
            last.push_str(suffix);
        }
        self.join(&escaped)
    }

    /// Re-diff a changed region one granularity finer and render it
    /// with a nested renderer instance.
    fn recurse(&self, from_text: &str, to_text: &str, granularity: Granularity) -> Result<String> {
        let (from_units, to_units) = match granularity {
            Granularity::Words => (split_words(from_text), split_words(to_text)),
            Granularity::Characters | Granularity::Lines => {
                (split_characters(from_text), split_characters(to_text))
            }
        };

        let nested_script = myers::diff_slices(&from_units, &to_units, &self.options)?;
        let nested = Self {
            config: self.config.with_granularity(granularity),
            options: self.options.clone(),
        };
        nested.render(&nested_script)
    }
}

impl Renderer for InlineRenderer {
    fn render(&self, script: &EditScript) -> Result<String> {
        let span = span!(
            Level::DEBUG,
            "render_inline",
            granularity = ?self.config.split_granularity
        );
        let _guard = span.enter();
        render_with_hooks(script, &self.config, self)
    }
}

impl FormatHooks for InlineRenderer {
    fn block_start(&self, header: &str) -> String {
        // Inline blocks flow into the surrounding text; the header (empty
        // by default) is emitted verbatim, without a line break.
        header.to_string()
    }

    fn copied(&self, units: &[String]) -> Result<String> {
        let escaped: Vec<String> = units.iter().map(|unit| escape_html(unit)).collect();
        Ok(self.join(&escaped))
    }

    fn inserted(&self, units: &[String]) -> Result<String> {
        Ok(self.wrap(units, &self.config.insert_prefix, &self.config.insert_suffix))
    }

    fn deleted(&self, units: &[String]) -> Result<String> {
        Ok(self.wrap(units, &self.config.delete_prefix, &self.config.delete_suffix))
    }

    fn changed(&self, orig: &[String], new: &[String]) -> Result<String> {
        match self.config.split_granularity {
            // Base case: single characters have nothing finer to show.
            Granularity::Characters => {
                let mut out = self.deleted(orig)?;
                out.push_str(&self.inserted(new)?);
                Ok(out)
            }
            // Word tokens carry their preceding spacing; re-emit the
            // spacing both sides share so identical indentation is not
            // highlighted, then re-diff the remainder at character
            // granularity.
            Granularity::Words => {
                let mut orig = orig.to_vec();
                let mut new = new.to_vec();
                let mut shared = String::new();
                while orig.first().is_some_and(|unit| unit.starts_with(' '))
                    && new.first().is_some_and(|unit| unit.starts_with(' '))
                {
                    shared.push(' ');
                    orig[0].remove(0);
                    new[0].remove(0);
                }
                let nested = self.recurse(&orig.concat(), &new.concat(), Granularity::Characters)?;
                Ok(format!("{shared}{nested}"))
            }
            // Top level: join the lines, protect embedded newlines from
            // the tokenizer, re-diff at word granularity (or straight at
            // characters when configured), then restore real newlines in
            // the nested output.
            Granularity::Lines => {
                let from_text = protect_newlines(&orig.join("\n"));
                let to_text = protect_newlines(&new.join("\n"));
                let granularity = if self.config.split_to_characters {
                    Granularity::Characters
                } else {
                    Granularity::Words
                };
                let nested = self.recurse(&from_text, &to_text, granularity)?;
                let mut out = nested.replace(NEWLINE_MARK, "\n");
                out.push('\n');
                Ok(out)
            }
        }
    }
}

/// Substitute the newline placeholder for every literal newline,
/// dropping any pre-existing placeholder characters first.
fn protect_newlines(text: &str) -> String {
    text.replace(NEWLINE_MARK, "")
        .replace('\n', &NEWLINE_MARK.to_string())
}

/// Split into word tokens: each token is a maximal run of whitespace
/// followed by a maximal run of non-whitespace, so concatenating the
/// tokens reproduces the input exactly.
fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let mut end = pos;
        while end < chars.len() && is_token_space(chars[end]) {
            end += 1;
        }
        while end < chars.len() && !is_token_space(chars[end]) {
            end += 1;
        }
        words.push(chars[pos..end].iter().collect());
        pos = end;
    }
    words
}

/// Whitespace for word tokenization purposes.
const fn is_token_space(ch: char) -> bool {
    matches!(ch, ' ' | '\n')
}

/// Split into single Unicode scalar values.
fn split_characters(text: &str) -> Vec<String> {
    text.chars().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff_lines;

    fn render(old: &str, new: &str) -> String {
        let script = diff_lines(old, new, &DiffOptions::default()).unwrap();
        InlineRenderer::default().render(&script).unwrap()
    }

    #[test]
    fn test_split_words_is_lossless() {
        let text = "  leading and trailing  ";
        let words = split_words(text);
        assert_eq!(words, vec!["  leading", " and", " trailing", "  "]);
        assert_eq!(words.concat(), text);
    }

    #[test]
    fn test_split_words_empty() {
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_word_level_highlight() {
        let out = render("The cat sat", "The dog sat");
        assert_eq!(out, "The <del>cat</del><ins>dog</ins> sat\n");
    }

    #[test]
    fn test_character_level_highlight_within_word() {
        // "cat" -> "cart": the shared prefix/suffix characters stay
        // unmarked, only the inserted character is wrapped.
        let out = render("The cat sat", "The cart sat");
        assert_eq!(out, "The ca<ins>r</ins>t sat\n");
    }

    #[test]
    fn test_identical_input_renders_empty() {
        assert_eq!(render("same text", "same text"), "");
    }

    #[test]
    fn test_pure_insert_line() {
        let out = render("alpha", "alpha\nbeta");
        assert_eq!(out, "alpha\n<ins>beta</ins>\n");
    }

    #[test]
    fn test_pure_delete_line() {
        let out = render("alpha\nbeta", "alpha");
        assert_eq!(out, "alpha\n<del>beta</del>\n");
    }

    #[test]
    fn test_embedded_newlines_survive_recursion() {
        // Both changed regions span two lines; the newline must come
        // back out of the placeholder intact.
        let out = render("aa bb\ncc dd", "aa xx\ncc yy");
        assert_eq!(
            out,
            "aa <del>bb</del><ins>xx</ins>\ncc <del>dd</del><ins>yy</ins>\n"
        );
    }

    #[test]
    fn test_escaped_exactly_once_through_recursion() {
        let out = render("a < b", "a > b");
        assert!(out.contains("&lt;"));
        assert!(out.contains("&gt;"));
        assert!(!out.contains("&amp;lt;"));
        assert!(!out.contains("&amp;gt;"));
    }

    #[test]
    fn test_shared_leading_space_not_highlighted() {
        // The two-space indentation is identical on both sides and must
        // be re-emitted outside the markers.
        let out = render("  foo", "  bar");
        assert_eq!(out, "  <del>foo</del><ins>bar</ins>\n");
    }

    #[test]
    fn test_split_to_characters_skips_word_stage() {
        let config = RenderConfig {
            split_to_characters: true,
            ..RenderConfig::default()
        };
        let script = diff_lines("abc", "abd", &DiffOptions::default()).unwrap();
        let out = InlineRenderer::new(config).render(&script).unwrap();
        assert_eq!(out, "ab<del>c</del><ins>d</ins>\n");
    }

    #[test]
    fn test_custom_markers() {
        let config = RenderConfig {
            insert_prefix: "{+".to_string(),
            insert_suffix: "+}".to_string(),
            delete_prefix: "[-".to_string(),
            delete_suffix: "-]".to_string(),
            ..RenderConfig::default()
        };
        let script = diff_lines("The cat sat", "The dog sat", &DiffOptions::default()).unwrap();
        let out = InlineRenderer::new(config).render(&script).unwrap();
        assert_eq!(out, "The [-cat-]{+dog+} sat\n");
    }

    #[test]
    fn test_unicode_character_split() {
        let out = render("naïve", "naive");
        assert_eq!(out, "na<del>ï</del><ins>i</ins>ve\n");
    }

    #[test]
    fn test_multibyte_word_change() {
        let words = split_words("héllo wörld");
        assert_eq!(words, vec!["héllo", " wörld"]);
    }
}
