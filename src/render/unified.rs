//! Unified-style renderer.
//!
//! Produces hunk-oriented plain-text output: `@@`-style headers from
//! the block ranges, context lines prefixed with a space, deletions
//! with `-`, insertions with `+`, optionally colorized for terminals.
//! Output is plain text, not markup, so no escaping is applied.

use crate::config::RenderConfig;
use crate::render::{FormatHooks, Renderer, render_with_hooks};
use crate::script::EditScript;
use anyhow::Result;
use colored::Colorize;
use tracing::{Level, span};

/// Renderer producing unified-style hunks.
#[derive(Debug, Clone)]
pub struct UnifiedRenderer {
    /// Render options; see [`RenderConfig::unified`] for the usual
    /// preset (three context lines, `@@` headers).
    config: RenderConfig,
    /// Whether to colorize output for terminals.
    colorize: bool,
}

impl Default for UnifiedRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::unified())
    }
}

impl UnifiedRenderer {
    /// Create a renderer with the given config.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            colorize: false,
        }
    }

    /// Enable or disable colorized output.
    #[must_use]
    pub fn colorized(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// The render options in effect.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Emit one output line per unit with the given prefix, colorized
    /// by prefix kind when enabled.
    fn push_lines(&self, out: &mut String, units: &[String], prefix: char) {
        for unit in units {
            let line = format!("{prefix}{unit}");
            if self.colorize {
                let line = match prefix {
                    '-' => line.red().to_string(),
                    '+' => line.green().to_string(),
                    _ => line,
                };
                out.push_str(&line);
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }
    }
}

impl Renderer for UnifiedRenderer {
    fn render(&self, script: &EditScript) -> Result<String> {
        let span = span!(Level::DEBUG, "render_unified", operations = script.len());
        let _guard = span.enter();
        render_with_hooks(script, &self.config, self)
    }
}

impl FormatHooks for UnifiedRenderer {
    fn block_start(&self, header: &str) -> String {
        if header.is_empty() {
            return String::new();
        }
        if self.colorize {
            format!("{}\n", header.cyan())
        } else {
            format!("{header}\n")
        }
    }

    fn copied(&self, units: &[String]) -> Result<String> {
        let mut out = String::new();
        self.push_lines(&mut out, units, ' ');
        Ok(out)
    }

    fn inserted(&self, units: &[String]) -> Result<String> {
        let mut out = String::new();
        self.push_lines(&mut out, units, '+');
        Ok(out)
    }

    fn deleted(&self, units: &[String]) -> Result<String> {
        let mut out = String::new();
        self.push_lines(&mut out, units, '-');
        Ok(out)
    }

    fn changed(&self, orig: &[String], new: &[String]) -> Result<String> {
        // Unified output has no substitution form; show the old lines
        // going out and the new lines coming in.
        let mut out = self.deleted(orig)?;
        out.push_str(&self.inserted(new)?);
        Ok(out)
    }
}
