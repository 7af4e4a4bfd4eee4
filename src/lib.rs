#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::arithmetic_side_effects)] // Position counters bounded by input lengths cannot overflow
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # Linediff - Line-Oriented Text Diffing
//!
//! Linediff computes minimal edit scripts between two text sequences and
//! renders them for humans, including recursive word- and
//! character-granularity highlighting of changed regions.
//!
//! ## Features
//!
//! - **Native Myers Engine**: Greedy O((n+m)·D) shortest-edit-script
//!   search; near-identical inputs (the common diff workload) stay cheap
//! - **Typed Edit Scripts**: Copy/insert/delete/change runs with a
//!   validated reconstruction invariant
//! - **Recursive Inline Rendering**: Changed regions are re-diffed at
//!   word, then character granularity to mark exactly what changed
//! - **Unified Rendering**: Hunk-style plain-text output with optional
//!   terminal colors
//! - **Pluggable Boundaries**: Engines and renderers are selected
//!   through closed enums with explicit custom-provider slots
//!
//! ## Architecture
//!
//! The codebase is organized into several key modules:
//!
//! - [`script`]: The edit-script model (operations, reconstruction,
//!   validation)
//! - [`engine`]: Diff engines (native Myers) and engine selection
//! - [`render`]: Renderer pipeline, block segmentation, and the inline
//!   and unified renderers
//! - [`config`]: Engine and renderer option surfaces
//! - [`error`]: Typed failure taxonomy
//!
//! ## Example Usage
//!
//! ```
//! use linediff::{DiffOptions, diff_lines, render_inline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let script = diff_lines("The cat sat", "The dog sat", &DiffOptions::default())?;
//! assert!(!script.is_identical());
//!
//! let html = render_inline("The cat sat", "The dog sat")?;
//! assert_eq!(html, "The <del>cat</del><ins>dog</ins> sat\n");
//! # Ok(())
//! # }
//! ```

/// Engine and renderer option surfaces.
pub mod config;

/// Diff engines and the engine selection boundary.
pub mod engine;

/// Typed failure taxonomy.
pub mod error;

/// Renderer pipeline, block segmentation, and concrete renderers.
pub mod render;

/// Edit-script model (operations, reconstruction, validation).
pub mod script;

pub use config::{DiffOptions, Granularity, RenderConfig};
pub use engine::{DiffEngine, EngineSelection, MyersEngine};
pub use error::DiffError;
pub use render::{InlineRenderer, Renderer, RendererSelection, UnifiedRenderer};
pub use script::{DiffOp, EditScript};

use anyhow::Result;

/// Current version of the linediff crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Split text into line units for the diff engine.
///
/// A trailing newline terminates the last line rather than opening an
/// empty one, and `\r\n` endings are treated like `\n`.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(ToString::to_string).collect()
}

/// Compute the line-level edit script between two texts.
///
/// # Errors
///
/// Returns [`DiffError::TooLarge`] when `options.max_edit_distance` is
/// set and the inputs differ by more than it allows.
pub fn diff_lines(old: &str, new: &str, options: &DiffOptions) -> Result<EditScript, DiffError> {
    engine::myers::diff_slices(&split_lines(old), &split_lines(new), options)
}

/// Diff two texts and render the result inline with default options.
///
/// Shorthand for [`diff_lines`] followed by an [`InlineRenderer`] with
/// the default config; identical inputs render as an empty string.
///
/// # Errors
///
/// Returns an error if a nested sub-diff fails; with default options
/// none of the failure conditions can occur.
pub fn render_inline(old: &str, new: &str) -> Result<String> {
    let script = diff_lines(old, new, &DiffOptions::default())?;
    InlineRenderer::default().render(&script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines(""), Vec::<String>::new());
    }

    #[test]
    fn test_diff_lines_round_trip() {
        let old = "one\ntwo\nthree";
        let new = "one\t\ntwo\nfour";
        let script = diff_lines(old, new, &DiffOptions::default()).unwrap();
        assert_eq!(script.reconstruct_source(), split_lines(old));
        assert_eq!(script.reconstruct_target(), split_lines(new));
    }

    #[test]
    fn test_render_inline_shortcut() {
        let out = render_inline("a\nb", "a\nc").unwrap();
        assert_eq!(out, "a\n<del>b</del><ins>c</ins>\n");
    }
}
