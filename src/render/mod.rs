//! Renderer pipeline: the shared block-walking machinery, the renderer
//! contract, and the selection boundary for plugging in alternatives.
//!
//! A renderer turns an edit script plus a [`RenderConfig`] into a
//! formatted string. The pipeline handles context trimming and block
//! segmentation; per-kind formatting is delegated to [`FormatHooks`],
//! so a new output style is a hooks implementation, not a subclass.

/// Display-block segmentation and header expansion.
pub mod blocks;
/// Wiki-style inline renderer with recursive word/character re-diffing.
pub mod inline;
/// Unified-style renderer with hunk headers.
pub mod unified;

pub use inline::InlineRenderer;
pub use unified::UnifiedRenderer;

use crate::config::RenderConfig;
use crate::script::{DiffOp, EditScript};
use anyhow::Result;
use tracing::{Level, span};

/// Capability interface every renderer satisfies.
///
/// Rendering never fails for a script produced by this crate's engines.
/// Renderers do not re-validate the reconstruction invariant; a script
/// constructed outside an engine should go through
/// [`EditScript::validate`] first, since rendering a malformed script
/// produces unspecified output.
pub trait Renderer: Send + Sync {
    /// Render the script as a single formatted string.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested sub-diff fails (inline renderer
    /// with an edit-distance ceiling configured).
    fn render(&self, script: &EditScript) -> Result<String>;
}

/// Per-kind formatting hooks the pipeline delegates to.
///
/// Hooks receive raw unit runs; each hook is responsible for escaping
/// any text it places into a markup context, exactly once.
pub trait FormatHooks {
    /// Format the opening of a display block. `header` is the expanded
    /// block-header template, possibly empty.
    fn block_start(&self, header: &str) -> String {
        if header.is_empty() {
            String::new()
        } else {
            format!("{header}\n")
        }
    }

    /// Format a run of unchanged units.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the pipeline propagates the failure.
    fn copied(&self, units: &[String]) -> Result<String>;

    /// Format a run of inserted units.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the pipeline propagates the failure.
    fn inserted(&self, units: &[String]) -> Result<String>;

    /// Format a run of deleted units.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the pipeline propagates the failure.
    fn deleted(&self, units: &[String]) -> Result<String>;

    /// Format a changed region (paired deleted and inserted runs).
    ///
    /// # Errors
    ///
    /// Implementations may fail; the pipeline propagates the failure.
    fn changed(&self, orig: &[String], new: &[String]) -> Result<String>;
}

/// Drive the pipeline: segment the script into blocks per the config's
/// context windows, then delegate each operation to the hooks.
///
/// # Errors
///
/// Propagates the first hook failure unchanged.
pub fn render_with_hooks<H: FormatHooks>(
    script: &EditScript,
    config: &RenderConfig,
    hooks: &H,
) -> Result<String> {
    let span = span!(
        Level::DEBUG,
        "render",
        granularity = ?config.split_granularity,
        operations = script.len()
    );
    let _guard = span.enter();

    let blocks = blocks::segment(
        script,
        config.leading_context_lines,
        config.trailing_context_lines,
    );

    let mut output = String::new();
    for block in &blocks {
        let header = blocks::expand_header(&config.block_header_template, block);
        output.push_str(&hooks.block_start(&header));
        for op in &block.ops {
            match op {
                DiffOp::Copy(units) => output.push_str(&hooks.copied(units)?),
                DiffOp::Insert(units) => output.push_str(&hooks.inserted(units)?),
                DiffOp::Delete(units) => output.push_str(&hooks.deleted(units)?),
                DiffOp::Change { orig, new } => output.push_str(&hooks.changed(orig, new)?),
            }
        }
    }
    Ok(output)
}

/// Escape a literal text fragment for HTML markup.
///
/// Applied immediately before prefix/suffix markers are attached, and
/// exactly once per fragment: nested inline sub-renders escape their
/// own tokens and the outer level splices the result verbatim.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Which renderer a caller wants.
pub enum RendererSelection {
    /// The recursive inline renderer.
    Inline(RenderConfig),
    /// The unified-style renderer, uncolorized.
    Unified(RenderConfig),
    /// A caller-provided renderer.
    Custom(Box<dyn Renderer>),
}

impl std::fmt::Debug for RendererSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline(config) => f.debug_tuple("Inline").field(config).finish(),
            Self::Unified(config) => f.debug_tuple("Unified").field(config).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish(),
        }
    }
}

/// Materialize a renderer from a selection.
#[must_use]
pub fn create(selection: RendererSelection) -> Box<dyn Renderer> {
    match selection {
        RendererSelection::Inline(config) => Box::new(InlineRenderer::new(config)),
        RendererSelection::Unified(config) => Box::new(UnifiedRenderer::new(config)),
        RendererSelection::Custom(renderer) => renderer,
    }
}
