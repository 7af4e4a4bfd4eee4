//! Diff engines: the native Myers implementation and the selection
//! boundary for plugging in alternatives.
//!
//! Engine selection is a closed enum plus an explicit custom-provider
//! slot — a caller that obtains edit scripts some other way (an
//! external process, a parsed diff blob) supplies its own
//! [`DiffEngine`] value instead of a name.

/// Greedy Myers shortest-edit-script computation.
pub mod myers;

pub use myers::diff_slices;

use crate::config::DiffOptions;
use crate::error::DiffError;
use crate::script::EditScript;
use std::fmt;

/// Capability interface every diff engine satisfies.
///
/// `diff` must succeed for any pair of sequences, including empty ones,
/// and be deterministic: identical inputs always produce an identical
/// script. The recursive inline renderer re-invokes the engine with
/// arbitrary token sequences, so implementations must not assume units
/// are text lines.
pub trait DiffEngine: Send + Sync {
    /// Compute the edit script transforming `from` into `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::TooLarge`] when an engine enforces an input
    /// ceiling and the inputs exceed it.
    fn diff(&self, from: &[String], to: &[String]) -> Result<EditScript, DiffError>;
}

/// The native engine: greedy Myers over in-memory slices.
#[derive(Debug, Clone, Default)]
pub struct MyersEngine {
    /// Engine options applied to every invocation.
    options: DiffOptions,
}

impl MyersEngine {
    /// Create an engine with the given options.
    #[must_use]
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// The options this engine applies.
    #[must_use]
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }
}

impl DiffEngine for MyersEngine {
    fn diff(&self, from: &[String], to: &[String]) -> Result<EditScript, DiffError> {
        myers::diff_slices(from, to, &self.options)
    }
}

/// Which engine a caller wants.
pub enum EngineSelection {
    /// The native Myers engine with the given options.
    Myers(DiffOptions),
    /// A caller-provided engine.
    Custom(Box<dyn DiffEngine>),
}

impl fmt::Debug for EngineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Myers(options) => f.debug_tuple("Myers").field(options).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish(),
        }
    }
}

/// Materialize an engine from a selection.
#[must_use]
pub fn create(selection: EngineSelection) -> Box<dyn DiffEngine> {
    match selection {
        EngineSelection::Myers(options) => Box::new(MyersEngine::new(options)),
        EngineSelection::Custom(engine) => engine,
    }
}
