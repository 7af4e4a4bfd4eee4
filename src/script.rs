//! Edit-script model: the typed operation list a diff engine produces.
//!
//! An [`EditScript`] describes how to transform a source sequence into a
//! target sequence as an ordered list of [`DiffOp`] runs. Concatenating
//! the source-side runs reproduces the source exactly; concatenating the
//! target-side runs reproduces the target. Scripts are immutable once
//! built and may be consumed by any number of renderers.

use crate::error::DiffError;
use serde::{Deserialize, Serialize};

/// One maximal run of an edit script.
///
/// Units are opaque comparable values: text lines at the top level, word
/// tokens or single characters inside the recursive inline renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOp<T = String> {
    /// A run of units common to both sequences, appearing unchanged.
    Copy(Vec<T>),
    /// A run of units present only in the target.
    Insert(Vec<T>),
    /// A run of units present only in the source.
    Delete(Vec<T>),
    /// Paired adjacent delete+insert runs a renderer may present as one
    /// substitution. Both runs are non-empty.
    Change {
        /// Units removed from the source.
        orig: Vec<T>,
        /// Units inserted in the target.
        new: Vec<T>,
    },
}

impl<T> DiffOp<T> {
    /// Units this operation contributes to the source sequence.
    #[must_use]
    pub fn source_units(&self) -> &[T] {
        match self {
            Self::Copy(units) | Self::Delete(units) => units,
            Self::Change { orig, .. } => orig,
            Self::Insert(_) => &[],
        }
    }

    /// Units this operation contributes to the target sequence.
    #[must_use]
    pub fn target_units(&self) -> &[T] {
        match self {
            Self::Copy(units) | Self::Insert(units) => units,
            Self::Change { new, .. } => new,
            Self::Delete(_) => &[],
        }
    }

    /// Whether this operation leaves the sequence unchanged.
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        matches!(self, Self::Copy(_))
    }
}

/// An ordered edit script for a source/target sequence pair.
///
/// Produced once per engine invocation and immutable thereafter. The
/// list is empty iff both input sequences were empty, and no two
/// adjacent operations are both [`DiffOp::Copy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EditScript<T = String> {
    ops: Vec<DiffOp<T>>,
}

impl<T> EditScript<T> {
    /// Wrap an operation list without validating it.
    ///
    /// Scripts built by the engines in this crate always satisfy the
    /// reconstruction invariant. For a script obtained from anywhere
    /// else, run [`EditScript::validate`] before rendering it.
    #[must_use]
    pub fn new(ops: Vec<DiffOp<T>>) -> Self {
        Self { ops }
    }

    /// The operations in order.
    #[must_use]
    pub fn ops(&self) -> &[DiffOp<T>] {
        &self.ops
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the script is empty (both inputs were empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, DiffOp<T>> {
        self.ops.iter()
    }

    /// Whether the script contains no insertions, deletions or changes.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.ops.iter().all(DiffOp::is_copy)
    }
}

impl<T: Clone + PartialEq> EditScript<T> {
    /// Rebuild the source sequence from the source-side runs.
    #[must_use]
    pub fn reconstruct_source(&self) -> Vec<T> {
        self.ops
            .iter()
            .flat_map(|op| op.source_units().iter().cloned())
            .collect()
    }

    /// Rebuild the target sequence from the target-side runs.
    #[must_use]
    pub fn reconstruct_target(&self) -> Vec<T> {
        self.ops
            .iter()
            .flat_map(|op| op.target_units().iter().cloned())
            .collect()
    }

    /// Eagerly check the reconstruction invariant against the inputs the
    /// script claims to describe.
    ///
    /// Renderers in this crate assume well-formed scripts and do not
    /// re-validate; call this on any script that did not come from one
    /// of this crate's engines.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::MalformedScript`] if either side fails to
    /// reproduce its input, a run is empty, a `Change` has an empty
    /// side, or two `Copy` operations are adjacent.
    pub fn validate(&self, from: &[T], to: &[T]) -> Result<(), DiffError> {
        for (i, op) in self.ops.iter().enumerate() {
            let empty = match op {
                DiffOp::Copy(units) | DiffOp::Insert(units) | DiffOp::Delete(units) => {
                    units.is_empty()
                }
                DiffOp::Change { orig, new } => orig.is_empty() || new.is_empty(),
            };
            if empty {
                return Err(DiffError::MalformedScript(format!(
                    "operation {i} has an empty unit run"
                )));
            }
            if i > 0 && op.is_copy() && self.ops[i - 1].is_copy() {
                return Err(DiffError::MalformedScript(format!(
                    "adjacent copy operations at {} and {i}",
                    i - 1
                )));
            }
        }

        let source = self.reconstruct_source();
        if source.as_slice() != from {
            return Err(DiffError::MalformedScript(format!(
                "source side reconstructs {} units, input has {}",
                source.len(),
                from.len()
            )));
        }
        let target = self.reconstruct_target();
        if target.as_slice() != to {
            return Err(DiffError::MalformedScript(format!(
                "target side reconstructs {} units, input has {}",
                target.len(),
                to.len()
            )));
        }
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a EditScript<T> {
    type Item = &'a DiffOp<T>;
    type IntoIter = std::slice::Iter<'a, DiffOp<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
