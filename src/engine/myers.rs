//! Greedy Myers shortest-edit-script computation.
//!
//! Forward O((n+m)·D) search with a recorded trace and backtracking,
//! where D is the edit distance — near-identical inputs, the common
//! diff workload, stay cheap. Equal prefixes and suffixes are trimmed
//! before the search so they never enter the trace.

use crate::config::DiffOptions;
use crate::error::DiffError;
use crate::script::{DiffOp, EditScript};
use tracing::{Level, debug, span};

/// One primitive move of the edit path, in source/target order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Consume one unit from both sequences.
    Equal,
    /// Consume one unit from the source only.
    Delete,
    /// Consume one unit from the target only.
    Insert,
}

/// Compute the edit script between two unit slices.
///
/// Deterministic: identical inputs always produce an identical script.
/// When several longest common subsequences exist, deletions are taken
/// before insertions at every choice point, which aligns matches at the
/// earliest possible source positions and yields the conventional
/// "leftmost" diff.
///
/// # Errors
///
/// Returns [`DiffError::TooLarge`] when `options.max_edit_distance` is
/// set and the edit distance exceeds it.
pub fn diff_slices<T: PartialEq + Clone>(
    from: &[T],
    to: &[T],
    options: &DiffOptions,
) -> Result<EditScript<T>, DiffError> {
    let span = span!(
        Level::DEBUG,
        "diff",
        from_len = from.len(),
        to_len = to.len()
    );
    let _guard = span.enter();

    let prefix_len = common_prefix_len(from, to);
    let suffix_len = common_suffix_len(&from[prefix_len..], &to[prefix_len..]);
    let from_mid = &from[prefix_len..from.len() - suffix_len];
    let to_mid = &to[prefix_len..to.len() - suffix_len];

    let steps = shortest_edit(from_mid, to_mid, options.max_edit_distance)?;
    debug!(
        distance = steps.iter().filter(|s| **s != Step::Equal).count(),
        operations = steps.len(),
        "diff complete"
    );

    Ok(assemble(
        from,
        to,
        prefix_len,
        suffix_len,
        &steps,
        options.merge_changes,
    ))
}

/// Length of the longest equal prefix of both slices.
fn common_prefix_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Length of the longest equal suffix of both slices.
fn common_suffix_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Forward Myers search plus backtrack, returning the edit path as
/// primitive steps in source/target order.
fn shortest_edit<T: PartialEq>(
    a: &[T],
    b: &[T],
    ceiling: Option<usize>,
) -> Result<Vec<Step>, DiffError> {
    let n = a.len();
    let m = b.len();
    let max = n + m;
    if max == 0 {
        return Ok(Vec::new());
    }

    // v[k + offset] holds the furthest x reached on diagonal k = x - y.
    let offset = max as isize;
    let mut v = vec![0usize; 2 * max + 1];
    // trace[d] is the v state before depth d was processed; the
    // backtrack reads depth d's predecessor positions from it.
    let mut trace: Vec<Vec<usize>> = Vec::new();

    let mut found_d = None;
    'outer: for d in 0..=offset {
        if let Some(limit) = ceiling {
            let distance = d as usize;
            if distance > limit {
                return Err(DiffError::TooLarge { distance, limit });
            }
        }
        trace.push(v.clone());

        let mut k = -d;
        while k <= d {
            let idx = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n && y >= m {
                found_d = Some(d);
                break 'outer;
            }
            k += 2;
        }
    }

    // An edit path of length n + m (delete everything, insert
    // everything) always exists, so the search cannot fall through.
    if found_d.is_none() {
        unreachable!("an edit path always exists within n + m steps");
    }

    let mut steps: Vec<Step> = Vec::with_capacity(max);
    let mut x = n as isize;
    let mut y = m as isize;
    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;
        let idx = (k + offset) as usize;
        let prev_k = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[(prev_k + offset) as usize] as isize;
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            steps.push(Step::Equal);
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if x == prev_x {
                steps.push(Step::Insert);
            } else {
                steps.push(Step::Delete);
            }
        }
        x = prev_x;
        y = prev_y;
    }
    steps.reverse();
    Ok(steps)
}

/// Accumulates primitive steps into maximal operation runs.
struct Assembler<T> {
    /// Finished operations, in order.
    ops: Vec<DiffOp<T>>,
    /// Pending copied run.
    copied: Vec<T>,
    /// Pending deleted run of the current changed region.
    deleted: Vec<T>,
    /// Pending inserted run of the current changed region.
    inserted: Vec<T>,
    /// Whether paired delete+insert runs become one `Change`.
    merge: bool,
}

impl<T> Assembler<T> {
    fn new(merge: bool) -> Self {
        Self {
            ops: Vec::new(),
            copied: Vec::new(),
            deleted: Vec::new(),
            inserted: Vec::new(),
            merge,
        }
    }

    /// End the pending copied run, if any.
    fn flush_copied(&mut self) {
        if !self.copied.is_empty() {
            self.ops.push(DiffOp::Copy(std::mem::take(&mut self.copied)));
        }
    }

    /// End the pending changed region, if any. Deletions precede
    /// insertions so source-side runs stay in source order.
    fn flush_changed(&mut self) {
        if self.merge && !self.deleted.is_empty() && !self.inserted.is_empty() {
            self.ops.push(DiffOp::Change {
                orig: std::mem::take(&mut self.deleted),
                new: std::mem::take(&mut self.inserted),
            });
            return;
        }
        if !self.deleted.is_empty() {
            self.ops
                .push(DiffOp::Delete(std::mem::take(&mut self.deleted)));
        }
        if !self.inserted.is_empty() {
            self.ops
                .push(DiffOp::Insert(std::mem::take(&mut self.inserted)));
        }
    }

    fn finish(mut self) -> EditScript<T> {
        self.flush_changed();
        self.flush_copied();
        EditScript::new(self.ops)
    }
}

/// Turn the step sequence (over the trimmed middle) plus the trimmed
/// prefix/suffix back into maximal operation runs over the full inputs.
fn assemble<T: PartialEq + Clone>(
    from: &[T],
    to: &[T],
    prefix_len: usize,
    suffix_len: usize,
    steps: &[Step],
    merge: bool,
) -> EditScript<T> {
    let mut asm = Assembler::new(merge);
    asm.copied.extend(from[..prefix_len].iter().cloned());

    let mut x = prefix_len;
    let mut y = prefix_len;
    for step in steps {
        match step {
            Step::Equal => {
                asm.flush_changed();
                asm.copied.push(from[x].clone());
                x += 1;
                y += 1;
            }
            Step::Delete => {
                asm.flush_copied();
                asm.deleted.push(from[x].clone());
                x += 1;
            }
            Step::Insert => {
                asm.flush_copied();
                asm.inserted.push(to[y].clone());
                y += 1;
            }
        }
    }

    if suffix_len > 0 {
        asm.flush_changed();
        asm.copied
            .extend(from[from.len() - suffix_len..].iter().cloned());
    }
    asm.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn diff(from: &[&str], to: &[&str]) -> EditScript {
        diff_slices(&lines(from), &lines(to), &DiffOptions::default()).unwrap()
    }

    #[test]
    fn test_identical_inputs_single_copy() {
        let script = diff(&["a", "b", "c"], &["a", "b", "c"]);
        assert_eq!(script.ops(), &[DiffOp::Copy(lines(&["a", "b", "c"]))]);
        assert!(script.is_identical());
    }

    #[test]
    fn test_empty_inputs_empty_script() {
        let script = diff(&[], &[]);
        assert!(script.is_empty());
    }

    #[test]
    fn test_insert_into_empty() {
        let script = diff(&[], &["a"]);
        assert_eq!(script.ops(), &[DiffOp::Insert(lines(&["a"]))]);
    }

    #[test]
    fn test_delete_to_empty() {
        let script = diff(&["a", "b"], &[]);
        assert_eq!(script.ops(), &[DiffOp::Delete(lines(&["a", "b"]))]);
    }

    #[test]
    fn test_change_in_middle() {
        let script = diff(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            script.ops(),
            &[
                DiffOp::Copy(lines(&["a"])),
                DiffOp::Change {
                    orig: lines(&["b"]),
                    new: lines(&["x"]),
                },
                DiffOp::Copy(lines(&["c"])),
            ]
        );
    }

    #[test]
    fn test_disjoint_single_change() {
        let script = diff(&["a", "b"], &["c", "d"]);
        assert_eq!(
            script.ops(),
            &[DiffOp::Change {
                orig: lines(&["a", "b"]),
                new: lines(&["c", "d"]),
            }]
        );
    }

    #[test]
    fn test_disjoint_without_merging() {
        let options = DiffOptions {
            merge_changes: false,
            ..DiffOptions::default()
        };
        let script = diff_slices(&lines(&["a", "b"]), &lines(&["c", "d"]), &options).unwrap();
        assert_eq!(
            script.ops(),
            &[
                DiffOp::Delete(lines(&["a", "b"])),
                DiffOp::Insert(lines(&["c", "d"])),
            ]
        );
    }

    #[test]
    fn test_tie_break_is_leftmost_and_stable() {
        // Several alignments of the shared units exist; the engine must
        // pick the one matching the earliest source positions, every
        // time.
        let from = lines(&["x", "a", "x", "b"]);
        let to = lines(&["a", "x", "b", "x"]);
        let first = diff_slices(&from, &to, &DiffOptions::default()).unwrap();
        assert_eq!(
            first.ops(),
            &[
                DiffOp::Delete(lines(&["x"])),
                DiffOp::Copy(lines(&["a", "x", "b"])),
                DiffOp::Insert(lines(&["x"])),
            ]
        );
        for _ in 0..10 {
            let again = diff_slices(&from, &to, &DiffOptions::default()).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_round_trip_mixed_edits() {
        let from = lines(&["one", "two", "three", "four", "five"]);
        let to = lines(&["zero", "one", "two", "3", "five", "six"]);
        let script = diff_slices(&from, &to, &DiffOptions::default()).unwrap();
        assert_eq!(script.reconstruct_source(), from);
        assert_eq!(script.reconstruct_target(), to);
        script.validate(&from, &to).unwrap();
    }

    #[test]
    fn test_ceiling_exceeded() {
        let options = DiffOptions {
            max_edit_distance: Some(1),
            ..DiffOptions::default()
        };
        let err = diff_slices(&lines(&["a"]), &lines(&["b"]), &options).unwrap_err();
        assert_eq!(
            err,
            DiffError::TooLarge {
                distance: 2,
                limit: 1,
            }
        );
    }

    #[test]
    fn test_ceiling_not_hit_for_close_inputs() {
        let options = DiffOptions {
            max_edit_distance: Some(2),
            ..DiffOptions::default()
        };
        let from = lines(&["a", "b", "c", "d"]);
        let to = lines(&["a", "b", "x", "d"]);
        let script = diff_slices(&from, &to, &options).unwrap();
        assert_eq!(script.reconstruct_target(), to);
    }

    #[test]
    fn test_works_on_char_units() {
        let from: Vec<char> = "cat".chars().collect();
        let to: Vec<char> = "cart".chars().collect();
        let script = diff_slices(&from, &to, &DiffOptions::default()).unwrap();
        assert_eq!(
            script.ops(),
            &[
                DiffOp::Copy(vec!['c', 'a']),
                DiffOp::Insert(vec!['r']),
                DiffOp::Copy(vec!['t']),
            ]
        );
    }
}
