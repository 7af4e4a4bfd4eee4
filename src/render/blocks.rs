//! Display-block segmentation shared by all renderers.
//!
//! A block groups the operations shown together: the changes plus the
//! configured number of unchanged context units around them. `Copy`
//! runs longer than the combined context windows are split, eliding the
//! middle; shorter runs keep adjacent changes in one block.

use crate::script::{DiffOp, EditScript};

/// One display block: trimmed operations plus the 1-based `(start,
/// length)` ranges they cover on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// First source unit covered by the block, 1-based.
    pub xbeg: usize,
    /// Number of source units covered.
    pub xlen: usize,
    /// First target unit covered by the block, 1-based.
    pub ybeg: usize,
    /// Number of target units covered.
    pub ylen: usize,
    /// The operations to display, context `Copy` runs already trimmed.
    pub ops: Vec<DiffOp>,
}

/// Split a script into display blocks.
///
/// `leading` unchanged units are kept before each change and `trailing`
/// after; a `Copy` run of at most `leading + trailing` units keeps the
/// surrounding changes in the same block, shown in full. A script with
/// no changes produces no blocks.
#[must_use]
pub fn segment(script: &EditScript, leading: usize, trailing: usize) -> Vec<Block> {
    let mut blocks = Vec::new();

    // Next unit position on each side, 1-based.
    let mut xi: usize = 1;
    let mut yi: usize = 1;
    // Start positions of the open block.
    let mut x0: usize = 1;
    let mut y0: usize = 1;
    // Most recent copy run, the source of leading context.
    let mut context: &[String] = &[];
    let mut block: Option<Vec<DiffOp>> = None;

    for op in script {
        match op {
            DiffOp::Copy(units) => {
                let close = match block.as_mut() {
                    Some(ops) if units.len() <= leading + trailing => {
                        ops.push(op.clone());
                        false
                    }
                    Some(ops) => {
                        if trailing > 0 {
                            ops.push(DiffOp::Copy(units[..trailing].to_vec()));
                        }
                        true
                    }
                    None => false,
                };
                if close {
                    if let Some(ops) = block.take() {
                        blocks.push(Block {
                            xbeg: x0,
                            xlen: xi - x0 + trailing,
                            ybeg: y0,
                            ylen: yi - y0 + trailing,
                            ops,
                        });
                    }
                }
                context = units;
            }
            _ => {
                if block.is_none() {
                    let keep = context.len().min(leading);
                    x0 = xi - keep;
                    y0 = yi - keep;
                    let mut ops = Vec::new();
                    if keep > 0 {
                        ops.push(DiffOp::Copy(context[context.len() - keep..].to_vec()));
                    }
                    block = Some(ops);
                }
                if let Some(ops) = block.as_mut() {
                    ops.push(op.clone());
                }
            }
        }
        xi += op.source_units().len();
        yi += op.target_units().len();
    }

    if let Some(ops) = block.take() {
        blocks.push(Block {
            xbeg: x0,
            xlen: xi - x0,
            ybeg: y0,
            ylen: yi - y0,
            ops,
        });
    }

    blocks
}

/// Expand a block-header template. Recognized placeholders: `{xbeg}`,
/// `{xlen}`, `{ybeg}`, `{ylen}`. An empty template expands to nothing.
#[must_use]
pub fn expand_header(template: &str, block: &Block) -> String {
    if template.is_empty() {
        return String::new();
    }
    template
        .replace("{xbeg}", &block.xbeg.to_string())
        .replace("{xlen}", &block.xlen.to_string())
        .replace("{ybeg}", &block.ybeg.to_string())
        .replace("{ylen}", &block.ylen.to_string())
}
