//! Layer tree flattening.
//!
//! Groups are transparent in the output: flattening yields only leaves, in
//! depth-first pre-order, with every group replaced by its own flattened
//! children.

use log::debug;

use crate::error::{Error, Result};
use crate::layer::LayerNode;

/// Default limit on group nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A leaf node together with its position in the flattened sequence.
#[derive(Debug)]
pub struct FlatLeaf<'a, N> {
    /// Zero-based position among all leaves of the document.
    pub index: usize,
    /// Number of enclosing groups.
    pub depth: usize,
    pub node: &'a N,
}

/// Flatten a list of top-level nodes into their leaves.
///
/// Fails if there are no top-level nodes at all, or if groups nest deeper
/// than `max_depth`. Both are structural failures of the document; an empty
/// group is not.
pub fn flatten<N: LayerNode>(roots: &[N], max_depth: usize) -> Result<Vec<FlatLeaf<'_, N>>> {
    if roots.is_empty() {
        return Err(Error::Structural("document has no layers".to_string()));
    }

    let mut leaves = Vec::new();
    flatten_into(roots, 0, max_depth, &mut leaves)?;
    debug!("flattened {} top-level nodes into {} leaves", roots.len(), leaves.len());
    Ok(leaves)
}

fn flatten_into<'a, N: LayerNode>(
    nodes: &'a [N],
    depth: usize,
    max_depth: usize,
    out: &mut Vec<FlatLeaf<'a, N>>,
) -> Result<()> {
    for node in nodes {
        if node.is_group() {
            if depth >= max_depth {
                return Err(Error::Structural(format!(
                    "group '{}' nests deeper than {} levels",
                    node.name(),
                    max_depth
                )));
            }
            flatten_into(node.children(), depth + 1, max_depth, out)?;
        } else {
            out.push(FlatLeaf {
                index: out.len(),
                depth,
                node,
            });
        }
    }
    Ok(())
}
