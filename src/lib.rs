//! Flatnest converts between nested sequence structures and
//! {pattern string, flat list} pairs.
//!
//! A nested structure is an arbitrarily deep tree of ordered lists with
//! opaque leaf values. Flatnest separates such a structure into two parts
//! that together reconstruct it exactly:
//! - a **flat sequence** of the leaf values in traversal order, and
//! - a **pattern string** compactly describing the tree's shape.
//!
//! Two traversal orders are supported, each with its own pattern grammar:
//! - **Depth-first** (pre-order): the flat sequence keeps the literal
//!   left-to-right document order; patterns use digits and `[`/`]`.
//! - **Breadth-first**: shallower leaves precede deeper ones, with pending
//!   sub-lists resolved in strict FIFO order; patterns use digits, `*`, and
//!   `|`.
//!
//! Core functionality provided:
//! - [flatten()] / [unflatten]: structure <-> {pattern, flat list}, either order
//! - [convert_pattern]: translate a pattern between the two grammars
//! - [flat_index_to_nested_index] / [nested_index_to_flat_index]: address a
//!   single leaf by flat position or by nested index path
//! - [convert_flat_index]: the flat position of one leaf under the other order
//! - [traverse()] / [Shape::leaf_paths]: lazy `(path, value)` iteration with
//!   O(depth) state, no up-front flattening
//!
//! All depth-recursive algorithms run on explicit heap stacks and queues, so
//! adversarially deep input cannot overflow the native call stack.
//!
//! # Usage patterns
//! 1. Quick access through the crate-level functions below, which accept and
//!    return pattern strings.
//! 2. For repeated operations against one pattern, [pattern::decode] it once
//!    into a [Shape] and use [Shape::flat_to_nested],
//!    [Shape::nested_to_flat], [Shape::leaf_paths], and
//!    [flatten::unflatten_shape] directly.
//!
//! # Example
//! ```
//! use flatnest::{flatten, nested, unflatten, Order};
//!
//! let structure = nested!([1, [2, 3, [4, 5, [6, 7], 8, 9], 10, 11], 12]);
//!
//! let dfs = flatten(structure.clone(), Order::DepthFirst).unwrap();
//! assert_eq!(dfs.pattern, "1[2[2[2]2]2]1");
//! assert_eq!(dfs.values, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
//!
//! let bfs = flatten(structure.clone(), Order::BreadthFirst).unwrap();
//! assert_eq!(bfs.pattern, "1*1|2*2|2*2|2");
//! assert_eq!(bfs.values, vec![1, 12, 2, 3, 10, 11, 4, 5, 8, 9, 6, 7]);
//!
//! let rebuilt = unflatten(&bfs.pattern, bfs.values, Order::BreadthFirst).unwrap();
//! assert_eq!(rebuilt, structure);
//! ```

pub mod error;
pub mod flatten;
pub mod index;
pub mod model;
pub mod pattern;
pub mod traverse;

pub use crate::error::FlatnestError;
pub use crate::flatten::{Flattened, flatten, unflatten};
pub use crate::index::convert_flat_index;
pub use crate::model::{Nested, Shape};
pub use crate::pattern::convert as convert_pattern;
pub use crate::traverse::{LeafPaths, Traversal, traverse};

// =#========================================================================#=
// ORDER
// =#========================================================================#=
/// Traversal order of a flattening, pattern, or index mapping.
///
/// The two orders share the shape model and the error taxonomy but define
/// different flat enumerations of the same leaves and different pattern
/// grammars. Every operation in this crate takes the order as an explicit
/// argument; there is no dynamic dispatch over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Pre-order traversal; the flat sequence keeps the original
    /// left-to-right nested-list order.
    DepthFirst,
    /// Breadth-first sweep; shallower leaves precede deeper leaves, and
    /// pending sub-lists resolve in strict FIFO order.
    BreadthFirst,
}

// ============================================================================
// Quick index mapping API
// ============================================================================
/// Converts a flat leaf index into its nested index path, for a structure
/// described by a pattern string.
///
/// Decodes `pattern` and delegates to [Shape::flat_to_nested]; decode the
/// pattern once yourself when mapping many indices.
///
/// # Example
/// ```
/// use flatnest::{flat_index_to_nested_index, Order};
///
/// let path = flat_index_to_nested_index("1[2[2[2]2]2]1", Order::DepthFirst, 3).unwrap();
/// assert_eq!(path, vec![1, 2, 0]);
/// ```
pub fn flat_index_to_nested_index(
    pattern: &str,
    order: Order,
    flat_index: usize,
) -> Result<Vec<usize>, FlatnestError> {
    pattern::decode(pattern, order)?.flat_to_nested(order, flat_index)
}

/// Converts a nested index path into its flat leaf index, for a structure
/// described by a pattern string.
///
/// Decodes `pattern` and delegates to [Shape::nested_to_flat]; decode the
/// pattern once yourself when mapping many paths.
///
/// # Example
/// ```
/// use flatnest::{nested_index_to_flat_index, Order};
///
/// let flat = nested_index_to_flat_index("1[2[2[2]2]2]1", Order::DepthFirst, &[1, 2, 0]).unwrap();
/// assert_eq!(flat, 3);
/// ```
pub fn nested_index_to_flat_index(
    pattern: &str,
    order: Order,
    nested_index: &[usize],
) -> Result<usize, FlatnestError> {
    pattern::decode(pattern, order)?.nested_to_flat(order, nested_index)
}
