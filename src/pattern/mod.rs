//! Pattern string codec for [Shape]s.
//!
//! A pattern string is the serialized form of a [Shape] and the crate's
//! persisted/interchange format. There is one grammar per traversal order;
//! both describe the same shapes and [convert] translates between them.
//!
//! # Depth-first grammar
//! Charset: digits `0-9`, `[`, `]`. No separators between sibling tokens.
//! * `pattern ::= token*`
//! * `token ::= integer | '[' pattern ']'`
//! * An integer is a run of that many consecutive leaves.
//! * A bracketed pattern is one child that is itself a sub-list.
//! * The brackets of the top-level sequence are omitted.
//!
//! Example: `"4[2]4"` is four leaves, a sub-list of two leaves, four leaves.
//!
//! # Breadth-first grammar
//! Charset: digits `0-9`, `*`, `|`.
//! * The text before the first `|` describes the top-level sequence, with
//!   integers for leaf runs and one `*` for each sub-list child.
//! * Each later `|`-delimited segment describes the children of the *oldest
//!   not-yet-specified* `*`: strict FIFO across the whole pattern,
//!   including `*`s emitted inside the segment currently being written.
//!
//! Example: `"4*4|2"` is the same shape as `"4[2]4"`.
//!
//! # Quick API
//! * [encode] / [decode] - between [Shape] and pattern string
//! * [convert] - re-encode a pattern under the other order
//! * [detect_order] - classify a pattern string by its charset

pub(crate) mod cursor;
mod parser;
mod writer;
pub use self::parser::decode;
pub use self::writer::encode;

use crate::error::FlatnestError;
use crate::model::Shape;
use crate::Order;

// ============================================================================
// PATTERN CONVERSION (pub)
// ============================================================================
/// Converts a pattern string from one traversal order's grammar to the
/// other's, round-tripping through the [Shape] it describes.
///
/// Converting a pattern to its own order re-encodes it canonically; in
/// particular, `"0"` tokens disappear.
///
/// # Example
/// ```
/// use flatnest::{convert_pattern, Order};
///
/// let bfs = convert_pattern("1[2[1]3]3[2]", Order::DepthFirst, Order::BreadthFirst).unwrap();
/// assert_eq!(bfs, "1*3*|2*3|2|1");
/// let dfs = convert_pattern(&bfs, Order::BreadthFirst, Order::DepthFirst).unwrap();
/// assert_eq!(dfs, "1[2[1]3]3[2]");
/// ```
pub fn convert(pattern: &str, from: Order, to: Order) -> Result<String, FlatnestError> {
    let shape = decode(pattern, from)?;
    Ok(encode(&shape, to))
}

/// Classifies a pattern string by the traversal order of its charset.
///
/// # Returns
/// * `Some(Order::DepthFirst)` - Contains `[`/`]` but no `*`/`|`, or only
///   digits (a flat sequence, on which both grammars agree)
/// * `Some(Order::BreadthFirst)` - Contains `*`/`|` but no `[`/`]`
/// * `None` - Mixes tokens of both grammars
///
/// This only inspects the charset; the pattern may still fail to [decode].
///
/// # Example
/// ```
/// use flatnest::{pattern, Order};
///
/// assert_eq!(pattern::detect_order("4[2]4"), Some(Order::DepthFirst));
/// assert_eq!(pattern::detect_order("4*4|2"), Some(Order::BreadthFirst));
/// assert_eq!(pattern::detect_order("10"), Some(Order::DepthFirst));
/// assert_eq!(pattern::detect_order("4[2*]"), None);
/// ```
pub fn detect_order(pattern: &str) -> Option<Order> {
    let has_dfs_tokens = pattern.contains(['[', ']']);
    let has_bfs_tokens = pattern.contains(['*', '|']);
    match (has_dfs_tokens, has_bfs_tokens) {
        (_, false) => Some(Order::DepthFirst),
        (false, true) => Some(Order::BreadthFirst),
        (true, true) => None,
    }
}

/// Returns the total leaf count a pattern implies, without keeping the shape.
pub fn leaf_count(pattern: &str, order: Order) -> Result<usize, FlatnestError> {
    Ok(decode(pattern, order)?.num_leaves())
}
