//! Pattern decoding: pattern string -> [Shape].
//!
//! Both grammars are decoded with heap-allocated state (a bracket stack for
//! depth-first patterns, a FIFO slot queue for breadth-first patterns), so an
//! adversarially deep pattern cannot overflow the native call stack.

use crate::error::FlatnestError;
use crate::model::{Shape, ShapeIndex};
use crate::pattern::cursor::PatternCursor;
use crate::Order;
use std::collections::VecDeque;

/// Decodes a pattern string into a [Shape] under the given traversal order.
///
/// See [crate::pattern] for the two grammars. Fails with
/// [PatternSyntax](FlatnestError::PatternSyntax) on malformed input,
/// including tokens that belong to the other order's grammar.
pub fn decode(pattern: &str, order: Order) -> Result<Shape, FlatnestError> {
    let mut cursor = PatternCursor::new(pattern);
    match order {
        Order::DepthFirst => decode_dfs(&mut cursor),
        Order::BreadthFirst => decode_bfs(&mut cursor),
    }
}

/// Depth-first decoding: a bracket stack of currently open nodes.
///
/// `[` opens a new child of the node on top of the stack, `]` closes it, and
/// an integer adds a run of leaves to the open node.
fn decode_dfs(cursor: &mut PatternCursor<'_>) -> Result<Shape, FlatnestError> {
    let mut shape = Shape::new();
    let mut open: Vec<ShapeIndex> = vec![shape.root()];

    while let Some(byte) = cursor.peek() {
        match byte {
            b'[' => {
                cursor.next();
                let current = *open.last().unwrap_or(&shape.root());
                let child = shape.add_child_node(current);
                open.push(child);
            }
            b']' => {
                if open.len() == 1 {
                    return Err(FlatnestError::syntax(cursor, "unmatched ']'"));
                }
                cursor.next();
                open.pop();
            }
            b'0'..=b'9' => {
                let count = cursor.parse_integer()?;
                let current = *open.last().unwrap_or(&shape.root());
                shape.add_leaves(current, count);
            }
            b'*' | b'|' => {
                return Err(FlatnestError::syntax(
                    cursor,
                    format!("breadth-first token '{}' in depth-first pattern", byte as char),
                ));
            }
            other => {
                return Err(FlatnestError::syntax(
                    cursor,
                    format!("unexpected character '{}'", other as char),
                ));
            }
        }
    }

    if open.len() > 1 {
        return Err(FlatnestError::syntax(cursor, "unmatched '['"));
    }
    Ok(shape)
}

/// Breadth-first decoding: a FIFO queue of unresolved `*` slots.
///
/// Integers add leaf runs to the node currently being specified, `*` declares
/// a pending sub-list (enqueued in emission order), and `|` moves on to the
/// children of the *oldest* pending slot. Resolution is strict FIFO across
/// the whole pattern, never per-level.
fn decode_bfs(cursor: &mut PatternCursor<'_>) -> Result<Shape, FlatnestError> {
    let mut shape = Shape::new();
    let mut pending: VecDeque<ShapeIndex> = VecDeque::new();
    let mut current = shape.root();

    while let Some(byte) = cursor.peek() {
        match byte {
            b'0'..=b'9' => {
                let count = cursor.parse_integer()?;
                shape.add_leaves(current, count);
            }
            b'*' => {
                cursor.next();
                let child = shape.add_child_node(current);
                pending.push_back(child);
            }
            b'|' => {
                let Some(next) = pending.pop_front() else {
                    return Err(FlatnestError::syntax(cursor, "'|' with no pending '*' slot"));
                };
                cursor.next();
                current = next;
            }
            b'[' | b']' => {
                return Err(FlatnestError::syntax(
                    cursor,
                    format!("depth-first token '{}' in breadth-first pattern", byte as char),
                ));
            }
            other => {
                return Err(FlatnestError::syntax(
                    cursor,
                    format!("unexpected character '{}'", other as char),
                ));
            }
        }
    }

    if !pending.is_empty() {
        return Err(FlatnestError::syntax(
            cursor,
            format!("{} unresolved '*' slot(s) at end of pattern", pending.len()),
        ));
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dfs_decode_rejects_trailing_open_bracket() {
        let result = decode("2[3", Order::DepthFirst);
        assert!(matches!(result, Err(FlatnestError::PatternSyntax { .. })));
    }

    #[test]
    fn bfs_decode_accepts_trailing_empty_segment() {
        // "*|" is the shape of [[]]: one sub-list, specified as empty.
        let shape = decode("*|", Order::BreadthFirst).unwrap();
        assert_eq!(shape.num_leaves(), 0);
        assert_eq!(shape.num_sublists(), 1);
    }

    #[test]
    fn zero_leaf_run_is_a_no_op() {
        let shape = decode("0", Order::DepthFirst).unwrap();
        assert_eq!(shape.num_leaves(), 0);
        assert_eq!(shape, decode("", Order::DepthFirst).unwrap());
    }

    #[test]
    fn integer_overflow_is_a_syntax_error() {
        let pattern = "99999999999999999999999999";
        assert!(matches!(
            decode(pattern, Order::DepthFirst),
            Err(FlatnestError::PatternSyntax { .. })
        ));
    }
}
