//! Pattern encoding: [Shape] -> pattern string.
//!
//! Both encoders walk the shape with heap-allocated state (an explicit frame
//! stack for depth-first, a FIFO queue for breadth-first) and collapse
//! consecutive leaf children into a single decimal integer.

use crate::model::{Child, Shape, ShapeIndex};
use crate::Order;
use std::collections::VecDeque;

/// Encodes a [Shape] into a pattern string under the given traversal order.
///
/// Encoding never fails; every shape has a pattern in both grammars, and
/// [decode](crate::pattern::decode) is its exact inverse.
pub fn encode(shape: &Shape, order: Order) -> String {
    match order {
        Order::DepthFirst => encode_dfs(shape),
        Order::BreadthFirst => encode_bfs(shape),
    }
}

/// Appends a pending leaf run as a decimal integer, if any.
fn flush_run(pattern: &mut String, run: &mut usize) {
    if *run > 0 {
        pattern.push_str(&run.to_string());
        *run = 0;
    }
}

/// Depth-first encoding: explicit stack of (node, next-child) frames.
///
/// Entering a sub-list emits `[`, leaving it emits `]`; the brackets of the
/// top-level sequence itself are omitted.
fn encode_dfs(shape: &Shape) -> String {
    let mut pattern = String::new();
    let mut run = 0;
    let mut stack: Vec<(ShapeIndex, usize)> = vec![(shape.root(), 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, next_child) = *frame;
        let children = shape.node(node).children();
        if next_child < children.len() {
            frame.1 += 1;
            match children[next_child] {
                Child::Leaf => run += 1,
                Child::Node(child) => {
                    flush_run(&mut pattern, &mut run);
                    pattern.push('[');
                    stack.push((child, 0));
                }
            }
        } else {
            stack.pop();
            flush_run(&mut pattern, &mut run);
            if !stack.is_empty() {
                pattern.push(']');
            }
        }
    }

    pattern
}

/// Breadth-first encoding: FIFO sweep over pending sub-lists.
///
/// Each sub-list child emits `*` and is enqueued as it is discovered; after a
/// node's children are written, `|` separates it from the next dequeued
/// node's children. Queue order is strict FIFO across the entire shape.
fn encode_bfs(shape: &Shape) -> String {
    let mut pattern = String::new();
    let mut run = 0;
    let mut queue: VecDeque<ShapeIndex> = VecDeque::from([shape.root()]);

    while let Some(node) = queue.pop_front() {
        for child in shape.node(node).children() {
            match child {
                Child::Leaf => run += 1,
                Child::Node(child) => {
                    flush_run(&mut pattern, &mut run);
                    pattern.push('*');
                    queue.push_back(*child);
                }
            }
        }
        flush_run(&mut pattern, &mut run);
        if !queue.is_empty() {
            pattern.push('|');
        }
    }

    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::decode;

    #[test]
    fn empty_shape_encodes_to_empty_pattern() {
        let shape = Shape::new();
        assert_eq!(encode(&shape, Order::DepthFirst), "");
        assert_eq!(encode(&shape, Order::BreadthFirst), "");
    }

    #[test]
    fn empty_sublist_round_trips_in_both_orders() {
        let mut shape = Shape::new();
        shape.add_child_node(shape.root());

        let dfs = encode(&shape, Order::DepthFirst);
        let bfs = encode(&shape, Order::BreadthFirst);
        assert_eq!(dfs, "[]");
        assert_eq!(bfs, "*|");
        assert_eq!(decode(&dfs, Order::DepthFirst).unwrap(), shape);
        assert_eq!(decode(&bfs, Order::BreadthFirst).unwrap(), shape);
    }
}
