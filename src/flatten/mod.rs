//! Flattening nested structures and reconstructing them.
//!
//! [flatten] walks a [Nested] structure once and produces its [Shape], its
//! pattern string, and the flat sequence of leaf values in traversal order.
//! [unflatten] is the inverse: given a pattern (or a [Shape]) and a matching
//! flat sequence, it rebuilds the nested structure.
//!
//! Both directions use heap-allocated stacks and queues, so arbitrarily deep
//! input cannot overflow the native call stack.

use crate::error::FlatnestError;
use crate::model::{Child, Nested, Shape, ShapeIndex};
use crate::pattern;
use crate::Order;
use std::collections::VecDeque;

// =#========================================================================#=
// FLATTENED
// =#========================================================================#=
/// Result of [flatten]: everything derived from one traversal of a nested
/// structure.
///
/// The invariant `values.len() == shape.num_leaves()` always holds, and
/// `pattern` is exactly `pattern::encode(&shape, order)` for the order the
/// structure was flattened under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattened<T> {
    /// Shape of the flattened structure
    pub shape: Shape,
    /// Pattern string of the shape, in the grammar of the requested order
    pub pattern: String,
    /// Leaf values in traversal order
    pub values: Vec<T>,
}

// ============================================================================
// FLATTEN (pub)
// ============================================================================
/// Flattens a nested structure into its pattern string and flat value
/// sequence, in the given traversal order.
///
/// Depth-first keeps the literal left-to-right document order of the leaves.
/// Breadth-first emits each sub-list's immediate leaves when that sub-list is
/// dequeued in the FIFO sweep, so shallower leaves precede deeper ones.
///
/// # Arguments
/// * `nested` - The structure to flatten; consumed. Must be a
///   [List](Nested::List) at the top level.
/// * `order` - Traversal order for both the pattern and the value sequence
///
/// # Returns
/// * `Ok(Flattened)` - Shape, pattern, and values from a single traversal
/// * `Err(FlatnestError::InvalidStructure)` - If `nested` is a bare leaf
///
/// # Example
/// ```
/// use flatnest::{flatten, nested, Order};
///
/// let result = flatten(nested!([0, 1, 2, 3, [4, 5], 6, 7, 8, 9]), Order::DepthFirst).unwrap();
/// assert_eq!(result.pattern, "4[2]4");
/// assert_eq!(result.values, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
///
/// let result = flatten(nested!([0, 1, 2, 3, [4, 5], 6, 7, 8, 9]), Order::BreadthFirst).unwrap();
/// assert_eq!(result.pattern, "4*4|2");
/// assert_eq!(result.values, vec![0, 1, 2, 3, 6, 7, 8, 9, 4, 5]);
/// ```
pub fn flatten<T>(nested: Nested<T>, order: Order) -> Result<Flattened<T>, FlatnestError> {
    let Nested::List(items) = nested else {
        return Err(FlatnestError::invalid_structure(
            "expected a sequence at the top level, found a bare leaf",
        ));
    };
    Ok(match order {
        Order::DepthFirst => flatten_dfs(items),
        Order::BreadthFirst => flatten_bfs(items),
    })
}

/// Depth-first flattening: explicit stack of (shape node, item iterator)
/// frames, emitting pattern tokens and values in pre-order.
fn flatten_dfs<T>(items: Vec<Nested<T>>) -> Flattened<T> {
    let mut shape = Shape::new();
    let mut pattern = String::new();
    let mut values = Vec::new();
    let mut run = 0;

    type Frame<T> = (ShapeIndex, std::vec::IntoIter<Nested<T>>);
    let mut stack: Vec<Frame<T>> = vec![(shape.root(), items.into_iter())];

    while let Some((node, iter)) = stack.last_mut() {
        let node = *node;
        match iter.next() {
            Some(Nested::Leaf(value)) => {
                values.push(value);
                run += 1;
            }
            Some(Nested::List(items)) => {
                flush_leaf_run(&mut shape, &mut pattern, node, &mut run);
                pattern.push('[');
                let child = shape.add_child_node(node);
                stack.push((child, items.into_iter()));
            }
            None => {
                flush_leaf_run(&mut shape, &mut pattern, node, &mut run);
                stack.pop();
                if !stack.is_empty() {
                    pattern.push(']');
                }
            }
        }
    }

    Flattened { shape, pattern, values }
}

/// Breadth-first flattening: FIFO queue of (shape node, item iterator)
/// pairs, mirroring the queue sweep of the breadth-first pattern encoder.
fn flatten_bfs<T>(items: Vec<Nested<T>>) -> Flattened<T> {
    let mut shape = Shape::new();
    let mut pattern = String::new();
    let mut values = Vec::new();
    let mut run = 0;

    type Entry<T> = (ShapeIndex, Vec<Nested<T>>);
    let mut queue: VecDeque<Entry<T>> = VecDeque::from([(shape.root(), items)]);

    while let Some((node, items)) = queue.pop_front() {
        for item in items {
            match item {
                Nested::Leaf(value) => {
                    values.push(value);
                    run += 1;
                }
                Nested::List(items) => {
                    flush_leaf_run(&mut shape, &mut pattern, node, &mut run);
                    pattern.push('*');
                    let child = shape.add_child_node(node);
                    queue.push_back((child, items));
                }
            }
        }
        flush_leaf_run(&mut shape, &mut pattern, node, &mut run);
        if !queue.is_empty() {
            pattern.push('|');
        }
    }

    Flattened { shape, pattern, values }
}

/// Records a pending leaf run in both the shape and the pattern.
fn flush_leaf_run(shape: &mut Shape, pattern: &mut String, node: ShapeIndex, run: &mut usize) {
    if *run > 0 {
        shape.add_leaves(node, *run);
        pattern.push_str(&run.to_string());
        *run = 0;
    }
}

// ============================================================================
// UNFLATTEN (pub)
// ============================================================================
/// Rebuilds a nested structure from a pattern string and a flat value
/// sequence, in the given traversal order.
///
/// # Arguments
/// * `pattern` - Pattern string in the grammar of `order`
/// * `values` - Leaf values in the traversal order of `order`; consumed
/// * `order` - Traversal order under which `values` was produced
///
/// # Returns
/// * `Ok(Nested::List)` - The rebuilt structure
/// * `Err(FlatnestError::PatternSyntax)` - If the pattern is malformed
/// * `Err(FlatnestError::LengthMismatch)` - If `values.len()` disagrees with
///   the pattern's total leaf count
///
/// # Example
/// ```
/// use flatnest::{nested, unflatten, Order};
///
/// let rebuilt = unflatten("4*4|2", vec![0, 1, 2, 3, 6, 7, 8, 9, 4, 5], Order::BreadthFirst).unwrap();
/// assert_eq!(rebuilt, nested!([0, 1, 2, 3, [4, 5], 6, 7, 8, 9]));
/// ```
pub fn unflatten<T>(
    pattern: &str,
    values: Vec<T>,
    order: Order,
) -> Result<Nested<T>, FlatnestError> {
    let shape = pattern::decode(pattern, order)?;
    unflatten_shape(&shape, values, order)
}

/// Rebuilds a nested structure from an already-decoded [Shape].
///
/// Same contract as [unflatten], minus the pattern parsing.
pub fn unflatten_shape<T>(
    shape: &Shape,
    values: Vec<T>,
    order: Order,
) -> Result<Nested<T>, FlatnestError> {
    let expected = shape.num_leaves();
    if values.len() != expected {
        return Err(FlatnestError::LengthMismatch { expected, actual: values.len() });
    }
    match order {
        Order::DepthFirst => Ok(rebuild_dfs(shape, values)),
        Order::BreadthFirst => Ok(rebuild_bfs(shape, values)),
    }
}

/// One frame of the iterative reconstruction: the shape node being rebuilt,
/// the next child slot to fill, and the children assembled so far.
struct BuildFrame<T> {
    node: ShapeIndex,
    next_child: usize,
    built: Vec<Nested<T>>,
}

impl<T> BuildFrame<T> {
    fn new(shape: &Shape, node: ShapeIndex) -> Self {
        BuildFrame { node, next_child: 0, built: Vec::with_capacity(shape.node(node).children().len()) }
    }
}

/// Depth-first reconstruction: values are consumed in pre-order while an
/// explicit stack assembles each node's child list.
fn rebuild_dfs<T>(shape: &Shape, values: Vec<T>) -> Nested<T> {
    let mut values = values.into_iter();
    let mut stack = vec![BuildFrame::new(shape, shape.root())];

    loop {
        let Some(frame) = stack.last_mut() else {
            // Never reached: popping the root frame returns below.
            return Nested::List(Vec::new());
        };
        let children = shape.node(frame.node).children();

        if frame.next_child < children.len() {
            let slot = frame.next_child;
            frame.next_child += 1;
            match children[slot] {
                Child::Leaf => {
                    // Length was checked against the shape up front.
                    if let Some(value) = values.next() {
                        frame.built.push(Nested::Leaf(value));
                    }
                }
                Child::Node(child) => stack.push(BuildFrame::new(shape, child)),
            }
        } else {
            let completed = stack.pop().map(|f| f.built).unwrap_or_default();
            match stack.last_mut() {
                Some(parent) => parent.built.push(Nested::List(completed)),
                None => return Nested::List(completed),
            }
        }
    }
}

/// Breadth-first reconstruction in two phases: a FIFO sweep hands each node
/// the slice of values its immediate leaves consume, then a depth-first
/// assembly builds the owned structure pulling leaves from those per-node
/// stores.
fn rebuild_bfs<T>(shape: &Shape, values: Vec<T>) -> Nested<T> {
    // Phase 1: distribute values to the node that emits them, in dequeue order.
    let mut values = values.into_iter();
    let mut leaf_store: Vec<std::vec::IntoIter<T>> = (0..=shape.num_sublists())
        .map(|_| Vec::new().into_iter())
        .collect();

    let mut queue: VecDeque<ShapeIndex> = VecDeque::from([shape.root()]);
    while let Some(node) = queue.pop_front() {
        let own = shape.node(node).num_leaf_children();
        leaf_store[node] = values.by_ref().take(own).collect::<Vec<_>>().into_iter();
        for child in shape.node(node).children() {
            if let Child::Node(child) = child {
                queue.push_back(*child);
            }
        }
    }

    // Phase 2: assemble depth-first, pulling each leaf from its owner's store.
    let mut stack = vec![BuildFrame::new(shape, shape.root())];

    loop {
        let Some(frame) = stack.last_mut() else {
            // Never reached: popping the root frame returns below.
            return Nested::List(Vec::new());
        };
        let children = shape.node(frame.node).children();

        if frame.next_child < children.len() {
            let slot = frame.next_child;
            frame.next_child += 1;
            match children[slot] {
                Child::Leaf => {
                    if let Some(value) = leaf_store[frame.node].next() {
                        frame.built.push(Nested::Leaf(value));
                    }
                }
                Child::Node(child) => stack.push(BuildFrame::new(shape, child)),
            }
        } else {
            let completed = stack.pop().map(|f| f.built).unwrap_or_default();
            match stack.last_mut() {
                Some(parent) => parent.built.push(Nested::List(completed)),
                None => return Nested::List(completed),
            }
        }
    }
}
