//! Lazy leaf traversal of nested structures and shapes.
//!
//! [traverse] yields `(nested index path, &value)` pairs one at a time,
//! without flattening the structure first. Both orders are pull-based state
//! machines over heap-allocated frames, so suspension and resumption are
//! plain `Iterator::next` calls and arbitrarily deep input cannot overflow
//! the native call stack. Each call to [traverse] (or
//! [Shape::leaf_paths]) starts a fresh, independent iteration.

use crate::error::FlatnestError;
use crate::model::{Child, Nested, Shape, ShapeIndex};
use crate::Order;
use std::collections::VecDeque;

// =#========================================================================#=
// TRAVERSAL OVER NESTED STRUCTURES
// =#========================================================================#=
/// Lazily traverses the leaves of a nested structure in the given order.
///
/// The flat sequence of yielded values always equals
/// [flatten](crate::flatten)'s value sequence for the same order, and each
/// yielded path is the leaf's nested index path.
///
/// # Arguments
/// * `nested` - The structure to traverse; must be a [List](Nested::List) at
///   the top level
/// * `order` - Traversal order
///
/// # Returns
/// * `Ok(Traversal)` - Iterator over `(path, &value)` pairs
/// * `Err(FlatnestError::InvalidStructure)` - If `nested` is a bare leaf
///
/// # Example
/// ```
/// use flatnest::{nested, traverse, Order};
///
/// let structure = nested!([1, [2, 3], 4]);
/// let pairs: Vec<_> = traverse(&structure, Order::BreadthFirst).unwrap().collect();
/// assert_eq!(pairs[0], (vec![0], &1));
/// assert_eq!(pairs[1], (vec![2], &4));
/// assert_eq!(pairs[2], (vec![1, 0], &2));
/// ```
pub fn traverse<T>(nested: &Nested<T>, order: Order) -> Result<Traversal<'_, T>, FlatnestError> {
    let Nested::List(items) = nested else {
        return Err(FlatnestError::invalid_structure(
            "expected a sequence at the top level, found a bare leaf",
        ));
    };
    Ok(match order {
        Order::DepthFirst => Traversal::Dfs(DfsTraversal { stack: vec![(items.as_slice(), 0)] }),
        Order::BreadthFirst => Traversal::Bfs(BfsTraversal {
            queue: VecDeque::from([(items.as_slice(), Vec::new())]),
            current: None,
        }),
    })
}

/// Lazy leaf iterator over a nested structure, in one of the two traversal
/// orders. Created by [traverse].
pub enum Traversal<'a, T> {
    /// Pre-order traversal with an explicit frame stack.
    Dfs(DfsTraversal<'a, T>),
    /// FIFO queue sweep, shallower sub-lists before deeper ones.
    Bfs(BfsTraversal<'a, T>),
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = (Vec<usize>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::Dfs(iter) => iter.next(),
            Traversal::Bfs(iter) => iter.next(),
        }
    }
}

/// Depth-first leaf traversal state: a stack of (items, next-slot) frames.
///
/// The path of a yielded leaf is read off the stack: each frame's cursor,
/// minus one, is the child index taken at that level.
pub struct DfsTraversal<'a, T> {
    stack: Vec<(&'a [Nested<T>], usize)>,
}

impl<'a, T> Iterator for DfsTraversal<'a, T> {
    type Item = (Vec<usize>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let items: &'a [Nested<T>] = frame.0;
            if frame.1 == items.len() {
                self.stack.pop();
                continue;
            }
            let slot = frame.1;
            frame.1 += 1;
            match &items[slot] {
                Nested::Leaf(value) => {
                    let path = self.stack.iter().map(|(_, cursor)| cursor - 1).collect();
                    return Some((path, value));
                }
                Nested::List(children) => self.stack.push((children.as_slice(), 0)),
            }
        }
    }
}

/// Breadth-first leaf traversal state: a FIFO queue of pending sub-lists
/// (each with its path prefix) plus a cursor into the list being scanned.
pub struct BfsTraversal<'a, T> {
    queue: VecDeque<(&'a [Nested<T>], Vec<usize>)>,
    current: Option<(&'a [Nested<T>], Vec<usize>, usize)>,
}

impl<'a, T> Iterator for BfsTraversal<'a, T> {
    type Item = (Vec<usize>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((items, prefix, cursor)) = self.current.as_mut() else {
                let (items, prefix) = self.queue.pop_front()?;
                self.current = Some((items, prefix, 0));
                continue;
            };
            let items: &'a [Nested<T>] = items;
            if *cursor == items.len() {
                self.current = None;
                continue;
            }
            let slot = *cursor;
            *cursor += 1;
            match &items[slot] {
                Nested::Leaf(value) => {
                    let mut path = prefix.clone();
                    path.push(slot);
                    return Some((path, value));
                }
                Nested::List(children) => {
                    let mut path = prefix.clone();
                    path.push(slot);
                    self.queue.push_back((children.as_slice(), path));
                }
            }
        }
    }
}

// =#========================================================================#=
// TRAVERSAL OVER SHAPES
// =#========================================================================#=
impl Shape {
    /// Lazily yields the nested index path of every leaf in the given
    /// traversal order, without materializing a nested structure.
    ///
    /// Zipping the paths with a stored flat sequence reproduces
    /// [traverse] for a structure that only exists as a
    /// {pattern, flat list} pair:
    ///
    /// ```
    /// use flatnest::{pattern, Order};
    ///
    /// let shape = pattern::decode("4*4|2", Order::BreadthFirst).unwrap();
    /// let flat = [0, 1, 2, 3, 6, 7, 8, 9, 4, 5];
    /// let last = shape.leaf_paths(Order::BreadthFirst).zip(flat).last().unwrap();
    /// assert_eq!(last, (vec![4, 1], 5));
    /// ```
    pub fn leaf_paths(&self, order: Order) -> LeafPaths<'_> {
        match order {
            Order::DepthFirst => LeafPaths::Dfs { shape: self, stack: vec![(self.root(), 0)] },
            Order::BreadthFirst => LeafPaths::Bfs {
                shape: self,
                queue: VecDeque::from([self.root()]),
                current: None,
            },
        }
    }
}

/// Lazy iterator over the leaf paths of a [Shape]. Created by
/// [Shape::leaf_paths].
pub enum LeafPaths<'a> {
    /// Pre-order walk with an explicit frame stack.
    Dfs { shape: &'a Shape, stack: Vec<(ShapeIndex, usize)> },
    /// FIFO queue sweep with a cursor into the node being scanned.
    Bfs { shape: &'a Shape, queue: VecDeque<ShapeIndex>, current: Option<(ShapeIndex, usize)> },
}

impl Iterator for LeafPaths<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            LeafPaths::Dfs { shape, stack } => loop {
                let frame = stack.last_mut()?;
                let node = frame.0;
                let children = shape.node(node).children();
                if frame.1 == children.len() {
                    stack.pop();
                    continue;
                }
                let slot = frame.1;
                frame.1 += 1;
                match children[slot] {
                    Child::Leaf => {
                        return Some(stack.iter().map(|(_, cursor)| cursor - 1).collect());
                    }
                    Child::Node(child) => stack.push((child, 0)),
                }
            },
            LeafPaths::Bfs { shape, queue, current } => loop {
                let Some((node, cursor)) = current.as_mut() else {
                    *current = Some((queue.pop_front()?, 0));
                    continue;
                };
                let children = shape.node(*node).children();
                if *cursor == children.len() {
                    *current = None;
                    continue;
                }
                let slot = *cursor;
                *cursor += 1;
                match children[slot] {
                    Child::Leaf => {
                        let mut path = shape.path_to(*node);
                        path.push(slot);
                        return Some(path);
                    }
                    Child::Node(child) => queue.push_back(child),
                }
            },
        }
    }
}
