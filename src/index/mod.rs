//! Flat index <-> nested index path mapping.
//!
//! A nested index path `[i0, i1, ..., ik]` addresses the element reached by
//! taking child `i0` of the top-level sequence, then child `i1` of that
//! sub-list, and so on, terminating at a leaf. For a fixed [Shape] and
//! [Order], [Shape::flat_to_nested] and [Shape::nested_to_flat] are mutual
//! inverses over the valid domain.
//!
//! The depth-first mapping is an iterative descent subtracting the leaf
//! counts of earlier siblings. The breadth-first mapping simulates the same
//! FIFO queue sweep the breadth-first encoder and flattener use, then walks
//! the recorded parent links back to the root.

use crate::error::FlatnestError;
use crate::model::{Child, Shape};
use crate::pattern;
use crate::Order;
use std::collections::VecDeque;

impl Shape {
    // ========================================================================
    // FLAT INDEX -> NESTED INDEX PATH
    // ========================================================================
    /// Converts a flat leaf index into its nested index path under the given
    /// traversal order.
    ///
    /// # Arguments
    /// * `order` - Traversal order defining the flat enumeration of leaves
    /// * `flat_index` - Position of the leaf in the flat sequence
    ///
    /// # Returns
    /// * `Ok(Vec<usize>)` - Per-level child indices from the root to the leaf
    /// * `Err(FlatnestError::IndexOutOfRange)` - If `flat_index` is not in
    ///   `[0, num_leaves())`
    ///
    /// # Example
    /// ```
    /// use flatnest::{pattern, Order};
    ///
    /// let shape = pattern::decode("1[2[2[2]2]2]1", Order::DepthFirst).unwrap();
    /// assert_eq!(shape.flat_to_nested(Order::DepthFirst, 0).unwrap(), vec![0]);
    /// assert_eq!(shape.flat_to_nested(Order::DepthFirst, 5).unwrap(), vec![1, 2, 2, 0]);
    /// assert_eq!(shape.flat_to_nested(Order::DepthFirst, 11).unwrap(), vec![2]);
    /// ```
    pub fn flat_to_nested(
        &self,
        order: Order,
        flat_index: usize,
    ) -> Result<Vec<usize>, FlatnestError> {
        if flat_index >= self.num_leaves() {
            return Err(FlatnestError::flat_index_out_of_range(flat_index, self.num_leaves()));
        }
        match order {
            Order::DepthFirst => Ok(self.flat_to_nested_dfs(flat_index)),
            Order::BreadthFirst => Ok(self.flat_to_nested_bfs(flat_index)),
        }
    }

    /// Iterative depth-first descent: at each node, skip the leaf counts of
    /// earlier siblings until the child containing the target rank is found.
    fn flat_to_nested_dfs(&self, flat_index: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = self.root();
        let mut remaining = flat_index;

        'descend: loop {
            for (slot, child) in self.node(node).children().iter().enumerate() {
                match child {
                    Child::Leaf => {
                        if remaining == 0 {
                            path.push(slot);
                            return path;
                        }
                        remaining -= 1;
                    }
                    Child::Node(child) => {
                        let subtree_leaves = self.node(*child).num_leaves();
                        if remaining < subtree_leaves {
                            path.push(slot);
                            node = *child;
                            continue 'descend;
                        }
                        remaining -= subtree_leaves;
                    }
                }
            }
            // Bounds were checked against num_leaves(), so the loop above
            // always terminates through one of the two returns.
            return path;
        }
    }

    /// FIFO queue sweep: leaves are ranked in the order their containing
    /// node is dequeued; the path is the owner's root path plus the slot.
    fn flat_to_nested_bfs(&self, flat_index: usize) -> Vec<usize> {
        let mut remaining = flat_index;
        let mut queue: VecDeque<_> = VecDeque::from([self.root()]);

        while let Some(node) = queue.pop_front() {
            for (slot, child) in self.node(node).children().iter().enumerate() {
                match child {
                    Child::Leaf => {
                        if remaining == 0 {
                            let mut path = self.path_to(node);
                            path.push(slot);
                            return path;
                        }
                        remaining -= 1;
                    }
                    Child::Node(child) => queue.push_back(*child),
                }
            }
        }
        // Bounds were checked against num_leaves(); the sweep visits every leaf.
        Vec::new()
    }

    // ========================================================================
    // NESTED INDEX PATH -> FLAT INDEX
    // ========================================================================
    /// Converts a nested index path into its flat leaf index under the given
    /// traversal order.
    ///
    /// # Arguments
    /// * `order` - Traversal order defining the flat enumeration of leaves
    /// * `path` - Per-level child indices from the root; must terminate at a
    ///   leaf
    ///
    /// # Returns
    /// * `Ok(usize)` - Position of the addressed leaf in the flat sequence
    /// * `Err(FlatnestError::IndexOutOfRange)` - If the path is empty, a
    ///   component exceeds the child count at its level, the path stops on a
    ///   sub-list, or it descends through a leaf
    ///
    /// # Example
    /// ```
    /// use flatnest::{pattern, Order};
    ///
    /// let shape = pattern::decode("1[2[2[2]2]2]1", Order::DepthFirst).unwrap();
    /// assert_eq!(shape.nested_to_flat(Order::DepthFirst, &[1, 2, 2, 0]).unwrap(), 5);
    /// assert_eq!(shape.nested_to_flat(Order::DepthFirst, &[2]).unwrap(), 11);
    /// ```
    pub fn nested_to_flat(&self, order: Order, path: &[usize]) -> Result<usize, FlatnestError> {
        match order {
            Order::DepthFirst => self.nested_to_flat_dfs(path),
            Order::BreadthFirst => self.nested_to_flat_bfs(path),
        }
    }

    /// Walks the path from the root, accumulating the leaf counts of all
    /// earlier siblings at each level.
    fn nested_to_flat_dfs(&self, path: &[usize]) -> Result<usize, FlatnestError> {
        let mut node = self.root();
        let mut flat_index = 0;

        let Some((&leaf_slot, descent)) = path.split_last() else {
            return Err(FlatnestError::path_out_of_range(path, "path is empty"));
        };

        for &component in descent {
            let children = self.node(node).children();
            if component >= children.len() {
                return Err(FlatnestError::path_out_of_range(
                    path,
                    format!("component {component} exceeds child count {}", children.len()),
                ));
            }
            flat_index += count_leaves_before(self, children, component);
            match children[component] {
                Child::Node(child) => node = child,
                Child::Leaf => {
                    return Err(FlatnestError::path_out_of_range(
                        path,
                        "path descends through a leaf",
                    ));
                }
            }
        }

        let children = self.node(node).children();
        if leaf_slot >= children.len() {
            return Err(FlatnestError::path_out_of_range(
                path,
                format!("component {leaf_slot} exceeds child count {}", children.len()),
            ));
        }
        match children[leaf_slot] {
            Child::Leaf => Ok(flat_index + count_leaves_before(self, children, leaf_slot)),
            Child::Node(_) => {
                Err(FlatnestError::path_out_of_range(path, "path stops on a sub-list"))
            }
        }
    }

    /// Validates the path to find the owning node, then sweeps the FIFO
    /// queue accumulating immediate-leaf counts of nodes dequeued earlier.
    fn nested_to_flat_bfs(&self, path: &[usize]) -> Result<usize, FlatnestError> {
        // Resolve the owner of the addressed leaf, validating every component.
        let mut owner = self.root();
        let Some((&leaf_slot, descent)) = path.split_last() else {
            return Err(FlatnestError::path_out_of_range(path, "path is empty"));
        };
        for &component in descent {
            let children = self.node(owner).children();
            if component >= children.len() {
                return Err(FlatnestError::path_out_of_range(
                    path,
                    format!("component {component} exceeds child count {}", children.len()),
                ));
            }
            match children[component] {
                Child::Node(child) => owner = child,
                Child::Leaf => {
                    return Err(FlatnestError::path_out_of_range(
                        path,
                        "path descends through a leaf",
                    ));
                }
            }
        }
        let children = self.node(owner).children();
        if leaf_slot >= children.len() {
            return Err(FlatnestError::path_out_of_range(
                path,
                format!("component {leaf_slot} exceeds child count {}", children.len()),
            ));
        }
        if !matches!(children[leaf_slot], Child::Leaf) {
            return Err(FlatnestError::path_out_of_range(path, "path stops on a sub-list"));
        }

        // Rank = immediate leaves of all nodes dequeued before the owner,
        // plus the owner's leaf children left of the addressed slot.
        let mut flat_index = 0;
        let mut queue: VecDeque<_> = VecDeque::from([self.root()]);
        while let Some(node) = queue.pop_front() {
            if node == owner {
                let before = self.node(node).children()[..leaf_slot]
                    .iter()
                    .filter(|c| matches!(c, Child::Leaf))
                    .count();
                return Ok(flat_index + before);
            }
            flat_index += self.node(node).num_leaf_children();
            for child in self.node(node).children() {
                if let Child::Node(child) = child {
                    queue.push_back(*child);
                }
            }
        }

        // Every validated owner is reachable from the root sweep.
        Err(FlatnestError::path_out_of_range(path, "unreachable sub-list"))
    }
}

/// Number of leaves contributed by the children of a node left of `slot`.
fn count_leaves_before(shape: &Shape, children: &[Child], slot: usize) -> usize {
    children[..slot]
        .iter()
        .map(|child| match child {
            Child::Leaf => 1,
            Child::Node(index) => shape.node(*index).num_leaves(),
        })
        .sum()
}

// ============================================================================
// PATTERN-LEVEL CONVENIENCE (pub)
// ============================================================================
/// Converts a flat leaf index valid under one traversal order into the flat
/// index of the *same leaf* under the other order, by routing through the
/// leaf's nested index path.
///
/// # Arguments
/// * `pattern` - Pattern string in the grammar of `from`
/// * `from` - Order in which `flat_index` was assigned
/// * `to` - Order in which the returned index is valid
/// * `flat_index` - Position of the leaf in the `from`-order flat sequence
///
/// # Example
/// ```
/// use flatnest::{convert_flat_index, Order};
///
/// let bfs = convert_flat_index("1[2[1]3]3[2]", Order::DepthFirst, Order::BreadthFirst, 3).unwrap();
/// assert_eq!(bfs, 11);
/// ```
pub fn convert_flat_index(
    pattern: &str,
    from: Order,
    to: Order,
    flat_index: usize,
) -> Result<usize, FlatnestError> {
    let shape = pattern::decode(pattern, from)?;
    let path = shape.flat_to_nested(from, flat_index)?;
    shape.nested_to_flat(to, &path)
}
