//! Shape model for nested structures.
//!
//! This module provides the core data structures describing the *shape* of a
//! nested structure independent of its leaf values:
//! - [Shape]: the shape tree, using the arena pattern for its internal nodes.
//! - [ShapeIndex] is used to index internal nodes.
//! - [Child] distinguishes leaf slots from nested sub-lists.
//!
//! A shape fully determines the total leaf count, the depth, and the mapping
//! between flat indices and nested index paths; it carries no leaf values.
//! Shapes are immutable once built: the pattern codec, the flattener, the
//! reconstructor, and the index mapper all consume them read-only.

/// Index of an internal node in a [Shape] (arena).
pub type ShapeIndex = usize;

// =#========================================================================#=
// SHAPE
// =#========================================================================#=
/// Structural skeleton of a nested structure, represented using the arena
/// pattern on [ShapeNode].
///
/// Internal nodes are stored in a contiguous vector and referenced by
/// [ShapeIndex]; leaves are not arena entries but inline [Child::Leaf] slots
/// in their parent's child list. This avoids reference cycles, keeps
/// traversal cache-friendly, and gives every node a stable identity for the
/// breadth-first queue sweeps.
///
/// # Structure
/// - Index 0 is always the root node, representing the top-level sequence.
/// - Each node records its parent and its child-slot position in the parent,
///   so a path to the root can be recovered from any node.
/// - Each node caches the leaf count of its subtree, maintained on insertion.
/// - Parent indices always precede child indices in the arena; both the
///   depth-first and breadth-first builders append children after parents.
///
/// # Construction
/// Build top-down: start from [Shape::new], then attach sub-lists with
/// [Shape::add_child_node] and leaf runs with [Shape::add_leaves].
///
/// # Equality
/// Two shapes compare equal when they are *structurally* equal, regardless of
/// arena layout. Depth-first and breadth-first decoding discover nodes in
/// different orders, so layout equality would break cross-order equivalence.
///
/// # Example
/// ```
/// use flatnest::Shape;
///
/// // Shape of [x, x, [x, x], x], pattern "2[2]1"
/// let mut shape = Shape::new();
/// let root = shape.root();
/// shape.add_leaves(root, 2);
/// let inner = shape.add_child_node(root);
/// shape.add_leaves(inner, 2);
/// shape.add_leaves(root, 1);
///
/// assert_eq!(shape.num_leaves(), 5);
/// assert_eq!(shape.depth(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Shape {
    /// Internal nodes of this shape (arena pattern)
    nodes: Vec<ShapeNode>,
}

/// An internal node of a [Shape]: an ordered list of children, each either a
/// leaf slot or a nested internal node.
#[derive(Debug, Clone)]
pub struct ShapeNode {
    /// Index of this node in the arena
    index: ShapeIndex,
    /// Parent node; `None` only for the root
    parent: Option<ShapeIndex>,
    /// Child-slot position of this node within its parent (0 for the root)
    position: usize,
    /// Ordered children of this node
    children: Vec<Child>,
    /// Number of leaves in the subtree rooted at this node (cached)
    num_leaves: usize,
}

/// One child slot of a [ShapeNode].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    /// A single leaf value.
    Leaf,
    /// A nested sub-list, stored as an arena node.
    Node(ShapeIndex),
}

/// Index of the root node in every shape arena.
const ROOT_INDEX: ShapeIndex = 0;

// ============================================================================
// New, Builders, Getters / Accessors (pub)
// ============================================================================
impl Shape {
    /// Creates a new shape holding only an empty root node
    /// (the shape of the empty top-level sequence `[]`).
    pub fn new() -> Self {
        Shape {
            nodes: vec![ShapeNode {
                index: ROOT_INDEX,
                parent: None,
                position: 0,
                children: Vec::new(),
                num_leaves: 0,
            }],
        }
    }

    /// Appends a nested sub-list child to `parent` and returns the index of
    /// the newly created node.
    ///
    /// # Panics
    /// Panics if `parent` is not a valid node index.
    pub fn add_child_node(&mut self, parent: ShapeIndex) -> ShapeIndex {
        let index = self.nodes.len();
        let position = self.nodes[parent].children.len();
        self.nodes[parent].children.push(Child::Node(index));
        self.nodes.push(ShapeNode {
            index,
            parent: Some(parent),
            position,
            children: Vec::new(),
            num_leaves: 0,
        });
        index
    }

    /// Appends `count` consecutive leaf slots to `parent`, updating the
    /// cached leaf counts along the path to the root.
    ///
    /// # Panics
    /// Panics if `parent` is not a valid node index.
    pub fn add_leaves(&mut self, parent: ShapeIndex, count: usize) {
        if count == 0 {
            return;
        }
        let node = &mut self.nodes[parent];
        node.children.extend(std::iter::repeat_n(Child::Leaf, count));

        // Propagate the new leaves up the parent chain
        let mut current = Some(parent);
        while let Some(index) = current {
            self.nodes[index].num_leaves += count;
            current = self.nodes[index].parent;
        }
    }

    /// Returns the index of the root node (always 0).
    pub fn root(&self) -> ShapeIndex {
        ROOT_INDEX
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: ShapeIndex) -> &ShapeNode {
        &self.nodes[index]
    }

    /// Returns the total number of leaves in this shape.
    pub fn num_leaves(&self) -> usize {
        self.nodes[ROOT_INDEX].num_leaves
    }

    /// Returns the number of nested sub-lists in this shape,
    /// not counting the top-level sequence itself.
    pub fn num_sublists(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns the maximum nesting depth: 0 for a flat (or empty) top-level
    /// sequence, plus one for each level of sub-list nesting.
    pub fn depth(&self) -> usize {
        // Parents precede children in the arena, so one forward pass suffices.
        let mut depths = vec![0usize; self.nodes.len()];
        let mut max_depth = 0;
        for node in &self.nodes[1..] {
            let parent = node.parent.unwrap_or(ROOT_INDEX);
            depths[node.index] = depths[parent] + 1;
            max_depth = max_depth.max(depths[node.index]);
        }
        max_depth
    }

    /// Returns the nested index path from the root to the given node:
    /// the child-slot positions along the parent chain.
    ///
    /// The root itself has the empty path.
    pub fn path_to(&self, index: ShapeIndex) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = &self.nodes[index];
        while let Some(parent) = node.parent {
            path.push(node.position);
            node = &self.nodes[parent];
        }
        path.reverse();
        path
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::new()
    }
}

impl std::ops::Index<ShapeIndex> for Shape {
    type Output = ShapeNode;

    fn index(&self, index: ShapeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// ============================================================================
// Structural equality
// ============================================================================
impl PartialEq for Shape {
    /// Structural comparison with an explicit work stack: two shapes are
    /// equal when their trees have the same child arrangement, independent of
    /// the arena order in which nodes were discovered.
    fn eq(&self, other: &Shape) -> bool {
        let mut stack: Vec<(ShapeIndex, ShapeIndex)> = vec![(self.root(), other.root())];
        while let Some((left, right)) = stack.pop() {
            let left_children = &self.nodes[left].children;
            let right_children = &other.nodes[right].children;
            if left_children.len() != right_children.len() {
                return false;
            }
            for (a, b) in left_children.iter().zip(right_children) {
                match (a, b) {
                    (Child::Leaf, Child::Leaf) => {}
                    (Child::Node(a), Child::Node(b)) => stack.push((*a, *b)),
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for Shape {}

// ============================================================================
// Shape node accessors (pub)
// ============================================================================
impl ShapeNode {
    /// Returns the arena index of this node.
    pub fn index(&self) -> ShapeIndex {
        self.index
    }

    /// Returns the parent of this node, or `None` for the root.
    pub fn parent(&self) -> Option<ShapeIndex> {
        self.parent
    }

    /// Returns the child-slot position of this node within its parent.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the ordered children of this node.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Returns the number of leaves in the subtree rooted at this node.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the number of *immediate* leaf children of this node
    /// (not counting leaves inside nested sub-lists).
    pub fn num_leaf_children(&self) -> usize {
        self.children.iter().filter(|c| matches!(c, Child::Leaf)).count()
    }
}
