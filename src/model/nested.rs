//! Nested sequence structure with opaque leaf values.
//!
//! [Nested] is the live counterpart of a [Shape](crate::model::Shape): an
//! arbitrarily deep tree whose internal nodes are ordered lists and whose
//! leaves carry values of type `T`. Leaves are never inspected by this crate;
//! `T` needs no trait bounds for any core operation.

/// An arbitrarily deep nested sequence: each element is either a leaf value
/// or another ordered list of elements.
///
/// The top-level input to flattening and traversal must be a
/// [List](Nested::List); a bare leaf is not a sequence and is rejected with
/// [InvalidStructure](crate::FlatnestError::InvalidStructure).
///
/// # Example
/// ```
/// use flatnest::{nested, Nested};
///
/// let structure: Nested<i32> = nested!([1, [2, [3]], 4]);
/// assert_eq!(structure.num_leaves(), 4);
/// assert_eq!(structure.depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    /// A leaf value occupying one position in the flat sequence.
    Leaf(T),
    /// An ordered list of child elements. May be empty.
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Returns `true` if this element is a leaf value.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Nested::Leaf(_))
    }

    /// Returns `true` if this element is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Nested::List(_))
    }

    /// Counts the leaves in this structure.
    ///
    /// Uses an explicit work stack, so arbitrarily deep input cannot
    /// overflow the native call stack.
    pub fn num_leaves(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Nested<T>> = vec![self];
        while let Some(element) = stack.pop() {
            match element {
                Nested::Leaf(_) => count += 1,
                Nested::List(items) => stack.extend(items.iter()),
            }
        }
        count
    }

    /// Returns the maximum nesting depth of this structure.
    ///
    /// A leaf or an empty top-level list has depth 0; each level of list
    /// nesting below the top level adds one.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Nested<T>, usize)> = vec![(self, 0)];
        while let Some((element, depth)) = stack.pop() {
            if let Nested::List(items) = element {
                for item in items {
                    if item.is_list() {
                        max_depth = max_depth.max(depth + 1);
                    }
                    stack.push((item, depth + 1));
                }
            }
        }
        max_depth
    }
}

impl<T> From<Vec<Nested<T>>> for Nested<T> {
    fn from(items: Vec<Nested<T>>) -> Self {
        Nested::List(items)
    }
}

/// Builds a [Nested] literal from bracketed list syntax.
///
/// Square brackets become [List](Nested::List) elements, everything else is
/// wrapped as a [Leaf](Nested::Leaf).
///
/// # Example
/// ```
/// use flatnest::{nested, Nested};
///
/// let structure: Nested<u8> = nested!([0, 1, [2, 3], 4]);
/// let same = Nested::List(vec![
///     Nested::Leaf(0),
///     Nested::Leaf(1),
///     Nested::List(vec![Nested::Leaf(2), Nested::Leaf(3)]),
///     Nested::Leaf(4),
/// ]);
/// assert_eq!(structure, same);
/// ```
#[macro_export]
macro_rules! nested {
    ([ $( $item:tt ),* $(,)? ]) => {
        $crate::Nested::List(vec![ $( $crate::nested!($item) ),* ])
    };
    ($leaf:expr) => {
        $crate::Nested::Leaf($leaf)
    };
}
