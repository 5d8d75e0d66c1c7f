/// Live nested sequence structure with opaque leaf values
pub mod nested;
/// Shape model: structural skeleton of a nested structure, without leaf values
pub mod shape;

pub use self::nested::Nested;
pub use self::shape::{Child, Shape, ShapeIndex, ShapeNode};
