use flatnest::{FlatnestError, Nested, Order, flatten, nested, pattern, traverse};
use rstest::rstest;

fn deep_ladder() -> Nested<i32> {
    nested!([1, [2, 3, [4, 5, [6, 7], 8, 9], 10, 11], 12])
}

// --- TESTS TRAVERSAL OVER NESTED STRUCTURES ---

#[test]
fn test_dfs_traversal_yields_paths_and_values() {
    let structure = nested!([1, [2, 3], 4]);
    let pairs: Vec<_> = traverse(&structure, Order::DepthFirst).unwrap().collect();
    assert_eq!(
        pairs,
        vec![(vec![0], &1), (vec![1, 0], &2), (vec![1, 1], &3), (vec![2], &4)]
    );
}

#[test]
fn test_bfs_traversal_serves_shallow_leaves_first() {
    let structure = nested!([1, [2, 3], 4]);
    let pairs: Vec<_> = traverse(&structure, Order::BreadthFirst).unwrap().collect();
    assert_eq!(
        pairs,
        vec![(vec![0], &1), (vec![2], &4), (vec![1, 0], &2), (vec![1, 1], &3)]
    );
}

#[rstest]
#[case(Order::DepthFirst)]
#[case(Order::BreadthFirst)]
fn test_traversal_agrees_with_flatten(#[case] order: Order) {
    let structure = deep_ladder();
    let traversed: Vec<i32> = traverse(&structure, order).unwrap().map(|(_, v)| *v).collect();
    let flattened = flatten(structure, order).unwrap();
    assert_eq!(traversed, flattened.values);
}

#[rstest]
#[case(Order::DepthFirst)]
#[case(Order::BreadthFirst)]
fn test_traversal_paths_address_the_flat_positions(#[case] order: Order) {
    let structure = deep_ladder();
    let shape = flatten(structure.clone(), order).unwrap().shape;
    for (flat_index, (path, _)) in traverse(&structure, order).unwrap().enumerate() {
        assert_eq!(shape.nested_to_flat(order, &path).unwrap(), flat_index);
    }
}

#[test]
fn test_traversals_are_independent() {
    let structure = deep_ladder();
    let mut first = traverse(&structure, Order::DepthFirst).unwrap();
    first.next();
    first.next();

    // A second traversal starts from the beginning; the first is unaffected.
    let mut second = traverse(&structure, Order::DepthFirst).unwrap();
    assert_eq!(second.next(), Some((vec![0], &1)));
    assert_eq!(first.next(), Some((vec![1, 1], &3)));
}

#[test]
fn test_traversal_is_lazy() {
    let structure = deep_ladder();
    let mut iter = traverse(&structure, Order::BreadthFirst).unwrap();
    assert_eq!(iter.next(), Some((vec![0], &1)));
    assert_eq!(iter.next(), Some((vec![2], &12)));
    // Dropped here with ten leaves unvisited.
}

#[test]
fn test_traversal_of_empty_list_is_empty() {
    let structure = Nested::<i32>::List(Vec::new());
    assert_eq!(traverse(&structure, Order::DepthFirst).unwrap().count(), 0);
    assert_eq!(traverse(&structure, Order::BreadthFirst).unwrap().count(), 0);
}

#[test]
fn test_traversal_rejects_bare_leaf() {
    let result = traverse(&Nested::Leaf(7), Order::BreadthFirst);
    assert!(matches!(result, Err(FlatnestError::InvalidStructure { .. })));
}

// --- TESTS LEAF PATHS OVER SHAPES ---

#[rstest]
#[case(Order::DepthFirst, "1[2[2[2]2]2]1")]
#[case(Order::BreadthFirst, "1*1|2*2|2*2|2")]
fn test_leaf_paths_match_traversal(#[case] order: Order, #[case] pattern_str: &str) {
    let structure = deep_ladder();
    let shape = pattern::decode(pattern_str, order).unwrap();
    let from_shape: Vec<_> = shape.leaf_paths(order).collect();
    let from_structure: Vec<_> =
        traverse(&structure, order).unwrap().map(|(path, _)| path).collect();
    assert_eq!(from_shape, from_structure);
}

#[rstest]
#[case(Order::DepthFirst)]
#[case(Order::BreadthFirst)]
fn test_leaf_paths_match_index_mapping(#[case] order: Order) {
    let shape = flatten(deep_ladder(), order).unwrap().shape;
    for (flat_index, path) in shape.leaf_paths(order).enumerate() {
        assert_eq!(shape.flat_to_nested(order, flat_index).unwrap(), path);
    }
}

#[test]
fn test_leaf_paths_zip_with_stored_values() {
    let shape = pattern::decode("4*4|2", Order::BreadthFirst).unwrap();
    let flat = [0, 1, 2, 3, 6, 7, 8, 9, 4, 5];
    let pairs: Vec<_> = shape.leaf_paths(Order::BreadthFirst).zip(flat).collect();
    assert_eq!(pairs[0], (vec![0], 0));
    assert_eq!(pairs[8], (vec![4, 0], 4));
    assert_eq!(pairs[9], (vec![4, 1], 5));
}
