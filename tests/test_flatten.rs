use flatnest::{FlatnestError, Nested, Order, flatten, nested, unflatten};
use flatnest::flatten::unflatten_shape;
use flatnest::pattern;
use rstest::rstest;

fn ragged() -> Nested<i32> {
    nested!([0, 1, 2, 3, [4, 5], 6, 7, 8, 9])
}

fn deep_ladder() -> Nested<i32> {
    nested!([1, [2, 3, [4, 5, [6, 7], 8, 9], 10, 11], 12])
}

// --- TESTS FLATTEN ---

#[test]
fn test_flatten_dfs_keeps_document_order() {
    let result = flatten(ragged(), Order::DepthFirst).unwrap();
    assert_eq!(result.pattern, "4[2]4");
    assert_eq!(result.values, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(result.shape.num_leaves(), 10);
    assert_eq!(result.shape.num_sublists(), 1);
}

#[test]
fn test_flatten_bfs_serves_shallow_leaves_first() {
    let result = flatten(ragged(), Order::BreadthFirst).unwrap();
    assert_eq!(result.pattern, "4*4|2");
    assert_eq!(result.values, vec![0, 1, 2, 3, 6, 7, 8, 9, 4, 5]);
}

#[test]
fn test_flatten_deep_ladder_both_orders() {
    let dfs = flatten(deep_ladder(), Order::DepthFirst).unwrap();
    assert_eq!(dfs.pattern, "1[2[2[2]2]2]1");
    assert_eq!(dfs.values, (1..=12).collect::<Vec<_>>());

    let bfs = flatten(deep_ladder(), Order::BreadthFirst).unwrap();
    assert_eq!(bfs.pattern, "1*1|2*2|2*2|2");
    assert_eq!(bfs.values, vec![1, 12, 2, 3, 10, 11, 4, 5, 8, 9, 6, 7]);
}

#[test]
fn test_flatten_shape_matches_decoded_pattern() {
    for order in [Order::DepthFirst, Order::BreadthFirst] {
        let result = flatten(deep_ladder(), order).unwrap();
        assert_eq!(result.shape, pattern::decode(&result.pattern, order).unwrap());
    }
}

#[test]
fn test_flatten_empty_list() {
    let result = flatten(Nested::<i32>::List(Vec::new()), Order::DepthFirst).unwrap();
    assert_eq!(result.pattern, "");
    assert!(result.values.is_empty());
}

#[test]
fn test_flatten_empty_sublist() {
    let result = flatten(nested!(['a', [], 'b']), Order::DepthFirst).unwrap();
    assert_eq!(result.pattern, "1[]1");
    assert_eq!(result.values, vec!['a', 'b']);

    let result = flatten(nested!(['a', [], 'b']), Order::BreadthFirst).unwrap();
    assert_eq!(result.pattern, "1*1|");
    assert_eq!(result.values, vec!['a', 'b']);
}

#[test]
fn test_flatten_rejects_bare_leaf() {
    let result = flatten(Nested::Leaf(42), Order::DepthFirst);
    assert!(matches!(result, Err(FlatnestError::InvalidStructure { .. })));
}

// --- TESTS UNFLATTEN ---

#[test]
fn test_unflatten_dfs() {
    let rebuilt = unflatten("4[2]4", (0..10).collect(), Order::DepthFirst).unwrap();
    assert_eq!(rebuilt, ragged());
}

#[test]
fn test_unflatten_bfs() {
    let rebuilt =
        unflatten("4*4|2", vec![0, 1, 2, 3, 6, 7, 8, 9, 4, 5], Order::BreadthFirst).unwrap();
    assert_eq!(rebuilt, ragged());
}

#[test]
fn test_unflatten_bfs_deep_ladder() {
    let values = vec![1, 12, 2, 3, 10, 11, 4, 5, 8, 9, 6, 7];
    let rebuilt = unflatten("1*1|2*2|2*2|2", values, Order::BreadthFirst).unwrap();
    assert_eq!(rebuilt, deep_ladder());
}

#[test]
fn test_unflatten_empty_pattern() {
    let rebuilt = unflatten::<i32>("", Vec::new(), Order::BreadthFirst).unwrap();
    assert_eq!(rebuilt, Nested::List(Vec::new()));
}

#[rstest]
#[case(9)]
#[case(11)]
#[case(0)]
fn test_unflatten_rejects_wrong_value_count(#[case] count: usize) {
    let result = unflatten("4[2]4", (0..count).collect(), Order::DepthFirst);
    assert_eq!(result, Err(FlatnestError::LengthMismatch { expected: 10, actual: count }));
}

#[test]
fn test_unflatten_shape_skips_reparsing() {
    let shape = pattern::decode("4[2]4", Order::DepthFirst).unwrap();
    let rebuilt = unflatten_shape(&shape, (0..10).collect(), Order::DepthFirst).unwrap();
    assert_eq!(rebuilt, ragged());
}

#[test]
fn test_unflatten_propagates_pattern_errors() {
    let result = unflatten("4[2", (0..6).collect::<Vec<i32>>(), Order::DepthFirst);
    assert!(matches!(result, Err(FlatnestError::PatternSyntax { .. })));
}

// --- TESTS ROUND-TRIPS ---

#[rstest]
#[case(Order::DepthFirst)]
#[case(Order::BreadthFirst)]
fn test_round_trip_preserves_structure(#[case] order: Order) {
    let structure = nested!([[1, [2]], 3, [], [4, [5, 6, [7]]], 8]);
    let result = flatten(structure.clone(), order).unwrap();
    let rebuilt = unflatten(&result.pattern, result.values, order).unwrap();
    assert_eq!(rebuilt, structure);
}

#[test]
fn test_cross_order_flattenings_describe_the_same_structure() {
    let dfs = flatten(deep_ladder(), Order::DepthFirst).unwrap();
    let bfs = flatten(deep_ladder(), Order::BreadthFirst).unwrap();
    assert_eq!(dfs.shape, bfs.shape);
    assert_eq!(dfs.values.len(), bfs.values.len());
}

#[test]
fn test_owned_values_move_through_a_round_trip() {
    let (a, b, c) = (String::from("a"), String::from("b"), String::from("c"));
    let structure = nested!([a, [b], c]);
    let result = flatten(structure.clone(), Order::BreadthFirst).unwrap();
    assert_eq!(result.values, vec!["a".to_string(), "c".to_string(), "b".to_string()]);
    let rebuilt = unflatten(&result.pattern, result.values, Order::BreadthFirst).unwrap();
    assert_eq!(rebuilt, structure);
}

// --- TESTS DEEP INPUT ---

/// A singly-nested chain `[[[...[0]...]]]` of the given depth.
fn deep_chain(depth: usize) -> Nested<u8> {
    let mut structure = Nested::List(vec![Nested::Leaf(0)]);
    for _ in 0..depth {
        structure = Nested::List(vec![structure]);
    }
    structure
}

#[rstest]
#[case(Order::DepthFirst)]
#[case(Order::BreadthFirst)]
fn test_deep_nesting_does_not_overflow_the_stack(#[case] order: Order) {
    let depth = 4096;
    let result = flatten(deep_chain(depth), order).unwrap();
    assert_eq!(result.shape.num_sublists(), depth);
    assert_eq!(result.shape.depth(), depth);
    assert_eq!(result.values, vec![0]);

    let shape = pattern::decode(&result.pattern, order).unwrap();
    assert_eq!(shape.depth(), depth);
    let path = shape.flat_to_nested(order, 0).unwrap();
    assert_eq!(path.len(), depth + 1);
    assert_eq!(shape.nested_to_flat(order, &path).unwrap(), 0);
}
