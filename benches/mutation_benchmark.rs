//! Benchmark for mutation and conversion throughput
//!
//! Trees are built wide (many root items) and deep (groups nested to the
//! editor's default depth limit) to mirror large saved filters.

use condition_tree_core::flat::{from_flat_json, to_flat, to_flat_json, to_nested};
use condition_tree_core::mutation::{
    add_group, add_leaf, remove_item, toggle_leaf_logic_operator, update_leaf_field, LeafKey,
};
use condition_tree_core::tree::{ConditionItem, Tree};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Build a tree with `width` root items; every fourth is a group nested three deep
fn create_test_tree(width: usize) -> Tree {
    let mut tree: Tree = Vec::new();
    for i in 0..width {
        if i % 4 == 3 {
            tree = add_group(&tree, &[]).expect("root is a group");
            tree = add_group(&tree, &[i]).expect("fresh group");
            tree = add_group(&tree, &[i, 1]).expect("fresh group");
            tree = add_leaf(&tree, &[i, 1, 1]).expect("fresh group");
        } else {
            tree = add_leaf(&tree, &[]).expect("root is a group");
        }
        tree = fill_first_leaf(tree, i);
    }
    tree
}

fn fill_first_leaf(tree: Tree, index: usize) -> Tree {
    let path: Vec<usize> = match &tree[index] {
        ConditionItem::Leaf(_) => vec![index],
        ConditionItem::Group(_) => vec![index, 0],
    };
    let tree = update_leaf_field(&tree, &path, LeafKey::Field, "price").expect("leaf");
    let tree = update_leaf_field(&tree, &path, LeafKey::Operator, "gt").expect("leaf");
    update_leaf_field(&tree, &path, LeafKey::Value, &index.to_string()).expect("leaf")
}

fn bench_mutations(c: &mut Criterion) {
    let tree = create_test_tree(200);

    c.bench_function("add_leaf_deep", |b| {
        b.iter(|| add_leaf(black_box(&tree), black_box(&[199, 1, 1])).unwrap())
    });

    c.bench_function("update_leaf_field", |b| {
        b.iter(|| {
            update_leaf_field(black_box(&tree), black_box(&[100]), LeafKey::Value, "42").unwrap()
        })
    });

    c.bench_function("toggle_leaf_logic", |b| {
        b.iter(|| toggle_leaf_logic_operator(black_box(&tree), black_box(&[199, 1, 1, 0])).unwrap())
    });

    c.bench_function("remove_item_root", |b| {
        b.iter(|| remove_item(black_box(&tree), black_box(&[0])).unwrap())
    });
}

fn bench_conversion(c: &mut Criterion) {
    let tree = create_test_tree(200);
    let flat = to_flat(&tree);
    let json = to_flat_json(&tree).unwrap();

    c.bench_function("to_flat", |b| b.iter(|| to_flat(black_box(&tree))));

    c.bench_function("to_nested", |b| b.iter(|| to_nested(black_box(&flat))));

    c.bench_function("from_flat_json", |b| {
        b.iter(|| from_flat_json(black_box(&json)).unwrap())
    });
}

criterion_group!(benches, bench_mutations, bench_conversion);
criterion_main!(benches);
