//! Building nested category trees from flat snapshots.
//!
//! The store hands back a flat collection of categories with parent
//! pointers. Trees are assembled per read from a parent -> children index
//! and never stored, so there are no back-references to keep in sync.

use std::collections::HashMap;

use super::model::{Category, CategoryNode};
use crate::types::DbId;

/// Sort siblings by display order, then name.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
}

/// Build the subtree rooted at `root_parent_id` (`None` builds the whole
/// forest of root categories).
///
/// The input is sorted by `(order, name)` first, so sibling order is the
/// same at every level regardless of how the snapshot was loaded. Runs in
/// O(n): children are grouped by parent in a single pass, then assembled
/// top-down.
pub fn build_tree(categories: &[Category], root_parent_id: Option<DbId>) -> Vec<CategoryNode> {
    let mut sorted = categories.to_vec();
    sort_categories(&mut sorted);

    let mut children: HashMap<Option<DbId>, Vec<&Category>> = HashMap::new();
    for category in &sorted {
        children.entry(category.parent_id).or_default().push(category);
    }

    assemble(&children, root_parent_id)
}

fn assemble(
    children: &HashMap<Option<DbId>, Vec<&Category>>,
    parent_id: Option<DbId>,
) -> Vec<CategoryNode> {
    children
        .get(&parent_id)
        .map(|siblings| {
            siblings
                .iter()
                .map(|category| CategoryNode {
                    category: (*category).clone(),
                    children: assemble(children, Some(category.id)),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Reference tree builder: filters the full collection once per node.
///
/// O(n^2). Kept as the baseline `build_tree` is checked against.
pub fn build_tree_naive(
    categories: &[Category],
    root_parent_id: Option<DbId>,
) -> Vec<CategoryNode> {
    let mut sorted = categories.to_vec();
    sort_categories(&mut sorted);
    naive_level(&sorted, root_parent_id)
}

fn naive_level(sorted: &[Category], parent_id: Option<DbId>) -> Vec<CategoryNode> {
    sorted
        .iter()
        .filter(|category| category.parent_id == parent_id)
        .map(|category| CategoryNode {
            category: category.clone(),
            children: naive_level(sorted, Some(category.id)),
        })
        .collect()
}

/// Pre-order flatten of a forest back into plain categories.
pub fn flatten_tree(nodes: &[CategoryNode]) -> Vec<Category> {
    let mut out = Vec::new();
    let mut stack: Vec<&CategoryNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node.category.clone());
        stack.extend(node.children.iter().rev());
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn cat(id: DbId, name: &str, parent_id: Option<DbId>, order: i32) -> Category {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Category {
            id,
            name: name.to_string(),
            description: None,
            parent_id,
            order,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample() -> Vec<Category> {
        vec![
            cat(1, "Work", None, 1),
            cat(2, "Personal", None, 0),
            cat(3, "Meetings", Some(1), 0),
            cat(4, "Archive", Some(1), 0),
            cat(5, "2024", Some(3), 2),
            cat(6, "2023", Some(3), 2),
            cat(7, "Recipes", Some(2), 0),
        ]
    }

    fn names(nodes: &[CategoryNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.category.name.as_str()).collect()
    }

    #[test]
    fn roots_sorted_by_order_then_name() {
        let tree = build_tree(&sample(), None);
        assert_eq!(names(&tree), vec!["Personal", "Work"]);
    }

    #[test]
    fn siblings_sorted_at_every_level() {
        let tree = build_tree(&sample(), None);
        let work = &tree[1];
        assert_eq!(names(&work.children), vec!["Archive", "Meetings"]);
        let meetings = &work.children[1];
        assert_eq!(names(&meetings.children), vec!["2023", "2024"]);
    }

    #[test]
    fn subtree_from_non_root_parent() {
        let tree = build_tree(&sample(), Some(3));
        assert_eq!(names(&tree), vec!["2023", "2024"]);
        assert!(tree.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        assert!(build_tree(&[], None).is_empty());
    }

    #[test]
    fn indexed_builder_matches_naive_builder() {
        let data = sample();
        assert_eq!(build_tree(&data, None), build_tree_naive(&data, None));
        assert_eq!(build_tree(&data, Some(1)), build_tree_naive(&data, Some(1)));
    }

    #[test]
    fn indexed_builder_matches_naive_on_wide_input() {
        let mut data = Vec::new();
        for i in 1..=60 {
            let parent = if i <= 5 { None } else { Some((i % 5) + 1) };
            data.push(cat(i, &format!("c{:02}", 60 - i), parent, (i % 3) as i32));
        }
        assert_eq!(build_tree(&data, None), build_tree_naive(&data, None));
    }

    #[test]
    fn flatten_then_resort_round_trips() {
        let data = sample();
        let mut flattened = flatten_tree(&build_tree(&data, None));
        sort_categories(&mut flattened);

        let mut expected = data.clone();
        sort_categories(&mut expected);
        assert_eq!(flattened, expected);
    }

    #[test]
    fn flatten_is_pre_order() {
        let flattened = flatten_tree(&build_tree(&sample(), None));
        let order: Vec<DbId> = flattened.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![2, 7, 1, 4, 3, 6, 5]);
    }

    #[test]
    fn dangling_parent_is_unreachable_from_roots() {
        let data = vec![cat(1, "A", None, 0), cat(3, "C", Some(2), 0)];
        let flattened = flatten_tree(&build_tree(&data, None));
        assert_eq!(flattened.len(), 1);
        assert_eq!(flattened[0].id, 1);
    }
}
