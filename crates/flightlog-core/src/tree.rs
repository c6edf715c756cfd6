//! Item tree utilities.
//!
//! Cloning is how templates become editable: every node of the copy gets a
//! fresh id, everything else is copied verbatim, so the copy shares no
//! identity with its source or with any other copy of it.

use std::collections::HashSet;

use crate::id::new_id;
use crate::model::{Item, ReportTemplate, Section, SectionTemplate};

/// Deep-clone an item sequence, assigning a fresh id to every node.
pub fn clone_items(items: &[Item]) -> Vec<Item> {
    items
        .iter()
        .map(|item| Item {
            id: new_id(),
            content: item.content.clone(),
            kind: item.kind,
            is_checked: item.is_checked,
            value: item.value.clone(),
            options: item.options.clone(),
            children: clone_items(&item.children),
        })
        .collect()
}

/// Stamp out an editable section from a template.
pub fn instantiate_section(template: &SectionTemplate) -> Section {
    Section {
        id: new_id(),
        title: template.title.clone(),
        items: clone_items(&template.items),
    }
}

/// Stamp out the full section sequence of a report template.
pub fn instantiate_report(template: &ReportTemplate) -> Vec<Section> {
    template.sections.iter().map(instantiate_section).collect()
}

/// Total number of items, descendants included.
pub fn count_items(items: &[Item]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_items(&item.children))
        .sum()
}

/// Depth of the deepest item (a flat list has depth 1, an empty one 0).
pub fn max_depth(items: &[Item]) -> usize {
    items
        .iter()
        .map(|item| 1 + max_depth(&item.children))
        .max()
        .unwrap_or(0)
}

/// Every item id in pre-order.
pub fn collect_ids(items: &[Item]) -> Vec<&str> {
    fn walk<'a>(items: &'a [Item], out: &mut Vec<&'a str>) {
        for item in items {
            out.push(&item.id);
            walk(&item.children, out);
        }
    }

    let mut out = Vec::new();
    walk(items, &mut out);
    out
}

/// Find an item anywhere in the tree.
pub fn find_item<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_item(&item.children, id) {
            return Some(found);
        }
    }
    None
}

/// Ids that occur more than once across sections and their item trees.
///
/// A well-formed report returns an empty list.
pub fn duplicate_ids(sections: &[Section]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    let all_ids = sections.iter().flat_map(|section| {
        std::iter::once(section.id.as_str()).chain(collect_ids(&section.items))
    });
    for id in all_ids {
        if !seen.insert(id) && !duplicates.iter().any(|d: &String| d == id) {
            duplicates.push(id.to_string());
        }
    }
    duplicates
}
