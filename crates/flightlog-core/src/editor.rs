//! Section and item mutation engine.
//!
//! Every operation takes the current section sequence by reference and
//! returns a new one; the input is never modified. Callers hold on to the
//! latest returned sequence, which makes each edit atomic for anyone still
//! reading the previous one.
//!
//! Unknown section or item ids and out-of-range indices are no-ops: the
//! input is returned unchanged. Drag-and-drop coordinates can be stale by
//! the time they arrive, and a stale move must not corrupt the sequence.
//!
//! `delete_item` and `update_item` only look at a section's top-level
//! items, never into `children`.

use tracing::debug;

use crate::id::Id;
use crate::model::{Item, ItemKind, ReportTemplate, Section, SectionTemplate};
use crate::tree::{instantiate_report, instantiate_section};

/// Title prefix for sections created without an explicit title.
pub const DEFAULT_SECTION_TITLE: &str = "New section";

/// Content prefix for items created by [`add_item`].
pub const DEFAULT_ITEM_CONTENT: &str = "New item";

/// Partial update for an item; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub content: Option<String>,
    pub is_checked: Option<bool>,
    pub kind: Option<ItemKind>,
    pub value: Option<String>,
    pub options: Option<Vec<String>>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn checked(mut self, is_checked: bool) -> Self {
        self.is_checked = Some(is_checked);
        self
    }

    pub fn kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_to(&self, item: &Item) -> Item {
        Item {
            id: item.id.clone(),
            content: self.content.clone().unwrap_or_else(|| item.content.clone()),
            kind: self.kind.unwrap_or(item.kind),
            is_checked: self.is_checked.unwrap_or(item.is_checked),
            value: self.value.clone().or_else(|| item.value.clone()),
            options: self.options.clone().unwrap_or_else(|| item.options.clone()),
            children: item.children.clone(),
        }
    }
}

/// A single edit, described as data.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionEdit {
    AddSection {
        title: Option<String>,
    },
    AddSectionFromTemplate(SectionTemplate),
    DeleteSection {
        section_id: Id,
    },
    RenameSection {
        section_id: Id,
        title: String,
    },
    ReorderSections {
        from: usize,
        to: usize,
    },
    AddItem {
        section_id: Id,
        kind: ItemKind,
    },
    DeleteItem {
        section_id: Id,
        item_id: Id,
    },
    UpdateItem {
        section_id: Id,
        item_id: Id,
        patch: ItemPatch,
    },
    MoveItem {
        source_section_id: Id,
        source_index: usize,
        dest_section_id: Id,
        dest_index: usize,
    },
}

/// Apply one edit and return the resulting sequence.
pub fn apply_edit(sections: &[Section], edit: &SectionEdit) -> Vec<Section> {
    match edit {
        SectionEdit::AddSection { title } => add_section(sections, title.as_deref()),
        SectionEdit::AddSectionFromTemplate(template) => {
            add_section_from_template(sections, template)
        }
        SectionEdit::DeleteSection { section_id } => delete_section(sections, section_id),
        SectionEdit::RenameSection { section_id, title } => {
            rename_section(sections, section_id, title)
        }
        SectionEdit::ReorderSections { from, to } => reorder_sections(sections, *from, *to),
        SectionEdit::AddItem { section_id, kind } => add_item(sections, section_id, *kind),
        SectionEdit::DeleteItem {
            section_id,
            item_id,
        } => delete_item(sections, section_id, item_id),
        SectionEdit::UpdateItem {
            section_id,
            item_id,
            patch,
        } => update_item(sections, section_id, item_id, patch),
        SectionEdit::MoveItem {
            source_section_id,
            source_index,
            dest_section_id,
            dest_index,
        } => move_item(
            sections,
            source_section_id,
            *source_index,
            dest_section_id,
            *dest_index,
        ),
    }
}

/// Append an empty section. Without a title it is named after its
/// 1-based position at creation time.
pub fn add_section(sections: &[Section], title: Option<&str>) -> Vec<Section> {
    let title = match title {
        Some(title) => title.to_string(),
        None => format!("{} {}", DEFAULT_SECTION_TITLE, sections.len() + 1),
    };
    let mut next = sections.to_vec();
    next.push(Section::new(title));
    next
}

/// Append a fresh copy of a section template.
pub fn add_section_from_template(sections: &[Section], template: &SectionTemplate) -> Vec<Section> {
    let mut next = sections.to_vec();
    next.push(instantiate_section(template));
    next
}

/// Replace the whole sequence with a fresh copy of a report template.
pub fn replace_with_template(template: &ReportTemplate) -> Vec<Section> {
    instantiate_report(template)
}

pub fn delete_section(sections: &[Section], section_id: &str) -> Vec<Section> {
    if !sections.iter().any(|s| s.id == section_id) {
        debug!(section_id, "delete_section: section not found; ignoring");
    }
    sections
        .iter()
        .filter(|s| s.id != section_id)
        .cloned()
        .collect()
}

pub fn rename_section(sections: &[Section], section_id: &str, title: &str) -> Vec<Section> {
    map_section(sections, section_id, "rename_section", |section| Section {
        title: title.to_string(),
        ..section.clone()
    })
}

/// Move the section at `from` so that it ends up at index `to`.
pub fn reorder_sections(sections: &[Section], from: usize, to: usize) -> Vec<Section> {
    if from >= sections.len() || to >= sections.len() {
        debug!(
            from,
            to,
            len = sections.len(),
            "reorder_sections: index out of range; ignoring"
        );
        return sections.to_vec();
    }
    let mut next = sections.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    next
}

/// Append a new unchecked item, named after its 1-based position.
pub fn add_item(sections: &[Section], section_id: &str, kind: ItemKind) -> Vec<Section> {
    map_section(sections, section_id, "add_item", |section| {
        let mut items = section.items.clone();
        items.push(Item::new(
            format!("{} {}", DEFAULT_ITEM_CONTENT, section.items.len() + 1),
            kind,
        ));
        Section {
            items,
            ..section.clone()
        }
    })
}

/// Remove a top-level item from a section.
pub fn delete_item(sections: &[Section], section_id: &str, item_id: &str) -> Vec<Section> {
    map_section(sections, section_id, "delete_item", |section| {
        if !section.items.iter().any(|item| item.id == item_id) {
            debug!(section_id, item_id, "delete_item: no top-level item; ignoring");
        }
        Section {
            items: section
                .items
                .iter()
                .filter(|item| item.id != item_id)
                .cloned()
                .collect(),
            ..section.clone()
        }
    })
}

/// Merge `patch` into a top-level item of a section.
pub fn update_item(
    sections: &[Section],
    section_id: &str,
    item_id: &str,
    patch: &ItemPatch,
) -> Vec<Section> {
    map_section(sections, section_id, "update_item", |section| {
        if !section.items.iter().any(|item| item.id == item_id) {
            debug!(section_id, item_id, "update_item: no top-level item; ignoring");
        }
        Section {
            items: section
                .items
                .iter()
                .map(|item| {
                    if item.id == item_id {
                        patch.apply_to(item)
                    } else {
                        item.clone()
                    }
                })
                .collect(),
            ..section.clone()
        }
    })
}

/// Move a top-level item within a section or across sections.
///
/// `dest_index` is a position in the destination list as it looks after the
/// item has been taken out, so it may equal that list's length (append).
pub fn move_item(
    sections: &[Section],
    source_section_id: &str,
    source_index: usize,
    dest_section_id: &str,
    dest_index: usize,
) -> Vec<Section> {
    let source_pos = sections.iter().position(|s| s.id == source_section_id);
    let dest_pos = sections.iter().position(|s| s.id == dest_section_id);
    let (Some(source_pos), Some(dest_pos)) = (source_pos, dest_pos) else {
        debug!(
            source_section_id,
            dest_section_id, "move_item: section not found; ignoring"
        );
        return sections.to_vec();
    };

    let source_len = sections[source_pos].items.len();
    let dest_len_after_take = if source_pos == dest_pos {
        source_len.saturating_sub(1)
    } else {
        sections[dest_pos].items.len()
    };
    if source_index >= source_len || dest_index > dest_len_after_take {
        debug!(
            source_index,
            dest_index, source_len, "move_item: index out of range; ignoring"
        );
        return sections.to_vec();
    }

    let mut next = sections.to_vec();
    let moved = next[source_pos].items.remove(source_index);
    next[dest_pos].items.insert(dest_index, moved);
    next
}

/// Rebuild the sequence with one section replaced; unknown ids are a no-op.
fn map_section<F>(sections: &[Section], section_id: &str, op: &str, f: F) -> Vec<Section>
where
    F: FnOnce(&Section) -> Section,
{
    let Some(index) = sections.iter().position(|s| s.id == section_id) else {
        debug!(op, section_id, "section not found; ignoring");
        return sections.to_vec();
    };
    let mut next = sections.to_vec();
    next[index] = f(&sections[index]);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, items: &[&str]) -> Section {
        Section {
            id: format!("sec-{}", title),
            title: title.to_string(),
            items: items
                .iter()
                .map(|content| Item {
                    id: format!("item-{}", content),
                    ..Item::checkbox(*content)
                })
                .collect(),
        }
    }

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    fn contents(section: &Section) -> Vec<&str> {
        section.items.iter().map(|i| i.content.as_str()).collect()
    }

    #[test]
    fn test_add_section_default_title_uses_ordinal() {
        let sections = vec![section("A", &[])];
        let next = add_section(&sections, None);
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].title, "New section 2");
        assert!(next[1].items.is_empty());
        assert_eq!(sections.len(), 1, "input must be untouched");
    }

    #[test]
    fn test_add_section_with_title() {
        let next = add_section(&[], Some("Post-flight"));
        assert_eq!(titles(&next), vec!["Post-flight"]);
    }

    #[test]
    fn test_add_section_from_template_clones_items() {
        let template = SectionTemplate {
            id: "section-1".to_string(),
            title: "Prep".to_string(),
            items: vec![Item::checkbox("Charge").with_children(vec![Item::checkbox("Packs")])],
        };
        let next = add_section_from_template(&[], &template);
        assert_eq!(next[0].title, "Prep");
        assert_ne!(next[0].id, template.id);
        assert_ne!(next[0].items[0].id, template.items[0].id);
        assert_ne!(
            next[0].items[0].children[0].id,
            template.items[0].children[0].id
        );
    }

    #[test]
    fn test_delete_section_missing_is_noop() {
        let sections = vec![section("A", &["a"]), section("B", &[])];
        assert_eq!(delete_section(&sections, "nope"), sections);
        assert_eq!(titles(&delete_section(&sections, "sec-A")), vec!["B"]);
    }

    #[test]
    fn test_rename_section() {
        let sections = vec![section("A", &["a"])];
        let next = rename_section(&sections, "sec-A", "Checks");
        assert_eq!(next[0].title, "Checks");
        assert_eq!(next[0].id, "sec-A");
        assert_eq!(next[0].items, sections[0].items);
    }

    #[test]
    fn test_reorder_sections_forward() {
        let sections = vec![section("A", &[]), section("B", &[]), section("C", &[])];
        let next = reorder_sections(&sections, 0, 2);
        assert_eq!(titles(&next), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_sections_backward() {
        let sections = vec![section("A", &[]), section("B", &[]), section("C", &[])];
        let next = reorder_sections(&sections, 2, 0);
        assert_eq!(titles(&next), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_reorder_same_index_is_identity() {
        let sections = vec![section("A", &["a"]), section("B", &["b"])];
        assert_eq!(reorder_sections(&sections, 1, 1), sections);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let sections = vec![section("A", &[]), section("B", &[])];
        assert_eq!(reorder_sections(&sections, 0, 2), sections);
        assert_eq!(reorder_sections(&sections, 5, 0), sections);
    }

    #[test]
    fn test_add_item_defaults() {
        let sections = vec![section("A", &["a"])];
        let next = add_item(&sections, "sec-A", ItemKind::Number);
        let added = &next[0].items[1];
        assert_eq!(added.content, "New item 2");
        assert_eq!(added.kind, ItemKind::Number);
        assert!(!added.is_checked);
        assert!(added.value.is_none());
    }

    #[test]
    fn test_add_item_unknown_section_is_noop() {
        let sections = vec![section("A", &["a"])];
        assert_eq!(add_item(&sections, "sec-Z", ItemKind::Checkbox), sections);
    }

    #[test]
    fn test_update_item_only_touches_target() {
        let sections = vec![section("S", &["a", "b"])];
        let next = update_item(&sections, "sec-S", "item-b", &ItemPatch::new().checked(true));

        assert_eq!(next[0].items[0], sections[0].items[0]);
        assert!(next[0].items[1].is_checked);
        assert_eq!(next[0].items[1].id, "item-b");
        assert_eq!(contents(&next[0]), vec!["a", "b"]);
    }

    #[test]
    fn test_update_item_merges_fields() {
        let sections = vec![section("S", &["a"])];
        let patch = ItemPatch::new()
            .kind(ItemKind::Select)
            .options(vec!["yes".to_string(), "no".to_string()])
            .value("yes");
        let next = update_item(&sections, "sec-S", "item-a", &patch);
        let item = &next[0].items[0];
        assert_eq!(item.content, "a");
        assert_eq!(item.kind, ItemKind::Select);
        assert_eq!(item.value.as_deref(), Some("yes"));
        assert_eq!(item.options.len(), 2);
    }

    #[test]
    fn test_update_and_delete_do_not_reach_children() {
        let mut sections = vec![section("S", &["parent"])];
        let child = Item {
            id: "item-child".to_string(),
            ..Item::checkbox("child")
        };
        sections[0].items[0].children.push(child);

        let updated = update_item(&sections, "sec-S", "item-child", &ItemPatch::new().checked(true));
        assert_eq!(updated, sections);

        let deleted = delete_item(&sections, "sec-S", "item-child");
        assert_eq!(deleted, sections);
        assert_eq!(deleted[0].items[0].children.len(), 1);
    }

    #[test]
    fn test_delete_item() {
        let sections = vec![section("S", &["a", "b", "c"])];
        let next = delete_item(&sections, "sec-S", "item-b");
        assert_eq!(contents(&next[0]), vec!["a", "c"]);
    }

    #[test]
    fn test_move_item_across_sections() {
        let sections = vec![section("X", &["x1", "x2"]), section("Y", &["y1", "y2"])];
        let next = move_item(&sections, "sec-X", 0, "sec-Y", 1);
        assert_eq!(contents(&next[0]), vec!["x2"]);
        assert_eq!(contents(&next[1]), vec!["y1", "x1", "y2"]);
        assert_eq!(next[1].items[1].id, "item-x1");
    }

    #[test]
    fn test_move_item_within_section() {
        let sections = vec![section("S", &["a", "b", "c"])];
        let next = move_item(&sections, "sec-S", 0, "sec-S", 2);
        assert_eq!(contents(&next[0]), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_item_to_end_of_other_section() {
        let sections = vec![section("X", &["x1"]), section("Y", &["y1"])];
        let next = move_item(&sections, "sec-X", 0, "sec-Y", 1);
        assert!(next[0].items.is_empty());
        assert_eq!(contents(&next[1]), vec!["y1", "x1"]);
    }

    #[test]
    fn test_move_item_out_of_range_is_noop() {
        let sections = vec![section("X", &["x1"]), section("Y", &["y1"])];
        assert_eq!(move_item(&sections, "sec-X", 3, "sec-Y", 0), sections);
        assert_eq!(move_item(&sections, "sec-X", 0, "sec-Y", 5), sections);
        assert_eq!(move_item(&sections, "sec-X", 0, "sec-X", 1), sections);
        assert_eq!(move_item(&sections, "sec-Q", 0, "sec-Y", 0), sections);
    }

    #[test]
    fn test_apply_edit_dispatch() {
        let sections = vec![section("A", &["a"]), section("B", &[])];
        let edit = SectionEdit::MoveItem {
            source_section_id: "sec-A".to_string(),
            source_index: 0,
            dest_section_id: "sec-B".to_string(),
            dest_index: 0,
        };
        let next = apply_edit(&sections, &edit);
        assert!(next[0].items.is_empty());
        assert_eq!(contents(&next[1]), vec!["a"]);

        let renamed = apply_edit(
            &next,
            &SectionEdit::RenameSection {
                section_id: "sec-B".to_string(),
                title: "Done".to_string(),
            },
        );
        assert_eq!(titles(&renamed), vec!["A", "Done"]);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ItemPatch::new().is_empty());
        assert!(!ItemPatch::new().content("x").is_empty());
    }
}
