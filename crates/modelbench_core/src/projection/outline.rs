//! Outline projection: elements grouped by kind.
//!
//! # Responsibility
//! - Derive the outline tree shown next to the canvas.
//! - Resolve outline clicks back to store-owned elements.
//!
//! # Invariants
//! - Groups appear in first-occurrence order of their kind.
//! - Entries keep store insertion order inside a group.
//! - Entries borrow store elements; nothing is copied or cached.

use crate::model::element::{Element, ElementKind};

/// One kind folder in the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineGroup<'a> {
    pub kind: ElementKind,
    pub entries: Vec<&'a Element>,
}

impl OutlineGroup<'_> {
    /// Folder label; the kind name.
    pub fn label(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only grouping of a node collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline<'a> {
    groups: Vec<OutlineGroup<'a>>,
}

impl<'a> Outline<'a> {
    pub fn groups(&self) -> &[OutlineGroup<'a>] {
        &self.groups
    }

    pub fn group(&self, kind: ElementKind) -> Option<&OutlineGroup<'a>> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    /// Group kinds in display order.
    pub fn kinds(&self) -> Vec<ElementKind> {
        self.groups.iter().map(|group| group.kind).collect()
    }

    /// All entries, group by group.
    pub fn entries(&self) -> impl Iterator<Item = &'a Element> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.entries.iter().copied())
    }

    /// Total number of entries across groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(OutlineGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Resolves an entry id to the store-owned element it was built from.
    pub fn resolve(&self, id: &str) -> Option<&'a Element> {
        self.entries().find(|element| element.id == id)
    }
}

/// Groups `nodes` by kind.
pub fn project(nodes: &[Element]) -> Outline<'_> {
    let mut groups: Vec<OutlineGroup<'_>> = Vec::new();
    for node in nodes {
        match groups.iter_mut().find(|group| group.kind == node.kind) {
            Some(group) => group.entries.push(node),
            None => groups.push(OutlineGroup {
                kind: node.kind,
                entries: vec![node],
            }),
        }
    }
    Outline { groups }
}

#[cfg(test)]
mod tests {
    use super::project;

    #[test]
    fn empty_collection_projects_to_empty_outline() {
        let outline = project(&[]);
        assert!(outline.is_empty());
        assert_eq!(outline.len(), 0);
        assert!(outline.resolve("Block-0").is_none());
    }
}
