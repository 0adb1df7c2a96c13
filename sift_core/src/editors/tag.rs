//! Hierarchical tag picker with lazy child loading

use std::collections::HashMap;

use crate::errors::{ConfigError, TagLookupError};
use crate::filter::{FilterConfig, FilterKind, TagNode, TagResource};

/// A lookup request against a tag source.
#[derive(Debug, Clone, PartialEq)]
pub struct TagQuery {
    pub resource: TagResource,
    pub search: Option<String>,
    pub facility: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

impl TagQuery {
    pub fn new(resource: TagResource) -> Self {
        Self {
            resource,
            search: None,
            facility: None,
            page: 0,
            page_size: 25,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = Some(facility.into());
        self
    }
}

/// One page of a tag lookup result.
#[derive(Debug, Clone, PartialEq)]
pub struct TagPage {
    pub items: Vec<TagNode>,
    pub total: usize,
}

/// The tag lookup collaborator: root-level tags of a resource plus lazily
/// fetched children of a group.
pub trait TagSource {
    fn roots(&self, query: &TagQuery) -> Result<TagPage, TagLookupError>;
    fn children(&self, query: &TagQuery, parent: &str) -> Result<TagPage, TagLookupError>;
}

/// In-memory tag source for tests and demo clients.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagSource {
    nodes: Vec<TagNode>,
}

impl InMemoryTagSource {
    pub fn new(nodes: Vec<TagNode>) -> Self {
        Self { nodes }
    }

    fn page_of(nodes: Vec<TagNode>, query: &TagQuery) -> TagPage {
        let total = nodes.len();
        let start = query.page * query.page_size;
        let items = nodes
            .into_iter()
            .skip(start)
            .take(query.page_size)
            .collect();
        TagPage { items, total }
    }

    fn matches_search(node: &TagNode, search: Option<&str>) -> bool {
        match search {
            Some(needle) => node
                .display
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

impl TagSource for InMemoryTagSource {
    fn roots(&self, query: &TagQuery) -> Result<TagPage, TagLookupError> {
        let nodes: Vec<TagNode> = self
            .nodes
            .iter()
            .filter(|node| node.parent.is_none())
            .filter(|node| Self::matches_search(node, query.search.as_deref()))
            .cloned()
            .collect();
        Ok(Self::page_of(nodes, query))
    }

    fn children(&self, query: &TagQuery, parent: &str) -> Result<TagPage, TagLookupError> {
        let nodes: Vec<TagNode> = self
            .nodes
            .iter()
            .filter(|node| node.parent.as_deref() == Some(parent))
            .cloned()
            .collect();
        Ok(Self::page_of(nodes, query))
    }
}

/// A group row with its computed interactivity.
#[derive(Debug, Clone, PartialEq)]
pub struct TagGroupRow {
    pub node: TagNode,
    /// All loaded children are already selected, so re-expanding the group
    /// could only produce redundant selections
    pub disabled: bool,
}

/// The visible tag set partitioned into its three render buckets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagSections {
    pub selected: Vec<TagNode>,
    pub groups: Vec<TagGroupRow>,
    pub leaves: Vec<TagNode>,
}

/// Headless tag picker over a tag source.
///
/// Roots are fetched on refresh; children of a group only when it is first
/// expanded. Fetch failures leave previously loaded state intact.
pub struct TagEditor<S: TagSource> {
    source: S,
    query: TagQuery,
    roots: Vec<TagNode>,
    children: HashMap<String, Vec<TagNode>>,
}

impl<S: TagSource> TagEditor<S> {
    pub fn new(filter: &FilterConfig, source: S) -> Result<Self, ConfigError> {
        match &filter.kind {
            FilterKind::Tag { resource } => Ok(Self {
                source,
                query: TagQuery::new(resource.clone()),
                roots: Vec::new(),
                children: HashMap::new(),
            }),
            _ => Err(ConfigError::KindMismatch {
                key: filter.key.clone(),
                expected: "tag".to_string(),
            }),
        }
    }

    /// Scope lookups to a facility.
    pub fn set_facility(&mut self, facility: impl Into<String>) {
        self.query.facility = Some(facility.into());
    }

    /// Fetch the current page of root tags.
    pub fn refresh(&mut self) -> Result<(), TagLookupError> {
        let page = self.source.roots(&self.query)?;
        self.roots = page.items;
        Ok(())
    }

    /// Update the search text and refetch roots.
    pub fn set_search(&mut self, search: impl Into<String>) -> Result<(), TagLookupError> {
        let search = search.into();
        self.query.search = if search.is_empty() { None } else { Some(search) };
        self.query.page = 0;
        self.refresh()
    }

    pub fn roots(&self) -> &[TagNode] {
        &self.roots
    }

    /// Children of a group, fetching them on first expansion.
    pub fn expand(&mut self, group_id: &str) -> Result<&[TagNode], TagLookupError> {
        let is_group = self
            .roots
            .iter()
            .chain(self.children.values().flatten())
            .any(|node| node.id == group_id && node.has_children);
        if !is_group {
            return Err(TagLookupError::NotAGroup {
                id: group_id.to_string(),
            });
        }

        if !self.children.contains_key(group_id) {
            let page = self.source.children(&self.query, group_id)?;
            self.children.insert(group_id.to_string(), page.items);
        }
        Ok(&self.children[group_id])
    }

    /// Whether every loaded child of a group is already selected. Groups
    /// whose children were never loaded report false.
    pub fn all_children_selected(&self, group_id: &str, selected: &[TagNode]) -> bool {
        match self.children.get(group_id) {
            Some(children) if !children.is_empty() => children
                .iter()
                .all(|child| selected.iter().any(|tag| tag.id == child.id)),
            _ => false,
        }
    }

    /// Partition the visible set: selected tags first, then groups, then the
    /// remaining leaves.
    pub fn sections(&self, selected: &[TagNode]) -> TagSections {
        let is_selected = |node: &TagNode| selected.iter().any(|tag| tag.id == node.id);

        let groups = self
            .roots
            .iter()
            .filter(|node| node.has_children)
            .map(|node| TagGroupRow {
                node: node.clone(),
                disabled: self.all_children_selected(&node.id, selected),
            })
            .collect();

        let leaves = self
            .roots
            .iter()
            .filter(|node| !node.has_children && !is_selected(node))
            .cloned()
            .collect();

        TagSections {
            selected: selected.to_vec(),
            groups,
            leaves,
        }
    }

    /// Toggle a leaf tag's membership in the selection by id. Group tags are
    /// not directly selectable and leave the selection unchanged.
    pub fn toggle(&self, selected: &[TagNode], node: &TagNode) -> Vec<TagNode> {
        if node.has_children {
            log::debug!("group tag '{}' is not directly selectable", node.id);
            return selected.to_vec();
        }

        if selected.iter().any(|tag| tag.id == node.id) {
            selected
                .iter()
                .filter(|tag| tag.id != node.id)
                .cloned()
                .collect()
        } else {
            let mut next = selected.to_vec();
            next.push(node.clone());
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterConfig;
    use assert_matches::assert_matches;

    fn ward_source() -> InMemoryTagSource {
        InMemoryTagSource::new(vec![
            TagNode::group("wards", "Wards"),
            TagNode::leaf("icu", "ICU").with_parent("wards"),
            TagNode::leaf("er", "ER").with_parent("wards"),
            TagNode::leaf("vip", "VIP"),
            TagNode::leaf("isolation", "Isolation"),
        ])
    }

    fn editor() -> TagEditor<InMemoryTagSource> {
        let filter =
            FilterConfig::tag("tags", "Tags", TagResource::new("patient_tag")).unwrap();
        let mut editor = TagEditor::new(&filter, ward_source()).unwrap();
        editor.refresh().unwrap();
        editor
    }

    #[test]
    fn test_roots_exclude_children() {
        let editor = editor();
        let ids: Vec<&str> = editor.roots().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["wards", "vip", "isolation"]);
    }

    #[test]
    fn test_children_are_loaded_lazily() {
        let mut editor = editor();
        assert!(editor.children.is_empty());

        let children = editor.expand("wards").unwrap();
        let ids: Vec<&str> = children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["icu", "er"]);
    }

    #[test]
    fn test_expand_rejects_leaves() {
        let mut editor = editor();
        assert_matches!(editor.expand("vip"), Err(TagLookupError::NotAGroup { .. }));
    }

    #[test]
    fn test_search_filters_roots() {
        let mut editor = editor();
        editor.set_search("iso").unwrap();
        let ids: Vec<&str> = editor.roots().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["isolation"]);
    }

    #[test]
    fn test_toggle_leaf_by_id() {
        let editor = editor();
        let vip = TagNode::leaf("vip", "VIP");

        let selected = editor.toggle(&[], &vip);
        assert_eq!(selected.len(), 1);

        let selected = editor.toggle(&selected, &vip);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_groups_are_not_selectable() {
        let editor = editor();
        let wards = TagNode::group("wards", "Wards");
        assert!(editor.toggle(&[], &wards).is_empty());
    }

    #[test]
    fn test_all_children_selected_disables_group() {
        let mut editor = editor();
        editor.expand("wards").unwrap();

        let mut selected = Vec::new();
        selected = editor.toggle(&selected, &TagNode::leaf("icu", "ICU").with_parent("wards"));
        selected = editor.toggle(&selected, &TagNode::leaf("er", "ER").with_parent("wards"));

        assert!(editor.all_children_selected("wards", &selected));
        let sections = editor.sections(&selected);
        assert!(sections.groups[0].disabled);

        // Deselecting one child flips the group back to interactive
        selected = editor.toggle(&selected, &TagNode::leaf("er", "ER").with_parent("wards"));
        assert!(!editor.all_children_selected("wards", &selected));
        assert!(!editor.sections(&selected).groups[0].disabled);
    }

    #[test]
    fn test_unloaded_group_is_not_disabled() {
        let editor = editor();
        let selected = vec![
            TagNode::leaf("icu", "ICU").with_parent("wards"),
            TagNode::leaf("er", "ER").with_parent("wards"),
        ];
        // Children never expanded, so the rule cannot apply yet
        assert!(!editor.all_children_selected("wards", &selected));
    }

    #[test]
    fn test_sections_partition_order() {
        let mut editor = editor();
        editor.expand("wards").unwrap();
        let selected = vec![TagNode::leaf("vip", "VIP")];

        let sections = editor.sections(&selected);
        assert_eq!(sections.selected, selected);
        assert_eq!(sections.groups.len(), 1);
        let leaf_ids: Vec<&str> = sections.leaves.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(leaf_ids, vec!["isolation"]);
    }

    #[test]
    fn test_pagination() {
        let filter =
            FilterConfig::tag("tags", "Tags", TagResource::new("patient_tag")).unwrap();
        let mut editor = TagEditor::new(&filter, ward_source()).unwrap();
        editor.query.page_size = 2;
        editor.refresh().unwrap();
        assert_eq!(editor.roots().len(), 2);

        editor.query.page = 1;
        editor.refresh().unwrap();
        assert_eq!(editor.roots().len(), 1);
    }
}
