use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use doorway_graph::{NodeId, WalkGraph};

/// One row of the entrance-node table: an entrance of a building, snapped
/// to a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceNode {
    pub building: String,
    pub entrance: Option<String>,
    pub node: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
struct CatalogEntry {
    name: String,
    nodes: Vec<NodeId>,
}

/// Building identifier → entrance node ids.
///
/// Keys are matched case-insensitively. Every node id is a node of the graph
/// the catalog was built against. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingCatalog {
    entries: BTreeMap<String, CatalogEntry>,
    rows: Vec<EntranceNode>,
}

pub(crate) fn catalog_key(name: &str) -> String {
    name.to_lowercase()
}

impl BuildingCatalog {
    /// Assemble from rows whose nodes are already known to be in the graph.
    pub(crate) fn from_rows(rows: Vec<EntranceNode>) -> Self {
        let mut entries: BTreeMap<String, CatalogEntry> = BTreeMap::new();
        for row in &rows {
            let entry = entries
                .entry(catalog_key(&row.building))
                .or_insert_with(|| CatalogEntry {
                    name: row.building.clone(),
                    nodes: Vec::new(),
                });
            if !entry.nodes.contains(&row.node) {
                entry.nodes.push(row.node);
            }
        }
        Self { entries, rows }
    }

    /// Rebuild from a previously written entrance-node table.
    ///
    /// Rows naming nodes absent from `graph` are dropped; the count of
    /// dropped rows is returned alongside.
    pub fn from_entrance_nodes(rows: Vec<EntranceNode>, graph: &WalkGraph) -> (Self, usize) {
        let total = rows.len();
        let kept: Vec<EntranceNode> = rows
            .into_iter()
            .filter(|row| {
                let known = graph.contains(row.node);
                if !known {
                    warn!(building = %row.building, node = row.node, "dropping entrance on unknown node");
                }
                known
            })
            .collect();
        let dropped = total - kept.len();
        (Self::from_rows(kept), dropped)
    }

    /// Entrance nodes of `building`, in first-seen order. Empty when the
    /// building is unknown.
    pub fn lookup(&self, building: &str) -> &[NodeId] {
        self.entries
            .get(&catalog_key(building))
            .map(|entry| entry.nodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, building: &str) -> bool {
        self.entries.contains_key(&catalog_key(building))
    }

    /// Buildings with their entrance nodes, sorted by normalized identifier.
    pub fn buildings(&self) -> impl Iterator<Item = (&str, &[NodeId])> + '_ {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), entry.nodes.as_slice()))
    }

    /// The full table, one row per snapped entrance.
    pub fn entrance_nodes(&self) -> &[EntranceNode] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(building: &str, node: NodeId) -> EntranceNode {
        EntranceNode {
            building: building.to_string(),
            entrance: None,
            node,
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = BuildingCatalog::from_rows(vec![row("Hall", 3), row("hall", 4)]);
        assert_eq!(catalog.lookup("HALL"), &[3, 4]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn lookup_is_exact_apart_from_case() {
        let catalog = BuildingCatalog::from_rows(vec![row("Hall", 3)]);
        assert!(catalog.lookup(" hall ").is_empty());
        assert!(catalog.lookup("Hal").is_empty());
        assert!(!catalog.contains("hall "));
    }

    #[test]
    fn unknown_building_is_empty_not_error() {
        let catalog = BuildingCatalog::from_rows(vec![row("Hall", 3)]);
        assert!(catalog.lookup("Library").is_empty());
        assert!(!catalog.contains("Library"));
    }

    #[test]
    fn nodes_are_deduplicated_keeping_first() {
        let catalog = BuildingCatalog::from_rows(vec![row("Hall", 9), row("Hall", 2), row("Hall", 9)]);
        assert_eq!(catalog.lookup("Hall"), &[9, 2]);
        assert_eq!(catalog.entrance_nodes().len(), 3);
    }

    #[test]
    fn buildings_are_sorted() {
        let catalog = BuildingCatalog::from_rows(vec![row("zeta", 1), row("Alpha", 2), row("beta", 3)]);
        let names: Vec<&str> = catalog.buildings().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn reload_drops_rows_outside_graph() {
        let mut graph = WalkGraph::new("EPSG:3116", false);
        graph.add_node(1, 0.0, 0.0).unwrap();
        let (catalog, dropped) =
            BuildingCatalog::from_entrance_nodes(vec![row("Hall", 1), row("Hall", 77)], &graph);
        assert_eq!(dropped, 1);
        assert_eq!(catalog.lookup("Hall"), &[1]);
    }
}
