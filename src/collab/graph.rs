use std::collections::{BTreeSet, HashMap};

use crate::data::TrackRecord;

use super::normalize::normalize_artists;

/// Undirected simple graph of artists who share at least one track credit.
///
/// `nodes` is sorted by name and every edge is stored once as `(low, high)`
/// indices into it, with the edge list itself sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollabGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<(usize, usize)>,
    index_by_name: HashMap<String, usize>,
    neighbors: Vec<Vec<usize>>,
}

impl CollabGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) if a != b => {
                let key = (a.min(b), a.max(b));
                self.edges.binary_search(&key).is_ok()
            }
            _ => false,
        }
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    fn from_pairs(pairs: BTreeSet<(String, String)>) -> Self {
        let nodes = pairs
            .iter()
            .flat_map(|(a, b)| [a, b])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        let mut index_by_name = HashMap::with_capacity(nodes.len());
        for (index, name) in nodes.iter().enumerate() {
            index_by_name.insert(name.clone(), index);
        }

        let mut edges = pairs
            .iter()
            .filter_map(|(a, b)| {
                let a = index_by_name.get(a).copied()?;
                let b = index_by_name.get(b).copied()?;
                Some((a.min(b), a.max(b)))
            })
            .collect::<Vec<_>>();
        edges.sort_unstable();
        edges.dedup();

        let mut neighbors = vec![Vec::new(); nodes.len()];
        for &(a, b) in &edges {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Self {
            nodes,
            edges,
            index_by_name,
            neighbors,
        }
    }
}

pub fn assemble<'a>(tracks: impl IntoIterator<Item = &'a TrackRecord>) -> CollabGraph {
    assemble_from_fields(
        tracks
            .into_iter()
            .map(|track| track.artist_names.as_deref()),
    )
}

pub fn assemble_from_fields<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> CollabGraph {
    let mut pairs = BTreeSet::new();

    for field in fields {
        let mut artists = normalize_artists(field);
        artists.sort_unstable();
        artists.dedup();
        if artists.len() < 2 {
            continue;
        }

        for (offset, first) in artists.iter().enumerate() {
            for second in &artists[offset + 1..] {
                pairs.insert((first.clone(), second.clone()));
            }
        }
    }

    CollabGraph::from_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn edge_names(graph: &CollabGraph) -> HashSet<(String, String)> {
        graph
            .edges
            .iter()
            .map(|&(a, b)| (graph.nodes[a].clone(), graph.nodes[b].clone()))
            .collect()
    }

    #[test]
    fn no_tracks_build_an_empty_graph() {
        let graph = assemble_from_fields(Vec::<Option<&str>>::new());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn solo_and_blank_tracks_add_nothing() {
        let graph = assemble_from_fields([Some("Alice"), None, Some(" , "), Some("Bob, Bob")]);
        assert!(graph.is_empty());
    }

    #[test]
    fn single_collaboration_links_both_artists() {
        let graph = assemble_from_fields([Some("Alice, Bob")]);
        assert_eq!(graph.nodes, vec!["Alice", "Bob"]);
        assert_eq!(graph.edges, vec![(0, 1)]);
        assert!(graph.has_edge("Bob", "Alice"));
    }

    #[test]
    fn repeated_pairs_collapse_to_one_edge() {
        let graph = assemble_from_fields([Some("Alice, Bob"), Some("Bob,Alice")]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn three_artists_form_a_triangle() {
        let graph = assemble_from_fields([Some("Alice, Bob, Carol")]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.has_edge("Alice", "Bob"));
        assert!(graph.has_edge("Alice", "Carol"));
        assert!(graph.has_edge("Bob", "Carol"));
        assert_eq!(graph.degree(0), 2);
    }

    #[test]
    fn isolated_artists_are_dropped_and_names_stay_case_sensitive() {
        let graph = assemble_from_fields([Some("Solo"), Some("Alice, alice"), Some("Dana, Eve")]);
        assert_eq!(graph.nodes, vec!["Alice", "Dana", "Eve", "alice"]);
        assert!(graph.index_of("Solo").is_none());
        assert!(graph.has_edge("Alice", "alice"));
        assert!(!graph.has_edge("Alice", "Alice"));
    }

    #[test]
    fn edges_match_shared_credits_exactly() {
        let fields = [
            Some("A, B"),
            Some("B, C, D"),
            Some("E"),
            Some("A, A, F"),
            None,
        ];
        let graph = assemble_from_fields(fields);

        let mut expected = HashSet::new();
        for field in fields {
            let artists = normalize_artists(field);
            for a in &artists {
                for b in &artists {
                    if a < b {
                        expected.insert((a.clone(), b.clone()));
                    }
                }
            }
        }

        assert_eq!(edge_names(&graph), expected);
        assert!(graph.edges.iter().all(|(a, b)| a < b));
    }

    #[test]
    fn assembly_is_repeatable_and_order_independent() {
        let forward = [Some("A, B"), Some("C, B"), Some("D, A, C")];
        let mut reversed = forward;
        reversed.reverse();

        let first = assemble_from_fields(forward);
        let second = assemble_from_fields(forward);
        let third = assemble_from_fields(reversed);

        assert_eq!(first, second);
        assert_eq!(edge_names(&first), edge_names(&third));
        assert_eq!(first.nodes, third.nodes);
    }
}
