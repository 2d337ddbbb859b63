use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

/// Anything usable as a graph vertex.
///
/// The ordering matters: the minimum vertex is the origin for path
/// enumeration, and vertex/edge listings come back sorted.
pub trait Vertex: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> Vertex for T {}

/// Local edge index attached to an arc (1-based in rotation maps).
pub type EdgeLabel = u32;

/// Whether edges are unordered pairs or arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Undirected,
    Directed,
}

/// An entry in an adjacency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<V> {
    pub target: V,
    pub label: Option<EdgeLabel>,
}

/// An edge as returned by [`Graph::edges`].
///
/// Undirected edges are listed once, with `source <= target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeRecord<V> {
    pub source: V,
    pub target: V,
    pub label: Option<EdgeLabel>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("no edge from {from} to {to}")]
    MissingEdge { from: String, to: String },
}

/// In-memory graph: sorted vertex map + adjacency lists.
///
/// Undirected edges are stored in both endpoints' `outgoing` lists (a
/// self-loop once). Directed graphs also keep `incoming`, populated on
/// every arc insertion. Adding an edge that already exists is a no-op, so
/// there are never duplicate edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V> {
    kind: GraphKind,
    outgoing: BTreeMap<V, Vec<Edge<V>>>,
    incoming: BTreeMap<V, Vec<Edge<V>>>,
}

impl<V: Vertex> Graph<V> {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
        }
    }

    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// Build an undirected graph from `(vertex, neighbors)` pairs, e.g.
    /// `{0: [1, 3, 5], 1: [0, 2, 4], ...}`.
    pub fn from_adjacency<I, N>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = V>,
    {
        let mut graph = Self::undirected();
        for (vertex, neighbors) in adjacency {
            graph.add_vertex(vertex.clone());
            for neighbor in neighbors {
                graph.add_edge(vertex.clone(), neighbor);
            }
        }
        graph
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    pub fn add_vertex(&mut self, vertex: V) {
        if self.is_directed() {
            self.incoming.entry(vertex.clone()).or_default();
        }
        self.outgoing.entry(vertex).or_default();
    }

    /// Add an unlabeled edge (or arc, for directed graphs).
    pub fn add_edge(&mut self, from: V, to: V) {
        self.add_labeled_edge(from, to, None);
    }

    /// Add an edge carrying an optional label. If the edge already exists
    /// the graph is left unchanged, including the existing label.
    pub fn add_labeled_edge(&mut self, from: V, to: V, label: Option<EdgeLabel>) {
        self.add_vertex(from.clone());
        self.add_vertex(to.clone());
        if self.has_edge(&from, &to) {
            return;
        }

        match self.kind {
            GraphKind::Directed => {
                self.incoming
                    .entry(to.clone())
                    .or_default()
                    .push(Edge { target: from.clone(), label });
                self.outgoing
                    .entry(from)
                    .or_default()
                    .push(Edge { target: to, label });
            }
            GraphKind::Undirected => {
                if from != to {
                    self.outgoing
                        .entry(to.clone())
                        .or_default()
                        .push(Edge { target: from.clone(), label });
                }
                self.outgoing
                    .entry(from)
                    .or_default()
                    .push(Edge { target: to, label });
            }
        }
    }

    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.outgoing.contains_key(vertex)
    }

    /// Edge-existence test. Symmetric for undirected graphs.
    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.find_edge(from, to).is_some()
    }

    fn find_edge(&self, from: &V, to: &V) -> Option<&Edge<V>> {
        self.outgoing
            .get(from)
            .and_then(|edges| edges.iter().find(|e| &e.target == to))
    }

    pub fn edge_label(&self, from: &V, to: &V) -> Option<EdgeLabel> {
        self.find_edge(from, to).and_then(|e| e.label)
    }

    /// Replace the label of an existing edge. On undirected graphs both
    /// stored halves are updated.
    pub fn set_edge_label(
        &mut self,
        from: &V,
        to: &V,
        label: Option<EdgeLabel>,
    ) -> Result<(), GraphError> {
        if !self.has_edge(from, to) {
            return Err(GraphError::MissingEdge {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
            });
        }

        relabel_in(&mut self.outgoing, from, to, label);
        match self.kind {
            GraphKind::Directed => relabel_in(&mut self.incoming, to, from, label),
            GraphKind::Undirected => relabel_in(&mut self.outgoing, to, from, label),
        }
        Ok(())
    }

    /// Vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.outgoing.keys()
    }

    /// Every edge once, sorted by source then target.
    pub fn edges(&self) -> Vec<EdgeRecord<V>> {
        let mut records: Vec<EdgeRecord<V>> = self
            .outgoing
            .iter()
            .flat_map(|(source, edges)| {
                edges
                    .iter()
                    .filter(move |e| self.is_directed() || source <= &e.target)
                    .map(move |e| EdgeRecord {
                        source: source.clone(),
                        target: e.target.clone(),
                        label: e.label,
                    })
            })
            .collect();
        records.sort();
        records
    }

    /// Successors of `vertex` (all neighbors for undirected graphs), in
    /// insertion order.
    pub fn neighbors(&self, vertex: &V) -> &[Edge<V>] {
        self.outgoing.get(vertex).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Predecessors of `vertex`. Same as [`neighbors`](Self::neighbors) on
    /// undirected graphs.
    pub fn neighbors_in(&self, vertex: &V) -> &[Edge<V>] {
        match self.kind {
            GraphKind::Directed => self.incoming.get(vertex).map(|v| v.as_slice()).unwrap_or(&[]),
            GraphKind::Undirected => self.neighbors(vertex),
        }
    }

    /// Number of adjacency entries of `vertex` (out-degree when directed).
    pub fn degree(&self, vertex: &V) -> usize {
        self.neighbors(vertex).len()
    }

    /// All vertex degrees, largest first.
    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = self.outgoing.values().map(|e| e.len()).collect();
        degrees.sort_unstable_by(|a, b| b.cmp(a));
        degrees
    }

    /// `Some(d)` iff every vertex has degree `d`. `None` for the empty graph.
    pub fn regular_degree(&self) -> Option<usize> {
        let mut degrees = self.outgoing.values().map(|e| e.len());
        let first = degrees.next()?;
        degrees.all(|d| d == first).then_some(first)
    }

    pub fn order(&self) -> usize {
        self.outgoing.len()
    }

    pub fn size(&self) -> usize {
        match self.kind {
            GraphKind::Directed => self.outgoing.values().map(|v| v.len()).sum(),
            GraphKind::Undirected => self.edges().len(),
        }
    }

    /// Each undirected edge becomes two arcs carrying the same label.
    /// Already-directed graphs are cloned.
    pub fn to_directed(&self) -> Graph<V> {
        if self.is_directed() {
            return self.clone();
        }
        let mut directed = Graph::directed();
        for (source, edges) in &self.outgoing {
            directed.add_vertex(source.clone());
            for edge in edges {
                directed.add_labeled_edge(source.clone(), edge.target.clone(), edge.label);
            }
        }
        directed
    }

    /// Merge arcs into edges. When both (u, v) and (v, u) exist the label of
    /// the one listed first in [`edges`](Self::edges) is kept.
    pub fn to_undirected(&self) -> Graph<V> {
        if !self.is_directed() {
            return self.clone();
        }
        let mut undirected = Graph::undirected();
        for vertex in self.vertices() {
            undirected.add_vertex(vertex.clone());
        }
        for record in self.edges() {
            undirected.add_labeled_edge(record.source, record.target, record.label);
        }
        undirected
    }

    /// Map every vertex through `f`. `f` must be injective, otherwise
    /// vertices merge.
    pub fn relabel<W: Vertex, F: Fn(&V) -> W>(&self, f: F) -> Graph<W> {
        let mut relabeled = Graph::new(self.kind);
        for vertex in self.vertices() {
            relabeled.add_vertex(f(vertex));
        }
        for record in self.edges() {
            relabeled.add_labeled_edge(f(&record.source), f(&record.target), record.label);
        }
        relabeled
    }

    /// Relabel vertices to `0..order()` following their sorted order.
    /// Returns the new graph and the original vertex at each index.
    pub fn relabel_to_indices(&self) -> (Graph<usize>, Vec<V>) {
        let originals: Vec<V> = self.vertices().cloned().collect();
        let index: BTreeMap<&V, usize> =
            originals.iter().enumerate().map(|(i, v)| (v, i)).collect();
        let relabeled = self.relabel(|v| index[v]);
        (relabeled, originals)
    }
}

fn relabel_in<V: Vertex>(
    lists: &mut BTreeMap<V, Vec<Edge<V>>>,
    from: &V,
    to: &V,
    label: Option<EdgeLabel>,
) {
    if let Some(edge) = lists
        .get_mut(from)
        .and_then(|edges| edges.iter_mut().find(|e| &e.target == to))
    {
        edge.label = label;
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::undirected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_path(n: u32) -> Graph<u32> {
        let mut g = Graph::undirected();
        for i in 0..n - 1 {
            g.add_edge(i, i + 1);
        }
        g
    }

    #[test]
    fn test_undirected_edges_listed_once() {
        let g = make_path(4);
        assert_eq!(g.order(), 4);
        assert_eq!(g.size(), 3);
        let edges = g.edges();
        assert!(edges.iter().all(|e| e.source < e.target));
        assert!(g.has_edge(&2, &1));
        assert!(g.has_edge(&1, &2));
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut g = make_path(3);
        g.add_edge(1, 0);
        g.add_edge(0, 1);
        assert_eq!(g.size(), 2);
        assert_eq!(g.degree(&0), 1);
    }

    #[test]
    fn test_directed_has_edge_is_oriented() {
        let mut g = Graph::directed();
        g.add_edge('a', 'b');
        assert!(g.has_edge(&'a', &'b'));
        assert!(!g.has_edge(&'b', &'a'));
        assert_eq!(g.neighbors_in(&'b').len(), 1);
        assert_eq!(g.size(), 1);
    }

    #[test]
    fn test_from_adjacency() {
        let g = Graph::from_adjacency(vec![(0, vec![1, 2]), (1, vec![0, 2]), (2, vec![0, 1])]);
        assert_eq!(g.order(), 3);
        assert_eq!(g.size(), 3);
        assert_eq!(g.regular_degree(), Some(2));
    }

    #[test]
    fn test_set_edge_label_both_halves() {
        let mut g = make_path(3);
        g.set_edge_label(&0, &1, Some(7)).unwrap();
        assert_eq!(g.edge_label(&0, &1), Some(7));
        assert_eq!(g.edge_label(&1, &0), Some(7));
    }

    #[test]
    fn test_set_edge_label_missing() {
        let mut g = make_path(3);
        let err = g.set_edge_label(&0, &2, Some(1)).unwrap_err();
        assert!(matches!(err, GraphError::MissingEdge { .. }));
    }

    #[test]
    fn test_to_directed_doubles_arcs() {
        let g = make_path(4);
        let d = g.to_directed();
        assert_eq!(g.kind(), GraphKind::Undirected);
        assert_eq!(d.kind(), GraphKind::Directed);
        assert!(d.is_directed());
        assert_eq!(d.size(), 6);
        assert!(d.has_edge(&1, &0));
        assert_eq!(d.to_undirected(), g);
    }

    #[test]
    fn test_regular_degree() {
        let g = make_path(4);
        assert_eq!(g.regular_degree(), None);
        assert_eq!(g.degree_sequence(), vec![2, 2, 1, 1]);
        assert_eq!(Graph::<u32>::undirected().regular_degree(), None);
    }

    #[test]
    fn test_relabel_to_indices() {
        let g = Graph::from_adjacency(vec![("x", vec!["y"]), ("y", vec!["z"])]);
        let (indexed, originals) = g.relabel_to_indices();
        assert_eq!(originals, vec!["x", "y", "z"]);
        assert!(indexed.has_edge(&0, &1));
        assert!(indexed.has_edge(&1, &2));
        assert!(!indexed.has_edge(&0, &2));
    }

    #[test]
    fn test_self_loop_stored_once() {
        let mut g = Graph::undirected();
        g.add_edge(0u8, 0u8);
        assert_eq!(g.degree(&0), 1);
        assert_eq!(g.size(), 1);
    }
}
