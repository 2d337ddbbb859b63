use std::collections::BTreeMap;

use log::debug;

use crate::graph::{EdgeLabel, Graph, Vertex};

/// Rot(u, i) = (v, j): the i-th arc out of u leads to v, and the arc back
/// from v to u is v's j-th.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RotationMap<V> {
    entries: BTreeMap<(V, EdgeLabel), (V, EdgeLabel)>,
}

impl<V: Vertex> RotationMap<V> {
    pub fn get(&self, vertex: &V, label: EdgeLabel) -> Option<&(V, EdgeLabel)> {
        self.entries.get(&(vertex.clone(), label))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(V, EdgeLabel), &(V, EdgeLabel))> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys `x` for which `Rot(Rot(x)) != x`.
    pub fn asymmetries(&self) -> Vec<(V, EdgeLabel)> {
        self.entries
            .iter()
            .filter(|(key, (v, j))| self.get(v, *j) != Some(*key))
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn is_involution(&self) -> bool {
        self.asymmetries().is_empty()
    }
}

/// A directed copy of `graph` whose arcs carry local indices.
///
/// Undirected edges become two arcs. Each source vertex numbers its
/// outgoing arcs 1, 2, 3, ... in ascending order of target, so the result
/// does not depend on the order edges were inserted. `graph` is left
/// untouched; existing labels are overwritten in the copy.
pub fn label_arcs<V: Vertex>(graph: &Graph<V>) -> Graph<V> {
    let directed = graph.to_directed();
    let mut labeled = Graph::directed();

    for source in directed.vertices() {
        labeled.add_vertex(source.clone());
        let mut targets: Vec<&V> = directed.neighbors(source).iter().map(|e| &e.target).collect();
        targets.sort();
        for (label, target) in (1..).zip(targets) {
            labeled.add_labeled_edge(source.clone(), target.clone(), Some(label));
        }
    }

    labeled
}

/// Rotation map of a (regular) graph, built over [`label_arcs`].
///
/// Arcs whose reverse arc does not exist are left out of the map.
pub fn rotation_map<V: Vertex>(graph: &Graph<V>) -> RotationMap<V> {
    let labeled = label_arcs(graph);
    let mut entries = BTreeMap::new();

    for arc in labeled.edges() {
        let Some(i) = arc.label else {
            continue;
        };
        match labeled.edge_label(&arc.target, &arc.source) {
            Some(j) => {
                entries.insert((arc.source, i), (arc.target, j));
            }
            None => debug!(
                "rotation map: arc {:?} -> {:?} has no reciprocal, omitted",
                arc.source, arc.target
            ),
        }
    }

    RotationMap { entries }
}
