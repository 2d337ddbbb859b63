use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::graph::{EdgeLabel, Graph, Vertex};
use crate::rotation::rotation_map;

/// Vertex of a replacement or zig-zag product: a position inside the copy
/// of the motif graph (the cloud) standing in for one base vertex.
///
/// `cloud` is the base vertex's index in sorted order; `position` is
/// 1-based so that it lines up with rotation-map labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CloudVertex {
    pub cloud: usize,
    pub position: usize,
}

impl CloudVertex {
    pub fn new(cloud: usize, position: usize) -> Self {
        Self { cloud, position }
    }
}

impl fmt::Display for CloudVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.cloud, self.position)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("motif graph has no vertices")]
    EmptyMotif,
    /// The base graph must be d-regular with d = |V(motif)|.
    #[error("base vertex {vertex} has degree {degree}, motif has {expected} vertices")]
    DegreeMismatch {
        vertex: String,
        degree: usize,
        expected: usize,
    },
}

fn check_base_degree<B: Vertex>(base: &Graph<B>, motif_order: usize) -> Result<(), ProductError> {
    if motif_order == 0 {
        return Err(ProductError::EmptyMotif);
    }
    match base.vertices().find(|v| base.degree(v) != motif_order) {
        Some(vertex) => Err(ProductError::DegreeMismatch {
            vertex: format!("{:?}", vertex),
            degree: base.degree(vertex),
            expected: motif_order,
        }),
        None => Ok(()),
    }
}

/// Replacement product of a d-regular `base` with a `motif` on d vertices.
///
/// Every base vertex becomes a cloud holding a copy of the motif. Two
/// edge families:
/// - inter-cloud: Rot(u, i) = (v, j) in the base graph joins (u, i) and
///   (v, j);
/// - intra-cloud: motif edge (a, b) joins (c, a + 1) and (c, b + 1) in
///   every cloud c, with motif vertices numbered by sorted order.
pub fn replacement_product<B: Vertex, M: Vertex>(
    base: &Graph<B>,
    motif: &Graph<M>,
) -> Result<Graph<CloudVertex>, ProductError> {
    check_base_degree(base, motif.order())?;

    let (base_indexed, _) = base.relabel_to_indices();
    let (motif_indexed, _) = motif.relabel_to_indices();
    let rotation = rotation_map(&base_indexed);

    let mut product = Graph::undirected();
    for cloud in 0..base_indexed.order() {
        for position in 1..=motif_indexed.order() {
            product.add_vertex(CloudVertex::new(cloud, position));
        }
    }

    for ((u, i), (v, j)) in rotation.iter() {
        product.add_edge(cloud_vertex(*u, *i), cloud_vertex(*v, *j));
    }

    let motif_edges = motif_indexed.edges();
    for cloud in 0..base_indexed.order() {
        for edge in &motif_edges {
            product.add_edge(
                CloudVertex::new(cloud, edge.source + 1),
                CloudVertex::new(cloud, edge.target + 1),
            );
        }
    }

    info!(
        "replacement product: {} clouds of {} -> {} vertices, {} edges",
        base_indexed.order(),
        motif_indexed.order(),
        product.order(),
        product.size()
    );
    Ok(product)
}

fn cloud_vertex(cloud: usize, label: EdgeLabel) -> CloudVertex {
    CloudVertex::new(cloud, label as usize)
}

/// Zig-zag product of a d-regular `base` with a `motif` on d vertices.
///
/// Built from [`replacement_product`]; see [`zig_zag_from_replacement`].
pub fn zig_zag_product<B: Vertex, M: Vertex>(
    base: &Graph<B>,
    motif: &Graph<M>,
) -> Result<Graph<CloudVertex>, ProductError> {
    let replacement = replacement_product(base, motif)?;
    Ok(zig_zag_from_replacement(&replacement, motif.order()))
}

/// Zig-zag edges from the replacement product's edge set alone.
///
/// Distinct u = (c, s) and v = (c', s') are joined iff some
/// x = (c, k), k != s, and y = (c', r), r != s', make u-x, x-y and y-v
/// replacement edges while u-v is not one. u = v is never considered, so
/// the result has no self-loops. Keeps every replacement vertex.
///
/// Exhaustive over ordered pairs: O(V^2 * d^2).
pub fn zig_zag_from_replacement(
    replacement: &Graph<CloudVertex>,
    motif_order: usize,
) -> Graph<CloudVertex> {
    let mut product = Graph::undirected();
    for vertex in replacement.vertices() {
        product.add_vertex(*vertex);
    }

    for u in replacement.vertices() {
        for v in replacement.vertices() {
            if u == v || replacement.has_edge(u, v) {
                continue;
            }
            if has_zig_zag_walk(replacement, motif_order, u, v) {
                product.add_edge(*u, *v);
            }
        }
    }

    debug!(
        "zig-zag product: {} vertices, {} edges, degrees {:?}",
        product.order(),
        product.size(),
        product.regular_degree()
    );
    product
}

/// Intra-cloud step, inter-cloud step, intra-cloud step from u to v.
fn has_zig_zag_walk(
    replacement: &Graph<CloudVertex>,
    motif_order: usize,
    u: &CloudVertex,
    v: &CloudVertex,
) -> bool {
    let zig = (1..=motif_order)
        .filter(|&k| k != u.position)
        .map(|k| CloudVertex::new(u.cloud, k));
    for x in zig {
        if !replacement.has_edge(u, &x) {
            continue;
        }
        let zag = (1..=motif_order)
            .filter(|&r| r != v.position)
            .map(|r| CloudVertex::new(v.cloud, r));
        for y in zag {
            if replacement.has_edge(&x, &y) && replacement.has_edge(&y, v) {
                return true;
            }
        }
    }
    false
}
