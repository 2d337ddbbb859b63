use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::graph::Graph;

/// Pairings tried by [`random_regular_graph`] before giving up.
pub const MAX_PAIRING_ATTEMPTS: usize = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("no {degree}-regular graph on {order} vertices: degree sum is odd")]
    OddDegreeSum { degree: usize, order: usize },
    #[error("degree {degree} needs more than {order} vertices")]
    DegreeTooLarge { degree: usize, order: usize },
    #[error("no simple pairing found in {0} attempts")]
    Exhausted(usize),
}

/// C_n on `0..n`. C_1 is a single vertex and C_2 a single edge.
pub fn cycle_graph(n: usize) -> Graph<usize> {
    let mut graph = Graph::undirected();
    for i in 0..n {
        graph.add_vertex(i);
    }
    if n >= 2 {
        for i in 0..n {
            graph.add_edge(i, (i + 1) % n);
        }
    }
    graph
}

/// K_n on `0..n`.
pub fn complete_graph(n: usize) -> Graph<usize> {
    let mut graph = Graph::undirected();
    for i in 0..n {
        graph.add_vertex(i);
        for j in 0..i {
            graph.add_edge(j, i);
        }
    }
    graph
}

/// K_{m,n}: parts `0..m` and `m..m + n`.
pub fn complete_bipartite_graph(m: usize, n: usize) -> Graph<usize> {
    let mut graph = Graph::undirected();
    for i in 0..m + n {
        graph.add_vertex(i);
    }
    for left in 0..m {
        for right in m..m + n {
            graph.add_edge(left, right);
        }
    }
    graph
}

/// A uniformly random simple d-regular graph on `0..n`.
///
/// Configuration model: each vertex contributes `degree` points, a random
/// perfect matching of the points gives the edges, and matchings with
/// loops or repeated edges are thrown away.
pub fn random_regular_graph<R: Rng + ?Sized>(
    degree: usize,
    order: usize,
    rng: &mut R,
) -> Result<Graph<usize>, GeneratorError> {
    if degree * order % 2 != 0 {
        return Err(GeneratorError::OddDegreeSum { degree, order });
    }
    if degree >= order && !(degree == 0 && order == 0) {
        return Err(GeneratorError::DegreeTooLarge { degree, order });
    }

    let mut points: Vec<usize> = (0..order)
        .flat_map(|v| std::iter::repeat(v).take(degree))
        .collect();

    'attempt: for _ in 0..MAX_PAIRING_ATTEMPTS {
        points.shuffle(rng);
        let mut graph = Graph::undirected();
        for v in 0..order {
            graph.add_vertex(v);
        }
        for pair in points.chunks_exact(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b || graph.has_edge(&a, &b) {
                continue 'attempt;
            }
            graph.add_edge(a, b);
        }
        return Ok(graph);
    }

    Err(GeneratorError::Exhausted(MAX_PAIRING_ATTEMPTS))
}
