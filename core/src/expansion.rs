use log::debug;

use crate::config::AnalysisLimits;
use crate::fellow_traveler::{check_order, AnalysisError};
use crate::graph::{Graph, Vertex};

/// Vertex subsets are u64 masks.
const MAX_MASK_BITS: usize = 63;

/// Size, degree volume and boundary edge count of a vertex subset.
#[derive(Debug, Clone, Copy)]
struct Cut {
    size: usize,
    volume: usize,
    boundary: usize,
}

/// Edge isoperimetric number: min |∂S| / |S| over nonempty S with
/// |S| <= n / 2.
///
/// Exact, by enumerating every subset: 2^n work. `Ok(None)` for graphs with
/// fewer than two vertices. Directed graphs are read as undirected.
pub fn edge_expansion<V: Vertex>(
    graph: &Graph<V>,
    limits: &AnalysisLimits,
) -> Result<Option<f64>, AnalysisError> {
    min_over_cuts(graph, limits, |cut, whole| {
        (cut.size * 2 <= whole.size).then(|| cut.boundary as f64 / cut.size as f64)
    })
}

/// Cheeger constant: min |∂S| / vol(S) over S with 0 < vol(S) <= vol(V) / 2,
/// vol being the degree sum. Same enumeration as [`edge_expansion`].
pub fn cheeger_constant<V: Vertex>(
    graph: &Graph<V>,
    limits: &AnalysisLimits,
) -> Result<Option<f64>, AnalysisError> {
    min_over_cuts(graph, limits, |cut, whole| {
        (cut.volume > 0 && cut.volume * 2 <= whole.volume)
            .then(|| cut.boundary as f64 / cut.volume as f64)
    })
}

fn min_over_cuts<V: Vertex, F>(
    graph: &Graph<V>,
    limits: &AnalysisLimits,
    ratio: F,
) -> Result<Option<f64>, AnalysisError>
where
    F: Fn(&Cut, &Cut) -> Option<f64>,
{
    let n = graph.order();
    check_order("exact expansion", n, limits.max_expansion_vertices.min(MAX_MASK_BITS))?;
    if n < 2 {
        return Ok(None);
    }

    let (indexed, _) = graph.to_undirected().relabel_to_indices();
    let edges: Vec<(usize, usize)> = indexed
        .edges()
        .into_iter()
        .filter(|e| e.source != e.target)
        .map(|e| (e.source, e.target))
        .collect();
    let degrees: Vec<usize> = (0..n).map(|v| indexed.degree(&v)).collect();
    let whole = Cut {
        size: n,
        volume: degrees.iter().sum(),
        boundary: 0,
    };

    let mut best: Option<f64> = None;
    for mask in 1u64..(1u64 << n) {
        let inside = |v: usize| mask & (1 << v) != 0;
        let cut = Cut {
            size: mask.count_ones() as usize,
            volume: (0..n).filter(|&v| inside(v)).map(|v| degrees[v]).sum(),
            boundary: edges.iter().filter(|&&(a, b)| inside(a) != inside(b)).count(),
        };
        if let Some(r) = ratio(&cut, &whole) {
            best = Some(best.map_or(r, |b| b.min(r)));
        }
    }

    debug!("expansion over {} vertices: {:?}", n, best);
    Ok(best)
}
