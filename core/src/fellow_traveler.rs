use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, trace};
use thiserror::Error;

use crate::config::{AnalysisLimits, FellowTravelerConfig};
use crate::graph::{Graph, Vertex};
use crate::traversal::{all_paths, diameter, distance};

/// A simple path, origin first.
pub type Path<V> = Vec<V>;

/// Paths from the origin grouped by edge count. No key maps to an empty list.
pub type PathsByLength<V> = BTreeMap<usize, Vec<Path<V>>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No length class yielded a single comparable pair of paths, so there
    /// is nothing to take the maximum of. Happens on graphs too small (or
    /// too filtered) to contain two fellow-traveling paths.
    #[error("no length class produced a comparable pair of paths")]
    EmptyAggregation,
    #[error("no path from {from} to {to}")]
    Unreachable { from: String, to: String },
    #[error("{what} needs at most {limit} vertices, graph has {actual}")]
    TooLarge {
        what: &'static str,
        actual: usize,
        limit: usize,
    },
}

pub(crate) fn check_order(
    what: &'static str,
    actual: usize,
    limit: usize,
) -> Result<(), AnalysisError> {
    if actual > limit {
        return Err(AnalysisError::TooLarge { what, actual, limit });
    }
    Ok(())
}

/// The distinguished start vertex: the minimum vertex.
pub fn origin<V: Vertex>(graph: &Graph<V>) -> Option<&V> {
    graph.vertices().next()
}

/// Every simple path from the origin to every other vertex, grouped by
/// length.
///
/// Vertices unreachable from the origin contribute nothing. Exhaustive, so
/// exponential on anything but small or sparse graphs.
pub fn paths_from_origin<V: Vertex>(graph: &Graph<V>) -> PathsByLength<V> {
    let mut by_length: PathsByLength<V> = BTreeMap::new();
    let Some(origin) = origin(graph) else {
        return by_length;
    };

    for vertex in graph.vertices().filter(|v| *v != origin) {
        for path in all_paths(graph, origin, vertex) {
            by_length.entry(path.len() - 1).or_default().push(path);
        }
    }

    by_length
}

/// Outcome of a fellow-traveler evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FellowTravelerReport {
    pub diameter: Option<usize>,
    /// Largest separation found in each length class that had at least one
    /// comparable pair.
    pub class_maxima: BTreeMap<usize, usize>,
    /// Length class whose maximum reached the diameter. Later classes were
    /// not evaluated.
    pub stopped_at: Option<usize>,
    pub pairs_compared: usize,
}

impl FellowTravelerReport {
    /// The fellow-traveler constant: the class maximum that hit the
    /// diameter, else the maximum over all classes.
    pub fn constant(&self) -> Result<usize, AnalysisError> {
        if let Some(k) = self.stopped_at.and_then(|len| self.class_maxima.get(&len)) {
            return Ok(*k);
        }
        self.class_maxima
            .values()
            .max()
            .copied()
            .ok_or(AnalysisError::EmptyAggregation)
    }
}

/// Maximum distance between corresponding vertices of fellow-traveling
/// paths.
///
/// See [`fellow_traveler_report`] for which pairs are compared.
pub fn fellow_traveler_constant<V: Vertex>(
    graph: &Graph<V>,
    config: &FellowTravelerConfig,
) -> Result<usize, AnalysisError> {
    fellow_traveler_report(graph, config)?.constant()
}

/// Evaluate every length class of [`paths_from_origin`].
///
/// Within a class, an ordered pair of distinct paths (A, B) of length L is
/// compared when A and B end at the same vertex or at adjacent vertices.
/// With `exclude_non_disjoint_paths`, the pair must also share no vertex
/// besides the origin and the common endpoint. A comparison collects
/// `d(A[i], B[i])` for `i` in `0..L`.
///
/// Evaluation stops at the first class whose maximum equals the diameter.
pub fn fellow_traveler_report<V: Vertex>(
    graph: &Graph<V>,
    config: &FellowTravelerConfig,
) -> Result<FellowTravelerReport, AnalysisError> {
    let AnalysisLimits { max_vertices, .. } = config.limits;
    check_order("fellow-traveler evaluation", graph.order(), max_vertices)?;

    let diameter = diameter(graph);
    let mut report = FellowTravelerReport {
        diameter,
        class_maxima: BTreeMap::new(),
        stopped_at: None,
        pairs_compared: 0,
    };
    let Some(origin) = origin(graph) else {
        return Ok(report);
    };

    let by_length = paths_from_origin(graph);
    info!(
        "fellow-traveler: {} vertices, diameter {:?}, {} length classes",
        graph.order(),
        diameter,
        by_length.len()
    );

    for (&length, paths) in &by_length {
        if paths.len() < 2 {
            continue;
        }

        let mut class_max: Option<usize> = None;
        for (j, a) in paths.iter().enumerate() {
            for (l, b) in paths.iter().enumerate() {
                if j == l || !endpoints_travel_together(graph, &a[length], &b[length]) {
                    continue;
                }
                if config.exclude_non_disjoint_paths && !meets_only_at_ends(origin, a, b) {
                    continue;
                }

                let separation = max_separation(graph, &a[..length], &b[..length])?;
                trace!("length {}: {:?} vs {:?} -> {:?}", length, a, b, separation);
                report.pairs_compared += 1;
                class_max = class_max.max(separation);
            }
        }

        let Some(k) = class_max else {
            continue;
        };
        debug!("length class {}: max separation {}", length, k);
        report.class_maxima.insert(length, k);
        if Some(k) == diameter {
            report.stopped_at = Some(length);
            break;
        }
    }

    Ok(report)
}

fn endpoints_travel_together<V: Vertex>(graph: &Graph<V>, a: &V, b: &V) -> bool {
    a == b || graph.has_edge(a, b)
}

/// The shared vertices of `a` and `b` are exactly {origin} or
/// {origin, end of `a`}.
fn meets_only_at_ends<V: Vertex>(origin: &V, a: &[V], b: &[V]) -> bool {
    let shared: BTreeSet<&V> = a.iter().filter(|v| b.contains(v)).collect();
    let Some(end) = a.last() else {
        return false;
    };
    match shared.len() {
        1 => shared.contains(origin),
        2 => shared.contains(origin) && shared.contains(end),
        _ => false,
    }
}

/// Largest `d(a[i], b[i])` over the common positions. None for empty slices.
fn max_separation<V: Vertex>(
    graph: &Graph<V>,
    a: &[V],
    b: &[V],
) -> Result<Option<usize>, AnalysisError> {
    let mut max: Option<usize> = None;
    for (u, v) in a.iter().zip(b) {
        let d = distance(graph, u, v).ok_or_else(|| AnalysisError::Unreachable {
            from: format!("{:?}", u),
            to: format!("{:?}", v),
        })?;
        max = max.max(Some(d));
    }
    Ok(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{complete_bipartite_graph, complete_graph, cycle_graph};

    fn make_chain(n: u32) -> Graph<u32> {
        let mut g = Graph::undirected();
        for i in 0..n - 1 {
            g.add_edge(i, i + 1);
        }
        g
    }

    // --- path enumeration ---

    #[test]
    fn test_paths_start_at_origin_and_are_simple() {
        let g = complete_graph(5);
        let by_length = paths_from_origin(&g);
        for (length, paths) in &by_length {
            assert!(!paths.is_empty());
            for path in paths {
                assert_eq!(path.len() - 1, *length);
                assert_eq!(path[0], 0);
                assert_ne!(path[*length], 0);
                let unique: BTreeSet<_> = path.iter().collect();
                assert_eq!(unique.len(), path.len());
            }
        }
        // K5: 4 targets, each with 1 + 3 + 6 + 6 simple paths of lengths 1..=4
        assert_eq!(by_length.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(by_length[&1].len(), 4);
        assert_eq!(by_length[&2].len(), 12);
        assert_eq!(by_length[&3].len(), 24);
        assert_eq!(by_length[&4].len(), 24);
    }

    #[test]
    fn test_paths_cycle() {
        let by_length = paths_from_origin(&cycle_graph(5));
        // every target is reached both ways round: lengths k and 5 - k
        assert_eq!(by_length.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(by_length.values().all(|paths| paths.len() == 2));
    }

    #[test]
    fn test_paths_unreachable_vertex_contributes_nothing() {
        let mut g = make_chain(3);
        g.add_vertex(10);
        let by_length = paths_from_origin(&g);
        assert_eq!(by_length.len(), 2);
        assert!(by_length.values().flatten().all(|p| !p.contains(&10)));
    }

    #[test]
    fn test_paths_empty_graph() {
        assert!(paths_from_origin(&Graph::<u32>::undirected()).is_empty());
    }

    // --- fellow-traveler constant ---

    #[test]
    fn test_small_cycles_reach_diameter() {
        for n in 3..=5 {
            let g = cycle_graph(n);
            let k = fellow_traveler_constant(&g, &FellowTravelerConfig::default()).unwrap();
            assert_eq!(Some(k), diameter(&g), "n = {}", n);
        }
    }

    #[test]
    fn test_hexagon_constant() {
        // The only comparable pairs in C6 are the two antipodal paths
        // 0-1-2-3 and 0-5-4-3, which never drift more than 2 apart.
        let g = cycle_graph(6);
        let report = fellow_traveler_report(&g, &FellowTravelerConfig::default()).unwrap();
        assert_eq!(report.diameter, Some(3));
        assert_eq!(report.stopped_at, None);
        assert_eq!(report.class_maxima, BTreeMap::from([(3, 2)]));
        assert_eq!(report.constant(), Ok(2));
    }

    #[test]
    fn test_cycles_up_to_fifty() {
        for n in 3..=50 {
            let g = cycle_graph(n);
            let k = fellow_traveler_constant(&g, &FellowTravelerConfig::default())
                .unwrap_or_else(|e| panic!("n = {}: {}", n, e));
            assert!(Some(k) <= diameter(&g), "n = {}: k = {}", n, k);
        }
    }

    #[test]
    fn test_triangle_stops_early() {
        let report =
            fellow_traveler_report(&cycle_graph(3), &FellowTravelerConfig::default()).unwrap();
        assert_eq!(report.stopped_at, Some(2));
        assert_eq!(report.constant(), Ok(1));
    }

    #[test]
    fn test_chain_has_no_pairs() {
        // One path per target: nothing to compare.
        let err =
            fellow_traveler_constant(&make_chain(4), &FellowTravelerConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyAggregation);
    }

    #[test]
    fn test_single_vertex_graph() {
        let mut g = Graph::undirected();
        g.add_vertex(0u32);
        let err = fellow_traveler_constant(&g, &FellowTravelerConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyAggregation);
    }

    #[test]
    fn test_disjoint_filter_k33() {
        let g = complete_bipartite_graph(3, 3);
        let all = fellow_traveler_constant(&g, &FellowTravelerConfig::default()).unwrap();
        let disjoint =
            fellow_traveler_constant(&g, &FellowTravelerConfig::disjoint_only()).unwrap();
        assert_eq!(diameter(&g), Some(2));
        assert_eq!(all, 2);
        assert!(disjoint <= all);
    }

    #[test]
    fn test_disjoint_filter_drops_crossing_pairs() {
        // K4, length 2: of the 30 ordered pairs, only those meeting at the
        // origin and at A's endpoint survive the filter (2 per path).
        let g = complete_graph(4);
        let all = fellow_traveler_report(&g, &FellowTravelerConfig::default()).unwrap();
        let disjoint = fellow_traveler_report(&g, &FellowTravelerConfig::disjoint_only()).unwrap();
        assert_eq!(all.pairs_compared, 36);
        assert_eq!(disjoint.pairs_compared, 18);
        assert_eq!(all.class_maxima, BTreeMap::from([(1, 0), (2, 1)]));
        assert_eq!(disjoint.class_maxima, BTreeMap::from([(1, 0), (2, 1)]));
        assert_eq!(disjoint.stopped_at, Some(2));
    }

    #[test]
    fn test_directed_unreachable_position() {
        // 0 -> 1 -> 3 and 0 -> 2 -> 3 share an endpoint, but 2 is not
        // reachable from 1.
        let mut g = Graph::directed();
        g.add_edge(0u32, 1);
        g.add_edge(0, 2);
        g.add_edge(1, 3);
        g.add_edge(2, 3);
        let err = fellow_traveler_constant(&g, &FellowTravelerConfig::default()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Unreachable {
                from: "1".to_string(),
                to: "2".to_string(),
            }
        );
    }

    #[test]
    fn test_meets_only_at_ends() {
        assert!(meets_only_at_ends(&0, &[0, 1, 2], &[0, 3, 2]));
        assert!(meets_only_at_ends(&0, &[0, 1, 2], &[0, 3, 4]));
        assert!(!meets_only_at_ends(&0, &[0, 1, 2], &[0, 1, 4]));
    }

    #[test]
    fn test_limit_rejects_large_graph() {
        let config = FellowTravelerConfig {
            limits: AnalysisLimits {
                max_vertices: 4,
                ..AnalysisLimits::default()
            },
            ..FellowTravelerConfig::default()
        };
        let err = fellow_traveler_constant(&cycle_graph(5), &config).unwrap_err();
        assert!(matches!(err, AnalysisError::TooLarge { actual: 5, limit: 4, .. }));
    }
}
