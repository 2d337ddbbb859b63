use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::{Graph, Vertex};

/// All simple paths from `start` to `target`, each including both endpoints.
///
/// Exhaustive depth-first enumeration: exponential in general, only meant
/// for small graphs. `start == target` yields the single trivial path.
/// Follows arc direction on directed graphs.
pub fn all_paths<V: Vertex>(graph: &Graph<V>, start: &V, target: &V) -> Vec<Vec<V>> {
    if !graph.has_vertex(start) || !graph.has_vertex(target) {
        return Vec::new();
    }
    if start == target {
        return vec![vec![start.clone()]];
    }

    let mut paths = Vec::new();
    let mut path = vec![start.clone()];
    let mut on_path: HashSet<V> = HashSet::new();
    on_path.insert(start.clone());
    extend_paths(graph, target, &mut path, &mut on_path, &mut paths);
    paths
}

fn extend_paths<V: Vertex>(
    graph: &Graph<V>,
    target: &V,
    path: &mut Vec<V>,
    on_path: &mut HashSet<V>,
    paths: &mut Vec<Vec<V>>,
) {
    let Some(current) = path.last().cloned() else {
        return;
    };

    for edge in graph.neighbors(&current) {
        if on_path.contains(&edge.target) {
            continue;
        }
        path.push(edge.target.clone());
        if &edge.target == target {
            paths.push(path.clone());
        } else {
            on_path.insert(edge.target.clone());
            extend_paths(graph, target, path, on_path, paths);
            on_path.remove(&edge.target);
        }
        path.pop();
    }
}

/// BFS distances from `start` to every reachable vertex (including itself).
fn bfs_distances<V: Vertex>(graph: &Graph<V>, start: &V) -> HashMap<V, usize> {
    let mut visited: HashMap<V, usize> = HashMap::new();
    if !graph.has_vertex(start) {
        return visited;
    }

    let mut queue: VecDeque<(V, usize)> = VecDeque::new();
    visited.insert(start.clone(), 0);
    queue.push_back((start.clone(), 0));

    while let Some((current, depth)) = queue.pop_front() {
        for edge in graph.neighbors(&current) {
            if !visited.contains_key(&edge.target) {
                visited.insert(edge.target.clone(), depth + 1);
                queue.push_back((edge.target.clone(), depth + 1));
            }
        }
    }

    visited
}

/// Number of edges on a shortest path from `start` to `target`.
///
/// Returns None if `target` is unreachable or either vertex is not in the
/// graph. Unweighted BFS with early exit.
pub fn distance<V: Vertex>(graph: &Graph<V>, start: &V, target: &V) -> Option<usize> {
    if !graph.has_vertex(start) || !graph.has_vertex(target) {
        return None;
    }
    if start == target {
        return Some(0);
    }

    let mut visited: HashSet<V> = HashSet::new();
    let mut queue: VecDeque<(V, usize)> = VecDeque::new();
    visited.insert(start.clone());
    queue.push_back((start.clone(), 0));

    while let Some((current, depth)) = queue.pop_front() {
        for edge in graph.neighbors(&current) {
            if visited.insert(edge.target.clone()) {
                if &edge.target == target {
                    return Some(depth + 1);
                }
                queue.push_back((edge.target.clone(), depth + 1));
            }
        }
    }

    None
}

/// Largest distance from `vertex` to any other vertex, or None if some
/// vertex is unreachable from it.
pub fn eccentricity<V: Vertex>(graph: &Graph<V>, vertex: &V) -> Option<usize> {
    let distances = bfs_distances(graph, vertex);
    if distances.len() != graph.order() {
        return None;
    }
    distances.values().copied().max()
}

/// Maximum eccentricity. None for an empty graph, or when some pair of
/// vertices is not connected (in arc direction, for directed graphs).
pub fn diameter<V: Vertex>(graph: &Graph<V>) -> Option<usize> {
    if graph.order() == 0 {
        return None;
    }
    graph
        .vertices()
        .map(|v| eccentricity(graph, v))
        .try_fold(0, |acc, ecc| ecc.map(|e| acc.max(e)))
}

/// Every vertex reaches every other. Strong connectivity on directed graphs.
pub fn is_connected<V: Vertex>(graph: &Graph<V>) -> bool {
    let Some(first) = graph.vertices().next() else {
        return true;
    };
    if graph.is_directed() {
        graph
            .vertices()
            .all(|v| bfs_distances(graph, v).len() == graph.order())
    } else {
        bfs_distances(graph, first).len() == graph.order()
    }
}
