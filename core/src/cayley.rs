use std::collections::BTreeSet;

use log::debug;
use thiserror::Error;

use crate::graph::{Graph, Vertex};

/// A finite group, as far as Cayley-graph construction needs one.
///
/// Implementations only promise an operation; whether the axioms hold is
/// decided by [`check_group`].
pub trait Group {
    type Element: Vertex;

    fn elements(&self) -> Vec<Self::Element>;

    /// `a * b`, or None if the product is undefined.
    fn op(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element>;

    fn generators(&self) -> Vec<Self::Element>;

    /// The two-sided identity, found by search.
    fn identity(&self) -> Option<Self::Element> {
        let elements = self.elements();
        elements
            .iter()
            .find(|e| {
                elements
                    .iter()
                    .all(|a| self.op(e, a).as_ref() == Some(a) && self.op(a, e).as_ref() == Some(a))
            })
            .cloned()
    }

    fn inverse(&self, a: &Self::Element) -> Option<Self::Element> {
        let e = self.identity()?;
        self.elements().into_iter().find(|b| {
            self.op(a, b).as_ref() == Some(&e) && self.op(b, a).as_ref() == Some(&e)
        })
    }
}

/// Z/nZ under addition, generated by 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicGroup {
    pub n: usize,
}

impl CyclicGroup {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Group for CyclicGroup {
    type Element = usize;

    fn elements(&self) -> Vec<usize> {
        (0..self.n).collect()
    }

    fn op(&self, a: &usize, b: &usize) -> Option<usize> {
        (*a < self.n && *b < self.n).then(|| (a + b) % self.n)
    }

    fn generators(&self) -> Vec<usize> {
        match self.n {
            0 | 1 => Vec::new(),
            _ => vec![1],
        }
    }
}

/// Symmetries of the regular n-gon. `(k, x)` stands for r^k s^x, with r the
/// rotation by one step and s a reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DihedralGroup {
    pub n: usize,
}

impl DihedralGroup {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Group for DihedralGroup {
    type Element = (usize, bool);

    fn elements(&self) -> Vec<(usize, bool)> {
        [false, true]
            .into_iter()
            .flat_map(|s| (0..self.n).map(move |k| (k, s)))
            .collect()
    }

    fn op(&self, a: &(usize, bool), b: &(usize, bool)) -> Option<(usize, bool)> {
        let n = self.n;
        if a.0 >= n || b.0 >= n {
            return None;
        }
        // r^i s^x * r^j s^y = r^(i +- j) s^(x ^ y)
        let k = if a.1 { (a.0 + n - b.0) % n } else { (a.0 + b.0) % n };
        Some((k, a.1 ^ b.1))
    }

    fn generators(&self) -> Vec<(usize, bool)> {
        if self.n == 0 {
            return Vec::new();
        }
        vec![(1 % self.n, false), (0, true)]
    }
}

/// A finite magma given by its multiplication table on `0..n`.
///
/// Nothing is validated on construction; run [`check_group`] to find out
/// whether the table describes a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGroup {
    table: Vec<Vec<usize>>,
    generators: Vec<usize>,
}

impl TableGroup {
    pub fn new(table: Vec<Vec<usize>>, generators: Vec<usize>) -> Self {
        Self { table, generators }
    }
}

impl Group for TableGroup {
    type Element = usize;

    fn elements(&self) -> Vec<usize> {
        (0..self.table.len()).collect()
    }

    fn op(&self, a: &usize, b: &usize) -> Option<usize> {
        self.table.get(*a).and_then(|row| row.get(*b)).copied()
    }

    fn generators(&self) -> Vec<usize> {
        self.generators.clone()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("group has no elements")]
    Empty,
    #[error("{a} * {b} is not an element")]
    NotClosed { a: String, b: String },
    #[error("no identity element")]
    NoIdentity,
    #[error("{0} has no inverse")]
    NoInverse(String),
    #[error("({a} * {b}) * {c} != {a} * ({b} * {c})")]
    NotAssociative { a: String, b: String, c: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CayleyError {
    #[error("not a group: {0}")]
    NotAGroup(#[from] GroupError),
    #[error("generator {0} is not a group element")]
    ForeignGenerator(String),
    #[error("vertex {0} is not a group element")]
    ForeignElement(String),
}

/// Check the group axioms by brute force: closure, identity, inverses,
/// associativity. O(n^3) in the group order.
pub fn check_group<G: Group>(group: &G) -> Result<(), GroupError> {
    let elements = group.elements();
    if elements.is_empty() {
        return Err(GroupError::Empty);
    }
    let members: BTreeSet<&G::Element> = elements.iter().collect();

    for a in &elements {
        for b in &elements {
            match group.op(a, b) {
                Some(c) if members.contains(&c) => {}
                _ => {
                    return Err(GroupError::NotClosed {
                        a: format!("{:?}", a),
                        b: format!("{:?}", b),
                    })
                }
            }
        }
    }

    if group.identity().is_none() {
        return Err(GroupError::NoIdentity);
    }
    if let Some(a) = elements.iter().find(|a| group.inverse(a).is_none()) {
        return Err(GroupError::NoInverse(format!("{:?}", a)));
    }

    for a in &elements {
        for b in &elements {
            for c in &elements {
                let left = group.op(a, b).and_then(|ab| group.op(&ab, c));
                let right = group.op(b, c).and_then(|bc| group.op(a, &bc));
                if left != right {
                    return Err(GroupError::NotAssociative {
                        a: format!("{:?}", a),
                        b: format!("{:?}", b),
                        c: format!("{:?}", c),
                    });
                }
            }
        }
    }

    Ok(())
}

/// The group's own generating set.
pub fn group_generators<G: Group>(group: &G) -> Vec<G::Element> {
    group.generators()
}

/// Directed Cayley graph: an arc g -> g * s for every vertex g and
/// generator s, labeled with s's 1-based position in `generators`.
///
/// With `elements`, only those vertices are kept, and only arcs between
/// them. Call [`Graph::to_undirected`] for the undirected Cayley graph.
pub fn cayley_graph<G: Group>(
    group: &G,
    generators: &[G::Element],
    elements: Option<&[G::Element]>,
) -> Result<Graph<G::Element>, CayleyError> {
    check_group(group)?;

    let all = group.elements();
    let members: BTreeSet<&G::Element> = all.iter().collect();
    if let Some(s) = generators.iter().find(|s| !members.contains(s)) {
        return Err(CayleyError::ForeignGenerator(format!("{:?}", s)));
    }

    let vertices: BTreeSet<&G::Element> = match elements {
        Some(subset) => {
            if let Some(v) = subset.iter().find(|v| !members.contains(v)) {
                return Err(CayleyError::ForeignElement(format!("{:?}", v)));
            }
            subset.iter().collect()
        }
        None => members,
    };

    let mut graph = Graph::directed();
    for &g in &vertices {
        graph.add_vertex(g.clone());
        for (label, s) in (1..).zip(generators) {
            let Some(h) = group.op(g, s) else {
                continue;
            };
            if vertices.contains(&h) {
                graph.add_labeled_edge(g.clone(), h, Some(label));
            }
        }
    }

    debug!(
        "cayley graph: {} vertices, {} arcs, {} generators",
        graph.order(),
        graph.size(),
        generators.len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FellowTravelerConfig;
    use crate::fellow_traveler::fellow_traveler_constant;
    use crate::traversal::{diameter, is_connected};

    fn klein_four() -> TableGroup {
        TableGroup::new(
            vec![
                vec![0, 1, 2, 3],
                vec![1, 0, 3, 2],
                vec![2, 3, 0, 1],
                vec![3, 2, 1, 0],
            ],
            vec![1, 2],
        )
    }

    // --- group checks ---

    #[test]
    fn test_builtin_groups_pass() {
        assert_eq!(check_group(&CyclicGroup::new(7)), Ok(()));
        assert_eq!(check_group(&DihedralGroup::new(5)), Ok(()));
        assert_eq!(check_group(&klein_four()), Ok(()));
    }

    #[test]
    fn test_identity_and_inverse() {
        let d4 = DihedralGroup::new(4);
        assert_eq!(d4.identity(), Some((0, false)));
        assert_eq!(d4.inverse(&(1, false)), Some((3, false)));
        assert_eq!(d4.inverse(&(1, true)), Some((1, true)));
        assert_eq!(CyclicGroup::new(6).inverse(&2), Some(4));
    }

    #[test]
    fn test_dihedral_is_not_abelian() {
        let d3 = DihedralGroup::new(3);
        let r = (1, false);
        let s = (0, true);
        assert_ne!(d3.op(&r, &s), d3.op(&s, &r));
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(check_group(&CyclicGroup::new(0)), Err(GroupError::Empty));
    }

    #[test]
    fn test_table_not_closed() {
        let g = TableGroup::new(vec![vec![0, 2], vec![2, 0]], vec![1]);
        assert!(matches!(check_group(&g), Err(GroupError::NotClosed { .. })));
    }

    #[test]
    fn test_table_without_inverse() {
        let g = TableGroup::new(vec![vec![0, 1], vec![1, 1]], vec![1]);
        assert_eq!(check_group(&g), Err(GroupError::NoInverse("1".to_string())));
    }

    #[test]
    fn test_table_without_identity() {
        let g = TableGroup::new(vec![vec![0, 0], vec![0, 0]], vec![1]);
        assert_eq!(check_group(&g), Err(GroupError::NoIdentity));
    }

    #[test]
    fn test_table_not_associative() {
        // 0 is the identity and every element is its own inverse, but
        // (2 * 1) * 1 = 0 while 2 * (1 * 1) = 2.
        let g = TableGroup::new(vec![vec![0, 1, 2], vec![1, 0, 1], vec![2, 1, 0]], vec![1, 2]);
        assert_eq!(g.identity(), Some(0));
        assert!(matches!(check_group(&g), Err(GroupError::NotAssociative { .. })));
    }

    // --- Cayley graphs ---

    #[test]
    fn test_cayley_cyclic_is_cycle() {
        let z = CyclicGroup::new(6);
        let g = cayley_graph(&z, &[1, 5], None).unwrap().to_undirected();
        assert_eq!(g.order(), 6);
        assert_eq!(g.regular_degree(), Some(2));
        assert_eq!(diameter(&g), Some(3));
        let k = fellow_traveler_constant(&g, &FellowTravelerConfig::default()).unwrap();
        assert_eq!(k, 2);
    }

    #[test]
    fn test_cayley_directed_labels() {
        let z = CyclicGroup::new(5);
        let g = cayley_graph(&z, &group_generators(&z), None).unwrap();
        assert!(g.is_directed());
        assert_eq!(g.size(), 5);
        assert_eq!(g.edge_label(&4, &0), Some(1));
        assert!(is_connected(&g));
    }

    #[test]
    fn test_cayley_dihedral_three_regular() {
        let d = DihedralGroup::new(5);
        let g = cayley_graph(&d, &group_generators(&d), None).unwrap().to_undirected();
        assert_eq!(g.order(), 10);
        assert_eq!(g.regular_degree(), Some(3));
        assert!(is_connected(&g));
    }

    #[test]
    fn test_cayley_restricted_elements() {
        let z = CyclicGroup::new(8);
        let g = cayley_graph(&z, &[1], Some(&[0, 1, 2, 5][..])).unwrap();
        assert_eq!(g.order(), 4);
        assert_eq!(g.size(), 2);
        assert!(g.has_edge(&0, &1));
        assert!(g.has_edge(&1, &2));
    }

    #[test]
    fn test_cayley_rejects_non_group() {
        let g = TableGroup::new(vec![vec![0, 1], vec![1, 1]], vec![1]);
        let err = cayley_graph(&g, &[1], None).unwrap_err();
        assert!(matches!(err, CayleyError::NotAGroup(GroupError::NoInverse(_))));
    }

    #[test]
    fn test_cayley_rejects_foreign_generator() {
        let err = cayley_graph(&CyclicGroup::new(4), &[9], None).unwrap_err();
        assert_eq!(err, CayleyError::ForeignGenerator("9".to_string()));
        let err = cayley_graph(&CyclicGroup::new(4), &[1], Some(&[0, 7][..])).unwrap_err();
        assert_eq!(err, CayleyError::ForeignElement("7".to_string()));
    }
}
