//! cayley-graph-core: structural invariants of small vertex-transitive graphs.
//!
//! A pure Rust library over an in-memory adjacency-list graph. Provides
//! simple-path enumeration from the origin, the fellow-traveler constant,
//! rotation maps, and the replacement and zig-zag products used in expander
//! constructions, plus Cayley-graph construction for small finite groups.
//!
//! Everything here is exhaustive and single-threaded: meant for graphs with
//! tens of vertices. [`AnalysisLimits`] bounds the exponential parts.

mod cayley;
mod config;
mod expansion;
mod fellow_traveler;
mod generators;
mod graph;
mod product;
mod rotation;
mod traversal;

pub use cayley::{
    cayley_graph, check_group, group_generators, CayleyError, CyclicGroup, DihedralGroup, Group,
    GroupError, TableGroup,
};
pub use config::{AnalysisLimits, FellowTravelerConfig};
pub use expansion::{cheeger_constant, edge_expansion};
pub use fellow_traveler::{
    fellow_traveler_constant, fellow_traveler_report, origin, paths_from_origin, AnalysisError,
    FellowTravelerReport, Path, PathsByLength,
};
pub use generators::{
    complete_bipartite_graph, complete_graph, cycle_graph, random_regular_graph, GeneratorError,
    MAX_PAIRING_ATTEMPTS,
};
pub use graph::{Edge, EdgeLabel, EdgeRecord, Graph, GraphError, GraphKind, Vertex};
pub use product::{
    replacement_product, zig_zag_from_replacement, zig_zag_product, CloudVertex, ProductError,
};
pub use rotation::{label_arcs, rotation_map, RotationMap};
pub use traversal::{all_paths, diameter, distance, eccentricity, is_connected};
