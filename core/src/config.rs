/// Input-size bounds for the exhaustive computations.
///
/// Path enumeration and subset-based expansion are exponential; nothing
/// inside the engine interrupts them once started, so callers bound the
/// input here. Checked before any work begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisLimits {
    /// Largest graph (vertex count) accepted by path enumeration and the
    /// fellow-traveler evaluator.
    pub max_vertices: usize,
    /// Largest graph accepted by [`edge_expansion`](crate::edge_expansion).
    /// Work grows as 2^n.
    pub max_expansion_vertices: usize,
}

impl AnalysisLimits {
    pub const DEFAULT_MAX_VERTICES: usize = 64;
    pub const DEFAULT_MAX_EXPANSION_VERTICES: usize = 24;
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_vertices: Self::DEFAULT_MAX_VERTICES,
            max_expansion_vertices: Self::DEFAULT_MAX_EXPANSION_VERTICES,
        }
    }
}

/// Settings for [`fellow_traveler_constant`](crate::fellow_traveler_constant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FellowTravelerConfig {
    /// Only compare path pairs that meet at the origin and, optionally, at
    /// a shared endpoint.
    pub exclude_non_disjoint_paths: bool,
    pub limits: AnalysisLimits,
}

impl FellowTravelerConfig {
    pub fn disjoint_only() -> Self {
        Self {
            exclude_non_disjoint_paths: true,
            ..Self::default()
        }
    }
}
