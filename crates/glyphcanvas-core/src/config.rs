//! Character analysis configuration
//!
//! [`CharacterConfig`] bundles every threshold used by anchor detection,
//! skeleton extraction, region decomposition and character classification.
//! It is validated once when a character is created and is shared read-only
//! afterwards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pixel connectivity for foreground component counting.
///
/// Background regions are traced with the complementary connectivity, so
/// 8-connected foreground implies 4-connected holes and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connectivity {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl Connectivity {
    /// The connectivity used for the complementary (background) set
    pub fn complement(self) -> Self {
        match self {
            Self::FourWay => Self::EightWay,
            Self::EightWay => Self::FourWay,
        }
    }

    /// Neighbor offsets for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::FourWay => &crate::point::NEIGHBORS_4,
            Self::EightWay => &crate::point::NEIGHBORS_8,
        }
    }
}

/// Thresholds and switches for character-level analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Minimum strength for an anchor to count as "strong" in the analysis
    /// summary, in [0, 1]
    pub anchor_detection_threshold: f64,
    /// Anchors closer than this to a stronger anchor are suppressed
    pub min_anchor_distance: f64,
    /// Minimum contour turning angle (radians) for a corner anchor
    pub curvature_threshold: f64,
    /// Minimum distance value for a ridge point; also sets the curvature
    /// window as `round(1 / epsilon)`
    pub medial_axis_epsilon: f64,
    /// Medial-axis simplification factor, in [0, 1].
    ///
    /// Reserved: validated and serialized, but no algorithm reads it yet.
    pub medial_axis_simplification: f64,
    /// Skeleton branches shorter than this polyline length are pruned
    pub skeleton_pruning_threshold: f64,
    /// Decomposition fragments smaller than this are merged into a neighbor
    pub min_region_size: usize,
    /// Similarity above which two fragments are considered mergeable, in [0, 1].
    ///
    /// Reserved: validated and serialized, but fragment merging only looks
    /// at `min_region_size`.
    pub region_merge_threshold: f64,
    /// Foreground connectivity for component counting
    pub connectivity: Connectivity,
    /// Add stroke-width boundary cuts during decomposition
    pub enable_stroke_analysis: bool,
    /// Run skeleton and topology analysis during character analysis
    pub enable_topology_analysis: bool,
    /// Detect junction anchors
    pub enable_junction_detection: bool,
    pub circularity_threshold: f64,
    pub linearity_threshold: f64,
    pub rectangularity_threshold: f64,
    /// Analyze batches of characters on the rayon thread pool
    pub enable_parallel_processing: bool,
    /// Upper bound on decomposition fragments (lines kept is one less)
    pub max_regions: usize,
    /// Advisory time limit for a full character analysis
    pub computation_timeout: Duration,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            anchor_detection_threshold: 0.7,
            min_anchor_distance: 3.0,
            curvature_threshold: 0.5,
            medial_axis_epsilon: 0.1,
            medial_axis_simplification: 0.2,
            skeleton_pruning_threshold: 5.0,
            min_region_size: 4,
            region_merge_threshold: 0.8,
            connectivity: Connectivity::EightWay,
            enable_stroke_analysis: true,
            enable_topology_analysis: true,
            enable_junction_detection: true,
            circularity_threshold: 0.85,
            linearity_threshold: 0.9,
            rectangularity_threshold: 0.8,
            enable_parallel_processing: true,
            max_regions: 100,
            computation_timeout: Duration::from_millis(5000),
        }
    }
}

impl CharacterConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_detection_threshold(mut self, threshold: f64) -> Self {
        self.anchor_detection_threshold = threshold;
        self
    }

    pub fn with_min_anchor_distance(mut self, distance: f64) -> Self {
        self.min_anchor_distance = distance;
        self
    }

    pub fn with_curvature_threshold(mut self, threshold: f64) -> Self {
        self.curvature_threshold = threshold;
        self
    }

    pub fn with_medial_axis_epsilon(mut self, epsilon: f64) -> Self {
        self.medial_axis_epsilon = epsilon;
        self
    }

    pub fn with_skeleton_pruning_threshold(mut self, threshold: f64) -> Self {
        self.skeleton_pruning_threshold = threshold;
        self
    }

    pub fn with_min_region_size(mut self, size: usize) -> Self {
        self.min_region_size = size;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_stroke_analysis(mut self, enable: bool) -> Self {
        self.enable_stroke_analysis = enable;
        self
    }

    pub fn with_topology_analysis(mut self, enable: bool) -> Self {
        self.enable_topology_analysis = enable;
        self
    }

    pub fn with_junction_detection(mut self, enable: bool) -> Self {
        self.enable_junction_detection = enable;
        self
    }

    pub fn with_parallel_processing(mut self, enable: bool) -> Self {
        self.enable_parallel_processing = enable;
        self
    }

    pub fn with_max_regions(mut self, max_regions: usize) -> Self {
        self.max_regions = max_regions;
        self
    }

    pub fn with_computation_timeout(mut self, timeout: Duration) -> Self {
        self.computation_timeout = timeout;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        unit_interval("anchor_detection_threshold", self.anchor_detection_threshold)?;
        if !self.min_anchor_distance.is_finite() || self.min_anchor_distance < 0.0 {
            return Err(Error::InvalidConfig(
                "min_anchor_distance must be non-negative".to_string(),
            ));
        }
        if !self.curvature_threshold.is_finite() || self.curvature_threshold < 0.0 {
            return Err(Error::InvalidConfig(
                "curvature_threshold must be non-negative".to_string(),
            ));
        }
        if !self.medial_axis_epsilon.is_finite() || self.medial_axis_epsilon <= 0.0 {
            return Err(Error::InvalidConfig(
                "medial_axis_epsilon must be positive".to_string(),
            ));
        }
        unit_interval("medial_axis_simplification", self.medial_axis_simplification)?;
        if !self.skeleton_pruning_threshold.is_finite() || self.skeleton_pruning_threshold < 0.0 {
            return Err(Error::InvalidConfig(
                "skeleton_pruning_threshold must be non-negative".to_string(),
            ));
        }
        if self.min_region_size == 0 {
            return Err(Error::InvalidConfig(
                "min_region_size must be positive".to_string(),
            ));
        }
        unit_interval("region_merge_threshold", self.region_merge_threshold)?;
        unit_interval("circularity_threshold", self.circularity_threshold)?;
        unit_interval("linearity_threshold", self.linearity_threshold)?;
        unit_interval("rectangularity_threshold", self.rectangularity_threshold)?;
        if self.max_regions == 0 {
            return Err(Error::InvalidConfig(
                "max_regions must be positive".to_string(),
            ));
        }
        if self.computation_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "computation_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}
