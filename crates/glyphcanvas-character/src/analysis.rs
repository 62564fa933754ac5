//! Comprehensive character analysis
//!
//! [`analyze_character`] runs every stage on one character: anchors,
//! medial axis and topology, whole-glyph moments, decomposition, then shape
//! metrics for each fragment. The per-fragment metrics are aggregated and
//! turned into a coarse classification of the glyph.
//!
//! `computation_timeout` is advisory: the elapsed time is measured and a
//! warning is logged when it is exceeded, but the analysis always
//! completes.

use crate::anchor::AnchorKind;
use crate::character::Character;
use crate::decompose::decompose_character;
use crate::topology::{CharacterTopology, analyze_character_topology};
use glyphcanvas_core::{BinaryRegion, Bounds, CharacterConfig};
use glyphcanvas_shape::{
    HuInvariants, Moments, ShapeDescriptor, ShapeKind, compute_shape_descriptor,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Medial complexity below this is [`ComplexityLevel::Simple`]
const SIMPLE_COMPLEXITY: f64 = 0.1;
/// Medial complexity below this is [`ComplexityLevel::Moderate`]
const MODERATE_COMPLEXITY: f64 = 0.3;

/// Shape metrics of one decomposition fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentMetrics {
    pub moments: Moments,
    pub hu: HuInvariants,
    pub circularity: f64,
    pub linearity: f64,
    pub rectangularity: f64,
    pub ellipse_ratio: f64,
    pub pixel_count: usize,
    /// Raster area `W * H` of the fragment
    pub bounding_area: u64,
    pub descriptor: Option<ShapeDescriptor>,
}

impl FragmentMetrics {
    pub fn from_region(region: &BinaryRegion) -> Self {
        let moments = Moments::from_region(region);
        let hu = HuInvariants::from_moments(&moments);
        Self {
            moments,
            hu,
            circularity: hu.circularity(),
            linearity: hu.linearity(),
            rectangularity: hu.rectangularity(),
            ellipse_ratio: moments.ellipse_axis_ratio(),
            pixel_count: region.pixel_count(),
            bounding_area: region.width() as u64 * region.height() as u64,
            descriptor: compute_shape_descriptor(region),
        }
    }
}

/// Character-level aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub average_circularity: f64,
    pub average_linearity: f64,
    pub average_rectangularity: f64,
    /// Sum of fragment `m00`
    pub total_area: f64,
    pub fragment_count: usize,
    /// Fragments per classified shape kind
    pub shape_distribution: BTreeMap<ShapeKind, usize>,
    /// Anchors per unit of total area, 0 when the area is 0
    pub anchor_density: f64,
    /// Anchors whose strength reaches `anchor_detection_threshold`
    pub strong_anchor_count: usize,
    /// `(medial points + 2 * branches + medial length) / bounding box area`
    pub medial_complexity: f64,
    pub branch_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

impl ComplexityLevel {
    pub fn from_complexity(complexity: f64) -> Self {
        if complexity < SIMPLE_COMPLEXITY {
            ComplexityLevel::Simple
        } else if complexity < MODERATE_COMPLEXITY {
            ComplexityLevel::Moderate
        } else {
            ComplexityLevel::Complex
        }
    }
}

/// Coarse topology class of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopologyKind {
    Solid,
    SingleHole,
    MultipleHoles,
    /// More than one connected component, whatever the hole count
    Disconnected,
}

impl TopologyKind {
    pub fn from_counts(components: usize, holes: usize) -> Self {
        if components > 1 {
            return TopologyKind::Disconnected;
        }
        match holes {
            0 => TopologyKind::Solid,
            1 => TopologyKind::SingleHole,
            _ => TopologyKind::MultipleHoles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub is_circular: bool,
    pub is_linear: bool,
    pub is_rectangular: bool,
    pub complexity: ComplexityLevel,
    /// `None` when topology analysis is disabled in the configuration
    pub topology: Option<TopologyKind>,
    /// More than two junction anchors
    pub has_multiple_junctions: bool,
    /// More than four plain corner anchors; sharp corners are not counted
    pub has_many_corners: bool,
}

/// Everything [`analyze_character`] computes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterAnalysis {
    pub width: u32,
    pub height: u32,
    pub pixel_count: usize,
    pub bounds: Option<Bounds>,
    pub topology: CharacterTopology,
    pub moments: Moments,
    pub hu: HuInvariants,
    pub fragments: Vec<FragmentMetrics>,
    pub aggregate: AggregateMetrics,
    pub classification: Classification,
}

fn aggregate(
    fragments: &[FragmentMetrics],
    topology: &CharacterTopology,
    bounds: Option<Bounds>,
    config: &CharacterConfig,
) -> AggregateMetrics {
    let count = fragments.len();
    let average = |f: fn(&FragmentMetrics) -> f64| {
        if count == 0 {
            0.0
        } else {
            fragments.iter().map(f).sum::<f64>() / count as f64
        }
    };

    let total_area: f64 = fragments.iter().map(|f| f.moments.m00).sum();
    let mut shape_distribution = BTreeMap::new();
    for kind in fragments.iter().filter_map(|f| f.descriptor.map(|d| d.kind())) {
        *shape_distribution.entry(kind).or_insert(0) += 1;
    }

    let anchors = &topology.anchors;
    let anchor_density = if total_area > 0.0 {
        anchors.len() as f64 / total_area
    } else {
        0.0
    };
    let strong_anchor_count = anchors
        .iter()
        .filter(|a| a.strength >= config.anchor_detection_threshold)
        .count();

    let skeleton = &topology.skeleton;
    let bbox_area = bounds.map_or(0, |b| b.area()) as f64;
    let medial_complexity = if bbox_area > 0.0 {
        (skeleton.medial_axis.len() as f64
            + 2.0 * skeleton.branches.len() as f64
            + skeleton.total_length())
            / bbox_area
    } else {
        0.0
    };

    AggregateMetrics {
        average_circularity: average(|f| f.circularity),
        average_linearity: average(|f| f.linearity),
        average_rectangularity: average(|f| f.rectangularity),
        total_area,
        fragment_count: count,
        shape_distribution,
        anchor_density,
        strong_anchor_count,
        medial_complexity,
        branch_count: skeleton.branches.len(),
    }
}

fn classify(
    aggregate: &AggregateMetrics,
    topology: &CharacterTopology,
    config: &CharacterConfig,
) -> Classification {
    let summary = &topology.summary;
    Classification {
        is_circular: aggregate.average_circularity > config.circularity_threshold,
        is_linear: aggregate.average_linearity > config.linearity_threshold,
        is_rectangular: aggregate.average_rectangularity > config.rectangularity_threshold,
        complexity: ComplexityLevel::from_complexity(aggregate.medial_complexity),
        topology: config
            .enable_topology_analysis
            .then(|| TopologyKind::from_counts(summary.components, summary.holes)),
        has_multiple_junctions: summary.anchors_of(AnchorKind::Junction) > 2,
        has_many_corners: summary.anchors_of(AnchorKind::Corner) > 4,
    }
}

/// Run the full analysis on one character.
///
/// Returns `None` for a character with no live pixels. Anchors and medial
/// axis are recomputed and left cached on the character.
pub fn analyze_character(character: &mut Character) -> Option<CharacterAnalysis> {
    let started = Instant::now();

    let topology = analyze_character_topology(character)?;
    let moments = Moments::from_region(character.region());
    let hu = HuInvariants::from_moments(&moments);

    let fragments: Vec<FragmentMetrics> = decompose_character(character)
        .iter()
        .map(FragmentMetrics::from_region)
        .collect();

    let config = character.config();
    let bounds = character.bounds();
    let aggregate = aggregate(&fragments, &topology, bounds, config);
    let classification = classify(&aggregate, &topology, config);

    let elapsed = started.elapsed();
    if elapsed > config.computation_timeout {
        tracing::warn!(
            elapsed_ms = elapsed.as_millis() as u64,
            timeout_ms = config.computation_timeout.as_millis() as u64,
            "character analysis exceeded its time budget"
        );
    }
    tracing::debug!(
        fragments = fragments.len(),
        complexity = aggregate.medial_complexity,
        "character analyzed"
    );

    Some(CharacterAnalysis {
        width: character.width(),
        height: character.height(),
        pixel_count: character.pixel_count(),
        bounds,
        topology,
        moments,
        hu,
        fragments,
        aggregate,
        classification,
    })
}

/// Analyze many characters.
///
/// Runs on the rayon thread pool when the first character's configuration
/// enables parallel processing; results keep the input order either way.
pub fn analyze_characters(characters: &mut [Character]) -> Vec<Option<CharacterAnalysis>> {
    let parallel = characters
        .first()
        .is_some_and(|c| c.config().enable_parallel_processing);
    if parallel {
        characters.par_iter_mut().map(analyze_character).collect()
    } else {
        characters.iter_mut().map(analyze_character).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::AnchorPoint;
    use crate::skeleton::Skeleton;
    use crate::topology::summarize;
    use glyphcanvas_core::{Connectivity, Point};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn filled_square(size: i32) -> Character {
        let mut ch = Character::with_default_config(40, 40).unwrap();
        for y in 5..5 + size {
            for x in 5..5 + size {
                ch.draw(x, y).unwrap();
            }
        }
        ch
    }

    #[test]
    fn test_complexity_levels() {
        assert_eq!(ComplexityLevel::from_complexity(0.05), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::from_complexity(0.1), ComplexityLevel::Moderate);
        assert_eq!(ComplexityLevel::from_complexity(0.3), ComplexityLevel::Complex);
    }

    #[test]
    fn test_topology_kinds() {
        assert_eq!(TopologyKind::from_counts(1, 0), TopologyKind::Solid);
        assert_eq!(TopologyKind::from_counts(1, 1), TopologyKind::SingleHole);
        assert_eq!(TopologyKind::from_counts(1, 3), TopologyKind::MultipleHoles);
        assert_eq!(TopologyKind::from_counts(2, 1), TopologyKind::Disconnected);
    }

    fn topology_with(kind: AnchorKind, count: usize) -> CharacterTopology {
        let region = BinaryRegion::new(40, 40).unwrap();
        let anchors: Vec<AnchorPoint> = (0..count as i32)
            .map(|i| AnchorPoint {
                point: Point::new(i * 6, 0),
                kind,
                strength: 0.9,
                curvature: 2.0,
                direction: 0.0,
            })
            .collect();
        let skeleton = Skeleton::default();
        let summary = summarize(&region, Connectivity::EightWay, &anchors, &skeleton);
        CharacterTopology {
            anchors,
            skeleton,
            summary,
        }
    }

    fn blank_aggregate() -> AggregateMetrics {
        AggregateMetrics {
            average_circularity: 0.0,
            average_linearity: 0.0,
            average_rectangularity: 0.0,
            total_area: 0.0,
            fragment_count: 0,
            shape_distribution: BTreeMap::new(),
            anchor_density: 0.0,
            strong_anchor_count: 0,
            medial_complexity: 0.0,
            branch_count: 0,
        }
    }

    #[test]
    fn test_many_corners_counts_plain_corners_only() {
        let config = CharacterConfig::default();
        let aggregate = blank_aggregate();

        let sharp = classify(&aggregate, &topology_with(AnchorKind::SharpCorner, 5), &config);
        assert!(!sharp.has_many_corners);

        let plain = classify(&aggregate, &topology_with(AnchorKind::Corner, 5), &config);
        assert!(plain.has_many_corners);

        let four = classify(&aggregate, &topology_with(AnchorKind::Corner, 4), &config);
        assert!(!four.has_many_corners);
    }

    #[test]
    fn test_empty_character() {
        let mut ch = Character::with_default_config(10, 10).unwrap();
        assert!(analyze_character(&mut ch).is_none());
    }

    #[test]
    fn test_filled_square() {
        let mut ch = filled_square(20);
        let analysis = analyze_character(&mut ch).unwrap();
        assert_eq!(analysis.pixel_count, 400);
        assert_eq!(analysis.moments.m00, 400.0);
        assert_eq!(analysis.classification.topology, Some(TopologyKind::Solid));
        assert!(analysis.aggregate.fragment_count >= 1);
        let covered: usize = analysis.fragments.iter().map(|f| f.pixel_count).sum();
        assert_eq!(covered, 400);
        assert_eq!(analysis.aggregate.total_area, 400.0);
        assert!(analysis.aggregate.anchor_density > 0.0);
    }

    #[test]
    fn test_topology_flag() {
        let config = Arc::new(CharacterConfig::default().with_topology_analysis(false));
        let mut ch = Character::new(20, 20, config).unwrap();
        for x in 3..17 {
            ch.draw(x, 10).unwrap();
        }
        let analysis = analyze_character(&mut ch).unwrap();
        assert_eq!(analysis.classification.topology, None);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let mut batch = vec![
            filled_square(10),
            Character::with_default_config(8, 8).unwrap(),
            filled_square(16),
        ];
        let mut sequential = batch.clone();
        let parallel_results = analyze_characters(&mut batch);
        let sequential_results: Vec<_> = sequential.iter_mut().map(analyze_character).collect();
        assert_eq!(parallel_results.len(), 3);
        assert!(parallel_results[1].is_none());
        assert_eq!(parallel_results, sequential_results);
    }
}
