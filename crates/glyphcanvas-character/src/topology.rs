//! Character topology
//!
//! Connected components, holes and the Euler number, combined with the
//! anchor and skeleton results into one summary.

use crate::anchor::{AnchorKind, AnchorPoint};
use crate::character::Character;
use crate::skeleton::Skeleton;
use glyphcanvas_core::{BinaryRegion, Connectivity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Structural counts for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub branch_count: usize,
    /// Total polyline length of the surviving skeleton branches
    pub medial_length: f64,
    pub components: usize,
    pub holes: usize,
    /// `components - holes`
    pub euler_number: i64,
    pub anchor_count: usize,
    /// Anchor counts for every kind, zero counts included
    pub anchors_by_kind: BTreeMap<AnchorKind, usize>,
}

impl TopologySummary {
    /// Count of anchors of `kind`
    pub fn anchors_of(&self, kind: AnchorKind) -> usize {
        self.anchors_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Full structural analysis of a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTopology {
    pub anchors: Vec<AnchorPoint>,
    pub skeleton: Skeleton,
    pub summary: TopologySummary,
}

/// Label every pixel matching `foreground` with flood fill and return, per
/// component, whether it touches the raster border.
fn flood_components(
    region: &BinaryRegion,
    foreground: bool,
    connectivity: Connectivity,
) -> Vec<bool> {
    let (w, h) = (region.width() as i32, region.height() as i32);
    let mut visited = vec![false; w as usize * h as usize];
    let mut touches_border = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if visited[idx] || region.is_drawn(x, y) != foreground {
                continue;
            }

            let mut border = false;
            visited[idx] = true;
            queue.push_back((x, y));
            while let Some((cx, cy)) = queue.pop_front() {
                if cx == 0 || cy == 0 || cx == w - 1 || cy == h - 1 {
                    border = true;
                }
                for &(dx, dy) in connectivity.offsets() {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let nidx = (ny * w + nx) as usize;
                    if !visited[nidx] && region.is_drawn(nx, ny) == foreground {
                        visited[nidx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
            touches_border.push(border);
        }
    }

    touches_border
}

/// Number of foreground components under `connectivity`
pub fn count_components(region: &BinaryRegion, connectivity: Connectivity) -> usize {
    flood_components(region, true, connectivity).len()
}

/// Number of holes.
///
/// A hole is a background component, under the complement of
/// `connectivity`, that does not touch the raster border.
pub fn count_holes(region: &BinaryRegion, connectivity: Connectivity) -> usize {
    flood_components(region, false, connectivity.complement())
        .into_iter()
        .filter(|&border| !border)
        .count()
}

/// Build the summary from already computed anchors and skeleton
pub fn summarize(
    region: &BinaryRegion,
    connectivity: Connectivity,
    anchors: &[AnchorPoint],
    skeleton: &Skeleton,
) -> TopologySummary {
    let components = count_components(region, connectivity);
    let holes = count_holes(region, connectivity);

    let mut anchors_by_kind: BTreeMap<AnchorKind, usize> =
        AnchorKind::ALL.iter().map(|&k| (k, 0)).collect();
    for anchor in anchors {
        *anchors_by_kind.entry(anchor.kind).or_insert(0) += 1;
    }

    TopologySummary {
        branch_count: skeleton.branches.len(),
        medial_length: skeleton.total_length(),
        components,
        holes,
        euler_number: components as i64 - holes as i64,
        anchor_count: anchors.len(),
        anchors_by_kind,
    }
}

/// Detect anchors, compute the medial axis and summarize the topology.
///
/// Anchors and medial axis are recomputed and cached on the character, so
/// repeated calls give identical results. Returns `None` for a character
/// with no live pixels.
pub fn analyze_character_topology(character: &mut Character) -> Option<CharacterTopology> {
    if character.is_empty() {
        return None;
    }

    let anchors = character.detect_anchors().to_vec();
    let skeleton = character.compute_medial_axis().clone();
    let summary = summarize(
        character.region(),
        character.config().connectivity,
        &anchors,
        &skeleton,
    );
    tracing::debug!(
        components = summary.components,
        holes = summary.holes,
        branches = summary.branch_count,
        anchors = summary.anchor_count,
        "topology analyzed"
    );

    Some(CharacterTopology {
        anchors,
        skeleton,
        summary,
    })
}
