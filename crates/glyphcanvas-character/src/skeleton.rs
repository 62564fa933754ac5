//! Medial axis extraction
//!
//! The medial axis is approximated by the ridge of the chamfer distance
//! transform. Ridge points are grouped into branches by a depth-first walk
//! over 8-adjacent ridge points, and short branches are pruned.
//!
//! # Examples
//!
//! ```
//! use glyphcanvas_core::{BinaryRegion, CharacterConfig};
//! use glyphcanvas_character::compute_skeleton;
//!
//! let mut region = BinaryRegion::new(32, 16).unwrap();
//! for x in 4..28 {
//!     region.draw(x, 8).unwrap();
//! }
//! let skeleton = compute_skeleton(&region, &CharacterConfig::default());
//! assert_eq!(skeleton.branches.len(), 1);
//! assert_eq!(skeleton.medial_axis.len(), 24);
//! ```

use crate::distance::{DistanceMap, distance_transform};
use glyphcanvas_core::{BinaryRegion, CharacterConfig, NEIGHBORS_8, Point};
use serde::{Deserialize, Serialize};

/// Sequential branch identifier, assigned in tracing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BranchId(pub u32);

/// One 8-connected group of medial points in depth-first order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub points: Vec<Point>,
}

impl Branch {
    /// Polyline length over consecutive points
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// First and last point of the branch
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((*self.points.first()?, *self.points.last()?))
    }
}

/// Medial axis of a region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    /// Points of the surviving branches, in branch-id order
    pub medial_axis: Vec<Point>,
    pub branches: Vec<Branch>,
}

impl Skeleton {
    /// Sum of the surviving branch lengths
    pub fn total_length(&self) -> f64 {
        self.branches.iter().map(Branch::length).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.medial_axis.is_empty()
    }
}

/// Ridge points of a distance map in row-major order.
///
/// A ridge point is an interior foreground pixel whose distance exceeds
/// `epsilon` and is not smaller than any 8-neighbor's distance.
pub fn extract_ridge(region: &BinaryRegion, dist: &DistanceMap, epsilon: f64) -> Vec<Point> {
    let (w, h) = (region.width() as i32, region.height() as i32);
    let mut ridge = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if !region.is_drawn(x, y) {
                continue;
            }
            let d = dist.get(x, y);
            if d <= epsilon {
                continue;
            }
            let max_neighbor = NEIGHBORS_8
                .iter()
                .map(|&(dx, dy)| dist.get(x + dx, y + dy))
                .fold(0.0, f64::max);
            // no strictly larger neighbor; this also gives d >= 0.9 * max
            if d >= max_neighbor {
                ridge.push(Point::new(x, y));
            }
        }
    }
    ridge
}

/// Group ridge points into 8-connected branches.
///
/// Groups are started in `ridge` order and each is walked depth-first with
/// neighbors pushed in [`NEIGHBORS_8`] order.
pub fn trace_branches(width: u32, height: u32, ridge: &[Point]) -> Vec<Branch> {
    let (w, h) = (width as i32, height as i32);
    let index = |p: Point| -> Option<usize> {
        (p.x >= 0 && p.y >= 0 && p.x < w && p.y < h).then(|| (p.y * w + p.x) as usize)
    };

    let mut on_ridge = vec![false; width as usize * height as usize];
    for &p in ridge {
        if let Some(i) = index(p) {
            on_ridge[i] = true;
        }
    }

    let mut visited = vec![false; on_ridge.len()];
    let mut branches = Vec::new();
    let mut stack = Vec::new();

    for &start in ridge {
        let Some(si) = index(start) else { continue };
        if visited[si] {
            continue;
        }

        let mut points = Vec::new();
        stack.push(start);
        while let Some(p) = stack.pop() {
            let Some(pi) = index(p) else { continue };
            if visited[pi] {
                continue;
            }
            visited[pi] = true;
            points.push(p);
            for n in p.neighbors8() {
                if index(n).is_some_and(|ni| on_ridge[ni] && !visited[ni]) {
                    stack.push(n);
                }
            }
        }

        branches.push(Branch {
            id: BranchId(branches.len() as u32),
            points,
        });
    }

    branches
}

/// Drop branches shorter than `threshold`, keeping ids unchanged
pub fn prune_branches(branches: Vec<Branch>, threshold: f64) -> Vec<Branch> {
    let before = branches.len();
    let kept: Vec<Branch> = branches
        .into_iter()
        .filter(|b| b.length() >= threshold)
        .collect();
    tracing::debug!(before, after = kept.len(), threshold, "pruned skeleton branches");
    kept
}

/// Compute the pruned medial axis of a region.
pub fn compute_skeleton(region: &BinaryRegion, config: &CharacterConfig) -> Skeleton {
    let dist = distance_transform(region);
    let ridge = extract_ridge(region, &dist, config.medial_axis_epsilon);
    let branches = trace_branches(region.width(), region.height(), &ridge);
    let mut branches = prune_branches(branches, config.skeleton_pruning_threshold);
    branches.sort_by_key(|b| b.id);

    let medial_axis = branches
        .iter()
        .flat_map(|b| b.points.iter().copied())
        .collect();
    Skeleton {
        medial_axis,
        branches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_length() {
        let branch = Branch {
            id: BranchId(0),
            points: vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 1)],
        };
        assert!((branch.length() - (1.0 + 2f64.sqrt())).abs() < 1e-12);
        assert_eq!(
            branch.endpoints(),
            Some((Point::new(0, 0), Point::new(2, 1)))
        );
    }

    #[test]
    fn test_trace_separates_groups() {
        let ridge = vec![
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(6, 6),
            Point::new(3, 3),
        ];
        let branches = trace_branches(10, 10, &ridge);
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].id, BranchId(0));
        assert_eq!(
            branches[0].points,
            vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]
        );
        assert_eq!(branches[1].points, vec![Point::new(6, 6)]);
    }

    #[test]
    fn test_short_branches_pruned() {
        let mut region = BinaryRegion::new(32, 32).unwrap();
        for x in 4..28 {
            region.draw(x, 8).unwrap();
        }
        // an isolated 3-pixel stroke, length 2
        for x in 10..13 {
            region.draw(x, 20).unwrap();
        }
        let skeleton = compute_skeleton(&region, &CharacterConfig::default());
        assert_eq!(skeleton.branches.len(), 1);
        assert_eq!(skeleton.branches[0].id, BranchId(0));
        assert!(skeleton.medial_axis.iter().all(|p| p.y == 8));
        assert!((skeleton.total_length() - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_thick_bar_ridge_is_centered() {
        let mut region = BinaryRegion::new(40, 20).unwrap();
        for y in 5..=9 {
            for x in 5..=34 {
                region.draw(x, y).unwrap();
            }
        }
        let skeleton = compute_skeleton(&region, &CharacterConfig::default());
        assert!(!skeleton.is_empty());
        assert!(skeleton.medial_axis.iter().all(|p| p.y == 7));
    }

    #[test]
    fn test_empty_region() {
        let region = BinaryRegion::new(8, 8).unwrap();
        assert!(compute_skeleton(&region, &CharacterConfig::default()).is_empty());
    }
}
