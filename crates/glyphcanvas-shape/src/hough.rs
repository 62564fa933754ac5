//! Hough transforms for lines and circles
//!
//! Both detectors vote over edge points into an ordered accumulator and
//! rank the surviving cells by `(votes desc, key asc)`, so the result does
//! not depend on hash iteration order.
//!
//! Costs are `O(edges * 180)` for lines and
//! `O(edges * radii * 36)` for circles, which is fine for glyph-sized
//! regions.

use crate::edge::EdgePoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Number of theta samples for line detection (1 degree apart)
const LINE_THETA_STEPS: u32 = 180;
/// Number of theta samples for circle center voting (10 degrees apart)
const CIRCLE_THETA_STEPS: u32 = 36;
const MIN_RADIUS: f64 = 5.0;
const RADIUS_STEP: f64 = 2.0;
/// Lines returned by [`detect_lines`]
pub const MAX_LINES: usize = 5;
/// Circles returned by [`detect_circles`]
pub const MAX_CIRCLES: usize = 3;

/// A ranked Hough cell.
///
/// For lines `rho` is the signed distance of the line from the origin and
/// `theta` the angle of its normal in [0, pi). For circles `rho` holds the
/// radius and `theta` the polar angle of the center, `atan2(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoughAccumulator {
    pub rho: f64,
    pub theta: f64,
    pub votes: u32,
}

fn rank<K: Ord + Copy>(acc: BTreeMap<K, u32>, threshold: u32, limit: usize) -> Vec<(K, u32)> {
    let mut cells: Vec<(K, u32)> = acc.into_iter().filter(|&(_, v)| v > threshold).collect();
    // BTreeMap iteration is key-ascending; the stable sort keeps that order
    // among equal vote counts.
    cells.sort_by(|a, b| b.1.cmp(&a.1));
    cells.truncate(limit);
    cells
}

/// Detect straight lines through the edge points.
///
/// Each edge votes once per theta sample into the cell
/// `(floor(rho + rho_max), theta_index)` with `rho_max = sqrt(W^2 + H^2)`.
/// Cells with more than `edges / 4` votes are kept and the top
/// [`MAX_LINES`] returned. Fewer than 2 edges yield nothing.
pub fn detect_lines(width: u32, height: u32, edges: &[EdgePoint]) -> Vec<HoughAccumulator> {
    if edges.len() < 2 {
        return Vec::new();
    }

    let (w, h) = (width as f64, height as f64);
    let max_rho = (w * w + h * h).sqrt();
    let theta_step = PI / LINE_THETA_STEPS as f64;
    let trig: Vec<(f64, f64)> = (0..LINE_THETA_STEPS)
        .map(|k| {
            let theta = k as f64 * theta_step;
            (theta.cos(), theta.sin())
        })
        .collect();

    let mut acc: BTreeMap<(i64, u32), u32> = BTreeMap::new();
    for edge in edges {
        let (x, y) = (edge.point.x as f64, edge.point.y as f64);
        for (k, &(cos, sin)) in trig.iter().enumerate() {
            let rho = x * cos + y * sin;
            let rho_idx = (rho + max_rho).floor() as i64;
            *acc.entry((rho_idx, k as u32)).or_insert(0) += 1;
        }
    }

    let threshold = (edges.len() / 4) as u32;
    rank(acc, threshold, MAX_LINES)
        .into_iter()
        .map(|((rho_idx, k), votes)| HoughAccumulator {
            rho: rho_idx as f64 - max_rho,
            theta: k as f64 * theta_step,
            votes,
        })
        .collect()
}

/// Detect circles through the edge points.
///
/// For each radius `5, 7, ...` up to `min(W, H) / 2` and each of 36
/// directions, an edge votes for the candidate center
/// `(x - r cos t, y - r sin t)` when it lies inside the raster. Cells are
/// keyed by the rounded center and radius. Cells with more than
/// `edges / 10` votes are kept and the top [`MAX_CIRCLES`] returned. Fewer
/// than 3 edges yield nothing.
pub fn detect_circles(width: u32, height: u32, edges: &[EdgePoint]) -> Vec<HoughAccumulator> {
    if edges.len() < 3 {
        return Vec::new();
    }

    let (w, h) = (width as f64, height as f64);
    let max_radius = w.min(h) / 2.0;
    let theta_step = PI / 18.0;
    let trig: Vec<(f64, f64)> = (0..CIRCLE_THETA_STEPS)
        .map(|k| {
            let theta = k as f64 * theta_step;
            (theta.cos(), theta.sin())
        })
        .collect();
    let radii: Vec<f64> = std::iter::successors(Some(MIN_RADIUS), |r| Some(r + RADIUS_STEP))
        .take_while(|&r| r <= max_radius)
        .collect();

    let mut acc: BTreeMap<(i64, i64, i64), u32> = BTreeMap::new();
    for edge in edges {
        let (x, y) = (edge.point.x as f64, edge.point.y as f64);
        for &r in &radii {
            for &(cos, sin) in &trig {
                let a = x - r * cos;
                let b = y - r * sin;
                if a >= 0.0 && a < w && b >= 0.0 && b < h {
                    let key = (
                        a.round_ties_even() as i64,
                        b.round_ties_even() as i64,
                        r.round_ties_even() as i64,
                    );
                    *acc.entry(key).or_insert(0) += 1;
                }
            }
        }
    }

    let threshold = (edges.len() / 10) as u32;
    rank(acc, threshold, MAX_CIRCLES)
        .into_iter()
        .map(|((a, b, r), votes)| HoughAccumulator {
            rho: r as f64,
            theta: (b as f64).atan2(a as f64),
            votes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcanvas_core::Point;

    fn edges_of(points: impl IntoIterator<Item = (i32, i32)>) -> Vec<EdgePoint> {
        points
            .into_iter()
            .map(|(x, y)| EdgePoint {
                point: Point::new(x, y),
                angle: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_too_few_edges() {
        assert!(detect_lines(10, 10, &edges_of([(1, 1)])).is_empty());
        assert!(detect_circles(10, 10, &edges_of([(1, 1), (2, 2)])).is_empty());
    }

    #[test]
    fn test_horizontal_line() {
        let edges = edges_of((10..60).map(|x| (x, 32)));
        let lines = detect_lines(64, 64, &edges);
        assert!(!lines.is_empty() && lines.len() <= MAX_LINES);
        assert_eq!(lines[0].votes, 50);
        assert!((lines[0].theta - PI / 2.0).abs() < 1e-9);
        assert!((lines[0].rho - 32.0).abs() < 1.0);
    }

    #[test]
    fn test_vertical_line() {
        let edges = edges_of((5..45).map(|y| (20, y)));
        let lines = detect_lines(64, 64, &edges);
        assert_eq!(lines[0].votes, 40);
        assert_eq!(lines[0].theta, 0.0);
    }

    #[test]
    fn test_ranking_is_sorted() {
        let edges = edges_of((10..40).map(|i| (i, i)).chain((10..40).map(|x| (x, 45))));
        let lines = detect_lines(64, 64, &edges);
        assert!(lines.windows(2).all(|w| w[0].votes >= w[1].votes));
        let again = detect_lines(64, 64, &edges);
        assert_eq!(lines, again);
    }

    #[test]
    fn test_circles_bounded_and_deterministic() {
        let pts: Vec<(i32, i32)> = (0..36)
            .map(|k| {
                let t = k as f64 * PI / 18.0;
                (
                    (32.0 + 11.0 * t.cos()).round() as i32,
                    (32.0 + 11.0 * t.sin()).round() as i32,
                )
            })
            .collect();
        let edges = edges_of(pts);
        let circles = detect_circles(64, 64, &edges);
        assert!(!circles.is_empty() && circles.len() <= MAX_CIRCLES);
        assert!(circles.windows(2).all(|w| w[0].votes >= w[1].votes));
        assert_eq!(circles, detect_circles(64, 64, &edges));
        assert!(circles.iter().all(|c| c.rho >= MIN_RADIUS));
    }
}
