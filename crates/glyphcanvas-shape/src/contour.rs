//! Contour ordering, chain codes, curvature and corners
//!
//! Edge points come out of [`extract_edges`](crate::edge::extract_edges) in
//! raster order. They are put into contour order with a greedy
//! nearest-neighbor walk, then encoded as 8-direction Freeman chain codes.
//! The walk can jump across gaps; such non-unit steps are encoded as
//! [`ChainDirection::East`], which is a known approximation.

use crate::edge::EdgePoint;
use std::f64::consts::PI;

/// Corner curvature threshold (30 degrees)
pub const CORNER_THRESHOLD: f64 = PI / 6.0;

/// Half-width of the corner local-maximum window
const CORNER_WINDOW: isize = 2;

/// Freeman chain-code direction.
///
/// `y` grows downward, so `North` is a step with `dy == -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChainDirection {
    /// East (1, 0)
    East = 0,
    /// Northeast (1, -1)
    NorthEast = 1,
    /// North (0, -1)
    North = 2,
    /// Northwest (-1, -1)
    NorthWest = 3,
    /// West (-1, 0)
    West = 4,
    /// Southwest (-1, 1)
    SouthWest = 5,
    /// South (0, 1)
    South = 6,
    /// Southeast (1, 1)
    SouthEast = 7,
}

impl ChainDirection {
    /// Numeric code 0-7
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Direction of a unit step, or `None` for any other offset
    pub fn from_step(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(Self::East),
            (1, -1) => Some(Self::NorthEast),
            (0, -1) => Some(Self::North),
            (-1, -1) => Some(Self::NorthWest),
            (-1, 0) => Some(Self::West),
            (-1, 1) => Some(Self::SouthWest),
            (0, 1) => Some(Self::South),
            (1, 1) => Some(Self::SouthEast),
            _ => None,
        }
    }
}

/// Reorder edge points by a greedy nearest-neighbor walk.
///
/// The walk starts at the first point and repeatedly moves to the closest
/// unvisited point; ties go to the point that comes first in `edges`.
pub fn order_contour(edges: &[EdgePoint]) -> Vec<EdgePoint> {
    let Some(&first) = edges.first() else {
        return Vec::new();
    };

    let mut visited = vec![false; edges.len()];
    let mut sorted = Vec::with_capacity(edges.len());
    visited[0] = true;
    sorted.push(first);
    let mut current = first.point;

    while sorted.len() < edges.len() {
        let mut best: Option<(usize, i64)> = None;
        for (i, edge) in edges.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let dx = (edge.point.x - current.x) as i64;
            let dy = (edge.point.y - current.y) as i64;
            let d2 = dx * dx + dy * dy;
            if best.is_none_or(|(_, bd)| d2 < bd) {
                best = Some((i, d2));
            }
        }
        let Some((idx, _)) = best else { break };
        visited[idx] = true;
        sorted.push(edges[idx]);
        current = edges[idx].point;
    }

    sorted
}

/// Chain code of points already in contour order.
///
/// Produces one direction per consecutive pair; fewer than 2 points yield
/// an empty code.
pub fn chain_code_of(contour: &[EdgePoint]) -> Vec<ChainDirection> {
    contour
        .windows(2)
        .map(|pair| {
            let dx = pair[1].point.x - pair[0].point.x;
            let dy = pair[1].point.y - pair[0].point.y;
            ChainDirection::from_step(dx, dy).unwrap_or(ChainDirection::East)
        })
        .collect()
}

/// Order `edges` into a contour and chain-code it.
pub fn chain_code(edges: &[EdgePoint]) -> Vec<ChainDirection> {
    if edges.len() < 2 {
        return Vec::new();
    }
    chain_code_of(&order_contour(edges))
}

/// Wrap an angle into (-pi, pi]
#[inline]
fn wrap_angle(mut a: f64) -> f64 {
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Discrete curvature at each chain-code index.
///
/// `curvature[i]` averages the turn into and out of step `i`, each turn
/// being the code difference times pi/4 wrapped into (-pi, pi]. Indices
/// wrap around at both ends.
pub fn curvatures(codes: &[ChainDirection]) -> Vec<f64> {
    let n = codes.len();
    (0..n)
        .map(|i| {
            let prev = codes[(i + n - 1) % n].code() as i32;
            let curr = codes[i].code() as i32;
            let next = codes[(i + 1) % n].code() as i32;
            let angle1 = wrap_angle((curr - prev) as f64 * PI / 4.0);
            let angle2 = wrap_angle((next - curr) as f64 * PI / 4.0);
            (angle1 + angle2) / 2.0
        })
        .collect()
}

/// Indices of corners in a curvature sequence, in index order.
///
/// A corner has `|curvature| > pi/6` and is a local maximum of
/// `|curvature|` over a cyclic window of two indices on either side. Of a
/// run of equal maxima only the first index is reported: it must be
/// strictly greater than the values before it and at least the values after.
pub fn detect_corners(curvatures: &[f64]) -> Vec<usize> {
    let n = curvatures.len();
    let mut corners = Vec::new();
    for i in 0..n {
        let c = curvatures[i].abs();
        if c <= CORNER_THRESHOLD {
            continue;
        }
        let is_max = (-CORNER_WINDOW..=CORNER_WINDOW)
            .filter(|&off| off != 0)
            .all(|off| {
                let j = (i as isize + off).rem_euclid(n as isize) as usize;
                if j == i {
                    return true;
                }
                let other = curvatures[j].abs();
                if off < 0 { c > other } else { c >= other }
            });
        if is_max {
            corners.push(i);
        }
    }
    corners
}

/// Mean absolute curvature, 0 for an empty sequence
pub fn mean_abs_curvature(curvatures: &[f64]) -> f64 {
    if curvatures.is_empty() {
        return 0.0;
    }
    curvatures.iter().map(|c| c.abs()).sum::<f64>() / curvatures.len() as f64
}
