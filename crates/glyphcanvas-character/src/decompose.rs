//! Region decomposition
//!
//! A character is cut into fragments by straight segmentation lines. Lines
//! come from three sources: pairs of anchors, the medial axis (rays out of
//! branch points and links between nearby branch ends) and abrupt changes
//! of stroke width along the medial axis. The strongest, mutually distinct
//! lines split the live pixel set by side, then undersized fragments are
//! merged back into a neighbor.

use crate::anchor::{AnchorKind, AnchorPoint};
use crate::character::Character;
use crate::skeleton::Skeleton;
use glyphcanvas_core::{BinaryRegion, CharacterConfig, Point};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Junction-to-anchor lines are drawn up to this distance
const JUNCTION_REACH: f64 = 20.0;
/// Medial points with at least this many 8-adjacent medial neighbors are
/// branch points
const BRANCH_POINT_DEGREE: usize = 3;
/// Stroke-width rays stop after this many steps
const MAX_WIDTH_STEPS: u32 = 50;
/// Width difference between medial neighbors that marks a stroke change
const WIDTH_CHANGE: f64 = 2.0;
/// Lines whose endpoints sum closer than this are duplicates
const MIN_LINE_SEPARATION: f64 = 3.0;

/// Where a segmentation line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSource {
    AnchorBased,
    MedialBased,
    StrokeBoundary,
}

/// A straight cut through the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationLine {
    pub start: Point,
    pub end: Point,
    pub source: LineSource,
    pub strength: f64,
}

impl SegmentationLine {
    fn new(start: Point, end: Point, source: LineSource, strength: f64) -> Self {
        Self {
            start,
            end,
            source,
            strength,
        }
    }

    /// Side of the line `p` falls on: `true` for a non-negative cross
    /// product of `end - start` and `p - start`.
    #[inline]
    pub fn side(&self, p: Point) -> bool {
        let (x1, y1) = (self.start.x as i64, self.start.y as i64);
        let (x2, y2) = (self.end.x as i64, self.end.y as i64);
        let cross = (x2 - x1) * (p.y as i64 - y1) - (y2 - y1) * (p.x as i64 - x1);
        cross >= 0
    }

    /// Smaller of the direct and swapped endpoint distance sums
    fn separation(&self, other: &SegmentationLine) -> f64 {
        let direct = self.start.distance(other.start) + self.end.distance(other.end);
        let swapped = self.start.distance(other.end) + self.end.distance(other.start);
        direct.min(swapped)
    }
}

/// Walk from `start` in direction `angle` with rounded unit steps.
///
/// Returns the last visited position before the first background pixel, or
/// `None` if the walk leaves the raster or never meets background.
pub fn cast_ray_to_boundary(region: &BinaryRegion, start: Point, angle: f64) -> Option<Point> {
    let (dx, dy) = (angle.cos(), angle.sin());
    let (mut x, mut y) = (start.x as f64, start.y as f64);
    let mut last = start;
    let max_steps = region.width().max(region.height());

    for _ in 0..max_steps {
        x += dx;
        y += dy;
        let p = Point::new(x.round() as i32, y.round() as i32);
        if !region.in_bounds(p.x, p.y) {
            return None;
        }
        if !region.contains(p) {
            return Some(last);
        }
        last = p;
    }
    None
}

/// Number of steps from `start` along `angle` up to and including the
/// first background pixel, capped at 50.
pub fn ray_length(region: &BinaryRegion, start: Point, angle: f64) -> u32 {
    let (dx, dy) = (angle.cos(), angle.sin());
    let (mut x, mut y) = (start.x as f64, start.y as f64);
    let mut steps = 0;
    while steps < MAX_WIDTH_STEPS {
        x += dx;
        y += dy;
        steps += 1;
        if !region.is_drawn(x.round() as i32, y.round() as i32) {
            break;
        }
    }
    steps
}

/// Stroke width at `p`: the longest of the four opposite ray pairs
pub fn stroke_width(region: &BinaryRegion, p: Point) -> f64 {
    [0.0, FRAC_PI_4, FRAC_PI_2, 3.0 * FRAC_PI_4]
        .into_iter()
        .map(|a| ray_length(region, p, a) + ray_length(region, p, a + PI))
        .max()
        .unwrap_or(0) as f64
}

fn anchor_lines(
    anchors: &[AnchorPoint],
    region: &BinaryRegion,
    config: &CharacterConfig,
) -> Vec<SegmentationLine> {
    let mut lines = Vec::new();

    for (i, junction) in anchors.iter().enumerate() {
        if junction.kind != AnchorKind::Junction {
            continue;
        }
        for (j, other) in anchors.iter().enumerate() {
            if i != j && junction.point.distance(other.point) <= JUNCTION_REACH {
                lines.push(SegmentationLine::new(
                    junction.point,
                    other.point,
                    LineSource::AnchorBased,
                    (junction.strength + other.strength) / 2.0,
                ));
            }
        }
    }

    // sharp corners stay out of the pairing
    let corners: Vec<&AnchorPoint> = anchors
        .iter()
        .filter(|a| a.kind == AnchorKind::Corner)
        .collect();
    for (i, a) in corners.iter().enumerate() {
        for b in &corners[i + 1..] {
            if a.point.distance(b.point) > config.min_anchor_distance * 2.0 {
                lines.push(SegmentationLine::new(
                    a.point,
                    b.point,
                    LineSource::AnchorBased,
                    (a.strength + b.strength) / 2.0 * 0.8,
                ));
            }
        }
    }

    let live = region.foreground_points();
    if !live.is_empty() {
        let n = live.len() as i64;
        let sx: i64 = live.iter().map(|p| p.x as i64).sum();
        let sy: i64 = live.iter().map(|p| p.y as i64).sum();
        let center = Point::new((sx / n) as i32, (sy / n) as i32);
        for extremum in anchors.iter().filter(|a| a.kind.is_extremum()) {
            lines.push(SegmentationLine::new(
                extremum.point,
                center,
                LineSource::AnchorBased,
                extremum.strength * 0.6,
            ));
        }
    }

    lines
}

/// Row-major membership grid of the medial axis
struct MedialGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl MedialGrid {
    fn new(width: u32, height: u32, points: &[Point]) -> Self {
        let mut grid = Self {
            width: width as i32,
            height: height as i32,
            cells: vec![false; width as usize * height as usize],
        };
        for &p in points {
            if let Some(i) = grid.index(p) {
                grid.cells[i] = true;
            }
        }
        grid
    }

    fn index(&self, p: Point) -> Option<usize> {
        (p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height)
            .then(|| (p.y * self.width + p.x) as usize)
    }

    fn contains(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.cells[i])
    }

    fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors8().filter(|&n| self.contains(n))
    }
}

fn medial_lines(
    skeleton: &Skeleton,
    region: &BinaryRegion,
    config: &CharacterConfig,
) -> Vec<SegmentationLine> {
    let mut lines = Vec::new();
    let grid = MedialGrid::new(region.width(), region.height(), &skeleton.medial_axis);

    for &p in &skeleton.medial_axis {
        if grid.neighbors(p).count() < BRANCH_POINT_DEGREE {
            continue;
        }
        for k in 0..8 {
            let angle = k as f64 * FRAC_PI_4;
            if let Some(end) = cast_ray_to_boundary(region, p, angle) {
                lines.push(SegmentationLine::new(p, end, LineSource::MedialBased, 0.7));
            }
        }
    }

    let endpoints: Vec<(Point, Point)> = skeleton
        .branches
        .iter()
        .filter_map(|b| b.endpoints())
        .collect();
    let reach = config.min_anchor_distance * 1.5;
    for (i, &(a0, a1)) in endpoints.iter().enumerate() {
        for &(b0, b1) in &endpoints[i + 1..] {
            for (a, b) in [(a0, b0), (a0, b1), (a1, b0), (a1, b1)] {
                if a.distance(b) < reach {
                    lines.push(SegmentationLine::new(a, b, LineSource::MedialBased, 0.8));
                }
            }
        }
    }

    lines
}

fn stroke_lines(skeleton: &Skeleton, region: &BinaryRegion) -> Vec<SegmentationLine> {
    let mut lines = Vec::new();
    let grid = MedialGrid::new(region.width(), region.height(), &skeleton.medial_axis);
    let mut widths = vec![0.0; grid.cells.len()];
    for &p in &skeleton.medial_axis {
        if let Some(i) = grid.index(p) {
            widths[i] = stroke_width(region, p);
        }
    }
    let width_at = |p: Point| grid.index(p).map_or(0.0, |i| widths[i]);

    for &p in &skeleton.medial_axis {
        let w = width_at(p);
        let changed = grid
            .neighbors(p)
            .any(|n| (w - width_at(n)).abs() > WIDTH_CHANGE);
        if !changed {
            continue;
        }

        let (sx, sy) = grid
            .neighbors(p)
            .fold((0, 0), |(sx, sy), n| (sx + n.x - p.x, sy + n.y - p.y));
        let direction = if (sx, sy) == (0, 0) {
            0.0
        } else {
            (sy as f64).atan2(sx as f64)
        };
        let perpendicular = direction + FRAC_PI_2;

        let a = cast_ray_to_boundary(region, p, perpendicular);
        let b = cast_ray_to_boundary(region, p, perpendicular + PI);
        if let (Some(a), Some(b)) = (a, b) {
            lines.push(SegmentationLine::new(a, b, LineSource::StrokeBoundary, 0.6));
        }
    }

    lines
}

/// Collect every candidate segmentation line, unfiltered.
///
/// Stroke-boundary lines are only produced when `enable_stroke_analysis`
/// is set.
pub fn segmentation_lines(
    region: &BinaryRegion,
    config: &CharacterConfig,
    anchors: &[AnchorPoint],
    skeleton: &Skeleton,
) -> Vec<SegmentationLine> {
    let mut lines = anchor_lines(anchors, region, config);
    lines.extend(medial_lines(skeleton, region, config));
    if config.enable_stroke_analysis {
        lines.extend(stroke_lines(skeleton, region));
    }
    lines
}

/// Keep the strongest mutually distinct lines, at most `max_regions - 1`.
pub fn filter_lines(mut lines: Vec<SegmentationLine>, max_regions: usize) -> Vec<SegmentationLine> {
    let limit = max_regions.saturating_sub(1);
    lines.sort_by(|a, b| b.strength.total_cmp(&a.strength));

    let mut kept: Vec<SegmentationLine> = Vec::new();
    for line in lines {
        if kept.len() >= limit {
            break;
        }
        if kept.iter().all(|k| k.separation(&line) >= MIN_LINE_SEPARATION) {
            kept.push(line);
        }
    }
    kept
}

/// Split every point set by every line in order; empty halves vanish.
pub fn split_by_lines(points: Vec<Point>, lines: &[SegmentationLine]) -> Vec<Vec<Point>> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut regions = vec![points];
    for line in lines {
        let mut next = Vec::with_capacity(regions.len() * 2);
        for region in regions {
            let (left, right): (Vec<Point>, Vec<Point>) =
                region.into_iter().partition(|&p| line.side(p));
            tracing::trace!(left = left.len(), right = right.len(), "split by line");
            next.extend([left, right].into_iter().filter(|r| !r.is_empty()));
        }
        regions = next;
    }
    regions
}

/// Merge fragments smaller than `min_size` into the first accepted
/// fragment that touches them (8-adjacency). Fragments with no such
/// neighbor are kept as they are.
pub fn merge_small_regions(
    width: u32,
    height: u32,
    fragments: Vec<Vec<Point>>,
    min_size: usize,
) -> Vec<Vec<Point>> {
    let (w, h) = (width as i32, height as i32);
    let index = |p: Point| -> Option<usize> {
        (p.x >= 0 && p.y >= 0 && p.x < w && p.y < h).then(|| (p.y * w + p.x) as usize)
    };
    let mut owner: Vec<Option<usize>> = vec![None; width as usize * height as usize];
    let mut refined: Vec<Vec<Point>> = Vec::new();

    for fragment in fragments {
        let target = if fragment.len() >= min_size {
            None
        } else {
            fragment
                .iter()
                .flat_map(|p| p.neighbors8())
                .filter_map(|n| index(n).and_then(|i| owner[i]))
                .min()
        };

        let slot = match target {
            Some(t) => t,
            None => {
                refined.push(Vec::new());
                refined.len() - 1
            }
        };
        for &p in &fragment {
            if let Some(i) = index(p) {
                owner[i] = Some(slot);
            }
        }
        refined[slot].extend(fragment);
    }

    refined
}

/// Decompose a character into fragments that partition its live pixels.
///
/// Anchors and the medial axis are taken from the character's cache and
/// computed first if missing. An empty character yields no fragments.
pub fn decompose_character(character: &mut Character) -> Vec<BinaryRegion> {
    if character.is_empty() {
        return Vec::new();
    }

    let anchors = character.anchors_or_detect().to_vec();
    let skeleton = character.skeleton_or_compute().clone();
    let region = character.region();
    let config = character.config();

    let candidates = segmentation_lines(region, config, &anchors, &skeleton);
    let candidate_count = candidates.len();
    let lines = filter_lines(candidates, config.max_regions);

    let fragments = split_by_lines(region.foreground_points(), &lines);
    let split_count = fragments.len();
    let fragments = merge_small_regions(
        region.width(),
        region.height(),
        fragments,
        config.min_region_size,
    );
    tracing::debug!(
        candidates = candidate_count,
        lines = lines.len(),
        split = split_count,
        fragments = fragments.len(),
        "character decomposed"
    );

    fragments
        .into_iter()
        .map(|points| region.subregion(points))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::{Branch, BranchId};
    use std::sync::Arc;

    fn bar() -> BinaryRegion {
        let mut region = BinaryRegion::new(20, 20).unwrap();
        for y in 5..=9 {
            for x in 2..=17 {
                region.draw(x, y).unwrap();
            }
        }
        region
    }

    fn line(x1: i32, y1: i32, x2: i32, y2: i32, strength: f64) -> SegmentationLine {
        SegmentationLine::new(
            Point::new(x1, y1),
            Point::new(x2, y2),
            LineSource::AnchorBased,
            strength,
        )
    }

    #[test]
    fn test_side() {
        let l = line(0, 0, 10, 0, 1.0);
        assert!(l.side(Point::new(5, 3)));
        assert!(l.side(Point::new(5, 0)));
        assert!(!l.side(Point::new(5, -3)));
    }

    #[test]
    fn test_cast_ray() {
        let region = bar();
        let start = Point::new(10, 7);
        assert_eq!(
            cast_ray_to_boundary(&region, start, 0.0),
            Some(Point::new(17, 7))
        );
        assert_eq!(
            cast_ray_to_boundary(&region, start, FRAC_PI_2),
            Some(Point::new(10, 9))
        );

        // a stroke that runs into the raster edge yields nothing
        let mut edge = BinaryRegion::new(10, 10).unwrap();
        for x in 3..10 {
            edge.draw(x, 4).unwrap();
        }
        assert_eq!(cast_ray_to_boundary(&edge, Point::new(5, 4), 0.0), None);
    }

    #[test]
    fn test_stroke_width() {
        let region = bar();
        // the step onto background counts: vertical 3 + 3, horizontal 9 + 8
        assert_eq!(stroke_width(&region, Point::new(9, 7)), 17.0);
        assert_eq!(ray_length(&region, Point::new(9, 7), FRAC_PI_2), 3);

        // an isolated pixel still reaches background after one step
        let mut dot = BinaryRegion::new(5, 5).unwrap();
        dot.draw(2, 2).unwrap();
        assert_eq!(ray_length(&dot, Point::new(2, 2), 0.0), 1);
        assert_eq!(stroke_width(&dot, Point::new(2, 2)), 2.0);

        // a long run stops at the cap
        let mut long = BinaryRegion::new(80, 3).unwrap();
        for x in 0..80 {
            long.draw(x, 1).unwrap();
        }
        assert_eq!(ray_length(&long, Point::new(0, 1), 0.0), MAX_WIDTH_STEPS);
    }

    fn anchor(x: i32, y: i32, kind: AnchorKind) -> AnchorPoint {
        AnchorPoint {
            point: Point::new(x, y),
            kind,
            strength: 0.5,
            curvature: 1.2,
            direction: 0.0,
        }
    }

    #[test]
    fn test_corner_pairs_skip_sharp_corners() {
        let region = bar();
        let config = CharacterConfig::default();

        let sharp = [
            anchor(2, 5, AnchorKind::SharpCorner),
            anchor(17, 9, AnchorKind::SharpCorner),
        ];
        assert!(anchor_lines(&sharp, &region, &config).is_empty());

        let plain = [
            anchor(2, 5, AnchorKind::Corner),
            anchor(17, 9, AnchorKind::Corner),
        ];
        let lines = anchor_lines(&plain, &region, &config);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source, LineSource::AnchorBased);
        assert!((lines[0].strength - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_filter_lines() {
        let lines = vec![
            line(0, 0, 10, 0, 0.5),
            line(0, 1, 10, 1, 0.9),
            line(0, 10, 10, 10, 0.7),
            line(10, 11, 0, 11, 0.6),
        ];
        let kept = filter_lines(lines.clone(), 100);
        assert_eq!(kept, vec![lines[1], lines[2]]);
        assert_eq!(filter_lines(lines.clone(), 2), vec![lines[1]]);
        assert!(filter_lines(lines, 1).is_empty());
    }

    #[test]
    fn test_split_partitions() {
        let points: Vec<Point> = (0..10)
            .flat_map(|y| (0..10).map(move |x| Point::new(x, y)))
            .collect();
        let cuts = [line(5, 0, 5, 9, 1.0), line(0, 5, 9, 5, 1.0)];
        let parts = split_by_lines(points.clone(), &cuts);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.iter().map(Vec::len).sum::<usize>(), points.len());
        assert!(split_by_lines(Vec::new(), &cuts).is_empty());
    }

    #[test]
    fn test_merge_small_regions() {
        let big: Vec<Point> = (0..5).map(|x| Point::new(x, 0)).collect();
        let touching = vec![Point::new(5, 1)];
        let isolated = vec![Point::new(9, 9)];
        let merged = merge_small_regions(10, 10, vec![big, touching, isolated], 4);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].len(), 6);
        assert_eq!(merged[1], vec![Point::new(9, 9)]);
    }

    #[test]
    fn test_branch_endpoint_links() {
        let region = bar();
        let skeleton = Skeleton {
            medial_axis: Vec::new(),
            branches: vec![
                Branch {
                    id: BranchId(0),
                    points: vec![Point::new(3, 7), Point::new(8, 7)],
                },
                Branch {
                    id: BranchId(1),
                    points: vec![Point::new(10, 7), Point::new(16, 7)],
                },
            ],
        };
        let lines = medial_lines(&skeleton, &region, &CharacterConfig::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(
            (lines[0].start, lines[0].end),
            (Point::new(8, 7), Point::new(10, 7))
        );
        assert_eq!(lines[0].strength, 0.8);
    }

    #[test]
    fn test_decompose_is_partition() {
        let config = Arc::new(CharacterConfig::default());
        let mut ch = Character::from_region(bar(), config).unwrap();
        let fragments = decompose_character(&mut ch);
        assert!(!fragments.is_empty());
        let total: usize = fragments.iter().map(BinaryRegion::pixel_count).sum();
        assert_eq!(total, ch.pixel_count());
        for p in ch.region().foreground_points() {
            assert_eq!(fragments.iter().filter(|f| f.contains(p)).count(), 1);
        }
        assert!(ch.anchors().is_some());
        assert!(ch.skeleton().is_some());
    }

    #[test]
    fn test_single_region_limit() {
        let config = Arc::new(CharacterConfig::default().with_max_regions(1));
        let mut ch = Character::from_region(bar(), config).unwrap();
        let fragments = decompose_character(&mut ch);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].pixel_count(), ch.pixel_count());
    }
}
