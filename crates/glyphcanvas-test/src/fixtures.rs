//! Synthetic glyph fixtures
//!
//! Small rasterized primitives used across the regression tests. Every
//! builder draws its pixels in row-major order, so draw logs are
//! reproducible.

use crate::error::{TestError, TestResult};
use glyphcanvas_core::{BinaryRegion, Point};

fn region_from_predicate<F>(width: u32, height: u32, inside: F) -> TestResult<BinaryRegion>
where
    F: Fn(i32, i32) -> bool,
{
    let mut region = BinaryRegion::new(width, height)?;
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if inside(x, y) {
                region.draw(x, y)?;
            }
        }
    }
    Ok(region)
}

/// Filled axis-aligned rectangle covering `[x0, x1] x [y0, y1]` (inclusive)
pub fn filled_rect(
    width: u32,
    height: u32,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
) -> TestResult<BinaryRegion> {
    if x0 > x1 || y0 > y1 {
        return Err(TestError::InvalidFixture {
            name: "filled_rect",
            message: format!("empty rectangle ({}, {})-({}, {})", x0, y0, x1, y1),
        });
    }
    region_from_predicate(width, height, |x, y| {
        x >= x0 && x <= x1 && y >= y0 && y <= y1
    })
}

/// Filled disk of radius `r` centered on `(cx, cy)`
pub fn filled_disk(width: u32, height: u32, cx: i32, cy: i32, r: i32) -> TestResult<BinaryRegion> {
    filled_ellipse(width, height, cx, cy, r, r)
}

/// Filled axis-aligned ellipse with semi-axes `a` (x) and `b` (y)
pub fn filled_ellipse(
    width: u32,
    height: u32,
    cx: i32,
    cy: i32,
    a: i32,
    b: i32,
) -> TestResult<BinaryRegion> {
    if a <= 0 || b <= 0 {
        return Err(TestError::InvalidFixture {
            name: "filled_ellipse",
            message: format!("semi-axes must be positive: a={}, b={}", a, b),
        });
    }
    let (a2, b2) = ((a * a) as f64, (b * b) as f64);
    region_from_predicate(width, height, |x, y| {
        let dx = (x - cx) as f64;
        let dy = (y - cy) as f64;
        dx * dx / a2 + dy * dy / b2 <= 1.0
    })
}

/// Annulus between radii `r_inner` (exclusive) and `r_outer` (inclusive)
pub fn ring(
    width: u32,
    height: u32,
    cx: i32,
    cy: i32,
    r_outer: i32,
    r_inner: i32,
) -> TestResult<BinaryRegion> {
    if r_inner >= r_outer {
        return Err(TestError::InvalidFixture {
            name: "ring",
            message: format!("inner radius {} >= outer radius {}", r_inner, r_outer),
        });
    }
    let (outer2, inner2) = (r_outer * r_outer, r_inner * r_inner);
    region_from_predicate(width, height, |x, y| {
        let d2 = (x - cx) * (x - cx) + (y - cy) * (y - cy);
        d2 <= outer2 && d2 > inner2
    })
}

/// One-pixel-wide horizontal line on row `y` from `x0` to `x1` inclusive
pub fn horizontal_line(width: u32, height: u32, y: i32, x0: i32, x1: i32) -> TestResult<BinaryRegion> {
    region_from_predicate(width, height, |x, yy| yy == y && x >= x0 && x <= x1)
}

/// One-pixel-wide 45 degree line through `(start + i, start + i)` for
/// `i` in `0..len`
pub fn diagonal_line(width: u32, height: u32, start: i32, len: i32) -> TestResult<BinaryRegion> {
    let points = (0..len).map(|i| Point::new(start + i, start + i));
    Ok(BinaryRegion::from_points(width, height, points)?)
}

/// Plus sign with arms of half-length `arm` and stroke width `thickness`
pub fn plus_sign(
    width: u32,
    height: u32,
    cx: i32,
    cy: i32,
    arm: i32,
    thickness: i32,
) -> TestResult<BinaryRegion> {
    let half = thickness / 2;
    region_from_predicate(width, height, |x, y| {
        let horizontal = (y - cy).abs() <= half && (x - cx).abs() <= arm;
        let vertical = (x - cx).abs() <= half && (y - cy).abs() <= arm;
        horizontal || vertical
    })
}

/// Copy of `region`'s live pixels shifted by `(dx, dy)`, in first-draw order
pub fn translate(region: &BinaryRegion, dx: i32, dy: i32) -> TestResult<BinaryRegion> {
    let points = region
        .foreground_points()
        .into_iter()
        .map(|p| p.offset(dx, dy));
    Ok(BinaryRegion::from_points(region.width(), region.height(), points)?)
}
