//! Image moments and Hu invariants
//!
//! Raw moments `m_pq = sum(x^p * y^q)` are accumulated over live foreground
//! pixels for `p + q <= 3`. Central moments are derived from them with the
//! usual binomial expansions, and Hu's seven invariants from the normalized
//! central moments `eta_pq = mu_pq / m00^((p + q) / 2 + 1)`.
//!
//! An empty region has `m00 == 0`; every derived quantity is then zero and
//! callers should treat the region as having no shape.

use glyphcanvas_core::{BinaryRegion, Point};
use serde::{Deserialize, Serialize};

/// Hu vector of an axis-aligned rectangle, used by [`HuInvariants::rectangularity`]
pub const REFERENCE_RECTANGLE_HU: [f64; 7] = [0.16, 0.0013, 0.0, 0.0, 0.0, 0.0, 0.0];

/// Raw and central moments up to order 3.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m11: f64,
    pub m20: f64,
    pub m02: f64,
    pub m21: f64,
    pub m12: f64,
    pub m30: f64,
    pub m03: f64,
    /// Centroid x (`m10 / m00`)
    pub cx: f64,
    /// Centroid y (`m01 / m00`)
    pub cy: f64,
    pub mu20: f64,
    pub mu02: f64,
    pub mu11: f64,
    pub mu30: f64,
    pub mu21: f64,
    pub mu12: f64,
    pub mu03: f64,
}

impl Moments {
    /// Compute moments over the live pixels of a region.
    ///
    /// The raster is scanned column by column.
    pub fn from_region(region: &BinaryRegion) -> Self {
        let mut m = Self::default();
        for x in 0..region.width() as i32 {
            for y in 0..region.height() as i32 {
                if region.is_drawn(x, y) {
                    m.accumulate(x as f64, y as f64);
                }
            }
        }
        m.finish();
        m
    }

    /// Compute moments over an explicit point set.
    ///
    /// Repeated points are counted once per occurrence.
    pub fn from_points(points: &[Point]) -> Self {
        let mut m = Self::default();
        for p in points {
            m.accumulate(p.x as f64, p.y as f64);
        }
        m.finish();
        m
    }

    fn accumulate(&mut self, x: f64, y: f64) {
        self.m00 += 1.0;
        self.m10 += x;
        self.m01 += y;
        self.m11 += x * y;
        self.m20 += x * x;
        self.m02 += y * y;
        self.m21 += x * x * y;
        self.m12 += x * y * y;
        self.m30 += x * x * x;
        self.m03 += y * y * y;
    }

    fn finish(&mut self) {
        if self.m00 == 0.0 {
            return;
        }
        let cx = self.m10 / self.m00;
        let cy = self.m01 / self.m00;
        self.cx = cx;
        self.cy = cy;

        self.mu20 = self.m20 - cx * self.m10;
        self.mu02 = self.m02 - cy * self.m01;
        self.mu11 = self.m11 - cx * self.m01;
        self.mu30 = self.m30 - 3.0 * cx * self.m20 + 2.0 * cx * cx * self.m10;
        self.mu21 = self.m21 - 2.0 * cx * self.m11 - cy * self.m20 + 2.0 * cx * cx * self.m01;
        self.mu12 = self.m12 - 2.0 * cy * self.m11 - cx * self.m02 + 2.0 * cy * cy * self.m10;
        self.mu03 = self.m03 - 3.0 * cy * self.m02 + 2.0 * cy * cy * self.m01;
    }

    /// True when no pixel contributed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.m00 == 0.0
    }

    /// Area (pixel count)
    #[inline]
    pub fn area(&self) -> f64 {
        self.m00
    }

    /// Ratio of the minor to the major eigenvalue of the second-order
    /// central moment matrix `[[mu20, mu11], [mu11, mu02]]`.
    ///
    /// Returns 1.0 when the matrix is degenerate (zero trace or a
    /// non-positive eigenvalue, e.g. collinear pixels).
    pub fn ellipse_axis_ratio(&self) -> f64 {
        let trace = self.mu20 + self.mu02;
        if trace == 0.0 {
            return 1.0;
        }
        let diff = self.mu20 - self.mu02;
        let root = (diff * diff + 4.0 * self.mu11 * self.mu11).sqrt();
        let lambda1 = (trace + root) / 2.0;
        let lambda2 = (trace - root) / 2.0;
        if lambda1 > 0.0 && lambda2 > 0.0 {
            lambda1.min(lambda2) / lambda1.max(lambda2)
        } else {
            1.0
        }
    }
}

/// Hu's seven moment invariants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HuInvariants(pub [f64; 7]);

impl HuInvariants {
    /// Compute the invariants from central moments.
    ///
    /// All seven are zero for an empty region.
    pub fn from_moments(m: &Moments) -> Self {
        let mut hu = [0.0; 7];
        if m.is_empty() {
            return Self(hu);
        }

        let norm2 = m.m00.powi(2);
        let norm3 = m.m00.powf(2.5);
        let n20 = m.mu20 / norm2;
        let n02 = m.mu02 / norm2;
        let n11 = m.mu11 / norm2;
        let n30 = m.mu30 / norm3;
        let n21 = m.mu21 / norm3;
        let n12 = m.mu12 / norm3;
        let n03 = m.mu03 / norm3;

        let a = n30 + n12;
        let b = n21 + n03;
        let c = n30 - 3.0 * n12;
        let d = 3.0 * n21 - n03;

        hu[0] = n20 + n02;
        hu[1] = (n20 - n02).powi(2) + 4.0 * n11 * n11;
        hu[2] = c * c + d * d;
        hu[3] = a * a + b * b;
        hu[4] = c * a * (a * a - 3.0 * b * b) + d * b * (3.0 * a * a - b * b);
        hu[5] = (n20 - n02) * (a * a - b * b) + 4.0 * n11 * a * b;
        hu[6] = d * a * (a * a - 3.0 * b * b) - c * b * (3.0 * a * a - b * b);

        Self(hu)
    }

    /// Get invariant `I(k + 1)`
    #[inline]
    pub fn get(&self, k: usize) -> f64 {
        self.0[k]
    }

    pub fn as_array(&self) -> &[f64; 7] {
        &self.0
    }

    /// `1 / (1 + sqrt(I2) / I1)`, or 0 when `I1 <= 0`.
    ///
    /// A perfect disk has `I2 == 0` and scores 1.
    pub fn circularity(&self) -> f64 {
        let i1 = self.0[0];
        if i1 <= 0.0 {
            return 0.0;
        }
        1.0 / (1.0 + self.0[1].sqrt() / i1)
    }

    /// `1 / (1 + 100 * sum(|I3..I7|))`
    ///
    /// Close to 1 when the higher-order invariants vanish, as they do for
    /// straight strokes.
    pub fn linearity(&self) -> f64 {
        let higher: f64 = self.0[2..].iter().map(|v| v.abs()).sum();
        1.0 / (1.0 + 100.0 * higher)
    }

    /// `exp(-10 * sum(|I_k - ref_k|))` against [`REFERENCE_RECTANGLE_HU`]
    pub fn rectangularity(&self) -> f64 {
        let distance: f64 = self
            .0
            .iter()
            .zip(REFERENCE_RECTANGLE_HU.iter())
            .map(|(v, r)| (v - r).abs())
            .sum();
        (-10.0 * distance).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_rect(x0: i32, y0: i32, w: i32, h: i32) -> BinaryRegion {
        let mut region = BinaryRegion::new(64, 64).unwrap();
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                region.draw(x, y).unwrap();
            }
        }
        region
    }

    #[test]
    fn test_empty_region() {
        let region = BinaryRegion::new(8, 8).unwrap();
        let m = Moments::from_region(&region);
        assert!(m.is_empty());
        assert_eq!(m.cx, 0.0);
        assert_eq!(m.mu20, 0.0);
        let hu = HuInvariants::from_moments(&m);
        assert_eq!(hu, HuInvariants::default());
        assert_eq!(hu.circularity(), 0.0);
        assert_eq!(m.ellipse_axis_ratio(), 1.0);
    }

    #[test]
    fn test_rectangle_moments() {
        let m = Moments::from_region(&create_rect(10, 20, 4, 2));
        assert_eq!(m.m00, 8.0);
        assert!((m.cx - 11.5).abs() < 1e-12);
        assert!((m.cy - 20.5).abs() < 1e-12);
        // mu20 = n * (w^2 - 1) / 12
        assert!((m.mu20 - 8.0 * 15.0 / 12.0).abs() < 1e-9);
        assert!((m.mu02 - 8.0 * 3.0 / 12.0).abs() < 1e-9);
        assert!(m.mu11.abs() < 1e-9);
        // symmetric shapes have no odd central moments
        assert!(m.mu30.abs() < 1e-6);
        assert!(m.mu03.abs() < 1e-6);
    }

    #[test]
    fn test_from_points_matches_region() {
        let region = create_rect(3, 3, 5, 7);
        let a = Moments::from_region(&region);
        let b = Moments::from_points(&region.foreground_points());
        assert!((a.mu20 - b.mu20).abs() < 1e-9);
        assert!((a.mu02 - b.mu02).abs() < 1e-9);
        assert_eq!(a.m00, b.m00);
    }

    #[test]
    fn test_rectangularity_of_rectangle() {
        let m = Moments::from_region(&create_rect(10, 20, 36, 24));
        let hu = HuInvariants::from_moments(&m);
        let r = hu.rectangularity();
        assert!(r > 0.7 && r < 0.85, "rectangularity {}", r);
        assert!(hu.linearity() > 0.99);
    }

    #[test]
    fn test_square_is_round_by_moments() {
        let m = Moments::from_region(&create_rect(10, 10, 20, 20));
        let hu = HuInvariants::from_moments(&m);
        assert!(hu.get(1).abs() < 1e-12);
        assert!((hu.circularity() - 1.0).abs() < 1e-9);
        assert!((m.ellipse_axis_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ellipse_ratio_of_line_is_degenerate() {
        let mut region = BinaryRegion::new(32, 32).unwrap();
        for x in 2..30 {
            region.draw(x, 5).unwrap();
        }
        let m = Moments::from_region(&region);
        assert_eq!(m.ellipse_axis_ratio(), 1.0);
    }

    #[test]
    fn test_ellipse_ratio_of_rectangle() {
        let m = Moments::from_region(&create_rect(0, 0, 30, 10));
        // (h^2 - 1) / (w^2 - 1)
        let expected = 99.0 / 899.0;
        assert!((m.ellipse_axis_ratio() - expected).abs() < 1e-9);
    }
}
