//! Shape classification regression test
//!
//! Runs the full region pipeline on synthetic primitives.
//!
//! Run with:
//! ```
//! cargo test -p glyphcanvas-shape --test classify_reg
//! ```

use glyphcanvas_core::BinaryRegion;
use glyphcanvas_shape::{
    FillKind, Shape, ShapeKind, compute_shape_descriptor, edge_angle_distribution, extract_edges,
};
use glyphcanvas_test::{RegParams, fixtures};

fn degree_of(shape: Shape) -> Option<f64> {
    match shape {
        Shape::StraightLine { degree } => Some(degree),
        _ => None,
    }
}

#[test]
fn classify_reg() {
    let mut rp = RegParams::new("classify");

    // -----------------------------------------------------------
    // Filled rectangles
    // -----------------------------------------------------------
    for (x0, y0, x1, y1) in [(10, 20, 45, 43), (15, 15, 39, 39)] {
        let rect = fixtures::filled_rect(64, 64, x0, y0, x1, y1).unwrap();
        let desc = compute_shape_descriptor(&rect).unwrap();
        rp.compare_strings(ShapeKind::Rectangle.name(), desc.kind().name());
        rp.check(desc.fill == FillKind::Filled, "rectangle is filled");
    }

    // -----------------------------------------------------------
    // One-pixel lines
    // -----------------------------------------------------------
    let horizontal = fixtures::horizontal_line(64, 64, 32, 10, 59).unwrap();
    let desc = compute_shape_descriptor(&horizontal).unwrap();
    rp.compare_strings("straight_line", desc.kind().name());
    rp.check(desc.fill == FillKind::Outline, "horizontal line is an outline");
    rp.compare_values(0.0, degree_of(desc.shape).unwrap_or(-1.0), 5.0);

    let diagonal = fixtures::diagonal_line(64, 64, 10, 50).unwrap();
    let desc = compute_shape_descriptor(&diagonal).unwrap();
    rp.compare_strings("straight_line", desc.kind().name());
    rp.check(desc.fill == FillKind::Outline, "diagonal line is an outline");
    rp.compare_values(45.0, degree_of(desc.shape).unwrap_or(-1.0), 5.0);

    let mut vertical = BinaryRegion::new(64, 64).unwrap();
    for y in 10..60 {
        vertical.draw(32, y).unwrap();
    }
    let desc = compute_shape_descriptor(&vertical).unwrap();
    rp.compare_values(90.0, degree_of(desc.shape).unwrap_or(-1.0), 5.0);

    // -----------------------------------------------------------
    // Not enough data
    // -----------------------------------------------------------
    let mut tiny = BinaryRegion::new(16, 16).unwrap();
    tiny.draw(4, 4).unwrap();
    tiny.draw(5, 4).unwrap();
    rp.check(compute_shape_descriptor(&tiny).is_none(), "two pixels");

    // -----------------------------------------------------------
    // Edge angle histogram of a rectangle
    // -----------------------------------------------------------
    let rect = fixtures::filled_rect(64, 64, 10, 20, 45, 43).unwrap();
    let edges = extract_edges(&rect);
    let dist = edge_angle_distribution(&edges);
    rp.compare_values(116.0, dist.total as f64, 0.0);
    let binned: usize = dist.bins.iter().map(|b| b.count).sum();
    rp.check(binned <= dist.total, "bins never exceed total");
    // vertical sides point along 0/180, horizontal sides along 90
    rp.check(dist.bins[0].count >= 44, "vertical sides in the 0 bin");
    rp.check(dist.bins[2].count >= 64, "horizontal sides in the 90 bin");

    assert!(rp.cleanup(), "classify regression test failed");
}
