//! Region decomposition regression test
//!
//! Fragments must partition the live foreground of every glyph: each live
//! pixel lands in exactly one fragment and no fragment holds anything else.
//!
//! Run with:
//! ```
//! cargo test -p glyphcanvas-character --test decompose_reg
//! ```

use glyphcanvas_character::{Character, LineSource, decompose_character, segmentation_lines};
use glyphcanvas_core::{BinaryRegion, CharacterConfig};
use glyphcanvas_test::{RegParams, fixtures};
use std::sync::Arc;

fn check_partition(rp: &mut RegParams, name: &str, ch: &Character, fragments: &[BinaryRegion]) {
    let live = ch.region().foreground_points();
    let covered: usize = fragments.iter().map(BinaryRegion::pixel_count).sum();
    rp.compare_values(live.len() as f64, covered as f64, 0.0);

    let exactly_once = live
        .iter()
        .all(|&p| fragments.iter().filter(|f| f.contains(p)).count() == 1);
    rp.check(exactly_once, &format!("{name}: every live pixel in one fragment"));

    let nothing_extra = fragments
        .iter()
        .flat_map(|f| f.foreground_points())
        .all(|p| ch.region().contains(p));
    rp.check(nothing_extra, &format!("{name}: fragments stay inside the glyph"));

    let sized = fragments
        .iter()
        .all(|f| f.width() == ch.width() && f.height() == ch.height());
    rp.check(sized, &format!("{name}: fragments share the glyph raster size"));
    eprintln!("{}: {} fragments", name, fragments.len());
}

#[test]
fn decompose_reg() {
    let mut rp = RegParams::new("decompose");
    let config = Arc::new(CharacterConfig::default());

    // -----------------------------------------------------------
    // Partition property across glyph shapes
    // -----------------------------------------------------------
    let glyphs = [
        ("plus", fixtures::plus_sign(48, 48, 24, 24, 18, 5).unwrap()),
        ("ring", fixtures::ring(48, 48, 24, 24, 18, 11).unwrap()),
        ("rect", fixtures::filled_rect(48, 48, 6, 12, 41, 35).unwrap()),
        ("line", fixtures::horizontal_line(48, 48, 20, 4, 43).unwrap()),
    ];
    for (name, region) in glyphs {
        let mut ch = Character::from_region(region, Arc::clone(&config)).unwrap();
        let fragments = decompose_character(&mut ch);
        rp.check(!fragments.is_empty(), &format!("{name}: has fragments"));
        check_partition(&mut rp, name, &ch, &fragments);
    }

    // -----------------------------------------------------------
    // Erased pixels never reappear in fragments
    // -----------------------------------------------------------
    let rect = fixtures::filled_rect(40, 40, 5, 5, 34, 20).unwrap();
    let mut ch = Character::from_region(rect, Arc::clone(&config)).unwrap();
    for x in 15..25 {
        ch.erase(x, 12);
    }
    let fragments = decompose_character(&mut ch);
    check_partition(&mut rp, "erased", &ch, &fragments);

    // -----------------------------------------------------------
    // A one-region budget keeps the glyph whole
    // -----------------------------------------------------------
    let whole = Arc::new(CharacterConfig::default().with_max_regions(1));
    let plus = fixtures::plus_sign(48, 48, 24, 24, 18, 5).unwrap();
    let mut ch = Character::from_region(plus, whole).unwrap();
    let fragments = decompose_character(&mut ch);
    rp.compare_values(1.0, fragments.len() as f64, 0.0);
    check_partition(&mut rp, "single", &ch, &fragments);

    // -----------------------------------------------------------
    // Stroke analysis toggles stroke-boundary lines
    // -----------------------------------------------------------
    let no_stroke = CharacterConfig::default().with_stroke_analysis(false);
    let mut ch = Character::from_region(
        fixtures::plus_sign(48, 48, 24, 24, 18, 5).unwrap(),
        Arc::new(no_stroke),
    )
    .unwrap();
    let anchors = ch.anchors_or_detect().to_vec();
    let skeleton = ch.skeleton_or_compute().clone();
    let lines = segmentation_lines(ch.region(), ch.config(), &anchors, &skeleton);
    rp.check(
        lines.iter().all(|l| l.source != LineSource::StrokeBoundary),
        "no stroke-boundary lines when stroke analysis is off",
    );
    rp.check(
        lines.iter().any(|l| l.source == LineSource::AnchorBased),
        "anchor-based lines present",
    );

    // -----------------------------------------------------------
    // Empty glyph
    // -----------------------------------------------------------
    let mut empty = Character::new(16, 16, Arc::clone(&config)).unwrap();
    rp.check(decompose_character(&mut empty).is_empty(), "empty glyph has no fragments");

    assert!(rp.cleanup(), "decompose regression test failed");
}
