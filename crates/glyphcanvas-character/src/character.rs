//! Character - a glyph raster bound to its analysis configuration
//!
//! A [`Character`] owns a [`BinaryRegion`] and a shared, validated
//! [`CharacterConfig`]. Anchors and the medial axis are cached on the
//! character; any edit to the raster drops both caches.

use crate::anchor::{AnchorPoint, detect_anchors};
use crate::error::CharacterResult;
use crate::skeleton::{Skeleton, compute_skeleton};
use glyphcanvas_core::{BinaryRegion, Bounds, CharacterConfig, Point};
use std::sync::Arc;

/// A glyph raster with cached anchors and medial axis
#[derive(Debug, Clone)]
pub struct Character {
    region: BinaryRegion,
    config: Arc<CharacterConfig>,
    anchors: Option<Vec<AnchorPoint>>,
    skeleton: Option<Skeleton>,
}

impl Character {
    /// Create an empty character.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or `config` fails
    /// validation.
    pub fn new(width: u32, height: u32, config: Arc<CharacterConfig>) -> CharacterResult<Self> {
        config.validate()?;
        Ok(Self {
            region: BinaryRegion::new(width, height)?,
            config,
            anchors: None,
            skeleton: None,
        })
    }

    /// Create an empty character with the default configuration
    pub fn with_default_config(width: u32, height: u32) -> CharacterResult<Self> {
        Self::new(width, height, Arc::new(CharacterConfig::default()))
    }

    /// Wrap an existing region.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn from_region(region: BinaryRegion, config: Arc<CharacterConfig>) -> CharacterResult<Self> {
        config.validate()?;
        Ok(Self {
            region,
            config,
            anchors: None,
            skeleton: None,
        })
    }

    #[inline]
    pub fn region(&self) -> &BinaryRegion {
        &self.region
    }

    /// Consume the character and return its raster
    pub fn into_region(self) -> BinaryRegion {
        self.region
    }

    #[inline]
    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    /// The shared configuration handle
    pub fn shared_config(&self) -> Arc<CharacterConfig> {
        Arc::clone(&self.config)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.region.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.region.height()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.region.pixel_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.region.bounds()
    }

    /// Draw a pixel and drop cached analysis.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel lies outside the raster.
    pub fn draw(&mut self, x: i32, y: i32) -> CharacterResult<()> {
        self.region.draw(x, y)?;
        self.invalidate();
        Ok(())
    }

    /// Erase a pixel and drop cached analysis
    pub fn erase(&mut self, x: i32, y: i32) {
        self.region.erase(x, y);
        self.invalidate();
    }

    /// Draw every point in order.
    ///
    /// # Errors
    ///
    /// Stops at the first out-of-bounds point. Earlier points stay drawn.
    pub fn draw_points<I>(&mut self, points: I) -> CharacterResult<()>
    where
        I: IntoIterator<Item = Point>,
    {
        let result = points
            .into_iter()
            .try_for_each(|p| self.region.draw(p.x, p.y));
        self.invalidate();
        result.map_err(Into::into)
    }

    fn invalidate(&mut self) {
        self.anchors = None;
        self.skeleton = None;
    }

    /// Cached anchors, if they have been computed since the last edit
    pub fn anchors(&self) -> Option<&[AnchorPoint]> {
        self.anchors.as_deref()
    }

    /// Cached medial axis, if it has been computed since the last edit
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    /// Run anchor detection, replacing any cached anchors
    pub fn detect_anchors(&mut self) -> &[AnchorPoint] {
        self.anchors.insert(detect_anchors(&self.region, &self.config))
    }

    /// Compute the medial axis, replacing any cached one
    pub fn compute_medial_axis(&mut self) -> &Skeleton {
        self.skeleton.insert(compute_skeleton(&self.region, &self.config))
    }

    /// Cached anchors, detecting them first if needed
    pub fn anchors_or_detect(&mut self) -> &[AnchorPoint] {
        let (region, config) = (&self.region, &self.config);
        self.anchors
            .get_or_insert_with(|| detect_anchors(region, config))
    }

    /// Cached medial axis, computing it first if needed
    pub fn skeleton_or_compute(&mut self) -> &Skeleton {
        let (region, config) = (&self.region, &self.config);
        self.skeleton
            .get_or_insert_with(|| compute_skeleton(region, config))
    }
}
