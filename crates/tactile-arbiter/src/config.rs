#![forbid(unsafe_code)]

//! Arbiter configuration.

use tactile_core::geometry::Density;

use crate::orientation::OrientationFlags;

/// Thresholds for container vs. content arbitration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArbiterConfig {
    /// Display density used for every dp conversion.
    pub density: Density,
    /// Vertical movement before a drag is recognized (default: 8dp).
    pub touch_slop_dp: f32,
    /// Vertical speed above which an Up is a fling (default: 250dp/s).
    pub fling_threshold_dp: f32,
    /// Density cap applied to the fling threshold (default: 1.0).
    pub fling_max_density: f32,
    /// Flag held on the orientation host while the container is dragged.
    pub lock_flag: OrientationFlags,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            density: Density::default(),
            touch_slop_dp: 8.0,
            fling_threshold_dp: 250.0,
            fling_max_density: 1.0,
            lock_flag: OrientationFlags::TOUCHING_MEDIA_PANEL,
        }
    }
}

impl ArbiterConfig {
    /// Set the display density (builder pattern).
    #[must_use]
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Set the touch slop in dp (builder pattern).
    #[must_use]
    pub fn with_touch_slop_dp(mut self, slop: f32) -> Self {
        self.touch_slop_dp = slop;
        self
    }

    /// Set the orientation flag (builder pattern).
    #[must_use]
    pub fn with_lock_flag(mut self, flag: OrientationFlags) -> Self {
        self.lock_flag = flag;
        self
    }

    /// Touch slop in pixels.
    #[must_use]
    pub fn touch_slop(&self) -> f32 {
        self.density.dp(self.touch_slop_dp) as f32
    }

    /// Fling speed threshold in pixels per second.
    #[must_use]
    pub fn fling_threshold(&self) -> f32 {
        self.density
            .dp_capped(self.fling_threshold_dp, self.fling_max_density) as f32
    }
}
