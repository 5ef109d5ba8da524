#![forbid(unsafe_code)]

//! Swipe configuration.

use std::time::Duration;

use tactile_core::geometry::Density;

/// User-facing toggles for the three swipe actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeSettings {
    /// Swipe toward the start edge to reply.
    pub quick_reply: bool,
    /// Swipe toward the end edge to share.
    pub quick_share: bool,
    /// Swipe (optionally pulling down) toward the start edge to react.
    pub quick_reaction: bool,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            quick_reply: true,
            quick_share: true,
            quick_reaction: true,
        }
    }
}

/// Thresholds, timings, and settings for the swipe controller.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeConfig {
    /// Action toggles.
    pub settings: SwipeSettings,
    /// Display density used for every dp conversion.
    pub density: Density,
    /// Commit distance in classic (non-bubble) layout (default: 124dp).
    pub classic_threshold_dp: f32,
    /// Commit distance in bubble layout (default: 64dp).
    pub bubble_threshold_dp: f32,
    /// Classic threshold multiplier when quick-share is off (default: 3).
    pub no_share_multiplier: f32,
    /// Movement before a drag locks onto an axis (default: 8dp).
    pub row_slop_dp: f32,
    /// Extra wait before a deferred share fires (default: 150ms).
    pub share_delay: Duration,
    /// Stiffness of the horizontal settle spring (default: 400).
    pub settle_stiffness: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            settings: SwipeSettings::default(),
            density: Density::default(),
            classic_threshold_dp: 124.0,
            bubble_threshold_dp: 64.0,
            no_share_multiplier: 3.0,
            row_slop_dp: 8.0,
            share_delay: Duration::from_millis(150),
            settle_stiffness: 400.0,
        }
    }
}

impl SwipeConfig {
    /// Set the action toggles (builder pattern).
    #[must_use]
    pub fn with_settings(mut self, settings: SwipeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the display density (builder pattern).
    #[must_use]
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Set the share delay (builder pattern).
    #[must_use]
    pub fn with_share_delay(mut self, delay: Duration) -> Self {
        self.share_delay = delay;
        self
    }

    /// Row slop in pixels.
    #[must_use]
    pub fn row_slop(&self) -> f32 {
        self.density.dpf(self.row_slop_dp)
    }
}
