#![forbid(unsafe_code)]

//! Swipe commit threshold.
//!
//! The commit distance is a fixed physical distance. Hosts that think in
//! row-relative terms read it as [`SwipeThreshold::fraction`] of the row
//! width; the comparison itself uses the absolute distance so it does not
//! depend on float round-trips through the width.
//!
//! Bubble layout uses its own distance. Classic layout uses the classic
//! distance, tripled when the quick-share setting is off.

use tactile_core::geometry::Density;

use crate::config::SwipeConfig;
use crate::eligibility::SwipeContext;

/// Commit threshold for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThreshold {
    distance: f32,
    width: f32,
}

impl SwipeThreshold {
    /// Compute the threshold for a row of `width` pixels.
    #[must_use]
    pub fn for_row(config: &SwipeConfig, ctx: &SwipeContext, width: f32) -> Self {
        let distance = if ctx.bubble_mode {
            px(config.density, config.bubble_threshold_dp)
        } else {
            let factor = if config.settings.quick_share {
                1.0
            } else {
                config.no_share_multiplier
            };
            px(config.density, config.classic_threshold_dp) * factor
        };
        Self { distance, width }
    }

    /// Horizontal distance that commits, in pixels.
    #[must_use]
    pub fn required_distance(&self) -> f32 {
        self.distance
    }

    /// Required distance as a fraction of the row width.
    ///
    /// Infinite for an unmeasured (zero-width) row.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.width > 0.0 {
            self.distance / self.width
        } else {
            f32::INFINITY
        }
    }

    /// Whether `dx` travelled far enough to commit.
    #[must_use]
    pub fn is_met_by(&self, dx: f32) -> bool {
        dx.abs() >= self.distance
    }
}

fn px(density: Density, dp: f32) -> f32 {
    density.dp(dp) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwipeSettings;

    fn config(quick_share: bool) -> SwipeConfig {
        SwipeConfig::default().with_settings(SwipeSettings {
            quick_share,
            ..SwipeSettings::default()
        })
    }

    #[test]
    fn classic_threshold_at_density_one() {
        let t = SwipeThreshold::for_row(&config(true), &SwipeContext::default(), 400.0);
        assert_eq!(t.required_distance(), 124.0);
        assert!(t.is_met_by(-124.0));
        assert!(!t.is_met_by(-123.0));
        assert!((t.fraction() - 0.31).abs() < 1e-6);
    }

    #[test]
    fn no_share_triples_classic_threshold() {
        let t = SwipeThreshold::for_row(&config(false), &SwipeContext::default(), 400.0);
        assert_eq!(t.required_distance(), 372.0);
        assert!(!t.is_met_by(124.0));
    }

    #[test]
    fn bubble_threshold_ignores_share_setting() {
        let ctx = SwipeContext {
            bubble_mode: true,
            ..SwipeContext::default()
        };
        let on = SwipeThreshold::for_row(&config(true), &ctx, 400.0);
        let off = SwipeThreshold::for_row(&config(false), &ctx, 400.0);
        assert_eq!(on.required_distance(), 64.0);
        assert_eq!(off.required_distance(), 64.0);
    }

    #[test]
    fn density_scales_distance() {
        let cfg = config(true).with_density(Density::new(2.0));
        let t = SwipeThreshold::for_row(&cfg, &SwipeContext::default(), 800.0);
        assert_eq!(t.required_distance(), 248.0);
    }

    #[test]
    fn zero_width_fraction_is_infinite() {
        let t = SwipeThreshold::for_row(&config(true), &SwipeContext::default(), 0.0);
        assert!(t.fraction().is_infinite());
    }
}
