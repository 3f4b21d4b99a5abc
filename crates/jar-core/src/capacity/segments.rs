//! Stacked capacity bar: water, rocks, pebbles, sand, then empty space.

use serde::{Deserialize, Serialize};

use super::engine::CapacityResult;

/// Default width of the capacity bar (percent).
pub const DEFAULT_BAR_WIDTH: f64 = 100.0;

/// Segment widths of the capacity bar, in the same unit as the total width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BarSegments {
    pub water: f64,
    pub rock: f64,
    pub pebble: f64,
    pub sand: f64,
    pub empty: f64,
}

impl BarSegments {
    pub fn total(&self) -> f64 {
        self.water + self.rock + self.pebble + self.sand + self.empty
    }
}

/// Proportional widths against `real_capacity + water_hours`.
///
/// When water plus committed hours exceed that denominator, the bar is scaled
/// against water plus load instead so the segments never overflow the width.
pub fn bar_segments(result: &CapacityResult, total_width: f64) -> BarSegments {
    if !total_width.is_finite() || total_width <= 0.0 {
        return BarSegments::default();
    }

    let used = result.water_hours + result.weekly_load;
    let denominator = (result.real_capacity + result.water_hours).max(used);
    if !denominator.is_finite() || denominator <= 0.0 {
        return BarSegments {
            empty: total_width,
            ..BarSegments::default()
        };
    }

    let scale = |hours: f64| hours.max(0.0) / denominator * total_width;
    let water = scale(result.water_hours);
    let rock = scale(result.totals.rock_hours);
    let pebble = scale(result.totals.pebble_hours);
    let sand = scale(result.totals.sand_hours);
    let empty = (total_width - water - rock - pebble - sand).max(0.0);

    BarSegments {
        water,
        rock,
        pebble,
        sand,
        empty,
    }
}

impl CapacityResult {
    /// Bar segments at the given total width.
    pub fn bar_segments(&self, total_width: f64) -> BarSegments {
        bar_segments(self, total_width)
    }
}
