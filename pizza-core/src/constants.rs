//! Empirical constants of the dough model.
//!
//! The PDR cap, the yeast base constants and the pan areal density come from
//! traditional pizzeria practice. They are tuning values, not derived ones.

/// Parameter bounds: (min, max).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Hydration in percent of flour.
pub const HYDRATION_BOUNDS: Bounds = Bounds::new(50.0, 100.0);

/// Salt in grams per liter of water.
pub const SALT_BOUNDS: Bounds = Bounds::new(0.0, 70.0);

/// Fat (oil, lard) in grams per liter of water.
pub const FAT_BOUNDS: Bounds = Bounds::new(0.0, 150.0);

/// Pre-fermented dough (pasta di riporto) in percent of the total dough.
/// Expert-sourced upper limit.
pub const PDR_BOUNDS: Bounds = Bounds::new(0.0, 83.06);

/// Total leavening time in hours.
pub const TOTAL_HOURS_BOUNDS: Bounds = Bounds::new(3.0, 96.0);

/// Room temperature in °C.
pub const TEMPERATURE_BOUNDS: Bounds = Bounds::new(15.0, 35.0);

/// Yeast base constant for round balls. Expert-sourced.
pub const YEAST_BASE_BALLS: f64 = 2250.0;

/// Yeast base constant for pan (teglia) dough. Expert-sourced.
pub const YEAST_BASE_PAN: f64 = 2600.0;

/// Per-degree growth rate of yeast activity (roughly doubles every ~8 °C).
pub const YEAST_TEMPERATURE_BASE: f64 = 1.096;

/// Fridge hours count as 1/12 of a room-temperature hour.
pub const FRIDGE_SLOWDOWN: f64 = 12.0;

/// Maximum share of yeast a pre-fermented dough may replace.
pub const PDR_MAX_REDUCTION: f64 = 0.95;

/// Smallest non-zero yeast amount shown, in grams.
pub const YEAST_FLOOR_G: f64 = 0.01;

/// Fresh yeast grams per gram of dry yeast.
pub const FRESH_TO_DRY: f64 = 3.0;

/// Dough grams per cm² of pan.
pub const PAN_DOUGH_G_PER_CM2: f64 = 0.55;

/// Top of the practical W scale, used for the strength gauge.
pub const GAUGE_MAX_W: f64 = 450.0;
