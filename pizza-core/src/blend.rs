//! Strength (W) of a blend of flours.

use crate::band::BandTable;
use crate::constants::GAUGE_MAX_W;
use crate::input::parse_optional;
use serde::{Deserialize, Serialize};

/// One flour of the blend. Unset fields leave the entry out of the totals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlourInput {
    /// Strength W.
    pub w: Option<f64>,
    /// Mass in grams.
    pub grams: Option<f64>,
}

impl FlourInput {
    pub fn new(w: f64, grams: f64) -> Self {
        Self {
            w: Some(w),
            grams: Some(grams),
        }
    }

    /// Build from raw text fields, as typed.
    pub fn from_text(w: &str, grams: &str) -> Self {
        Self {
            w: parse_optional(w),
            grams: parse_optional(grams),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `(w, grams)` when both are set, finite and non-negative.
    pub fn valid(&self) -> Option<(f64, f64)> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        match (self.w, self.grams) {
            (Some(w), Some(g)) if ok(w) && ok(g) => Some((w, g)),
            _ => None,
        }
    }
}

/// How many flours take part in the blend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlourMode {
    #[default]
    Two,
    Three,
}

impl FlourMode {
    pub fn count(self) -> usize {
        match self {
            FlourMode::Two => 2,
            FlourMode::Three => 3,
        }
    }
}

impl TryFrom<u8> for FlourMode {
    type Error = u8;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            2 => Ok(FlourMode::Two),
            3 => Ok(FlourMode::Three),
            other => Err(other),
        }
    }
}

/// Bakers' flour categories, weakest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlourCategory {
    Weak,
    Medium,
    Strong,
    VeryStrong,
    Special,
}

impl FlourCategory {
    pub fn label(self) -> &'static str {
        match self {
            FlourCategory::Weak => "Weak flour",
            FlourCategory::Medium => "Medium flour",
            FlourCategory::Strong => "Strong flour",
            FlourCategory::VeryStrong => "Very strong flour",
            FlourCategory::Special => "Special/high-strength flour",
        }
    }

    /// Recommended hydration, `[min%, max%]`.
    pub fn hydration_range(self) -> (u8, u8) {
        match self {
            FlourCategory::Weak => (50, 55),
            FlourCategory::Medium => (55, 60),
            FlourCategory::Strong => (60, 70),
            FlourCategory::VeryStrong => (70, 80),
            FlourCategory::Special => (80, 90),
        }
    }

    pub fn fermentation(self) -> &'static str {
        match self {
            FlourCategory::Weak => "Short (2-4h)",
            FlourCategory::Medium => "Medium-short (4-8h)",
            FlourCategory::Strong => "Medium (8-24h)",
            FlourCategory::VeryStrong => "Long (24-48h)",
            FlourCategory::Special => "Very long (48h+)",
        }
    }

    pub fn uses(self) -> &'static str {
        match self {
            FlourCategory::Weak => "Biscuits, wafers, breadsticks, shortcrust pastry",
            FlourCategory::Medium => "Quick pan pizza, everyday bread, direct focaccia",
            FlourCategory::Strong => "Neapolitan pizza, pizza alla pala, French bread, ciabatta",
            FlourCategory::VeryStrong => {
                "High-hydration pizza, structured bread, brioche, biga"
            }
            FlourCategory::Special => "Panettone, colomba, strengthening weak flours",
        }
    }

    pub fn notes(self) -> &'static str {
        match self {
            FlourCategory::Weak => "Low absorption. Not suited to long rises.",
            FlourCategory::Medium => "Best for direct doughs and same-day work.",
            FlourCategory::Strong => "Holds a good gluten network. Tolerates the fridge.",
            FlourCategory::VeryStrong => "High absorption and strong oven spring.",
            FlourCategory::Special => "Extreme strength. Needs technique and long maturation.",
        }
    }
}

static CATEGORIES: BandTable<FlourCategory> = BandTable {
    rows: &[
        (180.0, FlourCategory::Weak),
        (240.0, FlourCategory::Medium),
        (300.0, FlourCategory::Strong),
        (350.0, FlourCategory::VeryStrong),
    ],
    last: FlourCategory::Special,
};

/// Classification of a strength value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub category: FlourCategory,
    pub label: &'static str,
    pub hydration_min: u8,
    pub hydration_max: u8,
    pub fermentation: &'static str,
    pub uses: &'static str,
    pub notes: &'static str,
    /// Position on a 0..=100 strength gauge.
    pub gauge: f64,
}

/// Classify a strength. `None` for 0, meaning "no input yet".
pub fn classify(w: u32) -> Option<Classification> {
    if w == 0 {
        return None;
    }
    let wf = f64::from(w);
    let category = *CATEGORIES.lookup(wf);
    let (hydration_min, hydration_max) = category.hydration_range();
    Some(Classification {
        category,
        label: category.label(),
        hydration_min,
        hydration_max,
        fermentation: category.fermentation(),
        uses: category.uses(),
        notes: category.notes(),
        gauge: (wf / GAUGE_MAX_W * 100.0).min(100.0),
    })
}

/// Result of blending.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BlendResult {
    /// Weighted strength, rounded; 0 when nothing valid was entered.
    pub w: u32,
    pub total_grams: f64,
    pub classification: Option<Classification>,
}

/// Weighted average strength of the first `mode.count()` entries.
pub fn compute_blend(entries: &[FlourInput], mode: FlourMode) -> BlendResult {
    let (weighted, total_grams) = entries
        .iter()
        .take(mode.count())
        .filter_map(FlourInput::valid)
        .fold((0.0, 0.0), |(sw, sg), (w, g)| (sw + w * g, sg + g));

    let w = if total_grams > 0.0 {
        (weighted / total_grams).round() as u32
    } else {
        0
    };

    BlendResult {
        w,
        total_grams,
        classification: classify(w),
    }
}

/// The mix sheet: three slots, of which the mode decides how many count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlourMix {
    pub mode: FlourMode,
    pub entries: [FlourInput; 3],
}

impl FlourMix {
    pub fn set_w(&mut self, index: usize, w: Option<f64>) {
        if let Some(e) = self.entries.get_mut(index) {
            e.w = w;
        }
    }

    pub fn set_grams(&mut self, index: usize, grams: Option<f64>) {
        if let Some(e) = self.entries.get_mut(index) {
            e.grams = grams;
        }
    }

    /// Clear all slots. The mode is kept.
    pub fn reset(&mut self) {
        self.entries.iter_mut().for_each(FlourInput::reset);
    }

    /// Entries taking part in the blend.
    pub fn active(&self) -> &[FlourInput] {
        &self.entries[..self.mode.count()]
    }

    pub fn blend(&self) -> BlendResult {
        compute_blend(&self.entries, self.mode)
    }
}
