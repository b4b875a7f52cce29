//! Dough calculations for pizza makers.
//!
//! Two independent, pure calculators:
//! - [`blend`]: the strength (W) of a mix of two or three flours, and what the
//!   mix is good for.
//! - [`recipe`]: flour, water, salt, fat and yeast for a batch of balls or a
//!   pan, given hydration, times and temperature.
//!
//! Neither ever fails. Out-of-range numbers are clamped and missing ones are
//! skipped or defaulted, since input usually arrives half-typed.
//!
//! ```
//! use pizza_core::{compute_blend, FlourInput, FlourMode};
//!
//! let r = compute_blend(
//!     &[FlourInput::new(260.0, 400.0), FlourInput::new(300.0, 600.0)],
//!     FlourMode::Two,
//! );
//! assert_eq!(r.w, 284);
//! ```

mod band;
pub mod blend;
pub mod constants;
pub mod input;
pub mod recipe;

pub use blend::{
    BlendResult, Classification, FlourCategory, FlourInput, FlourMix, FlourMode, classify,
    compute_blend,
};
pub use input::parse_optional;
pub use recipe::{
    DoughShape, PdrVigor, RecipeParams, RecipeResult, StrengthSuggestion, compute_recipe,
    effective_hours, suggest_strength,
};
