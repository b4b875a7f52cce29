mod args;
mod profile;
mod render;

use anyhow::{Context, bail};
use args::{FlourArg, PanSize};
use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use pizza_core::recipe::{DEFAULT_BALL_COUNT, DEFAULT_BALL_GRAMS};
use pizza_core::{
    DoughShape, FlourInput, FlourMode, PdrVigor, RecipeParams, compute_blend, compute_recipe,
};
use render::MixReport;
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Vigor CLI enum mirrors pizza-core (derive for Clap).
#[derive(Copy, Clone, Debug, ValueEnum)]
enum VigorFlag {
    Tired,
    Normal,
    Vigorous,
}

impl From<VigorFlag> for PdrVigor {
    fn from(v: VigorFlag) -> Self {
        match v {
            VigorFlag::Tired => PdrVigor::Tired,
            VigorFlag::Normal => PdrVigor::Normal,
            VigorFlag::Vigorous => PdrVigor::Vigorous,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum MixFormat {
    #[default]
    Table,
    Json,
    /// Plain-text recap, for pasting into a chat
    Summary,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum RecipeFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "pizza-cli",
    about = "Flour blend strength and dough recipes for pizza makers.",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Strength (W) and category of a blend of two or three flours.
    Mix(MixArgs),
    /// Ingredient quantities for balls or a pan.
    Recipe(RecipeArgs),
}

#[derive(Parser, Debug)]
struct MixArgs {
    /// Flour as W:GRAMS, repeat up to three times (e.g. --flour 260:400)
    #[arg(long = "flour", value_name = "W:GRAMS")]
    flours: Vec<FlourArg>,

    /// Number of flours in the blend; defaults to 3 when three are given
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=3))]
    mode: Option<u8>,

    /// Output format
    #[arg(long, value_enum, default_value_t = MixFormat::Table)]
    format: MixFormat,
}

#[derive(Parser, Debug)]
struct RecipeArgs {
    /// Number of balls
    #[arg(long, conflicts_with = "pan")]
    balls: Option<u32>,

    /// Dough ball weight in grams
    #[arg(long, conflicts_with = "pan")]
    ball_weight: Option<f64>,

    /// Pan size in cm, WIDTHxLENGTH; the dough weight follows from the area
    #[arg(long, value_name = "WxL")]
    pan: Option<PanSize>,

    /// Hydration in % of flour (50..100)
    #[arg(long)]
    hydration: Option<f64>,

    /// Salt in g per liter of water (0..70)
    #[arg(long)]
    salt: Option<f64>,

    /// Fat in g per liter of water (0..150)
    #[arg(long)]
    fat: Option<f64>,

    /// Pre-fermented dough in % of the total (0..83.06)
    #[arg(long)]
    pdr: Option<f64>,

    /// How lively the pre-fermented dough is
    #[arg(long, value_enum)]
    pdr_vigor: Option<VigorFlag>,

    /// Total leavening hours (3..96)
    #[arg(long)]
    total_hours: Option<f64>,

    /// Of which in the fridge
    #[arg(long)]
    fridge_hours: Option<f64>,

    /// Room temperature in °C (15..35)
    #[arg(long)]
    temp: Option<f64>,

    /// Mixing time HH:MM today; defaults to now
    #[arg(long)]
    start: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = RecipeFormat::Table)]
    format: RecipeFormat,

    /// Load a profile JSON before applying CLI overrides
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the effective parameters to a profile JSON
    #[arg(long)]
    save_profile: Option<PathBuf>,
}

impl RecipeArgs {
    /// Apply the flags that were given on top of `base` (CLI wins).
    fn overlay(&self, base: RecipeParams) -> RecipeParams {
        let mut p = base;

        if let Some(pan) = self.pan {
            p.shape = DoughShape::Pan {
                width_cm: pan.width_cm,
                length_cm: pan.length_cm,
            };
        } else if self.balls.is_some() || self.ball_weight.is_some() {
            let (count, grams) = match p.shape {
                DoughShape::Balls { count, grams } => (count, grams),
                DoughShape::Pan { .. } => (DEFAULT_BALL_COUNT, DEFAULT_BALL_GRAMS),
            };
            p.shape = DoughShape::Balls {
                count: self.balls.unwrap_or(count),
                grams: self.ball_weight.unwrap_or(grams),
            };
        }

        macro_rules! take {
            ($flag:ident => $field:ident) => {
                if let Some(v) = self.$flag {
                    p.$field = v.into();
                }
            };
        }
        take!(hydration => hydration);
        take!(salt => salt_per_liter);
        take!(fat => fat_per_liter);
        take!(pdr => pdr_percent);
        take!(pdr_vigor => pdr_vigor);
        take!(total_hours => total_hours);
        take!(fridge_hours => fridge_hours);
        take!(temp => temp_c);
        p
    }

    fn start_time(&self) -> anyhow::Result<NaiveDateTime> {
        let now = Local::now().naive_local();
        match &self.start {
            Some(hhmm) => {
                let t = NaiveTime::parse_from_str(hhmm, "%H:%M")
                    .with_context(|| format!("invalid --start `{hhmm}`, expected HH:MM"))?;
                Ok(now.date().and_time(t))
            }
            None => Ok(now),
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Mix(args) => cmd_mix(args),
        Command::Recipe(args) => cmd_recipe(args),
    }
}

fn cmd_mix(args: MixArgs) -> anyhow::Result<()> {
    if args.flours.len() > 3 {
        bail!("at most three flours, got {}", args.flours.len());
    }

    let mut entries = [FlourInput::default(); 3];
    for (slot, f) in entries.iter_mut().zip(&args.flours) {
        *slot = f.0;
    }

    let mode = match args.mode {
        Some(n) => FlourMode::try_from(n).map_err(|n| anyhow::anyhow!("invalid mode {n}"))?,
        None if args.flours.len() == 3 => FlourMode::Three,
        None => FlourMode::Two,
    };
    debug!(?mode, ?entries, "mix input");

    let report = MixReport {
        mode,
        entries: &entries[..mode.count()],
        result: compute_blend(&entries, mode),
    };

    let out = match args.format {
        MixFormat::Table => render::mix_table(&report),
        MixFormat::Json => render::json(&report).context("serialize mix")?,
        MixFormat::Summary => render::mix_summary(&report),
    };
    println!("{out}");
    Ok(())
}

fn cmd_recipe(args: RecipeArgs) -> anyhow::Result<()> {
    let base = match &args.profile {
        Some(path) => profile::load(path)?,
        None => RecipeParams::default(),
    };
    let params = args.overlay(base);

    if let Some(path) = &args.save_profile {
        profile::save(path, &params)?;
        eprintln!("Profile saved to {}", path.display());
    }

    let start = args.start_time()?;
    let r = compute_recipe(&params, start);
    if r.params != params {
        debug!(given = ?params, used = ?r.params, "parameters clamped");
    }

    let out = match args.format {
        RecipeFormat::Table => {
            let ready_at = r.ready_at.format("%a %-d %b, %H:%M").to_string();
            render::recipe_table(&r, &ready_at)
        }
        RecipeFormat::Json => render::json(&r).context("serialize recipe")?,
    };
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_args(extra: &[&str]) -> RecipeArgs {
        let mut argv = vec!["pizza-cli", "recipe"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).cmd {
            Command::Recipe(a) => a,
            Command::Mix(_) => panic!("expected recipe"),
        }
    }

    #[test]
    fn test_no_flags_keeps_base() {
        let base = RecipeParams {
            hydration: 72.0,
            ..RecipeParams::default()
        };
        assert_eq!(recipe_args(&[]).overlay(base), base);
    }

    #[test]
    fn test_flags_override_profile() {
        let base = RecipeParams {
            hydration: 72.0,
            temp_c: 18.0,
            ..RecipeParams::default()
        };
        let p = recipe_args(&["--temp", "24", "--pdr-vigor", "vigorous"]).overlay(base);
        assert_eq!(p.hydration, 72.0);
        assert_eq!(p.temp_c, 24.0);
        assert_eq!(p.pdr_vigor, PdrVigor::Vigorous);
    }

    #[test]
    fn test_balls_replace_profile_pan() {
        let base = RecipeParams {
            shape: DoughShape::Pan {
                width_cm: 30.0,
                length_cm: 40.0,
            },
            ..RecipeParams::default()
        };
        let p = recipe_args(&["--balls", "4"]).overlay(base);
        assert_eq!(
            p.shape,
            DoughShape::Balls {
                count: 4,
                grams: 260.0
            }
        );
    }

    #[test]
    fn test_pan_flag() {
        let p = recipe_args(&["--pan", "30x40"]).overlay(RecipeParams::default());
        assert!(p.shape.is_pan());
        assert_eq!(p.shape.ball_grams(), 660.0);
    }

    #[test]
    fn test_bad_start_time() {
        assert!(recipe_args(&["--start", "25:99"]).start_time().is_err());
        let t = recipe_args(&["--start", "09:15"]).start_time().unwrap();
        assert_eq!(t.time(), NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }
}
