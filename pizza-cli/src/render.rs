//! Terminal output: tables, the plain-text mix recap, and JSON.

use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};
use pizza_core::{BlendResult, FlourInput, FlourMode, RecipeResult};
use serde::Serialize;

/// Everything shown for a mix, also the JSON shape.
#[derive(Debug, Serialize)]
pub struct MixReport<'a> {
    pub mode: FlourMode,
    pub entries: &'a [FlourInput],
    pub result: BlendResult,
}

fn fmt_g(x: f64) -> String {
    let v = (x * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0} g", v)
    } else {
        format!("{:.1} g", v)
    }
}

fn fmt_num(x: f64) -> String {
    if (x - x.round()).abs() < 1e-9 {
        format!("{:.0}", x)
    } else {
        format!("{}", x)
    }
}

fn new_table(headers: [&str; 3]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

fn gauge_bar(percent: f64) -> String {
    let filled = (percent / 5.0).round().clamp(0.0, 20.0) as usize;
    format!("[{}{}] {:.0}%", "#".repeat(filled), ".".repeat(20 - filled), percent)
}

pub fn mix_table(report: &MixReport) -> String {
    let mut table = new_table(["Flour", "W", "Grams"]);
    for (i, e) in report.entries.iter().enumerate() {
        let show = |v: Option<f64>| v.map(fmt_num).unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(format!("Flour {}", i + 1)),
            Cell::new(show(e.w)),
            Cell::new(show(e.grams)),
        ]);
    }

    let r = &report.result;
    let mut out = format!("\n=== Flour mix ===\n{table}\n");
    let Some(c) = r.classification else {
        out.push_str("\nEnter W and grams for at least one flour.\n");
        return out;
    };

    let mut analysis = new_table(["Result", "Value", ""]);
    analysis.add_row(vec![
        Cell::new("Mix strength"),
        Cell::new(format!("W {}", r.w)),
        Cell::new(gauge_bar(c.gauge)),
    ]);
    analysis.add_row(vec![
        Cell::new("Total weight"),
        Cell::new(fmt_g(r.total_grams)),
        Cell::new(""),
    ]);
    analysis.add_row(vec![Cell::new("Category"), Cell::new(c.label), Cell::new("")]);
    analysis.add_row(vec![
        Cell::new("Hydration"),
        Cell::new(format!("{}-{}%", c.hydration_min, c.hydration_max)),
        Cell::new(""),
    ]);
    analysis.add_row(vec![
        Cell::new("Fermentation"),
        Cell::new(c.fermentation),
        Cell::new(""),
    ]);
    analysis.add_row(vec![Cell::new("Uses"), Cell::new(c.uses), Cell::new("")]);
    analysis.add_row(vec![Cell::new("Notes"), Cell::new(c.notes), Cell::new("")]);

    out.push_str(&format!("\n=== Analysis ===\n{analysis}\n"));
    out
}

/// Short recap, suitable for pasting into a chat.
pub fn mix_summary(report: &MixReport) -> String {
    let r = &report.result;
    if r.classification.is_none() {
        return "Enter the flour data first.\n".to_string();
    }

    let mut text = String::from("Flour mix\n\n");
    for (i, e) in report.entries.iter().enumerate() {
        if let Some((w, g)) = e.valid() {
            text.push_str(&format!("Flour {}: W{} ({}g)\n", i + 1, fmt_num(w), fmt_num(g)));
        }
    }
    text.push_str(&format!("\nMix result: W {}\n", r.w));
    text.push_str(&format!("Total weight: {}g\n", fmt_num(r.total_grams)));
    if let Some(c) = r.classification {
        text.push_str(&format!("Category: {}\n", c.label));
        text.push_str(&format!(
            "Hydration: {}-{}%\n",
            c.hydration_min, c.hydration_max
        ));
    }
    text
}

pub fn recipe_table(r: &RecipeResult, ready_at: &str) -> String {
    let p = &r.params;
    let mut table = new_table(["Ingredient", "Amount", "Notes"]);

    let shape = if p.shape.is_pan() {
        format!("Pan, {:.0} g", r.ball_grams)
    } else {
        format!("{} × {:.0} g", r.ball_count, r.ball_grams)
    };
    table.add_row(vec![
        Cell::new("Dough"),
        Cell::new(fmt_g(r.dough_grams)),
        Cell::new(shape),
    ]);
    table.add_row(vec![
        Cell::new("Flour"),
        Cell::new(fmt_g(r.flour_g)),
        Cell::new(format!("{} ({})", r.suggested.range_text(), r.suggested.label)),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(fmt_g(r.water_g)),
        Cell::new(format!("H={}%", fmt_num(p.hydration))),
    ]);
    table.add_row(vec![
        Cell::new("Salt"),
        Cell::new(fmt_g(r.salt_g)),
        Cell::new(format!("{} g/L", fmt_num(p.salt_per_liter))),
    ]);
    if r.fat_g > 0.0 {
        table.add_row(vec![
            Cell::new("Fat"),
            Cell::new(fmt_g(r.fat_g)),
            Cell::new(format!("{} g/L", fmt_num(p.fat_per_liter))),
        ]);
    }
    if r.pdr_grams > 0.0 {
        table.add_row(vec![
            Cell::new("Pre-fermented dough"),
            Cell::new(fmt_g(r.pdr_grams)),
            Cell::new(format!("{}%, {:?}", fmt_num(p.pdr_percent), p.pdr_vigor)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Fresh yeast"),
        Cell::new(format!("{:.2} g", r.yeast_fresh_g)),
        Cell::new(format!("or {:.2} g dry", r.yeast_dry_g)),
    ]);

    let mut out = format!("\n=== Recipe ===\n{table}\n");
    out.push_str(&format!(
        "\nLeavening: {} h ({} h in the fridge) at {} °C\n",
        fmt_num(p.total_hours),
        fmt_num(p.fridge_hours),
        fmt_num(p.temp_c)
    ));
    out.push_str(&format!("Ready at: {ready_at}\n"));
    out
}

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
