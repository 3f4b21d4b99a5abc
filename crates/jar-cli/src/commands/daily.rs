//! Per-day load breakdown for the planning board.

use clap::Args;
use std::path::PathBuf;

use super::{format_hours, Inputs};
use jar_core::capacity::week::parse_date;

#[derive(Args)]
pub struct DailyArgs {
    /// Snapshot file (JSON with profile and commitments)
    #[arg(long)]
    pub file: PathBuf,
    /// Any date in the week to show (YYYY-MM-DD)
    #[arg(long)]
    pub week: String,
    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DailyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let week = parse_date(&args.week)?;
    let inputs = Inputs::load(&args.file)?;
    let breakdown = inputs.engine.daily_breakdown(&inputs.commitments, week);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("Week of {}", breakdown.week_start.format("%Y-%m-%d"));
    for (date, load) in &breakdown.daily_loads {
        let marker = if breakdown.is_overloaded_on(*date) {
            "  OVERLOADED"
        } else {
            ""
        };
        println!("  {}  {:>6}{}", date.format("%a %m-%d"), format_hours(*load), marker);
    }
    Ok(())
}
