//! Weekly capacity summary.

use clap::Args;
use std::path::PathBuf;

use jar_core::{BucketType, CapacityResult, LoadStatus};

use super::{format_hours, parse_week, Inputs};

#[derive(Args)]
pub struct CapacityArgs {
    /// Snapshot file (JSON with profile and commitments)
    #[arg(long)]
    pub file: PathBuf,
    /// Restrict to the ISO week containing this date (YYYY-MM-DD)
    #[arg(long)]
    pub week: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CapacityArgs) -> Result<(), Box<dyn std::error::Error>> {
    let week = parse_week(args.week.as_deref())?;
    let inputs = Inputs::load(&args.file)?;
    let result = inputs.compute(week)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

fn status_label(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Clear => "clear",
        LoadStatus::Warning => "warning (shield up)",
        LoadStatus::Overloaded => "overloaded",
    }
}

fn print_summary(result: &CapacityResult) {
    println!("Jar: {}% full ({})", result.fill_level, status_label(result.load_status));
    println!(
        "  Capacity: {} nominal, {} water, {} deep work",
        format_hours(result.nominal_hours),
        format_hours(result.water_hours),
        format_hours(result.real_capacity)
    );
    for bucket in BucketType::ALL {
        println!(
            "  {:<7} {:>3} x -> {}",
            bucket,
            result.totals.count_for(bucket),
            format_hours(result.totals.hours_for(bucket))
        );
    }
    println!(
        "  Load: {} committed, {} remaining, {} completed",
        format_hours(result.weekly_load),
        format_hours(result.weekly_remaining),
        format_hours(result.completed_hours)
    );
    if result.overflow_hours > 0.0 {
        println!("  Overflow: {}", format_hours(result.overflow_hours));
    }
    if let Some(daily) = &result.daily {
        if !daily.overloaded_days.is_empty() {
            let days: Vec<String> = daily
                .overloaded_days
                .iter()
                .map(|d| d.format("%a %Y-%m-%d").to_string())
                .collect();
            println!("  Overloaded days: {}", days.join(", "));
        }
    }
}
