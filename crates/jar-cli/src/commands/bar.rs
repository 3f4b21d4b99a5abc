//! Stacked capacity bar rendering.

use clap::Args;
use std::path::PathBuf;

use jar_core::capacity::DEFAULT_BAR_WIDTH;
use jar_core::BarSegments;

use super::{parse_week, Inputs};

#[derive(Args)]
pub struct BarArgs {
    /// Snapshot file (JSON with profile and commitments)
    #[arg(long)]
    pub file: PathBuf,
    /// Restrict to the ISO week containing this date (YYYY-MM-DD)
    #[arg(long)]
    pub week: Option<String>,
    /// Total bar width
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
    pub width: f64,
    /// Print the segment widths as JSON
    #[arg(long)]
    pub json: bool,
}

/// Largest accepted `--width`; also caps the columns of the text bar.
pub const MAX_BAR_WIDTH: f64 = 1000.0;

pub fn run(args: BarArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_width(args.width)?;
    let week = parse_week(args.week.as_deref())?;
    let inputs = Inputs::load(&args.file)?;
    let result = inputs.compute(week)?;
    let segments = result.bar_segments(args.width);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else {
        println!("[{}] {}%", render(&segments), result.fill_level);
    }
    Ok(())
}

fn validate_width(width: f64) -> Result<(), String> {
    if !width.is_finite() || width <= 0.0 {
        return Err(format!("width must be positive, got {width}"));
    }
    if width > MAX_BAR_WIDTH {
        return Err(format!("width must be at most {MAX_BAR_WIDTH}, got {width}"));
    }
    Ok(())
}

/// One character per unit of width: `~` water, `R` rock, `P` pebble, `.` sand.
///
/// Segment boundaries are rounded cumulatively so the bar is exactly
/// `round(total)` characters long, capped at [`MAX_BAR_WIDTH`].
fn render(segments: &BarSegments) -> String {
    let total = segments.total();
    if !total.is_finite() || total <= 0.0 {
        return String::new();
    }
    let columns = total.round().min(MAX_BAR_WIDTH);

    let mut bar = String::with_capacity(columns as usize);
    let mut cumulative = 0.0;
    let mut drawn = 0usize;
    for (width, glyph) in [
        (segments.water, '~'),
        (segments.rock, 'R'),
        (segments.pebble, 'P'),
        (segments.sand, '.'),
        (segments.empty, ' '),
    ] {
        cumulative += width.max(0.0);
        let boundary = ((cumulative / total * columns).round() as usize).min(columns as usize);
        bar.extend(std::iter::repeat(glyph).take(boundary.saturating_sub(drawn)));
        drawn = drawn.max(boundary);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_emits_one_glyph_per_unit() {
        let segments = BarSegments {
            water: 2.0,
            rock: 3.0,
            pebble: 1.0,
            sand: 0.0,
            empty: 4.0,
        };
        assert_eq!(render(&segments), "~~RRRP    ");
    }

    #[test]
    fn render_length_matches_width_with_half_units() {
        let segments = BarSegments {
            water: 2.5,
            rock: 2.5,
            pebble: 0.0,
            sand: 0.0,
            empty: 0.0,
        };
        let bar = render(&segments);
        assert_eq!(bar.chars().count(), 5);
        assert!(bar.starts_with("~~"));
        assert!(bar.ends_with("RR"));
    }

    #[test]
    fn render_caps_huge_segments() {
        let segments = BarSegments {
            water: 1e20,
            ..BarSegments::default()
        };
        assert_eq!(render(&segments).len(), MAX_BAR_WIDTH as usize);
    }

    #[test]
    fn width_outside_limits_is_rejected() {
        assert!(validate_width(100.0).is_ok());
        assert!(validate_width(MAX_BAR_WIDTH).is_ok());
        assert!(validate_width(1e20).is_err());
        assert!(validate_width(MAX_BAR_WIDTH + 1.0).is_err());
        assert!(validate_width(0.0).is_err());
        assert!(validate_width(f64::NAN).is_err());
    }
}
