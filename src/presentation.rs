use analytics::{PerformanceReport, SeriesStats};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use core_types::DateIndex;
use serde::Serialize;
use std::path::Path;

/// Positions of `n` evenly spaced labels over a series of length `len`,
/// spanning indices `1..=len - 1` and truncated to integers, the way
/// `numpy.linspace(1, len - 1, n).astype(int)` places them.
///
/// Repeated positions (when `n` exceeds the number of available periods)
/// are kept once. Series shorter than two periods get no ticks.
pub fn tick_positions(len: usize, n: usize) -> Vec<usize> {
    if len < 2 || n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1];
    }

    let step = (len - 2) as f64 / (n - 1) as f64;
    let mut ticks: Vec<usize> = (0..n).map(|i| (i as f64 * step + 1.0) as usize).collect();
    // The endpoint is exact, not accumulated.
    ticks[n - 1] = len - 1;
    ticks.dedup();
    ticks
}

/// One row of the exported cumulative curves.
#[derive(Debug, Serialize)]
struct CurveRow<'a> {
    date: &'a str,
    strategy: f64,
    benchmark: f64,
}

/// Renders the cumulative curves at the tick positions.
pub fn curve_table(
    dates: &DateIndex,
    strategy: &[f64],
    benchmark: &[f64],
    n_ticks: usize,
    benchmark_label: &str,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Strategy", benchmark_label]);

    for t in tick_positions(strategy.len(), n_ticks) {
        table.add_row(vec![
            Cell::new(dates.get(t).unwrap_or("?")),
            Cell::new(format!("{:.4}", strategy[t])).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", benchmark[t])).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Renders the side-by-side summary of the strategy and the benchmark.
pub fn summary_table(report: &PerformanceReport, benchmark_label: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Strategy", benchmark_label]);

    let rows: [(&str, fn(&SeriesStats) -> String); 6] = [
        ("Total return", |s| format!("{:.4}", s.total_return)),
        ("Mean period return", |s| format!("{:.5}", s.mean_return)),
        ("Volatility", |s| format!("{:.5}", s.volatility)),
        ("Sharpe (per period)", |s| {
            s.sharpe_ratio.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"))
        }),
        ("Max drawdown", |s| format!("{:.4}", s.max_drawdown)),
        ("Hit rate", |s| format!("{:.1}%", s.hit_rate_pct)),
    ];
    for (name, metric) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(metric(&report.strategy)).set_alignment(CellAlignment::Right),
            Cell::new(metric(&report.benchmark)).set_alignment(CellAlignment::Right),
        ]);
    }

    let selection = &report.selection;
    table.add_row(vec![
        Cell::new("Excess return"),
        Cell::new(format!("{:.4}", report.excess_return)).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Flat periods (long / short / both)"),
        Cell::new(format!(
            "{} / {} / {} of {}",
            selection.degenerate_long,
            selection.degenerate_short,
            selection.flat_periods,
            selection.n_periods
        )),
        Cell::new(""),
    ]);
    table
}

/// Writes the full cumulative curves as `date,strategy,benchmark`.
pub fn write_curves_csv(
    path: &Path,
    dates: &DateIndex,
    strategy: &[f64],
    benchmark: &[f64],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file at {}", path.display()))?;

    for ((date, &strategy), &benchmark) in dates.iter().zip(strategy).zip(benchmark) {
        writer.serialize(CurveRow {
            date,
            strategy,
            benchmark,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the performance report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &PerformanceReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}
