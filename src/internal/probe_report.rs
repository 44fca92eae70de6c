//! Measures how many slots a lookup examines as a `ProbingTable` fills up, then plots the
//! averages and the worst cases.
#![allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use std::sync::Once;

use env_logger::Builder;
use log::{LevelFilter, debug, info};
use plotters::prelude::*;
use probing_hashmap::ProbingTable;
use rand::Rng;

/// Number of slots in every measured table
const TABLE_SIZE: usize = 1 << 16;
/// Number of load factors sampled between `MIN_LOAD` and `MAX_LOAD`
const NUM_LOAD_FACTORS: usize = 10;
/// Lowest sampled load factor
const MIN_LOAD: f64 = 0.1;
/// Highest sampled load factor, kept below the grow threshold
const MAX_LOAD: f64 = 0.55;

/// Guards logger initialization
static INIT: Once = Once::new();

/// Probe counts observed at one load factor
#[derive(Debug, Clone, Copy)]
struct ProbeStats {
    /// Fraction of occupied slots
    load_factor: f64,
    /// Mean number of slots examined per lookup
    average: f64,
    /// Longest lookup
    worst: usize,
}

/// Sets up `env_logger`, honouring `RUST_LOG`
fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("probing_hashmap", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Avoid panicking if the logger was already initialized elsewhere.
        let _ = builder.try_init();
    });
}

/// Fills a fresh table to `load_factor` with `keys` and probes every key back
fn measure(load_factor: f64, keys: &[u64]) -> ProbeStats {
    let mut table = ProbingTable::with_capacity(TABLE_SIZE / 2);
    let count = (table.capacity() as f64 * load_factor) as usize;
    let keys = keys.get(..count).unwrap_or(keys);

    for &key in keys {
        table.insert(key, ());
    }
    debug!("Filled {} of {} slots", table.len(), table.capacity());

    let probes: Vec<usize> = keys.iter().map(|key| table.probe_count(key)).collect();
    let average = probes.iter().sum::<usize>() as f64 / probes.len().max(1) as f64;
    let worst = probes.iter().copied().max().unwrap_or(0);

    ProbeStats { load_factor, average, worst }
}

/// Draws one series of `(load factor, probes)` points into `path`
fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    points: &[(f64, f64)],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let color = RGBColor(50, 90, 220);
    let line_style = ShapeStyle::from(&color).stroke_width(2);

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = points.iter().map(|&(_, y)| y).fold(1.0, f64::max) * 1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(MIN_LOAD..MAX_LOAD, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), line_style))?
        .label("Linear Probing")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

    chart.draw_series(points.iter().map(|&point| Circle::new(point, 4, color.filled())))?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    initialize_logger();

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| MIN_LOAD + (MAX_LOAD - MIN_LOAD) * i as f64 / (NUM_LOAD_FACTORS - 1) as f64)
        .collect();

    // Generate random keys once so every load factor sees the same prefix
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TABLE_SIZE).map(|_| rng.random()).collect();

    let stats: Vec<ProbeStats> = load_factors.iter().map(|&load| measure(load, &keys)).collect();
    for s in &stats {
        info!(
            "Load factor {:.2}: avg probes = {:.2}, worst = {}",
            s.load_factor, s.average, s.worst
        );
    }

    let averages: Vec<(f64, f64)> = stats.iter().map(|s| (s.load_factor, s.average)).collect();
    let worst: Vec<(f64, f64)> = stats.iter().map(|s| (s.load_factor, s.worst as f64)).collect();

    plot(
        "average_probe_count.png",
        "Average Probe Count by Load Factor",
        "Average Slots Examined",
        &averages,
    )?;
    plot(
        "worst_probe_count.png",
        "Worst-Case Probe Count by Load Factor",
        "Worst-Case Slots Examined",
        &worst,
    )?;

    println!("Generated plot images: average_probe_count.png, worst_probe_count.png");

    Ok(())
}
