//! Renders a solved request to a PNG image with the plotters crate.
//!
//! Undefined samples split a curve into separate line segments, so domain
//! holes (log10 or sqrt outside their domain) show up as gaps and never as
//! points on the axis. Intersections are drawn as filled circles with a
//! "Solution i: x=..., y=..." annotation next to each.

use crate::numerical::intersect_api::PlotData;
use crate::numerical::sampling::CurveSample;
use itertools::Itertools;
use std::error::Error;
use std::path::Path;

/// y padding applied around the extremes of the drawn data
const Y_PAD_FRACTION: f64 = 0.05;

pub fn plot_intersections(data: &PlotData, path: &Path) -> Result<(), Box<dyn Error>> {
    use plotters::prelude::*;

    let (y_min, y_max) = y_range(data);
    let x_min = data.domain.x_min;
    let x_max = data.domain.x_max;

    let root_area = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption("Intersection of f1(x) and f2(x)", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

    // axes through the origin
    if y_min < 0.0 && y_max > 0.0 {
        chart.draw_series(LineSeries::new(
            vec![(x_min, 0.0), (x_max, 0.0)],
            &BLACK,
        ))?;
    }
    if x_min < 0.0 && x_max > 0.0 {
        chart.draw_series(LineSeries::new(
            vec![(0.0, y_min), (0.0, y_max)],
            &BLACK,
        ))?;
    }

    for (col, (curve, name)) in [(&data.curve1, "f1(x)"), (&data.curve2, "f2(x)")]
        .into_iter()
        .enumerate()
    {
        let mut labeled = false;
        for segment in defined_segments(curve) {
            let series = chart.draw_series(LineSeries::new(segment, &Palette99::pick(col)))?;
            if !labeled {
                series.label(name).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(col))
                });
                labeled = true;
            }
        }
    }

    for (i, root) in data.roots.iter().enumerate() {
        chart.draw_series(std::iter::once(Circle::new(
            (root.x, root.y),
            4,
            RED.filled(),
        )))?;
        let annotation = format!("Solution {}: x={:.4}, y={:.4}", i + 1, root.x, root.y);
        chart.draw_series(std::iter::once(Text::new(
            annotation,
            (root.x, root.y),
            ("sans-serif", 14),
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root_area.present()?;
    Ok(())
}

/// Splits a sampled curve into maximal runs of defined points.
fn defined_segments(curve: &CurveSample) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for point in curve {
        match point.y {
            Some(y) => current.push((point.x, y)),
            None => {
                if current.len() > 1 {
                    segments.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() > 1 {
        segments.push(current);
    }
    segments
}

/// y extent of everything that will be drawn: both curves and the root markers.
fn y_range(data: &PlotData) -> (f64, f64) {
    let ys = data
        .curve1
        .iter()
        .chain(data.curve2.iter())
        .filter_map(|p| p.y)
        .chain(data.roots.iter().map(|r| r.y));
    match ys.minmax().into_option() {
        Some((min, max)) if min < max => {
            let pad = (max - min) * Y_PAD_FRACTION;
            (min - pad, max + pad)
        }
        Some((min, _)) => (min - 1.0, min + 1.0),
        None => (-10.0, 10.0),
    }
}
