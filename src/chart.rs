//! Destination bar chart, drawn with plotters into an in-memory SVG.

use plotters::prelude::*;

use crate::departures::DestinationFrequency;
use crate::error::{AppError, Result};

pub const CHART_TITLE: &str = "Top Destination Airports (Past Hour)";

const SIZE: (u32, u32) = (720, 380);

// Bar colour runs from LOW (fewest departures) to HIGH (busiest destination).
const LOW: RGBColor = RGBColor(198, 219, 239);
const HIGH: RGBColor = RGBColor(8, 48, 107);

/// Renders `rows` as an SVG document, one bar per destination in the given
/// order. An empty slice yields the titled frame with no bars.
pub fn bar_chart_svg(rows: &[DestinationFrequency]) -> Result<String> {
    let slots = rows.len().max(1) as u32;
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0) as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(48)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..max + 1)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(BLACK.mix(0.08))
            .x_labels(slots as usize)
            .x_label_formatter(&|value: &SegmentValue<u32>| match value {
                SegmentValue::CenterOf(i) => rows
                    .get(*i as usize)
                    .map(|r| r.destination.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc("Destination")
            .y_desc("Count")
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .margin(8)
                    .style_func(|_, count: &u32| shade(*count, max).filled())
                    .data(rows.iter().enumerate().map(|(i, r)| (i as u32, r.count as u32))),
            )
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

fn shade(count: u32, max: u32) -> RGBColor {
    let ratio = if max == 0 { 0.0 } else { f64::from(count) / f64::from(max) };
    let mix = |lo: u8, hi: u8| (f64::from(lo) + (f64::from(hi) - f64::from(lo)) * ratio).round() as u8;
    RGBColor(mix(LOW.0, HIGH.0), mix(LOW.1, HIGH.1), mix(LOW.2, HIGH.2))
}

fn render_error(err: impl std::fmt::Display) -> AppError {
    AppError::ChartError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(destination: &str, count: usize) -> DestinationFrequency {
        DestinationFrequency {
            destination: destination.into(),
            count,
        }
    }

    #[test]
    fn one_bar_per_destination() {
        let single = bar_chart_svg(&[row("KJFK", 4)]).unwrap();
        let triple = bar_chart_svg(&[row("KJFK", 4), row("EDDF", 2), row("LFPG", 1)]).unwrap();

        assert!(triple.contains("<svg"));
        assert!(triple.trim_end().ends_with("</svg>"));
        assert!(triple.contains(CHART_TITLE));
        for label in ["KJFK", "EDDF", "LFPG"] {
            assert!(triple.contains(label), "missing label {}", label);
        }
        assert_eq!(triple.matches("<rect").count() - single.matches("<rect").count(), 2);
    }

    #[test]
    fn busiest_bar_is_darkest() {
        let svg = bar_chart_svg(&[row("KJFK", 4), row("EDDF", 2)]).unwrap().to_lowercase();
        assert!(svg.contains("#08306b"));
        let rgb = |c: RGBColor| (c.0, c.1, c.2);
        assert_eq!(rgb(shade(0, 4)), (198, 219, 239));
        assert_eq!(rgb(shade(4, 4)), (8, 48, 107));
        assert_eq!(rgb(shade(2, 4)), (103, 134, 173));
        assert_eq!(rgb(shade(0, 0)), (198, 219, 239));
    }

    #[test]
    fn empty_series_draws_frame_only() {
        let svg = bar_chart_svg(&[]).unwrap();
        assert!(svg.contains(CHART_TITLE));
        assert!(!svg.to_lowercase().contains("#08306b"));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = bar_chart_svg(&[row("<b>", 1)]).unwrap();
        assert!(!svg.contains("<b>"));
    }
}
