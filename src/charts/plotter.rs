//! Chart Plotter Module
//! Renders the dashboard bar charts to SVG strings with Plotters.

use crate::analysis::RouteSummary;
use plotters::prelude::*;
use thiserror::Error;

const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 420;

/// Color palette for route bars
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(255, 87, 34),  // Deep Orange
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart '{title}': {reason}")]
    Render { title: String, reason: String },
}

/// The three rendered dashboard charts, as standalone SVG documents.
pub struct DashboardCharts {
    pub busiest: String,
    pub profit: String,
    pub break_even: String,
}

/// Renders route summaries as bar charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Render all three dashboard charts for the given route summaries.
    pub fn dashboard_charts(routes: &[RouteSummary]) -> Result<DashboardCharts, ChartError> {
        let labels: Vec<String> = routes
            .iter()
            .map(|r| format!("{}-{}", r.origin, r.destination))
            .collect();

        let busiest: Vec<f64> = routes.iter().map(|r| r.num_flights as f64).collect();
        let profit: Vec<f64> = routes.iter().map(|r| r.profit).collect();
        let break_even: Vec<f64> = routes.iter().map(|r| r.break_even_flights as f64).collect();

        Ok(DashboardCharts {
            busiest: Self::bar_chart_svg(
                "Top 10 Busiest Round-Trip Routes",
                "Flights",
                &labels,
                &busiest,
            )?,
            profit: Self::bar_chart_svg(
                "Top 10 Most Profitable Routes",
                "Profit (USD)",
                &labels,
                &profit,
            )?,
            break_even: Self::bar_chart_svg(
                "Break-even Analysis for Recommended Routes",
                "Flights to Break Even",
                &labels,
                &break_even,
            )?,
        })
    }

    /// Render a single vertical bar chart to an SVG string.
    ///
    /// The y-range always includes zero so that negative values (losses) are
    /// drawn below the baseline.
    pub fn bar_chart_svg(
        title: &str,
        y_label: &str,
        labels: &[String],
        values: &[f64],
    ) -> Result<String, ChartError> {
        let render = |svg: &mut String| -> Result<(), Box<dyn std::error::Error>> {
            let root = SVGBackend::with_string(svg, (CHART_WIDTH, CHART_HEIGHT))
                .into_drawing_area();
            root.fill(&WHITE)?;

            let max = values.iter().copied().fold(0.0_f64, f64::max);
            let min = values.iter().copied().fold(0.0_f64, f64::min);
            let pad = ((max - min) * 0.05).max(1.0);
            let (y_lo, y_hi) = (if min < 0.0 { min - pad } else { 0.0 }, max + pad);

            let x_labels = labels.to_vec();
            let n = labels.len().max(1) as i32;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 24))
                .margin(10)
                .x_label_area_size(50)
                .y_label_area_size(90)
                .build_cartesian_2d(0..n, y_lo..y_hi)?;

            chart
                .configure_mesh()
                .x_desc("Route")
                .y_desc(y_label)
                .x_labels(labels.len().max(1))
                .x_label_formatter(&|x: &i32| {
                    x_labels
                        .get(*x as usize)
                        .cloned()
                        .unwrap_or_default()
                })
                .draw()?;

            for (idx, &value) in values.iter().enumerate() {
                let color = PALETTE[idx % PALETTE.len()];
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(idx as i32, 0.0), (idx as i32 + 1, value)],
                    color.mix(0.85).filled(),
                )))?;
            }

            root.present()?;
            Ok(())
        };

        let mut svg = String::new();
        render(&mut svg).map_err(|e| ChartError::Render {
            title: title.to_string(),
            reason: e.to_string(),
        })?;
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route(origin: &str, profit: f64) -> RouteSummary {
        RouteSummary {
            origin: origin.to_string(),
            destination: "LAX".to_string(),
            num_flights: 42,
            avg_ticket_price: 180.0,
            avg_distance: 1200.0,
            total_revenue: 42.0 * 180.0 * 200.0,
            total_cost: 42.0 * 9.18 * 1200.0,
            profit,
            break_even_flights: 600,
        }
    }

    #[test]
    fn renders_all_three_charts() {
        let routes = vec![sample_route("ORD", 50_000.0), sample_route("JFK", 70_000.0)];
        let charts = ChartPlotter::dashboard_charts(&routes).unwrap();

        for svg in [&charts.busiest, &charts.profit, &charts.break_even] {
            assert!(svg.contains("<svg"));
        }
        assert!(charts.busiest.contains("Top 10 Busiest Round-Trip Routes"));
    }

    #[test]
    fn negative_profit_still_renders() {
        let routes = vec![sample_route("ORD", -25_000.0)];
        let charts = ChartPlotter::dashboard_charts(&routes).unwrap();
        assert!(charts.profit.contains("<svg"));
    }

    #[test]
    fn empty_input_renders_an_empty_chart() {
        let charts = ChartPlotter::dashboard_charts(&[]).unwrap();
        assert!(charts.busiest.contains("<svg"));
    }
}
