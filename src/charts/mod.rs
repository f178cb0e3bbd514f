//! Charts module - SVG chart rendering for the dashboard

mod plotter;

pub use plotter::{ChartError, ChartPlotter, DashboardCharts};
