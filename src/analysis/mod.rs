//! Analysis module - route aggregation and financial metrics

mod routes;

pub use routes::{AnalysisError, RouteAnalyzer, RouteSummary};
pub use routes::{AIRCRAFT_COST, BREAK_EVEN_SENTINEL, COST_PER_MILE, SEATS_SOLD_PER_FLIGHT, TOP_ROUTES};
