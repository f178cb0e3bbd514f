//! RouteLens - Airline Route Analysis & Interactive Web Dashboard
//!
//! Loads flight, ticket and airport datasets from a bundled archive, computes
//! financial metrics for the ten busiest routes and serves them as a web
//! dashboard.

use anyhow::Context;
use routelens::{analysis, charts, data, web};
use std::net::SocketAddr;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8050);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let paths = data::ensure_extracted(Path::new(data::DATA_ARCHIVE), Path::new(data::DATA_DIR))
        .context("locating input datasets")?;

    let tables = data::DataLoader::load_all(&paths).context("loading datasets")?;
    tracing::info!(
        flights = tables.flights.height(),
        tickets = tables.tickets.height(),
        airports = tables.airports.height(),
        "datasets loaded"
    );

    let routes = analysis::RouteAnalyzer::top_routes(&tables.flights, &tables.tickets)
        .context("aggregating routes")?;
    tracing::info!(routes = routes.len(), "route summary computed");

    let rendered = charts::ChartPlotter::dashboard_charts(&routes).context("rendering charts")?;
    let page = web::render_page(&rendered);

    let (ip, port) = BIND_ADDR;
    web::serve(SocketAddr::from((ip, port)), web::Dashboard { routes, page }).await
}
