//! Dashboard Server Module
//! Serves the rendered charts and the route summary table over HTTP with Axum.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::analysis::RouteSummary;
use crate::charts::DashboardCharts;

/// Immutable dashboard state computed once at startup.
pub struct Dashboard {
    pub routes: Vec<RouteSummary>,
    pub page: String,
}

/// Build the Axum router.
pub fn build_router(state: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/routes", get(routes_json))
        .route("/health", get(health))
        .with_state(state)
}

async fn index(State(dashboard): State<Arc<Dashboard>>) -> Html<String> {
    Html(dashboard.page.clone())
}

async fn routes_json(State(dashboard): State<Arc<Dashboard>>) -> Json<Vec<RouteSummary>> {
    Json(dashboard.routes.clone())
}

async fn health() -> &'static str {
    "ok"
}

/// Render the dashboard page embedding the three chart SVGs.
pub fn render_page(charts: &DashboardCharts) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Airline Data Analysis</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem auto; max-width: 1000px; color: #222; }}
  h1 {{ text-align: center; }}
  section {{ margin-bottom: 2rem; }}
</style>
</head>
<body>
<h1>Airline Data Analysis</h1>
<section>{busiest}</section>
<section>{profit}</section>
<section>{break_even}</section>
</body>
</html>
"#,
        busiest = charts.busiest,
        profit = charts.profit,
        break_even = charts.break_even,
    )
}

/// Bind and serve the dashboard until the process is terminated.
pub async fn serve(addr: SocketAddr, dashboard: Dashboard) -> anyhow::Result<()> {
    let app = build_router(Arc::new(dashboard));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("dashboard listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartPlotter;

    fn sample_dashboard() -> Dashboard {
        let routes = vec![RouteSummary {
            origin: "ORD".to_string(),
            destination: "LAX".to_string(),
            num_flights: 10,
            avg_ticket_price: 150.0,
            avg_distance: 1744.0,
            total_revenue: 300_000.0,
            total_cost: 160_099.2,
            profit: 139_900.8,
            break_even_flights: 643,
        }];
        let charts = ChartPlotter::dashboard_charts(&routes).unwrap();
        Dashboard {
            routes,
            page: render_page(&charts),
        }
    }

    #[test]
    fn page_embeds_all_charts() {
        let dashboard = sample_dashboard();
        assert!(dashboard.page.contains("Airline Data Analysis"));
        assert!(dashboard.page.contains("Top 10 Busiest Round-Trip Routes"));
        assert!(dashboard.page.contains("Top 10 Most Profitable Routes"));
        assert!(dashboard.page.contains("Break-even Analysis for Recommended Routes"));
    }

    #[test]
    fn route_summaries_serialize_to_json() {
        let dashboard = sample_dashboard();
        let json = serde_json::to_string(&dashboard.routes).unwrap();
        assert!(json.contains("\"origin\":\"ORD\""));
        assert!(json.contains("\"break_even_flights\":643"));
    }

    #[test]
    fn router_builds() {
        let _router = build_router(Arc::new(sample_dashboard()));
    }
}
