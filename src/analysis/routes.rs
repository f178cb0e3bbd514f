//! Route Aggregator Module
//! Joins flight and ticket tables by route and derives the financial metrics
//! for the ten busiest origin-destination pairs.

use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Seats assumed sold on every flight of a route.
pub const SEATS_SOLD_PER_FLIGHT: f64 = 200.0;
/// Operating cost per mile flown (fuel, crew, maintenance).
pub const COST_PER_MILE: f64 = 9.18;
/// Acquisition cost of one aircraft, recouped by per-flight profit.
pub const AIRCRAFT_COST: f64 = 90_000_000.0;
/// Break-even value reported when a route's profit is zero or negative.
pub const BREAK_EVEN_SENTINEL: u64 = 1_000_000;
/// Number of busiest routes kept in the output.
pub const TOP_ROUTES: usize = 10;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Column 'itin_fare' not found in Tickets dataset")]
    MissingFareColumn,
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One row of the route summary output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub origin: String,
    pub destination: String,
    pub num_flights: u64,
    pub avg_ticket_price: f64,
    pub avg_distance: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
    pub break_even_flights: u64,
}

/// Per-route accumulator over the flights table, kept in first-seen order so
/// that ties in the top-10 selection break deterministically.
struct RouteAccum {
    origin: String,
    destination: String,
    num_flights: u64,
    distance_sum: f64,
    distance_count: u64,
}

/// Computes the top-10 route summary from cleaned flight and ticket tables.
pub struct RouteAnalyzer;

impl RouteAnalyzer {
    /// Produce the top-10 busiest routes enriched with revenue, cost, profit
    /// and break-even metrics, sorted by descending flight count.
    pub fn top_routes(
        flights: &DataFrame,
        tickets: &DataFrame,
    ) -> Result<Vec<RouteSummary>, AnalysisError> {
        if tickets.column("itin_fare").is_err() {
            return Err(AnalysisError::MissingFareColumn);
        }

        let mean_fares = Self::mean_fare_per_route(tickets)?;

        let mut routes = Self::accumulate_flights(flights)?;
        // Stable sort keeps first-seen order among equal counts.
        routes.sort_by(|a, b| b.num_flights.cmp(&a.num_flights));
        routes.truncate(TOP_ROUTES);

        // Left-join mean fares onto the selected routes.
        let prices: Vec<Option<f64>> = routes
            .iter()
            .map(|r| {
                mean_fares
                    .get(&(r.origin.clone(), r.destination.clone()))
                    .copied()
            })
            .collect();

        // Routes with no ticket data get the median fare of the selected set,
        // or 0 when no fares are available at all.
        let known: Vec<f64> = prices.iter().flatten().copied().collect();
        let fallback_price = Self::median(&known).unwrap_or(0.0);

        let summaries = routes
            .into_iter()
            .zip(prices)
            .map(|(r, price)| {
                let avg_ticket_price = price.unwrap_or(fallback_price);
                let avg_distance = if r.distance_count > 0 {
                    r.distance_sum / r.distance_count as f64
                } else {
                    0.0
                };

                let flights = r.num_flights as f64;
                let total_revenue = flights * avg_ticket_price * SEATS_SOLD_PER_FLIGHT;
                let total_cost = flights * COST_PER_MILE * avg_distance;
                let profit = total_revenue - total_cost;

                let break_even = AIRCRAFT_COST / profit;
                let break_even_flights = if profit > 0.0 && break_even.is_finite() {
                    break_even as u64
                } else {
                    BREAK_EVEN_SENTINEL
                };

                RouteSummary {
                    origin: r.origin,
                    destination: r.destination,
                    num_flights: r.num_flights,
                    avg_ticket_price,
                    avg_distance,
                    total_revenue,
                    total_cost,
                    profit,
                    break_even_flights,
                }
            })
            .collect();

        Ok(summaries)
    }

    /// Flight count and distance sums per (origin, destination), in the order
    /// routes first appear in the table.
    fn accumulate_flights(flights: &DataFrame) -> Result<Vec<RouteAccum>, AnalysisError> {
        let origin = flights.column("origin")?.cast(&DataType::String)?;
        let origin_ca = origin.as_materialized_series().str()?;
        let destination = flights.column("destination")?.cast(&DataType::String)?;
        let destination_ca = destination.as_materialized_series().str()?;
        let distance = flights.column("distance")?.cast(&DataType::Float64)?;
        let distance_ca = distance.f64()?;

        let mut index: HashMap<(String, String), usize> = HashMap::new();
        let mut accum: Vec<RouteAccum> = Vec::new();

        for i in 0..flights.height() {
            let (Some(o), Some(d)) = (origin_ca.get(i), destination_ca.get(i)) else {
                continue;
            };

            let slot = *index
                .entry((o.to_string(), d.to_string()))
                .or_insert_with(|| {
                    accum.push(RouteAccum {
                        origin: o.to_string(),
                        destination: d.to_string(),
                        num_flights: 0,
                        distance_sum: 0.0,
                        distance_count: 0,
                    });
                    accum.len() - 1
                });

            let route = &mut accum[slot];
            route.num_flights += 1;
            if let Some(dist) = distance_ca.get(i) {
                if dist.is_finite() {
                    route.distance_sum += dist;
                    route.distance_count += 1;
                }
            }
        }

        Ok(accum)
    }

    /// Mean itinerary fare per (origin, destination). Unparseable fares are
    /// dropped row-by-row.
    fn mean_fare_per_route(
        tickets: &DataFrame,
    ) -> Result<HashMap<(String, String), f64>, AnalysisError> {
        let origin = tickets.column("origin")?.cast(&DataType::String)?;
        let origin_ca = origin.as_materialized_series().str()?;
        let destination = tickets.column("destination")?.cast(&DataType::String)?;
        let destination_ca = destination.as_materialized_series().str()?;
        let fare = tickets.column("itin_fare")?.cast(&DataType::Float64)?;
        let fare_ca = fare.f64()?;

        let mut sums: HashMap<(String, String), (f64, u64)> = HashMap::new();
        for i in 0..tickets.height() {
            let (Some(o), Some(d)) = (origin_ca.get(i), destination_ca.get(i)) else {
                continue;
            };
            let Some(f) = fare_ca.get(i) else { continue };
            if !f.is_finite() {
                continue;
            }
            let entry = sums.entry((o.to_string(), d.to_string())).or_insert((0.0, 0));
            entry.0 += f;
            entry.1 += 1;
        }

        Ok(sums
            .into_iter()
            .map(|(route, (sum, count))| (route, sum / count as f64))
            .collect())
    }

    /// Median of a slice, `None` when empty.
    fn median(values: &[f64]) -> Option<f64> {
        let n = values.len();
        if n == 0 {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        if n % 2 == 0 {
            Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
        } else {
            Some(sorted[n / 2])
        }
    }
}
