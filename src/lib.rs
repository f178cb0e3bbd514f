//! RouteLens - Airline Route Analysis & Interactive Web Dashboard

pub mod analysis;
pub mod charts;
pub mod data;
pub mod web;
