//! CSV Data Loader Module
//! Loads the raw datasets with Polars and applies the row-level cleaning rules.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::DataPaths;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Missing data file at {0}")]
    MissingFile(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// The three cleaned in-memory tables produced by one load pass.
pub struct CleanTables {
    pub flights: DataFrame,
    pub tickets: DataFrame,
    pub airports: DataFrame,
}

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars, normalizing column names to
    /// lower-case/trimmed.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::MissingFile(path.to_path_buf()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        let mut df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.as_str().trim().to_lowercase())
            .collect();
        df.set_column_names(names)?;
        Ok(df)
    }

    /// Load and clean all three datasets.
    pub fn load_all(paths: &DataPaths) -> Result<CleanTables, LoaderError> {
        let flights = Self::clean_flights(Self::load_csv(&paths.flights)?)?;
        let tickets = Self::load_csv(&paths.tickets)?;
        let airports = Self::clean_airports(Self::load_csv(&paths.airports)?)?;

        Ok(CleanTables {
            flights,
            tickets,
            airports,
        })
    }

    /// Flights cleaning rules, in order: coerce `cancelled` and `distance` to
    /// numeric, drop rows whose distance fails conversion, zero-fill missing
    /// delays, drop cancelled flights.
    pub fn clean_flights(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        let cancelled = df.column("cancelled")?.cast(&DataType::Float64)?;
        let cancelled_ca = cancelled.f64()?;
        let distance = df.column("distance")?.cast(&DataType::Float64)?;
        let distance_ca = distance.f64()?;

        let mut keep = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let not_cancelled = matches!(cancelled_ca.get(i), Some(v) if v == 0.0);
            let valid_distance = matches!(distance_ca.get(i), Some(v) if v.is_finite());
            keep.push(not_cancelled && valid_distance);
        }

        let distance_numeric = distance_ca.clone().into_series().with_name("distance".into());
        df.with_column(distance_numeric)?;

        for name in ["dep_delay", "arr_delay"] {
            let filled: Vec<f64> = df
                .column(name)?
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect();
            df.with_column(Series::new(name.into(), filled))?;
        }

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        Ok(df.filter(&mask)?)
    }

    /// Drop airport rows lacking an IATA code.
    pub fn clean_airports(df: DataFrame) -> Result<DataFrame, LoaderError> {
        let iata = df.column("iata_code")?.cast(&DataType::String)?;
        let iata_ca = iata.as_materialized_series().str()?;

        let keep: Vec<bool> = (0..df.height())
            .map(|i| iata_ca.get(i).is_some_and(|code| !code.trim().is_empty()))
            .collect();

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        Ok(df.filter(&mask)?)
    }
}
