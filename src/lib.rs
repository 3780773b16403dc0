#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::type_complexity)]

/*
 * LEOLINK: LEO satellite link telemetry post processing.
 *
 * Telemetry logs are CSV tables whose columns follow the
 * LEO<N>_<Station>_<Metric> convention. This library identifies
 * the satellites that connected to both ground stations,
 * prunes everything else, and elects the best link per row.
 */

#[macro_use]
extern crate lazy_static;

pub mod best_link;
pub mod cell;
pub mod chart;
pub mod column;
pub mod filter;
pub mod organizer;
pub mod satellite;
pub mod station;
pub mod statistics;
pub mod table;

mod constants;
mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        best_link::{select_best_links, BestLink, BestLinkRecord, BestLinkTable},
        cell::Cell,
        chart::{best_link_charts, metric_charts, ChartRequest, MetricChart},
        column::{satellite_prefix, ColumnName, Metric},
        error::Error,
        filter::{ConnectivityFilter, FilterReport},
        organizer::{organize, ColumnIndex},
        satellite::{SatelliteId, SatelliteToken},
        station::Station,
        statistics::{describe, row_argmax, StatisticsTable, Summary},
        table::{Column, TelemetryTable},
    };
}

pub use error::Error;
