//! Core library: record browser pipeline, dashboard aggregate, intake and export.

pub mod config;
pub mod dashboard;
pub mod export;
pub mod filter;
pub mod intake;
pub mod kpi;
pub mod paginate;
pub mod pipeline;
pub mod search;
pub mod selection;
pub mod sort;
pub mod view;
