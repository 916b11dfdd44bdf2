//! Charts module - chart specs, series data and rendering

mod plotter;
mod series;
mod spec;

pub use plotter::ChartPlotter;
pub use series::{ChartError, ChartSeries, DistributionSeries, PieSlice, ScatterGroup, SeriesData};
pub use spec::{ChartKind, ChartSpec};
