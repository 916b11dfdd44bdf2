//! Stats module - Statistical computations

mod calculator;

pub use calculator::{
    ColumnSummary, FiveNumberSummary, HistogramBin, StatsCalculator, SummaryDetail,
};
