//! Chart Series Module
//! Pure builders turning (table, spec) into the data behind one chart.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::charts::ChartSpec;
use crate::data::{LoaderError, WeatherTable, GROUP_COLUMN};
use crate::stats::{FiveNumberSummary, HistogramBin, StatsCalculator};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Table(#[from] LoaderError),
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
    #[error("Column '{0}' is not categorical")]
    NotCategorical(String),
    #[error("Column '{0}' has no values to plot")]
    EmptyColumn(String),
}

/// Distribution plot data: a histogram with a KDE overlay for numeric
/// columns, per-category counts otherwise.
#[derive(Debug, Clone)]
pub enum DistributionSeries {
    Numeric {
        bins: Vec<HistogramBin>,
        /// KDE curve already scaled to the count axis.
        kde: Vec<[f64; 2]>,
    },
    Categorical { counts: Vec<(String, usize)> },
}

#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// The data behind one rendered chart, paired with its title and axis labels.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: SeriesData,
}

#[derive(Debug, Clone)]
pub enum SeriesData {
    Distribution(DistributionSeries),
    Pie(Vec<PieSlice>),
    Box(FiveNumberSummary),
    /// Date-ordered `[days_since_epoch, value]` points.
    Line(Vec<[f64; 2]>),
    /// Category labels and the mean value per category.
    Bar { categories: Vec<String>, means: Vec<f64> },
    Scatter(Vec<ScatterGroup>),
}

impl ChartSeries {
    /// Build the series for a chart spec. Exactly one series per call; a
    /// mismatched or empty column yields a `ChartError` instead of a
    /// degenerate chart.
    pub fn build(table: &WeatherTable, spec: &ChartSpec) -> Result<Self, ChartError> {
        let title = spec.title();
        match spec {
            ChartSpec::Distribution { column } => {
                let data = build_distribution(table, column)?;
                Ok(Self {
                    title,
                    x_label: column.clone(),
                    y_label: "Count".to_string(),
                    data: SeriesData::Distribution(data),
                })
            }
            ChartSpec::Pie { column } => {
                let slices = build_pie(table, column)?;
                Ok(Self {
                    title,
                    x_label: String::new(),
                    y_label: String::new(),
                    data: SeriesData::Pie(slices),
                })
            }
            ChartSpec::Box { column } => {
                let summary = build_box(table, column)?;
                Ok(Self {
                    title,
                    x_label: column.clone(),
                    y_label: "Value".to_string(),
                    data: SeriesData::Box(summary),
                })
            }
            ChartSpec::Line { column } => {
                let points = build_line(table, column)?;
                Ok(Self {
                    title,
                    x_label: "Date".to_string(),
                    y_label: column.clone(),
                    data: SeriesData::Line(points),
                })
            }
            ChartSpec::Bar { column } => {
                let (categories, means) = build_bar(table, column)?;
                Ok(Self {
                    title,
                    x_label: "Weather".to_string(),
                    y_label: column.clone(),
                    data: SeriesData::Bar { categories, means },
                })
            }
            ChartSpec::Scatter { x_column, y_column } => {
                let groups = build_scatter(table, x_column, y_column)?;
                Ok(Self {
                    title,
                    x_label: x_column.clone(),
                    y_label: y_column.clone(),
                    data: SeriesData::Scatter(groups),
                })
            }
        }
    }
}

fn require_numeric(table: &WeatherTable, column: &str) -> Result<(), ChartError> {
    if table.is_numeric(column) {
        Ok(())
    } else {
        Err(ChartError::NotNumeric(column.to_string()))
    }
}

fn build_distribution(table: &WeatherTable, column: &str) -> Result<DistributionSeries, ChartError> {
    if table.is_numeric(column) {
        let values = table.numeric_values(column)?;
        if values.is_empty() {
            return Err(ChartError::EmptyColumn(column.to_string()));
        }
        let bins = StatsCalculator::histogram(&values);
        let bin_width = bins.first().map(|b| b.width).unwrap_or(1.0);
        let kde = StatsCalculator::kde_curve(&values, values.len() as f64 * bin_width);
        Ok(DistributionSeries::Numeric { bins, kde })
    } else if table.is_categorical(column) {
        let counts = value_counts(table, column)?;
        if counts.is_empty() {
            return Err(ChartError::EmptyColumn(column.to_string()));
        }
        Ok(DistributionSeries::Categorical { counts })
    } else {
        Err(ChartError::NotNumeric(column.to_string()))
    }
}

fn build_pie(table: &WeatherTable, column: &str) -> Result<Vec<PieSlice>, ChartError> {
    if !table.is_categorical(column) {
        return Err(ChartError::NotCategorical(column.to_string()));
    }
    let counts = value_counts(table, column)?;
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return Err(ChartError::EmptyColumn(column.to_string()));
    }

    Ok(counts
        .into_iter()
        .map(|(label, count)| PieSlice {
            label,
            count,
            fraction: count as f64 / total as f64,
        })
        .collect())
}

fn build_box(table: &WeatherTable, column: &str) -> Result<FiveNumberSummary, ChartError> {
    require_numeric(table, column)?;
    let values = table.numeric_values(column)?;
    StatsCalculator::five_number_summary(&values)
        .ok_or_else(|| ChartError::EmptyColumn(column.to_string()))
}

fn build_line(table: &WeatherTable, column: &str) -> Result<Vec<[f64; 2]>, ChartError> {
    require_numeric(table, column)?;
    let days = table.date_days_opt()?;
    let values = table.numeric_values_opt(column)?;

    let mut points: Vec<[f64; 2]> = days
        .into_iter()
        .zip(values)
        .filter_map(|(d, v)| Some([d? as f64, v?]))
        .collect();
    if points.is_empty() {
        return Err(ChartError::EmptyColumn(column.to_string()));
    }

    points.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));
    Ok(points)
}

fn build_bar(table: &WeatherTable, column: &str) -> Result<(Vec<String>, Vec<f64>), ChartError> {
    require_numeric(table, column)?;
    let groups = table.string_values_opt(GROUP_COLUMN)?;
    let values = table.numeric_values_opt(column)?;

    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (group, value) in groups.into_iter().zip(values) {
        if let (Some(g), Some(v)) = (group, value) {
            let entry = acc.entry(g).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }
    if acc.is_empty() {
        return Err(ChartError::EmptyColumn(column.to_string()));
    }

    let categories: Vec<String> = acc.keys().cloned().collect();
    let means: Vec<f64> = acc.values().map(|(sum, n)| sum / *n as f64).collect();
    Ok((categories, means))
}

fn build_scatter(
    table: &WeatherTable,
    x_column: &str,
    y_column: &str,
) -> Result<Vec<ScatterGroup>, ChartError> {
    require_numeric(table, x_column)?;
    require_numeric(table, y_column)?;

    let xs = table.numeric_values_opt(x_column)?;
    let ys = table.numeric_values_opt(y_column)?;
    let groups = table.string_values_opt(GROUP_COLUMN)?;

    let mut by_group: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for ((x, y), group) in xs.into_iter().zip(ys).zip(groups) {
        if let (Some(x), Some(y), Some(g)) = (x, y, group) {
            by_group.entry(g).or_default().push([x, y]);
        }
    }
    if by_group.is_empty() {
        return Err(ChartError::EmptyColumn(x_column.to_string()));
    }

    Ok(by_group
        .into_iter()
        .map(|(label, points)| ScatterGroup { label, points })
        .collect())
}

/// Count distinct non-null values of a categorical column, most frequent
/// first.
fn value_counts(table: &WeatherTable, column: &str) -> Result<Vec<(String, usize)>, ChartError> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in table.string_values_opt(column)?.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use polars::prelude::*;

    fn sample_table() -> WeatherTable {
        let date = Column::new("date".into(), &[15343i32, 15340, 15342, 15341, 15344, 15345])
            .cast(&DataType::Date)
            .unwrap();
        let precipitation =
            Column::new("precipitation".into(), &[20.3f64, 0.0, 0.8, 10.9, 1.3, 2.5]);
        let temp_max = Column::new("temp_max".into(), &[12.2f64, 12.8, 11.7, 10.6, 8.9, 4.4]);
        let temp_min = Column::new("temp_min".into(), &[5.6f64, 5.0, 7.2, 2.8, 2.8, 2.2]);
        let weather = Column::new(
            "weather".into(),
            &["rain", "drizzle", "rain", "rain", "sun", "sun"],
        );
        let df = DataFrame::new(vec![date, precipitation, temp_max, temp_min, weather]).unwrap();
        WeatherTable::from_dataframe(df).unwrap()
    }

    #[test]
    fn distribution_of_precipitation() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Distribution, "precipitation", "");
        let series = ChartSeries::build(&table, &spec).unwrap();

        assert_eq!(series.title, "Distribution of precipitation");
        match series.data {
            SeriesData::Distribution(DistributionSeries::Numeric { bins, .. }) => {
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
            }
            _ => panic!("expected numeric distribution"),
        }
    }

    #[test]
    fn distribution_of_categorical_column() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Distribution, "weather", "");
        let series = ChartSeries::build(&table, &spec).unwrap();
        match series.data {
            SeriesData::Distribution(DistributionSeries::Categorical { counts }) => {
                assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), 6);
            }
            _ => panic!("expected categorical distribution"),
        }
    }

    #[test]
    fn pie_fractions_sum_to_one() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Pie, "weather", "");
        let series = ChartSeries::build(&table, &spec).unwrap();

        match series.data {
            SeriesData::Pie(slices) => {
                let total: f64 = slices.iter().map(|s| s.fraction).sum();
                assert!((total - 1.0).abs() < 1e-9);
                // Most frequent first.
                assert_eq!(slices[0].label, "rain");
                assert_eq!(slices[0].count, 3);
            }
            _ => panic!("expected pie series"),
        }
    }

    #[test]
    fn pie_rejects_numeric_column() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Pie, "precipitation", "");
        let result = ChartSeries::build(&table, &spec);
        assert!(matches!(result, Err(ChartError::NotCategorical(_))));
    }

    #[test]
    fn box_rejects_categorical_column() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Box, "weather", "");
        let result = ChartSeries::build(&table, &spec);
        assert!(matches!(result, Err(ChartError::NotNumeric(_))));
    }

    #[test]
    fn line_points_are_date_ordered() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Line, "temp_max", "");
        let series = ChartSeries::build(&table, &spec).unwrap();

        match series.data {
            SeriesData::Line(points) => {
                assert_eq!(points.len(), 6);
                assert!(points.windows(2).all(|w| w[0][0] <= w[1][0]));
                // Row with date 15340 carries temp_max 12.8.
                assert_eq!(points[0], [15340.0, 12.8]);
            }
            _ => panic!("expected line series"),
        }
    }

    #[test]
    fn bar_means_grouped_by_weather() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Bar, "precipitation", "");
        let series = ChartSeries::build(&table, &spec).unwrap();

        match series.data {
            SeriesData::Bar { categories, means } => {
                assert_eq!(categories, vec!["drizzle", "rain", "sun"]);
                assert!((means[0] - 0.0).abs() < 1e-9);
                assert!((means[1] - (20.3 + 0.8 + 10.9) / 3.0).abs() < 1e-9);
                assert!((means[2] - (1.3 + 2.5) / 2.0).abs() < 1e-9);
            }
            _ => panic!("expected bar series"),
        }
    }

    #[test]
    fn scatter_point_count_equals_row_count() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Scatter, "temp_max", "temp_min");
        let series = ChartSeries::build(&table, &spec).unwrap();

        assert_eq!(series.title, "Scatter Plot of temp_max vs temp_min");
        match series.data {
            SeriesData::Scatter(groups) => {
                let total: usize = groups.iter().map(|g| g.points.len()).sum();
                assert_eq!(total, table.row_count());

                let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
                assert_eq!(labels, vec!["drizzle", "rain", "sun"]);
            }
            _ => panic!("expected scatter series"),
        }
    }

    #[test]
    fn scatter_same_column_both_axes_is_allowed() {
        let table = sample_table();
        let spec = ChartSpec::from_selection(ChartKind::Scatter, "temp_max", "temp_max");
        let series = ChartSeries::build(&table, &spec).unwrap();
        match series.data {
            SeriesData::Scatter(groups) => {
                for group in groups {
                    assert!(group.points.iter().all(|p| p[0] == p[1]));
                }
            }
            _ => panic!("expected scatter series"),
        }
    }
}
