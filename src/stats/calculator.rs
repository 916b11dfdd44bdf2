//! Statistics Calculator Module
//! Descriptive statistics, histogram binning and kernel density estimation.

use crate::data::{WeatherTable, DATE_COLUMN};
use rayon::prelude::*;
use statrs::distribution::{Continuous, Normal};

/// Five-number summary with 1.5*IQR whiskers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
}

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub center: f64,
    pub width: f64,
    pub count: usize,
}

/// Per-column descriptive summary for the "Show Data Summary" table.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub nulls: usize,
    pub detail: SummaryDetail,
}

#[derive(Debug, Clone)]
pub enum SummaryDetail {
    Numeric {
        mean: f64,
        std: f64,
        min: f64,
        q25: f64,
        median: f64,
        q75: f64,
        max: f64,
    },
    Categorical {
        unique: usize,
        top: String,
        freq: usize,
    },
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Sample mean and standard deviation (n-1 denominator).
    pub fn mean_std(values: &[f64]) -> (f64, f64) {
        let n = values.len();
        if n == 0 {
            return (f64::NAN, f64::NAN);
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        (mean, variance.sqrt())
    }

    /// Percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Five-number summary with whiskers clamped to the most extreme values
    /// within 1.5*IQR of the quartiles.
    pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        Some(FiveNumberSummary {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
        })
    }

    /// Uniform-width histogram, square-root bin rule clamped to [5, 40].
    pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
        if values.is_empty() {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return vec![HistogramBin {
                center: min,
                width: 1.0,
                count: values.len(),
            }];
        }

        let n_bins = ((values.len() as f64).sqrt().ceil() as usize).clamp(5, 40);
        let width = (max - min) / n_bins as f64;

        let mut counts = vec![0usize; n_bins];
        for &v in values {
            let idx = (((v - min) / width) as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                center: min + (i as f64 + 0.5) * width,
                width,
                count,
            })
            .collect()
    }

    /// Gaussian KDE curve with Silverman's bandwidth, evaluated on a 200
    /// point grid and scaled by `scale` (pass `n * bin_width` to overlay on
    /// a count histogram). Empty when the sample is too small or degenerate.
    pub fn kde_curve(values: &[f64], scale: f64) -> Vec<[f64; 2]> {
        let n = values.len();
        if n < 2 {
            return Vec::new();
        }

        let (_, std) = Self::mean_std(values);
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let iqr = Self::percentile(&sorted, 75.0) - Self::percentile(&sorted, 25.0);

        // Silverman's rule of thumb.
        let spread = if iqr > 0.0 {
            std.min(iqr / 1.34)
        } else {
            std
        };
        let h = 0.9 * spread * (n as f64).powf(-0.2);
        if h <= 0.0 || !h.is_finite() {
            return Vec::new();
        }

        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let lo = sorted[0] - 3.0 * h;
        let hi = sorted[n - 1] + 3.0 * h;
        let steps = 200usize;
        let step = (hi - lo) / steps as f64;

        (0..=steps)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density: f64 = values
                    .iter()
                    .map(|&xi| kernel.pdf((x - xi) / h))
                    .sum::<f64>()
                    / (n as f64 * h);
                [x, density * scale]
            })
            .collect()
    }

    /// Summaries for every numeric and categorical column, computed in
    /// parallel. The `date` column is excluded.
    pub fn summarize_table(table: &WeatherTable) -> Vec<ColumnSummary> {
        let columns: Vec<String> = table
            .column_names()
            .into_iter()
            .filter(|c| c != DATE_COLUMN)
            .filter(|c| table.is_numeric(c) || table.is_categorical(c))
            .collect();

        columns
            .par_iter()
            .filter_map(|name| Self::summarize_column(table, name))
            .collect()
    }

    fn summarize_column(table: &WeatherTable, name: &str) -> Option<ColumnSummary> {
        let total = table.row_count();

        if table.is_numeric(name) {
            let values = table.numeric_values(name).ok()?;
            let count = values.len();
            let (mean, std) = Self::mean_std(&values);

            let mut sorted = values;
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            Some(ColumnSummary {
                name: name.to_string(),
                count,
                nulls: total - count,
                detail: SummaryDetail::Numeric {
                    mean,
                    std,
                    min: sorted.first().copied().unwrap_or(f64::NAN),
                    q25: Self::percentile(&sorted, 25.0),
                    median: Self::percentile(&sorted, 50.0),
                    q75: Self::percentile(&sorted, 75.0),
                    max: sorted.last().copied().unwrap_or(f64::NAN),
                },
            })
        } else {
            let values: Vec<String> = table
                .string_values_opt(name)
                .ok()?
                .into_iter()
                .flatten()
                .collect();
            let count = values.len();

            let mut freq: std::collections::BTreeMap<&str, usize> =
                std::collections::BTreeMap::new();
            for v in &values {
                *freq.entry(v.as_str()).or_default() += 1;
            }
            let unique = freq.len();
            let (top, top_freq) = freq
                .iter()
                .max_by_key(|(_, &c)| c)
                .map(|(k, &c)| (k.to_string(), c))
                .unwrap_or_default();

            Some(ColumnSummary {
                name: name.to_string(),
                count,
                nulls: total - count,
                detail: SummaryDetail::Categorical {
                    unique,
                    top,
                    freq: top_freq,
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample_table() -> WeatherTable {
        let date = Column::new("date".into(), &[15340i32, 15341, 15342, 15343, 15344])
            .cast(&DataType::Date)
            .unwrap();
        let precipitation = Column::new("precipitation".into(), &[0.0f64, 10.9, 0.8, 20.3, 1.3]);
        let weather = Column::new(
            "weather".into(),
            &["drizzle", "rain", "rain", "rain", "sun"],
        );
        let df = DataFrame::new(vec![date, precipitation, weather]).unwrap();
        WeatherTable::from_dataframe(df).unwrap()
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(StatsCalculator::percentile(&sorted, 50.0), 3.0);
        assert_eq!(StatsCalculator::percentile(&sorted, 25.0), 2.0);
        assert_eq!(StatsCalculator::percentile(&sorted, 0.0), 1.0);
        assert_eq!(StatsCalculator::percentile(&sorted, 100.0), 5.0);
    }

    #[test]
    fn five_number_summary_on_known_data() {
        let values: Vec<f64> = (1..=9).map(|v| v as f64).collect();
        let summary = StatsCalculator::five_number_summary(&values).unwrap();
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.q1, 3.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 9.0);
    }

    #[test]
    fn histogram_counts_sum_to_sample_size() {
        let values: Vec<f64> = (0..100).map(|v| (v as f64).sin() * 10.0).collect();
        let bins = StatsCalculator::histogram(&values);
        assert!(!bins.is_empty());
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
    }

    #[test]
    fn histogram_degenerate_single_value() {
        let bins = StatsCalculator::histogram(&[3.0, 3.0, 3.0]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn kde_integrates_to_one() {
        let values: Vec<f64> = (0..200).map(|v| (v % 17) as f64 + (v % 5) as f64 * 0.3).collect();
        let curve = StatsCalculator::kde_curve(&values, 1.0);
        assert!(!curve.is_empty());

        // Trapezoidal rule over the density.
        let area: f64 = curve
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]) * (w[0][1] + w[1][1]) / 2.0)
            .sum();
        assert!((area - 1.0).abs() < 0.05, "area was {area}");
    }

    #[test]
    fn summarize_covers_numeric_and_categorical() {
        let table = sample_table();
        let mut summaries = StatsCalculator::summarize_table(&table);
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(summaries.len(), 2);

        let precip = &summaries[0];
        assert_eq!(precip.name, "precipitation");
        assert_eq!(precip.count, 5);
        assert_eq!(precip.nulls, 0);
        match &precip.detail {
            SummaryDetail::Numeric { mean, min, max, .. } => {
                assert!((mean - 6.66).abs() < 1e-9);
                assert_eq!(*min, 0.0);
                assert_eq!(*max, 20.3);
            }
            _ => panic!("precipitation should be numeric"),
        }

        let weather = &summaries[1];
        assert_eq!(weather.name, "weather");
        match &weather.detail {
            SummaryDetail::Categorical { unique, top, freq } => {
                assert_eq!(*unique, 3);
                assert_eq!(top, "rain");
                assert_eq!(*freq, 3);
            }
            _ => panic!("weather should be categorical"),
        }
    }
}
