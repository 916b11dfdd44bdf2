//! Weather CSV Loader Module
//! Loads the weather CSV into an immutable table using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column that anchors the line chart's x-axis.
pub const DATE_COLUMN: &str = "date";
/// Fixed categorical column used for bar grouping and scatter coloring.
pub const GROUP_COLUMN: &str = "weather";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
    #[error("Column 'date' could not be parsed as a calendar date")]
    DateNotParseable,
}

/// Immutable, column-oriented weather dataset.
///
/// Built once from a CSV (or directly from a `DataFrame`) and never mutated.
/// Column names are classified at construction time so the option panel can
/// filter selector candidates without touching the frame again.
pub struct WeatherTable {
    df: DataFrame,
    file_path: Option<PathBuf>,
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
}

impl WeatherTable {
    /// Load a weather CSV using Polars.
    ///
    /// The `date` column is coerced to a Date dtype during the scan; if it
    /// does not come out as a date (missing or malformed values) the load
    /// fails. Loading the same file twice yields identical content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_try_parse_dates(true)
            .finish()?
            .collect()?;

        let mut table = Self::from_dataframe(df)?;
        table.file_path = Some(path.to_path_buf());
        Ok(table)
    }

    /// Wrap an already-built DataFrame, validating the required columns.
    pub fn from_dataframe(df: DataFrame) -> Result<Self, LoaderError> {
        let date_col = df
            .column(DATE_COLUMN)
            .map_err(|_| LoaderError::MissingColumn(DATE_COLUMN.to_string()))?;
        if !matches!(date_col.dtype(), DataType::Date | DataType::Datetime(_, _)) {
            return Err(LoaderError::DateNotParseable);
        }
        if df.column(GROUP_COLUMN).is_err() {
            return Err(LoaderError::MissingColumn(GROUP_COLUMN.to_string()));
        }

        let numeric_columns = df
            .get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect();

        let categorical_columns = df
            .get_columns()
            .iter()
            .filter(|col| matches!(col.dtype(), DataType::String | DataType::Categorical(_, _)))
            .map(|col| col.name().to_string())
            .collect();

        Ok(Self {
            df,
            file_path: None,
            numeric_columns,
            categorical_columns,
        })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// All column names, in frame order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == column)
    }

    pub fn is_categorical(&self, column: &str) -> bool {
        self.categorical_columns.iter().any(|c| c == column)
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Values of a numeric column cast to f64, row-aligned.
    /// Nulls and NaNs come back as `None`.
    pub fn numeric_values_opt(&self, column: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let col = self.df.column(column)?;
        let as_f64 = col.cast(&DataType::Float64)?;
        let ca = as_f64.f64()?;
        Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
    }

    /// Non-null values of a numeric column cast to f64.
    pub fn numeric_values(&self, column: &str) -> Result<Vec<f64>, LoaderError> {
        Ok(self
            .numeric_values_opt(column)?
            .into_iter()
            .flatten()
            .collect())
    }

    /// String rendition of a column's values, row-aligned; nulls as `None`.
    pub fn string_values_opt(&self, column: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let series = self.df.column(column)?.as_materialized_series().clone();
        Ok((0..series.len())
            .map(|i| {
                let val = series.get(i).ok()?;
                if val.is_null() {
                    None
                } else {
                    Some(val.to_string().trim_matches('"').to_string())
                }
            })
            .collect())
    }

    /// The `date` column as days since the Unix epoch, row-aligned.
    pub fn date_days_opt(&self) -> Result<Vec<Option<i32>>, LoaderError> {
        let col = self.df.column(DATE_COLUMN)?;
        let as_i32 = col.cast(&DataType::Date)?.cast(&DataType::Int32)?;
        let ca = as_i32.i32()?;
        Ok(ca.into_iter().collect())
    }

    /// Distinct non-null values of a column, sorted.
    pub fn unique_values(&self, column: &str) -> Result<Vec<String>, LoaderError> {
        let mut values: Vec<String> = self
            .string_values_opt(column)?
            .into_iter()
            .flatten()
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
date,precipitation,temp_max,temp_min,wind,weather
2012-01-01,0.0,12.8,5.0,4.7,drizzle
2012-01-02,10.9,10.6,2.8,4.5,rain
2012-01-03,0.8,11.7,7.2,2.3,rain
2012-01-04,20.3,12.2,5.6,4.7,sun
";

    fn write_temp_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_well_formed_csv() {
        let path = write_temp_csv("weatherscope_load.csv", SAMPLE_CSV);
        let table = WeatherTable::load(&path).unwrap();

        assert_eq!(table.row_count(), 4);
        assert_eq!(
            table.dataframe().column("date").unwrap().dtype(),
            &DataType::Date
        );
        assert_eq!(
            table.column_names(),
            vec!["date", "precipitation", "temp_max", "temp_min", "wind", "weather"]
        );

        // Dates keep source order.
        let days: Vec<i32> = table
            .date_days_opt()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(days.len(), 4);
        assert!(days.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn column_classification() {
        let path = write_temp_csv("weatherscope_classify.csv", SAMPLE_CSV);
        let table = WeatherTable::load(&path).unwrap();

        assert_eq!(
            table.numeric_columns(),
            &["precipitation", "temp_max", "temp_min", "wind"]
        );
        assert_eq!(table.categorical_columns(), &["weather"]);
        assert!(table.is_numeric("wind"));
        assert!(table.is_categorical("weather"));
        assert!(!table.is_numeric("weather"));
    }

    #[test]
    fn load_is_idempotent() {
        let path = write_temp_csv("weatherscope_idempotent.csv", SAMPLE_CSV);
        let first = WeatherTable::load(&path).unwrap();
        let second = WeatherTable::load(&path).unwrap();
        assert!(first.dataframe().equals(second.dataframe()));
    }

    #[test]
    fn missing_file_is_fatal() {
        let result = WeatherTable::load("/nonexistent/weatherscope.csv");
        assert!(matches!(result, Err(LoaderError::CsvError(_))));
    }

    #[test]
    fn unparseable_date_is_fatal() {
        let csv = "\
date,precipitation,weather
notadate,0.0,rain
alsonotadate,1.0,sun
";
        let path = write_temp_csv("weatherscope_baddate.csv", csv);
        let result = WeatherTable::load(&path);
        assert!(matches!(result, Err(LoaderError::DateNotParseable)));
    }

    #[test]
    fn missing_weather_column_is_fatal() {
        let csv = "\
date,precipitation
2012-01-01,0.0
";
        let path = write_temp_csv("weatherscope_noweather.csv", csv);
        let result = WeatherTable::load(&path);
        assert!(matches!(result, Err(LoaderError::MissingColumn(c)) if c == "weather"));
    }

    #[test]
    fn unique_values_sorted_distinct() {
        let path = write_temp_csv("weatherscope_unique.csv", SAMPLE_CSV);
        let table = WeatherTable::load(&path).unwrap();
        assert_eq!(
            table.unique_values("weather").unwrap(),
            vec!["drizzle", "rain", "sun"]
        );
    }
}
