//! Chart Spec Module
//! The closed set of chart kinds and the column arguments each one carries.

use crate::data::WeatherTable;

/// The six selectable chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Distribution,
    Pie,
    Box,
    Line,
    Bar,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Distribution,
        ChartKind::Pie,
        ChartKind::Box,
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
    ];

    /// Label shown in the chart-type dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Distribution => "Distribution Plot",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Box => "Box Plot",
            ChartKind::Line => "Line Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Scatter => "Scatter Plot",
        }
    }

    /// Scatter needs an X and a Y column; everything else needs one.
    pub fn needs_second_column(&self) -> bool {
        matches!(self, ChartKind::Scatter)
    }

    /// Candidate columns for this kind's selector(s).
    ///
    /// Incompatible column/chart pairs are rejected here, at selection time:
    /// pie charts only accept categorical columns, numeric-aggregating
    /// charts only accept numeric ones, and the distribution plot takes
    /// either.
    pub fn column_candidates(&self, table: &WeatherTable) -> Vec<String> {
        match self {
            ChartKind::Distribution => {
                let mut cols = table.numeric_columns().to_vec();
                cols.extend(table.categorical_columns().iter().cloned());
                cols
            }
            ChartKind::Pie => table.categorical_columns().to_vec(),
            ChartKind::Box | ChartKind::Line | ChartKind::Bar | ChartKind::Scatter => {
                table.numeric_columns().to_vec()
            }
        }
    }
}

/// A chart kind together with its selected column argument(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSpec {
    Distribution { column: String },
    Pie { column: String },
    Box { column: String },
    Line { column: String },
    Bar { column: String },
    Scatter { x_column: String, y_column: String },
}

impl ChartSpec {
    /// Build the spec for the current panel selection. `second` is only
    /// consulted for the scatter plot's Y axis.
    pub fn from_selection(kind: ChartKind, column: &str, second: &str) -> Self {
        match kind {
            ChartKind::Distribution => ChartSpec::Distribution {
                column: column.to_string(),
            },
            ChartKind::Pie => ChartSpec::Pie {
                column: column.to_string(),
            },
            ChartKind::Box => ChartSpec::Box {
                column: column.to_string(),
            },
            ChartKind::Line => ChartSpec::Line {
                column: column.to_string(),
            },
            ChartKind::Bar => ChartSpec::Bar {
                column: column.to_string(),
            },
            ChartKind::Scatter => ChartSpec::Scatter {
                x_column: column.to_string(),
                y_column: second.to_string(),
            },
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Distribution { .. } => ChartKind::Distribution,
            ChartSpec::Pie { .. } => ChartKind::Pie,
            ChartSpec::Box { .. } => ChartKind::Box,
            ChartSpec::Line { .. } => ChartKind::Line,
            ChartSpec::Bar { .. } => ChartKind::Bar,
            ChartSpec::Scatter { .. } => ChartKind::Scatter,
        }
    }

    /// Chart title derived from the column name(s).
    pub fn title(&self) -> String {
        match self {
            ChartSpec::Distribution { column } => format!("Distribution of {column}"),
            ChartSpec::Pie { column } => format!("Pie Chart of {column}"),
            ChartSpec::Box { column } => format!("Box Plot of {column}"),
            ChartSpec::Line { column } => format!("Line Chart of {column} Over Time"),
            ChartSpec::Bar { column } => format!("Bar Chart of {column} by Weather"),
            ChartSpec::Scatter { x_column, y_column } => {
                format!("Scatter Plot of {x_column} vs {y_column}")
            }
        }
    }
}
