//! Control Panel Widget
//! Left side panel with the display toggles and chart selectors.

use egui::{Color32, ComboBox, RichText};

use crate::charts::ChartKind;
use crate::data::WeatherTable;

const ABOUT_TEXT: &str = "The dataset contains weather data from Seattle, including attributes \
such as date, precipitation, max and min temperatures, wind, and weather type. Explore it \
through the different chart types.";

/// Current sidebar selection.
#[derive(Clone, PartialEq)]
pub struct ViewSelection {
    pub show_raw_table: bool,
    pub show_summary: bool,
    pub chart_kind: ChartKind,
    /// Primary column (X column for the scatter plot).
    pub column: String,
    /// Y column, only meaningful for the scatter plot.
    pub second_column: String,
}

impl Default for ViewSelection {
    fn default() -> Self {
        Self {
            show_raw_table: false,
            show_summary: false,
            chart_kind: ChartKind::Distribution,
            column: String::new(),
            second_column: String::new(),
        }
    }
}

/// Actions triggered by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    /// Chart kind or a column choice changed; the chart must be rebuilt.
    SelectionChanged,
    OpenCsv,
}

/// Left side control panel.
pub struct ControlPanel {
    pub selection: ViewSelection,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: ViewSelection::default(),
            status: String::new(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Reset column choices that fell outside the current candidate set,
    /// e.g. after switching chart kind or loading a different file.
    pub fn ensure_valid_selection(&mut self, table: &WeatherTable) {
        let candidates = self.selection.chart_kind.column_candidates(table);
        if !candidates.iter().any(|c| *c == self.selection.column) {
            self.selection.column = candidates.first().cloned().unwrap_or_default();
        }
        if self.selection.chart_kind.needs_second_column()
            && !candidates.iter().any(|c| *c == self.selection.second_column)
        {
            self.selection.second_column = candidates.first().cloned().unwrap_or_default();
        }
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui, table: &WeatherTable) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌦 WeatherScope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Seattle Weather Data Visualization")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let path_text = table
                .file_path()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "(in-memory table)".to_string());
            ui.label(RichText::new(path_text).size(12.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("📂 Open CSV…").clicked() {
                    action = ControlPanelAction::OpenCsv;
                }
            });
        });
        ui.label(
            RichText::new(format!(
                "{} rows, {} columns",
                table.row_count(),
                table.column_names().len()
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Options Section =====
        ui.label(RichText::new("⚙ Options").size(14.0).strong());
        ui.add_space(5.0);

        ui.checkbox(&mut self.selection.show_raw_table, "Show Dataset");
        ui.checkbox(&mut self.selection.show_summary, "Show Data Summary");

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Visualization Section =====
        ui.label(RichText::new("📊 Visualization").size(14.0).strong());
        ui.add_space(5.0);

        let label_width = 80.0;
        let combo_width = 170.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Chart Type:"));
            ComboBox::from_id_salt("chart_kind")
                .width(combo_width)
                .selected_text(self.selection.chart_kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        if ui
                            .selectable_label(self.selection.chart_kind == kind, kind.label())
                            .clicked()
                            && self.selection.chart_kind != kind
                        {
                            self.selection.chart_kind = kind;
                            self.ensure_valid_selection(table);
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        let candidates = self.selection.chart_kind.column_candidates(table);
        let column_label = if self.selection.chart_kind.needs_second_column() {
            "X Column:"
        } else {
            "Column:"
        };

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new(column_label));
            ComboBox::from_id_salt("primary_column")
                .width(combo_width)
                .selected_text(&self.selection.column)
                .show_ui(ui, |ui| {
                    for col in &candidates {
                        if ui
                            .selectable_label(self.selection.column == *col, col)
                            .clicked()
                            && self.selection.column != *col
                        {
                            self.selection.column = col.clone();
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        if self.selection.chart_kind.needs_second_column() {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Y Column:"));
                ComboBox::from_id_salt("second_column")
                    .width(combo_width)
                    .selected_text(&self.selection.second_column)
                    .show_ui(ui, |ui| {
                        for col in &candidates {
                            if ui
                                .selectable_label(self.selection.second_column == *col, col)
                                .clicked()
                                && self.selection.second_column != *col
                            {
                                self.selection.second_column = col.clone();
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
            });
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== About Section =====
        ui.label(RichText::new("About the Dataset").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new(ABOUT_TEXT).size(11.0).color(Color32::GRAY));

        // ===== Status =====
        if !self.status.is_empty() {
            ui.add_space(10.0);
            ui.separator();
            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample_table() -> WeatherTable {
        let date = Column::new("date".into(), &[15340i32, 15341])
            .cast(&DataType::Date)
            .unwrap();
        let precipitation = Column::new("precipitation".into(), &[0.0f64, 10.9]);
        let weather = Column::new("weather".into(), &["drizzle", "rain"]);
        let df = DataFrame::new(vec![date, precipitation, weather]).unwrap();
        WeatherTable::from_dataframe(df).unwrap()
    }

    #[test]
    fn selection_repair_after_kind_switch() {
        let table = sample_table();
        let mut panel = ControlPanel::new();

        panel.selection.chart_kind = ChartKind::Box;
        panel.ensure_valid_selection(&table);
        assert_eq!(panel.selection.column, "precipitation");

        // Switching to pie invalidates the numeric choice.
        panel.selection.chart_kind = ChartKind::Pie;
        panel.ensure_valid_selection(&table);
        assert_eq!(panel.selection.column, "weather");
    }

    #[test]
    fn scatter_gets_both_columns_defaulted() {
        let table = sample_table();
        let mut panel = ControlPanel::new();
        panel.selection.chart_kind = ChartKind::Scatter;
        panel.ensure_valid_selection(&table);
        assert_eq!(panel.selection.column, "precipitation");
        assert_eq!(panel.selection.second_column, "precipitation");
    }
}
