//! Chart Viewer Widget
//! Central panel showing the optional raw table, the optional summary
//! statistics and the current chart.

use egui::{Color32, RichText, ScrollArea};

use crate::charts::{ChartPlotter, ChartSeries};
use crate::data::WeatherTable;
use crate::gui::control_panel::ViewSelection;
use crate::stats::{ColumnSummary, SummaryDetail};

/// Cap on raw-table rows drawn per frame.
const MAX_RAW_ROWS: usize = 200;

/// Central display area.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        table: &WeatherTable,
        summaries: &[ColumnSummary],
        selection: &ViewSelection,
        chart: Option<&ChartSeries>,
        chart_error: Option<&str>,
    ) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if selection.show_raw_table {
                    Self::draw_raw_table(ui, table);
                    ui.add_space(12.0);
                }

                if selection.show_summary {
                    Self::draw_summary_table(ui, summaries);
                    ui.add_space(12.0);
                }

                if let Some(series) = chart {
                    Self::draw_chart_card(ui, series);
                } else if let Some(error) = chart_error {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(format!("Error: {error}"))
                                .size(16.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    });
                }
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, series: &ChartSeries) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&series.title).size(18.0).strong());
                ui.add_space(8.0);
                ChartPlotter::draw(ui, series);
            });
    }

    fn draw_raw_table(ui: &mut egui::Ui, table: &WeatherTable) {
        let columns = table.column_names();
        let total_rows = table.row_count();
        let shown_rows = total_rows.min(MAX_RAW_ROWS);

        // Render columns once, not per cell.
        let rendered: Vec<Vec<Option<String>>> = columns
            .iter()
            .filter_map(|c| table.string_values_opt(c).ok())
            .collect();

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Dataset").size(14.0).strong());
                ui.add_space(4.0);

                egui::Grid::new("raw_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([10.0, 3.0])
                    .show(ui, |ui| {
                        for col in &columns {
                            ui.label(RichText::new(col).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in 0..shown_rows {
                            for values in &rendered {
                                let text = values
                                    .get(row)
                                    .and_then(|v| v.clone())
                                    .unwrap_or_else(|| "-".to_string());
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });

                if total_rows > shown_rows {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("Showing {shown_rows} of {total_rows} rows"))
                            .size(10.0)
                            .color(Color32::GRAY),
                    );
                }
            });
    }

    fn draw_summary_table(ui: &mut egui::Ui, summaries: &[ColumnSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Data Summary").size(14.0).strong());
                ui.add_space(4.0);

                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Column", "Count", "Nulls", "Mean", "Std", "Min", "25%", "50%",
                            "75%", "Max", "Unique", "Top", "Freq",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for summary in summaries {
                            ui.label(RichText::new(&summary.name).size(11.0));
                            ui.label(RichText::new(summary.count.to_string()).size(11.0));
                            ui.label(RichText::new(summary.nulls.to_string()).size(11.0));

                            match &summary.detail {
                                SummaryDetail::Numeric {
                                    mean,
                                    std,
                                    min,
                                    q25,
                                    median,
                                    q75,
                                    max,
                                } => {
                                    for v in [mean, std, min, q25, median, q75, max] {
                                        ui.label(RichText::new(format!("{v:.3}")).size(11.0));
                                    }
                                    for _ in 0..3 {
                                        ui.label(RichText::new("-").size(11.0));
                                    }
                                }
                                SummaryDetail::Categorical { unique, top, freq } => {
                                    for _ in 0..7 {
                                        ui.label(RichText::new("-").size(11.0));
                                    }
                                    ui.label(RichText::new(unique.to_string()).size(11.0));
                                    ui.label(RichText::new(top).size(11.0));
                                    ui.label(RichText::new(freq.to_string()).size(11.0));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
