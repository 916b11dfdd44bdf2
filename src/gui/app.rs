//! WeatherScope Main Application
//! Main window with control panel and chart viewer.

use egui::SidePanel;

use crate::charts::{ChartSeries, ChartSpec};
use crate::data::WeatherTable;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::{ColumnSummary, StatsCalculator};

/// Main application window.
///
/// Holds the one table loaded for this process. The chart series is
/// rebuilt only when the sidebar selection changes, not every frame.
pub struct WeatherApp {
    table: WeatherTable,
    summaries: Vec<ColumnSummary>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    chart: Option<ChartSeries>,
    chart_error: Option<String>,
}

impl WeatherApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, table: WeatherTable) -> Self {
        let summaries = StatsCalculator::summarize_table(&table);
        let mut app = Self {
            table,
            summaries,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            chart: None,
            chart_error: None,
        };
        app.control_panel.ensure_valid_selection(&app.table);
        app.rebuild_chart();
        app
    }

    /// Rebuild the chart series for the current selection.
    fn rebuild_chart(&mut self) {
        let selection = &self.control_panel.selection;
        let spec = ChartSpec::from_selection(
            selection.chart_kind,
            &selection.column,
            &selection.second_column,
        );

        match ChartSeries::build(&self.table, &spec) {
            Ok(series) => {
                log::debug!("built chart '{}'", series.title);
                self.chart = Some(series);
                self.chart_error = None;
            }
            Err(e) => {
                log::error!("chart build failed: {e}");
                self.chart = None;
                self.chart_error = Some(e.to_string());
            }
        }
    }

    /// Load a different weather CSV picked by the user. A failed load keeps
    /// the current table.
    fn handle_open_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match WeatherTable::load(&path) {
            Ok(table) => {
                log::info!(
                    "loaded {} rows from {}",
                    table.row_count(),
                    path.display()
                );
                self.summaries = StatsCalculator::summarize_table(&table);
                self.table = table;
                self.control_panel.ensure_valid_selection(&self.table);
                self.control_panel.set_status(format!(
                    "Loaded {} rows",
                    self.table.row_count()
                ));
                self.rebuild_chart();
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.control_panel.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for WeatherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = ControlPanelAction::None;

        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self.control_panel.show(ui, &self.table);
                });
            });

        match action {
            ControlPanelAction::SelectionChanged => self.rebuild_chart(),
            ControlPanelAction::OpenCsv => self.handle_open_csv(),
            ControlPanelAction::None => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(
                ui,
                &self.table,
                &self.summaries,
                &self.control_panel.selection,
                self.chart.as_ref(),
                self.chart_error.as_deref(),
            );
        });
    }
}
