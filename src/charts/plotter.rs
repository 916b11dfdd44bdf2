//! Chart Plotter Module
//! Draws one chart series using egui_plot.

use egui::Color32;
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::charts::series::{ChartSeries, DistributionSeries, PieSlice, ScatterGroup, SeriesData};

/// Color palette for groups and slices.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const CHART_HEIGHT: f32 = 420.0;

/// Days between 0001-01-01 (CE) and 1970-01-01, for chrono conversion.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// Renders chart series with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn palette_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a chart series. Exactly one plot per call.
    pub fn draw(ui: &mut egui::Ui, series: &ChartSeries) {
        match &series.data {
            SeriesData::Distribution(dist) => Self::draw_distribution(ui, series, dist),
            SeriesData::Pie(slices) => Self::draw_pie(ui, series, slices),
            SeriesData::Box(summary) => Self::draw_box(ui, series, summary),
            SeriesData::Line(points) => Self::draw_line(ui, series, points),
            SeriesData::Bar { categories, means } => {
                Self::draw_bar(ui, series, categories, means)
            }
            SeriesData::Scatter(groups) => Self::draw_scatter(ui, series, groups),
        }
    }

    fn draw_distribution(ui: &mut egui::Ui, series: &ChartSeries, dist: &DistributionSeries) {
        match dist {
            DistributionSeries::Numeric { bins, kde } => {
                let bars: Vec<Bar> = bins
                    .iter()
                    .map(|b| {
                        Bar::new(b.center, b.count as f64)
                            .width(b.width * 0.95)
                            .fill(PALETTE[0].gamma_multiply(0.6))
                    })
                    .collect();

                Plot::new("distribution_plot")
                    .height(CHART_HEIGHT)
                    .x_axis_label(&series.x_label)
                    .y_axis_label(&series.y_label)
                    .allow_scroll(false)
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new(bars).name(&series.x_label));
                        if !kde.is_empty() {
                            let curve: PlotPoints = kde.iter().copied().collect();
                            plot_ui.line(
                                Line::new(curve)
                                    .color(PALETTE[1])
                                    .width(2.0)
                                    .name("Density"),
                            );
                        }
                    });
            }
            DistributionSeries::Categorical { counts } => {
                let bars: Vec<Bar> = counts
                    .iter()
                    .enumerate()
                    .map(|(i, (_, count))| {
                        Bar::new(i as f64, *count as f64)
                            .width(0.6)
                            .fill(Self::palette_color(i).gamma_multiply(0.8))
                    })
                    .collect();
                let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();

                Plot::new("distribution_plot")
                    .height(CHART_HEIGHT)
                    .x_axis_label(&series.x_label)
                    .y_axis_label(&series.y_label)
                    .allow_scroll(false)
                    .x_axis_formatter(move |mark, _range| {
                        let idx = mark.value.round() as usize;
                        if mark.value.fract().abs() < 1e-6 && idx < labels.len() {
                            labels[idx].clone()
                        } else {
                            String::new()
                        }
                    })
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new(bars).name(&series.x_label));
                    });
            }
        }
    }

    fn draw_pie(ui: &mut egui::Ui, _series: &ChartSeries, slices: &[PieSlice]) {
        Plot::new("pie_chart")
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_scroll(false)
            .allow_drag(false)
            .allow_zoom(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                // Start at 12 o'clock, go clockwise.
                let mut angle = std::f64::consts::FRAC_PI_2;
                for (i, slice) in slices.iter().enumerate() {
                    let sweep = slice.fraction * std::f64::consts::TAU;
                    let color = Self::palette_color(i);

                    let steps = ((sweep / std::f64::consts::TAU) * 64.0).ceil().max(2.0) as usize;
                    let mut points: Vec<[f64; 2]> = vec![[0.0, 0.0]];
                    for s in 0..=steps {
                        let a = angle - sweep * (s as f64 / steps as f64);
                        points.push([a.cos(), a.sin()]);
                    }

                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from_iter(points.into_iter()))
                            .fill_color(color.gamma_multiply(0.85))
                            .stroke(egui::Stroke::new(1.0, color))
                            .name(&slice.label),
                    );

                    // Percentage label at the slice midpoint, one decimal.
                    let mid = angle - sweep / 2.0;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                            egui::RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                                .size(13.0)
                                .strong(),
                        )
                        .color(Color32::WHITE),
                    );

                    angle -= sweep;
                }
            });
    }

    fn draw_box(
        ui: &mut egui::Ui,
        series: &ChartSeries,
        summary: &crate::stats::FiveNumberSummary,
    ) {
        let elem = BoxElem::new(
            0.0,
            BoxSpread::new(
                summary.whisker_low,
                summary.q1,
                summary.median,
                summary.q3,
                summary.whisker_high,
            ),
        )
        .box_width(0.5)
        .fill(PALETTE[0].gamma_multiply(0.3))
        .stroke(egui::Stroke::new(1.5, PALETTE[0]));

        let x_label = series.x_label.clone();
        Plot::new("box_plot")
            .height(CHART_HEIGHT)
            .x_axis_label(&series.x_label)
            .y_axis_label(&series.y_label)
            .allow_scroll(false)
            .include_x(-1.0)
            .include_x(1.0)
            .x_axis_formatter(move |mark, _range| {
                if mark.value.abs() < 1e-6 {
                    x_label.clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&series.x_label));
            });
    }

    fn draw_line(ui: &mut egui::Ui, series: &ChartSeries, points: &[[f64; 2]]) {
        let plot_points: PlotPoints = points.iter().copied().collect();

        Plot::new("line_chart")
            .height(CHART_HEIGHT)
            .x_axis_label(&series.x_label)
            .y_axis_label(&series.y_label)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| Self::format_epoch_days(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(plot_points)
                        .color(PALETTE[0])
                        .width(1.5)
                        .name(&series.y_label),
                );
            });
    }

    fn draw_bar(ui: &mut egui::Ui, series: &ChartSeries, categories: &[String], means: &[f64]) {
        let bars: Vec<Bar> = means
            .iter()
            .enumerate()
            .map(|(i, &mean)| {
                Bar::new(i as f64, mean)
                    .width(0.6)
                    .fill(Self::palette_color(i).gamma_multiply(0.8))
            })
            .collect();
        let labels = categories.to_vec();

        Plot::new("bar_chart")
            .height(CHART_HEIGHT)
            .x_axis_label(&series.x_label)
            .y_axis_label(&series.y_label)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value.fract().abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&series.y_label));
            });
    }

    fn draw_scatter(ui: &mut egui::Ui, series: &ChartSeries, groups: &[ScatterGroup]) {
        Plot::new("scatter_plot")
            .height(CHART_HEIGHT)
            .x_axis_label(&series.x_label)
            .y_axis_label(&series.y_label)
            .allow_scroll(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, group) in groups.iter().enumerate() {
                    let points: PlotPoints = group.points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(points)
                            .radius(3.0)
                            .color(Self::palette_color(i))
                            .name(&group.label),
                    );
                }
            });
    }

    /// Format an x value holding days since the Unix epoch as a date.
    fn format_epoch_days(value: f64) -> String {
        let days = value.round() as i32;
        chrono::NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_CE_DAYS)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
