//! GUI module - Application window and widgets

mod app;
mod chart_viewer;
pub mod control_panel;

pub use app::WeatherApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
