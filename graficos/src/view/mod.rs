mod egui_view;
pub mod form;

use std::path::PathBuf;

use app_core::Event;

use crate::model::Chart;

pub use egui_view::EguiView;
pub use form::{FormError, LabelMode, ParameterForm};

/// Axis columns, labels and title as submitted by the user. `None` means
/// "not chosen", the model falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartParameters {
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title: Option<String>,
}

/// What the user did.
#[derive(Default)]
pub struct ViewEvents {
    pub import_clicked: Event<()>,
    pub file_selected: Event<PathBuf>,
    pub chart_type_selected: Event<String>,
    pub parameters_submitted: Event<ChartParameters>,
    pub save_requested: Event<()>,
    pub save_path_chosen: Event<PathBuf>,
    pub home_clicked: Event<()>,
}

/// Display operations the controller drives.
///
/// Dialog methods raise `file_selected`/`save_path_chosen` when the user
/// picks a path and do nothing when the dialog is cancelled.
pub trait UserView {
    fn events(&self) -> &ViewEvents;
    fn show_open_dialog(&self) -> Result<(), String>;
    fn show_save_dialog(&self) -> Result<(), String>;
    fn show_parameter_form(&self, columns: Vec<String>);
    fn show_info(&self, message: &str);
    fn show_file_error(&self, message: &str);
    fn show_import_error(&self, message: &str);
    fn show_error(&self, title: &str, message: &str);
    fn update_chart_list(&self, kinds: Vec<String>);
    fn show_chart(&self, chart: Chart);
    fn return_to_initial_screen(&self);
}
