mod ui;

use std::cell::RefCell;

use app_core::ActionQueue;

use super::{form::ParameterForm, ChartParameters, UserView, ViewEvents};
use crate::model::Chart;

const SAVE_FILE_NAME: &str = "grafico.png";

#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Home,
    ChartSelection,
    ParameterForm(ParameterForm),
    Chart(Chart),
}

#[derive(Debug, Clone, PartialEq)]
struct Message {
    title: String,
    text: String,
}

/// Widget interactions of one frame, published once the frame is drawn.
#[derive(Debug, Clone, PartialEq)]
enum UserAction {
    Import,
    ChartType(String),
    Submit(ChartParameters),
    Save,
    Home,
}

struct ViewState {
    screen: Screen,
    status: String,
    chart_kinds: Vec<String>,
    message: Option<Message>,
    form_error: Option<String>,
    actions: ActionQueue<UserAction>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            status: "Importe um ficheiro CSV para começar.".to_string(),
            chart_kinds: Vec::new(),
            message: None,
            form_error: None,
            actions: ActionQueue::new(),
        }
    }
}

/// egui implementation of [`UserView`].
#[derive(Default)]
pub struct EguiView {
    events: ViewEvents,
    state: RefCell<ViewState>,
}

impl EguiView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws one frame, then publishes what the user did during it.
    pub fn render(&self, ctx: &egui::Context) {
        self.state.borrow_mut().draw(ctx);
        self.dispatch_actions();
    }

    fn dispatch_actions(&self) {
        let actions = self.state.borrow_mut().actions.take_actions();
        for action in actions {
            log::debug!("user action: {:?}", action);
            let res = match action {
                UserAction::Import => self.events.import_clicked.publish(&()),
                UserAction::ChartType(kind) => self.events.chart_type_selected.publish(&kind),
                UserAction::Submit(params) => self.events.parameters_submitted.publish(&params),
                UserAction::Save => self.events.save_requested.publish(&()),
                UserAction::Home => self.events.home_clicked.publish(&()),
            };
            if let Err(error) = res {
                log::error!("{error}");
                self.show_error("Erro", &error);
            }
        }
    }

    fn set_message(&self, title: &str, text: &str) {
        let mut state = self.state.borrow_mut();
        state.status = text.to_string();
        state.message = Some(Message {
            title: title.to_string(),
            text: text.to_string(),
        });
    }
}

impl UserView for EguiView {
    fn events(&self) -> &ViewEvents {
        &self.events
    }

    fn show_open_dialog(&self) -> Result<(), String> {
        log::debug!("open dialog to select csv file");
        match rfd::FileDialog::new()
            .set_title("Importar ficheiro CSV")
            .add_filter("CSV", &["csv", "CSV"])
            .pick_file()
        {
            Some(path) => self.events.file_selected.publish(&path),
            None => {
                log::debug!("file selection cancelled");
                Ok(())
            }
        }
    }

    fn show_save_dialog(&self) -> Result<(), String> {
        log::debug!("open dialog to select chart path");
        match rfd::FileDialog::new()
            .set_title("Guardar gráfico")
            .set_file_name(SAVE_FILE_NAME)
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("SVG", &["svg"])
            .save_file()
        {
            Some(path) => self.events.save_path_chosen.publish(&path),
            None => {
                log::debug!("save cancelled");
                Ok(())
            }
        }
    }

    fn show_parameter_form(&self, columns: Vec<String>) {
        let mut state = self.state.borrow_mut();
        state.form_error = None;
        state.screen = Screen::ParameterForm(ParameterForm::new(columns));
    }

    fn show_info(&self, message: &str) {
        self.state.borrow_mut().status = message.to_string();
    }

    fn show_file_error(&self, message: &str) {
        self.set_message("Ficheiro inválido", message);
    }

    fn show_import_error(&self, message: &str) {
        self.set_message("Erro na importação", message);
    }

    fn show_error(&self, title: &str, message: &str) {
        self.set_message(title, message);
    }

    fn update_chart_list(&self, kinds: Vec<String>) {
        let mut state = self.state.borrow_mut();
        state.chart_kinds = kinds;
        state.screen = Screen::ChartSelection;
    }

    fn show_chart(&self, chart: Chart) {
        self.state.borrow_mut().screen = Screen::Chart(chart);
    }

    fn return_to_initial_screen(&self) {
        let mut state = self.state.borrow_mut();
        state.screen = Screen::Home;
        state.chart_kinds.clear();
        state.form_error = None;
        // Clicks on the screen being left are stale.
        state.actions.discard_actions();
    }
}
