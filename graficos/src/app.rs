use std::rc::Rc;

use app_core::ConsoleLogger;

use crate::config::Config;
use crate::controller::Controller;
use crate::model::Model;
use crate::view::EguiView;

pub const WINDOW_NAME: &str = "Gráficos";

pub struct GraficosApp {
    view: Rc<EguiView>,
    // Owns the subscriptions between view and model.
    _controller: Controller<EguiView, Model>,
}

impl GraficosApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let view = Rc::new(EguiView::new());
        let model = Rc::new(Model::new(config));
        let logger = Rc::new(ConsoleLogger::new("graficos"));
        let controller = Controller::new(view.clone(), model, logger);
        Self {
            view,
            _controller: controller,
        }
    }
}

impl eframe::App for GraficosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.view.render(ctx);
    }
}

/// Opens the main window and blocks until it is closed.
pub fn run(config: Config) -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(GraficosApp::new(cc, config)))),
    )
}
