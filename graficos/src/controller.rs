//! Connects a [`UserView`] to a [`DataModel`].
//!
//! The controller holds no application state of its own apart from the chart
//! kind the user picked last. All reactions are subscriptions made in
//! [`Controller::new`]; the subscribed closures only keep weak references,
//! so dropping the controller detaches them.

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use app_core::{handler, Event, Logger};

use crate::model::{ChartSpec, DataModel};
use crate::view::{ChartParameters, UserView};

const GENERATION_ERROR_TITLE: &str = "Erro ao gerar o gráfico";
const SAVE_ERROR_TITLE: &str = "Erro ao guardar o gráfico";

/// Requests the controller routes to the view or the model.
#[derive(Default)]
pub struct ControllerEvents {
    pub show_open_dialog: Event<()>,
    pub import_file: Event<PathBuf>,
    pub show_save_dialog: Event<()>,
    pub save_chart: Event<PathBuf>,
}

struct Wiring<V, M> {
    view: Rc<V>,
    model: Rc<M>,
    logger: Rc<dyn Logger>,
    events: ControllerEvents,
    chart_kind: RefCell<Option<String>>,
}

pub struct Controller<V, M> {
    wiring: Rc<Wiring<V, M>>,
}

/// Subscribes `reaction` to `event`. The reaction runs only while the
/// controller is alive.
fn on<V, M, A, F>(wiring: &Rc<Wiring<V, M>>, event: &Event<A>, reaction: F)
where
    V: 'static,
    M: 'static,
    A: 'static,
    F: Fn(&Wiring<V, M>, &A) -> Result<(), String> + 'static,
{
    let weak = Rc::downgrade(wiring);
    event.subscribe(&handler(move |args: &A| match weak.upgrade() {
        Some(wiring) => reaction(&wiring, args),
        None => {
            log::debug!("controller is gone, event ignored");
            Ok(())
        }
    }));
}

impl<V, M> Controller<V, M>
where
    V: UserView + 'static,
    M: DataModel + 'static,
{
    pub fn new(view: Rc<V>, model: Rc<M>, logger: Rc<dyn Logger>) -> Self {
        let wiring = Rc::new(Wiring {
            view,
            model,
            logger,
            events: ControllerEvents::default(),
            chart_kind: RefCell::new(None),
        });
        Self::connect_controller_events(&wiring);
        Self::connect_view_events(&wiring);
        Self::connect_model_events(&wiring);
        log::debug!("controller wired");
        Self { wiring }
    }

    pub fn events(&self) -> &ControllerEvents {
        &self.wiring.events
    }

    /// The chart kind picked last, if any.
    pub fn chart_kind(&self) -> Option<String> {
        self.wiring.chart_kind.borrow().clone()
    }

    fn connect_controller_events(wiring: &Rc<Wiring<V, M>>) {
        let events = &wiring.events;
        on(wiring, &events.show_open_dialog, |w, _| w.view.show_open_dialog());
        on(wiring, &events.import_file, |w, path| w.model.import_file(path));
        on(wiring, &events.show_save_dialog, |w, _| w.view.show_save_dialog());
        on(wiring, &events.save_chart, |w, path| w.model.save_chart(path));
    }

    fn connect_view_events(wiring: &Rc<Wiring<V, M>>) {
        let events = wiring.view.events();
        on(wiring, &events.import_clicked, |w, _| {
            w.events.show_open_dialog.publish(&())
        });
        on(wiring, &events.file_selected, |w, path| {
            w.events.import_file.publish(path)
        });
        on(wiring, &events.chart_type_selected, |w, kind| {
            log::debug!("chart kind selected: {kind}");
            *w.chart_kind.borrow_mut() = Some(kind.clone());
            w.view.show_parameter_form(w.model.get_available_columns());
            Ok(())
        });
        on(wiring, &events.parameters_submitted, |w, params| {
            let kind = w.chart_kind.borrow().clone();
            let Some(kind) = kind else {
                w.view
                    .show_error(GENERATION_ERROR_TITLE, "Nenhum tipo de gráfico selecionado.");
                return Ok(());
            };
            w.model.generate_chart(&chart_spec(kind, params))
        });
        on(wiring, &events.save_requested, |w, _| {
            w.events.show_save_dialog.publish(&())
        });
        on(wiring, &events.save_path_chosen, |w, path| {
            w.events.save_chart.publish(path)
        });
        on(wiring, &events.home_clicked, |w, _| {
            w.model.discard_chart();
            *w.chart_kind.borrow_mut() = None;
            w.view.return_to_initial_screen();
            Ok(())
        });
    }

    fn connect_model_events(wiring: &Rc<Wiring<V, M>>) {
        let events = wiring.model.events();
        on(wiring, &events.file_invalid, |w, msg| {
            w.view.show_file_error(msg);
            Ok(())
        });
        on(wiring, &events.import_failed, |w, msg| {
            w.view.show_import_error(msg);
            Ok(())
        });
        on(wiring, &events.processing_state, |w, msg| {
            w.view.show_info(msg);
            Ok(())
        });
        on(wiring, &events.charts_available, |w, kinds| {
            w.view.update_chart_list(kinds.clone());
            Ok(())
        });
        on(wiring, &events.import_completed, |w, _| {
            w.logger.log_info("import completed");
            Ok(())
        });
        on(wiring, &events.chart_generated, |w, _| {
            match w.model.current_chart() {
                Some(chart) => w.view.show_chart(chart),
                None => w.logger.log_error("chart generated but not held by the model"),
            }
            Ok(())
        });
        on(wiring, &events.generation_failed, |w, msg| {
            w.view.show_error(GENERATION_ERROR_TITLE, msg);
            Ok(())
        });
        on(wiring, &events.chart_saved, |w, _| {
            w.view.show_info("Gráfico guardado com sucesso.");
            w.view.return_to_initial_screen();
            Ok(())
        });
        on(wiring, &events.save_failed, |w, msg| {
            w.view.show_error(SAVE_ERROR_TITLE, msg);
            Ok(())
        });
        on(wiring, &events.internal_error, |w, detail| {
            w.logger.log_error(detail);
            Ok(())
        });
    }
}

fn chart_spec(kind: String, params: &ChartParameters) -> ChartSpec {
    ChartSpec::new(
        kind,
        params.x_column.clone(),
        params.y_column.clone(),
        params.x_label.clone(),
        params.y_label.clone(),
        params.title.clone(),
    )
}
