use app_core::ActionQueue;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};

use super::{Message, Screen, UserAction, ViewState};
use crate::model::{Chart, ChartKind};
use crate::view::form::{LabelMode, ParameterForm};

const SERIES_COLOR: egui::Color32 = egui::Color32::from_rgb(70, 130, 180);

impl ViewState {
    pub(super) fn draw(&mut self, ctx: &egui::Context) {
        let ViewState {
            screen,
            status,
            chart_kinds,
            message,
            form_error,
            actions,
        } = self;

        // Keyboard shortcuts.
        ctx.input(|i| {
            if i.modifiers.command && i.key_pressed(egui::Key::O) && *screen == Screen::Home {
                actions.queue_action(UserAction::Import);
            }
            if i.modifiers.command
                && i.key_pressed(egui::Key::S)
                && matches!(screen, Screen::Chart(_))
            {
                actions.queue_action(UserAction::Save);
            }
        });

        render_message(message, ctx);

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.label(status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| match screen {
            Screen::Home => home(ui, actions),
            Screen::ChartSelection => chart_selection(ui, chart_kinds, actions),
            Screen::ParameterForm(form) => parameter_form(ui, form, form_error, actions),
            Screen::Chart(chart) => chart_screen(ui, chart, actions),
        });
    }
}

fn home(ui: &mut egui::Ui, actions: &mut ActionQueue<UserAction>) {
    ui.vertical_centered(|ui| {
        ui.heading("Gráficos a partir de ficheiros CSV");
        ui.add_space(12.0);
        if ui
            .button("Importar ficheiro CSV")
            .on_hover_text("CTRL + O")
            .clicked()
        {
            actions.queue_action(UserAction::Import);
        }
    });
}

fn home_button(ui: &mut egui::Ui, actions: &mut ActionQueue<UserAction>) {
    if ui.button("⏴ Início").clicked() {
        actions.queue_action(UserAction::Home);
    }
}

fn chart_selection(
    ui: &mut egui::Ui,
    chart_kinds: &[String],
    actions: &mut ActionQueue<UserAction>,
) {
    home_button(ui, actions);
    ui.separator();
    ui.label("Escolha o tipo de gráfico:");
    ui.horizontal(|ui| {
        for kind in chart_kinds {
            if ui.button(kind).clicked() {
                actions.queue_action(UserAction::ChartType(kind.clone()));
            }
        }
    });
}

fn column_combo(ui: &mut egui::Ui, label: &str, selected: &mut String, columns: &[String]) {
    egui::ComboBox::from_label(label)
        .selected_text(selected.as_str())
        .show_ui(ui, |ui| {
            for col in columns {
                ui.selectable_value(selected, col.clone(), col);
            }
        });
}

fn parameter_form(
    ui: &mut egui::Ui,
    form: &mut ParameterForm,
    form_error: &mut Option<String>,
    actions: &mut ActionQueue<UserAction>,
) {
    home_button(ui, actions);
    ui.separator();

    ui.radio_value(
        &mut form.mode,
        LabelMode::ColumnNames,
        "Usar os nomes das colunas nos eixos",
    );
    ui.radio_value(&mut form.mode, LabelMode::Custom, "Nomes personalizados");
    ui.add_space(6.0);

    match form.mode {
        LabelMode::ColumnNames => {
            column_combo(ui, "Eixo X", &mut form.x_column, &form.columns);
            column_combo(ui, "Eixo Y", &mut form.y_column, &form.columns);
        }
        LabelMode::Custom => {
            ui.horizontal(|ui| {
                let lab = ui.label("Eixo X:");
                ui.text_edit_singleline(&mut form.x_label).labelled_by(lab.id);
            });
            ui.horizontal(|ui| {
                let lab = ui.label("Eixo Y:");
                ui.text_edit_singleline(&mut form.y_label).labelled_by(lab.id);
            });
        }
    }
    ui.horizontal(|ui| {
        let lab = ui.label("Título (opcional):");
        ui.text_edit_singleline(&mut form.title).labelled_by(lab.id);
    });

    if let Some(error) = form_error.as_deref() {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }

    if ui.button("Gerar gráfico").clicked() {
        match form.validate() {
            Ok(params) => {
                *form_error = None;
                actions.queue_action(UserAction::Submit(params));
            }
            Err(error) => {
                log::debug!("form rejected: {error}");
                *form_error = Some(error.to_string());
            }
        }
    }
}

fn chart_screen(ui: &mut egui::Ui, chart: &Chart, actions: &mut ActionQueue<UserAction>) {
    ui.horizontal(|ui| {
        home_button(ui, actions);
        if ui
            .button("Guardar Gráfico")
            .on_hover_text("CTRL + S")
            .clicked()
        {
            actions.queue_action(UserAction::Save);
        }
    });
    ui.separator();
    ui.vertical_centered(|ui| {
        ui.heading(&chart.title);
    });

    let mut plot = Plot::new("chart")
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .legend(Legend::default());
    if chart.uses_categories() {
        let ticks = chart.clone();
        plot = plot
            .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(move |mark, _range| {
                ticks.category_at(mark.value).unwrap_or_default().to_string()
            });
    }

    let coordinates = chart.coordinates();
    plot.show(ui, |plot_ui| match chart.kind {
        ChartKind::Bars => {
            let bars = coordinates
                .iter()
                .zip(chart.points.iter())
                .map(|(&(x, y), point)| Bar::new(x, y).name(&point.category))
                .collect();
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .width(0.8)
                    .color(SERIES_COLOR)
                    .name(&chart.y_label),
            );
        }
        ChartKind::Lines => {
            let points: Vec<[f64; 2]> = coordinates.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(points.clone())
                    .color(SERIES_COLOR)
                    .name(&chart.y_label),
            );
            plot_ui.points(Points::new(points).color(SERIES_COLOR).radius(3.0));
        }
    });
}

fn render_message(message: &mut Option<Message>, ctx: &egui::Context) {
    let Some(msg) = message.as_ref() else {
        return;
    };
    let mut confirmed = false;
    let response = egui::Modal::new("message_modal".into()).show(ctx, |ui| {
        ui.heading(&msg.title);
        ui.separator();
        ui.label(&msg.text);
        ui.add_space(6.0);
        confirmed = ui.button("OK").clicked();
    });
    if confirmed || response.should_close() {
        *message = None;
    }
}
