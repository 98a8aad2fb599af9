//! Imported data and chart state.
//!
//! The model never calls the view. Every outcome is announced through one of
//! the events in [`ModelEvents`]; the `Result` returned by the operations only
//! carries errors raised by subscribers.

mod chart;
mod dataset;
mod error;
mod export;

use std::{cell::RefCell, path::Path};

use app_core::Event;

pub use chart::{Chart, ChartKind, ChartPoint, ChartSpec};
pub use dataset::{CellValue, ImportedDataset, Row};
pub use error::ModelError;
pub use export::{ChartWriter, ImageFormat, PlottersWriter};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelState {
    #[default]
    Idle,
    Importing,
    Imported,
    ImportFailed,
    Generating,
    Generated,
    GenerationFailed,
    Saving,
    Saved,
    SaveFailed,
}

#[derive(Default)]
pub struct ModelEvents {
    /// The chosen path is not an acceptable file.
    pub file_invalid: Event<String>,
    /// Human readable progress message.
    pub processing_state: Event<String>,
    pub import_completed: Event<()>,
    /// Chart kinds that can be generated from the imported data.
    pub charts_available: Event<Vec<String>>,
    pub chart_generated: Event<()>,
    pub chart_saved: Event<()>,
    pub import_failed: Event<String>,
    pub generation_failed: Event<String>,
    pub save_failed: Event<String>,
    /// Diagnostic text for unexpected failures, meant for the log.
    pub internal_error: Event<String>,
}

pub trait DataModel {
    fn events(&self) -> &ModelEvents;
    fn import_file(&self, path: &Path) -> Result<(), String>;
    /// Header of the last successful import, empty before any import.
    fn get_available_columns(&self) -> Vec<String>;
    fn generate_chart(&self, spec: &ChartSpec) -> Result<(), String>;
    /// Writes the held chart to `path` and releases it, whatever the outcome.
    fn save_chart(&self, path: &Path) -> Result<(), String>;
    fn discard_chart(&self);
    fn current_chart(&self) -> Option<Chart>;
    fn state(&self) -> ModelState;
}

#[derive(Default)]
struct ModelInner {
    dataset: Option<ImportedDataset>,
    chart: Option<Chart>,
    available_charts: Vec<String>,
    state: ModelState,
}

pub struct Model {
    config: Config,
    writer: Box<dyn ChartWriter>,
    events: ModelEvents,
    inner: RefCell<ModelInner>,
}

impl Model {
    pub fn new(config: Config) -> Self {
        let writer = PlottersWriter::new(config.figure_width, config.figure_height);
        Self::with_writer(config, Box::new(writer))
    }

    pub fn with_writer(config: Config, writer: Box<dyn ChartWriter>) -> Self {
        Self {
            config,
            writer,
            events: ModelEvents::default(),
            inner: RefCell::new(ModelInner::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Chart kinds recorded by the last successful import.
    pub fn available_charts(&self) -> Vec<String> {
        self.inner.borrow().available_charts.clone()
    }

    fn set_state(&self, state: ModelState) {
        log::debug!("model state: {:?}", state);
        self.inner.borrow_mut().state = state;
    }

    fn check_file(&self, path: &Path) -> Result<(), ModelError> {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.config.required_extension));
        if !has_extension {
            return Err(ModelError::WrongExtension {
                path: path.to_path_buf(),
                expected: self.config.required_extension.clone(),
            });
        }
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModelError::FileNotFound(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };
        if metadata.len() > self.config.max_file_size {
            return Err(ModelError::FileTooLarge {
                size: metadata.len(),
                max: self.config.max_file_size,
            });
        }
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ImportedDataset, ModelError> {
        self.check_file(path)?;
        let dataset = ImportedDataset::from_path(path)?;
        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        let missing = dataset.missing_columns(&self.config.required_columns);
        if !missing.is_empty() {
            return Err(ModelError::MissingColumns(missing));
        }
        Ok(dataset)
    }

    /// Expected problems go to `failed` only. Unexpected ones are reported on
    /// the internal error channel first, with `summary` as the user message.
    fn report_failure(
        &self,
        failed: &Event<String>,
        summary: &str,
        err: ModelError,
    ) -> Result<(), String> {
        if err.is_validation() {
            log::warn!("{summary}: {err}");
            return failed.publish(&format!("{summary}: {err}"));
        }
        log::error!("{summary}: {err:?}");
        self.events.internal_error.publish(&format!("{summary}: {err:?}"))?;
        failed.publish(&format!("{summary}: {err}"))
    }
}

impl DataModel for Model {
    fn events(&self) -> &ModelEvents {
        &self.events
    }

    fn import_file(&self, path: &Path) -> Result<(), String> {
        log::info!("importing {:?}", path);
        self.set_state(ModelState::Importing);

        let dataset = match self.load(path) {
            Ok(dataset) => dataset,
            Err(err) => {
                self.set_state(ModelState::ImportFailed);
                if err.is_invalid_file() {
                    log::warn!("rejected {:?}: {err}", path);
                    return self.events.file_invalid.publish(&err.to_string());
                }
                return self.report_failure(
                    &self.events.import_failed,
                    "Não foi possível importar o ficheiro",
                    err,
                );
            }
        };

        let rows = dataset.len();
        let kinds = ChartKind::catalog();
        {
            let mut inner = self.inner.borrow_mut();
            inner.dataset = Some(dataset);
            inner.available_charts = kinds.clone();
            inner.state = ModelState::Imported;
        }
        log::info!("imported {rows} rows from {:?}", path);

        self.events.charts_available.publish(&kinds)?;
        self.events.import_completed.publish(&())?;
        self.events
            .processing_state
            .publish(&format!("Ficheiro importado com {rows} linhas."))
    }

    fn get_available_columns(&self) -> Vec<String> {
        self.inner
            .borrow()
            .dataset
            .as_ref()
            .map(|dataset| dataset.columns().to_vec())
            .unwrap_or_default()
    }

    fn generate_chart(&self, spec: &ChartSpec) -> Result<(), String> {
        log::debug!("generating chart from {:?}", spec);
        self.set_state(ModelState::Generating);

        let built = {
            let inner = self.inner.borrow();
            match inner.dataset.as_ref() {
                None => Err(ModelError::NoDataset),
                Some(dataset) => spec
                    .kind
                    .parse::<ChartKind>()
                    .and_then(|kind| Chart::build(dataset, spec, kind, &self.config)),
            }
        };

        match built {
            Ok(chart) => {
                {
                    let mut inner = self.inner.borrow_mut();
                    if inner.chart.replace(chart).is_some() {
                        log::debug!("discarded unsaved chart");
                    }
                    inner.state = ModelState::Generated;
                }
                self.events.chart_generated.publish(&())?;
                self.events
                    .processing_state
                    .publish(&"Gráfico pronto para visualização.".to_string())
            }
            Err(err) => {
                {
                    let mut inner = self.inner.borrow_mut();
                    // A failed request never leaves an older chart to be saved.
                    if inner.chart.take().is_some() {
                        log::debug!("discarded previous chart");
                    }
                    inner.state = ModelState::GenerationFailed;
                }
                self.report_failure(
                    &self.events.generation_failed,
                    "Não foi possível gerar o gráfico",
                    err,
                )
            }
        }
    }

    fn save_chart(&self, path: &Path) -> Result<(), String> {
        log::debug!("saving chart to {:?}", path);
        // Taken here, so the chart is released on every path below.
        let chart = self.inner.borrow_mut().chart.take();
        let Some(chart) = chart else {
            self.set_state(ModelState::SaveFailed);
            return self.report_failure(
                &self.events.save_failed,
                "Não foi possível guardar o gráfico",
                ModelError::NoChart,
            );
        };
        self.set_state(ModelState::Saving);

        let saved = ImageFormat::resolve(path).and_then(|(path, format)| {
            self.writer
                .write(&chart, &path, format)
                .map_err(ModelError::Render)?;
            Ok(path)
        });
        drop(chart);

        match saved {
            Ok(path) => {
                self.set_state(ModelState::Saved);
                log::info!("chart saved to {:?}", path);
                self.events.chart_saved.publish(&())?;
                self.events
                    .processing_state
                    .publish(&format!("Gráfico guardado em {}.", path.display()))
            }
            Err(err) => {
                self.set_state(ModelState::SaveFailed);
                self.report_failure(
                    &self.events.save_failed,
                    "Não foi possível guardar o gráfico",
                    err,
                )
            }
        }
    }

    fn discard_chart(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.chart.take().is_some() {
            log::debug!("chart discarded");
        }
        inner.state = if inner.dataset.is_some() {
            ModelState::Imported
        } else {
            ModelState::Idle
        };
    }

    fn current_chart(&self) -> Option<Chart> {
        self.inner.borrow().chart.clone()
    }

    fn state(&self) -> ModelState {
        self.inner.borrow().state
    }
}
