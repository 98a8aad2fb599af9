#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod config;
pub mod controller;
pub mod model;
pub mod view;

pub use app::{run, GraficosApp, WINDOW_NAME};
pub use config::Config;
pub use controller::{Controller, ControllerEvents};
pub use model::{DataModel, Model, ModelError, ModelState};
pub use view::{ChartParameters, EguiView, UserView, ViewEvents};
