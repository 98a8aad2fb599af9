#![warn(clippy::all, rust_2018_idioms)]

use graficos::Config;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::from_config_file() {
        Ok(config) => config,
        Err(error) => {
            log::warn!("{error}, using default configuration");
            Config::default()
        }
    };
    log::debug!("configuration: {:?}", config);

    if let Err(error) = graficos::run(config) {
        log::error!("could not start the user interface: {error}");
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Erro Crítico")
            .set_description(format!("Não foi possível iniciar a aplicação:\n{error}"))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
        return Err(error);
    }
    Ok(())
}
