use app_core::string_error::ErrorStringExt;
use std::{io::Read, path::PathBuf};

const CONFIG_FILE_NAME: &str = ".graficos";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Extension (without dot) an imported file must have.
    pub required_extension: String,
    /// Files larger than this are rejected before parsing.
    pub max_file_size: u64,
    /// Columns every imported CSV must contain. The first two double as the
    /// default x and y column.
    pub required_columns: Vec<String>,
    pub default_title: String,
    pub figure_width: u32,
    pub figure_height: u32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            required_extension: "csv".to_string(),
            max_file_size: 10 * 1024 * 1024,
            required_columns: vec!["Categoria".to_string(), "Valor".to_string()],
            default_title: "Gráfico".to_string(),
            figure_width: 1200,
            figure_height: 700,
            window_width: 500.0,
            window_height: 300.0,
        }
    }
}

impl Config {
    /// Reads `~/.graficos` on top of the defaults.
    pub fn from_config_file() -> Result<Self, String> {
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(PathBuf::from(CONFIG_FILE_NAME));
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        Ok(Self::from_config_str(&config_raw))
    }

    /// Parses `key=value` lines. Unknown keys are skipped, values that do not
    /// parse keep their default.
    pub fn from_config_str(config_raw: &str) -> Self {
        let mut config = Self::default();
        for line in config_raw.lines().map(str::trim) {
            // Lines starting with "#" are considered comments.
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                log::warn!("ignoring config line without '=': {line}");
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            match key {
                "required_extension" => {
                    config.required_extension = val.trim_start_matches('.').to_string();
                }
                "max_file_size" => match val.parse::<u64>() {
                    Ok(size) => config.max_file_size = size,
                    Err(_) => log::warn!("could not parse 'max_file_size' as number"),
                },
                "required_columns" => {
                    let columns: Vec<String> = val
                        .split(',')
                        .map(|col| col.trim().to_string())
                        .filter(|col| !col.is_empty())
                        .collect();
                    if columns.len() >= 2 {
                        config.required_columns = columns;
                    } else {
                        log::warn!("'required_columns' needs at least two column names");
                    }
                }
                "default_title" => config.default_title = val.to_string(),
                "figure_width" => match val.parse::<u32>() {
                    Ok(width) if width > 0 => config.figure_width = width,
                    _ => log::warn!("could not parse 'figure_width' as number"),
                },
                "figure_height" => match val.parse::<u32>() {
                    Ok(height) if height > 0 => config.figure_height = height,
                    _ => log::warn!("could not parse 'figure_height' as number"),
                },
                "window_width" => match val.parse::<f32>() {
                    Ok(width) => config.window_width = width,
                    Err(_) => log::warn!("could not parse 'window_width' as number"),
                },
                "window_height" => match val.parse::<f32>() {
                    Ok(height) => config.window_height = height,
                    Err(_) => log::warn!("could not parse 'window_height' as number"),
                },
                _ => continue,
            }
        }
        config
    }

    /// Column plotted on the x axis when the user picked none.
    pub fn default_x_column(&self) -> Option<&str> {
        self.required_columns.first().map(String::as_str)
    }

    /// Column plotted on the y axis when the user picked none.
    pub fn default_y_column(&self) -> Option<&str> {
        self.required_columns.get(1).map(String::as_str)
    }
}
