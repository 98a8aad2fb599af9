//! State of the chart parameter form and its validation.

use thiserror::Error;

use super::ChartParameters;

pub const PLACEHOLDER_X: &str = "Escolher coluna X";
pub const PLACEHOLDER_Y: &str = "Escolher coluna Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Tem de selecionar colunas para os eixos.")]
    ColumnsNotSelected,
    #[error("Tem de preencher os nomes dos eixos.")]
    LabelsMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// Axes are labelled with the selected column names.
    #[default]
    ColumnNames,
    /// Axes get user supplied labels; the default columns are plotted.
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterForm {
    pub columns: Vec<String>,
    pub mode: LabelMode,
    pub x_column: String,
    pub y_column: String,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

impl ParameterForm {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            mode: LabelMode::default(),
            x_column: PLACEHOLDER_X.to_string(),
            y_column: PLACEHOLDER_Y.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            title: String::new(),
        }
    }

    pub fn validate(&self) -> Result<ChartParameters, FormError> {
        let title = Some(self.title.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        match self.mode {
            LabelMode::ColumnNames => {
                let unselected = |col: &str| {
                    col == PLACEHOLDER_X || col == PLACEHOLDER_Y || col.trim().is_empty()
                };
                if unselected(&self.x_column) || unselected(&self.y_column) {
                    return Err(FormError::ColumnsNotSelected);
                }
                Ok(ChartParameters {
                    x_column: Some(self.x_column.clone()),
                    y_column: Some(self.y_column.clone()),
                    x_label: None,
                    y_label: None,
                    title,
                })
            }
            LabelMode::Custom => {
                let (x_label, y_label) = (self.x_label.trim(), self.y_label.trim());
                if x_label.is_empty() || y_label.is_empty() {
                    return Err(FormError::LabelsMissing);
                }
                Ok(ChartParameters {
                    x_column: None,
                    y_column: None,
                    x_label: Some(x_label.to_string()),
                    y_label: Some(y_label.to_string()),
                    title,
                })
            }
        }
    }
}
