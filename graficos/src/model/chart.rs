use std::{fmt, str::FromStr};

use derive_new::new;

use super::{dataset::ImportedDataset, ModelError};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bars,
    Lines,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Bars, ChartKind::Lines];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bars => "Barras",
            ChartKind::Lines => "Linhas",
        }
    }

    /// Names of all supported kinds, as offered to the user.
    pub fn catalog() -> Vec<String> {
        Self::ALL.iter().map(|kind| kind.label().to_string()).collect()
    }
}

impl FromStr for ChartKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().to_lowercase() == wanted)
            .ok_or_else(|| ModelError::UnsupportedKind(s.to_string()))
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user asked for. Unset columns fall back to the configured
/// defaults, unset labels to the column names, an unset title to the
/// configured default title.
#[derive(Debug, Clone, Default, PartialEq, new)]
pub struct ChartSpec {
    pub kind: String,
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title: Option<String>,
}

impl ChartSpec {
    pub fn with_columns(kind: &str, x_column: &str, y_column: &str) -> Self {
        Self {
            kind: kind.to_string(),
            x_column: Some(x_column.to_string()),
            y_column: Some(y_column.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// The x cell as text, used as tick label for categorical axes.
    pub category: String,
    /// The x cell as number, if it is one.
    pub x: Option<f64>,
    pub y: f64,
}

/// A generated chart, ready to be shown or written to a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Chart {
    pub fn build(
        dataset: &ImportedDataset,
        spec: &ChartSpec,
        kind: ChartKind,
        config: &Config,
    ) -> Result<Self, ModelError> {
        let x_column = non_empty(&spec.x_column)
            .or(config.default_x_column())
            .ok_or(ModelError::NoColumn("X"))?;
        let y_column = non_empty(&spec.y_column)
            .or(config.default_y_column())
            .ok_or(ModelError::NoColumn("Y"))?;
        for column in [x_column, y_column] {
            if !dataset.has_column(column) {
                return Err(ModelError::UnknownColumn(column.to_string()));
            }
        }

        let mut points = Vec::with_capacity(dataset.len());
        let mut skipped = 0;
        for i in 0..dataset.len() {
            let Some(y_cell) = dataset.value(i, y_column).filter(|cell| !cell.is_blank()) else {
                skipped += 1;
                continue;
            };
            // Row numbers as the user sees them in a spreadsheet, header is 1.
            let y = y_cell
                .as_f64()
                .filter(|y| y.is_finite())
                .ok_or_else(|| ModelError::NonNumericValue {
                    column: y_column.to_string(),
                    row: i + 2,
                })?;
            let (category, x) = match dataset.value(i, x_column) {
                Some(cell) => (cell.to_string(), cell.as_f64().filter(|x| x.is_finite())),
                None => (String::new(), None),
            };
            points.push(ChartPoint { category, x, y });
        }
        if skipped > 0 {
            log::warn!("skipped {skipped} rows without a value in column '{y_column}'");
        }
        if points.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        Ok(Self {
            kind,
            title: non_empty(&spec.title)
                .unwrap_or(&config.default_title)
                .to_string(),
            x_label: non_empty(&spec.x_label).unwrap_or(x_column).to_string(),
            y_label: non_empty(&spec.y_label).unwrap_or(y_column).to_string(),
            points,
        })
    }

    /// Line charts over a numeric x column are drawn against the actual x
    /// values, everything else against the row position.
    pub fn uses_categories(&self) -> bool {
        self.kind == ChartKind::Bars || self.points.iter().any(|p| p.x.is_none())
    }

    pub fn x_positions(&self) -> Vec<f64> {
        if self.uses_categories() {
            (0..self.points.len()).map(|i| i as f64).collect()
        } else {
            self.points.iter().filter_map(|p| p.x).collect()
        }
    }

    /// `(x, y)` pairs in drawing coordinates.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.x_positions()
            .into_iter()
            .zip(self.points.iter().map(|p| p.y))
            .collect()
    }

    /// Tick label for a position on a categorical x axis.
    pub fn category_at(&self, position: f64) -> Option<&str> {
        let idx = position.round();
        if (position - idx).abs() > 1e-6 || idx < 0.0 {
            return None;
        }
        self.points.get(idx as usize).map(|p| p.category.as_str())
    }

    pub fn x_range(&self) -> (f64, f64) {
        if self.uses_categories() {
            return (-0.5, self.points.len() as f64 - 0.5);
        }
        let (min, max) = min_max(self.x_positions().into_iter());
        if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        }
    }

    pub fn y_range(&self) -> (f64, f64) {
        let (mut min, mut max) = min_max(self.points.iter().map(|p| p.y));
        // Bars grow from zero.
        if self.kind == ChartKind::Bars {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if min == max {
            return (min - 1.0, max + 1.0);
        }
        let pad = (max - min) * 0.05;
        let lower = if self.kind == ChartKind::Bars && min == 0.0 {
            0.0
        } else {
            min - pad
        };
        (lower, max + pad)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}
