use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    // Import validation.
    #[error("o ficheiro {path:?} não tem a extensão .{expected}")]
    WrongExtension { path: PathBuf, expected: String },
    #[error("o ficheiro {0:?} não existe")]
    FileNotFound(PathBuf),
    #[error("o ficheiro tem {size} bytes, o máximo permitido é {max}")]
    FileTooLarge { size: u64, max: u64 },
    #[error("o ficheiro não contém dados")]
    EmptyDataset,
    #[error("faltam as colunas obrigatórias: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    // Generation validation.
    #[error("nenhum ficheiro foi importado")]
    NoDataset,
    #[error("tipo de gráfico não suportado: {0}")]
    UnsupportedKind(String),
    #[error("a coluna '{0}' não existe")]
    UnknownColumn(String),
    #[error("nenhuma coluna selecionada para o eixo {0}")]
    NoColumn(&'static str),
    #[error("a coluna '{column}' tem um valor não numérico na linha {row}")]
    NonNumericValue { column: String, row: usize },

    // Save validation.
    #[error("nenhum gráfico para guardar")]
    NoChart,
    #[error("formato de imagem não suportado: {0}")]
    UnsupportedFormat(String),

    // Unexpected.
    #[error("erro de leitura/escrita: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV mal formatado: {0}")]
    Csv(#[from] csv::Error),
    #[error("falha ao desenhar o gráfico: {0}")]
    Render(String),
}

impl ModelError {
    /// Validation errors are expected user mistakes. Everything else is
    /// unexpected and additionally reported through the internal error
    /// channel.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Csv(_) | Self::Render(_))
    }

    /// Whether this import error is about the file itself rather than its
    /// contents.
    pub fn is_invalid_file(&self) -> bool {
        matches!(
            self,
            Self::WrongExtension { .. } | Self::FileNotFound(_) | Self::FileTooLarge { .. }
        )
    }
}
