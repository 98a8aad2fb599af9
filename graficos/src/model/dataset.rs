use std::{collections::HashMap, fmt, path::Path};

use serde::Deserialize;

use super::ModelError;

/// A single CSV cell. Variant order matters: the first variant that accepts
/// the raw text wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

pub type Row = HashMap<String, CellValue>;

/// Rows of the last imported CSV file, plus its header in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedDataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

impl CellValue {
    /// Numeric view of the cell. Text is accepted if it parses as a number,
    /// also with a decimal comma ("1,5").
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Float(x) => Some(*x),
            CellValue::Boolean(_) => None,
            CellValue::Text(text) => {
                let text = text.trim();
                text.parse::<f64>()
                    .ok()
                    .or_else(|| text.replace(',', ".").parse::<f64>().ok())
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(n) => write!(f, "{n}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl ImportedDataset {
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        log::debug!("reading csv file {:?}", path);
        let raw = std::fs::read(path)?;
        let dataset = Self::from_bytes(&raw)?;
        log::debug!(
            "parsed {} rows with columns {:?} from {:?}",
            dataset.rows.len(),
            dataset.columns,
            path.file_name().unwrap_or_default()
        );
        Ok(dataset)
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self, csv::Error> {
        let raw = raw.strip_prefix(&UTF8_BOM[..]).unwrap_or(raw);
        let delimiter = sniff_delimiter(raw);
        log::debug!("using delimiter {:?}", delimiter as char);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(raw);
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        let rows = reader
            .deserialize::<Row>()
            .collect::<Result<Vec<Row>, csv::Error>>()?;
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|col| col == name)
    }

    /// The entries of `required` that are not part of the header.
    pub fn missing_columns(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|col| !self.has_column(col))
            .cloned()
            .collect()
    }

    /// Cell of `column` in row `row`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Picks the most frequent candidate delimiter on the header line, ignoring
/// quoted text. Falls back to a comma.
fn sniff_delimiter(raw: &[u8]) -> u8 {
    let header = raw.split(|b| *b == b'\n').next().unwrap_or_default();
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for byte in header {
        if *byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(i) = CANDIDATE_DELIMITERS.iter().position(|d| d == byte) {
            counts[i] += 1;
        }
    }
    // Ties resolve to the earlier candidate.
    let (best, count) = counts
        .iter()
        .enumerate()
        .fold((0, 0), |(best, max), (i, &count)| {
            if count > max {
                (i, count)
            } else {
                (best, max)
            }
        });
    if count == 0 {
        b','
    } else {
        CANDIDATE_DELIMITERS[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        let data = ImportedDataset::from_bytes(b"Categoria,Valor,Nota\nA,1,x\nB,2.5,\n").unwrap();

        assert_eq!(data.columns(), ["Categoria", "Valor", "Nota"]);
        assert_eq!(data.len(), 2);
        assert_eq!(
            data.value(0, "Categoria"),
            Some(&CellValue::Text("A".into()))
        );
        assert_eq!(data.value(0, "Valor"), Some(&CellValue::Integer(1)));
        assert_eq!(data.value(1, "Valor"), Some(&CellValue::Float(2.5)));
        assert!(data.value(1, "Nota").is_some_and(CellValue::is_blank));
    }

    #[test]
    fn test_parse_semicolon_with_decimal_comma() {
        let data =
            ImportedDataset::from_bytes("Categoria;Valor\nMaçã;\"1,5\"\nPera;2\n".as_bytes())
                .unwrap();
        assert_eq!(data.columns(), ["Categoria", "Valor"]);
        assert_eq!(data.value(0, "Valor").and_then(CellValue::as_f64), Some(1.5));
        assert_eq!(data.value(1, "Valor").and_then(CellValue::as_f64), Some(2.0));
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut raw = UTF8_BOM.to_vec();
        raw.extend_from_slice(b"Categoria,Valor\nA,1\n");
        let data = ImportedDataset::from_bytes(&raw).unwrap();
        assert!(data.has_column("Categoria"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let data = ImportedDataset::from_bytes(b"Categoria,Valor\n").unwrap();
        assert!(data.is_empty());
        assert_eq!(data.columns().len(), 2);
    }

    #[test]
    fn test_ragged_rows_are_an_error() {
        assert!(ImportedDataset::from_bytes(b"a,b\n1,2,3\n").is_err());
    }

    #[test]
    fn test_missing_columns() {
        let data = ImportedDataset::from_bytes(b"Categoria,Outro\nA,1\n").unwrap();
        let required = vec!["Categoria".to_string(), "Valor".to_string()];
        assert_eq!(data.missing_columns(&required), vec!["Valor".to_string()]);
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter(b"a;b;c\n1;2;3"), b';');
        assert_eq!(sniff_delimiter(b"a\tb\n"), b'\t');
        assert_eq!(sniff_delimiter(b"\"x;y\",b\n"), b',');
        assert_eq!(sniff_delimiter(b"single\n"), b',');
    }

    #[test]
    fn test_cell_as_f64() {
        assert_eq!(CellValue::Boolean(true).as_f64(), None);
        assert_eq!(CellValue::Text("abc".into()).as_f64(), None);
        assert_eq!(CellValue::Text(" 3 ".into()).as_f64(), Some(3.0));
        assert_eq!(CellValue::Integer(-4).to_string(), "-4");
    }
}
