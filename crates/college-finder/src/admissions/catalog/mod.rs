mod documents;
mod rows;

use std::fmt;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::domain::Offering;

/// Supported on-disk catalog encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Csv,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    UnsupportedFormat(String),
    MissingField { row: usize, field: &'static str },
    InvalidNumber { row: usize, field: String, value: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read college catalog: {err}"),
            CatalogError::Csv(err) => write!(f, "invalid catalog CSV data: {err}"),
            CatalogError::Json(err) => write!(f, "invalid catalog JSON data: {err}"),
            CatalogError::UnsupportedFormat(path) => {
                write!(f, "catalog '{path}' must end in .csv or .json")
            }
            CatalogError::MissingField { row, field } => {
                write!(f, "catalog record {row} is missing {field}")
            }
            CatalogError::InvalidNumber { row, field, value } => write!(
                f,
                "catalog record {row} has non-numeric {field} value '{value}'"
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::UnsupportedFormat(_)
            | CatalogError::MissingField { .. }
            | CatalogError::InvalidNumber { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads offering records from exported college data, keeping file order.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Offering>, CatalogError> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        let file = std::fs::File::open(path)?;
        let offerings = Self::from_reader(file, format)?;
        info!(
            path = %path.display(),
            records = offerings.len(),
            "college catalog loaded"
        );
        Ok(offerings)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: CatalogFormat,
    ) -> Result<Vec<Offering>, CatalogError> {
        match format {
            CatalogFormat::Csv => rows::parse_rows(reader),
            CatalogFormat::Json => documents::parse_documents(reader),
        }
    }
}

/// Accepts integral values written either as integers or as `12000.0`.
pub(crate) fn parse_whole_number(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    trimmed.parse::<u64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0 && value.fract() == 0.0)
            .map(|value| value as u64)
    })
}
