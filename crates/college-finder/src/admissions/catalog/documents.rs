use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{parse_whole_number, CatalogError};
use crate::admissions::domain::{
    BranchCode, CategoryKey, CollegeDetails, CutoffTable, InstitutionCode, Location, Offering,
};

/// Document shape exported from the college record store.
#[derive(Debug, Deserialize)]
struct CollegeDocument {
    #[serde(rename = "INSTCODE", default)]
    institution_code: Option<String>,
    #[serde(default)]
    branch_code: Option<String>,
    #[serde(rename = "DIST", default)]
    district: Option<String>,
    #[serde(rename = "REG", default)]
    region: Option<String>,
    #[serde(rename = "COLLEGE", default)]
    name: Option<String>,
    #[serde(rename = "TYPE", default)]
    institution_type: Option<String>,
    #[serde(rename = "PLACE", default)]
    place: Option<String>,
    #[serde(rename = "COED", default)]
    coed: Option<String>,
    #[serde(rename = "AFF", default)]
    affiliation: Option<String>,
    #[serde(rename = "ESTD", default)]
    established: Option<Value>,
    #[serde(rename = "COLLFEE", default)]
    annual_fee: Option<Value>,
    #[serde(default)]
    cutoffs: BTreeMap<String, Value>,
}

pub(crate) fn parse_documents<R: Read>(reader: R) -> Result<Vec<Offering>, CatalogError> {
    let documents: Vec<CollegeDocument> = serde_json::from_reader(reader)?;
    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| offering_from_document(document, index + 1))
        .collect()
}

fn offering_from_document(document: CollegeDocument, row: usize) -> Result<Offering, CatalogError> {
    let institution_code = non_empty(document.institution_code).ok_or(CatalogError::MissingField {
        row,
        field: "INSTCODE",
    })?;
    let branch_code = non_empty(document.branch_code).ok_or(CatalogError::MissingField {
        row,
        field: "branch_code",
    })?;

    let mut cutoffs = CutoffTable::new();
    for (column, value) in &document.cutoffs {
        let Ok(key) = column.parse::<CategoryKey>() else {
            warn!(row, column = %column, "skipping unknown cutoff category");
            continue;
        };
        if let Some(cutoff) = whole_number(value, row, column)? {
            cutoffs.insert(key, cutoff);
        }
    }

    let established = match &document.established {
        Some(value) => whole_number(value, row, "ESTD")?
            .map(|year| {
                u16::try_from(year).map_err(|_| CatalogError::InvalidNumber {
                    row,
                    field: "ESTD".to_string(),
                    value: year.to_string(),
                })
            })
            .transpose()?,
        None => None,
    };
    let annual_fee = match &document.annual_fee {
        Some(value) => whole_number(value, row, "COLLFEE")?,
        None => None,
    };

    Ok(Offering {
        institution_code: InstitutionCode(institution_code),
        branch_code: BranchCode(branch_code),
        location: Location {
            district: non_empty(document.district).unwrap_or_default(),
            region: non_empty(document.region).unwrap_or_default(),
        },
        details: CollegeDetails {
            name: non_empty(document.name),
            institution_type: non_empty(document.institution_type),
            place: non_empty(document.place),
            coed: non_empty(document.coed),
            affiliation: non_empty(document.affiliation),
            established,
            annual_fee,
        },
        cutoffs,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// `null` and blank strings are absent; numbers and numeric strings must be whole and fit `u32`.
fn whole_number(value: &Value, row: usize, field: &str) -> Result<Option<u32>, CatalogError> {
    let invalid = || CatalogError::InvalidNumber {
        row,
        field: field.to_string(),
        value: value.to_string(),
    };

    let parsed = match value {
        Value::Null => return Ok(None),
        Value::String(raw) if raw.trim().is_empty() => return Ok(None),
        Value::String(raw) => parse_whole_number(raw),
        Value::Number(number) => number
            .as_u64()
            .or_else(|| parse_whole_number(&number.to_string())),
        _ => None,
    };

    parsed
        .and_then(|value| u32::try_from(value).ok())
        .map(Some)
        .ok_or_else(invalid)
}
