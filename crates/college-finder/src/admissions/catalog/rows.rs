use std::io::Read;

use csv::StringRecord;

use super::{parse_whole_number, CatalogError};
use crate::admissions::domain::{
    BranchCode, CategoryKey, CollegeDetails, CutoffTable, InstitutionCode, Location, Offering,
};

/// Column positions resolved once from the header row.
struct Columns {
    institution_code: Option<usize>,
    branch_code: Option<usize>,
    district: Option<usize>,
    region: Option<usize>,
    name: Option<usize>,
    institution_type: Option<usize>,
    place: Option<usize>,
    coed: Option<usize>,
    affiliation: Option<usize>,
    established: Option<usize>,
    annual_fee: Option<usize>,
    cutoffs: Vec<(CategoryKey, usize)>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);

        Self {
            institution_code: position("INSTCODE"),
            branch_code: position("branch_code"),
            district: position("DIST"),
            region: position("REG"),
            name: position("COLLEGE"),
            institution_type: position("TYPE"),
            place: position("PLACE"),
            coed: position("COED"),
            affiliation: position("AFF"),
            established: position("ESTD"),
            annual_fee: position("COLLFEE"),
            cutoffs: CategoryKey::ALL
                .into_iter()
                .filter_map(|key| position(key.as_str()).map(|index| (key, index)))
                .collect(),
        }
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<Offering>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::from_headers(csv_reader.headers()?);
    let mut offerings = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        offerings.push(offering_from_record(&record, &columns, index + 1)?);
    }

    Ok(offerings)
}

fn offering_from_record(
    record: &StringRecord,
    columns: &Columns,
    row: usize,
) -> Result<Offering, CatalogError> {
    let cell = |column: Option<usize>| {
        column
            .and_then(|index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };
    let text = |column: Option<usize>| cell(column).map(str::to_string);
    let number = |column: Option<usize>, field: &str| -> Result<Option<u64>, CatalogError> {
        cell(column)
            .map(|raw| {
                parse_whole_number(raw).ok_or_else(|| CatalogError::InvalidNumber {
                    row,
                    field: field.to_string(),
                    value: raw.to_string(),
                })
            })
            .transpose()
    };

    let institution_code = text(columns.institution_code).ok_or(CatalogError::MissingField {
        row,
        field: "INSTCODE",
    })?;
    let branch_code = text(columns.branch_code).ok_or(CatalogError::MissingField {
        row,
        field: "branch_code",
    })?;

    let mut cutoffs = CutoffTable::new();
    for (key, index) in &columns.cutoffs {
        if let Some(value) = number(Some(*index), key.as_str())? {
            cutoffs.insert(*key, narrow(value, row, key.as_str())?);
        }
    }

    let established = number(columns.established, "ESTD")?
        .map(|value| {
            u16::try_from(value).map_err(|_| CatalogError::InvalidNumber {
                row,
                field: "ESTD".to_string(),
                value: value.to_string(),
            })
        })
        .transpose()?;
    let annual_fee = number(columns.annual_fee, "COLLFEE")?
        .map(|value| narrow(value, row, "COLLFEE"))
        .transpose()?;

    Ok(Offering {
        institution_code: InstitutionCode(institution_code),
        branch_code: BranchCode(branch_code),
        location: Location {
            district: text(columns.district).unwrap_or_default(),
            region: text(columns.region).unwrap_or_default(),
        },
        details: CollegeDetails {
            name: text(columns.name),
            institution_type: text(columns.institution_type),
            place: text(columns.place),
            coed: text(columns.coed),
            affiliation: text(columns.affiliation),
            established,
            annual_fee,
        },
        cutoffs,
    })
}

fn narrow(value: u64, row: usize, field: &str) -> Result<u32, CatalogError> {
    u32::try_from(value).map_err(|_| CatalogError::InvalidNumber {
        row,
        field: field.to_string(),
        value: value.to_string(),
    })
}
