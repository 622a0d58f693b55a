use serde::{Deserialize, Serialize};

use super::domain::{BranchCode, CategoryFilter, CategoryKey, CollegeQuery, OfferingFilter, Rank};

/// Sentinel accepted for every filter meaning "do not filter on this field".
pub const ANY: &str = "ALL";

/// Raw query-string parameters, exactly as callers send them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Rejections raised before the record store is consulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("rank must be a positive integer (got '{0}')")]
    InvalidRank(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

impl QueryParams {
    pub fn parse(&self) -> Result<CollegeQuery, QueryError> {
        let rank = parse_rank(self.rank.as_deref())?;
        let category = parse_category(self.category.as_deref())?;
        let filter = OfferingFilter {
            branch: exact_match(self.branch.as_deref()).map(BranchCode),
            district: exact_match(self.district.as_deref()),
            region: exact_match(self.region.as_deref()),
        };

        Ok(CollegeQuery {
            rank,
            category,
            filter,
        })
    }
}

fn parse_rank(raw: Option<&str>) -> Result<Rank, QueryError> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(Rank::DEFAULT),
        Some(value) => value,
    };

    // u32's parser tolerates a leading '+'; ranks are bare digits only.
    if !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(QueryError::InvalidRank(value.to_string()));
    }

    value
        .parse::<u32>()
        .ok()
        .and_then(Rank::new)
        .ok_or_else(|| QueryError::InvalidRank(value.to_string()))
}

fn parse_category(raw: Option<&str>) -> Result<CategoryFilter, QueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(CategoryFilter::All),
        Some(value) if value.eq_ignore_ascii_case(ANY) => Ok(CategoryFilter::All),
        Some(value) => value
            .parse::<CategoryKey>()
            .map(CategoryFilter::Only)
            .map_err(|_| QueryError::UnknownCategory(value.to_string())),
    }
}

fn exact_match(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(ANY))
        .map(str::to_string)
}
