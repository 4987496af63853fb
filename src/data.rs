use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::MergeError;

/// One entry of `results.json`. The file carries more keys than these
/// (per-contest breakdowns), which serde skips.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "noOfNonCheated")]
    pub no_of_non_cheated: i64,
    #[serde(rename = "noOfCheated")]
    pub no_of_cheated: i64,
}

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<UserRecord>, MergeError> {
    let raw = fs::read_to_string(path)?;
    let records = serde_json::from_str(&raw)?;
    Ok(records)
}
