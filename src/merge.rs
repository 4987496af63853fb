use std::collections::HashMap;

use crate::data::UserRecord;
use crate::sheets::{Cell, Sheet};
use crate::MergeError;

pub const USER_ID_COLUMN: &str = "userID";
pub const NON_CHEATED_COLUMN: &str = "noOfNonCheated";
pub const CHEATED_COLUMN: &str = "noOfCheated";

/// The user id is the last path segment of the profile link; a link with no
/// `/` at all is taken as a bare handle.
pub fn derive_user_id(link: &str) -> &str {
    link.rsplit_once('/').map_or(link, |(_, id)| id)
}

/// Left join: every row of `sheet` comes back, extended with a derived
/// `userID` column and the two counts from the matching record. Rows with no
/// matching record keep empty count cells. When several records share a user
/// id, the first one in the file wins.
pub fn merge(
    sheet: Sheet,
    records: &[UserRecord],
    key_column: &str,
) -> Result<Sheet, MergeError> {
    let key_ix = sheet
        .columns
        .iter()
        .position(|c| c == key_column)
        .ok_or_else(|| MergeError::MissingColumn(key_column.to_owned()))?;

    let mut by_id: HashMap<&str, &UserRecord> = HashMap::new();
    for record in records {
        by_id.entry(record.user_id.as_str()).or_insert(record);
    }

    let mut columns = sheet.columns;
    columns.extend([USER_ID_COLUMN, NON_CHEATED_COLUMN, CHEATED_COLUMN].map(String::from));

    let rows = sheet
        .rows
        .into_iter()
        .enumerate()
        .map(|(iy, mut row)| {
            let link = row
                .get(key_ix)
                .and_then(Cell::as_str)
                .filter(|s| !s.is_empty())
                .ok_or(MergeError::EmptyKey { row: iy + 1 })?;
            let user_id = derive_user_id(link).to_owned();

            let record = by_id.get(user_id.as_str()).copied();
            row.push(Cell::String(user_id));
            match record {
                Some(r) => {
                    row.push(Cell::Int(r.no_of_non_cheated));
                    row.push(Cell::Int(r.no_of_cheated));
                }
                None => {
                    row.push(Cell::Empty);
                    row.push(Cell::Empty);
                }
            }
            Ok(row)
        })
        .collect::<Result<Vec<_>, MergeError>>()?;

    Ok(Sheet {
        name: sheet.name,
        columns,
        rows,
    })
}
