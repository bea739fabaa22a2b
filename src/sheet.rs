/// Contact table loading from the birthday spreadsheet
use calamine::{Data, DataType, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ContactRow;
use crate::utils::phone::normalize_phone;

/// Errors raised while loading the contact table
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to open workbook '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::XlsxError,
    },
    #[error("workbook '{0}' has no worksheets")]
    NoWorksheet(String),
    #[error("failed to read worksheet: {0}")]
    Read(#[source] calamine::XlsxError),
    #[error("worksheet has no header row")]
    EmptySheet,
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: missing or invalid '{column}' value")]
    InvalidCell { row: usize, column: &'static str },
}

/// Indices of the required columns within the header row
#[derive(Debug)]
struct ColumnMap {
    phone: usize,
    first_name: usize,
    other_name: usize,
    birthday: usize,
}

/// Load the contact table from the spreadsheet at `path`.
///
/// Uses the first worksheet; the first row must be a header naming the
/// `phone`, `first_name`, `other_name` and `birthday` columns. Row order is
/// preserved. Phone numbers are normalized here, exactly once, so all
/// downstream code observes the canonical leading-'+' form.
pub fn load_contacts(path: &str) -> Result<Vec<ContactRow>, SheetError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| SheetError::Open {
        path: path.to_string(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet(path.to_string()))?
        .map_err(SheetError::Read)?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(SheetError::EmptySheet)?;
    let columns = column_map(header)?;

    let mut table = Vec::new();
    for (index, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        // Header occupies row 1 in the sheet, so data starts at row 2
        table.push(contact_from_row(row, &columns, index + 2)?);
    }
    Ok(table)
}

/// Locate the required columns in the header row by name
fn column_map(header: &[Data]) -> Result<ColumnMap, SheetError> {
    let find = |name: &'static str| -> Result<usize, SheetError> {
        header
            .iter()
            .position(|cell| {
                cell.as_string()
                    .is_some_and(|text| text.trim().eq_ignore_ascii_case(name))
            })
            .ok_or(SheetError::MissingColumn(name))
    };

    Ok(ColumnMap {
        phone: find("phone")?,
        first_name: find("first_name")?,
        other_name: find("other_name")?,
        birthday: find("birthday")?,
    })
}

/// Convert one data row into a contact
fn contact_from_row(
    row: &[Data],
    columns: &ColumnMap,
    row_number: usize,
) -> Result<ContactRow, SheetError> {
    let cell = |index: usize, column: &'static str| -> Result<String, SheetError> {
        cell_string(row, index).ok_or(SheetError::InvalidCell {
            row: row_number,
            column,
        })
    };

    let phone = cell(columns.phone, "phone")?;
    let first_name = cell(columns.first_name, "first_name")?;
    let other_name = cell(columns.other_name, "other_name")?;
    let birthday = cell_date(row, columns.birthday).ok_or(SheetError::InvalidCell {
        row: row_number,
        column: "birthday",
    })?;

    Ok(ContactRow {
        phone: normalize_phone(&phone),
        first_name,
        other_name,
        birthday,
    })
}

/// Render a cell as trimmed text; numeric cells become their digit text
fn cell_string(row: &[Data], index: usize) -> Option<String> {
    let text = row.get(index)?.as_string()?;
    let text = text.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Read a cell as a calendar date, accepting date-typed cells as well as
/// `YYYY-MM-DD` text
fn cell_date(row: &[Data], index: usize) -> Option<NaiveDate> {
    let cell = row.get(index)?;
    if let Some(date) = cell.as_date() {
        return Some(date);
    }
    let text = cell.as_string()?;
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<Data> {
        vec![
            Data::String("phone".to_string()),
            Data::String("first_name".to_string()),
            Data::String("other_name".to_string()),
            Data::String("birthday".to_string()),
        ]
    }

    #[test]
    fn test_column_map_finds_all_columns() {
        let columns = column_map(&header()).unwrap();
        assert_eq!(columns.phone, 0);
        assert_eq!(columns.first_name, 1);
        assert_eq!(columns.other_name, 2);
        assert_eq!(columns.birthday, 3);
    }

    #[test]
    fn test_column_map_handles_reordered_and_extra_columns() {
        let header = vec![
            Data::String("notes".to_string()),
            Data::String("Birthday".to_string()),
            Data::String("phone".to_string()),
            Data::String("first_name".to_string()),
            Data::String("other_name".to_string()),
        ];
        let columns = column_map(&header).unwrap();
        assert_eq!(columns.birthday, 1);
        assert_eq!(columns.phone, 2);
    }

    #[test]
    fn test_column_map_missing_column() {
        let header = vec![
            Data::String("phone".to_string()),
            Data::String("first_name".to_string()),
            Data::String("birthday".to_string()),
        ];
        let err = column_map(&header).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn("other_name")));
    }

    #[test]
    fn test_contact_from_row_normalizes_numeric_phone() {
        let columns = column_map(&header()).unwrap();
        let row = vec![
            Data::Float(919999999999.0),
            Data::String("Asha".to_string()),
            Data::String("Rao".to_string()),
            Data::String("1990-06-15".to_string()),
        ];
        let contact = contact_from_row(&row, &columns, 2).unwrap();
        assert_eq!(contact.phone, "+919999999999");
        assert_eq!(contact.first_name, "Asha");
        assert_eq!(contact.other_name, "Rao");
        assert_eq!(
            contact.birthday,
            NaiveDate::from_ymd_opt(1990, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_contact_from_row_keeps_plus_prefix() {
        let columns = column_map(&header()).unwrap();
        let row = vec![
            Data::String("+14155551234".to_string()),
            Data::String("Jane".to_string()),
            Data::String("Doe".to_string()),
            Data::String("2001-12-31".to_string()),
        ];
        let contact = contact_from_row(&row, &columns, 2).unwrap();
        assert_eq!(contact.phone, "+14155551234");
    }

    #[test]
    fn test_contact_from_row_rejects_missing_phone() {
        let columns = column_map(&header()).unwrap();
        let row = vec![
            Data::Empty,
            Data::String("Jane".to_string()),
            Data::String("Doe".to_string()),
            Data::String("2001-12-31".to_string()),
        ];
        let err = contact_from_row(&row, &columns, 4).unwrap_err();
        assert!(matches!(
            err,
            SheetError::InvalidCell {
                row: 4,
                column: "phone"
            }
        ));
    }

    #[test]
    fn test_contact_from_row_rejects_bad_birthday() {
        let columns = column_map(&header()).unwrap();
        let row = vec![
            Data::String("+1".to_string()),
            Data::String("Jane".to_string()),
            Data::String("Doe".to_string()),
            Data::String("next tuesday".to_string()),
        ];
        let err = contact_from_row(&row, &columns, 3).unwrap_err();
        assert!(matches!(
            err,
            SheetError::InvalidCell {
                row: 3,
                column: "birthday"
            }
        ));
    }
}
