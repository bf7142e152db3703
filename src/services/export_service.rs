use mongodb::bson::{Bson, Document};
use std::io::Cursor;

use crate::utils::AppError;

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_FILENAME: &str = "contacts_data.xlsx";
pub const SHEET_NAME: &str = "Contacts Data";

/// (header, document field, column, width)
const COLUMNS: [(&str, &str, &str, f64); 3] = [
    ("Name", "name", "A", 25.0),
    ("Phone", "phone", "B", 25.0),
    ("Email", "email", "C", 40.0),
];

fn cell_text(value: Option<&Bson>) -> String {
    match value {
        None | Some(Bson::Null) => String::new(),
        Some(Bson::String(s)) => s.clone(),
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.clone().into_relaxed_extjson().to_string(),
    }
}

/// Builds the contacts workbook: a header row, then one row per contact.
pub fn build_contacts_workbook(contacts: &[Document]) -> Result<Vec<u8>, AppError> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(SHEET_NAME)
        .map_err(|e| AppError::ExportError(e.to_string()))?;

    for (col, (header, _, letter, width)) in COLUMNS.iter().enumerate() {
        sheet.get_cell_mut((col as u32 + 1, 1)).set_value_string(*header);
        sheet.get_column_dimension_mut(letter).set_width(*width);
    }

    for (row, contact) in contacts.iter().enumerate() {
        for (col, (_, field, _, _)) in COLUMNS.iter().enumerate() {
            sheet
                .get_cell_mut((col as u32 + 1, row as u32 + 2))
                .set_value_string(cell_text(contact.get(field)));
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer)
        .map_err(|e| AppError::ExportError(e.to_string()))?;

    Ok(buffer.into_inner())
}
