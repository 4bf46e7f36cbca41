//! xlsx implementation of the [`SpreadsheetCodec`] port.
//!
//! Reading uses `calamine`, writing uses `rust_xlsxwriter`. Only the first
//! worksheet is read; its first non-empty row is the header.

use std::collections::BTreeMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, XlsxError as ReadError, open_workbook_from_rs};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::domain::ports::{SpreadsheetCodec, SpreadsheetError};
use crate::domain::{Cell, Sheet, SheetRow};

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSpreadsheetCodec;

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Int(value) => Cell::Int(*value),
        Data::Float(value) => Cell::Float(*value),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => Cell::Float(value.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}

fn header_name(data: &Data) -> String {
    data.to_string().trim().to_lowercase()
}

fn encode_error(err: XlsxError) -> SpreadsheetError {
    SpreadsheetError::encode(err.to_string())
}

impl SpreadsheetCodec for XlsxSpreadsheetCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<SheetRow>, SpreadsheetError> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|err: ReadError| SpreadsheetError::decode(err.to_string()))?;
        let Some(range) = workbook.worksheet_range_at(0) else {
            return Ok(Vec::new());
        };
        let range = range.map_err(|err| SpreadsheetError::decode(err.to_string()))?;
        let Some((header_index, _)) = range.start() else {
            return Ok(Vec::new());
        };

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let columns: Vec<String> = header.iter().map(header_name).collect();

        let mut decoded = Vec::new();
        for (offset, row) in (2_u32..).zip(rows) {
            let cells: BTreeMap<String, Cell> = columns
                .iter()
                .zip(row)
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, data)| (name.clone(), to_cell(data)))
                .collect();
            decoded.push(SheetRow {
                number: header_index + offset,
                cells,
            });
        }
        Ok(decoded)
    }

    fn encode(&self, sheet: &Sheet) -> Result<Vec<u8>, SpreadsheetError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name).map_err(encode_error)?;

        for (col, name) in (0_u16..).zip(&sheet.columns) {
            worksheet.write_string(0, col, name).map_err(encode_error)?;
        }
        for (row, cells) in (1_u32..).zip(&sheet.rows) {
            for (col, cell) in (0_u16..).zip(cells) {
                match cell {
                    Cell::Empty => {}
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text).map_err(encode_error)?;
                    }
                    Cell::Int(value) => {
                        // i64 -> f64 is exact for the i32 range used by patient columns.
                        worksheet
                            .write_number(row, col, *value as f64)
                            .map_err(encode_error)?;
                    }
                    Cell::Float(value) => {
                        worksheet.write_number(row, col, *value).map_err(encode_error)?;
                    }
                    Cell::Bool(value) => {
                        worksheet.write_boolean(row, col, *value).map_err(encode_error)?;
                    }
                }
            }
        }

        workbook.save_to_buffer().map_err(encode_error)
    }
}
