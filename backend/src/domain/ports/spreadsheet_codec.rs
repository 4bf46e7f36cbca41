//! Port converting between workbook bytes and header-keyed rows.

use super::define_port_error;
use crate::domain::{Sheet, SheetRow};

define_port_error! {
    /// Errors raised by spreadsheet codecs.
    pub enum SpreadsheetError {
        /// The bytes are not a readable workbook.
        Decode { message: String } => "spreadsheet could not be read: {message}",
        /// Writing the workbook failed.
        Encode { message: String } => "spreadsheet could not be written: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SpreadsheetCodec: Send + Sync {
    /// Rows of the first worksheet, keyed by the header row. Returns an empty
    /// list for a sheet with no data rows.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<SheetRow>, SpreadsheetError>;

    /// Encode a single-sheet workbook.
    fn encode(&self, sheet: &Sheet) -> Result<Vec<u8>, SpreadsheetError>;
}
