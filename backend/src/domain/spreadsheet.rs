//! Format-neutral tabular data exchanged with the spreadsheet codec.

use std::collections::BTreeMap;

/// Single decoded cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Whether the cell holds nothing meaningful.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

/// Data row keyed by header name.
///
/// `number` is the 1-based row number as shown by spreadsheet software, so
/// the first data row under a header is row 2.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetRow {
    pub number: u32,
    pub cells: BTreeMap<String, Cell>,
}

impl SheetRow {
    /// Cell under `column`, or [`Cell::Empty`] when the column is absent.
    pub fn get(&self, column: &str) -> &Cell {
        self.cells.get(column).unwrap_or(&Cell::Empty)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_blank)
    }
}

/// Single-sheet workbook ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}
