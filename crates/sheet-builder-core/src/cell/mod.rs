//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] - Read-only contract for a cell inside a row
//! - [`CellRef`] - The worksheet-backed implementation of [`Cell`]
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")

mod address;
mod value;

pub use address::CellAddress;
pub use value::{CellValue, SharedString, StringPool};

use crate::worksheet::Worksheet;

/// Read-only view of a single cell
pub trait Cell {
    /// 1-based number of the row that owns this cell
    fn row_number(&self) -> u32;

    /// 0-based column index (A = 0)
    fn column(&self) -> u16;

    /// The stored value
    fn value(&self) -> &CellValue;

    /// Location of the cell
    fn address(&self) -> CellAddress {
        CellAddress::new(self.row_number() - 1, self.column())
    }

    /// Column letters, e.g. "C"
    fn column_name(&self) -> String {
        CellAddress::column_to_letters(self.column())
    }
}

/// A cell borrowed from a [`Worksheet`]
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    sheet: &'a Worksheet,
    row: u32,
    col: u16,
    value: &'a CellValue,
}

impl<'a> CellRef<'a> {
    pub(crate) fn new(sheet: &'a Worksheet, row: u32, col: u16, value: &'a CellValue) -> Self {
        Self {
            sheet,
            row,
            col,
            value,
        }
    }

    /// Worksheet the cell lives in
    pub fn sheet(&self) -> &'a Worksheet {
        self.sheet
    }
}

impl Cell for CellRef<'_> {
    fn row_number(&self) -> u32 {
        self.row + 1
    }

    fn column(&self) -> u16 {
        self.col
    }

    fn value(&self) -> &CellValue {
        self.value
    }
}

impl PartialEq for CellRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.sheet, other.sheet)
            && self.row == other.row
            && self.col == other.col
            && self.value == other.value
    }
}
