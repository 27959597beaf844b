//! Row types
//!
//! [`Row`] is the read contract every row view satisfies. [`RowRef`] is the
//! view handed out by [`Worksheet`], and [`RowEntry`] is what the worksheet
//! actually stores.

use std::collections::BTreeMap;

use crate::cell::{Cell, CellRef, CellValue};
use crate::worksheet::{Sheet, Worksheet};

/// Read-only view of one row of a sheet
///
/// A row never owns its sheet. [`Row::sheet`] hands back a borrow of the
/// sheet the row was looked up from; neighbouring rows are reached through
/// that sheet (`sheet.row(number - 1)`), not through the row itself.
pub trait Row {
    /// Owning sheet type
    type Sheet: Sheet + ?Sized;
    /// Cell view type
    type Cell: Cell;

    /// 1-based position of the row in its sheet
    fn number(&self) -> u32;

    /// The sheet that owns this row
    fn sheet(&self) -> &Self::Sheet;

    /// Cells of this row, ordered by column
    fn cells(&self) -> Vec<Self::Cell>;
}

/// Stored row data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowEntry {
    /// Non-empty cells keyed by column index
    cells: BTreeMap<u16, CellValue>,
}

impl RowEntry {
    /// Create an empty row entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell value by column index
    pub fn get(&self, col: u16) -> Option<&CellValue> {
        self.cells.get(&col)
    }

    /// Store a value, returning the previous one. Empty values clear the cell.
    pub(crate) fn set(&mut self, col: u16, value: CellValue) -> Option<CellValue> {
        if value.is_empty() {
            self.cells.remove(&col)
        } else {
            self.cells.insert(col, value)
        }
    }

    pub(crate) fn remove(&mut self, col: u16) -> Option<CellValue> {
        self.cells.remove(&col)
    }

    /// Iterate over (column, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &CellValue)> {
        self.cells.iter().map(|(&col, value)| (col, value))
    }

    /// Highest occupied column, if any
    pub fn last_column(&self) -> Option<u16> {
        self.cells.keys().next_back().copied()
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A row borrowed from a [`Worksheet`]
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    sheet: &'a Worksheet,
    /// Row index (0-based)
    index: u32,
    entry: &'a RowEntry,
}

impl<'a> RowRef<'a> {
    pub(crate) fn new(sheet: &'a Worksheet, index: u32, entry: &'a RowEntry) -> Self {
        Self {
            sheet,
            index,
            entry,
        }
    }

    /// Row index (0-based)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Owning worksheet, borrowed for the worksheet's lifetime
    pub fn worksheet(&self) -> &'a Worksheet {
        self.sheet
    }

    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<CellRef<'a>> {
        self.entry
            .get(col)
            .map(|value| CellRef::new(self.sheet, self.index, col, value))
    }

    /// Iterate over the row's cells in column order
    pub fn iter_cells(&self) -> impl Iterator<Item = CellRef<'a>> + 'a {
        let (sheet, index, entry) = (self.sheet, self.index, self.entry);
        entry
            .iter()
            .map(move |(col, value)| CellRef::new(sheet, index, col, value))
    }

    /// Check if row has any cells
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Number of cells in row
    pub fn cell_count(&self) -> usize {
        self.entry.len()
    }
}

impl<'a> Row for RowRef<'a> {
    type Sheet = Worksheet;
    type Cell = CellRef<'a>;

    fn number(&self) -> u32 {
        self.index + 1
    }

    fn sheet(&self) -> &Worksheet {
        self.sheet
    }

    fn cells(&self) -> Vec<CellRef<'a>> {
        self.iter_cells().collect()
    }
}
