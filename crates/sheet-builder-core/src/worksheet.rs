//! Worksheet type

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::cell::{CellAddress, CellRef, CellValue, StringPool};
use crate::error::{Error, Result};
use crate::row::{Row, RowEntry, RowRef};
use crate::workbook::{OverwritePolicy, WorkbookSettings};
use crate::{MAX_COLS, MAX_ROWS};

/// Read-only contract for a named container of rows
pub trait Sheet {
    /// Row view type handed out by this sheet
    type Row<'a>: Row
    where
        Self: 'a;

    /// Sheet name
    fn name(&self) -> &str;

    /// Look up a row by its 1-based number
    ///
    /// Returns `None` for number 0 and for rows that were never created.
    fn row(&self, number: u32) -> Option<Self::Row<'_>>;

    /// All rows, ordered by number
    fn rows(&self) -> Vec<Self::Row<'_>>;
}

/// A worksheet (single sheet in a workbook)
///
/// The worksheet owns its rows. Rows are keyed by 0-based index and come into
/// existence either explicitly ([`Worksheet::create_row`]) or when a cell is
/// written into them; they stay until [`Worksheet::remove_row`].
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Row index → row entry
    rows: BTreeMap<u32, RowEntry>,
    /// Interned cell strings
    strings: StringPool,
    /// Number of rows allowed (row numbers 1..=max_rows)
    max_rows: u32,
    /// Number of columns allowed (columns 0..max_columns)
    max_columns: u16,
    /// What happens when a value lands on an occupied cell
    overwrite: OverwritePolicy,
}

impl Worksheet {
    /// Create a new worksheet with the given name and default settings
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_settings(name, &WorkbookSettings::default())
    }

    /// Create a new worksheet taking limits and overwrite policy from `settings`
    ///
    /// Limits above [`MAX_ROWS`] / [`MAX_COLS`] are capped there, since A1
    /// addresses cannot name anything beyond them.
    pub fn with_settings<S: Into<String>>(name: S, settings: &WorkbookSettings) -> Self {
        let name = name.into();
        if settings.max_rows > MAX_ROWS || settings.max_columns > MAX_COLS {
            warn!(
                "{}: limits {}x{} capped to {}x{}",
                name, settings.max_rows, settings.max_columns, MAX_ROWS, MAX_COLS
            );
        }
        Self {
            name,
            rows: BTreeMap::new(),
            strings: StringPool::new(),
            max_rows: settings.max_rows.min(MAX_ROWS),
            max_columns: settings.max_columns.min(MAX_COLS),
            overwrite: settings.overwrite,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renaming goes through the workbook so names stay unique
    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Policy applied when writing to an occupied cell
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite
    }

    // === Rows ===

    /// Get a row by its 1-based number
    pub fn row(&self, number: u32) -> Option<RowRef<'_>> {
        let index = number.checked_sub(1)?;
        self.rows
            .get(&index)
            .map(|entry| RowRef::new(self, index, entry))
    }

    /// Iterate over rows in number order
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows
            .iter()
            .map(move |(&index, entry)| RowRef::new(self, index, entry))
    }

    /// Number of rows that exist
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of the highest existing row
    pub fn last_row_number(&self) -> Option<u32> {
        self.rows.keys().next_back().map(|index| index + 1)
    }

    /// Create an empty row with the given 1-based number
    ///
    /// Creating a row that already exists leaves its cells untouched.
    pub fn create_row(&mut self, number: u32) -> Result<()> {
        let index = self.validate_row_number(number)?;
        if !self.rows.contains_key(&index) {
            trace!("{}: creating row {}", self.name, number);
            self.rows.insert(index, RowEntry::new());
        }
        Ok(())
    }

    /// Remove a row and all of its cells
    pub fn remove_row(&mut self, number: u32) -> Option<RowEntry> {
        let index = number.checked_sub(1)?;
        self.rows.remove(&index)
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<CellRef<'_>>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by 0-based row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<CellRef<'_>> {
        self.rows
            .get(&row)
            .and_then(|entry| entry.get(col))
            .map(|value| CellRef::new(self, row, col, value))
    }

    /// Get a cell value by address string
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get a cell value by 0-based indices, `Empty` when unset
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.rows
            .get(&row)
            .and_then(|entry| entry.get(col))
            .cloned()
            .unwrap_or_default()
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by 0-based row and column indices
    ///
    /// Writing [`CellValue::Empty`] clears the cell. Writing to an occupied cell
    /// either replaces it or fails with [`Error::CellOccupied`], depending on
    /// the sheet's [`OverwritePolicy`].
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;

        let value = value.into();
        if value.is_empty() {
            self.clear_cell_at(row, col);
            return Ok(());
        }

        let entry = self.rows.entry(row).or_default();

        if entry.get(col).is_some() && self.overwrite == OverwritePolicy::Reject {
            return Err(Error::CellOccupied(format!(
                "{}!{}",
                self.name,
                CellAddress::new(row, col)
            )));
        }

        // The pool only grows; cleared or replaced strings stay interned.
        let value = self.strings.intern_value(value);

        trace!("{}!{} = {:?}", self.name, CellAddress::new(row, col), value);
        if let Some(previous) = entry.set(col, value) {
            debug!(
                "{}!{} overwritten (was {})",
                self.name,
                CellAddress::new(row, col),
                previous.type_name()
            );
        }
        Ok(())
    }

    /// Clear a cell by address string, returning its previous value
    pub fn clear_cell(&mut self, address: &str) -> Result<Option<CellValue>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.clear_cell_at(addr.row, addr.col))
    }

    /// Clear a cell by indices. The row itself stays.
    pub fn clear_cell_at(&mut self, row: u32, col: u16) -> Option<CellValue> {
        self.rows.get_mut(&row).and_then(|entry| entry.remove(col))
    }

    // === Bounds ===

    /// Row limit of this sheet
    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    /// Column limit of this sheet
    pub fn max_columns(&self) -> u16 {
        self.max_columns
    }

    /// Check a 1-based row number and return its index
    pub(crate) fn validate_row_number(&self, number: u32) -> Result<u32> {
        if number == 0 {
            return Err(Error::InvalidRowNumber(number));
        }
        let index = number - 1;
        if index >= self.max_rows {
            return Err(Error::RowOutOfBounds(index, self.max_rows.saturating_sub(1)));
        }
        Ok(index)
    }

    /// Validate cell position
    pub(crate) fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= self.max_rows {
            return Err(Error::RowOutOfBounds(row, self.max_rows.saturating_sub(1)));
        }
        if col >= self.max_columns {
            return Err(Error::ColumnOutOfBounds(
                u32::from(col),
                self.max_columns.saturating_sub(1),
            ));
        }
        Ok(())
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(RowEntry::len).sum()
    }

    /// Check if the worksheet has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = CellRef<'_>> {
        self.rows().flat_map(|row| row.iter_cells())
    }
}

impl Sheet for Worksheet {
    type Row<'a> = RowRef<'a>
    where
        Self: 'a;

    fn name(&self) -> &str {
        &self.name
    }

    fn row(&self, number: u32) -> Option<RowRef<'_>> {
        Worksheet::row(self, number)
    }

    fn rows(&self) -> Vec<RowRef<'_>> {
        Worksheet::rows(self).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn test_cell_operations() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("B1", 42.0).unwrap();
        ws.set_cell_value("C1", true).unwrap();

        assert_eq!(ws.get_value("A1").unwrap().as_string(), Some("Hello"));
        assert_eq!(ws.get_value("B1").unwrap().as_number(), Some(42.0));
        assert_eq!(ws.get_value("C1").unwrap().as_bool(), Some(true));
        assert!(ws.get_value("D1").unwrap().is_empty());
        assert_eq!(ws.cell_count(), 3);
        assert_eq!(ws.row_count(), 1);
    }

    #[test]
    fn test_row_lookup() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A3", 1).unwrap();

        assert!(ws.row(0).is_none());
        assert!(ws.row(1).is_none());
        assert_eq!(ws.row(3).unwrap().number(), 3);
        assert_eq!(ws.last_row_number(), Some(3));
    }

    #[test]
    fn test_neighbour_lookup_through_sheet() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A1", "top").unwrap();
        ws.set_cell_value("A2", "middle").unwrap();

        let row = ws.row(2).unwrap();
        let above = row.sheet().row(row.number() - 1).unwrap();
        assert_eq!(above.cells()[0].value().as_string(), Some("top"));
        assert!(row.sheet().row(row.number() + 1).is_none());
    }

    #[test]
    fn test_empty_write_clears_but_keeps_row() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("B2", 5).unwrap();
        ws.set_cell_value("B2", CellValue::Empty).unwrap();

        assert_eq!(ws.cell_count(), 0);
        assert!(ws.row(2).unwrap().is_empty());

        // clearing a cell in a row that does not exist creates nothing
        ws.set_cell_value("B9", CellValue::Empty).unwrap();
        assert!(ws.row(9).is_none());
    }

    #[test]
    fn test_clear_cell() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("B2", "gone").unwrap();
        ws.set_cell_value("C2", 7).unwrap();

        let previous = ws.clear_cell("B2").unwrap();
        assert_eq!(previous.unwrap().as_string(), Some("gone"));
        assert!(ws.get_value("B2").unwrap().is_empty());
        assert_eq!(ws.row(2).unwrap().cell_count(), 1);

        // already clear
        assert!(ws.clear_cell("B2").unwrap().is_none());

        assert_eq!(ws.clear_cell_at(1, 2), Some(CellValue::Number(7.0)));
        assert!(ws.row(2).unwrap().is_empty());

        // missing row: nothing removed, nothing created
        assert!(ws.clear_cell_at(40, 0).is_none());
        assert!(ws.row(41).is_none());
        assert!(ws.clear_cell("1A").is_err());
    }

    #[test]
    fn test_rejected_write_does_not_intern() {
        let settings = WorkbookSettings {
            overwrite: OverwritePolicy::Reject,
            ..Default::default()
        };
        let mut ws = Worksheet::with_settings("Reject", &settings);
        ws.set_cell_value("A1", "kept").unwrap();
        assert_eq!(ws.strings.len(), 1);

        assert!(ws.set_cell_value("A1", "refused").is_err());
        assert_eq!(ws.strings.len(), 1);
    }

    #[test]
    fn test_limits_capped_at_address_range() {
        let settings = WorkbookSettings {
            max_rows: 2_000_000,
            max_columns: u16::MAX,
            ..Default::default()
        };
        let mut ws = Worksheet::with_settings("Big", &settings);
        assert_eq!(ws.max_rows(), MAX_ROWS);
        assert_eq!(ws.max_columns(), MAX_COLS);

        // index- and address-based writes agree at and past the edge
        assert!(ws.set_cell_value("XFD1048576", 1).is_ok());
        assert!(ws.set_cell_value_at(MAX_ROWS - 1, MAX_COLS - 1, 1).is_ok());
        assert!(matches!(
            ws.set_cell_value_at(MAX_ROWS, 0, 1),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(matches!(
            ws.set_cell_value("A1048577", 1),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(matches!(
            ws.set_cell_value_at(0, MAX_COLS, 1),
            Err(Error::ColumnOutOfBounds(..))
        ));
        assert!(matches!(
            ws.create_row(MAX_ROWS + 1),
            Err(Error::RowOutOfBounds(..))
        ));
    }

    #[test]
    fn test_create_and_remove_row() {
        let mut ws = Worksheet::new("Test");
        ws.create_row(4).unwrap();
        assert_eq!(ws.row_count(), 1);
        assert!(matches!(ws.create_row(0), Err(Error::InvalidRowNumber(0))));

        ws.set_cell_value("A4", "kept").unwrap();
        ws.create_row(4).unwrap();
        assert_eq!(ws.row(4).unwrap().cell_count(), 1);

        let removed = ws.remove_row(4).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(ws.is_empty());
        assert!(ws.remove_row(0).is_none());
    }

    #[test]
    fn test_overwrite_policy() {
        let mut ws = Worksheet::new("Replace");
        ws.set_cell_value("A1", 1).unwrap();
        ws.set_cell_value("A1", 2).unwrap();
        assert_eq!(ws.get_value("A1").unwrap().as_number(), Some(2.0));

        let settings = WorkbookSettings {
            overwrite: OverwritePolicy::Reject,
            ..Default::default()
        };
        let mut ws = Worksheet::with_settings("Reject", &settings);
        ws.set_cell_value("A1", 1).unwrap();
        let err = ws.set_cell_value("A1", 2).unwrap_err();
        assert!(matches!(err, Error::CellOccupied(ref a) if a == "Reject!A1"));
        assert_eq!(ws.get_value("A1").unwrap().as_number(), Some(1.0));

        // clearing is always allowed
        ws.set_cell_value("A1", CellValue::Empty).unwrap();
        ws.set_cell_value("A1", 3).unwrap();
    }

    #[test]
    fn test_bounds_from_settings() {
        let settings = WorkbookSettings {
            max_rows: 10,
            max_columns: 3,
            ..Default::default()
        };
        let mut ws = Worksheet::with_settings("Small", &settings);

        assert!(ws.set_cell_value("C10", 1).is_ok());
        assert!(matches!(
            ws.set_cell_value("D1", 1),
            Err(Error::ColumnOutOfBounds(3, 2))
        ));
        assert!(matches!(
            ws.set_cell_value("A11", 1),
            Err(Error::RowOutOfBounds(10, 9))
        ));
        assert!(matches!(ws.create_row(11), Err(Error::RowOutOfBounds(10, 9))));
    }

    #[test]
    fn test_strings_are_interned() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A1", "same").unwrap();
        ws.set_cell_value("A2", "same").unwrap();

        match (ws.get_value("A1").unwrap(), ws.get_value("A2").unwrap()) {
            (CellValue::String(a), CellValue::String(b)) => assert!(a.ptr_eq(&b)),
            other => panic!("unexpected values: {:?}", other),
        }
    }

    #[test]
    fn test_iter_cells_row_major() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("B2", 4).unwrap();
        ws.set_cell_value("A2", 3).unwrap();
        ws.set_cell_value("C1", 2).unwrap();

        let addresses: Vec<String> = ws.iter_cells().map(|c| c.address().to_string()).collect();
        assert_eq!(addresses, vec!["C1", "A2", "B2"]);
    }

    #[test]
    fn test_sheet_trait_rows() {
        let mut ws = Worksheet::new("Test");
        ws.create_row(5).unwrap();
        ws.create_row(2).unwrap();

        let numbers: Vec<u32> = Sheet::rows(&ws).iter().map(|r| r.number()).collect();
        assert_eq!(numbers, vec![2, 5]);
        assert_eq!(Sheet::name(&ws), "Test");
    }
}
