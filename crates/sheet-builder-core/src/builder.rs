//! Closure-driven builder for workbooks
//!
//! The builder walks a workbook the way it reads: sheets contain rows, rows
//! contain cells. Rows and cells without an explicit position continue right
//! after the previous one.
//!
//! ```rust
//! use sheet_builder_core::{Row, WorkbookBuilder};
//!
//! let workbook = WorkbookBuilder::new()
//!     .build(|w| {
//!         w.sheet("People", |s| {
//!             s.row(|r| {
//!                 r.cell("Name")?.cell("Age")?;
//!                 Ok(())
//!             })?;
//!             s.row(|r| {
//!                 r.cell("Ada")?.cell(36)?;
//!                 Ok(())
//!             })?;
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let sheet = workbook.worksheet_by_name("People").unwrap();
//! assert_eq!(sheet.row(2).unwrap().cells().len(), 2);
//! ```

use log::debug;

use crate::cell::{CellAddress, CellValue};
use crate::error::{Error, Result};
use crate::workbook::{Workbook, WorkbookSettings};
use crate::worksheet::Worksheet;

/// Entry point for building a new workbook
#[derive(Debug, Clone, Default)]
pub struct WorkbookBuilder {
    settings: WorkbookSettings,
}

impl WorkbookBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given settings for the workbook and its sheets
    pub fn with_settings(mut self, settings: WorkbookSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build a workbook from a definition closure
    ///
    /// The workbook starts without sheets; the first error returned from any
    /// nested closure aborts the build and is returned unchanged.
    pub fn build<F>(self, f: F) -> Result<Workbook>
    where
        F: FnOnce(&mut WorkbookDefinition<'_>) -> Result<()>,
    {
        let mut workbook = Workbook::with_settings(self.settings);
        workbook.build(f)?;
        Ok(workbook)
    }
}

impl Workbook {
    /// Extend this workbook with a definition closure
    pub fn build<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut WorkbookDefinition<'_>) -> Result<()>,
    {
        f(&mut WorkbookDefinition { workbook: self })
    }
}

/// Definition scope for a workbook
#[derive(Debug)]
pub struct WorkbookDefinition<'w> {
    workbook: &'w mut Workbook,
}

impl<'w> WorkbookDefinition<'w> {
    /// Define a sheet
    ///
    /// An existing sheet with the same name (compared case-insensitively) is
    /// reopened, and its rows continue after the last existing one.
    pub fn sheet<F>(&mut self, name: &str, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut SheetDefinition<'_>) -> Result<()>,
    {
        let reopened = self.workbook.index_ignore_case(name).is_some();
        let index = self.workbook.get_or_add_worksheet(name)?;
        let sheet = self
            .workbook
            .worksheet_mut(index)
            .ok_or_else(|| Error::SheetNotFound(name.into()))?;

        if reopened {
            debug!("reopening sheet '{}'", sheet.name());
        } else {
            debug!("defining sheet '{}'", sheet.name());
        }

        f(&mut SheetDefinition::open(sheet))?;
        Ok(self)
    }

    /// The workbook being built
    pub fn workbook(&self) -> &Workbook {
        self.workbook
    }
}

/// Definition scope for one sheet
#[derive(Debug)]
pub struct SheetDefinition<'s> {
    sheet: &'s mut Worksheet,
    /// 1-based number used by the next `row` call
    next_row: u32,
}

impl<'s> SheetDefinition<'s> {
    fn open(sheet: &'s mut Worksheet) -> Self {
        let next_row = sheet.last_row_number().map_or(1, |n| n.saturating_add(1));
        Self { sheet, next_row }
    }

    /// Define the row after the previously defined one
    pub fn row<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RowDefinition<'_>) -> Result<()>,
    {
        self.row_at(self.next_row, f)
    }

    /// Define the row with the given 1-based number
    ///
    /// Rows defined afterwards with [`SheetDefinition::row`] follow this one.
    pub fn row_at<F>(&mut self, number: u32, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RowDefinition<'_>) -> Result<()>,
    {
        self.sheet.create_row(number)?;
        let mut row = RowDefinition {
            sheet: &mut *self.sheet,
            index: number - 1,
            next_col: 0,
        };
        f(&mut row)?;
        self.next_row = number.saturating_add(1);
        Ok(self)
    }

    /// Leave `count` rows out before the next `row` call
    pub fn skip_rows(&mut self, count: u32) -> &mut Self {
        self.next_row = self.next_row.saturating_add(count);
        self
    }

    /// The sheet being defined
    pub fn worksheet(&self) -> &Worksheet {
        self.sheet
    }
}

/// Definition scope for one row
#[derive(Debug)]
pub struct RowDefinition<'r> {
    sheet: &'r mut Worksheet,
    /// Row index (0-based)
    index: u32,
    /// Column used by the next `cell` call; wider than `u16` so skips past
    /// the last column surface as bounds errors instead of wrapping
    next_col: u32,
}

impl<'r> RowDefinition<'r> {
    /// 1-based number of the row being defined
    pub fn number(&self) -> u32 {
        self.index + 1
    }

    /// Write a value into the next column
    pub fn cell<V: Into<CellValue>>(&mut self, value: V) -> Result<&mut Self> {
        let col = u16::try_from(self.next_col).map_err(|_| {
            Error::ColumnOutOfBounds(self.next_col, self.sheet.max_columns().saturating_sub(1))
        })?;
        self.sheet.set_cell_value_at(self.index, col, value)?;
        self.next_col += 1;
        Ok(self)
    }

    /// Write a value into the column named by `column` (e.g. "C")
    ///
    /// Cells written afterwards with [`RowDefinition::cell`] follow this one.
    pub fn cell_at<V: Into<CellValue>>(&mut self, column: &str, value: V) -> Result<&mut Self> {
        self.next_col = u32::from(CellAddress::letters_to_column(column)?);
        self.cell(value)
    }

    /// Leave `count` cells out before the next `cell` call
    pub fn skip_cells(&mut self, count: u32) -> &mut Self {
        self.next_col = self.next_col.saturating_add(count);
        self
    }
}
