//! Criteria queries over a workbook
//!
//! A [`Query`] narrows a workbook down sheet by sheet, row by row and cell by
//! cell. Criteria that are never set match everything.

use std::fmt;
use std::ops::RangeInclusive;

use crate::cell::CellRef;
use crate::row::{Row, RowRef};
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;

type RowPredicate<'q> = Box<dyn Fn(&RowRef<'_>) -> bool + 'q>;
type CellPredicate<'q> = Box<dyn Fn(&CellRef<'_>) -> bool + 'q>;

/// Filter describing which rows and cells to collect
#[derive(Default)]
pub struct Query<'q> {
    sheet: Option<String>,
    rows: Option<RangeInclusive<u32>>,
    row_filters: Vec<RowPredicate<'q>>,
    cell_filters: Vec<CellPredicate<'q>>,
}

impl<'q> Query<'q> {
    /// A query matching every cell of every sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the sheet with this name (case-insensitive)
    pub fn sheet<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet = Some(name.into().to_lowercase());
        self
    }

    /// Restrict to rows whose 1-based number lies in `numbers`
    pub fn rows(mut self, numbers: RangeInclusive<u32>) -> Self {
        self.rows = Some(numbers);
        self
    }

    /// Keep only rows matching `predicate`; repeated calls must all match
    pub fn row_where<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RowRef<'_>) -> bool + 'q,
    {
        self.row_filters.push(Box::new(predicate));
        self
    }

    /// Keep only cells matching `predicate`; repeated calls must all match
    pub fn cell_where<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CellRef<'_>) -> bool + 'q,
    {
        self.cell_filters.push(Box::new(predicate));
        self
    }

    /// Rows matching the sheet and row criteria, in sheet then number order
    ///
    /// Cell criteria do not filter rows here; use [`Query::find_cells`] for that.
    pub fn find_rows<'a>(&self, workbook: &'a Workbook) -> Vec<RowRef<'a>> {
        workbook
            .worksheets()
            .filter(|ws| self.matches_sheet(ws))
            .flat_map(|ws| ws.rows())
            .filter(|row| self.matches_row(row))
            .collect()
    }

    /// Cells matching every criterion, in sheet then row-major order
    pub fn find_cells<'a>(&self, workbook: &'a Workbook) -> Vec<CellRef<'a>> {
        self.cells(workbook).collect()
    }

    /// First matching cell, if any
    pub fn first_cell<'a>(&self, workbook: &'a Workbook) -> Option<CellRef<'a>> {
        self.cells(workbook).next()
    }

    fn cells<'a, 's>(
        &'s self,
        workbook: &'a Workbook,
    ) -> Box<dyn Iterator<Item = CellRef<'a>> + 's>
    where
        'a: 's,
    {
        let cells = workbook
            .worksheets()
            .filter(move |ws| self.matches_sheet(ws))
            .flat_map(|ws| ws.rows())
            .filter(move |row| self.matches_row(row))
            .flat_map(|row| row.iter_cells())
            .filter(move |cell| self.cell_filters.iter().all(|f| f(cell)));
        Box::new(cells)
    }

    fn matches_sheet(&self, sheet: &Worksheet) -> bool {
        self.sheet
            .as_deref()
            .map_or(true, |name| sheet.name().to_lowercase() == name)
    }

    fn matches_row(&self, row: &RowRef<'_>) -> bool {
        self.rows
            .as_ref()
            .map_or(true, |range| range.contains(&row.number()))
            && self.row_filters.iter().all(|f| f(row))
    }
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("sheet", &self.sheet)
            .field("rows", &self.rows)
            .field("row_filters", &self.row_filters.len())
            .field("cell_filters", &self.cell_filters.len())
            .finish()
    }
}
