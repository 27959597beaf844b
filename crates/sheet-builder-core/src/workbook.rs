//! Workbook type - the main document structure

use log::debug;

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::{MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

/// A workbook (spreadsheet document)
///
/// A workbook owns one or more worksheets, which in turn own their rows.
#[derive(Debug)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Workbook settings
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create a new workbook with one worksheet
    pub fn new() -> Self {
        let mut wb = Self::empty();
        let name = format!("{}1", wb.settings.sheet_name_prefix);
        wb.worksheets
            .push(Worksheet::with_settings(name, &wb.settings));
        wb
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self::with_settings(WorkbookSettings::default())
    }

    /// Create an empty workbook with the given settings
    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            worksheets: Vec::new(),
            settings,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by exact name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get a mutable worksheet by exact name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by exact name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with a generated name
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name()?;
        self.add_worksheet_with_name(&name)
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        debug!("adding sheet '{}' at index {}", name, index);
        self.worksheets
            .push(Worksheet::with_settings(name, &self.settings));

        Ok(index)
    }

    /// Find a worksheet by name (case-insensitive) or add it
    pub fn get_or_add_worksheet(&mut self, name: &str) -> Result<usize> {
        match self.index_ignore_case(name) {
            Some(index) => Ok(index),
            None => self.add_worksheet_with_name(name),
        }
    }

    /// Remove a worksheet by index
    pub fn remove_worksheet(&mut self, index: usize) -> Result<Worksheet> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        Ok(self.worksheets.remove(index))
    }

    /// Rename a worksheet
    pub fn rename_worksheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }

        self.validate_sheet_name_excluding(new_name, Some(index))?;

        self.worksheets[index].set_name(new_name);
        Ok(())
    }

    /// Get workbook settings
    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    pub(crate) fn index_ignore_case(&self, name: &str) -> Option<usize> {
        let name_lower = name.to_lowercase();
        self.worksheets
            .iter()
            .position(|ws| ws.name().to_lowercase() == name_lower)
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        self.validate_sheet_name_excluding(name, None)
    }

    /// Validate a sheet name, optionally excluding a sheet from duplicate check
    fn validate_sheet_name_excluding(
        &self,
        name: &str,
        exclude_index: Option<usize>,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        match self.index_ignore_case(name) {
            Some(i) if Some(i) != exclude_index => Err(Error::DuplicateSheetName(name.into())),
            _ => Ok(()),
        }
    }

    /// Generate a unique sheet name from the configured prefix
    ///
    /// Only name collisions move on to the next number. Any other rejection
    /// (bad characters in the prefix, or a name grown past the length limit)
    /// cannot be cured by a larger number and is returned.
    fn generate_sheet_name(&self) -> Result<String> {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("{}{}", self.settings.sheet_name_prefix, n);
            match self.validate_sheet_name(&name) {
                Ok(()) => return Ok(name),
                Err(Error::DuplicateSheetName(_)) => n += 1,
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// What a worksheet does when a value is written to an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverwritePolicy {
    /// Last write wins
    #[default]
    Replace,
    /// Fail with [`Error::CellOccupied`]
    Reject,
}

/// Workbook-level settings
///
/// Every worksheet created through the workbook copies the limits and the
/// overwrite policy at creation time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorkbookSettings {
    /// Prefix for generated sheet names ("Sheet" gives Sheet1, Sheet2, ...)
    pub sheet_name_prefix: String,
    /// Maximum number of rows per sheet, capped at [`crate::MAX_ROWS`]
    pub max_rows: u32,
    /// Maximum number of columns per sheet, capped at [`crate::MAX_COLS`]
    pub max_columns: u16,
    /// Overwrite behaviour for occupied cells
    pub overwrite: OverwritePolicy,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            sheet_name_prefix: "Sheet".into(),
            max_rows: MAX_ROWS,
            max_columns: MAX_COLS,
            overwrite: OverwritePolicy::Replace,
        }
    }
}
