//! # sheet-builder-core
//!
//! Core data structures for the sheet-builder spreadsheet library.
//!
//! This crate provides the fundamental types used throughout sheet-builder:
//! - [`Row`], [`Sheet`], [`Cell`] - Read-only contracts over built spreadsheets
//! - [`Workbook`], [`Worksheet`] - The owning document structures
//! - [`WorkbookBuilder`] - Closure-driven construction, sheet by sheet and row by row
//! - [`Query`] - Criteria lookups across sheets, rows and cells
//! - [`CellValue`] and [`CellAddress`] - Cell contents and A1 addressing
//!
//! ## Example
//!
//! ```rust
//! use sheet_builder_core::{Cell, Row, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value("B1", 42.0).unwrap();
//!
//! let row = sheet.row(1).unwrap();
//! assert_eq!(row.number(), 1);
//! assert_eq!(row.sheet().name(), "Sheet1");
//! assert_eq!(row.cells()[1].value().as_number(), Some(42.0));
//! ```

pub mod builder;
pub mod cell;
pub mod error;
pub mod query;
pub mod row;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use builder::{RowDefinition, SheetDefinition, WorkbookBuilder, WorkbookDefinition};
pub use cell::{Cell, CellAddress, CellRef, CellValue, SharedString, StringPool};
pub use error::{Error, Result};
pub use query::Query;
pub use row::{Row, RowEntry, RowRef};
pub use workbook::{OverwritePolicy, Workbook, WorkbookSettings};
pub use worksheet::{Sheet, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
