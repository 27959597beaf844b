//! # sheet-builder
//!
//! A Rust library for building spreadsheets and reading them back.
//!
//! Workbooks are assembled with a closure-driven builder and inspected through
//! three small read-only contracts:
//!
//! - [`Row`] - a row's number, its owning sheet and its cells
//! - [`Sheet`] - a named container of rows
//! - [`Cell`] - a value at a column of a row
//!
//! ## Example
//!
//! ```rust
//! use sheet_builder::prelude::*;
//!
//! let workbook = WorkbookBuilder::new()
//!     .build(|w| {
//!         w.sheet("Orders", |s| {
//!             s.row(|r| {
//!                 r.cell("Item")?.cell("Qty")?;
//!                 Ok(())
//!             })?;
//!             s.row(|r| {
//!                 r.cell("Widget")?.cell(3)?;
//!                 Ok(())
//!             })?;
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let sheet = workbook.worksheet_by_name("Orders").unwrap();
//! let row = sheet.row(2).unwrap();
//! assert_eq!(row.sheet().name(), "Orders");
//! assert_eq!(row.cells()[1].value().as_number(), Some(3.0));
//!
//! // Neighbouring rows are looked up through the sheet
//! let header = row.sheet().row(row.number() - 1).unwrap();
//! assert_eq!(header.cells()[0].value().as_string(), Some("Item"));
//! ```

pub mod prelude;

// Re-export core types
pub use sheet_builder_core::{
    // Read contracts
    Cell,
    // Cell types
    CellAddress,
    CellRef,
    CellValue,
    // Error types
    Error,
    OverwritePolicy,
    // Queries
    Query,
    Result,
    Row,
    // Builder
    RowDefinition,
    RowEntry,
    RowRef,
    SharedString,
    Sheet,
    SheetDefinition,
    StringPool,
    // Main types
    Workbook,
    WorkbookBuilder,
    WorkbookDefinition,
    WorkbookSettings,
    Worksheet,

    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};
