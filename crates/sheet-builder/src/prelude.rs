//! Prelude module - common imports for sheet-builder users
//!
//! ```rust
//! use sheet_builder::prelude::*;
//! ```

pub use crate::{
    // Read contracts
    Cell,
    CellAddress,
    // Cell types
    CellValue,
    // Error types
    Error,
    OverwritePolicy,
    // Queries
    Query,
    Result,
    Row,
    Sheet,
    // Main types
    Workbook,
    WorkbookBuilder,
    WorkbookSettings,
    Worksheet,
};
