//! Table-level query modules
//!
//! Each module contains the `impl` blocks on `Database` for one table.

mod notes;
