//! Spreadsheet input: table sources and typed row extraction

pub mod csv_source;
pub mod rows;

pub use csv_source::*;
pub use rows::*;
