//! Logical units ↔ terminal cells.
//!
//! Interaction logic works in logical units so that the familiar web-sized
//! constants keep their meaning: a column is 8 units wide and a row is
//! 16 units tall (roughly one character cell in a typical terminal font).

pub const CELL_WIDTH_UNITS: f64 = 8.0;
pub const CELL_HEIGHT_UNITS: f64 = 16.0;

pub fn cols_to_units(cols: u16) -> f64 {
    f64::from(cols) * CELL_WIDTH_UNITS
}

pub fn rows_to_units(rows: u16) -> f64 {
    f64::from(rows) * CELL_HEIGHT_UNITS
}

/// Horizontal units → columns (rounded to the nearest cell, may be negative).
pub fn units_to_cols(units: f64) -> i32 {
    (units / CELL_WIDTH_UNITS).round() as i32
}

/// Vertical units → rows (rounded to the nearest cell, may be negative).
pub fn units_to_rows(units: f64) -> i32 {
    (units / CELL_HEIGHT_UNITS).round() as i32
}
