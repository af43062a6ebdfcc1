//! Core interaction logic – scroll containers, the image strip, the
//! back-to-top toggle, page content and screenshot loading.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Geometry is expressed in logical units (see [`units`]).

pub mod images;
pub mod portfolio;
pub mod scroll;
pub mod strip;
pub mod units;
pub mod visibility;
