//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* state and turns it into cells on the
//! terminal.  No decoding or I/O happens here.

pub mod back_to_top;
pub mod blit;
pub mod halfblocks;
pub mod layout;
pub mod nav;
pub mod page;
pub mod strip;
pub mod theme;
