#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use error::*;
pub use position::*;
pub use state::*;

mod board;
mod cell;
mod error;
mod generator;
mod position;
mod state;

/// Single coordinate axis used for board size and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;
