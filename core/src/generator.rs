use alloc::collections::BTreeSet;

use rand::Rng;

use crate::{CellCount, Coord, Position};

/// Draws uniformly random positions, retrying on duplicates, until exactly
/// `mine_count` distinct mines exist. `mine_count` must fit the board.
pub(crate) fn place_mines<R: Rng + ?Sized>(
    rng: &mut R,
    size: Coord,
    mine_count: CellCount,
) -> BTreeSet<Position> {
    let mut mines = BTreeSet::new();
    while mines.len() < usize::from(mine_count) {
        let position = Position::new(rng.random_range(0..size), rng.random_range(0..size));
        mines.insert(position);
    }
    mines
}
