use alloc::collections::{BTreeSet, VecDeque};
use core::fmt;

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::generator;
use crate::{Cell, CellCount, Coord, GameError, GameState, Position, Result};

pub const MIN_SIZE: Coord = 2;
// rows are labeled A-Z
pub const MAX_SIZE: Coord = 26;

/// Upper bound on mines for a given board size: 35% of the cells, rounded
/// down.
pub const fn max_mine_count(size: Coord) -> CellCount {
    (size as u32 * size as u32 * 35 / 100) as CellCount
}

/// A board snapshot: the full grid, plus the game outcome derived from it.
///
/// Boards are immutable-by-replacement. [`Board::reveal`] hands back either
/// an equal board (no-op cases) or a new snapshot; the receiver is never
/// touched, so earlier snapshots stay valid across turns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: Coord,
    grid: Array2<Cell>,
    state: GameState,
}

impl Board {
    /// Creates a board with `mine_count` mines placed uniformly at random.
    ///
    /// The randomness source is injected so callers can fix the layout;
    /// [`Board::from_seed`] is the seeded convenience for production use.
    pub fn create<R: Rng + ?Sized>(size: Coord, mine_count: CellCount, rng: &mut R) -> Result<Self> {
        Self::validate_size(size)?;

        let max = max_mine_count(size);
        if mine_count < 1 || mine_count > max {
            return Err(GameError::InvalidMineCount {
                requested: mine_count,
                max,
            });
        }

        let mines = generator::place_mines(rng, size, mine_count);
        Ok(Self::build(size, &mines))
    }

    /// Creates a randomly mined board from a seed, for reproducible games.
    pub fn from_seed(size: Coord, mine_count: CellCount, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::create(size, mine_count, &mut rng)
    }

    /// Creates a board with mines at exactly the given positions.
    ///
    /// Duplicates collapse and an empty layout is allowed; this is the
    /// deterministic entry point for tests and tooling, not the validated
    /// gameplay constructor.
    pub fn with_mine_positions(size: Coord, mines: &[Position]) -> Result<Self> {
        Self::validate_size(size)?;

        let mut layout = BTreeSet::new();
        for &position in mines {
            if !position.is_valid(size) {
                return Err(GameError::InvalidPosition);
            }
            layout.insert(position);
        }

        Ok(Self::build(size, &layout))
    }

    const fn validate_size(size: Coord) -> Result<()> {
        if size < MIN_SIZE || size > MAX_SIZE {
            Err(GameError::InvalidSize(size))
        } else {
            Ok(())
        }
    }

    /// Builds the initial grid: adjacency counts are fixed here, once the
    /// full mine layout is known.
    fn build(size: Coord, mines: &BTreeSet<Position>) -> Self {
        let dim = usize::from(size);
        let grid = Array2::from_shape_fn((dim, dim), |(row, col)| {
            let position = Position::new(row as Coord, col as Coord);
            let adjacent_mines = position
                .adjacent_positions(size)
                .filter(|neighbor| mines.contains(neighbor))
                .count() as u8;
            Cell::new(position, mines.contains(&position), adjacent_mines)
        });

        log::debug!("generated {size}x{size} board with {} mines", mines.len());

        Self {
            size,
            grid,
            state: GameState::InProgress,
        }
    }

    /// Reveals the cell at `position`, returning the next board snapshot.
    ///
    /// Total: an out-of-bounds position, an already-revealed cell, or a
    /// finished game all return a board equal to the receiver. Revealing a
    /// mine loses; revealing a zero-adjacency cell opens its whole region.
    pub fn reveal(&self, position: Position) -> Self {
        if !position.is_valid(self.size) || self.state.is_game_over() {
            return self.clone();
        }

        let target = self.grid[position.nd_index()];
        if target.is_revealed() {
            return self.clone();
        }

        let mut grid = self.grid.clone();
        grid[position.nd_index()] = target.reveal();

        if target.is_mine() {
            log::debug!("mine revealed at {position:?}, game lost");
            return Self {
                size: self.size,
                grid,
                state: GameState::Lost,
            };
        }

        if target.adjacent_mines() == 0 {
            Self::expand_zero_region(&mut grid, self.size, position);
        }

        let state = if Self::all_safe_revealed(&grid) {
            log::debug!("all safe cells revealed, game won");
            GameState::Won
        } else {
            GameState::InProgress
        };

        Self {
            size: self.size,
            grid,
            state,
        }
    }

    /// Breadth-first expansion from a zero-adjacency cell: zero neighbors
    /// are enqueued for further expansion, numbered neighbors are revealed
    /// but not expanded. Explicit work list, each position enqueued at most
    /// once.
    fn expand_zero_region(grid: &mut Array2<Cell>, size: Coord, origin: Position) {
        let mut visited = BTreeSet::from([origin]);
        let mut frontier = VecDeque::from([origin]);

        while let Some(current) = frontier.pop_front() {
            for neighbor in current.adjacent_positions(size) {
                if !visited.insert(neighbor) {
                    continue;
                }

                let cell = grid[neighbor.nd_index()];
                if cell.is_revealed() || cell.is_mine() {
                    continue;
                }

                grid[neighbor.nd_index()] = cell.reveal();
                if cell.adjacent_mines() == 0 {
                    frontier.push_back(neighbor);
                }
            }
        }
    }

    fn all_safe_revealed(grid: &Array2<Cell>) -> bool {
        grid.iter().all(|cell| cell.is_mine() || cell.is_revealed())
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn game_state(&self) -> GameState {
        self.state
    }

    /// The cell at `position`, which must be in bounds.
    pub fn cell(&self, position: Position) -> Cell {
        self.grid[position.nd_index()]
    }

    pub fn mine_count(&self) -> CellCount {
        self.grid.iter().filter(|cell| cell.is_mine()).count() as CellCount
    }
}

/// Renders the grid the way the console shell prints it: a header row of
/// 1-based column numbers, then one lettered row per board row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("  ")?;
        for col in 1..=usize::from(self.size) {
            write!(f, "{col} ")?;
        }
        writeln!(f)?;

        for row in 0..self.size {
            write!(f, "{} ", (b'A' + row) as char)?;
            for col in 0..self.size {
                let cell = self.grid[[usize::from(row), usize::from(col)]];
                write!(f, "{} ", cell.display_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
