use std::io::{self, BufRead, Write};

use minefield_core::{Board, CellCount, Coord, GameState, MAX_SIZE, MIN_SIZE, Position, max_mine_count};
use rand::Rng;
use tracing::debug;

use crate::input::{self, ParsePositionError};

/// Options carried in from the command line; anything absent (or out of
/// range) is prompted for.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameOptions {
    pub size: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

/// The interactive prompt loop. Generic over its streams so tests can
/// script a whole session.
pub struct Game<R, W> {
    input: R,
    output: W,
    options: GameOptions,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(input: R, output: W, options: GameOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    /// Plays games until the player declines to continue.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Minesweeper!")?;
        writeln!(self.output)?;

        loop {
            self.play_one_game()?;
            if !self.prompt_play_again()? {
                break;
            }
        }
        Ok(())
    }

    fn play_one_game(&mut self) -> io::Result<()> {
        let size = self.pick_size()?;
        let mines = self.pick_mine_count(max_mine_count(size))?;
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        debug!(size, mines, seed, "starting game");

        let mut board = match Board::from_seed(size, mines, seed) {
            Ok(board) => board,
            Err(err) => {
                writeln!(self.output, "Could not create board: {err}")?;
                return Ok(());
            }
        };

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Here is your minefield:")?;
            writeln!(self.output, "{board}")?;

            let position = self.prompt_position(size)?;
            board = board.reveal(position);

            if board.game_state() == GameState::InProgress {
                let cell = board.cell(position);
                writeln!(
                    self.output,
                    "This square contains {} adjacent mines.",
                    cell.adjacent_mines()
                )?;
            }

            if board.game_state().is_game_over() {
                break;
            }
        }

        writeln!(self.output)?;
        writeln!(self.output, "Final board:")?;
        writeln!(self.output, "{board}")?;

        match board.game_state() {
            GameState::Won => writeln!(self.output, "Congratulations! You've won the game!")?,
            GameState::Lost => writeln!(self.output, "Oh no, you detonated a mine! Game over.")?,
            GameState::InProgress => {}
        }
        Ok(())
    }

    fn pick_size(&mut self) -> io::Result<Coord> {
        if let Some(size) = self.options.size {
            if (MIN_SIZE..=MAX_SIZE).contains(&size) {
                return Ok(size);
            }
            writeln!(self.output, "Size must be between 2 and 26.")?;
            self.options.size = None;
        }
        self.prompt_grid_size()
    }

    fn pick_mine_count(&mut self, max: CellCount) -> io::Result<CellCount> {
        if let Some(mines) = self.options.mines {
            if (1..=max).contains(&mines) {
                return Ok(mines);
            }
            writeln!(self.output, "Mine count must be between 1 and {max}.")?;
            self.options.mines = None;
        }
        self.prompt_mine_count(max)
    }

    fn prompt_grid_size(&mut self) -> io::Result<Coord> {
        loop {
            write!(self.output, "Enter the size of the grid (2-26): ")?;
            self.output.flush()?;

            match self.read_line()?.trim().parse::<Coord>() {
                Ok(size) if (MIN_SIZE..=MAX_SIZE).contains(&size) => return Ok(size),
                Ok(_) => writeln!(self.output, "Size must be between 2 and 26.")?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn prompt_mine_count(&mut self, max: CellCount) -> io::Result<CellCount> {
        loop {
            write!(self.output, "Enter the number of mines (1-{max}): ")?;
            self.output.flush()?;

            match self.read_line()?.trim().parse::<CellCount>() {
                Ok(mines) if (1..=max).contains(&mines) => return Ok(mines),
                Ok(_) => writeln!(self.output, "Mine count must be between 1 and {max}.")?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn prompt_position(&mut self, size: Coord) -> io::Result<Position> {
        loop {
            write!(self.output, "Enter position to reveal (e.g., A1): ")?;
            self.output.flush()?;

            match input::parse_position(&self.read_line()?, size) {
                Ok(position) => return Ok(position),
                Err(ParsePositionError::Pattern) => writeln!(
                    self.output,
                    "Invalid position format. Use letter followed by number (e.g., A1)"
                )?,
                Err(err) => writeln!(self.output, "Invalid position: {err}")?,
            }
        }
    }

    fn prompt_play_again(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output)?;
            write!(self.output, "Would you like to play again? (y/n): ")?;
            self.output.flush()?;

            match self.read_line()?.trim().to_ascii_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => writeln!(self.output, "Please enter 'y' or 'n'")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    // A 2x2 board takes one mine at most, so any game ends within three
    // reveals; the trailing lines absorb whatever the play-again prompt
    // consumes first.
    const FULL_GAME: [&str; 10] = ["2", "1", "A1", "B2", "A2", "B1", "n", "n", "n", "n"];

    fn run_scripted<S: AsRef<str>>(lines: &[S], options: GameOptions) -> String {
        let script = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n")
            + "\n";
        let mut output = Vec::new();
        Game::new(Cursor::new(script), &mut output, options)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn scripted_game_runs_to_a_terminal_state() {
        let output = run_scripted(&FULL_GAME, GameOptions::default());

        assert!(output.contains("Welcome to Minesweeper!"));
        assert!(output.contains("Here is your minefield:"));
        assert!(output.contains("Final board:"));
        assert!(
            output.contains("Congratulations! You've won the game!")
                || output.contains("Oh no, you detonated a mine! Game over.")
        );
    }

    #[test]
    fn prompts_reject_and_reprompt_on_invalid_input() {
        let mut lines = vec!["abc", "1", "27", "2", "0", "5", "1", "11", "Z9"];
        lines.extend(["A1", "B2", "A2", "B1", "n", "n", "n", "n"]);

        let output = run_scripted(&lines, GameOptions::default());

        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Size must be between 2 and 26."));
        assert!(output.contains("Mine count must be between 1 and 1."));
        assert!(output.contains("Invalid position format. Use letter followed by number (e.g., A1)"));
        assert!(output.contains("Invalid position: position out of bounds"));
    }

    #[test]
    fn command_line_options_skip_the_prompts() {
        let options = GameOptions {
            size: Some(2),
            mines: Some(1),
            seed: Some(7),
        };
        let lines = ["A1", "B2", "A2", "B1", "n", "n", "n", "n"];

        let output = run_scripted(&lines, options);

        assert!(!output.contains("Enter the size of the grid"));
        assert!(!output.contains("Enter the number of mines"));
        assert!(output.contains("Here is your minefield:"));
    }

    #[test]
    fn out_of_range_options_fall_back_to_prompting() {
        let options = GameOptions {
            size: Some(99),
            mines: None,
            seed: Some(7),
        };

        let output = run_scripted(&FULL_GAME, options);

        assert!(output.contains("Size must be between 2 and 26."));
        assert!(output.contains("Enter the size of the grid (2-26): "));
    }

    #[test]
    fn fixed_seed_renders_the_same_session_twice() {
        let options = GameOptions {
            size: Some(5),
            mines: Some(5),
            seed: Some(1234),
        };
        // revealing every cell in order always reaches a terminal state;
        // the play-again prompt chews through whatever is left over
        let mut lines: Vec<String> = Vec::new();
        for row in ["A", "B", "C", "D", "E"] {
            for col in 1..=5 {
                lines.push(format!("{row}{col}"));
            }
        }
        lines.push("n".into());

        let first = run_scripted(&lines, options);
        let second = run_scripted(&lines, options);

        assert_eq!(first, second);
    }
}
