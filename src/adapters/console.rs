//! Terminal presenter
//!
//! Cells are entered as 1-9, row-major from the top left. `q` or end of input
//! quits the session.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::{
    Error, Result,
    ports::{MoveRequest, Presenter},
    tictactoe::{Board, Outcome, Side},
};

/// Line-oriented presenter over any reader/writer pair
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
}

impl ConsolePresenter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePresenter { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write_board(&mut self, board: &Board) -> Result<()> {
        writeln!(self.output, "\n{board}").map_err(write_error)
    }
}

fn write_error(source: io::Error) -> Error {
    Error::Io {
        operation: "write to terminal".to_string(),
        source,
    }
}

/// Parse a 1-9 cell number into a 0-based position
fn parse_cell(line: &str) -> Option<MoveRequest> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Some(MoveRequest::Quit);
    }
    match trimmed.parse::<usize>() {
        Ok(cell @ 1..=9) => Some(MoveRequest::Place(cell - 1)),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Presenter for ConsolePresenter<R, W> {
    fn render(&mut self, board: &Board) -> Result<()> {
        self.write_board(board)
    }

    fn request_move(&mut self, _board: &Board, side: Side) -> Result<MoveRequest> {
        loop {
            write!(self.output, "{side} to move [1-9, q]: ").map_err(write_error)?;
            self.output.flush().map_err(write_error)?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(|source| Error::Io {
                operation: "read from terminal".to_string(),
                source,
            })?;
            if read == 0 {
                return Ok(MoveRequest::Quit);
            }

            match parse_cell(&line) {
                Some(request) => return Ok(request),
                None => writeln!(self.output, "enter a cell number from 1 to 9, or q to quit")
                    .map_err(write_error)?,
            }
        }
    }

    fn rejected(&mut self, error: &Error) -> Result<()> {
        match error {
            Error::InvalidMove { position } => writeln!(
                self.output,
                "cell {} is already taken, choose another",
                position + 1
            ),
            other => writeln!(self.output, "move refused: {other}"),
        }
        .map_err(write_error)
    }

    fn game_over(&mut self, board: &Board, outcome: Outcome) -> Result<()> {
        self.write_board(board)?;
        writeln!(self.output, "{}", outcome.message()).map_err(write_error)
    }
}

/// Presenter for unattended computer-only sessions.
///
/// Rendering is skipped; a move request means a human side was configured
/// without a terminal, which is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessPresenter;

impl Presenter for HeadlessPresenter {
    fn render(&mut self, _board: &Board) -> Result<()> {
        Ok(())
    }

    fn request_move(&mut self, _board: &Board, side: Side) -> Result<MoveRequest> {
        Err(Error::InvalidConfiguration {
            message: format!("{side} are set to human but no terminal is attached"),
        })
    }

    fn rejected(&mut self, _error: &Error) -> Result<()> {
        Ok(())
    }

    fn game_over(&mut self, board: &Board, outcome: Outcome) -> Result<()> {
        log::debug!("{}\n{board}", outcome.message());
        Ok(())
    }
}
