//! Learning agent that plays from the state table

use std::collections::HashMap;

use rand::{SeedableRng, rngs::StdRng};

use super::state_table::StateTable;
use crate::{
    Result,
    tictactoe::{Board, Configuration, Standing},
};

/// Computer player that samples moves from a [`StateTable`].
///
/// Every choice made during a game is remembered so that the outcome can be
/// fed back into the table once the game ends.
#[derive(Debug)]
pub struct LearningAgent {
    memory: HashMap<Configuration, usize>,
    rng: StdRng,
}

impl LearningAgent {
    /// Create an agent; `None` seeds from entropy
    pub fn new(seed: Option<u64>) -> Self {
        LearningAgent {
            memory: HashMap::new(),
            rng: seeded_rng(seed),
        }
    }

    /// Sample a move for `board` and remember it for this game.
    ///
    /// A configuration seen twice in one game keeps only the latest choice.
    pub fn choose_move(&mut self, table: &StateTable, board: &Board) -> Result<usize> {
        let configuration = board.configuration();
        let position = table.sample(&configuration, &mut self.rng)?;
        self.memory.insert(configuration, position);
        Ok(position)
    }

    /// Choices recorded so far in the current game
    pub fn memory(&self) -> &HashMap<Configuration, usize> {
        &self.memory
    }

    pub fn apply_win(&mut self, table: &mut StateTable) -> Result<()> {
        self.apply(table, StateTable::reinforce_win)
    }

    pub fn apply_loss(&mut self, table: &mut StateTable) -> Result<()> {
        self.apply(table, StateTable::reinforce_loss)
    }

    pub fn apply_draw(&mut self, table: &mut StateTable) -> Result<()> {
        self.apply(table, StateTable::reinforce_draw)
    }

    /// Dispatch to the matching feedback for a finished game
    pub fn apply_standing(&mut self, table: &mut StateTable, standing: Standing) -> Result<()> {
        match standing {
            Standing::Won => self.apply_win(table),
            Standing::Lost => self.apply_loss(table),
            Standing::Drawn => self.apply_draw(table),
        }
    }

    /// Forget the current game without touching the table
    pub fn forget(&mut self) {
        self.memory.clear();
    }

    /// All recorded pairs are checked before the first update, so an error
    /// leaves the table untouched.
    fn apply(
        &mut self,
        table: &mut StateTable,
        reinforce: fn(&mut StateTable, &Configuration, usize) -> Result<()>,
    ) -> Result<()> {
        // Memory is cleared even if validation fails
        let played = std::mem::take(&mut self.memory);
        for (configuration, position) in &played {
            table.check_move(configuration, *position)?;
        }
        for (configuration, position) in &played {
            reinforce(table, configuration, *position)?;
        }
        Ok(())
    }
}

impl Default for LearningAgent {
    fn default() -> Self {
        Self::new(None)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Referee, Side};

    #[test]
    fn test_choose_move_records_memory() {
        let table = StateTable::build();
        let mut agent = LearningAgent::new(Some(42));
        let board = Board::new();

        let position = agent.choose_move(&table, &board).unwrap();
        assert!(position < 9);
        assert_eq!(agent.memory().get(&board.configuration()), Some(&position));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let table = StateTable::build();
        let board = Board::new();
        let mut a = LearningAgent::new(Some(9));
        let mut b = LearningAgent::new(Some(9));
        for _ in 0..20 {
            assert_eq!(
                a.choose_move(&table, &board).unwrap(),
                b.choose_move(&table, &board).unwrap()
            );
        }
    }

    #[test]
    fn test_apply_win_reinforces_and_clears() {
        let mut table = StateTable::build();
        let mut agent = LearningAgent::new(Some(1));
        let mut board = Board::new();
        let mut referee = Referee::new();

        let first = agent.choose_move(&table, &board).unwrap();
        let opening = board.configuration();
        referee.apply_move(&mut board, first).unwrap();
        assert_eq!(referee.turn(), Side::Naught);

        agent.apply_win(&mut table).unwrap();
        assert!(agent.memory().is_empty());
        assert_eq!(table.weight_of(&opening, first).unwrap(), 4);
    }

    #[test]
    fn test_apply_loss_never_empties_list() {
        let mut table = StateTable::build();
        let mut agent = LearningAgent::new(Some(3));
        let board = Board::from_configuration("XOXOXOXO.".parse().unwrap());

        for _ in 0..5 {
            let position = agent.choose_move(&table, &board).unwrap();
            assert_eq!(position, 8);
            agent.apply_loss(&mut table).unwrap();
            assert_eq!(
                table.lookup_candidates(&board.configuration()).unwrap(),
                &[8]
            );
        }
    }

    #[test]
    fn test_invalid_memory_leaves_table_untouched() {
        let mut table = StateTable::build();
        let before = table.clone();
        let mut agent = LearningAgent::new(Some(8));

        agent.choose_move(&table, &Board::new()).unwrap();
        // Naughts ahead: never a table key
        agent.memory.insert("O........".parse().unwrap(), 4);

        assert!(matches!(
            agent.apply_win(&mut table),
            Err(crate::Error::UnknownConfiguration { .. })
        ));
        assert_eq!(table, before);
        assert!(agent.memory().is_empty());
    }

    #[test]
    fn test_apply_draw_adds_one_copy() {
        let mut table = StateTable::build();
        let mut agent = LearningAgent::new(Some(5));
        let board = Board::new();

        let position = agent.choose_move(&table, &board).unwrap();
        agent.apply_standing(&mut table, Standing::Drawn).unwrap();
        assert_eq!(table.weight_of(&Board::new().configuration(), position).unwrap(), 2);
    }
}
