//! Exhaustive state table with repetition-weighted candidate lists

use std::collections::HashMap;

use rand::{Rng, prelude::IndexedRandom};

use crate::{
    Error, Result,
    tictactoe::{Cell, Configuration},
};

/// Copies of a move appended after a win
pub const WIN_COPIES: usize = 3;

/// Copies of a move appended after a draw
pub const DRAW_COPIES: usize = 1;

/// Number of entries produced by [`StateTable::build`]
pub const ENUMERATED_ENTRIES: usize = 5920;

/// Mapping from configuration to candidate move list.
///
/// A move index may appear several times in a list; each copy is one unit of
/// weight and sampling is uniform over the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateTable {
    entries: HashMap<Configuration, Vec<usize>>,
}

/// Summary numbers for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub entries: usize,
    pub total_weight: usize,
    pub trained_entries: usize,
}

impl StateTable {
    /// Enumerate every assignment of the nine cells and keep the decision points.
    ///
    /// Full boards are skipped, and only configurations where crosses lead
    /// naughts by zero or one mark are kept. Each entry starts with every
    /// empty index exactly once.
    pub fn build() -> Self {
        const VALUES: [i8; 3] = [0, -1, 1];

        let mut entries = HashMap::with_capacity(ENUMERATED_ENTRIES);
        for code in 0..3usize.pow(9) {
            let mut values = [0i8; 9];
            let mut rest = code;
            for value in values.iter_mut().rev() {
                *value = VALUES[rest % 3];
                rest /= 3;
            }

            let Some(configuration) = Configuration::from_values(values) else {
                continue;
            };
            if configuration.count(Cell::Empty) == 0 {
                continue;
            }
            if matches!(configuration.mark_balance(), 0 | 1) {
                entries.insert(configuration, configuration.empty_positions());
            }
        }

        log::debug!("enumerated {} configurations", entries.len());
        StateTable { entries }
    }

    pub(crate) fn from_entries(entries: HashMap<Configuration, Vec<usize>>) -> Self {
        StateTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, configuration: &Configuration) -> bool {
        self.entries.contains_key(configuration)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Configuration, &[usize])> {
        self.entries
            .iter()
            .map(|(configuration, candidates)| (configuration, candidates.as_slice()))
    }

    /// Current candidate list for a configuration
    pub fn lookup_candidates(&self, configuration: &Configuration) -> Result<&[usize]> {
        self.entries
            .get(configuration)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownConfiguration {
                configuration: *configuration,
            })
    }

    /// Pick one entry of the candidate list uniformly at random
    pub fn sample(&self, configuration: &Configuration, rng: &mut impl Rng) -> Result<usize> {
        let candidates = self.lookup_candidates(configuration)?;
        candidates
            .choose(rng)
            .copied()
            .ok_or(Error::UnknownConfiguration {
                configuration: *configuration,
            })
    }

    /// Number of copies of `position` in the candidate list
    pub fn weight_of(&self, configuration: &Configuration, position: usize) -> Result<usize> {
        Ok(self
            .lookup_candidates(configuration)?
            .iter()
            .filter(|&&candidate| candidate == position)
            .count())
    }

    /// Whether `position` may be reinforced under `configuration`
    pub(crate) fn check_move(&self, configuration: &Configuration, position: usize) -> Result<()> {
        if !self.entries.contains_key(configuration) {
            return Err(Error::UnknownConfiguration {
                configuration: *configuration,
            });
        }
        if position >= 9 {
            return Err(Error::InvalidPosition { position });
        }
        if !configuration.is_empty_at(position) {
            return Err(Error::InvalidMove { position });
        }
        Ok(())
    }

    fn candidates_mut(
        &mut self,
        configuration: &Configuration,
        position: usize,
    ) -> Result<&mut Vec<usize>> {
        self.check_move(configuration, position)?;
        self.entries
            .get_mut(configuration)
            .ok_or(Error::UnknownConfiguration {
                configuration: *configuration,
            })
    }

    /// Append three more copies of `position`
    pub fn reinforce_win(&mut self, configuration: &Configuration, position: usize) -> Result<()> {
        let candidates = self.candidates_mut(configuration, position)?;
        candidates.extend(std::iter::repeat_n(position, WIN_COPIES));
        Ok(())
    }

    /// Remove one copy of `position`, resetting to uniform if the list empties
    pub fn reinforce_loss(&mut self, configuration: &Configuration, position: usize) -> Result<()> {
        let candidates = self.candidates_mut(configuration, position)?;
        if let Some(index) = candidates.iter().position(|&c| c == position) {
            candidates.remove(index);
        }
        if candidates.is_empty() {
            *candidates = configuration.empty_positions();
        }
        Ok(())
    }

    /// Append one more copy of `position`
    pub fn reinforce_draw(&mut self, configuration: &Configuration, position: usize) -> Result<()> {
        let candidates = self.candidates_mut(configuration, position)?;
        candidates.extend(std::iter::repeat_n(position, DRAW_COPIES));
        Ok(())
    }

    pub fn stats(&self) -> TableStats {
        let mut total_weight = 0;
        let mut trained_entries = 0;
        for (configuration, candidates) in &self.entries {
            total_weight += candidates.len();
            if *candidates != configuration.empty_positions() {
                trained_entries += 1;
            }
        }

        TableStats {
            entries: self.entries.len(),
            total_weight,
            trained_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn config(s: &str) -> Configuration {
        s.parse().unwrap()
    }

    #[test]
    fn test_build_entry_count() {
        let table = StateTable::build();
        assert_eq!(table.len(), ENUMERATED_ENTRIES);
    }

    #[test]
    fn test_build_filter() {
        let table = StateTable::build();
        assert!(table.contains(&config(".........")));
        assert!(table.contains(&config("X........")));
        assert!(table.contains(&config("XO.......")));
        // Naughts ahead, crosses two ahead, and a full board are all excluded
        assert!(!table.contains(&config("O........")));
        assert!(!table.contains(&config("XX.......")));
        assert!(!table.contains(&config("XOXXOOOXX")));
    }

    #[test]
    fn test_initial_lists_are_uniform() {
        let table = StateTable::build();
        for (configuration, candidates) in table.iter() {
            assert_eq!(candidates, configuration.empty_positions().as_slice());
        }
        assert_eq!(table.stats().trained_entries, 0);
    }

    #[test]
    fn test_reinforce_win_adds_three() {
        let mut table = StateTable::build();
        let c = config("X...O....");
        table.reinforce_win(&c, 8).unwrap();
        assert_eq!(table.weight_of(&c, 8).unwrap(), 4);
        assert_eq!(table.lookup_candidates(&c).unwrap().len(), 7 + WIN_COPIES);
    }

    #[test]
    fn test_reinforce_draw_adds_one() {
        let mut table = StateTable::build();
        let c = config("X...O....");
        table.reinforce_draw(&c, 1).unwrap();
        assert_eq!(table.weight_of(&c, 1).unwrap(), 2);
    }

    #[test]
    fn test_reinforce_loss_removes_first_copy() {
        let mut table = StateTable::build();
        let c = config(".........");
        table.reinforce_win(&c, 4).unwrap();
        table.reinforce_loss(&c, 4).unwrap();
        assert_eq!(table.weight_of(&c, 4).unwrap(), 3);
        // First occurrence (the initial slot) is the one removed
        assert_eq!(
            table.lookup_candidates(&c).unwrap(),
            &[0, 1, 2, 3, 5, 6, 7, 8, 4, 4, 4]
        );
    }

    #[test]
    fn test_reinforce_loss_resets_exhausted_list() {
        let mut table = StateTable::build();
        let c = config("XOXOXO...");
        for position in [6, 7, 8] {
            table.reinforce_loss(&c, position).unwrap();
        }
        assert_eq!(table.lookup_candidates(&c).unwrap(), &[6, 7, 8]);
    }

    #[test]
    fn test_reinforce_rejects_occupied_cell() {
        let mut table = StateTable::build();
        let c = config("X........");
        assert!(matches!(
            table.reinforce_win(&c, 0),
            Err(Error::InvalidMove { position: 0 })
        ));
        assert_eq!(table.weight_of(&c, 0).unwrap(), 0);
    }

    #[test]
    fn test_unknown_configuration() {
        let mut table = StateTable::build();
        let c = config("OO.......");
        assert!(matches!(
            table.lookup_candidates(&c),
            Err(Error::UnknownConfiguration { .. })
        ));
        assert!(table.reinforce_draw(&c, 2).is_err());
    }

    #[test]
    fn test_sample_returns_candidate() {
        let table = StateTable::build();
        let mut rng = StdRng::seed_from_u64(7);
        let c = config("XO.X.O...");
        for _ in 0..50 {
            let position = table.sample(&c, &mut rng).unwrap();
            assert!(c.is_empty_at(position));
        }
    }
}
