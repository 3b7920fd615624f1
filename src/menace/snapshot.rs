//! Snapshot of the learned state table
//!
//! A snapshot is the state table together with a counter of how many times it
//! has been saved. The wire form is a MessagePack record whose table is a map
//! from a 9-value cell array to the candidate list. Decoding validates the
//! shape before anything replaces a live table.

use std::{
    collections::{BTreeMap, HashMap},
    io::{Read, Write},
};

use serde::{Deserialize, Serialize};

use super::state_table::StateTable;
use crate::{Error, Result, tictactoe::Configuration};

/// State table plus save counter, persisted as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    save_count: u64,
    table: StateTable,
}

/// Serialized form. Keys are kept as plain vectors so that arity can be checked.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    save_count: u64,
    table: BTreeMap<Vec<i8>, Vec<u8>>,
}

impl Snapshot {
    pub fn new(table: StateTable, save_count: u64) -> Self {
        Snapshot { save_count, table }
    }

    /// Fresh snapshot from full enumeration, never saved
    pub fn build() -> Self {
        Self::new(StateTable::build(), 0)
    }

    pub fn save_count(&self) -> u64 {
        self.save_count
    }

    /// Count one more save. Called right before every write.
    pub fn record_save(&mut self) -> u64 {
        self.save_count += 1;
        self.save_count
    }

    pub fn table(&self) -> &StateTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut StateTable {
        &mut self.table
    }

    fn to_record(&self) -> SnapshotRecord {
        let table = self
            .table
            .iter()
            .map(|(configuration, candidates)| {
                (
                    configuration.values().to_vec(),
                    candidates.iter().map(|&c| c as u8).collect(),
                )
            })
            .collect();

        SnapshotRecord {
            save_count: self.save_count,
            table,
        }
    }

    fn from_record(record: SnapshotRecord) -> Result<Self> {
        let mut entries = HashMap::with_capacity(record.table.len());

        for (key, candidates) in record.table {
            let values: [i8; 9] = key.as_slice().try_into().map_err(|_| corrupt(format!(
                "configuration key has {} cells, expected 9",
                key.len()
            )))?;
            let configuration = Configuration::from_values(values)
                .ok_or_else(|| corrupt(format!("configuration {key:?} has a cell outside -1..=1")))?;

            if configuration.empty_positions().is_empty()
                || !matches!(configuration.mark_balance(), 0 | 1)
            {
                return Err(corrupt(format!(
                    "configuration {configuration} is not a decision point"
                )));
            }
            if candidates.is_empty() {
                return Err(corrupt(format!(
                    "configuration {configuration} has an empty candidate list"
                )));
            }

            let mut list = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                let position = usize::from(candidate);
                if !configuration.is_empty_at(position) {
                    return Err(corrupt(format!(
                        "candidate {position} of configuration {configuration} is not an empty cell"
                    )));
                }
                list.push(position);
            }
            entries.insert(configuration, list);
        }

        Ok(Snapshot {
            save_count: record.save_count,
            table: StateTable::from_entries(entries),
        })
    }

    /// Encode to MessagePack
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        rmp_serde::encode::write(writer, &self.to_record()).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize snapshot to MessagePack".to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Decode from MessagePack, validating every entry
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let record: SnapshotRecord =
            rmp_serde::decode::from_read(reader).map_err(|e| corrupt(e.to_string()))?;
        Self::from_record(record)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }
}

fn corrupt(reason: String) -> Error {
    Error::CorruptSnapshot { reason }
}
