use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::{domain::EntityKind, error::Rejection, protocol::Command};
use tracing::{debug, warn};
use uuid::Uuid;

mod seed;
mod snapshot;

pub use seed::seed_snapshot;
pub use snapshot::Snapshot;

/// How fresh identifiers are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Kind prefix followed by a per-kind counter (`ct4`, `ct5`, ...).
    Sequential,
    /// Kind prefix followed by a v4 UUID in simple form.
    #[default]
    Random,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(IdStrategy::Sequential),
            "random" | "uuid" => Ok(IdStrategy::Random),
            other => Err(format!(
                "unknown id strategy '{other}', expected 'sequential' or 'random'"
            )),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Sequential => f.write_str("sequential"),
            IdStrategy::Random => f.write_str("random"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    counters: HashMap<EntityKind, u64>,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            counters: HashMap::new(),
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Returns an id for `kind` that is not present in `taken`.
    ///
    /// Sequential counters only move forward, so an id is never handed out
    /// twice even after the entity holding it is deleted.
    pub fn next(&mut self, kind: EntityKind, taken: &Snapshot) -> String {
        let prefix = kind.id_prefix();
        loop {
            let candidate = match self.strategy {
                IdStrategy::Sequential => {
                    let counter = self.counters.entry(kind).or_insert(0);
                    *counter += 1;
                    format!("{prefix}{counter}")
                }
                IdStrategy::Random => format!("{prefix}{}", Uuid::new_v4().simple()),
            };
            if !taken.contains_id(kind, &candidate) {
                return candidate;
            }
        }
    }
}

/// Owner of the canonical snapshot.
///
/// All mutation goes through [`Storage::dispatch`] or
/// [`Storage::dispatch_all`]; each call either applies completely or leaves
/// the snapshot untouched.
#[derive(Debug, Clone)]
pub struct Storage {
    snapshot: Snapshot,
    ids: IdGenerator,
    revision: u64,
}

impl Storage {
    pub fn new(snapshot: Snapshot, strategy: IdStrategy) -> Self {
        Self {
            snapshot,
            ids: IdGenerator::new(strategy),
            revision: 0,
        }
    }

    pub fn empty(strategy: IdStrategy) -> Self {
        Self::new(Snapshot::default(), strategy)
    }

    pub fn seeded(strategy: IdStrategy) -> Self {
        Self::new(seed_snapshot(), strategy)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of commands applied since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.ids.strategy()
    }

    pub fn next_id(&mut self, kind: EntityKind) -> String {
        self.ids.next(kind, &self.snapshot)
    }

    pub fn dispatch(&mut self, command: Command) -> Result<(), Rejection> {
        let name = command.name();
        match self.snapshot.apply(command) {
            Ok(next) => {
                self.snapshot = next;
                self.revision += 1;
                debug!(command = name, revision = self.revision, "applied command");
                Ok(())
            }
            Err(rejection) => {
                warn!(
                    command = name,
                    dependents = rejection.dependents(),
                    "rejected command: {rejection}"
                );
                Err(rejection)
            }
        }
    }

    /// Applies `commands` in order as one unit. If any command is rejected
    /// none of them take effect.
    pub fn dispatch_all(&mut self, commands: Vec<Command>) -> Result<(), Rejection> {
        let mut working = self.snapshot.clone();
        let count = commands.len() as u64;
        for command in commands {
            let name = command.name();
            working = working.apply(command).map_err(|rejection| {
                warn!(command = name, "rejected batch: {rejection}");
                rejection
            })?;
        }
        self.snapshot = working;
        self.revision += count;
        debug!(commands = count, revision = self.revision, "applied batch");
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::seeded(IdStrategy::default())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
