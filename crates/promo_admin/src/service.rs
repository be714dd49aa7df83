//! Admin service - operator commands over the participant store

use crate::error::Result;
use crate::operator::OperatorGate;
use crate::render::{render_mobile, render_table};
use promo_core::{ParticipantRecord, ParticipantStore, UserId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountOutcome {
    /// Nobody has registered yet.
    Empty,
    Total(usize),
}

/// Both renderings of the same ordered participant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingExport {
    pub table: String,
    pub mobile: String,
    pub participants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The log has never been written or was cleared.
    NoList,
    /// The log exists but holds no participants.
    Empty,
    Exported(ListingExport),
}

/// What `remove` should delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    All,
    /// Records whose serialized line contains this text.
    Matching(String),
}

impl RemoveTarget {
    /// Parse a command argument; `all` in any case clears the store.
    ///
    /// The argument is upper-cased, as codes are.
    pub fn parse(argument: &str) -> Option<Self> {
        let target = argument.trim().to_uppercase();
        if target.is_empty() {
            None
        } else if target == "ALL" {
            Some(Self::All)
        } else {
            Some(Self::Matching(target))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No target was given.
    Usage,
    /// There was no log to remove from.
    NoList,
    AllRemoved,
    Removed(String),
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinnerOutcome {
    NoList,
    Empty,
    Drawn(ParticipantRecord),
}

/// Admin Service - count, list, remove and draw
pub struct AdminService {
    store: Arc<dyn ParticipantStore>,
    gate: OperatorGate,
}

impl AdminService {
    pub fn new(store: Arc<dyn ParticipantStore>, gate: OperatorGate) -> Self {
        Self { store, gate }
    }

    pub fn gate(&self) -> &OperatorGate {
        &self.gate
    }

    /// Number of participants. Open to everyone.
    pub async fn count(&self) -> Result<CountOutcome> {
        let total = self.store.count().await?;
        Ok(if total == 0 {
            CountOutcome::Empty
        } else {
            CountOutcome::Total(total)
        })
    }

    /// Render the participant list as a table and as a phone-friendly list.
    pub async fn list(&self, caller: &UserId) -> Result<ListOutcome> {
        self.gate.check(caller)?;

        let Some(records) = self.store.load().await? else {
            return Ok(ListOutcome::NoList);
        };
        if records.is_empty() {
            return Ok(ListOutcome::Empty);
        }

        tracing::info!(participants = records.len(), "Participant list exported");
        Ok(ListOutcome::Exported(ListingExport {
            table: render_table(&records),
            mobile: render_mobile(&records),
            participants: records.len(),
        }))
    }

    /// Remove one code's records, or everything.
    ///
    /// Code matching is a substring test over the whole serialized record,
    /// so a name or phone fragment equal to the target matches too.
    pub async fn remove(&self, caller: &UserId, target: Option<RemoveTarget>) -> Result<RemoveOutcome> {
        self.gate.check(caller)?;

        let outcome = match target {
            None => RemoveOutcome::Usage,
            Some(RemoveTarget::All) => {
                if self.store.clear().await? {
                    RemoveOutcome::AllRemoved
                } else {
                    RemoveOutcome::NoList
                }
            }
            Some(RemoveTarget::Matching(_)) if self.store.load().await?.is_none() => {
                RemoveOutcome::NoList
            }
            Some(RemoveTarget::Matching(needle)) => {
                let matches = |record: &ParticipantRecord| record.to_line().contains(needle.as_str());
                if self.store.remove_matching(&matches).await? {
                    RemoveOutcome::Removed(needle)
                } else {
                    RemoveOutcome::NotFound(needle)
                }
            }
        };

        tracing::info!(caller = %caller, outcome = ?outcome, "Remove command handled");
        Ok(outcome)
    }

    /// Draw a winner with the thread-local generator.
    pub async fn winner(&self, caller: &UserId) -> Result<WinnerOutcome> {
        let records = self.draw_pool(caller).await?;
        Ok(Self::pick(records, &mut rand::thread_rng()))
    }

    /// Draw a winner uniformly over every stored record.
    ///
    /// Nothing is marked or removed, so repeated draws can pick the same
    /// participant.
    pub async fn winner_with_rng<R: Rng + Send>(
        &self,
        caller: &UserId,
        rng: &mut R,
    ) -> Result<WinnerOutcome> {
        let records = self.draw_pool(caller).await?;
        Ok(Self::pick(records, rng))
    }

    async fn draw_pool(&self, caller: &UserId) -> Result<Option<Vec<ParticipantRecord>>> {
        self.gate.check(caller)?;
        Ok(self.store.load().await?)
    }

    fn pick<R: Rng + ?Sized>(records: Option<Vec<ParticipantRecord>>, rng: &mut R) -> WinnerOutcome {
        let Some(records) = records else {
            return WinnerOutcome::NoList;
        };
        match records.choose(rng) {
            Some(winner) => {
                tracing::info!(code = %winner.code, pool = records.len(), "Winner drawn");
                WinnerOutcome::Drawn(winner.clone())
            }
            None => WinnerOutcome::Empty,
        }
    }
}
