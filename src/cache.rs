//! Keyed fetch-and-cache state for remote queries.
//!
//! [`QueryCache`] maps each [`QueryKey`] to its latest known page, the error
//! of its last failed attempt, and whether a fetch is in flight. It never
//! performs I/O itself: [`QueryCache::use_query`] hands out a [`FetchTicket`]
//! when the key needs fetching, and the caller feeds the outcome back through
//! [`QueryCache::complete`].
//!
//! # Sequencing
//!
//! Every fetch that targets a key is tagged with a per-key sequence number.
//! Only the latest issued sequence may write to the key; slower, earlier
//! results are dropped.

use crate::api::QueryKey;
use crate::error::FetchError;
use crate::models::ArticlesPage;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// The view of one key at one instant.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub data: Option<ArticlesPage>,
    pub error: Option<Arc<FetchError>>,
    pub is_loading: bool,
}

/// Permission to write one fetch result into the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    pub seq: u64,
}

#[derive(Debug, Default)]
struct Entry {
    data: Option<ArticlesPage>,
    error: Option<Arc<FetchError>>,
    /// Sequence of the hook-driven fetch currently outstanding.
    in_flight: Option<u64>,
    /// Latest sequence issued for this key, by any writer.
    latest_seq: u64,
    /// Set once a result has been committed or a mutation asked for a refetch.
    settled: bool,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the snapshot for `key`, issuing a fetch ticket when the key has
    /// never been fetched (or was invalidated) and nothing is in flight.
    pub fn use_query(&mut self, key: &QueryKey) -> (Snapshot, Option<FetchTicket>) {
        let entry = self.entries.entry(key.clone()).or_default();
        let ticket = if !entry.settled && entry.in_flight.is_none() {
            entry.latest_seq += 1;
            entry.in_flight = Some(entry.latest_seq);
            debug!(%key, seq = entry.latest_seq, "Issuing fetch");
            Some(FetchTicket {
                key: key.clone(),
                seq: entry.latest_seq,
            })
        } else {
            None
        };
        (Self::snapshot_of(entry), ticket)
    }

    /// Read the snapshot for `key` without side effects.
    pub fn peek(&self, key: &QueryKey) -> Snapshot {
        self.entries
            .get(key)
            .map(Self::snapshot_of)
            .unwrap_or_default()
    }

    /// Reserve a sequence number for a caller-driven fetch whose result will
    /// be written with [`QueryCache::mutate_ticketed`]. Any earlier
    /// outstanding fetch for the key becomes stale.
    pub fn reserve(&mut self, key: &QueryKey) -> FetchTicket {
        let entry = self.entries.entry(key.clone()).or_default();
        entry.latest_seq += 1;
        FetchTicket {
            key: key.clone(),
            seq: entry.latest_seq,
        }
    }

    /// Commit the outcome of a hook-driven fetch.
    ///
    /// Success replaces the cached page and clears the error; failure records
    /// the error and keeps the cached page. Returns `false` when the ticket
    /// was stale and the result was discarded.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<ArticlesPage, FetchError>) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            warn!(key = %ticket.key, "Completion for unknown key");
            return false;
        };
        if entry.in_flight == Some(ticket.seq) {
            entry.in_flight = None;
        }
        if ticket.seq != entry.latest_seq {
            debug!(key = %ticket.key, seq = ticket.seq, latest = entry.latest_seq, "Discarding stale result");
            return false;
        }
        entry.settled = true;
        match result {
            Ok(page) => {
                entry.data = Some(page);
                entry.error = None;
            }
            Err(e) => entry.error = Some(Arc::new(e)),
        }
        true
    }

    /// Overwrite the cached page for `key`.
    ///
    /// With `should_revalidate == false` nothing else happens. With `true` the
    /// key is marked unsettled so the next [`QueryCache::use_query`] fetches it.
    /// A present value supersedes any recorded error.
    pub fn mutate(&mut self, key: &QueryKey, value: Option<ArticlesPage>, should_revalidate: bool) {
        let entry = self.entries.entry(key.clone()).or_default();
        if value.is_some() {
            entry.error = None;
            entry.settled = true;
        }
        entry.data = value;
        if should_revalidate {
            entry.settled = false;
        }
    }

    /// [`QueryCache::mutate`] without revalidation, guarded by a reserved
    /// ticket. Returns `false` when a later fetch has been issued for the key.
    pub fn mutate_ticketed(&mut self, ticket: &FetchTicket, value: Option<ArticlesPage>) -> bool {
        let latest = self
            .entries
            .get(&ticket.key)
            .map(|e| e.latest_seq)
            .unwrap_or_default();
        if ticket.seq != latest {
            debug!(key = %ticket.key, seq = ticket.seq, latest, "Discarding stale mutation");
            return false;
        }
        self.mutate(&ticket.key, value, false);
        if let Some(entry) = self.entries.get_mut(&ticket.key) {
            entry.in_flight = None;
        }
        true
    }

    fn snapshot_of(entry: &Entry) -> Snapshot {
        Snapshot {
            data: entry.data.clone(),
            error: entry.error.clone(),
            is_loading: entry.in_flight.is_some(),
        }
    }
}
