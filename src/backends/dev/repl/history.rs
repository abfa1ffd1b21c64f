//! Bounded input history
//!
//! [`HistoryRingBuffer`] keeps the last `capacity` entries in a fixed set of
//! slots. Entry `k` (the `k`-th insertion, counting from 0) lives in slot
//! `k % capacity` until a later insertion lands on the same slot.
//!
//! Two kinds of index are in play:
//!
//! - slot index: what [`HistoryRingBuffer::get`] takes, in `0..capacity`
//! - absolute index: the insertion counter, what
//!   [`HistoryRingBuffer::position`] reports and
//!   [`HistoryRingBuffer::get_absolute`] takes
//!
//! `get` does no staleness check; `get_absolute` does.

use thiserror::Error;

use crate::frontend::Ast;
use crate::util::diagnostic::Issues;

/// History construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history capacity must be positive, got {0}")]
    InvalidCapacity(usize),
}

/// One submitted line
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Text as typed
    pub raw: String,
    /// Parsed tree, absent when parsing failed
    pub ast: Option<Ast>,
    /// Compile diagnostics, empty on success
    pub issues: Issues,
}

impl HistoryEntry {
    pub fn new(
        raw: impl Into<String>,
        ast: Option<Ast>,
        issues: Issues,
    ) -> Self {
        Self {
            raw: raw.into(),
            ast,
            issues,
        }
    }

    /// Whether compilation reported errors for this line
    pub fn failed(&self) -> bool {
        self.issues.has_errors()
    }
}

/// Fixed-capacity log that overwrites its oldest entry
#[derive(Debug, Clone)]
pub struct HistoryRingBuffer<T> {
    slots: Vec<Option<T>>,
    write_count: u64,
}

impl<T> HistoryRingBuffer<T> {
    /// Create a buffer with `capacity` empty slots
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::InvalidCapacity(capacity));
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            write_count: 0,
        })
    }

    /// Append an entry, overwriting the oldest one once full
    pub fn insert(
        &mut self,
        entry: T,
    ) {
        let slot = self.slot_of(self.write_count);
        self.slots[slot] = Some(entry);
        self.write_count += 1;
        tracing::trace!("history insert: slot {} (absolute {})", slot, self.write_count - 1);
    }

    /// Slot content by slot index
    ///
    /// Absent for `index < 0` and `index >= capacity`. A slot that has been
    /// reused returns its newest occupant.
    pub fn get(
        &self,
        index: i64,
    ) -> Option<&T> {
        let index = usize::try_from(index).ok()?;
        self.slots.get(index)?.as_ref()
    }

    /// Entry by absolute index
    ///
    /// Absent for negative indices, indices not written yet and entries that
    /// have already been overwritten.
    pub fn get_absolute(
        &self,
        index: i64,
    ) -> Option<&T> {
        let index = u64::try_from(index).ok()?;
        if index >= self.write_count || self.write_count - index > self.capacity() as u64 {
            tracing::trace!("history miss: absolute {} (position {})", index, self.write_count);
            return None;
        }
        self.slots[self.slot_of(index)].as_ref()
    }

    /// Number of insertions so far, never wrapped
    pub fn position(&self) -> u64 {
        self.write_count
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.write_count.min(self.capacity() as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.write_count == 0
    }

    /// Live entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let start = self.write_count - self.len() as u64;
        (start..self.write_count).filter_map(move |i| self.slots[self.slot_of(i)].as_ref())
    }

    fn slot_of(
        &self,
        absolute: u64,
    ) -> usize {
        (absolute % self.capacity() as u64) as usize
    }
}
