// --- File: crates/slotbot_booking/src/store.rs ---
//! Availability pool and booking ledger behind a single lock.
//!
//! A slot is in exactly one place at a time: the pool, the held set (a
//! booking is being confirmed), or one user's ledger entry.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::error::BookingError;
use crate::slot::Slot;

/// Chat-platform user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub slot: Slot,
    pub event_id: String,
}

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) pool: Vec<Slot>,
    pub(crate) held: HashSet<Slot>,
    pub(crate) ledger: HashMap<UserId, Vec<Booking>>,
}

impl StoreState {
    fn is_booked(&self, slot: &Slot) -> bool {
        self.ledger
            .values()
            .any(|bookings| bookings.iter().any(|b| &b.slot == slot))
    }

    /// Puts `slot` back in chronological position unless it is already there.
    fn return_to_pool(&mut self, slot: Slot) {
        match self.pool.binary_search(&slot) {
            Ok(_) => debug!("Slot {} already in pool", slot),
            Err(index) => self.pool.insert(index, slot),
        }
    }
}

#[derive(Debug, Default)]
pub struct BookingStore {
    state: Mutex<StoreState>,
}

impl BookingStore {
    pub fn new(mut slots: Vec<Slot>) -> Self {
        slots.sort();
        slots.dedup();
        Self {
            state: Mutex::new(StoreState {
                pool: slots,
                ..StoreState::default()
            }),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the pool in chronological order.
    pub fn available_slots(&self) -> Vec<Slot> {
        self.state().pool.clone()
    }

    pub fn is_available(&self, slot: &Slot) -> bool {
        self.state().pool.binary_search(slot).is_ok()
    }

    /// Drops pool slots starting at or before `now` (local wall-clock time).
    pub fn prune_expired(&self, now: NaiveDateTime) -> usize {
        let mut state = self.state();
        let before = state.pool.len();
        state.pool.retain(|slot| slot.start() > now);
        let pruned = before - state.pool.len();
        if pruned > 0 {
            debug!("Pruned {} expired slots", pruned);
        }
        pruned
    }

    /// Replaces the pool with `generated`, minus anything booked or held.
    pub fn refresh(&self, mut generated: Vec<Slot>) -> usize {
        let mut state = self.state();
        generated.sort();
        generated.dedup();
        generated.retain(|slot| !state.held.contains(slot) && !state.is_booked(slot));
        state.pool = generated;
        info!("Availability refreshed: {} slots offered", state.pool.len());
        state.pool.len()
    }

    /// Moves `slot` from the pool to the held set.
    ///
    /// Fails if the slot is not in the pool. The returned guard puts the slot
    /// back unless it is committed.
    pub fn reserve(&self, slot: Slot) -> Result<Reservation<'_>, BookingError> {
        let mut state = self.state();
        match state.pool.binary_search(&slot) {
            Ok(index) => {
                state.pool.remove(index);
                state.held.insert(slot);
                debug!("Slot {} held", slot);
                Ok(Reservation {
                    store: self,
                    slot,
                    settled: false,
                })
            }
            Err(_) => {
                warn!("Slot {} requested but not available", slot);
                Err(BookingError::SlotUnavailable(slot))
            }
        }
    }

    /// The user's bookings, earliest first.
    pub fn bookings(&self, user: UserId) -> Vec<Booking> {
        let mut bookings = self
            .state()
            .ledger
            .get(&user)
            .cloned()
            .unwrap_or_default();
        bookings.sort_by_key(|b| b.slot);
        bookings
    }

    pub fn find_booking(&self, user: UserId, slot: Slot) -> Option<Booking> {
        self.state()
            .ledger
            .get(&user)
            .and_then(|bookings| bookings.iter().find(|b| b.slot == slot).cloned())
    }

    pub fn has_ledger_entry(&self, user: UserId) -> bool {
        self.state().ledger.contains_key(&user)
    }

    /// Removes the user's booking for `slot` and returns the slot to the pool.
    ///
    /// Only the first matching record is removed; an emptied ledger entry is
    /// dropped entirely.
    pub fn cancel(&self, user: UserId, slot: Slot) -> Option<Booking> {
        let mut state = self.state();
        let bookings = state.ledger.get_mut(&user)?;
        let index = bookings.iter().position(|b| b.slot == slot)?;
        let booking = bookings.remove(index);
        if bookings.is_empty() {
            state.ledger.remove(&user);
        }
        state.return_to_pool(slot);
        info!("Booking of {} by user {} cancelled", slot, user);
        Some(booking)
    }
}

/// A slot taken out of the pool while its calendar event is created.
#[must_use = "dropping a reservation releases the slot"]
pub struct Reservation<'a> {
    store: &'a BookingStore,
    slot: Slot,
    settled: bool,
}

impl Reservation<'_> {
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Records the booking for `user` and consumes the hold.
    pub fn commit(mut self, user: UserId, event_id: String) -> Booking {
        let booking = Booking {
            slot: self.slot,
            event_id,
        };
        let mut state = self.store.state();
        state.held.remove(&self.slot);
        state.ledger.entry(user).or_default().push(booking.clone());
        self.settled = true;
        info!("Slot {} booked by user {}", self.slot, user);
        booking
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.store.state();
        state.held.remove(&self.slot);
        state.return_to_pool(self.slot);
        debug!("Hold on slot {} released", self.slot);
    }
}
