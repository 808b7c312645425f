// --- File: crates/slotbot_booking/src/session.rs ---
//! Per-user conversational state between button presses.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::slot::Slot;
use crate::store::UserId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    /// Slot picked in the booking flow, awaiting confirmation.
    pub selected_slot: Option<Slot>,
    /// Slot picked in the cancellation flow, awaiting confirmation.
    pub slot_to_cancel: Option<Slot>,
}

#[derive(Debug, Default)]
pub struct Sessions {
    inner: Mutex<HashMap<UserId, Session>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, Session>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, user: UserId) -> Session {
        self.lock().get(&user).cloned().unwrap_or_default()
    }

    pub fn select_slot(&self, user: UserId, slot: Slot) {
        self.lock().entry(user).or_default().selected_slot = Some(slot);
    }

    /// Takes the pending booking selection, so a second confirm finds nothing.
    pub fn take_selected(&self, user: UserId) -> Option<Slot> {
        self.update(user, |session| session.selected_slot.take())
            .flatten()
    }

    pub fn set_slot_to_cancel(&self, user: UserId, slot: Slot) {
        self.lock().entry(user).or_default().slot_to_cancel = Some(slot);
    }

    pub fn slot_to_cancel(&self, user: UserId) -> Option<Slot> {
        self.lock()
            .get(&user)
            .and_then(|session| session.slot_to_cancel)
    }

    pub fn clear_slot_to_cancel(&self, user: UserId) {
        self.update(user, |session| session.slot_to_cancel = None);
    }

    /// Number of users with pending state.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Applies `f` to an existing session and forgets it once it holds nothing.
    fn update<T>(&self, user: UserId, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(&user)?;
        let result = f(session);
        if *session == Session::default() {
            sessions.remove(&user);
        }
        Some(result)
    }
}
