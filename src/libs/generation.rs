//! Latest-wins bookkeeping for overlapping requests.
//!
//! Each request takes a [`Ticket`] before it is sent. When its response
//! arrives, [`Latest::offer`] stores it only if no newer ticket has been
//! issued in the meantime, so the displayed result always belongs to the most
//! recent request regardless of the order responses come back in.

use parking_lot::Mutex;

/// Identifies one request within a [`Latest`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Slot<T> {
    issued: u64,
    value: Option<T>,
}

/// Holds the result of the newest request.
#[derive(Debug)]
pub struct Latest<T> {
    slot: Mutex<Slot<T>>,
}

impl<T: Clone> Latest<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot { issued: 0, value: None }),
        }
    }

    /// Issues a ticket that supersedes every earlier one.
    pub fn begin(&self) -> Ticket {
        let mut slot = self.slot.lock();
        slot.issued += 1;
        Ticket(slot.issued)
    }

    /// Stores `value` if `ticket` is still the newest. Returns whether it was kept.
    pub fn offer(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.slot.lock();
        if slot.issued != ticket.0 {
            tracing::debug!(ticket = ticket.0, newest = slot.issued, "dropping stale response");
            return false;
        }
        slot.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<T> {
        self.slot.lock().value.clone()
    }
}

impl<T: Clone> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}
