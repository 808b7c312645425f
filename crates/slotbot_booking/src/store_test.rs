// --- File: crates/slotbot_booking/src/store_test.rs ---
use crate::error::BookingError;
use crate::store::{BookingStore, UserId};
use crate::testutils::slot;

const ANNA: UserId = UserId(1);
const BORIS: UserId = UserId(2);

fn store() -> BookingStore {
    BookingStore::new(vec![slot(10, 12), slot(10, 10), slot(10, 11)])
}

#[test]
fn new_store_orders_pool() {
    assert_eq!(
        store().available_slots(),
        vec![slot(10, 10), slot(10, 11), slot(10, 12)]
    );
}

#[test]
fn committed_reservation_moves_slot_into_ledger() {
    let store = store();
    let booking = store
        .reserve(slot(10, 11))
        .unwrap()
        .commit(ANNA, "evt-1".to_string());

    assert_eq!(booking.slot, slot(10, 11));
    assert!(!store.is_available(&slot(10, 11)));
    assert_eq!(store.bookings(ANNA), vec![booking]);
    assert!(store.state().held.is_empty());
}

#[test]
fn held_slot_cannot_be_reserved_twice() {
    let store = store();
    let first = store.reserve(slot(10, 10)).unwrap();

    assert_eq!(
        store.reserve(slot(10, 10)).err(),
        Some(BookingError::SlotUnavailable(slot(10, 10)))
    );
    assert_eq!(first.slot(), slot(10, 10));
}

#[test]
fn dropped_reservation_returns_slot_in_order() {
    let store = store();
    {
        let _held = store.reserve(slot(10, 11)).unwrap();
        assert_eq!(store.available_slots(), vec![slot(10, 10), slot(10, 12)]);
    }
    assert_eq!(
        store.available_slots(),
        vec![slot(10, 10), slot(10, 11), slot(10, 12)]
    );
    assert!(store.state().held.is_empty());
}

#[test]
fn cancel_returns_slot_and_drops_empty_entry() {
    let store = store();
    store
        .reserve(slot(10, 12))
        .unwrap()
        .commit(ANNA, "evt-1".to_string());

    let cancelled = store.cancel(ANNA, slot(10, 12)).unwrap();

    assert_eq!(cancelled.event_id, "evt-1");
    assert!(!store.has_ledger_entry(ANNA));
    assert_eq!(
        store.available_slots(),
        vec![slot(10, 10), slot(10, 11), slot(10, 12)]
    );
}

#[test]
fn cancel_keeps_other_bookings_of_user() {
    let store = store();
    store.reserve(slot(10, 10)).unwrap().commit(ANNA, "a".into());
    store.reserve(slot(10, 11)).unwrap().commit(ANNA, "b".into());

    store.cancel(ANNA, slot(10, 10));

    assert!(store.has_ledger_entry(ANNA));
    assert_eq!(store.bookings(ANNA).len(), 1);
    assert_eq!(store.bookings(ANNA)[0].event_id, "b");
}

#[test]
fn cancel_never_duplicates_pool_entry() {
    let store = store();
    store.reserve(slot(10, 10)).unwrap().commit(ANNA, "a".into());
    // a refresh that wrongly re-offers the slot must not lead to duplicates
    store.state().pool.insert(0, slot(10, 10));

    store.cancel(ANNA, slot(10, 10));

    let pool = store.available_slots();
    assert_eq!(pool.iter().filter(|s| **s == slot(10, 10)).count(), 1);
}

#[test]
fn cancel_of_unknown_booking_changes_nothing() {
    let store = store();
    store.reserve(slot(10, 10)).unwrap().commit(ANNA, "a".into());

    assert!(store.cancel(BORIS, slot(10, 10)).is_none());
    assert!(store.cancel(ANNA, slot(10, 11)).is_none());
    assert_eq!(store.bookings(ANNA).len(), 1);
    assert_eq!(store.available_slots(), vec![slot(10, 11), slot(10, 12)]);
}

#[test]
fn refresh_excludes_booked_and_held_slots() {
    let store = store();
    store.reserve(slot(10, 10)).unwrap().commit(ANNA, "a".into());
    let _held = store.reserve(slot(10, 11)).unwrap();

    let offered = store.refresh(vec![slot(10, 10), slot(10, 11), slot(10, 12), slot(10, 13)]);

    assert_eq!(offered, 2);
    assert_eq!(store.available_slots(), vec![slot(10, 12), slot(10, 13)]);
}

#[test]
fn prune_drops_started_slots_only() {
    let store = store();
    let pruned = store.prune_expired(slot(10, 11).start());

    assert_eq!(pruned, 2);
    assert_eq!(store.available_slots(), vec![slot(10, 12)]);
}

#[test]
fn find_booking_returns_first_match() {
    let store = store();
    store.reserve(slot(10, 12)).unwrap().commit(BORIS, "x".into());

    assert_eq!(
        store.find_booking(BORIS, slot(10, 12)).map(|b| b.event_id),
        Some("x".to_string())
    );
    assert!(store.find_booking(ANNA, slot(10, 12)).is_none());
}
