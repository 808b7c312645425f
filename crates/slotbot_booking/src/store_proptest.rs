// --- File: crates/slotbot_booking/src/store_proptest.rs ---
use proptest::prelude::*;
use std::collections::HashSet;

use crate::slot::Slot;
use crate::store::{BookingStore, UserId};
use crate::testutils::slot;

fn any_slot() -> impl Strategy<Value = Slot> {
    (1u32..=28, 0u32..24).prop_map(|(day, hour)| slot(day, hour))
}

#[derive(Debug, Clone)]
enum Op {
    Book(u64, Slot),
    Abandon(Slot),
    Cancel(u64, Slot),
    Refresh(Vec<Slot>),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..3, any_slot()).prop_map(|(u, s)| Op::Book(u, s)),
        any_slot().prop_map(Op::Abandon),
        (0u64..3, any_slot()).prop_map(|(u, s)| Op::Cancel(u, s)),
        prop::collection::vec(any_slot(), 0..20).prop_map(Op::Refresh),
    ]
}

proptest! {
    #[test]
    fn bookings_are_listed_in_ascending_order(slots in prop::collection::hash_set(any_slot(), 0..30)) {
        let order: Vec<Slot> = slots.iter().copied().collect();
        let store = BookingStore::new(order.clone());
        for (i, s) in order.iter().enumerate() {
            store.reserve(*s).unwrap().commit(UserId(7), format!("evt-{i}"));
        }

        let listed: Vec<Slot> = store.bookings(UserId(7)).iter().map(|b| b.slot).collect();
        let mut expected = order;
        expected.sort();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn a_slot_is_never_both_offered_and_booked(
        initial in prop::collection::vec(any_slot(), 0..30),
        ops in prop::collection::vec(any_op(), 0..40),
    ) {
        let store = BookingStore::new(initial);
        for op in ops {
            match op {
                Op::Book(user, s) => {
                    if let Ok(reservation) = store.reserve(s) {
                        reservation.commit(UserId(user), "evt".to_string());
                    }
                }
                Op::Abandon(s) => {
                    let _ = store.reserve(s);
                }
                Op::Cancel(user, s) => {
                    store.cancel(UserId(user), s);
                }
                Op::Refresh(generated) => {
                    store.refresh(generated);
                }
            }

            let state = store.state();
            let pool: HashSet<Slot> = state.pool.iter().copied().collect();
            prop_assert_eq!(pool.len(), state.pool.len(), "pool has duplicates");
            prop_assert!(state.pool.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(state.held.is_empty());

            let mut booked = HashSet::new();
            for bookings in state.ledger.values() {
                prop_assert!(!bookings.is_empty());
                for b in bookings {
                    prop_assert!(booked.insert(b.slot), "slot booked twice");
                    prop_assert!(!pool.contains(&b.slot));
                }
            }
        }
    }
}
