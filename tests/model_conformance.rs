//! Model-based conformance: random operation sequences applied in lockstep to
//! each set kind and to a reference model, checking agreement after every
//! step.

use std::collections::BTreeSet;

use proptest::prelude::*;
use setkit::collections::{IndexedSet, UnorderedSet};
#[cfg(feature = "concurrent")]
use setkit::concurrent::{LockedSet, RwLockedSet, SyncSet};
use setkit::contract::Set;

#[derive(Clone, Debug)]
enum Operation {
    Add(u8),
    Remove(u8),
    Clear,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        8 => (0u8..24).prop_map(Operation::Add),
        4 => (0u8..24).prop_map(Operation::Remove),
        1 => Just(Operation::Clear),
    ]
}

/// Applies the operations to `set` and a `BTreeSet` model, asserting that
/// every return value and every intermediate cardinality agree.
fn conforms_to_model<S: Set<Element = u8>>(mut set: S, operations: &[Operation]) {
    let mut model = BTreeSet::new();
    for operation in operations {
        match operation {
            Operation::Add(value) => {
                assert_eq!(set.add(*value), model.insert(*value));
            }
            Operation::Remove(value) => {
                assert_eq!(set.remove(value), model.remove(value));
            }
            Operation::Clear => {
                let expected = model.len();
                model.clear();
                assert_eq!(set.clear(), expected);
            }
        }
        assert_eq!(set.cardinality(), model.len());
    }

    for value in 0..24u8 {
        assert_eq!(set.contains(&value), model.contains(&value));
    }

    let mut yielded = 0;
    set.iterate(|element| {
        assert!(model.contains(element));
        yielded += 1;
        true
    });
    assert_eq!(yielded, model.len());
}

proptest! {
    #[test]
    fn prop_unordered_set_conforms(
        operations in prop::collection::vec(operation_strategy(), 0..128)
    ) {
        conforms_to_model(UnorderedSet::new(), &operations);
    }

    #[test]
    fn prop_indexed_set_conforms(
        operations in prop::collection::vec(operation_strategy(), 0..128)
    ) {
        conforms_to_model(IndexedSet::new(), &operations);
    }
}

#[cfg(feature = "concurrent")]
proptest! {
    #[test]
    fn prop_locked_set_conforms(
        operations in prop::collection::vec(operation_strategy(), 0..128)
    ) {
        conforms_to_model(LockedSet::wrap(IndexedSet::new()), &operations);
    }

    #[test]
    fn prop_rwlocked_set_conforms(
        operations in prop::collection::vec(operation_strategy(), 0..128)
    ) {
        conforms_to_model(RwLockedSet::wrap(UnorderedSet::new()), &operations);
    }

    #[test]
    fn prop_sync_set_conforms(
        operations in prop::collection::vec(operation_strategy(), 0..128)
    ) {
        conforms_to_model(SyncSet::new(), &operations);
    }
}
