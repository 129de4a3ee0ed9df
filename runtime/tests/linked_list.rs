//! Self-looping list insertion through the host stepper.

use {
    assert_matches::assert_matches,
    utx_linked_list_program::{
        InsertPayload, LinkedListContract, ListLedger, ListStep, BASE_SLOT, LIST_CAPACITY,
    },
    utx_runtime::{
        stepper::Stepper,
        transaction_processor::{process_transaction, ProcessingOutcome},
    },
    utx_sdk::result::{RejectReason, TransactionResult},
};

fn insert(value: u32, ledger: &mut ListLedger) -> ProcessingOutcome {
    process_transaction::<LinkedListContract>(0, InsertPayload { value }, ledger, &mut ()).unwrap()
}

#[test]
fn chain_length_grows_with_list_occupancy() {
    let mut ledger = ListLedger::new();
    for (index, value) in (10..14).enumerate() {
        let outcome = insert(value, &mut ledger);
        // Entry plus one walk per previously-occupied slot plus the final
        // walk that commits.
        assert_matches!(
            outcome,
            ProcessingOutcome::Completed {
                result: TransactionResult::Applied,
                steps,
            } if steps == index + 2
        );
    }
    assert_eq!(ledger.len(), 4);
}

#[test]
fn continuation_loops_back_to_the_same_step() {
    let mut ledger = ListLedger::new();
    insert(5, &mut ledger);
    insert(6, &mut ledger);

    let mut stepper = Stepper::<LinkedListContract>::new(0, InsertPayload { value: 7 });
    stepper.enter(&mut ledger).unwrap();
    // Two occupied slots: the walk hands itself back twice.
    assert_eq!(stepper.current_step_id(), Some(ListStep::Walk.into()));
    stepper.step(&mut ledger).unwrap();
    assert_eq!(stepper.current_step_id(), Some(ListStep::Walk.into()));
    stepper.step(&mut ledger).unwrap();
    assert_eq!(stepper.current_step_id(), Some(ListStep::Walk.into()));
    stepper.step(&mut ledger).unwrap();
    assert!(stepper.is_terminal());
    assert_eq!(stepper.result(), Some(TransactionResult::Applied));
    assert_eq!(ledger.node_value(2), Some(7));
}

#[test]
fn full_list_terminates_at_entry() {
    let mut ledger = ListLedger::new();
    for value in 1..=LIST_CAPACITY {
        insert(value, &mut ledger);
    }
    let outcome = insert(99, &mut ledger);
    assert_matches!(
        outcome,
        ProcessingOutcome::Completed {
            result: TransactionResult::Rejected(RejectReason::ListFull),
            steps: 1,
        }
    );
    assert_eq!(ledger.len(), LIST_CAPACITY);
}

#[test]
fn inserted_values_stay_reachable_from_base() {
    let mut ledger = ListLedger::new();
    let values = [3, 1, 4, 1, 5];
    for value in values {
        insert(value, &mut ledger);
    }
    let mut seen = Vec::new();
    let mut slot = BASE_SLOT;
    while let Some(value) = ledger.node_value(slot) {
        if value == 0 {
            break;
        }
        seen.push(value);
        slot = ledger.node_next(slot).unwrap();
    }
    assert_eq!(seen, values);
}
