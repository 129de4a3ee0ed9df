//! Bounded append-only linked list insertion contract.
//!
//! Insertion walks the chain one slot per step, starting from the base
//! slot and following `next` links. Each walk step inspects exactly one
//! slot: a free slot takes the value and terminates the chain; an occupied
//! slot advances the cursor held in the context and returns the walk step
//! *itself* as the next continuation. Continuation chains may therefore
//! loop on one step indefinitely, bounded only by list capacity, not just
//! form short declare/commit pairs.

use {
    bytemuck_derive::{Pod, Zeroable},
    num_enum::{IntoPrimitive, TryFromPrimitive},
    utx_sdk::{
        access_list::{AccessList, AccessListError},
        context::TransactionContext,
        payload::TransactionPayload,
        result::{Continuation, RejectReason},
        state_machine::ContractStateMachine,
    },
};

/// Number of node slots.
pub const LIST_CAPACITY: u32 = 10;
/// Slot every walk starts from.
pub const BASE_SLOT: u32 = 0;
/// Node value marking a free slot.
pub const FREE_MARKER: u32 = 0;

/// Insertion payload. Packed; field order is part of the wire contract.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct InsertPayload {
    /// Value to append. Must not be [`FREE_MARKER`].
    pub value: u32,
}

impl TransactionPayload for InsertPayload {}

#[derive(Clone, Copy, Default)]
struct Node {
    next: u32,
    value: u32,
}

/// Fixed-capacity node store keyed by slot.
pub struct ListLedger {
    nodes: [Node; LIST_CAPACITY as usize],
    len: u32,
}

impl Default for ListLedger {
    fn default() -> Self {
        Self {
            nodes: [Node::default(); LIST_CAPACITY as usize],
            len: 0,
        }
    }
}

impl ListLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_value(&self, slot: u32) -> Option<u32> {
        self.nodes.get(slot as usize).map(|node| node.value)
    }

    pub fn node_next(&self, slot: u32) -> Option<u32> {
        self.nodes.get(slot as usize).map(|node| node.next)
    }

    /// Free one slot. Harness-only, between benchmark iterations.
    pub fn reset_node(&mut self, slot: u32) {
        if let Some(node) = self.nodes.get_mut(slot as usize) {
            if node.value != FREE_MARKER {
                self.len -= 1;
            }
            *node = Node::default();
        }
    }

    /// Free every slot. Harness-only.
    pub fn reset(&mut self) {
        self.nodes = [Node::default(); LIST_CAPACITY as usize];
        self.len = 0;
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum ListStep {
    Walk,
}

pub struct LinkedListContract;

impl ContractStateMachine for LinkedListContract {
    type Payload = InsertPayload;
    type Ledger = ListLedger;
    type Step = ListStep;

    fn enter(
        payload: &InsertPayload,
        access_list: &mut AccessList,
        context: &mut TransactionContext,
        ledger: &mut ListLedger,
    ) -> Result<Continuation<ListStep>, AccessListError> {
        if ledger.len == LIST_CAPACITY {
            return Ok(Continuation::rejected(RejectReason::ListFull));
        }
        let declared = context.payload_len;
        if declared != InsertPayload::EXPECTED_LEN {
            return Ok(Continuation::rejected(RejectReason::PayloadLengthMismatch {
                declared,
                expected: InsertPayload::EXPECTED_LEN,
            }));
        }
        if payload.value == FREE_MARKER {
            return Ok(Continuation::rejected(RejectReason::ReservedValue));
        }

        access_list.reset();
        context.cursor = BASE_SLOT;
        Ok(Continuation::Next(ListStep::Walk))
    }

    fn step(
        step: ListStep,
        payload: &InsertPayload,
        _access_list: &mut AccessList,
        context: &mut TransactionContext,
        ledger: &mut ListLedger,
    ) -> Result<Continuation<ListStep>, AccessListError> {
        match step {
            ListStep::Walk => {
                let slot = context.cursor;
                let Some(node) = ledger.nodes.get_mut(slot as usize) else {
                    // A cursor escaping the array means the chain is
                    // corrupted; terminate without touching anything.
                    return Ok(Continuation::rejected(RejectReason::SlotOutOfRange));
                };
                if node.value == FREE_MARKER {
                    node.value = payload.value;
                    node.next = slot + 1;
                    ledger.len += 1;
                    Ok(Continuation::applied())
                } else {
                    context.cursor = node.next;
                    Ok(Continuation::Next(ListStep::Walk))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    fn insert(value: u32, ledger: &mut ListLedger) -> (Continuation<ListStep>, usize) {
        let payload = InsertPayload { value };
        let mut access_list = AccessList::new();
        let mut context = TransactionContext::new(0, InsertPayload::EXPECTED_LEN);
        let mut continuation =
            LinkedListContract::enter(&payload, &mut access_list, &mut context, ledger).unwrap();
        let mut walks = 0;
        while let Continuation::Next(step) = continuation {
            continuation = LinkedListContract::step(
                step,
                &payload,
                &mut access_list,
                &mut context,
                ledger,
            )
            .unwrap();
            walks += 1;
        }
        (continuation, walks)
    }

    #[test]
    fn insert_into_empty_list_takes_base_slot() {
        let mut ledger = ListLedger::new();
        let (continuation, walks) = insert(11, &mut ledger);
        assert_eq!(continuation, Continuation::applied());
        assert_eq!(walks, 1);
        assert_eq!(ledger.node_value(BASE_SLOT), Some(11));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn walk_loops_once_per_occupied_slot() {
        let mut ledger = ListLedger::new();
        for value in 1..=4 {
            insert(value, &mut ledger);
        }
        let (continuation, walks) = insert(5, &mut ledger);
        assert_eq!(continuation, Continuation::applied());
        assert_eq!(walks, 5);
        assert_eq!(ledger.node_value(4), Some(5));
    }

    #[test]
    fn inserted_value_is_reachable_from_base() {
        let mut ledger = ListLedger::new();
        for value in [7, 9, 13] {
            insert(value, &mut ledger);
        }
        let mut slot = BASE_SLOT;
        let mut seen = Vec::new();
        while let Some(value) = ledger.node_value(slot) {
            if value == FREE_MARKER {
                break;
            }
            seen.push(value);
            slot = ledger.node_next(slot).unwrap();
        }
        assert_eq!(seen, vec![7, 9, 13]);
    }

    #[test]
    fn full_list_rejects_immediately_and_unchanged() {
        let mut ledger = ListLedger::new();
        for value in 1..=LIST_CAPACITY {
            assert_eq!(insert(value, &mut ledger).0, Continuation::applied());
        }
        let snapshot: Vec<_> = (0..LIST_CAPACITY)
            .map(|slot| (ledger.node_value(slot), ledger.node_next(slot)))
            .collect();

        let (continuation, walks) = insert(99, &mut ledger);
        assert_eq!(continuation, Continuation::rejected(RejectReason::ListFull));
        assert_eq!(walks, 0);
        assert_eq!(ledger.len(), LIST_CAPACITY);
        let after: Vec<_> = (0..LIST_CAPACITY)
            .map(|slot| (ledger.node_value(slot), ledger.node_next(slot)))
            .collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn reserved_value_is_rejected() {
        let mut ledger = ListLedger::new();
        assert_eq!(
            insert(FREE_MARKER, &mut ledger).0,
            Continuation::rejected(RejectReason::ReservedValue)
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut ledger = ListLedger::new();
        for value in 1..=3 {
            insert(value, &mut ledger);
        }
        ledger.reset_node(1);
        assert_eq!(ledger.len(), 2);
        let (continuation, walks) = insert(42, &mut ledger);
        assert_eq!(continuation, Continuation::applied());
        assert_eq!(walks, 2);
        assert_eq!(ledger.node_value(1), Some(42));
    }

    #[test]
    fn corrupted_cursor_terminates_cleanly() {
        let mut ledger = ListLedger::new();
        let payload = InsertPayload { value: 5 };
        let mut access_list = AccessList::new();
        let mut context = TransactionContext::new(0, InsertPayload::EXPECTED_LEN);
        assert_matches!(
            LinkedListContract::enter(&payload, &mut access_list, &mut context, &mut ledger),
            Ok(Continuation::Next(ListStep::Walk))
        );
        context.cursor = LIST_CAPACITY + 3;
        let continuation = LinkedListContract::step(
            ListStep::Walk,
            &payload,
            &mut access_list,
            &mut context,
            &mut ledger,
        )
        .unwrap();
        assert_eq!(
            continuation,
            Continuation::rejected(RejectReason::SlotOutOfRange)
        );
        assert!(ledger.is_empty());
    }
}
