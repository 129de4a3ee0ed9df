//! The contract-side state machine a host stepper drives.

use crate::{
    access_list::{AccessList, AccessListError},
    context::TransactionContext,
    payload::TransactionPayload,
    result::Continuation,
};

/// The ordered graph of step functions for one contract type.
///
/// A host drives a transaction by calling [`enter`](Self::enter) once, then
/// [`step`](Self::step) with each returned step identifier until a terminal
/// continuation, threading the same payload, access list and context
/// references through every call. Execution within one transaction is
/// strictly sequential; control returns to the host only at step
/// boundaries.
///
/// Step identifiers are small tagged values, never code addresses, so the
/// dispatch table stays explicit and the identifier can cross an ABI
/// boundary. Continuations may return their own step again, forming loops
/// bounded only by contract state (see the linked-list walk).
///
/// The write-before-use discipline is the correctness property everything
/// rests on: the footprint published during one call must be a superset of
/// every shared-memory address the immediately following call will touch.
/// Understating it breaks the host's isolation guarantee. Steps that touch
/// nothing, and entire contracts, may legitimately never publish.
pub trait ContractStateMachine {
    type Payload: TransactionPayload;
    /// The shared mutable store this contract's steps read and mutate,
    /// owned by the host.
    type Ledger;
    /// Tagged identifier of a step in this contract's graph.
    type Step: Copy + std::fmt::Debug + Into<u8>;

    /// Validate and dispatch. Uniform entry responsibilities:
    ///
    /// 1. Reject a caller identifier outside the valid domain range.
    /// 2. Reject a declared payload length that does not match this
    ///    contract's expected shape.
    /// 3. Reject on contract-specific precondition failure.
    /// 4. On acceptance, reset the access list and dispatch to the first
    ///    domain step.
    ///
    /// The error branch is reserved for fatal contract faults (access-list
    /// capacity overflow); domain rejection is a terminal continuation,
    /// not an error.
    fn enter(
        payload: &Self::Payload,
        access_list: &mut AccessList,
        context: &mut TransactionContext,
        ledger: &mut Self::Ledger,
    ) -> Result<Continuation<Self::Step>, AccessListError>;

    /// Run one step of the graph: validate step-relevant preconditions,
    /// optionally publish the next step's footprint, optionally mutate
    /// ledger and context, and hand back the next continuation.
    fn step(
        step: Self::Step,
        payload: &Self::Payload,
        access_list: &mut AccessList,
        context: &mut TransactionContext,
        ledger: &mut Self::Ledger,
    ) -> Result<Continuation<Self::Step>, AccessListError>;
}
