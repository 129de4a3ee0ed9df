//! Host hook invoked at every step boundary.

use utx_sdk::access_list::AccessList;

/// Admission decision for the next step of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Run the next step.
    Proceed,
    /// Stop invoking continuations for this chain. Mutations already
    /// committed by earlier steps stay in effect; there is no rollback.
    Abort,
}

/// Callback a host implements to observe and gate a transaction between
/// steps.
///
/// The footprint handed in is the transaction's most recently published
/// access list; a conflict-detecting host compares it against the
/// footprints of other in-flight transactions before admitting the step
/// that will perform the corresponding memory operations. An empty list is
/// not an error - many steps, and entire contracts, never publish.
pub trait StepBoundaryCallback {
    fn inspect_footprint(&mut self, access_list: &AccessList) -> Admission {
        let _ = access_list;
        Admission::Proceed
    }
}

/// No admission control: every step proceeds.
impl StepBoundaryCallback for () {}
