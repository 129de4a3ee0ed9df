//! Host-side driver for utx micro-transaction chains.
//!
//! The contract side of the protocol (`utx-sdk`) defines a state machine
//! of step functions; this crate is the reference host that drives one:
//! call `enter`, then keep invoking the returned continuation until the
//! terminal sentinel. Between calls the host owns the floor - it may read
//! the transaction's published access list, check it against other
//! in-flight footprints, and only then allow the next step (which performs
//! the actual mutation) to proceed.
//!
//! [`stepper::Stepper`] is the per-transaction driver; any number of them
//! may be interleaved against the same ledger by a scheduling host.
//! [`transaction_processor::process_transaction`] is the one-shot loop for
//! hosts without their own scheduling.

pub mod step_boundary_callback;
pub mod stepper;
pub mod transaction_processor;
