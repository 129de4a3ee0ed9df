//! Data model and guest-side ABI surface of the utx protocol.
//!
//! A utx micro-transaction is one contract invocation decomposed into an
//! entry call plus zero or more step calls. Before a step touches shared
//! ledger memory, the *previous* step must have published the exact set of
//! addresses (and access size classes) it is about to use in the
//! transaction's [`access_list::AccessList`]. A host scheduler reads the
//! published footprint between calls to admit, interleave, or speculatively
//! run many transactions concurrently, detecting address-level conflicts
//! without a global lock.
//!
//! This crate defines the pieces both sides of that boundary agree on:
//!
//! * [`access_list`] - the bounded footprint descriptor.
//! * [`context`] - per-transaction scratch state, byte layout fixed.
//! * [`payload`] - packed, fixed-size transaction payloads.
//! * [`result`] - continuations, terminal results and the rejection
//!   taxonomy.
//! * [`state_machine`] - the contract-side trait a host stepper drives.
//!
//! The host-side driver lives in `utx-runtime`; reference contracts live
//! under `programs/`.

pub mod access_list;
pub mod context;
pub mod payload;
pub mod result;
pub mod state_machine;
