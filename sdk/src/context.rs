//! Per-transaction execution context.

use bytemuck_derive::{Pod, Zeroable};

/// Bytes reserved for auxiliary transformation state.
pub const TRANSFORM_STORAGE_LEN: usize = 128;

/// Mutable scratch state owned by exactly one in-flight transaction. The
/// host creates it at entry and discards it at termination; contracts never
/// share one across transactions.
///
/// The struct crosses the guest/host boundary, so it is explicitly packed
/// and field order is part of the contract.
#[repr(C, packed)]
#[derive(Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct TransactionContext {
    /// Identifier of the invoking user.
    pub caller: u32,
    /// Declared byte length of the transaction payload. Every entry step
    /// validates this against the expected shape for its contract type.
    pub payload_len: u16,
    /// Contract progress marker, e.g. the slot cursor of a list walk.
    pub cursor: u32,
    /// Opaque byte area reserved for auxiliary transformation state.
    pub transform_storage: [u8; TRANSFORM_STORAGE_LEN],
}

impl TransactionContext {
    pub fn new(caller: u32, payload_len: u16) -> Self {
        Self {
            caller,
            payload_len,
            cursor: 0,
            transform_storage: [0; TRANSFORM_STORAGE_LEN],
        }
    }
}

impl std::fmt::Debug for TransactionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Copy out of the packed struct before formatting.
        let caller = self.caller;
        let payload_len = self.payload_len;
        let cursor = self.cursor;
        f.debug_struct("TransactionContext")
            .field("caller", &caller)
            .field("payload_len", &payload_len)
            .field("cursor", &cursor)
            .finish_non_exhaustive()
    }
}
