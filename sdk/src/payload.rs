//! Packed, fixed-size transaction payloads.

use {crate::result::RejectReason, bytemuck::Pod};

/// The immutable payload of a micro-transaction.
///
/// Payload structs are part of the cross-boundary wire contract: they must
/// be `#[repr(C, packed)]` with significant field order and no implicit
/// padding, which is what the [`Pod`] bound enforces together with the
/// packed representation.
pub trait TransactionPayload: Pod {
    /// Expected payload byte length for this contract type, validated by
    /// the entry step against the declared length in the context.
    const EXPECTED_LEN: u16 = std::mem::size_of::<Self>() as u16;

    /// Reinterpret a raw byte slice as this payload type.
    fn from_bytes(bytes: &[u8]) -> Result<&Self, RejectReason> {
        bytemuck::try_from_bytes(bytes).map_err(|_| RejectReason::PayloadLengthMismatch {
            declared: u16::try_from(bytes.len()).unwrap_or(u16::MAX),
            expected: Self::EXPECTED_LEN,
        })
    }
}
