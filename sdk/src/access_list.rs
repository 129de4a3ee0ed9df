//! The access list: a bounded, reusable record of the ledger addresses a
//! step is about to touch.
//!
//! The list is write-before-use: a step that will read or write shared
//! memory during the *next* invocation publishes the address and size class
//! now, so the host may run admission control between the current return
//! and the next call. The list itself enforces nothing beyond its capacity;
//! completeness and accuracy of the published footprint are the contract's
//! responsibility and the property every isolation guarantee rests on.

use {
    serde_derive::{Deserialize, Serialize},
    std::fmt,
    thiserror::Error,
};

/// Maximum number of accesses one step may publish.
pub const ACCESS_LIST_CAPACITY: usize = 7;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessListError {
    /// A step attempted to publish more than [`ACCESS_LIST_CAPACITY`]
    /// entries. Always a contract programming error, never a recoverable
    /// condition: silently wrapping or overwriting would corrupt the
    /// host's conflict-detection view.
    #[error("access list capacity of {ACCESS_LIST_CAPACITY} entries exceeded")]
    CapacityExceeded,
}

/// Ordered footprint of host-resolvable address tokens with their access
/// size classes (log2 of the byte length of each access).
///
/// Entries at indices `>= len()` are stale leftovers from earlier steps and
/// are unreachable through this API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessList {
    addresses: [u32; ACCESS_LIST_CAPACITY],
    size_classes: [u8; ACCESS_LIST_CAPACITY],
    count: u8,
}

impl AccessList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one access. Prior entries are left intact on failure.
    pub fn publish(&mut self, address: u32, size_class: u8) -> Result<(), AccessListError> {
        let index = self.count as usize;
        if index == ACCESS_LIST_CAPACITY {
            return Err(AccessListError::CapacityExceeded);
        }
        self.addresses[index] = address;
        self.size_classes[index] = size_class;
        self.count += 1;
        Ok(())
    }

    /// Forget all published entries. Called once per transaction, before
    /// the first step runs; the list never persists across transactions.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn address_at(&self, index: usize) -> Option<u32> {
        (index < self.len()).then(|| self.addresses[index])
    }

    pub fn size_class_at(&self, index: usize) -> Option<u8> {
        (index < self.len()).then(|| self.size_classes[index])
    }

    /// Iterate over the published `(address, size_class)` prefix.
    pub fn entries(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.addresses[..self.len()]
            .iter()
            .copied()
            .zip(self.size_classes[..self.len()].iter().copied())
    }

    /// True if any published entry overlaps any published entry of `other`,
    /// comparing the byte ranges implied by address and size class.
    pub fn conflicts_with(&self, other: &AccessList) -> bool {
        self.entries().any(|(addr_a, class_a)| {
            other.entries().any(|(addr_b, class_b)| {
                ranges_overlap(addr_a, class_a, addr_b, class_b)
            })
        })
    }
}

fn ranges_overlap(addr_a: u32, class_a: u8, addr_b: u32, class_b: u8) -> bool {
    let end_a = u64::from(addr_a) + (1u64 << class_a);
    let end_b = u64::from(addr_b) + (1u64 << class_b);
    u64::from(addr_a) < end_b && u64::from(addr_b) < end_a
}

impl fmt::Display for AccessList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utx {{ naddr = {}", self.count)?;
        for (index, (address, size_class)) in self.entries().enumerate() {
            write!(f, ", addrs[{index}] = {address} (log2len {size_class})")?;
        }
        write!(f, " }}")
    }
}

/// Size class of an access to a value of type `T`: log2 of its byte length.
/// `T` must have a power-of-two size.
pub const fn size_class_of<T>() -> u8 {
    let size = std::mem::size_of::<T>();
    assert!(size.is_power_of_two());
    size.trailing_zeros() as u8
}
