//! Sealed single-step auction bid contract.
//!
//! The whole transaction runs in the entry call: validate bidder, item and
//! amount against the current highest bid, then atomically install the new
//! leader and credit the displaced leader's refund accumulator with
//! exactly the escrow being displaced. `enter -> Terminal` with no
//! intermediate steps, and no footprint publication - this contract
//! demonstrates that access-list use is optional when the host needs no
//! fine-grained conflict detection for a path.

use {
    bytemuck_derive::{Pod, Zeroable},
    utx_sdk::{
        access_list::{AccessList, AccessListError},
        context::TransactionContext,
        payload::TransactionPayload,
        result::{Continuation, RejectReason},
        state_machine::ContractStateMachine,
    },
};

/// Number of bidder slots.
pub const USER_COUNT: u32 = 100;
/// Number of auctioned items.
pub const ITEM_COUNT: u32 = 3;

/// Bid payload. Packed; field order is part of the wire contract.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct AuctionPayload {
    /// Item being bid on.
    pub item: u32,
    /// Escrowed bid amount.
    pub amount: u32,
}

impl TransactionPayload for AuctionPayload {}

#[derive(Clone, Copy, Default)]
struct ItemRecord {
    highest_bid: u64,
    highest_bidder: Option<u32>,
}

/// Item leaderboard plus per-user refund accumulators.
pub struct AuctionLedger {
    items: [ItemRecord; ITEM_COUNT as usize],
    refunds: Box<[u64]>,
}

impl Default for AuctionLedger {
    fn default() -> Self {
        Self {
            items: [ItemRecord::default(); ITEM_COUNT as usize],
            refunds: vec![0; USER_COUNT as usize].into_boxed_slice(),
        }
    }
}

impl AuctionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highest_bid(&self, item: u32) -> Option<u64> {
        self.items.get(item as usize).map(|record| record.highest_bid)
    }

    pub fn highest_bidder(&self, item: u32) -> Option<u32> {
        self.items
            .get(item as usize)
            .and_then(|record| record.highest_bidder)
    }

    /// Escrow returned to a user after being outbid.
    pub fn refund_balance(&self, user: u32) -> Option<u64> {
        self.refunds.get(user as usize).copied()
    }

    /// Clear the leaderboard and refunds. Harness-only.
    pub fn reset(&mut self) {
        self.items = [ItemRecord::default(); ITEM_COUNT as usize];
        self.refunds.fill(0);
    }
}

/// The auction graph has no steps after entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionStep {}

impl From<AuctionStep> for u8 {
    fn from(step: AuctionStep) -> Self {
        match step {}
    }
}

pub struct AuctionContract;

impl ContractStateMachine for AuctionContract {
    type Payload = AuctionPayload;
    type Ledger = AuctionLedger;
    type Step = AuctionStep;

    fn enter(
        payload: &AuctionPayload,
        access_list: &mut AccessList,
        context: &mut TransactionContext,
        ledger: &mut AuctionLedger,
    ) -> Result<Continuation<AuctionStep>, AccessListError> {
        let caller = context.caller;
        if caller >= USER_COUNT {
            return Ok(Continuation::rejected(RejectReason::CallerOutOfRange));
        }
        let declared = context.payload_len;
        if declared != AuctionPayload::EXPECTED_LEN {
            return Ok(Continuation::rejected(RejectReason::PayloadLengthMismatch {
                declared,
                expected: AuctionPayload::EXPECTED_LEN,
            }));
        }
        let item = payload.item;
        if item >= ITEM_COUNT {
            return Ok(Continuation::rejected(RejectReason::ItemOutOfRange));
        }

        let bid = u64::from(payload.amount);
        let record = &mut ledger.items[item as usize];
        if bid <= record.highest_bid {
            return Ok(Continuation::rejected(RejectReason::BidTooLow));
        }
        if let Some(displaced) = record.highest_bidder {
            let Some(refunded) = ledger.refunds[displaced as usize].checked_add(record.highest_bid)
            else {
                return Ok(Continuation::rejected(RejectReason::BalanceOverflow));
            };
            ledger.refunds[displaced as usize] = refunded;
        }
        record.highest_bid = bid;
        record.highest_bidder = Some(caller);

        access_list.reset();
        Ok(Continuation::applied())
    }

    fn step(
        step: AuctionStep,
        _payload: &AuctionPayload,
        _access_list: &mut AccessList,
        _context: &mut TransactionContext,
        _ledger: &mut AuctionLedger,
    ) -> Result<Continuation<AuctionStep>, AccessListError> {
        match step {}
    }
}
