//! Two-phase payment transfer contract.
//!
//! The designated minter (user 0) creates balance out of thin air; every
//! other caller moves balance to a recipient. Both paths split into a
//! declare step that publishes the balance addresses the next call will
//! touch, followed by a commit step that re-derives the same addresses
//! from payload and context and performs the bounded arithmetic:
//!
//! ```text
//! enter -> MintDeclare -> MintCommit   (caller == MINTER)
//! enter -> PayDeclare  -> PayCommit    (otherwise)
//! ```
//!
//! A host may therefore run conflict detection on the published footprint
//! after the declare step returns and before admitting the commit step.

use {
    bytemuck_derive::{Pod, Zeroable},
    num_enum::{IntoPrimitive, TryFromPrimitive},
    utx_sdk::{
        access_list::{size_class_of, AccessList, AccessListError},
        context::TransactionContext,
        payload::TransactionPayload,
        result::{Continuation, RejectReason},
        state_machine::ContractStateMachine,
    },
};

/// Number of user balance slots in the ledger.
pub const USER_COUNT: u32 = 10_000;
/// The only caller allowed to mint.
pub const MINTER: u32 = 0;

/// Transfer payload. Packed; field order is part of the wire contract.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct PaymentPayload {
    /// Recipient user id.
    pub to: u32,
    /// Amount to move (or mint).
    pub amount: u32,
}

impl TransactionPayload for PaymentPayload {}

/// Balances keyed by user id.
pub struct PaymentLedger {
    balances: Box<[u64]>,
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self {
            balances: vec![0; USER_COUNT as usize].into_boxed_slice(),
        }
    }
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, user: u32) -> Option<u64> {
        self.balances.get(user as usize).copied()
    }

    /// Sum of all balances. Invariant across accepted transfers; grows by
    /// exactly the minted amount on accepted mints.
    pub fn total_supply(&self) -> u128 {
        self.balances.iter().map(|balance| u128::from(*balance)).sum()
    }

    /// Zero every balance. Harness-only, between benchmark iterations.
    pub fn reset(&mut self) {
        self.balances.fill(0);
    }

    #[cfg(feature = "dev-context-only-utils")]
    pub fn set_balance(&mut self, user: u32, balance: u64) {
        self.balances[user as usize] = balance;
    }
}

/// Host-resolvable address token of a user's balance slot: its byte offset
/// within the balance region.
pub fn balance_address(user: u32) -> u32 {
    user * size_of_balance()
}

const fn size_of_balance() -> u32 {
    std::mem::size_of::<u64>() as u32
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum PaymentStep {
    MintDeclare,
    MintCommit,
    PayDeclare,
    PayCommit,
}

pub struct PaymentContract;

impl ContractStateMachine for PaymentContract {
    type Payload = PaymentPayload;
    type Ledger = PaymentLedger;
    type Step = PaymentStep;

    fn enter(
        payload: &PaymentPayload,
        access_list: &mut AccessList,
        context: &mut TransactionContext,
        _ledger: &mut PaymentLedger,
    ) -> Result<Continuation<PaymentStep>, AccessListError> {
        let caller = context.caller;
        if caller >= USER_COUNT {
            return Ok(Continuation::rejected(RejectReason::CallerOutOfRange));
        }
        let declared = context.payload_len;
        if declared != PaymentPayload::EXPECTED_LEN {
            return Ok(Continuation::rejected(RejectReason::PayloadLengthMismatch {
                declared,
                expected: PaymentPayload::EXPECTED_LEN,
            }));
        }
        let to = payload.to;
        if to == caller {
            return Ok(Continuation::rejected(RejectReason::SelfTransfer));
        }
        if to >= USER_COUNT {
            return Ok(Continuation::rejected(RejectReason::RecipientOutOfRange));
        }
        if payload.amount == 0 {
            return Ok(Continuation::rejected(RejectReason::ZeroAmount));
        }

        access_list.reset();
        Ok(Continuation::Next(if caller == MINTER {
            PaymentStep::MintDeclare
        } else {
            PaymentStep::PayDeclare
        }))
    }

    fn step(
        step: PaymentStep,
        payload: &PaymentPayload,
        access_list: &mut AccessList,
        context: &mut TransactionContext,
        ledger: &mut PaymentLedger,
    ) -> Result<Continuation<PaymentStep>, AccessListError> {
        match step {
            PaymentStep::MintDeclare => {
                access_list.publish(balance_address(payload.to), size_class_of::<u64>())?;
                Ok(Continuation::Next(PaymentStep::MintCommit))
            }
            PaymentStep::MintCommit => {
                // Recipient re-derived from the payload; validated at entry.
                let to = payload.to as usize;
                match ledger.balances[to].checked_add(u64::from(payload.amount)) {
                    Some(credited) => {
                        ledger.balances[to] = credited;
                        Ok(Continuation::applied())
                    }
                    None => Ok(Continuation::rejected(RejectReason::BalanceOverflow)),
                }
            }
            PaymentStep::PayDeclare => {
                access_list.publish(balance_address(context.caller), size_class_of::<u64>())?;
                access_list.publish(balance_address(payload.to), size_class_of::<u64>())?;
                Ok(Continuation::Next(PaymentStep::PayCommit))
            }
            PaymentStep::PayCommit => {
                // Source and destination re-derived from context and
                // payload; both validated at entry.
                let from = context.caller as usize;
                let to = payload.to as usize;
                let amount = u64::from(payload.amount);
                let Some(debited) = ledger.balances[from].checked_sub(amount) else {
                    return Ok(Continuation::rejected(RejectReason::InsufficientBalance));
                };
                let Some(credited) = ledger.balances[to].checked_add(amount) else {
                    return Ok(Continuation::rejected(RejectReason::BalanceOverflow));
                };
                ledger.balances[from] = debited;
                ledger.balances[to] = credited;
                Ok(Continuation::applied())
            }
        }
    }
}
