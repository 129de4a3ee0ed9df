//! Continuations, terminal results and the rejection taxonomy.
//!
//! The original wire protocol signaled "fully applied" and "rejected"
//! identically, forcing callers to infer success from the absence of
//! mutation. The terminal sentinel here carries an explicit
//! [`TransactionResult`] instead; the absence-of-mutation property still
//! holds for every rejection and remains independently testable.

use {
    serde_derive::{Deserialize, Serialize},
    thiserror::Error,
};

/// Why a transaction was rejected. Rejection always means immediate
/// termination with no ledger mutation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("caller identifier out of the valid domain range")]
    CallerOutOfRange,
    #[error("declared payload length {declared} does not match expected {expected}")]
    PayloadLengthMismatch { declared: u16, expected: u16 },
    #[error("transfer recipient out of range")]
    RecipientOutOfRange,
    #[error("transfer destination equals source")]
    SelfTransfer,
    #[error("amount must be non-zero")]
    ZeroAmount,
    #[error("credit would overflow the balance accumulator")]
    BalanceOverflow,
    #[error("insufficient balance for debit")]
    InsufficientBalance,
    #[error("item identifier out of range")]
    ItemOutOfRange,
    #[error("bid does not exceed the current highest bid")]
    BidTooLow,
    #[error("list has no free slot")]
    ListFull,
    #[error("value is reserved as the empty-slot marker")]
    ReservedValue,
    #[error("slot cursor escaped the ledger")]
    SlotOutOfRange,
}

/// The two recognized failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectKind {
    /// Invalid caller id, wrong payload shape, or a domain-specific guard
    /// failure detected before any mutation.
    Precondition,
    /// Unsigned overflow on credit or insufficient balance on debit.
    ArithmeticGuard,
}

impl RejectReason {
    pub fn kind(&self) -> RejectKind {
        match self {
            Self::BalanceOverflow | Self::InsufficientBalance => RejectKind::ArithmeticGuard,
            _ => RejectKind::Precondition,
        }
    }
}

/// Terminal outcome of a micro-transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionResult {
    /// All mutations of the chain took effect.
    Applied,
    /// Terminated with no mutation having occurred.
    Rejected(RejectReason),
}

impl TransactionResult {
    pub fn was_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Applied => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// What to run next: either the identifier of the next step, or the
/// terminal sentinel. Carries no other data; everything flows through the
/// context and access list threaded into every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation<S> {
    Next(S),
    Terminal(TransactionResult),
}

impl<S> Continuation<S> {
    pub fn applied() -> Self {
        Self::Terminal(TransactionResult::Applied)
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self::Terminal(TransactionResult::Rejected(reason))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_classification() {
        assert_eq!(
            RejectReason::CallerOutOfRange.kind(),
            RejectKind::Precondition
        );
        assert_eq!(RejectReason::BidTooLow.kind(), RejectKind::Precondition);
        assert_eq!(
            RejectReason::InsufficientBalance.kind(),
            RejectKind::ArithmeticGuard
        );
        assert_eq!(
            RejectReason::BalanceOverflow.kind(),
            RejectKind::ArithmeticGuard
        );
    }

    #[test]
    fn terminal_constructors() {
        let applied: Continuation<u8> = Continuation::applied();
        assert!(applied.is_terminal());
        assert_eq!(
            applied,
            Continuation::Terminal(TransactionResult::Applied)
        );

        let rejected: Continuation<u8> = Continuation::rejected(RejectReason::ZeroAmount);
        assert_eq!(
            rejected,
            Continuation::Terminal(TransactionResult::Rejected(RejectReason::ZeroAmount))
        );
        assert!(!TransactionResult::Rejected(RejectReason::ZeroAmount).was_applied());
    }
}
