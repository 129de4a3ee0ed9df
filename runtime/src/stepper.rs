//! Per-transaction stepper.

use {
    log::trace,
    thiserror::Error,
    utx_sdk::{
        access_list::{AccessList, AccessListError},
        context::TransactionContext,
        payload::TransactionPayload,
        result::{Continuation, TransactionResult},
        state_machine::ContractStateMachine,
    },
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperError {
    #[error("transaction was already entered")]
    AlreadyEntered,
    #[error("transaction has not been entered")]
    NotEntered,
    #[error("continuation chain is already terminal")]
    AlreadyTerminal,
    /// Fatal contract fault surfaced by a step.
    #[error(transparent)]
    AccessList(#[from] AccessListError),
}

enum Position<S> {
    Pending,
    Running(S),
    Terminal(TransactionResult),
}

/// Drives one micro-transaction through its continuation chain.
///
/// Each stepper owns the transaction's payload, context and access list,
/// so a scheduling host keeps one stepper per in-flight transaction and
/// interleaves `step` calls freely. The shared ledger stays outside and is
/// lent to the contract only for the duration of each call.
pub struct Stepper<C: ContractStateMachine> {
    payload: C::Payload,
    context: TransactionContext,
    access_list: AccessList,
    position: Position<C::Step>,
}

impl<C: ContractStateMachine> Stepper<C> {
    pub fn new(caller: u32, payload: C::Payload) -> Self {
        Self {
            payload,
            context: TransactionContext::new(caller, C::Payload::EXPECTED_LEN),
            access_list: AccessList::new(),
            position: Position::Pending,
        }
    }

    /// Run the entry step. Valid exactly once per transaction.
    pub fn enter(
        &mut self,
        ledger: &mut C::Ledger,
    ) -> Result<Continuation<C::Step>, StepperError> {
        if !matches!(self.position, Position::Pending) {
            return Err(StepperError::AlreadyEntered);
        }
        let continuation = C::enter(
            &self.payload,
            &mut self.access_list,
            &mut self.context,
            ledger,
        )?;
        trace!(
            "enter caller={} -> {:?}, {}",
            { self.context.caller },
            continuation,
            self.access_list
        );
        Ok(self.advance(continuation))
    }

    /// Run the step named by the current continuation.
    pub fn step(&mut self, ledger: &mut C::Ledger) -> Result<Continuation<C::Step>, StepperError> {
        let step = match &self.position {
            Position::Pending => return Err(StepperError::NotEntered),
            Position::Terminal(_) => return Err(StepperError::AlreadyTerminal),
            Position::Running(step) => *step,
        };
        let continuation = C::step(
            step,
            &self.payload,
            &mut self.access_list,
            &mut self.context,
            ledger,
        )?;
        trace!("step {:?} -> {:?}, {}", step, continuation, self.access_list);
        Ok(self.advance(continuation))
    }

    fn advance(&mut self, continuation: Continuation<C::Step>) -> Continuation<C::Step> {
        self.position = match continuation {
            Continuation::Next(step) => Position::Running(step),
            Continuation::Terminal(result) => Position::Terminal(result),
        };
        continuation
    }

    /// The transaction's most recently published footprint. Hosts read
    /// this between calls for admission control.
    pub fn access_list(&self) -> &AccessList {
        &self.access_list
    }

    pub fn context(&self) -> &TransactionContext {
        &self.context
    }

    /// Tagged identifier of the step the next `step` call would run.
    pub fn current_step_id(&self) -> Option<u8> {
        match &self.position {
            Position::Running(step) => Some((*step).into()),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.position, Position::Terminal(_))
    }

    /// Terminal result, once the chain has finished.
    pub fn result(&self) -> Option<TransactionResult> {
        match &self.position {
            Position::Terminal(result) => Some(*result),
            _ => None,
        }
    }
}
