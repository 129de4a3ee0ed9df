//! One-shot transaction drive loop.

use {
    crate::{
        step_boundary_callback::{Admission, StepBoundaryCallback},
        stepper::{Stepper, StepperError},
    },
    log::debug,
    serde_derive::{Deserialize, Serialize},
    utx_sdk::{
        result::{Continuation, TransactionResult},
        state_machine::ContractStateMachine,
    },
};

/// How a driven transaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingOutcome {
    /// The chain reached its terminal sentinel.
    Completed {
        result: TransactionResult,
        /// Number of contract invocations, entry included.
        steps: usize,
    },
    /// The callback aborted the chain at a step boundary. Mutations from
    /// steps that already ran stay in effect.
    Cancelled { steps: usize },
}

/// Drive one transaction to termination: enter, then step until terminal,
/// consulting the callback at every boundary.
pub fn process_transaction<C: ContractStateMachine>(
    caller: u32,
    payload: C::Payload,
    ledger: &mut C::Ledger,
    callback: &mut impl StepBoundaryCallback,
) -> Result<ProcessingOutcome, StepperError> {
    let mut stepper = Stepper::<C>::new(caller, payload);
    let mut continuation = stepper.enter(ledger)?;
    let mut steps = 1;
    loop {
        match continuation {
            Continuation::Terminal(result) => {
                debug!("transaction terminal after {steps} step(s): {result:?}");
                return Ok(ProcessingOutcome::Completed { result, steps });
            }
            Continuation::Next(_) => {
                if callback.inspect_footprint(stepper.access_list()) == Admission::Abort {
                    debug!("transaction cancelled at step boundary {steps}");
                    return Ok(ProcessingOutcome::Cancelled { steps });
                }
                continuation = stepper.step(ledger)?;
                steps += 1;
            }
        }
    }
}

impl ProcessingOutcome {
    pub fn result(&self) -> Option<TransactionResult> {
        match self {
            Self::Completed { result, .. } => Some(*result),
            Self::Cancelled { .. } => None,
        }
    }

    pub fn was_applied(&self) -> bool {
        matches!(
            self,
            Self::Completed {
                result: TransactionResult::Applied,
                ..
            }
        )
    }
}
