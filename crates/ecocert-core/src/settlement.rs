use ecocert_canonical::PrincipalId;
use serde::{Deserialize, Serialize};

/// A value transfer the host ledger is asked to perform.
///
/// The registry only decides that a transfer happens and how much; moving
/// value is the sink's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    /// Amount to transfer.
    pub amount: u64,
    /// Paying principal (the issuing auditor).
    pub from: PrincipalId,
    /// Receiving principal (the authority).
    pub to: PrincipalId,
}

/// Receives settlement instructions emitted by the engine.
pub trait SettlementSink {
    /// Accepts one instruction. Called at most once per operation.
    fn settle(&mut self, instruction: SettlementInstruction);
}

impl SettlementSink for Vec<SettlementInstruction> {
    fn settle(&mut self, instruction: SettlementInstruction) {
        self.push(instruction);
    }
}

impl<S: SettlementSink + ?Sized> SettlementSink for &mut S {
    fn settle(&mut self, instruction: SettlementInstruction) {
        (**self).settle(instruction);
    }
}
