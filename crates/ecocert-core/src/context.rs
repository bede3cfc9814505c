use ecocert_canonical::PrincipalId;
use serde::{Deserialize, Serialize};

/// Per-call inputs supplied by the host: who is acting, and at what height.
///
/// The engine never reads a clock or a session; both values arrive here and
/// stay fixed for the duration of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Already-authenticated caller identity.
    pub caller: PrincipalId,
    /// Current block height on the external clock.
    pub height: u64,
}

impl CallContext {
    /// Builds a context for `caller` at `height`.
    pub fn new(caller: impl Into<PrincipalId>, height: u64) -> Self {
        Self {
            caller: caller.into(),
            height,
        }
    }
}
