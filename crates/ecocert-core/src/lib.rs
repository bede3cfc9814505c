//! Certification lifecycle engine for the Ecocert registry.
//!
//! A single-authority registry that issues, updates, revokes and queries
//! sustainability certifications. The engine receives the authenticated
//! caller and the current block height with every call, validates fields in
//! a fixed order, checks that the caller is the auditor of record, and on
//! issuance emits one fee settlement instruction for the host ledger.
//!
//! Durability, value transfer and identity verification belong to the host.
//!
//! ```
//! use ecocert_core::{CallContext, IssueRequest, Metrics, RegistryEngine, SettlementInstruction};
//! use ecocert_canonical::{BusinessId, PrincipalId};
//!
//! let mut engine = RegistryEngine::new();
//! let auditor = CallContext::new("ST3AUDITOR", 0);
//! engine.set_authority(&auditor, PrincipalId::new("ST2TEST")).unwrap();
//!
//! let request = IssueRequest {
//!     auditor_id: PrincipalId::new("ST3AUDITOR"),
//!     issue_date: 0,
//!     expiry_date: 100,
//!     score: 80,
//!     renewal_period: 365,
//!     cert_type: "eco".into(),
//!     compliance_level: 4,
//!     grace_period: 30,
//!     location: "Costa Rica".into(),
//!     category: "Tourism".into(),
//!     review_rate: 5,
//!     proof_hash: vec![0; 32],
//!     metrics: Metrics { carbon: 100, waste: 50, energy: 200 },
//! };
//! let mut settlements: Vec<SettlementInstruction> = Vec::new();
//! let cert_id = engine
//!     .issue_certification(&auditor, &BusinessId::new("biz-1"), &request, &mut settlements)
//!     .unwrap();
//! assert_eq!(cert_id, 0);
//! assert_eq!(settlements[0].amount, 500);
//! ```
#![deny(missing_docs)]

/// Authority principal and issuance fee.
pub mod authority;
/// Certification records and issuance input.
pub mod certification;
/// Registry parameters.
pub mod config;
/// Per-call caller and height.
pub mod context;
/// The registry engine.
pub mod engine;
/// Error kinds.
pub mod errors;
/// Authorization checks.
pub mod gate;
/// Serializable operations.
pub mod operation;
/// Fee settlement instructions.
pub mod settlement;
/// Certification state.
pub mod store;
/// Ordered field validation.
pub mod validation;

pub use authority::AuthorityConfig;
pub use certification::{CertType, CertUpdate, Certification, IssueRequest, Metrics};
pub use config::RegistryConfig;
pub use context::CallContext;
pub use engine::RegistryEngine;
pub use errors::{ConfigError, RegistryError};
pub use operation::{Applied, Operation};
pub use settlement::{SettlementInstruction, SettlementSink};
pub use store::CertificationStore;
