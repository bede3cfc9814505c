//! The registry engine: validation, authorization, store mutation and,
//! for issuance, the fee settlement instruction.
//!
//! Every mutation takes a [`CallContext`] and either applies completely or
//! leaves state untouched. The engine holds no locks; hosts serialize calls.

use ecocert_canonical::{BusinessId, PrincipalId};
use tracing::{debug, info};

use crate::authority::AuthorityConfig;
use crate::certification::{CertUpdate, Certification, IssueRequest};
use crate::config::RegistryConfig;
use crate::context::CallContext;
use crate::errors::RegistryError;
use crate::gate;
use crate::operation::{Applied, Operation};
use crate::settlement::{SettlementInstruction, SettlementSink};
use crate::store::CertificationStore;
use crate::validation::{self, IssuanceSnapshot};

/// Single-authority certification registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEngine {
    authority: AuthorityConfig,
    store: CertificationStore,
}

impl Default for RegistryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryEngine {
    /// Empty registry with default parameters.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Empty registry with the given parameters.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            authority: AuthorityConfig::new(config.issuance_fee, config.burn_principal),
            store: CertificationStore::new(config.max_certs),
        }
    }

    /// Sets the authority principal. Succeeds once.
    pub fn set_authority(&mut self, ctx: &CallContext, principal: PrincipalId) -> Result<(), RegistryError> {
        match self.authority.set_authority(principal) {
            Ok(()) => {
                if let Some(authority) = self.authority.authority() {
                    info!(caller = %ctx.caller, authority = %authority, "authority set");
                }
                Ok(())
            }
            Err(err) => Err(rejected("set_authority", ctx, err)),
        }
    }

    /// Overwrites the issuance fee once an authority exists.
    pub fn set_issuance_fee(&mut self, ctx: &CallContext, fee: u64) -> Result<(), RegistryError> {
        match self.authority.set_issuance_fee(fee) {
            Ok(()) => {
                info!(caller = %ctx.caller, fee, "issuance fee changed");
                Ok(())
            }
            Err(err) => Err(rejected("set_issuance_fee", ctx, err)),
        }
    }

    /// Issues a certification for `business_id` and returns its id.
    ///
    /// Runs the ordered issuance checks, then hands one
    /// `{issuance_fee, caller -> authority}` instruction to `sink` before
    /// committing the record.
    pub fn issue_certification<S: SettlementSink + ?Sized>(
        &mut self,
        ctx: &CallContext,
        business_id: &BusinessId,
        request: &IssueRequest,
        sink: &mut S,
    ) -> Result<u64, RegistryError> {
        let snapshot = IssuanceSnapshot {
            next_cert_id: self.store.next_cert_id(),
            max_certs: self.store.max_certs(),
            business_exists: self.store.is_certified(business_id),
            authority: self.authority.authority(),
        };
        let validated = validation::check_issuance(request, ctx, snapshot)
            .map_err(|err| rejected("issue", ctx, err))?;

        let instruction = SettlementInstruction {
            amount: self.authority.issuance_fee(),
            from: ctx.caller.clone(),
            to: validated.authority.clone(),
        };
        let record = Certification::from_request(
            self.store.next_cert_id(),
            request,
            validated.cert_type,
            validated.proof_hash,
        );

        sink.settle(instruction);
        let cert_id = self.store.issue(business_id.clone(), record)?;
        info!(
            business_id = %business_id,
            cert_id,
            auditor = %ctx.caller,
            height = ctx.height,
            "certification issued"
        );
        Ok(cert_id)
    }

    /// Clears the active flag. Repeating it is a silent success.
    pub fn revoke_certification(
        &mut self,
        ctx: &CallContext,
        business_id: &BusinessId,
        reason: &str,
    ) -> Result<(), RegistryError> {
        gate::authorize_auditor(self.store.get(business_id), &ctx.caller)
            .and_then(|_| validation::check_revoke_reason(reason))
            .map_err(|err| rejected("revoke", ctx, err))?;

        self.store.revoke(business_id)?;
        info!(business_id = %business_id, caller = %ctx.caller, reason, "certification revoked");
        Ok(())
    }

    /// Replaces score and expiry and records the update.
    pub fn update_certification(
        &mut self,
        ctx: &CallContext,
        business_id: &BusinessId,
        new_score: u32,
        new_expiry: u64,
    ) -> Result<(), RegistryError> {
        gate::authorize_auditor(self.store.get(business_id), &ctx.caller)
            .and_then(|_| validation::check_update(new_score, new_expiry, ctx.height))
            .map_err(|err| rejected("update", ctx, err))?;

        self.store.update(
            business_id,
            CertUpdate {
                update_score: new_score,
                update_expiry: new_expiry,
                update_height: ctx.height,
                updater: ctx.caller.clone(),
            },
        )?;
        info!(
            business_id = %business_id,
            caller = %ctx.caller,
            new_score,
            new_expiry,
            "certification updated"
        );
        Ok(())
    }

    /// Dispatches a serialized operation.
    pub fn apply<S: SettlementSink + ?Sized>(
        &mut self,
        ctx: &CallContext,
        operation: &Operation,
        sink: &mut S,
    ) -> Result<Applied, RegistryError> {
        match operation {
            Operation::SetAuthority { principal } => {
                self.set_authority(ctx, principal.clone()).map(|()| Applied::Done)
            }
            Operation::SetIssuanceFee { fee } => self.set_issuance_fee(ctx, *fee).map(|()| Applied::Done),
            Operation::Issue {
                business_id,
                request,
            } => self
                .issue_certification(ctx, business_id, request, sink)
                .map(|cert_id| Applied::Issued { cert_id }),
            Operation::Revoke {
                business_id,
                reason,
            } => self
                .revoke_certification(ctx, business_id, reason)
                .map(|()| Applied::Done),
            Operation::Update {
                business_id,
                new_score,
                new_expiry,
            } => self
                .update_certification(ctx, business_id, *new_score, *new_expiry)
                .map(|()| Applied::Done),
        }
    }

    /// Record for `business_id`.
    pub fn get_certification(&self, business_id: &BusinessId) -> Option<&Certification> {
        self.store.get(business_id)
    }

    /// Active and unexpired at `height`; `false` for unknown businesses.
    pub fn check_cert_validity(&self, business_id: &BusinessId, height: u64) -> bool {
        self.store.check_validity(business_id, height)
    }

    /// Certifications ever issued.
    pub fn get_cert_count(&self) -> u64 {
        self.store.count()
    }

    /// Whether `business_id` has a record, active or not.
    pub fn is_certified(&self, business_id: &BusinessId) -> bool {
        self.store.is_certified(business_id)
    }

    /// Most recent update for `business_id`.
    pub fn get_last_update(&self, business_id: &BusinessId) -> Option<&CertUpdate> {
        self.store.get_update(business_id)
    }

    /// Business that received `cert_id`.
    pub fn business_for_cert(&self, cert_id: u64) -> Option<&BusinessId> {
        self.store.business_for(cert_id)
    }

    /// Configured authority.
    pub fn authority(&self) -> Option<&PrincipalId> {
        self.authority.authority()
    }

    /// Current issuance fee.
    pub fn issuance_fee(&self) -> u64 {
        self.authority.issuance_fee()
    }

    /// Capacity.
    pub fn max_certs(&self) -> u64 {
        self.store.max_certs()
    }
}

fn rejected(operation: &'static str, ctx: &CallContext, err: RegistryError) -> RegistryError {
    debug!(
        operation,
        caller = %ctx.caller,
        height = ctx.height,
        kind = err.kind(),
        code = err.code(),
        "mutation rejected"
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certification::Metrics;

    fn request(auditor: &str) -> IssueRequest {
        IssueRequest {
            auditor_id: PrincipalId::new(auditor),
            issue_date: 0,
            expiry_date: 100,
            score: 80,
            renewal_period: 365,
            cert_type: "eco".to_string(),
            compliance_level: 4,
            grace_period: 30,
            location: "Costa Rica".to_string(),
            category: "Tourism".to_string(),
            review_rate: 5,
            proof_hash: vec![0; 32],
            metrics: Metrics {
                carbon: 100,
                waste: 50,
                energy: 200,
            },
        }
    }

    #[test]
    fn rejected_issuance_emits_no_settlement() {
        let mut engine = RegistryEngine::new();
        let mut sink: Vec<SettlementInstruction> = Vec::new();
        let ctx = CallContext::new("ST3AUDITOR", 0);
        let err = engine
            .issue_certification(&ctx, &BusinessId::new("biz"), &request("ST3AUDITOR"), &mut sink)
            .unwrap_err();
        assert_eq!(err, RegistryError::AuthorityNotSet);
        assert!(sink.is_empty());
        assert_eq!(engine.get_cert_count(), 0);
    }

    #[test]
    fn issuance_settles_current_fee_to_authority() {
        let mut engine = RegistryEngine::new();
        let admin = CallContext::new("ST1ADMIN", 0);
        engine.set_authority(&admin, PrincipalId::new("ST2TEST")).unwrap();
        engine.set_issuance_fee(&admin, 750).unwrap();

        let mut sink = Vec::new();
        let ctx = CallContext::new("ST3AUDITOR", 0);
        engine
            .issue_certification(&ctx, &BusinessId::new("biz"), &request("ST3AUDITOR"), &mut sink)
            .unwrap();
        assert_eq!(
            sink,
            vec![SettlementInstruction {
                amount: 750,
                from: PrincipalId::new("ST3AUDITOR"),
                to: PrincipalId::new("ST2TEST"),
            }]
        );
    }

    #[test]
    fn apply_dispatches_every_operation() {
        let mut engine = RegistryEngine::new();
        let mut sink: Vec<SettlementInstruction> = Vec::new();
        let ctx = CallContext::new("ST3AUDITOR", 0);
        let business_id = BusinessId::new("biz");

        let ops = [
            Operation::SetAuthority {
                principal: PrincipalId::new("ST2TEST"),
            },
            Operation::SetIssuanceFee { fee: 10 },
            Operation::Issue {
                business_id: business_id.clone(),
                request: request("ST3AUDITOR"),
            },
            Operation::Update {
                business_id: business_id.clone(),
                new_score: 95,
                new_expiry: 300,
            },
            Operation::Revoke {
                business_id: business_id.clone(),
                reason: "Violation".to_string(),
            },
        ];
        let results: Vec<Applied> = ops
            .iter()
            .map(|op| engine.apply(&ctx, op, &mut sink).unwrap())
            .collect();

        assert_eq!(results[2], Applied::Issued { cert_id: 0 });
        assert!(results
            .iter()
            .enumerate()
            .all(|(i, r)| i == 2 || *r == Applied::Done));
        let cert = engine.get_certification(&business_id).unwrap();
        assert_eq!((cert.score, cert.expiry_date, cert.status), (95, 300, false));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].amount, 10);
    }

    #[test]
    fn revoke_checks_existence_then_auditor_then_reason() {
        let mut engine = RegistryEngine::new();
        let ctx = CallContext::new("ST3AUDITOR", 0);
        let fake = CallContext::new("ST4FAKE", 0);
        let business_id = BusinessId::new("biz");

        assert_eq!(
            engine.revoke_certification(&fake, &business_id, ""),
            Err(RegistryError::CertNotFound)
        );

        engine.set_authority(&ctx, PrincipalId::new("ST2TEST")).unwrap();
        engine
            .issue_certification(&ctx, &business_id, &request("ST3AUDITOR"), &mut Vec::<SettlementInstruction>::new())
            .unwrap();
        assert_eq!(
            engine.revoke_certification(&fake, &business_id, ""),
            Err(RegistryError::NotAuthorized)
        );
        assert_eq!(
            engine.revoke_certification(&ctx, &business_id, ""),
            Err(RegistryError::InvalidRevokeReason)
        );
        assert!(engine.get_certification(&business_id).unwrap().status);
    }
}
