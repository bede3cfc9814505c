//! In-memory certification state.
//!
//! Three exact-key maps: business to record, business to latest update, and
//! cert id back to business. Records are replaced, never deleted.

use std::collections::BTreeMap;

use ecocert_canonical::BusinessId;

use crate::certification::{CertUpdate, Certification};
use crate::errors::RegistryError;

/// Certification records and their indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificationStore {
    certifications: BTreeMap<BusinessId, Certification>,
    updates: BTreeMap<BusinessId, CertUpdate>,
    cert_index: BTreeMap<u64, BusinessId>,
    next_cert_id: u64,
    max_certs: u64,
}

impl CertificationStore {
    /// Empty store holding at most `max_certs` certifications.
    pub fn new(max_certs: u64) -> Self {
        Self {
            max_certs,
            ..Self::default()
        }
    }

    /// Inserts `record` under `business_id` with the next dense id.
    ///
    /// The record's own `cert_id` is ignored. Forward and reverse entries
    /// are written together.
    pub fn issue(&mut self, business_id: BusinessId, record: Certification) -> Result<u64, RegistryError> {
        if self.next_cert_id >= self.max_certs {
            return Err(RegistryError::MaxCertsExceeded);
        }
        if self.certifications.contains_key(&business_id) {
            return Err(RegistryError::CertAlreadyExists);
        }
        let cert_id = self.next_cert_id;
        self.cert_index.insert(cert_id, business_id.clone());
        self.certifications
            .insert(business_id, Certification { cert_id, ..record });
        self.next_cert_id += 1;
        Ok(cert_id)
    }

    /// Clears the active flag. Revoking an already revoked record is a no-op.
    pub fn revoke(&mut self, business_id: &BusinessId) -> Result<(), RegistryError> {
        let current = self
            .certifications
            .get(business_id)
            .ok_or(RegistryError::CertNotFound)?;
        let next = current.revoked();
        self.certifications.insert(business_id.clone(), next);
        Ok(())
    }

    /// Overwrites score and expiry, and replaces the latest-update slot.
    pub fn update(&mut self, business_id: &BusinessId, update: CertUpdate) -> Result<(), RegistryError> {
        let current = self
            .certifications
            .get(business_id)
            .ok_or(RegistryError::CertNotFound)?;
        let next = current.with_terms(update.update_score, update.update_expiry);
        self.certifications.insert(business_id.clone(), next);
        self.updates.insert(business_id.clone(), update);
        Ok(())
    }

    /// Number of certifications ever issued, revoked ones included.
    pub fn count(&self) -> u64 {
        self.next_cert_id
    }

    /// Id the next issuance will receive.
    pub fn next_cert_id(&self) -> u64 {
        self.next_cert_id
    }

    /// Capacity.
    pub fn max_certs(&self) -> u64 {
        self.max_certs
    }

    /// Active and unexpired at `height`; `false` when absent.
    pub fn check_validity(&self, business_id: &BusinessId, height: u64) -> bool {
        self.certifications
            .get(business_id)
            .is_some_and(|cert| cert.is_valid_at(height))
    }

    /// Whether a record exists, regardless of status.
    pub fn is_certified(&self, business_id: &BusinessId) -> bool {
        self.certifications.contains_key(business_id)
    }

    /// Record for `business_id`.
    pub fn get(&self, business_id: &BusinessId) -> Option<&Certification> {
        self.certifications.get(business_id)
    }

    /// Latest update for `business_id`.
    pub fn get_update(&self, business_id: &BusinessId) -> Option<&CertUpdate> {
        self.updates.get(business_id)
    }

    /// Business that received `cert_id`.
    pub fn business_for(&self, cert_id: u64) -> Option<&BusinessId> {
        self.cert_index.get(&cert_id)
    }
}
