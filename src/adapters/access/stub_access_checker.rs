//! Stub implementation of AccessChecker for development and testing.
//!
//! Authentication and role resolution happen upstream of this crate;
//! production deployments plug in an adapter backed by whatever the
//! gateway provides. This stub always grants access.

use async_trait::async_trait;

use crate::domain::foundation::{ClientId, DomainError, TrainerId};
use crate::ports::{AccessChecker, AccessResult};

/// Stub AccessChecker that always grants access.
///
/// For development and testing purposes only.
#[derive(Debug, Clone)]
pub struct StubAccessChecker {
    /// Whether to simulate denied access for testing.
    deny_access: bool,
}

impl Default for StubAccessChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl StubAccessChecker {
    /// Create a new stub that always allows access.
    pub fn new() -> Self {
        Self { deny_access: false }
    }

    /// Create a stub that denies all access (for testing denial flows).
    pub fn denying() -> Self {
        Self { deny_access: true }
    }

    fn result(&self) -> AccessResult {
        if self.deny_access {
            AccessResult::Denied("access denied by policy".to_string())
        } else {
            AccessResult::Allowed
        }
    }
}

#[async_trait]
impl AccessChecker for StubAccessChecker {
    async fn can_book(&self, _client_id: &ClientId) -> Result<AccessResult, DomainError> {
        Ok(self.result())
    }

    async fn can_manage_schedule(
        &self,
        _trainer_id: &TrainerId,
    ) -> Result<AccessResult, DomainError> {
        Ok(self.result())
    }
}
