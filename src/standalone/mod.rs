//! Standalone wiring.
//!
//! Builds a fully working [`Api`] over the in-memory stores and the
//! filesystem evidence backend, driven only by [`Config`]. Used for local
//! development and the integration test suite; a deployment with real
//! backends would wire the same seams differently.

use std::sync::Arc;

use crate::access::StaticTokenResolver;
use crate::api::Api;
use crate::config::Config;
use crate::evidence::{self, FilesystemEvidenceStore};
use crate::storage::memory::{
    InMemoryEnrollmentStore, InMemoryPackageCatalog, InMemorySalarySlipStore,
    InMemoryUserDirectory,
};

/// A wired standalone stack.
///
/// The store handles stay exposed so callers can seed users, packages and
/// credentials, and inject failures in tests.
pub struct Standalone {
    pub api: Api,
    pub resolver: Arc<StaticTokenResolver>,
    pub users: Arc<InMemoryUserDirectory>,
    pub packages: Arc<InMemoryPackageCatalog>,
    pub enrollments: Arc<InMemoryEnrollmentStore>,
    pub slips: Arc<InMemorySalarySlipStore>,
}

impl Standalone {
    /// Wire the in-memory stack from configuration.
    ///
    /// Creates the evidence directory if it doesn't exist.
    pub async fn from_config(config: &Config) -> evidence::Result<Self> {
        let resolver = Arc::new(StaticTokenResolver::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let packages = Arc::new(InMemoryPackageCatalog::new());
        let enrollments = Arc::new(InMemoryEnrollmentStore::new());
        let slips = Arc::new(InMemorySalarySlipStore::new());

        let evidence = Arc::new(
            FilesystemEvidenceStore::new(
                &config.evidence.base_path,
                config.evidence.base_url.clone(),
            )
            .await?,
        );

        let api = Api::new(
            Arc::clone(&resolver) as Arc<dyn crate::access::IdentityResolver>,
            evidence,
            Arc::clone(&enrollments) as Arc<dyn crate::storage::EnrollmentStore>,
            Arc::clone(&slips) as Arc<dyn crate::storage::SalarySlipStore>,
            Arc::clone(&users) as Arc<dyn crate::storage::UserDirectory>,
            Arc::clone(&packages) as Arc<dyn crate::storage::PackageCatalog>,
        );

        Ok(Self {
            api,
            resolver,
            users,
            packages,
            enrollments,
            slips,
        })
    }
}
