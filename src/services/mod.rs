//! Business logic services

pub mod catalog;
pub mod loans;

use crate::config::LendingConfig;

/// Container for all services
#[derive(Debug, Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services sharing one lending policy
    pub fn new(lending: &LendingConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(lending.clone()),
            loans: loans::LoansService::new(lending.clone()),
        }
    }
}
