//! Business logic services

pub mod borrowing;
pub mod catalog;

use std::sync::Arc;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub borrowing: borrowing::BorrowingService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let borrowing_store = Arc::new(repository.borrowings.clone());
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            borrowing: borrowing::BorrowingService::new(borrowing_store),
            repository,
        }
    }

    /// Whether the backing store is reachable
    pub async fn store_ready(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
