//! Ports to the remote data platform.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::{Account, AccountFields};

/// CRUD operations on the account collection.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Fetches every account.
    async fn list_all(&self) -> Result<Vec<Account>, GatewayError>;

    /// Creates an account; the platform assigns the identifier.
    async fn create(&self, fields: &AccountFields) -> Result<Account, GatewayError>;

    /// Updates an existing account in place.
    async fn update(&self, id: &str, fields: &AccountFields) -> Result<Account, GatewayError>;

    /// Deletes an account.
    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}

/// One-time handshake that must succeed before the gateway is usable.
#[async_trait]
pub trait SessionInitializer: Send + Sync {
    async fn initialize(&self) -> Result<(), GatewayError>;
}
