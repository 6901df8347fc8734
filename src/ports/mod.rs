use async_trait::async_trait;

use crate::domain::{Authorization, DomainError};

/// One way of resolving an Azure credential.
///
/// Implementations must only return `Ok` once the credential has proven it
/// can issue a token for `resource`, so that a chain can fall through on any
/// failure.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn authorize(&self, resource: &str) -> Result<Authorization, DomainError>;
    fn source_name(&self) -> &'static str;
}
