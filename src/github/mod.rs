pub mod client;
pub mod payload;
pub mod url;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::metadata::RepositoryMetadata;

pub use client::GithubClient;
pub use url::{parse_repo_url, RepoRef};

/// Anything that can produce repository metadata for an owner/name pair.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch(&self, repo: &RepoRef) -> Result<RepositoryMetadata>;
}
