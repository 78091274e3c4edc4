// Trait abstraction for the community platform, mirroring the two search
// endpoints the pipeline uses. Enables deterministic tests with stub
// implementations: no network, no live subreddits.

use anyhow::Result;
use async_trait::async_trait;

use reddit_client::{CommunityInfo, PostInfo, RedditClient};

#[async_trait]
pub trait CommunitySearch: Send + Sync {
    /// Search the platform for communities matching a keyword.
    async fn search_communities(&self, query: &str, limit: u32) -> Result<Vec<CommunityInfo>>;

    /// Search one community's posts for a term.
    async fn search_posts(
        &self,
        community: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PostInfo>>;
}

#[async_trait]
impl CommunitySearch for RedditClient {
    async fn search_communities(&self, query: &str, limit: u32) -> Result<Vec<CommunityInfo>> {
        Ok(RedditClient::search_communities(self, query, limit).await?)
    }

    async fn search_posts(
        &self,
        community: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PostInfo>> {
        Ok(RedditClient::search_posts(self, community, query, limit).await?)
    }
}
