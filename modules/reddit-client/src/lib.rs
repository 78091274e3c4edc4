pub mod error;
pub mod types;

pub use error::{RedditError, Result};
pub use types::{CommunityInfo, Listing, PostInfo};

const BASE_URL: &str = "https://www.reddit.com";
const USER_AGENT: &str = "voxpop-validator/0.1";

/// Thin client for Reddit's public search endpoints. Holds a shared
/// `reqwest::Client` session injected by the caller; safe to clone and use
/// from several in-flight pipeline runs at once.
#[derive(Clone)]
pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
}

impl RedditClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (test servers).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Search for subreddits matching a query.
    pub async fn search_communities(&self, query: &str, limit: u32) -> Result<Vec<CommunityInfo>> {
        let url = format!("{}/subreddits/search.json", self.base_url);
        tracing::debug!(query, limit, "Searching communities");

        let listing: Listing<CommunityInfo> = self
            .get_json(&url, &[("q", query), ("limit", &limit.to_string())])
            .await?;

        Ok(listing.into_items())
    }

    /// Search for posts within one subreddit.
    pub async fn search_posts(
        &self,
        community: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PostInfo>> {
        let url = format!("{}/r/{}/search.json", self.base_url, community);
        tracing::debug!(community, query, limit, "Searching posts");

        let listing: Listing<PostInfo> = self
            .get_json(
                &url,
                &[
                    ("q", query),
                    ("restrict_sr", "1"),
                    ("limit", &limit.to_string()),
                ],
            )
            .await?;

        Ok(listing.into_items())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let resp = self
            .http
            .get(url)
            .query(params)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}
