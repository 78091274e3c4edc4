use serde::Deserialize;

/// Reddit listing envelope: `{"data": {"children": [{"data": {...}}, ...]}}`.
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

impl<T> Listing<T> {
    /// Flatten the envelope into the inner payloads.
    pub fn into_items(self) -> Vec<T> {
        self.data.children.into_iter().map(|t| t.data).collect()
    }
}

/// A subreddit descriptor from `/subreddits/search.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityInfo {
    pub display_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub public_description: String,
    /// Null for quarantined or brand-new subreddits.
    #[serde(default)]
    pub subscribers: Option<u64>,
    #[serde(default)]
    pub url: String,
}

/// A post descriptor from `/r/{community}/search.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub num_comments: u64,
    pub permalink: String,
    /// Seconds since epoch, fractional.
    #[serde(default)]
    pub created_utc: f64,
}
