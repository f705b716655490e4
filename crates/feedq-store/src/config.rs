//! Store configuration.
//!
//! All connection parameters travel in one explicit [`StoreConfig`] value.
//! Defaults mirror the deployed layout; the CLI overrides the URI, database
//! and timeout from flags.

use std::time::Duration;

/// Names of the six feed collections within the database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionNames {
    pub users: String,
    pub topics: String,
    pub posts: String,
    pub comments: String,
    pub likes: String,
    pub friendships: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            users: "users".to_string(),
            topics: "topics".to_string(),
            posts: "posts".to_string(),
            comments: "comments".to_string(),
            likes: "likes".to_string(),
            friendships: "friendships".to_string(),
        }
    }
}

/// Configuration for one store connection.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    /// Logical database holding the feed collections.
    pub database: String,
    /// Collection names within the database.
    pub collections: CollectionNames,
    /// Bound on server selection and connect. A timeout is a failure,
    /// never a retry trigger.
    pub op_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "socialfeed".to_string(),
            collections: CollectionNames::default(),
            op_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_layout() {
        let config = StoreConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "socialfeed");
        assert_eq!(config.op_timeout, Duration::from_secs(10));
        assert_eq!(config.collections.posts, "posts");
        assert_eq!(config.collections.friendships, "friendships");
    }
}
