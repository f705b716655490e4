//! Query layer for the social feed.
//!
//! Seven read operations, each a pure function of (store handle, typed
//! parameters) -> (result vector or error):
//!
//! - [`posts_by_user`] -- all posts authored by a user
//! - [`top_posts_by_likes`] -- a user's posts ranked by live like count
//! - [`top_posts_by_comments`] -- a user's posts ranked by live comment count
//! - [`comments_by_user`] -- all comments written by a user
//! - [`posts_by_topic`] -- all posts under a topic
//! - [`top_topics_by_post_count`] -- topics ranked by number of posts
//! - [`friends_posts_last_24h`] -- recent posts from followed users
//!
//! # Design Rules
//!
//! 1. Ranking never trusts the denormalized counters stored on posts; it
//!    recomputes counts by joining the likes/comments collections at query
//!    time. Stale counters cost query time, not correctness.
//! 2. `k <= 0` is a caller error, rejected before the store is contacted.
//! 3. Failures are final: no retries, no partial results.
//! 4. Ordering beyond the documented sort key is implementation-defined.
//!    In particular, ties on equal counts come back in whatever order the
//!    server yields.

pub mod error;
pub mod ops;
pub mod pipeline;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{QueryError, QueryResult};
pub use ops::{
    comments_by_user, ensure_limit, friends_posts_last_24h, posts_by_topic, posts_by_user,
    top_posts_by_comments, top_posts_by_likes, top_topics_by_post_count,
};
pub use pipeline::CountSource;
