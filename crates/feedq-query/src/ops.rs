//! The seven read operations.
//!
//! Each runs exactly one query (the friends operation runs two, in sequence)
//! to completion against a connected [`Store`]. Results come back fully
//! decoded; any store or decode failure aborts the operation with no
//! partial output.

use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use tracing::debug;

use feedq_store::{Filter, Store};
use feedq_types::{Comment, Post, TopicStat};

use crate::error::{QueryError, QueryResult};
use crate::pipeline::{self, CountSource};

/// All posts authored by `user_id`, in the store's natural order.
pub fn posts_by_user(store: &Store, user_id: ObjectId) -> QueryResult<Vec<Post>> {
    let filter = Filter::new().eq("user_id", user_id);
    Ok(store.find_all(&store.posts(), &filter)?)
}

/// The top `k` posts by `user_id`, ranked by like count recomputed live
/// from the likes collection. Ties on equal counts come back in
/// implementation-defined order.
pub fn top_posts_by_likes(store: &Store, user_id: ObjectId, k: i64) -> QueryResult<Vec<Post>> {
    ensure_limit(k)?;
    let stages = pipeline::top_posts(user_id, CountSource::Likes, &store.config().collections, k);
    Ok(store.aggregate(&store.posts(), &stages)?)
}

/// The top `k` posts by `user_id`, ranked by comment count recomputed live
/// from the comments collection. Ties on equal counts come back in
/// implementation-defined order.
pub fn top_posts_by_comments(store: &Store, user_id: ObjectId, k: i64) -> QueryResult<Vec<Post>> {
    ensure_limit(k)?;
    let stages = pipeline::top_posts(
        user_id,
        CountSource::Comments,
        &store.config().collections,
        k,
    );
    Ok(store.aggregate(&store.posts(), &stages)?)
}

/// All comments written by `user_id`, in the store's natural order.
pub fn comments_by_user(store: &Store, user_id: ObjectId) -> QueryResult<Vec<Comment>> {
    let filter = Filter::new().eq("user_id", user_id);
    Ok(store.find_all(&store.comments(), &filter)?)
}

/// All posts under `topic_id`, in the store's natural order.
pub fn posts_by_topic(store: &Store, topic_id: ObjectId) -> QueryResult<Vec<Post>> {
    let filter = Filter::new().eq("topic_id", topic_id);
    Ok(store.find_all(&store.posts(), &filter)?)
}

/// The top `k` topics by number of posts. Topic ids with no record in the
/// topics collection are silently dropped (inner-join semantics).
pub fn top_topics_by_post_count(store: &Store, k: i64) -> QueryResult<Vec<TopicStat>> {
    ensure_limit(k)?;
    let stages = pipeline::top_topics(&store.config().collections, k);
    Ok(store.aggregate(&store.posts(), &stages)?)
}

/// Posts from users that `user_id` follows, created in the 24 hours before
/// query execution. A user who follows nobody gets an empty result, not an
/// error: the post query still runs, with an `$in` set that matches nothing.
pub fn friends_posts_last_24h(store: &Store, user_id: ObjectId) -> QueryResult<Vec<Post>> {
    let edges = Filter::new().eq("follower_id", user_id);
    let friendships = store.find_all(&store.friendships(), &edges)?;
    let followed: Vec<ObjectId> = friendships.into_iter().map(|f| f.followed_id).collect();
    debug!(followed = followed.len(), "resolved friend set");

    let cutoff = Utc::now() - Duration::hours(24);
    let recent = Filter::new()
        .any_of("user_id", followed)
        .at_least("created_at", cutoff);
    Ok(store.find_all(&store.posts(), &recent)?)
}

/// Validate a top-k bound. The ranking operations call this before building
/// a pipeline; the CLI calls it while parsing parameters, so a bad limit
/// never costs a connection attempt.
pub fn ensure_limit(k: i64) -> Result<(), QueryError> {
    if k <= 0 {
        return Err(QueryError::InvalidLimit(k));
    }
    Ok(())
}
