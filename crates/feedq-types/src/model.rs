//! Typed records for the six feed collections.
//!
//! Field names mirror the document keys used by the writer side, so every
//! record deserializes directly from a store document. Unknown keys in a
//! document (e.g. arrays materialized by a `$lookup` stage) are ignored.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{datetime_rfc3339, object_id_hex};

/// An account in the `users` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", with = "object_id_hex")]
    pub id: ObjectId,
    /// Legacy external identifier carried by the writer side. Informational;
    /// queries never filter on it.
    pub user_id_str: String,
    pub name: String,
    pub email: String,
    #[serde(with = "datetime_rfc3339")]
    pub created_at: DateTime<Utc>,
}

/// A named grouping for posts, in the `topics` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(rename = "_id", with = "object_id_hex")]
    pub id: ObjectId,
    pub name: String,
}

/// Authored content in the `posts` collection.
///
/// `likes_count` and `comments_count` are denormalized counters maintained
/// by the writer side. They may lag the likes/comments collections, so
/// ranking queries recompute counts live instead of trusting them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", with = "object_id_hex")]
    pub id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub user_id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub topic_id: ObjectId,
    pub content: String,
    #[serde(with = "datetime_rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
}

/// A reply attached to a post, in the `comments` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", with = "object_id_hex")]
    pub id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub post_id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub user_id: ObjectId,
    pub text: String,
    #[serde(with = "datetime_rfc3339")]
    pub created_at: DateTime<Utc>,
}

/// A single user's like of a post, in the `likes` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id", with = "object_id_hex")]
    pub id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub post_id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub user_id: ObjectId,
    #[serde(with = "datetime_rfc3339")]
    pub liked_at: DateTime<Utc>,
}

/// A directed follower -> followed edge, in the `friendships` collection.
///
/// The edge is never symmetric: A following B says nothing about B
/// following A.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Friendship {
    #[serde(rename = "_id", with = "object_id_hex")]
    pub id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub follower_id: ObjectId,
    #[serde(with = "object_id_hex")]
    pub followed_id: ObjectId,
    #[serde(with = "datetime_rfc3339")]
    pub created_at: DateTime<Utc>,
}

/// Result shape of the topic ranking query: one row per surviving topic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopicStat {
    #[serde(with = "object_id_hex")]
    pub topic_id: ObjectId,
    pub name: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn oid(n: u8) -> ObjectId {
        ObjectId::from_bytes([n; 12])
    }

    fn ts(millis: i64) -> bson::DateTime {
        bson::DateTime::from_millis(millis)
    }

    #[test]
    fn post_decodes_from_store_document() {
        let doc = doc! {
            "_id": oid(1),
            "user_id": oid(2),
            "topic_id": oid(3),
            "content": "hello",
            "created_at": ts(1_700_000_000_000),
            "likes_count": 5,
            "comments_count": 2,
        };
        let post: Post = bson::from_document(doc).unwrap();
        assert_eq!(post.id, oid(1));
        assert_eq!(post.user_id, oid(2));
        assert_eq!(post.content, "hello");
        assert_eq!(post.likes_count, 5);
        assert_eq!(post.comments_count, 2);
    }

    #[test]
    fn post_counters_default_to_zero_when_absent() {
        let doc = doc! {
            "_id": oid(1),
            "user_id": oid(2),
            "topic_id": oid(3),
            "content": "bare",
            "created_at": ts(0),
        };
        let post: Post = bson::from_document(doc).unwrap();
        assert_eq!(post.likes_count, 0);
        assert_eq!(post.comments_count, 0);
    }

    #[test]
    fn post_ignores_lookup_arrays() {
        // Aggregation output carries the joined array alongside the counter.
        let doc = doc! {
            "_id": oid(1),
            "user_id": oid(2),
            "topic_id": oid(3),
            "content": "ranked",
            "created_at": ts(0),
            "likes_count": 3,
            "likes": [doc! { "post_id": oid(1) }],
        };
        let post: Post = bson::from_document(doc).unwrap();
        assert_eq!(post.likes_count, 3);
    }

    #[test]
    fn post_decode_fails_on_missing_required_field() {
        let doc = doc! {
            "_id": oid(1),
            "user_id": oid(2),
            // topic_id missing
            "content": "broken",
            "created_at": ts(0),
        };
        assert!(bson::from_document::<Post>(doc).is_err());
    }

    #[test]
    fn post_serializes_ids_as_hex_and_timestamps_as_rfc3339() {
        let post = Post {
            id: oid(1),
            user_id: oid(2),
            topic_id: oid(3),
            content: "out".to_string(),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            likes_count: 0,
            comments_count: 0,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["_id"], oid(1).to_hex());
        assert_eq!(json["user_id"], oid(2).to_hex());
        assert_eq!(json["created_at"], "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn friendship_decodes_directed_edge() {
        let doc = doc! {
            "_id": oid(9),
            "follower_id": oid(4),
            "followed_id": oid(5),
            "created_at": ts(1_000),
        };
        let edge: Friendship = bson::from_document(doc).unwrap();
        assert_eq!(edge.follower_id, oid(4));
        assert_eq!(edge.followed_id, oid(5));
    }

    #[test]
    fn topic_stat_decodes_from_projection_output() {
        // Shape produced by the final $project of the topic ranking pipeline.
        let doc = doc! { "topic_id": oid(7), "name": "rust", "count": 42 };
        let stat: TopicStat = bson::from_document(doc).unwrap();
        assert_eq!(stat.name, "rust");
        assert_eq!(stat.count, 42);
    }

    #[test]
    fn topic_stat_accepts_int32_counts() {
        // $sum: 1 yields Int32 when counts are small.
        let doc = doc! { "topic_id": oid(7), "name": "go", "count": 3_i32 };
        let stat: TopicStat = bson::from_document(doc).unwrap();
        assert_eq!(stat.count, 3);
    }

    #[test]
    fn user_decodes_with_legacy_identifier() {
        let doc = doc! {
            "_id": oid(6),
            "user_id_str": "u-0042",
            "name": "Ada",
            "email": "ada@example.com",
            "created_at": ts(0),
        };
        let user: User = bson::from_document(doc).unwrap();
        assert_eq!(user.user_id_str, "u-0042");
        assert_eq!(user.email, "ada@example.com");
    }
}
