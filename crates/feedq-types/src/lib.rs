//! Data model for the social feed store.
//!
//! Six entity kinds, each backed by one collection in the document store:
//!
//! - [`User`] -- an account (display name, email)
//! - [`Topic`] -- a named grouping for posts
//! - [`Post`] -- authored content under a topic
//! - [`Comment`] -- a reply attached to a post
//! - [`Like`] -- a single user's like of a post
//! - [`Friendship`] -- a directed follower -> followed edge
//!
//! plus [`TopicStat`], the derived result shape of the topic ranking query.
//!
//! # Design Rules
//!
//! 1. Records are read-only: the query layer decodes them from store
//!    documents and never writes them back.
//! 2. Identifiers are store-generated `ObjectId`s. They cross the process
//!    boundary as 24-character hex strings, in both directions: input
//!    parsing goes through [`parse_object_id`], and JSON output renders ids
//!    through the [`codec`] helpers.
//! 3. Referential integrity (e.g. `post.user_id` naming a real user) is the
//!    writer side's responsibility. Nothing here enforces it.
//! 4. The denormalized counters on [`Post`] are informational only; ranking
//!    queries recompute counts from the likes/comments collections.

pub mod codec;
pub mod error;
pub mod model;

// Re-export primary types at crate root for ergonomic imports.
pub use bson::oid::ObjectId;
pub use error::TypeError;
pub use model::{Comment, Friendship, Like, Post, Topic, TopicStat, User};

/// Parse a store identifier from its 24-character hex form.
///
/// This is the single entry point for identifiers arriving from outside the
/// process (CLI arguments). A malformed string is an [`TypeError::InvalidId`]
/// carrying the offending input.
pub fn parse_object_id(s: &str) -> Result<ObjectId, TypeError> {
    ObjectId::parse_str(s).map_err(|_| TypeError::InvalidId(s.to_string()))
}
