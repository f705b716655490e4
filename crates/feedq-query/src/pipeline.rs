//! Pipeline constructors for the aggregation-backed operations.
//!
//! These are pure functions over parameters and collection names, kept
//! separate from dispatch so the exact stage sequences can be asserted on
//! without a server.

use bson::oid::ObjectId;

use feedq_store::{CollectionNames, Filter, ProjectExpr, Stage};

/// Which collection a post ranking counts, and where the recomputed count
/// lands on the post document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountSource {
    Likes,
    Comments,
}

impl CountSource {
    /// The collection joined against `post._id`.
    pub fn collection<'a>(&self, names: &'a CollectionNames) -> &'a str {
        match self {
            CountSource::Likes => &names.likes,
            CountSource::Comments => &names.comments,
        }
    }

    /// Name of the array the lookup materializes on each post.
    pub fn array_field(&self) -> &'static str {
        match self {
            CountSource::Likes => "likes",
            CountSource::Comments => "comments",
        }
    }

    /// The counter field the ranking sorts on. Shadows the denormalized
    /// counter of the same name, so the stored value is never consulted.
    pub fn count_field(&self) -> &'static str {
        match self {
            CountSource::Likes => "likes_count",
            CountSource::Comments => "comments_count",
        }
    }
}

/// Ranking pipeline for one user's posts: match, join the counted
/// collection, recompute the counter from the joined array, sort on it
/// descending, truncate to `k`.
pub fn top_posts(
    user_id: ObjectId,
    source: CountSource,
    names: &CollectionNames,
    k: i64,
) -> Vec<Stage> {
    vec![
        Stage::Match(Filter::new().eq("user_id", user_id)),
        Stage::Lookup {
            from: source.collection(names).to_string(),
            local_field: "_id",
            foreign_field: "post_id",
            as_field: source.array_field(),
        },
        Stage::AddCountField {
            field: source.count_field(),
            of_array: source.array_field(),
        },
        Stage::SortDesc(source.count_field()),
        Stage::Limit(k),
    ]
}

/// Topic ranking pipeline over the posts collection: group by topic
/// counting posts, sort descending, truncate to `k`, then attach the topic
/// name. The unwind drops groups whose `topic_id` has no topic record
/// (inner-join semantics) instead of surfacing them as an error.
pub fn top_topics(names: &CollectionNames, k: i64) -> Vec<Stage> {
    vec![
        Stage::GroupCount { by: "topic_id" },
        Stage::SortDesc("count"),
        Stage::Limit(k),
        Stage::Lookup {
            from: names.topics.clone(),
            local_field: "_id",
            foreign_field: "_id",
            as_field: "topic",
        },
        Stage::Unwind("topic"),
        Stage::Project(vec![
            ("topic_id", ProjectExpr::Field("_id")),
            ("count", ProjectExpr::Keep),
            ("name", ProjectExpr::Field("topic.name")),
        ]),
    ]
}
