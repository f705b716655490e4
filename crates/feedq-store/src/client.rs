//! Connected store handle.
//!
//! [`Store::connect`] opens the client, applies the configured timeout to
//! server selection and connect, and verifies liveness with a `ping` against
//! the configured database before returning. All execution goes through
//! [`Store::find_all`] and [`Store::aggregate`], which carry the same
//! timeout as a server-side execution deadline and drain the driver cursor
//! into a vector so no cursor outlives an operation.

use std::time::Duration;

use bson::doc;
use mongodb::error::ErrorKind;
use mongodb::options::{AggregateOptions, ClientOptions, FindOptions};
use mongodb::sync::{Client, Collection, Database};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use feedq_types::{Comment, Friendship, Like, Post, Topic, User};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::stage::{self, Stage};

/// A live connection to the feed database.
pub struct Store {
    client: Client,
    db: Database,
    config: StoreConfig,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("database", &self.config.database)
            .finish()
    }
}

impl Store {
    /// Connect and verify liveness.
    ///
    /// Any failure here -- URI parse, client construction, ping -- is a
    /// [`StoreError::Connection`] and the run is over.
    pub fn connect(config: StoreConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .run()
            .map_err(StoreError::Connection)?;
        options.app_name = Some("feedq".to_string());
        options.connect_timeout = Some(config.op_timeout);
        options.server_selection_timeout = Some(config.op_timeout);

        let client = Client::with_options(options).map_err(StoreError::Connection)?;
        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 })
            .run()
            .map_err(StoreError::Connection)?;
        debug!(database = %config.database, "store connection established");

        Ok(Self { client, db, config })
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection(&self.config.collections.users)
    }

    pub fn topics(&self) -> Collection<Topic> {
        self.db.collection(&self.config.collections.topics)
    }

    pub fn posts(&self) -> Collection<Post> {
        self.db.collection(&self.config.collections.posts)
    }

    pub fn comments(&self) -> Collection<Comment> {
        self.db.collection(&self.config.collections.comments)
    }

    pub fn likes(&self) -> Collection<Like> {
        self.db.collection(&self.config.collections.likes)
    }

    pub fn friendships(&self) -> Collection<Friendship> {
        self.db.collection(&self.config.collections.friendships)
    }

    /// Run a filter query and collect every matching record.
    ///
    /// Document order is the server's natural order; no sort is applied.
    /// A decode failure on any document aborts the whole operation.
    /// Execution is bounded server-side by the configured timeout.
    pub fn find_all<T>(&self, collection: &Collection<T>, filter: &Filter) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        let cursor = collection
            .find(filter.to_document())
            .with_options(find_options(self.config.op_timeout))
            .run()
            .map_err(classify)?;
        cursor.collect::<Result<Vec<T>, _>>().map_err(classify)
    }

    /// Run an aggregation pipeline and decode every output document into `U`.
    /// Execution is bounded server-side by the configured timeout.
    pub fn aggregate<T, U>(&self, collection: &Collection<T>, stages: &[Stage]) -> StoreResult<Vec<U>>
    where
        T: Send + Sync,
        U: DeserializeOwned,
    {
        let pipeline = stage::render(stages);
        debug!(stages = pipeline.len(), "dispatching aggregation pipeline");
        let cursor = collection
            .aggregate(pipeline)
            .with_options(aggregate_options(self.config.op_timeout))
            .run()
            .map_err(classify)?;
        cursor
            .map(|item| {
                let doc = item.map_err(classify)?;
                bson::from_document(doc).map_err(|err| StoreError::Decode(err.to_string()))
            })
            .collect()
    }

    /// Shut the client down. The run is already complete at this point, so
    /// shutdown problems are logged rather than surfaced.
    pub fn close(self) {
        let database = self.config.database.clone();
        drop(self.db);
        self.client.shutdown().run();
        debug!(database = %database, "store connection closed");
    }
}

/// Map a driver error onto the store taxonomy: deserialization problems are
/// decode failures, everything else is a query failure.
fn classify(err: mongodb::error::Error) -> StoreError {
    match *err.kind {
        ErrorKind::BsonDeserialization(_) => StoreError::Decode(err.to_string()),
        _ => {
            warn!(error = %err, "store query failed");
            StoreError::Query(err)
        }
    }
}

/// Per-query execution deadline (`maxTimeMS`). Exceeding it is a query
/// failure, never a retry trigger.
fn find_options(deadline: Duration) -> FindOptions {
    FindOptions::builder().max_time(deadline).build()
}

fn aggregate_options(deadline: Duration) -> AggregateOptions {
    AggregateOptions::builder().max_time(deadline).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_carries_the_execution_deadline() {
        let options = find_options(Duration::from_secs(7));
        assert_eq!(options.max_time, Some(Duration::from_secs(7)));
    }

    #[test]
    fn aggregate_carries_the_execution_deadline() {
        let options = aggregate_options(Duration::from_secs(7));
        assert_eq!(options.max_time, Some(Duration::from_secs(7)));
    }
}
