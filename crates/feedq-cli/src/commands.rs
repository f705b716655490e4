//! Dispatch: parse parameters, run exactly one operation, print JSON.
//!
//! Parameter parsing happens before the store is contacted, so a bad id or
//! a non-positive limit never costs a connection attempt. The result is pretty-printed
//! to stdout; everything else (logs, diagnostics) goes to stderr.

use std::time::Duration;

use anyhow::Context;

use feedq_query as ops;
use feedq_store::{Store, StoreConfig};
use feedq_types::{parse_object_id, ObjectId};

use crate::cli::{Cli, Command};

/// One fully-parsed operation, ready to dispatch.
enum Action {
    PostsByUser(ObjectId),
    TopLikes(ObjectId, i64),
    TopComments(ObjectId, i64),
    CommentsByUser(ObjectId),
    PostsByTopic(ObjectId),
    TopTopics(i64),
    FriendsRecent(ObjectId),
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let action = parse_action(&cli.command)?;
    let config = StoreConfig {
        uri: cli.uri,
        database: cli.database,
        op_timeout: Duration::from_secs(cli.timeout_secs),
        ..StoreConfig::default()
    };

    let store = Store::connect(config)?;
    let result = dispatch(&store, action);
    store.close();

    println!("{}", result?);
    Ok(())
}

fn parse_action(command: &Command) -> anyhow::Result<Action> {
    Ok(match command {
        Command::PostsByUser(args) => Action::PostsByUser(parse_object_id(&args.user_id)?),
        Command::TopLikes(args) => {
            ops::ensure_limit(args.k)?;
            Action::TopLikes(parse_object_id(&args.user_id)?, args.k)
        }
        Command::TopComments(args) => {
            ops::ensure_limit(args.k)?;
            Action::TopComments(parse_object_id(&args.user_id)?, args.k)
        }
        Command::CommentsByUser(args) => Action::CommentsByUser(parse_object_id(&args.user_id)?),
        Command::PostsByTopic(args) => Action::PostsByTopic(parse_object_id(&args.topic_id)?),
        Command::TopTopics(args) => {
            ops::ensure_limit(args.k)?;
            Action::TopTopics(args.k)
        }
        Command::FriendsRecent(args) => Action::FriendsRecent(parse_object_id(&args.user_id)?),
    })
}

/// Run the operation and serialize its result while the store is still open.
fn dispatch(store: &Store, action: Action) -> anyhow::Result<String> {
    let json = match action {
        Action::PostsByUser(user_id) => to_json(&ops::posts_by_user(store, user_id)?)?,
        Action::TopLikes(user_id, k) => to_json(&ops::top_posts_by_likes(store, user_id, k)?)?,
        Action::TopComments(user_id, k) => {
            to_json(&ops::top_posts_by_comments(store, user_id, k)?)?
        }
        Action::CommentsByUser(user_id) => to_json(&ops::comments_by_user(store, user_id)?)?,
        Action::PostsByTopic(topic_id) => to_json(&ops::posts_by_topic(store, topic_id)?)?,
        Action::TopTopics(k) => to_json(&ops::top_topics_by_post_count(store, k)?)?,
        Action::FriendsRecent(user_id) => {
            to_json(&ops::friends_posts_last_24h(store, user_id)?)?
        }
    };
    Ok(json)
}

fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LimitArgs, TopPostsArgs, UserArgs};

    const HEX: &str = "65f2a1b2c3d4e5f607182930";

    #[test]
    fn zero_k_fails_during_parameter_parsing() {
        let command = Command::TopLikes(TopPostsArgs {
            user_id: HEX.to_string(),
            k: 0,
        });
        assert!(parse_action(&command).is_err());
    }

    #[test]
    fn negative_k_fails_for_top_topics() {
        let command = Command::TopTopics(LimitArgs { k: -2 });
        assert!(parse_action(&command).is_err());
    }

    #[test]
    fn bad_hex_fails_during_parameter_parsing() {
        let command = Command::PostsByUser(UserArgs {
            user_id: "not-hex".to_string(),
        });
        assert!(parse_action(&command).is_err());
    }

    #[test]
    fn valid_parameters_parse_through() {
        let command = Command::TopComments(TopPostsArgs {
            user_id: HEX.to_string(),
            k: 5,
        });
        assert!(matches!(
            parse_action(&command).unwrap(),
            Action::TopComments(_, 5)
        ));
    }
}
