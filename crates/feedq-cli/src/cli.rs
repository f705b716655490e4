use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "feedq",
    about = "Query tool for the social feed store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Connection string for the store.
    #[arg(long, global = true, default_value = "mongodb://localhost:27017")]
    pub uri: String,

    /// Database holding the feed collections.
    #[arg(long = "db", global = true, default_value = "socialfeed")]
    pub database: String,

    /// Bound in seconds on connecting and selecting a server.
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Subcommand)]
pub enum Command {
    /// All posts authored by a user
    PostsByUser(UserArgs),
    /// A user's top k posts, ranked by live like count
    TopLikes(TopPostsArgs),
    /// A user's top k posts, ranked by live comment count
    TopComments(TopPostsArgs),
    /// All comments written by a user
    CommentsByUser(UserArgs),
    /// All posts under a topic
    PostsByTopic(TopicArgs),
    /// Top k topics, ranked by number of posts
    TopTopics(LimitArgs),
    /// Posts from followed users in the last 24 hours
    FriendsRecent(UserArgs),
}

#[derive(Args)]
pub struct UserArgs {
    /// User id (24-char hex)
    #[arg(long = "user")]
    pub user_id: String,
}

#[derive(Args)]
pub struct TopPostsArgs {
    /// User id (24-char hex)
    #[arg(long = "user")]
    pub user_id: String,
    /// Number of results (must be positive)
    #[arg(short)]
    pub k: i64,
}

#[derive(Args)]
pub struct TopicArgs {
    /// Topic id (24-char hex)
    #[arg(long = "topic")]
    pub topic_id: String,
}

#[derive(Args)]
pub struct LimitArgs {
    /// Number of results (must be positive)
    #[arg(short)]
    pub k: i64,
}
