use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use lostfound_core::{Category, Condition, Criteria, ItemDraft, ItemType, Urgency};
use uuid::Uuid;

/// Browse and post to the campus lost & found board
#[derive(Debug, Parser)]
#[command(name = "lostfound", version)]
pub struct Cli {
    /// Base URL of the items API (overrides LOSTFOUND_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Act without the demo sign-in
    #[arg(long, global = true)]
    pub anonymous: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List lost or found items
    Browse(BrowseArgs),

    /// Show one item and a few similar ones
    Show {
        id: Uuid,
    },

    /// Report something you lost
    PostLost(PostLostArgs),

    /// Report something you found
    PostFound(PostFoundArgs),

    /// List your own posts
    Mine,

    /// The latest found items
    Recent {
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },

    /// Draft a claim on an item and check it would be accepted.
    ///
    /// Claims live only for the current run; nothing is sent to the poster.
    Claim {
        id: Uuid,

        /// What makes the item yours
        #[arg(short, long)]
        message: String,

        /// Be reached by phone instead of email
        #[arg(long)]
        phone: Option<String>,
    },

    /// Mark one of your posts as resolved
    Resolve {
        id: Uuid,
    },

    /// Campus locations to use with --location
    Locations,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// lost or found
    pub item_type: ItemType,

    /// Match against title and description
    #[arg(short, long, default_value = "")]
    pub search: String,

    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long)]
    pub location: Option<String>,

    /// Only meaningful for lost items
    #[arg(long)]
    pub urgency: Option<Urgency>,

    /// Only meaningful for found items
    #[arg(long)]
    pub condition: Option<Condition>,

    /// Only items offering a reward
    #[arg(long)]
    pub reward: bool,
}

impl BrowseArgs {
    pub fn criteria(&self) -> Criteria {
        Criteria {
            query: self.search.clone(),
            category: self.category,
            location: self.location.clone(),
            urgency: self.urgency,
            condition: self.condition,
            has_reward: self.reward,
            ..Criteria::for_type(self.item_type)
        }
    }
}

/// Fields both posting forms share.
#[derive(Debug, Args)]
pub struct CommonPostArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Day it was lost or found (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long, default_value = "")]
    pub location: String,

    /// URL of a photo
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Debug, Args)]
pub struct PostLostArgs {
    #[command(flatten)]
    pub common: CommonPostArgs,

    #[arg(long, default_value = "medium")]
    pub urgency: Urgency,

    #[arg(long)]
    pub reward: Option<f64>,
}

#[derive(Debug, Args)]
pub struct PostFoundArgs {
    #[command(flatten)]
    pub common: CommonPostArgs,

    #[arg(long)]
    pub condition: Option<Condition>,

    /// Where the item is being kept
    #[arg(long, default_value = "")]
    pub storage_location: String,
}

impl From<PostLostArgs> for ItemDraft {
    fn from(args: PostLostArgs) -> Self {
        let common = args.common;
        ItemDraft {
            title: common.title,
            category: common.category,
            description: common.description,
            date: common.date,
            location: common.location,
            image: common.image,
            urgency: Some(args.urgency),
            reward: args.reward,
            ..ItemDraft::lost()
        }
    }
}

impl From<PostFoundArgs> for ItemDraft {
    fn from(args: PostFoundArgs) -> Self {
        let common = args.common;
        ItemDraft {
            title: common.title,
            category: common.category,
            description: common.description,
            date: common.date,
            location: common.location,
            image: common.image,
            condition: args.condition,
            storage_location: args.storage_location,
            ..ItemDraft::found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browse_with_filters() {
        let cli = Cli::try_parse_from([
            "lostfound",
            "browse",
            "lost",
            "--search",
            "wallet",
            "--category",
            "personal",
            "--reward",
        ])
        .unwrap();
        let Command::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        let criteria = args.criteria();
        assert_eq!(criteria.item_type, Some(ItemType::Lost));
        assert_eq!(criteria.query, "wallet");
        assert_eq!(criteria.category, Some(Category::Personal));
        assert!(criteria.has_reward);
        assert!(criteria.urgency.is_none());
    }

    #[test]
    fn rejects_unknown_category() {
        let err = Cli::try_parse_from(["lostfound", "browse", "found", "--category", "furniture"]).unwrap_err();
        assert!(err.to_string().contains("unknown category"));
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["lostfound", "mine", "--api-url", "http://x/api", "--anonymous"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        assert!(cli.anonymous);
    }

    #[test]
    fn claim_takes_optional_phone() {
        let id = Uuid::nil().to_string();
        let cli = Cli::try_parse_from(["lostfound", "claim", &id, "-m", "mine", "--phone", "555-0100"]).unwrap();
        let Command::Claim { message, phone, .. } = cli.command else {
            panic!("expected claim");
        };
        assert_eq!(message, "mine");
        assert_eq!(phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn post_lost_builds_draft() {
        let cli = Cli::try_parse_from([
            "lostfound",
            "post-lost",
            "--title",
            "Car Keys",
            "--category",
            "personal",
            "--description",
            "Toyota key",
            "--date",
            "2025-03-16",
            "--location",
            "Parking Lot A",
            "--reward",
            "10",
        ])
        .unwrap();
        let Command::PostLost(args) = cli.command else {
            panic!("expected post-lost");
        };
        let draft = ItemDraft::from(args);
        assert_eq!(draft.item_type, Some(ItemType::Lost));
        assert_eq!(draft.urgency, Some(Urgency::Medium));
        assert_eq!(draft.reward, Some(10.0));
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 3, 16));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn post_found_without_storage_fails_validation() {
        let cli = Cli::try_parse_from([
            "lostfound",
            "post-found",
            "--title",
            "Scarf",
            "--category",
            "clothing",
            "--description",
            "Red wool",
            "--condition",
            "good",
            "--date",
            "2025-03-16",
            "--location",
            "Art Building",
        ])
        .unwrap();
        let Command::PostFound(args) = cli.command else {
            panic!("expected post-found");
        };
        let draft = ItemDraft::from(args);
        assert!(draft.validate().is_err());
    }
}
