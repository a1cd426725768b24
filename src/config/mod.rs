pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::{CliConfig, Command, CreateArgs, NotificationArgs, UpdateArgs};

#[cfg(feature = "cli")]
mod args {
    use crate::domain::model::{GroupBuyPatch, GroupStatus, NewGroupBuy};
    use crate::utils::error::Result;
    use crate::utils::export::ExportFormat;
    use crate::utils::validation::{validate_path, Validate};
    use chrono::{DateTime, Utc};
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "group-buy")]
    #[command(about = "Manage pooled group-buy campaigns for marketplace vendors")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Override the data directory holding the snapshots
        #[arg(long, global = true)]
        pub data_dir: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Start a new group buy; the organizer joins automatically
        Create(CreateArgs),
        /// Join a group buy with a contribution
        Join {
            group_id: String,
            #[arg(long)]
            user: String,
            #[arg(long, default_value = "0")]
            contribution: f64,
        },
        /// Leave a group buy
        Leave {
            group_id: String,
            #[arg(long)]
            user: String,
        },
        /// Delete a group buy (organizer only)
        Delete {
            group_id: String,
            #[arg(long)]
            user: String,
        },
        /// Change the mutable fields of a group buy
        Update(UpdateArgs),
        /// List group buys
        List {
            #[arg(long, help = "Only active group buys")]
            active: bool,
            #[arg(long, help = "Only group buys this user participates in")]
            user: Option<String>,
        },
        /// Show one group buy with its progress
        Show { group_id: String },
        /// Dashboard statistics
        Stats {
            #[arg(long)]
            user: Option<String>,
        },
        /// Read and manage a user's notifications
        Notifications(NotificationArgs),
        /// Export all group buys
        Export {
            #[arg(long, value_enum, default_value = "csv")]
            format: ExportFormat,
            #[arg(short, long, help = "Write to a file instead of stdout")]
            output: Option<String>,
        },
        /// Load the demo group buys
        Seed {
            #[arg(long, help = "Replace existing data")]
            force: bool,
        },
    }

    #[derive(Debug, Clone, Args)]
    pub struct CreateArgs {
        #[arg(long)]
        pub title: String,
        #[arg(long)]
        pub description: String,
        /// Organizer display name
        #[arg(long)]
        pub organizer: String,
        #[arg(long)]
        pub organizer_id: String,
        #[arg(long)]
        pub location: String,
        #[arg(long)]
        pub target_amount: f64,
        #[arg(long)]
        pub max_participants: u32,
        #[arg(long)]
        pub category: String,
        #[arg(long)]
        pub savings: String,
        #[arg(long, value_enum, default_value = "active")]
        pub status: GroupStatus,
        #[arg(long)]
        pub time_left: String,
        /// RFC 3339 timestamp, e.g. 2026-11-01T00:00:00Z
        #[arg(long)]
        pub expires_at: DateTime<Utc>,
    }

    impl From<CreateArgs> for NewGroupBuy {
        fn from(args: CreateArgs) -> Self {
            NewGroupBuy {
                title: args.title,
                description: args.description,
                organizer: args.organizer,
                organizer_id: args.organizer_id,
                location: args.location,
                target_amount: args.target_amount,
                max_participants: args.max_participants,
                category: args.category,
                savings: args.savings,
                status: args.status,
                time_left: args.time_left,
                expires_at: args.expires_at,
            }
        }
    }

    #[derive(Debug, Clone, Args)]
    pub struct UpdateArgs {
        pub group_id: String,
        /// User performing the change
        #[arg(long)]
        pub user: String,
        #[arg(long)]
        pub title: Option<String>,
        #[arg(long)]
        pub description: Option<String>,
        #[arg(long)]
        pub location: Option<String>,
        #[arg(long)]
        pub category: Option<String>,
        #[arg(long)]
        pub savings: Option<String>,
        #[arg(long)]
        pub time_left: Option<String>,
        #[arg(long, value_enum)]
        pub status: Option<GroupStatus>,
        #[arg(long)]
        pub expires_at: Option<DateTime<Utc>>,
        #[arg(long)]
        pub target_amount: Option<f64>,
        #[arg(long)]
        pub max_participants: Option<u32>,
    }

    impl UpdateArgs {
        pub fn patch(&self) -> GroupBuyPatch {
            GroupBuyPatch {
                title: self.title.clone(),
                description: self.description.clone(),
                location: self.location.clone(),
                category: self.category.clone(),
                savings: self.savings.clone(),
                time_left: self.time_left.clone(),
                status: self.status,
                expires_at: self.expires_at,
                target_amount: self.target_amount,
                max_participants: self.max_participants,
            }
        }
    }

    #[derive(Debug, Clone, Args)]
    pub struct NotificationArgs {
        #[arg(long)]
        pub user: String,
        #[arg(long, help = "Mark one notification as read")]
        pub mark_read: Option<String>,
        #[arg(long, help = "Mark all of the user's notifications as read")]
        pub mark_all_read: bool,
        #[arg(long, help = "Delete one notification")]
        pub delete: Option<String>,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(data_dir) = &self.data_dir {
                validate_path("data_dir", data_dir)?;
            }
            if let Some(config) = &self.config {
                validate_path("config", config)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_join() {
            let config = CliConfig::try_parse_from([
                "group-buy", "--data-dir", "/tmp/gb", "join", "1", "--user", "vendor9",
                "--contribution", "1250",
            ])
            .unwrap();

            assert_eq!(config.data_dir.as_deref(), Some("/tmp/gb"));
            match config.command {
                Command::Join {
                    group_id,
                    user,
                    contribution,
                } => {
                    assert_eq!(group_id, "1");
                    assert_eq!(user, "vendor9");
                    assert_eq!(contribution, 1250.0);
                }
                other => panic!("unexpected command {:?}", other),
            }
        }

        #[test]
        fn test_parse_create_requires_every_field() {
            let missing = CliConfig::try_parse_from(["group-buy", "create", "--title", "Rice"]);
            assert!(missing.is_err());

            let config = CliConfig::try_parse_from([
                "group-buy",
                "create",
                "--title", "Rice",
                "--description", "Basmati sacks",
                "--organizer", "Asha",
                "--organizer-id", "v1",
                "--location", "Dadar",
                "--target-amount", "15000",
                "--max-participants", "12",
                "--category", "grains",
                "--savings", "20%",
                "--status", "upcoming",
                "--time-left", "3 days",
                "--expires-at", "2026-11-01T00:00:00Z",
            ])
            .unwrap();

            let Command::Create(args) = config.command else {
                panic!("expected create");
            };
            let input = NewGroupBuy::from(args);
            assert_eq!(input.status, GroupStatus::Upcoming);
            assert_eq!(input.max_participants, 12);
            assert!(input.validate().is_ok());
        }

        #[test]
        fn test_update_args_build_patch() {
            let config = CliConfig::try_parse_from([
                "group-buy", "update", "1", "--user", "vendor1", "--status", "completed",
            ])
            .unwrap();
            let Command::Update(args) = config.command else {
                panic!("expected update");
            };
            let patch = args.patch();
            assert_eq!(patch.status, Some(GroupStatus::Completed));
            assert!(patch.title.is_none());
        }
    }
}
