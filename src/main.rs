use clap::Parser;
use group_buy::config::toml_config::LogFormat;
use group_buy::config::Command;
use group_buy::core::ConfigProvider;
use group_buy::utils::error::ErrorSeverity;
use group_buy::utils::{export, logger, validation::Validate};
use group_buy::{
    CliConfig, DeleteOutcome, GroupBuy, GroupBuyError, JoinOutcome, JsonSnapshotStore,
    LeaveOutcome, LocalStorage, MarketplaceSession, NewGroupBuy, RegistryStats, Result,
    TomlConfig, UpdateOutcome, UserGroupSummary,
};

type Session = MarketplaceSession<JsonSnapshotStore<LocalStorage>>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入設定檔，命令列參數優先
    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(2);
            }
        },
        None => TomlConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    let verbose = cli.verbose || config.logging.verbose;
    if cli.json_logs || config.logging.format == LogFormat::Json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ Command failed: {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(command: Command, config: &TomlConfig) -> Result<()> {
    let storage = LocalStorage::new(config.data_dir().to_string());
    let store =
        JsonSnapshotStore::with_keys(storage, config.groups_key(), config.notifications_key());
    let mut session = Session::open(store, config).await?;

    match command {
        Command::Create(args) => {
            let group = session.service_mut().create(NewGroupBuy::from(args))?;
            session.save().await?;
            println!("✅ Created group buy {}", group.id);
            print_group(&group);
        }
        Command::Join {
            group_id,
            user,
            contribution,
        } => {
            let outcome = session.service_mut().join(&group_id, &user, contribution)?;
            match outcome {
                JoinOutcome::Joined { current_amount } => {
                    session.save().await?;
                    println!("✅ {} joined {} (pooled {:.2})", user, group_id, current_amount);
                }
                JoinOutcome::AlreadyMember => println!("ℹ️ {} is already in {}", user, group_id),
                JoinOutcome::GroupFull => println!("⚠️ {} is full", group_id),
                JoinOutcome::NotFound => return Err(not_found(&group_id)),
            }
        }
        Command::Leave { group_id, user } => match session.service_mut().leave(&group_id, &user)? {
            LeaveOutcome::Left {
                deducted,
                current_amount,
            } => {
                session.save().await?;
                println!(
                    "✅ {} left {} (deducted {:.2}, pooled {:.2})",
                    user, group_id, deducted, current_amount
                );
            }
            LeaveOutcome::NotMember => println!("ℹ️ {} is not in {}", user, group_id),
            LeaveOutcome::OrganizerCannotLeave => {
                println!("⚠️ The organizer cannot leave; delete the group instead")
            }
            LeaveOutcome::NotFound => return Err(not_found(&group_id)),
        },
        Command::Delete { group_id, user } => {
            match session.service_mut().delete(&group_id, &user) {
                DeleteOutcome::Deleted(group) => {
                    session.save().await?;
                    println!("🗑️ Deleted '{}'", group.title);
                }
                DeleteOutcome::NotOrganizer => return Err(unauthorized(&group_id, &user)),
                DeleteOutcome::NotFound => return Err(not_found(&group_id)),
            }
        }
        Command::Update(args) => {
            let patch = args.patch();
            if patch.is_empty() {
                println!("ℹ️ Nothing to update");
                return Ok(());
            }
            match session.service_mut().update(&args.group_id, &args.user, patch)? {
                UpdateOutcome::Updated => {
                    session.save().await?;
                    print_group(session.service().find(&args.group_id)?);
                }
                UpdateOutcome::NotOrganizer => {
                    return Err(unauthorized(&args.group_id, &args.user))
                }
                UpdateOutcome::NotFound => return Err(not_found(&args.group_id)),
            }
        }
        Command::List { active, user } => {
            let registry = session.registry();
            let groups: Vec<&GroupBuy> = match &user {
                Some(user) => registry.groups_for_user(user),
                None => registry.groups().iter().collect(),
            };
            let groups: Vec<&GroupBuy> = groups
                .into_iter()
                .filter(|g| !active || g.status == group_buy::GroupStatus::Active)
                .collect();

            if groups.is_empty() {
                println!("No group buys found");
            }
            for group in groups {
                print_summary_line(group);
            }
        }
        Command::Show { group_id } => print_group(session.service().find(&group_id)?),
        Command::Stats { user } => {
            let stats = RegistryStats::collect(session.registry());
            println!("{}", serde_json::to_string_pretty(&stats)?);
            if let Some(user) = user {
                let summary = UserGroupSummary::collect(session.registry(), &user);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        Command::Notifications(args) => {
            let mut changed = false;
            let center = session.notifications_mut();
            if let Some(id) = &args.mark_read {
                changed |= center.mark_as_read(id);
            }
            if args.mark_all_read {
                changed |= center.mark_all_as_read(&args.user) > 0;
            }
            if let Some(id) = &args.delete {
                changed |= center.delete(id);
            }

            let center = session.notifications();
            println!("🔔 {} unread", center.unread_count(&args.user));
            for notification in center.user_notifications(&args.user) {
                println!(
                    "{} [{}] {}: {} ({})",
                    if notification.read { " " } else { "*" },
                    notification.id,
                    notification.title,
                    notification.message,
                    notification.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            if changed {
                session.save().await?;
            }
        }
        Command::Export { format, output } => {
            let rendered = export::export(session.registry().groups(), format)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, rendered).await?;
                    println!("📁 Exported {} group buys to {}", session.registry().len(), path);
                }
                None => print!("{}", rendered),
            }
        }
        Command::Seed { force } => {
            if !session.registry().is_empty() && !force {
                println!("ℹ️ Data already present; use --force to replace it");
                return Ok(());
            }
            session.reset_to_demo();
            session.save().await?;
            println!("🌱 Loaded {} demo group buys", session.registry().len());
        }
    }

    Ok(())
}

fn not_found(group_id: &str) -> GroupBuyError {
    GroupBuyError::NotFound {
        id: group_id.to_string(),
    }
}

fn unauthorized(group_id: &str, user_id: &str) -> GroupBuyError {
    GroupBuyError::Unauthorized {
        user_id: user_id.to_string(),
        group_id: group_id.to_string(),
    }
}

fn progress_label(group: &GroupBuy) -> String {
    match group.progress_percent() {
        Ok(progress) => format!("{:.0}%", progress),
        Err(_) => "n/a".to_string(),
    }
}

fn print_summary_line(group: &GroupBuy) {
    println!(
        "{:<28} {:<10} {:>10.2}/{:<10.2} {:>5} {:>3}/{:<3} {}",
        group.id,
        group.status,
        group.current_amount,
        group.target_amount,
        progress_label(group),
        group.participants.len(),
        group.max_participants,
        group.title
    );
}

fn print_group(group: &GroupBuy) {
    println!("{} ({})", group.title, group.id);
    println!("  {}", group.description);
    println!("  Organizer:    {} [{}]", group.organizer, group.organizer_id);
    println!("  Location:     {}", group.location);
    println!("  Category:     {} • saves {}", group.category, group.savings);
    println!("  Status:       {} ({})", group.status, group.time_left);
    println!(
        "  Pooled:       {:.2} / {:.2} ({})",
        group.current_amount,
        group.target_amount,
        progress_label(group)
    );
    println!(
        "  Participants: {}/{} {}",
        group.participants.len(),
        group.max_participants,
        group.participants.join(", ")
    );
    println!("  Created:      {}", group.created_at.to_rfc3339());
    println!("  Expires:      {}", group.expires_at.to_rfc3339());
}
