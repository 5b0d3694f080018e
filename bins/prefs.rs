use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use models::checklist::ResourceCounts;
use serde_json::Value;
use service::checklist::{derive_checklist, progress};
use service::pins::PinStore;
use service::presets::PresetCollection;
use service::storage::open_backend;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "prefs", version, about = "Inspect and edit dashboard preferences")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pinned cards
    Pins,
    /// Pin or unpin a card
    Toggle { id: String },
    /// Restore the default pinned cards
    Reset,
    /// Manage saved presets
    Presets {
        /// Storage key of the preset collection
        #[arg(long, default_value = "dashboard:saved-filters")]
        key: String,
        #[command(subcommand)]
        action: PresetAction,
    },
    /// Show setup progress for the given resource counts
    Checklist {
        #[arg(long, default_value_t = 0)]
        accounts: u32,
        #[arg(long, default_value_t = 0)]
        categories: u32,
        #[arg(long, default_value_t = 0)]
        budgets: u32,
        #[arg(long, default_value_t = 0)]
        subscriptions: u32,
    },
}

#[derive(Subcommand, Debug)]
enum PresetAction {
    List,
    /// Add a preset; VALUE is parsed as JSON, falling back to a plain string
    Add { name: String, value: String },
    Rename { id: String, name: String },
    Remove { id: String },
}

fn init_logging(format: &str) {
    // 提前加载 .env，使得 RUST_LOG 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging(format);
    info!(service = "prefs", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let cfg = match configs::AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            // 日志尚未初始化，直接输出到 stderr
            eprintln!("invalid configuration: {e:#}");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&cfg.logging.format);

    let run_id = Uuid::new_v4();
    info!(service = "prefs", event = "start", %run_id, backend = %cfg.storage.backend, "prefs starting");

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "prefs", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli.command, cfg)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "prefs", event = "run_failed", %run_id, error = %e, "command failed");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, cfg: configs::AppConfig) -> anyhow::Result<()> {
    if cfg.storage.backend == "file" {
        // 目录创建失败不致命：存储层会退化为内存状态
        if let Err(e) = common::env::ensure_data_dir(&cfg.storage.data_dir).await {
            error!(error = %e, "data directory unavailable; changes will not persist");
        }
    }
    let persistence = open_backend(&cfg.storage.backend, cfg.storage.file_path()).await;
    let dashboard = &cfg.dashboard;

    match command {
        Command::Pins => {
            let store = PinStore::load(persistence, &dashboard.available_cards, &dashboard.default_pins).await;
            print_json(&store.pinned().await)?;
        }
        Command::Toggle { id } => {
            let store = PinStore::load(persistence, &dashboard.available_cards, &dashboard.default_pins).await;
            if !dashboard.available_cards.contains(&id) {
                info!(%id, "card is not currently available; it will be dropped on next load");
            }
            let pinned = store.toggle_pin(&id).await;
            info!(%id, pinned, "toggled card");
            print_json(&store.pinned().await)?;
        }
        Command::Reset => {
            let store = PinStore::load(persistence, &dashboard.available_cards, &dashboard.default_pins).await;
            store.reset_pins().await;
            print_json(&store.pinned().await)?;
        }
        Command::Presets { key, action } => {
            let coll = PresetCollection::<Value>::load(persistence, key).await;
            match action {
                PresetAction::List => print_json(&coll.list().await)?,
                PresetAction::Add { name, value } => {
                    let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
                    print_json(&coll.add(name, value).await?)?;
                }
                PresetAction::Rename { id, name } => print_json(&coll.rename(&id, name).await?)?,
                PresetAction::Remove { id } => {
                    if !coll.remove(&id).await {
                        anyhow::bail!("preset {id} not found");
                    }
                    print_json(&coll.list().await)?;
                }
            }
        }
        Command::Checklist { accounts, categories, budgets, subscriptions } => {
            let items = derive_checklist(&ResourceCounts { accounts, categories, budgets, subscriptions });
            let summary = progress(&items);
            print_json(&serde_json::json!({
                "items": items,
                "done": summary.done,
                "total": summary.total,
                "percent": summary.percent(),
                "complete": summary.is_complete(),
            }))?;
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
