use std::path::PathBuf;

use clap::{Parser, Subcommand};
use telegram_search_surface::search::actions::{ActionSender, SearchAction};
use telegram_search_surface::search::sources::{DisplayNameFilter, RecencySort};
use telegram_search_surface::search::window::Tier;
use telegram_search_surface::search::SearchStoreSnapshot;
use telegram_search_surface::store::import::ImportBatch;
use telegram_search_surface::{
    logging, store, SearchConfig, SearchInputs, SearchQuery, SearchSession, SearchSources,
    SearchView, Store,
};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Parser)]
#[command(name = "telegram-search", about = "Query the local search surface")]
struct Cli {
    /// Database path (defaults to the user data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Write logs to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a search and print the resulting view as JSON
    Query {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Current user id
        #[arg(long)]
        me: Option<String>,
        /// JSON file with the search-results store snapshot
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        expand_local: bool,
        #[arg(long)]
        expand_global: bool,
    },
    /// Open a result and record it as recently found
    Open {
        id: String,
        #[arg(long)]
        me: Option<String>,
    },
    /// List recently found chats
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Forget every recently found chat instead
        #[arg(long)]
        clear: bool,
    },
    /// Set or clear the session sync marker
    Sync {
        #[arg(required_unless_present = "clear")]
        marker: Option<String>,
        #[arg(long, conflicts_with = "marker")]
        clear: bool,
    },
    /// Load chats, contacts and messages from a JSON batch file
    Import {
        file: PathBuf,
        /// Keep only this many newest messages per imported chat
        #[arg(long)]
        keep_per_chat: Option<usize>,
    },
    /// Show, replace or reset the stored search config
    Config {
        /// JSON with the fields to override
        #[arg(long, conflicts_with = "reset")]
        set: Option<String>,
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _logger = match &cli.log_dir {
        Some(dir) => Some(logging::init(dir)?),
        None => {
            logging::init_stderr();
            None
        }
    };

    let db_path = cli.db.unwrap_or_else(store::default_db_path);
    let store = Store::open(&db_path)?;

    match cli.command {
        Command::Query {
            text,
            date,
            me,
            snapshot,
            expand_local,
            expand_global,
        } => {
            let snapshot: SearchStoreSnapshot = match snapshot {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                None => SearchStoreSnapshot::default(),
            };
            let query = SearchQuery { text, date };
            let contacts = store.contact_ids()?;
            let mut session = SearchSession::new(SearchConfig::load(&store)?);
            if expand_local {
                session.toggle(Tier::Local);
            }
            if expand_global {
                session.toggle(Tier::Global);
            }

            let view = session.evaluate(
                &SearchInputs {
                    query: &query,
                    current_user_id: me.as_deref(),
                    contact_ids: &contacts,
                    snapshot: &snapshot,
                    revision: 0,
                },
                &SearchSources {
                    directory: &store,
                    messages: &store,
                    name_filter: &DisplayNameFilter,
                    sort: &RecencySort,
                },
            );

            let output = if view == SearchView::Default {
                let limit = session.config().less_list_items_amount;
                let recent = store.recently_found_chat_ids(limit)?;
                let mut top_chats = store.chat_ids_by_activity()?;
                top_chats.truncate(limit);
                serde_json::json!({
                    "view": view,
                    "recently_found": recent,
                    "top_chats": top_chats,
                })
            } else {
                serde_json::json!({ "view": view.renderable(&store) })
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Open { id, me } => {
            let session = SearchSession::new(SearchConfig::load(&store)?);
            let (sender, rx) = ActionSender::channel();
            session.select_chat(&id, me.as_deref(), &sender);
            drop(sender);
            apply_actions(&store, rx)?;
        }
        Command::Recent { limit, clear } => {
            if clear {
                store.clear_recently_found()?;
                log::info!("recently found list cleared");
            } else {
                let recent = store.recently_found_chat_ids(limit)?;
                println!("{}", serde_json::to_string_pretty(&recent)?);
            }
        }
        Command::Sync { marker, .. } => match marker {
            Some(marker) => {
                store.set_sync_marker(&marker)?;
                log::info!("sync marker set to {}", marker);
            }
            None => {
                store.clear_sync_marker()?;
                log::info!("sync marker cleared");
            }
        },
        Command::Import {
            file,
            keep_per_chat,
        } => {
            let batch: ImportBatch = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            let stats = store.import_batch(&batch, keep_per_chat)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Config { set, reset } => {
            if reset {
                SearchConfig::reset(&store)?;
            } else if let Some(json) = set {
                SearchConfig::from_json(&json)?.save(&store)?;
            }
            let current = SearchConfig::load(&store)?;
            println!("{}", serde_json::to_string_pretty(&current)?);
        }
    }

    Ok(())
}

/// Persist what the store owns and print the rest for the caller to execute.
fn apply_actions(
    store: &Store,
    mut rx: UnboundedReceiver<SearchAction>,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Ok(action) = rx.try_recv() {
        if !action.persist(store)? {
            println!("{}", serde_json::to_string(&action)?);
        }
    }
    Ok(())
}
