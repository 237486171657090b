//! Demonstration entry point for YASL core.
//!
//! # Responsibility
//! - Open the default store, create one list and one item, report their ids.
//! - Terminate with a non-zero status on any failure.

use log::{error, info};
use std::process::ExitCode;
use yasl_core::{
    default_log_level, init_logging, ItemId, ListId, RepoResult, ShoppingRepository,
    SqliteShoppingRepository, DEFAULT_DB_FILE_NAME,
};

const LOG_DIR_NAME: &str = "logs";
const DEMO_LIST_NAME: &str = "Kaufland";
const DEMO_ITEM_NAME: &str = "Milch";
const DEMO_ITEM_CATEGORY: &str = "Milchprodukte";

fn main() -> ExitCode {
    if let Err(err) = setup_logging() {
        eprintln!("yasl: logging disabled: {err}");
    }

    match run() {
        Ok((list_id, item_id)) => {
            println!("created list: {list_id}");
            println!("created item: {item_id}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=demo_run module=cli status=error error={err}");
            eprintln!("yasl: {err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() -> Result<(), String> {
    let cwd = std::env::current_dir().map_err(|err| format!("no working directory: {err}"))?;
    let log_dir = cwd.join(LOG_DIR_NAME);
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not UTF-8", log_dir.display()))?;
    init_logging(default_log_level(), log_dir)
}

fn run() -> RepoResult<(ListId, ItemId)> {
    // Dropping `repo` on the error paths below closes the connection.
    let repo = SqliteShoppingRepository::open(DEFAULT_DB_FILE_NAME)?;

    let list_id = repo.create_list(DEMO_LIST_NAME)?;
    info!("event=demo_run module=cli status=list_created list_id={list_id}");

    let item_id = repo.create_item(list_id, DEMO_ITEM_NAME, DEMO_ITEM_CATEGORY)?;
    info!("event=demo_run module=cli status=item_created item_id={item_id}");

    repo.close()?;
    Ok((list_id, item_id))
}
