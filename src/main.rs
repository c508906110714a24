//! Task Board
//!
//! `serve` runs the task service; the other subcommands are a terminal client
//! for it.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use task_board::cli::{Cli, Command};
use task_board::client::{
    AlwaysConfirm, Board, Confirm, HttpTaskApi, PromptConfirm, TaskForm, quotes, render,
};
use task_board::config::Config;
use task_board::db::Database;
use task_board::server::start_server;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {}
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.client.api_url = url.clone();
    }

    match cli.command {
        Command::Serve { port, database } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(path) = database {
                config.store.name = path.to_string_lossy().into_owned();
            }
            run_server(config).await
        }
        command => run_client(config, command).await,
    }
}

/// Open the store, serve until Ctrl-C, then close the store.
async fn run_server(config: Config) -> Result<()> {
    config.store.warn_unused();
    config.ensure_db_dir()?;

    let db = Arc::new(Database::open(config.store.db_path())?);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let server = start_server(Arc::clone(&db), addr).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    server.shutdown().await;

    Arc::try_unwrap(db)
        .map_err(|_| anyhow!("database still referenced after shutdown"))?
        .close()
}

async fn run_client(config: Config, command: Command) -> Result<()> {
    let mut board = Board::new(HttpTaskApi::new(config.client.api_url));

    match command {
        Command::Serve { .. } => return Err(anyhow!("serve is not a client command")),
        Command::List { all, filter } => {
            board.load().await?;
            if all {
                board.set_filter(filter);
                board.open_all().await?;
                print!("{}", render::render_all(&board));
            } else {
                print!("{}", render::render_board(&board));
            }
            return Ok(());
        }
        Command::Add { title, description } => {
            board.form = TaskForm::new(title, description);
            board.submit().await?;
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            board.load().await?;
            if !board.edit(id, title, description).await? {
                return Err(anyhow!("Task not found: {}", id));
            }
        }
        Command::Done { id } => board.mark_done(id).await?,
        Command::Delete { id, yes } => {
            let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &PromptConfirm };
            if !board.delete(id, confirm).await? {
                println!("Cancelled");
                return Ok(());
            }
        }
        Command::Watch => return watch(board).await,
    }

    print!("{}", render::render_board(&board));
    Ok(())
}

/// Render once, then again whenever the quote rotates.
async fn watch(mut board: Board<HttpTaskApi>) -> Result<()> {
    board.load().await?;
    let (mut quote_rx, rotation) = quotes::spawn_rotation(quotes::ROTATION_INTERVAL);
    print!("{}", render::render_board(&board));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = quote_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let quote = *quote_rx.borrow_and_update();
                board.set_quote(quote);
                println!();
                print!("{}", render::render_board(&board));
            }
        }
    }

    rotation.abort();
    Ok(())
}
