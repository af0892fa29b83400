// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Clone | Sync | Status | List | Pull | Push | Migrate | Version
//! ```

use std::process::ExitCode;

use tugboat::cli::global::GlobalOptions;
use tugboat::cli::{self, Command};
use tugboat::cmd::clone::run_clone_command;
use tugboat::cmd::list::run_list_command;
use tugboat::cmd::migrate::run_migrate_command;
use tugboat::cmd::status::run_status_command;
use tugboat::cmd::sync::{Action, run_sync_command};
use tugboat::logging::init_logging;
use tugboat::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let result = match &cli.command {
        Some(Command::Version) => {
            println!("tugboat {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Clone(args)) => run_clone_command(args, global).await,
        Some(Command::Sync(args)) => run_sync_command(Action::Sync, args, global).await,
        Some(Command::Status(args)) => run_status_command(args, global).await,
        Some(Command::List(args)) => run_list_command(args, global).await,
        Some(Command::Pull(args)) => run_sync_command(Action::Pull, args, global).await,
        Some(Command::Push(args)) => run_sync_command(Action::Push, args, global).await,
        Some(Command::Migrate(args)) => run_migrate_command(args, global),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
