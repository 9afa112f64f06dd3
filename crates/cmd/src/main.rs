// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use cmd::commands::run_command;
use cmd::common::{build_options, open_script};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "treefs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Require ancestor directories to exist instead of creating them
    #[arg(long, global = true)]
    no_auto_create: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script of filesystem operations against an empty filesystem
    Run {
        /// Script file; reads stdin when omitted or "-"
        script: Option<PathBuf>,

        /// Report failing lines and continue instead of stopping
        #[arg(short, long)]
        keep_going: bool,
    },
}

fn main() -> Result<()> {
    diagnostics::init_diagnostics();

    let cli = Cli::parse();
    let fs = treefs::FS::with_options(build_options(cli.no_auto_create));

    match cli.command {
        Commands::Run { script, keep_going } => {
            let input = open_script(script.as_deref())?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();

            let summary = run_command(&fs, input, &mut out, keep_going)?;
            out.flush()?;

            if summary.failed > 0 {
                return Err(anyhow!(
                    "{} of {} commands failed",
                    summary.failed,
                    summary.failed + summary.executed
                ));
            }
        }
    }

    Ok(())
}
