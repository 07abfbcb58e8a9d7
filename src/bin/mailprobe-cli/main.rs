mod args;
mod output;

use anyhow::{Context, Result};
use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use output::{OutputRow, any_invalid, write_reports};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn verify_one(email: &str, cli: &Cli) -> Result<OutputRow> {
    let result = mailprobe_lib::verify_with_options(email, &cli.verify_options())
        .await
        .with_context(|| format!("verify {email}"))?;
    Ok(OutputRow {
        email: email.to_string(),
        result,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut rows = Vec::new();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let email = line.context("read stdin")?;
            if email.trim().is_empty() {
                continue;
            }
            rows.push(verify_one(email.trim_end_matches('\r'), &cli).await?);
        }
    } else if let Some(Commands::Verify { email }) = &cli.cmd {
        rows.push(verify_one(email, &cli).await?);
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalids, 1 fatal
    if any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
