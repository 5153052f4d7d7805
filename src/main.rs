use string_queue::driver::{self, Session};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run queue commands from a script or stdin
#[derive(Parser)]
#[command(name = "qtest")]
#[command(version)]
struct Args {
    /// Command script to run instead of reading stdin
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let input: Box<dyn BufRead> = match args.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut out = io::stdout().lock();
    let mut session = Session::new();

    for (i, line) in input.lines().enumerate() {
        let line = line.context("failed to read command")?;
        match driver::parse_line(&line) {
            Ok(Some(cmd)) => {
                writeln!(out, "cmd> {}", line.trim())?;
                session.execute(&cmd, &mut out)?;
            }
            Ok(None) => {}
            Err(err) => {
                writeln!(out, "line {}: {}", i + 1, err)?;
                session.record_failure();
            }
        }
    }
    session.finish();
    out.flush()?;

    if session.failures() > 0 {
        bail!("{} check(s) failed", session.failures());
    }
    Ok(())
}
