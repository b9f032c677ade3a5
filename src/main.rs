use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use manatan_nav::{Location, NavigationHistoryTracker, Replay, DEFAULT_KEY};
use std::path::PathBuf;
use tokio::io::{self, AsyncBufRead, BufReader};

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "manatan-nav")]
#[command(about = "Replays navigation events and prints the resulting history")]
struct Args {
    #[arg(help = "JSON-lines file with navigation events, stdin when omitted or \"-\"")]
    input: Option<PathBuf>,

    #[arg(long, help = "Location the session starts on (path or full URL)")]
    initial: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long, help = "Print the history after every change instead of only at the end")]
    each: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut replay = match &args.initial {
        Some(initial) => Replay::with_initial(&Location::parse(DEFAULT_KEY, initial)?),
        None => Replay::from_first_event(),
    };

    let reader: Box<dyn AsyncBufRead + Unpin> = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(BufReader::new(io::stdin())),
    };

    let mut printed = 0;
    if args.each {
        // Seeded from --initial, so the stream may never change it
        if let Some(tracker) = replay.tracker() {
            print_history(tracker, args.format, printed)?;
            printed += 1;
        }
    }

    replay
        .run(reader, |tracker| {
            if args.each {
                print_history(tracker, args.format, printed)?;
                printed += 1;
            }
            Ok(())
        })
        .await?;

    let tracker = replay.finish()?;
    if !args.each {
        print_history(&tracker, args.format, 0)?;
    }

    Ok(())
}

fn print_history(tracker: &NavigationHistoryTracker, format: OutputFormat, index: usize) -> Result<()> {
    let paths = tracker.paths();
    match format {
        OutputFormat::Text => {
            // Blank line between snapshots
            if index > 0 {
                println!();
            }
            for path in paths {
                println!("{}", path);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&paths)?),
    }
    Ok(())
}
