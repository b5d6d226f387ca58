use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use datewheel::WheelKind;
use orbit::config;
use orbit::events::AppEvent;
use orbit::gui::app::AppModel;
use orbit::sys::{runtime, server::SOCKET_PATH};
use relm4::prelude::*;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Open the wheel on this date (YYYY-MM-DD) instead of today
    #[arg(short = 'd', long)]
    date: Option<NaiveDate>,

    /// Wheel to open with, overriding the config file (week or month)
    #[arg(short = 'k', long)]
    kind: Option<WheelKind>,

    /// Write the default config file and print its path
    #[arg(long)]
    init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Rotate the running wheel to today.
    Today,
    /// Center the running wheel on a date
    Select { date: NaiveDate },
    /// Show the next week or month
    Next,
    /// Show the previous week or month
    Prev,
    /// Switch the running wheel between week and month
    Kind { kind: WheelKind },
    /// Re-read the config file
    Reload,
}

impl From<Commands> for AppEvent {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Today => AppEvent::JumpToToday,
            Commands::Select { date } => AppEvent::Select(date),
            Commands::Next => AppEvent::Navigate(1),
            Commands::Prev => AppEvent::Navigate(-1),
            Commands::Kind { kind } => AppEvent::SwitchKind(kind),
            Commands::Reload => AppEvent::ConfigReload,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    match cli.command {
        Some(cmd) => send_command(&AppEvent::from(cmd)),
        None => {
            run(cli.date, cli.kind);
            Ok(())
        }
    }
}

fn run(date: Option<NaiveDate>, kind: Option<WheelKind>) {
    let mut config = config::load_or_default();
    if let Some(kind) = kind {
        config.kind = kind;
    }
    let anchor = date.unwrap_or_else(|| Local::now().date_naive());

    let (tx, rx) = async_channel::bounded(32);

    if let Err(e) = runtime::start_background_services(tx) {
        log::error!("Failed to start background services: {}", e);
    }

    // clap already consumed the arguments; keep GTK from parsing them again
    let app = RelmApp::new("org.orbit.Orbit").with_args(Vec::new());

    app.run::<AppModel>((config, anchor, rx));
}

fn send_command(event: &AppEvent) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to orbit at {}: {}. Is orbit running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", event)?;

    let mut reply = String::new();
    BufReader::new(&stream).read_line(&mut reply)?;
    if let Some(reason) = reply.trim().strip_prefix("error: ") {
        anyhow::bail!("orbit rejected '{}': {}", event, reason);
    }
    Ok(())
}
