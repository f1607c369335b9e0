mod commands;
mod panels;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use widgetshell_core::CalendarDate;

use commands::month::Step;
use panels::Panels;

#[derive(Parser)]
#[command(name = "widgetshell")]
#[command(about = "Calendar labels and the adjustable clock from the widgetshell panels")]
struct Cli {
    /// Directory holding persisted panel state (overrides data_dir from config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep all state in memory for this run only
    #[arg(long, global = true, conflicts_with = "data_dir")]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and write calendar day labels
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
    /// Show or adjust the clock offset
    Clock {
        #[command(subcommand)]
        command: ClockCommand,
    },
    /// Show the calendar month grid
    Month {
        /// Year to show (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Show the month before the selected one
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        /// Show the month after the selected one
        #[arg(long)]
        next: bool,
    },
    /// Show config paths and settings; pass a setting to change and save it
    Config {
        /// Redraw period for `watch`, in milliseconds
        #[arg(long)]
        tick_interval_ms: Option<u64>,

        /// Vertical drag distance per minute when adjusting the clock
        #[arg(long)]
        drag_threshold: Option<f32>,
    },
    /// Live clock and banner, redrawn every tick; reads edit commands from stdin
    Watch,
}

#[derive(Subcommand)]
enum EventsCommand {
    /// Print the label for a date
    Get {
        /// Date as YYYY-MM-DD
        date: CalendarDate,
    },
    /// Set the label for a date; an empty label removes it
    Set {
        /// Date as YYYY-MM-DD
        date: CalendarDate,

        /// Label text
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List all labelled dates
    List,
    /// Show the banner event for today (or --today)
    Preview {
        /// Resolve as if this were today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<CalendarDate>,
    },
}

#[derive(Subcommand)]
enum ClockCommand {
    /// Print the displayed time and offset
    Now,
    /// Add minutes to the offset (may be negative)
    Bump {
        #[arg(allow_hyphen_values = true)]
        minutes: i64,
    },
    /// Clear the offset
    Reset,
    /// Set the displayed time to HH:MM
    Set { time: String },
    /// Print analog hand angles for the displayed time
    Hands,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Config {
            tick_interval_ms,
            drag_threshold,
        } => return commands::config::run(tick_interval_ms, drag_threshold),
        command => command,
    };

    let mut panels = Panels::open(cli.data_dir, cli.ephemeral)?;

    match command {
        Commands::Events { command } => match command {
            EventsCommand::Get { date } => commands::events::get(&panels, date),
            EventsCommand::Set { date, text } => {
                commands::events::set(&mut panels, date, &text.join(" "))
            }
            EventsCommand::List => commands::events::list(&panels),
            EventsCommand::Preview { today } => commands::events::preview(&panels, today),
        },
        Commands::Clock { command } => match command {
            ClockCommand::Now => commands::clock::now(&panels),
            ClockCommand::Bump { minutes } => commands::clock::bump(&mut panels, minutes),
            ClockCommand::Reset => commands::clock::reset(&mut panels),
            ClockCommand::Set { time } => commands::clock::set(&mut panels, &time),
            ClockCommand::Hands => commands::clock::hands(&panels),
        },
        Commands::Month {
            year,
            month,
            prev,
            next,
        } => {
            let step = match (prev, next) {
                (true, _) => Some(Step::Prev),
                (_, true) => Some(Step::Next),
                _ => None,
            };
            commands::month::run(&panels, year, month, step)
        }
        Commands::Watch => commands::watch::run(panels),
        Commands::Config { .. } => Ok(()),
    }
}
