//! portatone - transmit modem and DTMF tone sequences
//!
//! Run with: cargo run -- modem --name Bell202 --message HELLO

mod app;
mod ui;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result as EyreResult;

use portatone::{config::GeneratorConfig, modem};

#[derive(Parser)]
#[command(name = "portatone")]
#[command(about = "Tone sequence generator with a live monitor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// FM deviation for a full-scale tone (Hz)
    #[arg(long, default_value = "5000", global = true)]
    deviation: u32,

    /// Do not play the monitor audio
    #[arg(long, global = true)]
    no_monitor: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a text message through a named modem
    Modem {
        /// Modem name (see `portatone modems`)
        #[arg(short, long, default_value = "Bell202")]
        name: String,

        /// ASCII text to send
        #[arg(short, long)]
        message: String,
    },

    /// Dial a DTMF sequence
    Dtmf {
        /// Keys from 0-9, A-D, * and #
        #[arg(short, long)]
        digits: String,

        /// Tone length per key (ms)
        #[arg(long, default_value = "100")]
        tone_ms: u32,

        /// Silence between keys (ms)
        #[arg(long, default_value = "100")]
        gap_ms: u32,
    },

    /// List the available modems
    Modems,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse();

    let config = GeneratorConfig {
        fm_deviation_hz: cli.deviation,
        audio_monitor: !cli.no_monitor,
        ..GeneratorConfig::default()
    };
    config.validate()?;

    let (job, title) = match cli.command {
        Commands::Modem { name, message } => {
            let def = modem::find(&name)?;
            (def.build_job(&message, &config)?, format!("{} {:?}", def.name, message))
        }
        Commands::Dtmf {
            digits,
            tone_ms,
            gap_ms,
        } => (
            modem::dtmf::build_job(&digits, tone_ms, gap_ms, &config)?,
            format!("DTMF {}", digits),
        ),
        Commands::Modems => {
            for def in modem::MODEM_DEFS.iter() {
                println!(
                    "{:<10} {:?}  mark {} Hz  space {} Hz  {} baud",
                    def.name, def.modulation, def.mark_freq, def.space_freq, def.baudrate
                );
            }
            return Ok(());
        }
    };

    app::run(job, title, &config)
}
