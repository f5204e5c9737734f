#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use vocalizer_tts::ffi::types::Validation;
use vocalizer_tts::ffi::{TextFormat, VeError};
use vocalizer_tts::{Outcome, SessionOptions, Vocalizer, VocalizerConfig};

#[derive(Parser)]
#[command(version, about = "Speak text with the Vocalizer Expressive engine")]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging, repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize text into a WAV file.
    Speak {
        #[arg(long)]
        voice: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        rate: Option<u16>,
        #[arg(long)]
        pitch: Option<u16>,
        #[arg(long)]
        volume: Option<u16>,
        #[arg(long, value_enum, default_value_t = Format::Plain)]
        format: Format,
        #[arg(short, long, default_value = "speech.wav")]
        output: PathBuf,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List installed languages and voices.
    Voices {
        #[arg(long)]
        language: Option<String>,
    },
    /// Show the license state.
    License,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Plain,
    Html,
    Xml,
    Ssml,
}

impl From<Format> for TextFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plain => TextFormat::Plain,
            Format::Html => TextFormat::Html,
            Format::Xml => TextFormat::Xml,
            Format::Ssml => TextFormat::Ssml,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(match cli.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        })
        .init();

    let config = match &cli.config {
        Some(path) => VocalizerConfig::from_file(path)?,
        None => VocalizerConfig::default(),
    };
    let vocalizer = Vocalizer::from_config(&config)?;

    match cli.command {
        Command::Speak {
            voice,
            language,
            rate,
            pitch,
            volume,
            format,
            output,
            text,
        } => {
            let options = SessionOptions {
                voice,
                language,
                rate,
                pitch,
                volume,
            };
            let synthesis = vocalizer.synthesize_with(&text.join(" "), format.into(), &options)?;
            if synthesis.outcome == Outcome::Stopped {
                info!("Synthesis stopped early");
            }

            std::fs::write(&output, synthesis.to_wav()?)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "{}: {:.2}s at {} Hz, {} marks",
                output.display(),
                synthesis.duration_secs(),
                synthesis.sample_rate.hertz(),
                synthesis.marks.len()
            );
        }
        Command::Voices { language } => {
            let engine = vocalizer.engine();
            let languages = match language {
                Some(name) => engine
                    .languages()?
                    .into_iter()
                    .filter(|x| x.name == name || x.code.eq_ignore_ascii_case(&name))
                    .collect(),
                None => engine.languages()?,
            };

            for language in languages {
                println!("{} ({}) {}", language.name, language.code, language.version);
                for voice in engine.voices(&language.name)? {
                    let models = engine
                        .speech_databases(&language.name, &voice.name)?
                        .into_iter()
                        .map(|x| x.model)
                        .collect::<Vec<_>>();
                    println!("  {} [{}, {}] {}", voice.name, voice.kind, voice.age, models.join(", "));
                }
            }
        }
        Command::License => match vocalizer.license() {
            Ok(Validation::Licensed(details)) => {
                println!("Licensed to {}", details.user_name.unwrap_or_default());
                if let Some(distributor) = details.distributor {
                    println!("Distributor: {}", distributor);
                }
                if let Some(expires) = details.expires {
                    println!("Expires: {}", expires);
                }
            }
            Ok(Validation::Demo { expires }) => println!("Demo license, expires {}", expires),
            Ok(Validation::Invalid) => println!("Invalid license"),
            Ok(Validation::Unknown(kind)) => println!("Unknown license state {}", kind),
            Err(error) => match error.downcast_ref::<VeError>().and_then(VeError::license_code) {
                Some(code) => println!("No usable license: {:?}", code),
                None => return Err(error),
            },
        },
    }

    Ok(())
}
