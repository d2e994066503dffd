use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use textplace::config::Config;
use textplace::placement::{
    place_text_on_image, Align, Compositor, Position, Request, StyleOverrides,
};

/// Textplace - overlay styled text entries onto images
#[derive(Parser, Debug)]
#[command(name = "textplace")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fonts directory (overrides the configuration file)
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw text onto an image file
    Place {
        /// Input image path
        #[arg(short, long)]
        input: PathBuf,

        /// Output image path; the extension selects the format
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        entries: EntryArgs,
    },

    /// List fonts available in the fonts directory
    Fonts,

    /// Print the normalized records as a batch document
    Records {
        #[command(flatten)]
        entries: EntryArgs,
    },
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false, id = "source")]
struct SourceArgs {
    /// Single text to draw, styled by the flags below
    #[arg(short, long)]
    text: Option<String>,

    /// JSON or YAML file holding a batch of entries
    #[arg(short, long)]
    batch: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct EntryArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Anchor point as X,Y
    #[arg(long, allow_hyphen_values = true)]
    position: Option<Position>,

    /// Font file name
    #[arg(long)]
    font: Option<String>,

    /// Font size in pixels
    #[arg(long)]
    size: Option<u32>,

    /// Color as #RRGGBB or a color name
    #[arg(long)]
    color: Option<String>,

    /// Horizontal alignment: left, center or right
    #[arg(long)]
    align: Option<Align>,
}

impl EntryArgs {
    fn overrides(&self) -> StyleOverrides {
        StyleOverrides {
            position: self.position,
            font_name: self.font.clone(),
            font_size: self.size,
            font_color: self.color.clone(),
            align: self.align,
        }
    }

    fn request(&self) -> Result<Request> {
        let overrides = self.overrides();

        if let Some(path) = &self.source.batch {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read batch file {}", path.display()))?;
            let value: serde_json::Value = serde_yaml::from_str(&raw)
                .with_context(|| format!("Failed to parse batch file {}", path.display()))?;
            return Ok(Request::from_value(&value, &overrides)?);
        }

        let text = self.source.text.clone().unwrap_or_default();
        Ok(Request::single(text, overrides))
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(dir) = &args.fonts_dir {
        config.fonts_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let config = load_config(&args)?;

    // Initialize logging subsystem
    textplace::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging subsystem: {}", e))?;

    let resolver = config.font_resolver();

    match &args.command {
        Command::Place {
            input,
            output,
            entries,
        } => {
            let request = entries.request()?;
            let count = request.len();
            let compositor = Compositor::with_resolver(resolver);

            let written = place_text_on_image(input, output, &compositor, request)?;

            tracing::info!(
                input = %input.display(),
                output = %written.display(),
                entries = count,
                "Text placed"
            );
        }
        Command::Fonts => {
            for font in resolver.available_fonts() {
                println!("{}", font);
            }
        }
        Command::Records { entries } => {
            let records = entries.request()?.into_records();
            let batch: Vec<serde_json::Value> =
                records.iter().map(|r| r.to_tuple_value()).collect();
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
    }

    Ok(())
}
