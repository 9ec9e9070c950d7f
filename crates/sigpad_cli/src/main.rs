//! sigpad - render captured signatures to PNG
//!
//! Subcommands:
//! - `lines`: stroke JSON (`[{"lx":..,"ly":..,"mx":..,"my":..}]`) to PNG
//! - `text`: typed name to PNG with an installed font or a font file
//! - `fonts`: list installed font families
//! - `init`: write a default sigpad.toml

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sigpad_raster::{CanvasSize, Color, RenderConfig, SignatureRenderer};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::{SigpadConfig, CONFIG_FILE};

/// Render captured signatures to PNG
#[derive(Parser, Debug)]
#[command(name = "sigpad")]
#[command(about = "Render captured signatures and typed names to PNG")]
#[command(version)]
struct Cli {
    /// Config file or directory containing sigpad.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a stroke list (JSON) to PNG
    Lines {
        /// Stroke JSON file, or `-` for stdin
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Target width (defaults to the canvas width)
        #[arg(long)]
        width: Option<u32>,

        /// Target height (defaults to the canvas height)
        #[arg(long)]
        height: Option<u32>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a typed name to PNG
    Text {
        /// Name to draw
        text: String,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Font file to use instead of the installed font name
        #[arg(long)]
        font_file: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List installed font families
    Fonts,

    /// Write a default sigpad.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Overrides applied on top of the config file
#[derive(Args, Debug)]
struct RenderArgs {
    /// Pen color (#RRGGBB or #RRGGBBAA)
    #[arg(long)]
    pen_color: Option<Color>,

    /// Background color (#RRGGBB or #RRGGBBAA)
    #[arg(long)]
    background: Option<Color>,

    /// Pen width in pixels
    #[arg(long)]
    pen_width: Option<f32>,

    /// Font size in pixels
    #[arg(long)]
    font_size: Option<f32>,

    /// Installed font family name
    #[arg(long)]
    font_name: Option<String>,

    /// Canvas width in pixels
    #[arg(long)]
    canvas_width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    canvas_height: Option<u32>,
}

impl RenderArgs {
    fn apply(self, mut config: RenderConfig) -> RenderConfig {
        if let Some(color) = self.pen_color {
            config.pen_color = color;
        }
        if let Some(color) = self.background {
            config.background = color;
        }
        if let Some(width) = self.pen_width {
            config.pen_width = width;
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(name) = self.font_name {
            config.font_name = name;
        }
        if let Some(width) = self.canvas_width {
            config.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            config.canvas_height = height;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config, command, ..
    } = cli;

    match command {
        Command::Lines {
            input,
            output,
            width,
            height,
            render,
        } => {
            let file_config = load_config(config.as_deref())?;
            let config = render.apply(file_config.render);
            config.validate()?;
            let fallback = file_config.output.target_size(&config);
            let target = CanvasSize::new(
                width.unwrap_or(fallback.width),
                height.unwrap_or(fallback.height),
            );
            let json = read_input(&input)?;
            let image = SignatureRenderer::new(config).render_json(&json, target)?;
            sigpad_raster::save_png(&image, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(
                "Wrote {}x{} signature to {}",
                image.width(),
                image.height(),
                output.display()
            );
        }
        Command::Text {
            text,
            output,
            font_file,
            render,
        } => {
            let file_config = load_config(config.as_deref())?;
            let config = render.apply(file_config.render);
            let image = SignatureRenderer::new(config).render_text(&text, font_file.as_deref())?;
            sigpad_raster::save_png(&image, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote typed signature to {}", output.display());
        }
        Command::Fonts => {
            for family in SignatureRenderer::list_font_families() {
                println!("{}", family);
            }
        }
        Command::Init { dir, force } => {
            let path = dir.join(CONFIG_FILE);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            fs::write(&path, SigpadConfig::default().to_toml()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
    }

    Ok(())
}

/// Explicit `--config`, else ./sigpad.toml if present, else defaults
fn load_config(path: Option<&Path>) -> Result<SigpadConfig> {
    match path {
        Some(path) => SigpadConfig::load(path),
        None => SigpadConfig::load_or_default(Path::new(".")),
    }
}

/// Read stroke JSON from a file, or stdin for `-`
fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read stroke JSON from stdin")?;
        return Ok(json);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
