#![deny(unsafe_code)]
//! CLI binary for the abstract-art generator.
//!
//! Subcommands:
//! - `render` renders one image from a config file and/or flags, writes it
//! - `defaults` prints the default config as JSON
//! - `list` prints the available shapes, modes and palettes

mod error;
mod logging;

use abstract_art_core::{
    BackgroundMode, ConfigError, GradientKind, HarmonyMode, Palette, RenderConfig, ShapeKind,
    StrokePolicy, SymmetryMode, TextContent, TextureKind,
};
use abstract_art_render::{render, save};
use clap::{Args, Parser, Subcommand};
use error::CliError;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

/// Upper bound of seeds picked by `--random-seed`.
const MAX_RANDOM_SEED: u64 = 999_999;

#[derive(Parser)]
#[command(name = "abstract-art", about = "Seeded abstract art generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one image and write it as PNG or JPEG.
    Render(RenderArgs),
    /// Print the default config as JSON.
    Defaults,
    /// List shapes, modes and palettes.
    List,
}

/// Flags layer over `--config`, which layers over the defaults.
#[derive(Args)]
struct RenderArgs {
    /// JSON config file; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Flat JSON overrides, e.g. '{"density":0.3,"harmony":"triadic"}'.
    #[arg(long)]
    params: Option<String>,

    /// PRNG seed for deterministic output.
    #[arg(long, conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Pick a seed in [1, 999999] from the clock.
    #[arg(long)]
    random_seed: bool,

    /// Canvas width in pixels.
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Shape budget before density scaling.
    #[arg(long)]
    complexity: Option<u32>,

    /// Fraction of the budget to draw, in [0, 1].
    #[arg(long)]
    density: Option<f64>,

    /// Built-in palette name (default, ocean, neon, earth, monochrome, vapor, fire).
    #[arg(short, long)]
    palette: Option<String>,

    /// Palette indices to paint with; empty uses the harmony.
    #[arg(long, value_delimiter = ',')]
    select: Vec<usize>,

    /// Harmony mode used when no palette colors are selected.
    #[arg(long)]
    harmony: Option<String>,

    /// Base hue of the harmony in degrees.
    #[arg(long)]
    hue: Option<f64>,

    /// Symmetry mode (none, horizontal, vertical, radial).
    #[arg(long)]
    symmetry: Option<String>,

    /// Radial symmetry sections.
    #[arg(long)]
    sections: Option<u32>,

    /// Comma-separated shape kinds to enable.
    #[arg(long, value_delimiter = ',')]
    shapes: Vec<String>,

    /// Literal text for text shapes instead of random words.
    #[arg(long)]
    text: Option<String>,

    /// Background mode (random, solid, gradient, pattern).
    #[arg(long)]
    background: Option<String>,

    /// Gradient kind (linear, radial, conical, random).
    #[arg(long)]
    gradient: Option<String>,

    /// Stroke color policy (contrast, complementary, random, black, white).
    #[arg(long)]
    stroke: Option<String>,

    /// Enable a texture overlay of this kind (noise, lines, dots, paper).
    #[arg(long)]
    texture: Option<String>,

    /// Texture intensity, [0, 100].
    #[arg(long)]
    intensity: Option<u32>,

    /// Fill shapes with flat colors only.
    #[arg(long)]
    no_gradients: bool,

    /// Skip shape outlines.
    #[arg(long)]
    no_stroke: bool,

    /// Draw every shape fully opaque.
    #[arg(long)]
    no_transparency: bool,

    /// Output file path; unknown extensions get `.png` appended.
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
}

fn parse_mode<T>(
    kind: &'static str,
    name: &str,
    lookup: impl Fn(&str) -> Option<T>,
) -> Result<T, CliError> {
    lookup(name).ok_or_else(|| {
        ConfigError::UnknownMode {
            kind,
            name: name.to_string(),
        }
        .into()
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| (d.as_nanos() % u128::from(MAX_RANDOM_SEED)) as u64 + 1)
}

fn load_config(path: &Path) -> Result<RenderConfig, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display())))
}

/// Resolves the final config: file (or defaults), then `--params`, then flags.
fn build_config(args: &RenderArgs) -> Result<RenderConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };

    if let Some(params) = &args.params {
        let params: serde_json::Value = serde_json::from_str(params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        config.apply_overrides(&params)?;
    }

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.random_seed {
        config.seed = clock_seed();
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(complexity) = args.complexity {
        config.complexity = complexity;
    }
    if let Some(density) = args.density {
        config.density = density;
    }
    if let Some(name) = &args.palette {
        config.palette.colors = Palette::from_name(name)?.into_colors();
        config.palette.selected.clear();
    }
    if !args.select.is_empty() {
        config.palette.selected = args.select.clone();
    }
    if let Some(name) = &args.harmony {
        config.harmony.mode = parse_mode("harmony", name, HarmonyMode::from_name)?;
    }
    if let Some(hue) = args.hue {
        config.harmony.base_hue = hue;
    }
    if let Some(name) = &args.symmetry {
        config.symmetry.mode = parse_mode("symmetry", name, SymmetryMode::from_name)?;
    }
    if let Some(sections) = args.sections {
        config.symmetry.sections = sections;
    }
    if !args.shapes.is_empty() {
        config.shapes.enabled = args
            .shapes
            .iter()
            .map(|name| {
                ShapeKind::from_name(name)
                    .ok_or_else(|| CliError::Input(format!("unknown shape: {name}")))
            })
            .collect::<Result<_, _>>()?;
    }
    if let Some(text) = &args.text {
        config.shapes.text = TextContent::Literal(text.clone());
    }
    if let Some(name) = &args.background {
        config.background.mode = parse_mode("background", name, BackgroundMode::from_name)?;
    }
    if let Some(name) = &args.gradient {
        config.gradient.kind = parse_mode("gradient", name, GradientKind::from_name)?;
    }
    if let Some(name) = &args.stroke {
        config.stroke.policy = parse_mode("stroke", name, StrokePolicy::from_name)?;
    }
    if let Some(name) = &args.texture {
        config.texture.kind = parse_mode("texture", name, TextureKind::from_name)?;
        config.texture.enabled = true;
    }
    if let Some(intensity) = args.intensity {
        config.texture.intensity = intensity;
    }
    if args.no_gradients {
        config.gradient.enabled = false;
    }
    if args.no_stroke {
        config.stroke.enabled = false;
    }
    if args.no_transparency {
        config.transparency.enabled = false;
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let shapes: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.name()).collect();
            let harmonies: Vec<&str> = HarmonyMode::ALL.iter().map(|m| m.name()).collect();
            let symmetries: Vec<&str> = SymmetryMode::ALL.iter().map(|m| m.name()).collect();
            let backgrounds: Vec<&str> = BackgroundMode::ALL.iter().map(|m| m.name()).collect();
            let gradients: Vec<&str> = GradientKind::ALL.iter().map(|k| k.name()).collect();
            let strokes: Vec<&str> = StrokePolicy::ALL.iter().map(|p| p.name()).collect();
            let textures: Vec<&str> = TextureKind::ALL.iter().map(|k| k.name()).collect();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "shapes": shapes,
                    "harmonies": harmonies,
                    "symmetries": symmetries,
                    "backgrounds": backgrounds,
                    "gradients": gradients,
                    "strokes": strokes,
                    "textures": textures,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (title, names) in [
                    ("Shapes", shapes.as_slice()),
                    ("Harmonies", harmonies.as_slice()),
                    ("Symmetries", symmetries.as_slice()),
                    ("Backgrounds", backgrounds.as_slice()),
                    ("Gradients", gradients.as_slice()),
                    ("Strokes", strokes.as_slice()),
                    ("Textures", textures.as_slice()),
                    ("Palettes", palettes),
                ] {
                    println!("{title}:");
                    println!("  {}", names.join(", "));
                }
            }
        }
        Command::Defaults => {
            println!(
                "{}",
                serde_json::to_string_pretty(&RenderConfig::default())?
            );
        }
        Command::Render(args) => {
            let config = build_config(&args)?;
            debug!("resolved config: {}", serde_json::to_string(&config)?);

            let image = render(&config)?;
            let written = save(&image, &args.output)?;

            if cli.json {
                let mut info = serde_json::to_value(&image)?;
                info["output"] = written.display().to_string().into();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", image.summary());
                info!(
                    "{}x{}, {} draws -> {}",
                    image.width,
                    image.height,
                    image.copies_drawn,
                    written.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
