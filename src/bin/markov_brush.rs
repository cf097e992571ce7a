//! Paint one MarkovBrush picture to SVG.

use anyhow::{Context, Result};
use clap::Parser;
use markov_brush::brush::{save_path, BrushConfig, Palette, Preset};
use markov_brush::render::{default_title, Glyph, ScatterRenderer};
use markov_brush::walker::{Direction, JumpPolicy};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Walk a Markov-chain brush and save the marks it leaves as an SVG.
///
/// Settings come from a preset, or a RON brush config, with flags applied on top.
#[derive(Parser, Debug)]
#[command(name = "markov-brush")]
#[command(after_help = r#"Set RUST_LOG=debug for more detail.

Examples:
  markov-brush --seed 7 --output drift.svg
  markov-brush --preset spiral --steps 5000 --jump 50
  markov-brush --preset textured --write-config textured.ron
  markov-brush --config textured.ron --glyph d"#)]
struct Args {
    /// RON brush config to start from (overrides --preset)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in brush: drift, spiral or textured
    #[arg(long, default_value = "drift")]
    preset: Preset,

    /// Seed for a reproducible picture
    #[arg(long)]
    seed: Option<u64>,

    /// Number of steps to walk
    #[arg(long)]
    steps: Option<usize>,

    /// Distance covered by a Jump
    #[arg(long)]
    jump: Option<f64>,

    /// Remember the Jump itself, not the landing direction, after a jump
    #[arg(long)]
    remember_jump: bool,

    /// Starting direction (N, E, S, W, P, J)
    #[arg(long, value_name = "DIR")]
    start_direction: Option<Direction>,

    /// Starting color label
    #[arg(long, value_name = "COLOR")]
    start_color: Option<String>,

    /// Starting auxiliary label
    #[arg(long, value_name = "LABEL")]
    start_aux: Option<String>,

    /// Draw every mark with this glyph (point, pixel, circle, square, diamond)
    #[arg(long)]
    glyph: Option<Glyph>,

    /// Title for the SVG (default: generated from steps and jump size)
    #[arg(long)]
    title: Option<String>,

    /// Where to write the SVG
    #[arg(long, short, default_value = "MarkovBrush.svg")]
    output: PathBuf,

    /// Also write the walked path as RON
    #[arg(long, value_name = "FILE")]
    dump_path: Option<PathBuf>,

    /// Write the effective config as RON and exit without painting
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,
}

impl Args {
    fn brush_config(&self) -> Result<BrushConfig> {
        let mut config = match &self.config {
            Some(file) => BrushConfig::from_file(file)
                .with_context(|| format!("loading brush config {}", file.display()))?,
            None => BrushConfig::from_preset(self.preset),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(steps) = self.steps {
            config.path_length = steps;
        }
        if let Some(jump) = self.jump {
            config.jump_size = jump;
        }
        if self.remember_jump {
            config.jump_policy = JumpPolicy::RememberJump;
        }
        if let Some(direction) = self.start_direction {
            config.start.direction = direction;
        }
        if let Some(color) = &self.start_color {
            config.start.color = color.as_str().into();
        }
        if let Some(aux) = &self.start_aux {
            config.start.auxiliary = aux.as_str().into();
        }
        if let Some(glyph) = self.glyph {
            config.palette = Palette::with_glyph(config.palette, glyph);
        }
        if self.title.is_some() {
            config.render.title = self.title.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.brush_config()?;

    if let Some(file) = &args.write_config {
        config.to_file(file)?;
        info!(file = %file.with_extension("ron").display(), "wrote brush config");
        return Ok(());
    }

    let mut sampler = config.sampler();
    let path = config.paint(&mut sampler)?;
    info!(
        steps = config.path_length,
        jump = config.jump_size,
        seed = ?config.seed,
        "walked brush"
    );

    if let Some(file) = &args.dump_path {
        save_path(&path, file)?;
    }

    let renderer = ScatterRenderer::new(config.render.clone());
    let document = renderer.render(
        &path,
        &config.palette,
        &default_title(config.path_length, config.jump_size),
    )?;
    renderer.save(&document, &args.output)?;
    info!(file = %args.output.display(), marks = path.len(), "saved picture");
    Ok(())
}
