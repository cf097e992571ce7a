//! Brush configuration: everything needed to paint one picture, loadable from and
//! savable to RON files.
//!
//! A [`BrushConfig`] bundles the three transition tables, the starting labels, walk
//! length, jump size, seed, the [`Palette`] that says how labels are painted, and
//! the page setup for the renderer.

use crate::errors::{MarkovError, RenderError};
use crate::render::{CssColor, Glyph, MarkPainter, MarkStyle, RenderOptions};
use crate::sampler::{Sampler, WeightedChoiceSampler};
use crate::walker::{Direction, JumpPolicy, MarkovWalker, Path};
use crate::chain::TransitionTable;
use anyhow::Result;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

pub mod labels;
pub use labels::{AuxLabel, ColorLabel};

pub mod presets;
pub use presets::Preset;

pub type BrushPath = Path<ColorLabel, AuxLabel>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StartState {
    pub direction: Direction,
    pub color: ColorLabel,
    pub auxiliary: AuxLabel,
}

/// How labels turn into paint.
///
/// Color labels are parsed as CSS colors unless `colors` maps them to something
/// else. Auxiliary labels are looked up in `marks`; failing that, a label that
/// names a glyph ("square") is drawn as that glyph at the default size, and
/// anything else gets `default_mark`. A `glyph_override` replaces the glyph of
/// every mark, whichever way it was found.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub colors: BTreeMap<ColorLabel, CssColor>,
    pub marks: BTreeMap<AuxLabel, MarkStyle>,
    pub default_mark: MarkStyle,
    pub glyph_override: Option<Glyph>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: BTreeMap::new(),
            marks: BTreeMap::from([
                (AuxLabel::new("light"), MarkStyle::new(Glyph::Circle, 0.6)),
                (AuxLabel::new("heavy"), MarkStyle::new(Glyph::Circle, 1.4)),
            ]),
            default_mark: MarkStyle::default(),
            glyph_override: None,
        }
    }
}

impl Palette {
    /// Draw every auxiliary label with the same glyph, keeping each label's size.
    pub fn with_glyph(mut self, glyph: Glyph) -> Self {
        self.glyph_override = Some(glyph);
        self
    }

    fn lookup_mark(&self, label: &AuxLabel) -> MarkStyle {
        if let Some(style) = self.marks.get(label) {
            return *style;
        }
        match label.as_str().parse::<Glyph>() {
            Ok(glyph) => MarkStyle::new(glyph, self.default_mark.size),
            Err(_) => self.default_mark,
        }
    }
}

impl MarkPainter<ColorLabel, AuxLabel> for Palette {
    fn color(&self, label: &ColorLabel) -> Result<CssColor, RenderError> {
        match self.colors.get(label) {
            Some(color) => Ok(color.clone()),
            None => csscolorparser::parse(label.as_str())
                .map_err(|_| RenderError::UnparseableColor(label.to_string())),
        }
    }

    fn mark(&self, label: &AuxLabel) -> MarkStyle {
        let style = self.lookup_mark(label);
        match self.glyph_override {
            Some(glyph) => MarkStyle::new(glyph, style.size),
            None => style,
        }
    }
}

fn default_path_length() -> usize {
    1000
}

fn default_jump_size() -> f64 {
    1.0
}

/// # BrushConfig
///
/// One complete picture's worth of settings.
///
/// ```rust
/// use markov_brush::brush::BrushConfig;
/// use markov_brush::sampler::WeightedChoiceSampler;
///
/// let mut config = BrushConfig::default();
/// config.path_length = 200;
/// let path = config.paint(&mut WeightedChoiceSampler::seeded(3)).unwrap();
/// assert_eq!(path.len(), 200);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BrushConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    pub start: StartState,
    #[serde(default = "default_path_length")]
    pub path_length: usize,
    #[serde(default = "default_jump_size")]
    pub jump_size: f64,
    #[serde(default)]
    pub jump_policy: JumpPolicy,
    pub directions: TransitionTable<Direction>,
    pub colors: TransitionTable<ColorLabel>,
    pub auxiliary: TransitionTable<AuxLabel>,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub render: RenderOptions,
}

impl Default for BrushConfig {
    fn default() -> Self {
        BrushConfig::from_preset(Preset::default())
    }
}

impl BrushConfig {
    pub fn from_preset(preset: Preset) -> Self {
        BrushConfig {
            seed: None,
            start: StartState {
                direction: Direction::South,
                color: ColorLabel::new("cyan"),
                auxiliary: preset.initial_auxiliary(),
            },
            path_length: default_path_length(),
            jump_size: default_jump_size(),
            jump_policy: JumpPolicy::default(),
            directions: preset.directions(),
            colors: presets::six_colors(),
            auxiliary: preset.auxiliary(),
            palette: Palette::default(),
            render: RenderOptions::default(),
        }
    }

    pub fn walker(&self) -> MarkovWalker<ColorLabel, AuxLabel> {
        MarkovWalker::new(
            self.directions.clone(),
            self.colors.clone(),
            self.auxiliary.clone(),
        )
        .with_jump_policy(self.jump_policy)
    }

    /// A sampler seeded from `seed`, or from entropy if there is none.
    pub fn sampler(&self) -> WeightedChoiceSampler<SmallRng> {
        match self.seed {
            Some(seed) => WeightedChoiceSampler::seeded(seed),
            None => WeightedChoiceSampler::from_entropy(),
        }
    }

    /// Walk the brush once with the given sampler.
    pub fn paint<S: Sampler>(&self, sampler: &mut S) -> Result<BrushPath, MarkovError> {
        self.walker().generate(
            sampler,
            self.start.direction,
            self.start.color.clone(),
            self.start.auxiliary.clone(),
            self.path_length,
            self.jump_size,
        )
    }

    pub fn from_str(text: &str) -> Result<BrushConfig> {
        let config = ron::from_str(text)?;
        Ok(config)
    }

    pub fn to_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn from_file(path: &PathBuf) -> Result<BrushConfig> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        let config = BrushConfig::from_str(data.as_str())?;
        info!(file = %path.display(), "loaded brush config");
        Ok(config)
    }

    /// Write the config out via a temp file, so a crash never leaves half a file.
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let path = path.with_extension("ron");
        let tmp_path = path.with_extension(format!("ron.tmp-{}", rand::random::<u32>()));
        std::fs::write(&tmp_path, self.to_string()?)?;
        std::fs::rename(&tmp_path, &path)?;
        debug!(file = %path.display(), "wrote brush config");
        Ok(())
    }
}

/// Write a generated path out as RON, for plotting elsewhere.
pub fn save_path(path: &BrushPath, file: &PathBuf) -> Result<()> {
    std::fs::write(file, ron::ser::to_string_pretty(path, ron::ser::PrettyConfig::default())?)?;
    debug!(file = %file.display(), records = path.len(), "wrote path");
    Ok(())
}
