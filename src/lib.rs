//! MarkovBrush: generative scatter art from a brush driven by Markov chains.
//!
//! A brush has three independent attributes (movement direction, color, and an
//! opaque auxiliary label such as pressure or texture), each evolving on its own
//! first-order Markov chain. Walking the brush for N ticks produces a [`walker::Path`]
//! of positions and labels, which [`render`] turns into an SVG.
//!
//! ```rust
//! use markov_brush::prelude::*;
//!
//! let config = BrushConfig::from_preset(Preset::Spiral);
//! let path = config.paint(&mut WeightedChoiceSampler::seeded(42)).unwrap();
//! let doc = ScatterRenderer::new(config.render.clone())
//!     .render(&path, &config.palette, &default_title(config.path_length, config.jump_size))
//!     .unwrap();
//! assert!(doc.to_string().contains("MarkovBrush (1000 steps"));
//! ```

/// Error types shared by the chains, the walker and the renderer.
pub mod errors;

/// Small serde helpers.
pub mod util;

/// Validated probability distributions and the samplers that draw from them.
pub mod sampler;

/// Transition tables and single-attribute Markov chains.
pub mod chain;

/// The three-chain walker and the paths it produces.
pub mod walker;

/// SVG rendering of walked paths.
pub mod render;

/// Ready-to-paint configurations, presets and RON file support.
pub mod brush;

/// Import prelude::* to get the usual suspects.
pub mod prelude {
    pub use crate::brush::{AuxLabel, BrushConfig, ColorLabel, Palette, Preset, StartState};
    pub use crate::chain::{AttributeChain, TransitionTable};
    pub use crate::errors::{MarkovError, RenderError};
    pub use crate::render::{default_title, Glyph, MarkPainter, MarkStyle, RenderOptions, ScatterRenderer};
    pub use crate::sampler::{Distribution, Label, Sampler, ScriptedSampler, WeightedChoiceSampler};
    pub use crate::walker::{Direction, JumpPolicy, MarkovWalker, Path, PathRecord, WalkerState};
}
