//! Configuration with YAML schema and validation.
//!
//! Mistake-proofing happens in three layers:
//! - type-safe structs (unknown fields are rejected),
//! - `validator` range checks,
//! - semantic checks that span fields (`min <= max`).
//!
//! Every field has a default matching the classic demo: 100 values drawn
//! from `1..=100`, bubble sort, ascending, 60 frames per second.

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::clock::{FrameClock, DEFAULT_RATE_HZ};
use crate::engine::rng::SeqRng;
use crate::engine::{Algorithm, Granularity, Order};
use crate::error::{SortError, SortResult};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VisConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Shape of generated sequences.
    #[validate(nested)]
    #[serde(default)]
    pub sequence: SequenceConfig,

    /// Seed for sequence generation; `None` draws one from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Initial sort selection.
    #[serde(default)]
    pub sort: SortConfig,

    /// Frame pacing.
    #[validate(nested)]
    #[serde(default)]
    pub frame: FrameConfig,

    /// Bar colors.
    #[validate(nested)]
    #[serde(default)]
    pub palette: Palette,

    /// Chart layout.
    #[validate(nested)]
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl VisConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SortResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VisConfigBuilder {
        VisConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` for an empty sequence, a
    /// zero frame rate or inconsistent fields, and `SortError::Validation`
    /// for other out-of-range fields.
    pub fn check(&self) -> SortResult<()> {
        self.validate_required()?;
        self.validate()?;
        self.validate_semantic()
    }

    fn validate_required(&self) -> SortResult<()> {
        if self.sequence.length == 0 {
            return Err(SortError::invalid_config(
                "sequence.length must be at least 1",
            ));
        }
        if self.frame.rate_hz == 0 {
            return Err(SortError::invalid_config("frame.rate_hz must be positive"));
        }
        Ok(())
    }

    fn validate_semantic(&self) -> SortResult<()> {
        if self.sequence.min > self.sequence.max {
            return Err(SortError::invalid_config(format!(
                "sequence.min {} exceeds sequence.max {}",
                self.sequence.min, self.sequence.max
            )));
        }
        if self.palette.primary == self.palette.secondary {
            return Err(SortError::invalid_config(
                "palette.primary and palette.secondary must differ",
            ));
        }
        Ok(())
    }

    /// Generator for this configuration's seed (entropy if unset).
    #[must_use]
    pub fn rng(&self) -> SeqRng {
        self.seed.map_or_else(SeqRng::from_entropy, SeqRng::new)
    }

    /// Frame clock for this configuration.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` if the rate is zero.
    pub fn clock(&self) -> SortResult<FrameClock> {
        FrameClock::from_rate(self.frame.rate_hz)
    }
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            sequence: SequenceConfig::default(),
            seed: None,
            sort: SortConfig::default(),
            frame: FrameConfig::default(),
            palette: Palette::default(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VisConfigBuilder {
    seed: Option<u64>,
    length: Option<usize>,
    range: Option<(u32, u32)>,
    algorithm: Option<Algorithm>,
    order: Option<Order>,
    granularity: Option<Granularity>,
    rate_hz: Option<u32>,
}

impl VisConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the sequence length.
    #[must_use]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the inclusive value range.
    #[must_use]
    pub const fn range(mut self, min: u32, max: u32) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Set the initial algorithm.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the initial order.
    #[must_use]
    pub const fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the step granularity.
    #[must_use]
    pub const fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    /// Set the frame rate.
    #[must_use]
    pub const fn rate_hz(mut self, rate_hz: u32) -> Self {
        self.rate_hz = Some(rate_hz);
        self
    }

    /// Build the configuration without validating it.
    #[must_use]
    pub fn build(self) -> VisConfig {
        let mut config = VisConfig::default();

        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(length) = self.length {
            config.sequence.length = length;
        }
        if let Some((min, max)) = self.range {
            config.sequence.min = min;
            config.sequence.max = max;
        }
        if let Some(algorithm) = self.algorithm {
            config.sort.algorithm = algorithm;
        }
        if let Some(order) = self.order {
            config.sort.order = order;
        }
        if let Some(granularity) = self.granularity {
            config.sort.granularity = granularity;
        }
        if let Some(rate_hz) = self.rate_hz {
            config.frame.rate_hz = rate_hz;
        }

        config
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if validation fails.
    pub fn try_build(self) -> SortResult<VisConfig> {
        let config = self.build();
        config.check()?;
        Ok(config)
    }
}

/// Shape of generated sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SequenceConfig {
    /// Number of bars.
    #[validate(range(min = 1, max = 10000))]
    #[serde(default = "default_length")]
    pub length: usize,

    /// Smallest value (inclusive).
    #[serde(default = "default_min")]
    pub min: u32,

    /// Largest value (inclusive).
    #[serde(default = "default_max")]
    pub max: u32,
}

const fn default_length() -> usize {
    100
}

const fn default_min() -> u32 {
    1
}

const fn default_max() -> u32 {
    100
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            min: default_min(),
            max: default_max(),
        }
    }
}

/// Initial sort selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortConfig {
    /// Algorithm selected at startup.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Order selected at startup.
    #[serde(default)]
    pub order: Order,

    /// Work done per animation step.
    #[serde(default)]
    pub granularity: Granularity,
}

/// Frame pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FrameConfig {
    /// Driver ticks per second.
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_rate_hz")]
    pub rate_hz: u32,
}

const fn default_rate_hz() -> u32 {
    DEFAULT_RATE_HZ
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
        }
    }
}

/// Named colors understood by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarColor {
    /// Black.
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// Light gray.
    Gray,
    /// Dark gray.
    DarkGray,
    /// White.
    White,
}

/// Bar colors handed to the renderer.
///
/// Unhighlighted bars cycle through `gradient` by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    /// Color of the primary highlighted index.
    #[serde(default = "default_primary")]
    pub primary: BarColor,

    /// Color of the secondary highlighted index.
    #[serde(default = "default_secondary")]
    pub secondary: BarColor,

    /// Colors of plain bars.
    #[validate(length(min = 1))]
    #[serde(default = "default_gradient")]
    pub gradient: Vec<BarColor>,
}

const fn default_primary() -> BarColor {
    BarColor::Green
}

const fn default_secondary() -> BarColor {
    BarColor::Red
}

fn default_gradient() -> Vec<BarColor> {
    vec![BarColor::Gray, BarColor::DarkGray, BarColor::White]
}

impl Palette {
    /// Color of an unhighlighted bar at `index`.
    #[must_use]
    pub fn plain(&self, index: usize) -> BarColor {
        self.gradient
            .get(index % self.gradient.len().max(1))
            .copied()
            .unwrap_or(BarColor::Gray)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            gradient: default_gradient(),
        }
    }
}

/// Chart layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Empty columns on each side of the chart.
    #[validate(range(max = 200))]
    #[serde(default = "default_side_padding")]
    pub side_padding: u16,

    /// Empty columns between bars.
    #[validate(range(max = 50))]
    #[serde(default)]
    pub bar_gap: u16,
}

const fn default_side_padding() -> u16 {
    2
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            side_padding: default_side_padding(),
            bar_gap: 0,
        }
    }
}
