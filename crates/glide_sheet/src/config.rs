//! Sheet configuration
//!
//! Read from TOML, for example:
//!
//! ```toml
//! snap_points = [200, "50%", "90%"]
//! enable_pan_down_to_close = true
//! scroll_buffer = 20
//! platform = "ios"
//!
//! [animation]
//! curve = "spring"
//! stiffness = 500
//! damping = 50
//! ```
//!
//! Snap points are sheet heights, smallest first. They become positions
//! measured from the top of the container once a container height is known.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use glide_animation::{AnimationConfig, Easing, SpringConfig, TimingConfig};
use glide_core::{round_to_nearest_pixel, ConfigError, SnapPoints};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

// =========================================================================
// Snap Point Spec
// =========================================================================

/// A declared snap point: a height in pixels or a share of the container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapPoint", into = "RawSnapPoint")]
pub enum SnapPointSpec {
    Pixels(f32),
    Percent(f32),
}

impl SnapPointSpec {
    /// Sheet height this spec resolves to inside a container
    pub fn height(&self, container_height: f32) -> f32 {
        match *self {
            SnapPointSpec::Pixels(height) => height,
            SnapPointSpec::Percent(percent) => container_height * percent / 100.0,
        }
    }
}

impl FromStr for SnapPointSpec {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || SheetError::InvalidSnapPoint(s.to_string());

        match trimmed.strip_suffix('%') {
            Some(percent) => percent
                .trim()
                .parse::<f32>()
                .map(SnapPointSpec::Percent)
                .map_err(|_| invalid()),
            None => trimmed
                .parse::<f32>()
                .map(SnapPointSpec::Pixels)
                .map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for SnapPointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapPointSpec::Pixels(height) => write!(f, "{height}"),
            SnapPointSpec::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSnapPoint {
    Pixels(f32),
    Text(String),
}

impl TryFrom<RawSnapPoint> for SnapPointSpec {
    type Error = SheetError;

    fn try_from(raw: RawSnapPoint) -> Result<Self> {
        match raw {
            RawSnapPoint::Pixels(height) => Ok(SnapPointSpec::Pixels(height)),
            RawSnapPoint::Text(text) => text.parse(),
        }
    }
}

impl From<SnapPointSpec> for RawSnapPoint {
    fn from(spec: SnapPointSpec) -> Self {
        match spec {
            SnapPointSpec::Pixels(height) => RawSnapPoint::Pixels(height),
            percent @ SnapPointSpec::Percent(_) => RawSnapPoint::Text(percent.to_string()),
        }
    }
}

// =========================================================================
// Enums
// =========================================================================

/// Host platform, selecting keyboard and overscroll rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Keyboard dismissal is interactive; scrollables report overscroll
    Ios,
    /// Scrollables never report overscroll at the top
    Android,
    #[default]
    Other,
}

/// How the sheet reacts when the keyboard appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardBehavior {
    /// Raise the current snap point by the keyboard height
    #[default]
    Interactive,
    /// Go to the highest snap point
    Extend,
    /// Fill the whole container
    FillParent,
}

/// How the sheet reacts when the keyboard goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardBlurBehavior {
    /// Stay where the keyboard left the sheet
    #[default]
    None,
    /// Return to the snap point the sheet was at
    Restore,
}

/// Curve family for sheet transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    #[default]
    Spring,
    Timing,
}

// =========================================================================
// Animation Settings
// =========================================================================

/// Transition curve settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    #[serde(default)]
    pub curve: CurveKind,
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default = "default_true")]
    pub overshoot_clamping: bool,
    /// Duration of timing transitions
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
}

fn default_stiffness() -> f32 {
    500.0
}

fn default_damping() -> f32 {
    50.0
}

fn default_mass() -> f32 {
    1.0
}

fn default_duration_ms() -> u32 {
    250
}

fn default_true() -> bool {
    true
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            curve: CurveKind::Spring,
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            overshoot_clamping: true,
            duration_ms: default_duration_ms(),
        }
    }
}

impl AnimationSettings {
    /// Curve configuration for the animation executor
    pub fn to_animation_config(&self) -> AnimationConfig {
        match self.curve {
            CurveKind::Spring => AnimationConfig::Spring(
                SpringConfig::new(self.stiffness, self.damping, self.mass)
                    .with_overshoot_clamping(self.overshoot_clamping),
            ),
            CurveKind::Timing => AnimationConfig::Timing(TimingConfig {
                duration_ms: self.duration_ms,
                easing: Easing::EaseOutExpo,
            }),
        }
    }
}

// =========================================================================
// Sheet Config
// =========================================================================

/// Configuration of one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Declared snap points, as heights from the container bottom
    pub snap_points: Vec<SnapPointSpec>,
    /// Initial snap index, `-1` to start closed
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub enable_pan_down_to_close: bool,
    #[serde(default = "default_true")]
    pub enable_over_drag: bool,
    #[serde(default = "default_resistance_factor")]
    pub over_drag_resistance_factor: f32,
    #[serde(default = "default_true")]
    pub enable_content_panning_gesture: bool,
    #[serde(default = "default_true")]
    pub enable_handle_panning_gesture: bool,
    /// Content offset the scrollable may travel before the sheet takes over
    #[serde(default)]
    pub scroll_buffer: Option<f32>,
    /// Let native momentum finish instead of pinning after the finger lifts
    #[serde(default)]
    pub preserve_scroll_momentum: bool,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub keyboard_behavior: KeyboardBehavior,
    #[serde(default)]
    pub keyboard_blur_behavior: KeyboardBlurBehavior,
    #[serde(default)]
    pub animation: AnimationSettings,
}

fn default_resistance_factor() -> f32 {
    2.5
}

impl SheetConfig {
    /// Config with the given snap points and defaults for everything else
    pub fn new(snap_points: impl IntoIterator<Item = SnapPointSpec>) -> Self {
        Self {
            snap_points: snap_points.into_iter().collect(),
            index: 0,
            enable_pan_down_to_close: false,
            enable_over_drag: true,
            over_drag_resistance_factor: default_resistance_factor(),
            enable_content_panning_gesture: true,
            enable_handle_panning_gesture: true,
            scroll_buffer: None,
            preserve_scroll_momentum: false,
            platform: Platform::default(),
            keyboard_behavior: KeyboardBehavior::default(),
            keyboard_blur_behavior: KeyboardBlurBehavior::default(),
            animation: AnimationSettings::default(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SheetConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check scalar fields.
    ///
    /// The snap layout itself is checked by [`normalize_snap_points`](Self::normalize_snap_points)
    /// once a container height is known.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.snap_points.is_empty() {
            return Err(ConfigError::EmptySnapPoints);
        }
        let factor = self.over_drag_resistance_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(ConfigError::InvalidResistanceFactor(factor));
        }
        if let Some(buffer) = self.scroll_buffer {
            if !buffer.is_finite() || buffer < 0.0 {
                return Err(ConfigError::InvalidScrollBuffer(buffer));
            }
        }
        Ok(())
    }

    /// Resolve declared snap points into positions inside a container.
    ///
    /// Positions are rounded to the nearest device pixel.
    pub fn normalize_snap_points(
        &self,
        container_height: f32,
        pixel_density: f32,
    ) -> std::result::Result<SnapPoints, ConfigError> {
        if !container_height.is_finite() || container_height <= 0.0 {
            return Err(ConfigError::InvalidContainerHeight(container_height));
        }

        let positions = self.snap_points.iter().map(|spec| {
            let position = container_height - spec.height(container_height);
            round_to_nearest_pixel(position, pixel_density)
        });
        let snap_points = SnapPoints::new(positions)?;
        snap_points.validate_within(container_height)?;
        Ok(snap_points)
    }
}
