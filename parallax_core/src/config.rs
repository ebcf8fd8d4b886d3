// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer and container configuration.
//!
//! Configuration is set once when a container is set up. Distances are
//! validated on construction, whether typed or parsed from strings, so
//! malformed or non-finite values surface as a [`DistanceParseError`] at setup
//! time instead of on every frame. Unknown direction names fall back to
//! [`Direction::Down`].

use core::fmt;
use core::num::ParseFloatError;
use core::str::FromStr;

/// The unit of a [`Distance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    /// An absolute, signed displacement in geometry units.
    Pixels,
    /// A signed percentage of `layer_height - container_height`.
    Percent,
}

/// How far a layer travels over the full progress range.
///
/// The magnitude is always finite; both constructors and [`FromStr`] reject
/// NaN and infinities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distance {
    value: f64,
    unit: DistanceUnit,
}

impl Default for Distance {
    /// `100%`.
    fn default() -> Self {
        Self {
            value: 100.0,
            unit: DistanceUnit::Percent,
        }
    }
}

impl Distance {
    /// An absolute displacement.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceParseError::NonFinite`] for NaN or infinite `px`.
    pub fn pixels(px: f64) -> Result<Self, DistanceParseError> {
        Self::with_unit(px, DistanceUnit::Pixels)
    }

    /// A percentage of the layer's overhang past its container.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceParseError::NonFinite`] for NaN or infinite `pct`.
    pub fn percent(pct: f64) -> Result<Self, DistanceParseError> {
        Self::with_unit(pct, DistanceUnit::Percent)
    }

    fn with_unit(value: f64, unit: DistanceUnit) -> Result<Self, DistanceParseError> {
        if value.is_finite() {
            Ok(Self { value, unit })
        } else {
            Err(DistanceParseError::NonFinite)
        }
    }

    /// The signed magnitude, in pixels or percent depending on
    /// [`unit`](Self::unit).
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// The unit of [`value`](Self::value).
    #[inline]
    #[must_use]
    pub const fn unit(self) -> DistanceUnit {
        self.unit
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DistanceUnit::Pixels => write!(f, "{}px", self.value),
            DistanceUnit::Percent => write!(f, "{}%", self.value),
        }
    }
}

/// Errors from parsing or constructing a [`Distance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DistanceParseError {
    /// The string was empty (or only whitespace, or only a unit suffix).
    Empty,
    /// The numeric part did not parse as a number.
    InvalidNumber(ParseFloatError),
    /// The magnitude is infinite or NaN.
    NonFinite,
}

impl fmt::Display for DistanceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("distance is empty"),
            Self::InvalidNumber(err) => write!(f, "distance is not a number: {err}"),
            Self::NonFinite => f.write_str("distance must be finite"),
        }
    }
}

impl core::error::Error for DistanceParseError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidNumber(err) => Some(err),
            Self::Empty | Self::NonFinite => None,
        }
    }
}

impl FromStr for Distance {
    type Err = DistanceParseError;

    /// Parses `"N%"` as a percentage and `"N"` or `"Npx"` as pixels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            Self::percent(parse_magnitude(pct)?)
        } else if let Some(px) = s.strip_suffix("px") {
            Self::pixels(parse_magnitude(px)?)
        } else {
            Self::pixels(parse_magnitude(s)?)
        }
    }
}

fn parse_magnitude(s: &str) -> Result<f64, DistanceParseError> {
    let s = s.trim_end();
    if s.is_empty() {
        return Err(DistanceParseError::Empty);
    }
    s.parse().map_err(DistanceParseError::InvalidNumber)
}

/// The direction a layer moves as progress increases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative y.
    Up,
    /// Positive y.
    #[default]
    Down,
    /// Negative x.
    Left,
    /// Positive x.
    Right,
}

impl Direction {
    /// Parses a lowercase direction name.
    ///
    /// Matching is exact; anything else (including `"Up"`) falls back to
    /// [`Down`](Self::Down).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "up" => Self::Up,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Down,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-layer configuration, immutable once the layer is set up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerConfig {
    /// Maximum displacement at 100% progress.
    pub distance: Distance,
    /// Direction of travel.
    pub direction: Direction,
}

impl LayerConfig {
    /// Creates a layer configuration.
    #[inline]
    #[must_use]
    pub const fn new(distance: Distance, direction: Direction) -> Self {
        Self {
            distance,
            direction,
        }
    }

    /// Builds a configuration from string options.
    ///
    /// Missing options take their defaults (`100%`, `down`).
    ///
    /// # Errors
    ///
    /// Returns [`DistanceParseError`] if `distance` is present but malformed.
    pub fn parse(
        distance: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Self, DistanceParseError> {
        let distance = match distance {
            Some(s) => s.parse()?,
            None => Distance::default(),
        };
        let direction = direction.map(Direction::from_name).unwrap_or_default();
        Ok(Self {
            distance,
            direction,
        })
    }
}

/// Per-container configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerConfig {
    /// Activation offset from the viewport top.
    ///
    /// `Some` (including `Some(0.0)`) selects threshold mode; `None` selects
    /// viewport mode.
    pub top: Option<f64>,
}

impl ContainerConfig {
    /// Threshold mode with the given activation offset.
    #[inline]
    #[must_use]
    pub const fn threshold(top: f64) -> Self {
        Self { top: Some(top) }
    }

    /// Viewport mode: the effect spans the whole time the container is on
    /// screen.
    #[inline]
    #[must_use]
    pub const fn viewport() -> Self {
        Self { top: None }
    }
}

impl Default for ContainerConfig {
    /// Threshold mode with a zero offset.
    fn default() -> Self {
        Self::threshold(0.0)
    }
}
