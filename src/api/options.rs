use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{FormatKind, Timezone};

/// A labeled axis position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    #[must_use]
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Axis tick specification handed to the plotting surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisTicks {
    /// Let the surface place roughly this many ticks itself.
    Count(usize),
    /// Bare numeric positions; the surface formats labels.
    Positions(Vec<f64>),
    /// Fully resolved `(position, label)` pairs.
    Labeled(Vec<Tick>),
}

impl AxisTicks {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Count(count) => *count,
            Self::Positions(positions) => positions.len(),
            Self::Labeled(ticks) => ticks.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// X-axis descriptor, one variant per layout mode.
///
/// Each variant carries only the fields its mode needs, so mode handling
/// stays exhaustively checkable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XAxisOptions {
    Time {
        min: f64,
        max: f64,
        ticks: AxisTicks,
        /// Consulted only for tick label rendering, never data alignment.
        timezone: Timezone,
    },
    SeriesIndex {
        min: f64,
        max: f64,
        ticks: Vec<Tick>,
    },
    Histogram {
        min: f64,
        max: f64,
        bucket_size: f64,
        ticks: AxisTicks,
        /// Histogram values always render with the short numeric format.
        format: FormatKind,
    },
    TableIndex {
        min: f64,
        max: f64,
        ticks: Vec<Tick>,
    },
}

impl XAxisOptions {
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Time { min, max, .. }
            | Self::SeriesIndex { min, max, .. }
            | Self::Histogram { min, max, .. }
            | Self::TableIndex { min, max, .. } => (*min, *max),
        }
    }
}

/// Y-axis placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
}

/// Value-domain transform applied before pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ValueTransform {
    #[default]
    Linear,
    Log {
        base: f64,
    },
}

impl ValueTransform {
    /// Maps a raw value into the transformed domain.
    ///
    /// Returns `None` for values a log transform cannot represent.
    #[must_use]
    pub fn apply(self, value: f64) -> Option<f64> {
        match self {
            Self::Linear => Some(value),
            Self::Log { base } => {
                if value < f64::MIN_POSITIVE {
                    None
                } else {
                    Some(value.ln() / base.ln())
                }
            }
        }
    }

    /// Maps a transformed-domain value back to the raw domain.
    #[must_use]
    pub fn invert(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log { base } => base.powf(value),
        }
    }
}

/// Y-axis descriptor handed to the plotting surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisOptions {
    /// Axis binding index: 1 = left, 2 = right.
    pub index: u8,
    pub side: AxisSide,
    pub show: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub log_base: f64,
    pub tick_decimals: Option<u32>,
    pub format: FormatKind,
    pub transform: ValueTransform,
    /// Explicit tick positions; set only by the log-scale transform.
    pub ticks: Option<Vec<f64>>,
}

impl YAxisOptions {
    /// Formats one tick value with this axis's format binding.
    #[must_use]
    pub fn format_tick(&self, value: f64) -> String {
        self.format.format(value, self.tick_decimals)
    }
}

/// The engine's sole output, rebuilt from scratch on every render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub xaxis: XAxisOptions,
    pub xaxis_show: bool,
    pub yaxes: SmallVec<[YAxisOptions; 2]>,
    /// Shared bar width in x-domain units; per-series overrides live on the
    /// series themselves in side-by-side mode.
    pub bar_width: f64,
    pub stack: bool,
    pub percentage: bool,
}
