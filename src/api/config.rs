use serde::{Deserialize, Serialize};

use crate::core::{FormatKind, StatKey, Timezone};

/// X-axis layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum XAxisMode {
    #[default]
    Time,
    Series,
    Histogram,
    Table,
}

/// Horizontal placement of bar-group tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// X-axis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XAxisConfig {
    pub show: bool,
    pub mode: XAxisMode,
    /// Statistic selectors for series mode; the first entry is used.
    pub values: Vec<StatKey>,
    /// Histogram bucket-count override.
    pub buckets: Option<usize>,
    /// User-supplied strftime-style date format for time-mode tick labels.
    pub custom_date_format: Option<String>,
}

impl Default for XAxisConfig {
    fn default() -> Self {
        Self {
            show: true,
            mode: XAxisMode::Time,
            values: Vec::new(),
            buckets: None,
            custom_date_format: None,
        }
    }
}

/// Per-side Y-axis configuration; `min`/`max` of `None` auto-derive from data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxisConfig {
    pub show: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// 1 = linear; anything else selects a logarithmic value transform.
    pub log_base: f64,
    pub decimals: Option<u32>,
    pub format: FormatKind,
}

impl Default for YAxisConfig {
    fn default() -> Self {
        Self {
            show: true,
            min: None,
            max: None,
            log_base: 1.0,
            decimals: None,
            format: FormatKind::Short,
        }
    }
}

/// Legend sort settings; both fields must be set for stack-order sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LegendConfig {
    pub sort: Option<StatKey>,
    pub sort_desc: Option<bool>,
}

/// Calculated-series configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculConfig {
    /// Arithmetic expression over `{alias}` placeholders.
    pub operation: String,
    /// Alias, label and identifier given to the derived series.
    pub name: String,
    /// Hex color without the leading `#`.
    pub color: String,
    /// When false, consumed source series are removed from the list.
    pub show: bool,
}

impl Default for CalculConfig {
    fn default() -> Self {
        Self {
            operation: "%".to_owned(),
            name: "Calcul-series".to_owned(),
            color: "FFFFFF".to_owned(),
            show: true,
        }
    }
}

/// Full panel configuration consumed by a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub bars: bool,
    pub lines: bool,
    pub points: bool,
    pub stack: bool,
    pub percentage: bool,
    pub display_bars_side_by_side: bool,
    pub label_align: LabelAlign,
    pub xaxis: XAxisConfig,
    /// Exactly two axes: index 0 is left, index 1 is right.
    pub yaxes: [YAxisConfig; 2],
    pub legend: LegendConfig,
    pub calcul: CalculConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            bars: false,
            lines: true,
            points: false,
            stack: false,
            percentage: false,
            display_bars_side_by_side: false,
            label_align: LabelAlign::Left,
            xaxis: XAxisConfig::default(),
            yaxes: [YAxisConfig::default(), YAxisConfig::default()],
            legend: LegendConfig::default(),
            calcul: CalculConfig::default(),
        }
    }
}

/// Viewport and time-range context supplied by the hosting view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    pub width_px: u32,
    pub height_px: u32,
    /// Visible range start, epoch milliseconds.
    pub time_from_ms: f64,
    /// Visible range end, epoch milliseconds.
    pub time_to_ms: f64,
    #[serde(default)]
    pub timezone: Timezone,
}

impl ViewContext {
    #[must_use]
    pub fn new(width_px: u32, height_px: u32, time_from_ms: f64, time_to_ms: f64) -> Self {
        Self {
            width_px,
            height_px,
            time_from_ms,
            time_to_ms,
            timezone: Timezone::default(),
        }
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn range_ms(self) -> f64 {
        self.time_to_ms - self.time_from_ms
    }
}
