use serde::{Deserialize, Serialize};

/// One sample delivered by the upstream data pipeline.
///
/// `value: None` models a null sample; `time` is epoch milliseconds for time
/// mode and an opaque index for the other axis modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub value: Option<f64>,
    pub time: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(value: f64, time: f64) -> Self {
        Self {
            value: Some(value),
            time,
        }
    }

    #[must_use]
    pub fn null_at(time: f64) -> Self {
        Self { value: None, time }
    }
}

/// Per-series statistic selector used by legend sorting and series mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Min,
    Max,
    #[default]
    Avg,
    Current,
    Total,
}

/// Precomputed per-series statistics, owned by the upstream pipeline.
///
/// `logmin` is the smallest positive sample value (log-axis floor) and
/// `time_step` the sampling interval; both may be absent for irregular or
/// all-negative series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub current: f64,
    pub total: f64,
    #[serde(default)]
    pub logmin: Option<f64>,
    #[serde(default)]
    pub time_step: Option<f64>,
}

impl SeriesStats {
    #[must_use]
    pub fn stat(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Min => self.min,
            StatKey::Max => self.max,
            StatKey::Avg => self.avg,
            StatKey::Current => self.current,
            StatKey::Total => self.total,
        }
    }
}

/// Tri-state per-series style overrides.
///
/// `None` means "not configured": bar eligibility then falls back to the
/// panel-level bar flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SeriesStyle {
    #[serde(default)]
    pub bars: Option<bool>,
    #[serde(default)]
    pub lines: Option<bool>,
    #[serde(default)]
    pub points: Option<bool>,
}

/// One series in the working list of a render pass.
///
/// The engine mutates series in place: the computed-series synthesizer may
/// rewrite `datapoints`, axis resolvers rewrite `data`, and the bar layout
/// planner fills `bar_width`/`draw_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub alias: String,
    pub id: String,
    pub label: String,
    pub color: String,
    /// Y axis binding: 1 = left, 2 = right.
    pub yaxis: u8,
    pub zindex: i32,
    pub datapoints: Vec<DataPoint>,
    /// Renderer-facing `(x, y)` pairs, rebuilt every pass.
    #[serde(default)]
    pub data: Vec<(f64, f64)>,
    pub stats: SeriesStats,
    #[serde(default)]
    pub style: SeriesStyle,
    /// Bar layout outputs, set by the planner in side-by-side mode.
    #[serde(default)]
    pub bar_width: Option<f64>,
    #[serde(default)]
    pub draw_order: Option<usize>,
}

impl Series {
    /// Creates a series with alias-derived identifiers and no overrides.
    #[must_use]
    pub fn new(alias: impl Into<String>, datapoints: Vec<DataPoint>, stats: SeriesStats) -> Self {
        let alias = alias.into();
        Self {
            id: alias.clone(),
            label: alias.clone(),
            alias,
            color: "#7eb26d".to_owned(),
            yaxis: 1,
            zindex: 0,
            datapoints,
            data: Vec::new(),
            stats,
            style: SeriesStyle::default(),
            bar_width: None,
            draw_order: None,
        }
    }

    /// Rebuilds the renderer-facing pairs from `datapoints`.
    ///
    /// Null samples are dropped rather than drawn at zero.
    pub fn rebuild_data_pairs(&mut self) {
        self.data = self
            .datapoints
            .iter()
            .filter_map(|point| point.value.map(|value| (point.time, value)))
            .collect();
    }
}
