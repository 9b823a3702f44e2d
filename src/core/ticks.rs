//! Numeric and temporal tick formatting utilities.

use std::fmt::Write as _;

use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const ONE_DAY_MS: f64 = 86_400_000.0;
const ONE_YEAR_MS: f64 = 31_536_000_000.0;

/// Timezone used for time-axis tick label rendering only.
///
/// Data alignment always stays in raw epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    Utc,
    #[default]
    Local,
}

/// Selects a "nice round number" step covering `[start, stop]` with roughly
/// `count` steps. Candidate mantissas are 1, 2, 5 and 10.
#[must_use]
pub fn nice_tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let e10 = 50_f64.sqrt();
    let e5 = 10_f64.sqrt();
    let e2 = 2_f64.sqrt();

    let step0 = (stop - start).abs() / count.max(0.0);
    let step1 = 10_f64.powi(step0.log10().floor() as i32);
    let error = step0 / step1;

    if error >= e10 {
        step1 * 10.0
    } else if error >= e5 {
        step1 * 5.0
    } else if error >= e2 {
        step1 * 2.0
    } else {
        step1
    }
}

/// Picks a date format by tick density and total range.
#[must_use]
pub fn auto_time_format(tick_count: usize, range_ms: f64) -> &'static str {
    if tick_count == 0 || !range_ms.is_finite() || range_ms <= 0.0 {
        return "%H:%M";
    }

    let sec_per_tick = range_ms / tick_count as f64 / 1000.0;
    if sec_per_tick <= 45.0 {
        "%H:%M:%S"
    } else if sec_per_tick <= 7200.0 || range_ms <= ONE_DAY_MS {
        "%H:%M"
    } else if sec_per_tick <= 80_000.0 {
        "%m/%d %H:%M"
    } else if sec_per_tick <= 2_419_200.0 || range_ms <= ONE_YEAR_MS {
        "%m/%d"
    } else {
        "%Y-%m"
    }
}

/// Renders an epoch-millisecond timestamp with a strftime-style format.
///
/// Falls back to the raw timestamp text when the timestamp or the format
/// string cannot be rendered; tick labelling must never abort a pass.
#[must_use]
pub fn format_time_label(ts_ms: f64, format: &str, timezone: Timezone) -> String {
    let fallback = || trim_float(ts_ms);

    if !ts_ms.is_finite() {
        return fallback();
    }
    let Some(utc) = Utc.timestamp_millis_opt(ts_ms as i64).single() else {
        return fallback();
    };

    let mut rendered = String::new();
    let write_result = match timezone {
        Timezone::Utc => write!(rendered, "{}", utc.format(format)),
        Timezone::Local => write!(rendered, "{}", utc.with_timezone(&Local).format(format)),
    };

    if write_result.is_err() {
        return fallback();
    }
    rendered
}

/// Tick label format kind bound to an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    #[default]
    Short,
    Percent,
    Bytes,
    #[serde(rename = "none")]
    Plain,
}

impl FormatKind {
    /// Formats an axis value, honoring configured tick decimals.
    #[must_use]
    pub fn format(self, value: f64, decimals: Option<u32>) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        match self {
            Self::Plain => fixed_or_trimmed(value, decimals),
            Self::Percent => format!("{}%", fixed_or_trimmed(value, decimals)),
            Self::Short => scaled(value, decimals, 1000.0, &["", " K", " Mil", " Bil", " Tri"]),
            Self::Bytes => scaled(
                value,
                decimals,
                1024.0,
                &[" B", " KiB", " MiB", " GiB", " TiB"],
            ),
        }
    }
}

fn scaled(value: f64, decimals: Option<u32>, factor: f64, suffixes: &[&str]) -> String {
    let mut scaled = value;
    let mut suffix = suffixes[0];
    for candidate in &suffixes[1..] {
        if scaled.abs() < factor {
            break;
        }
        scaled /= factor;
        suffix = candidate;
    }
    format!("{}{suffix}", fixed_or_trimmed(scaled, decimals))
}

fn fixed_or_trimmed(value: f64, decimals: Option<u32>) -> String {
    match decimals {
        Some(places) => format!("{value:.*}", places as usize),
        None => trim_float(value),
    }
}

fn trim_float(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
