//! Y-axis option assembly and the logarithmic scale transform.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::api::config::{PanelConfig, ViewContext, YAxisConfig};
use crate::api::options::{AxisSide, ValueTransform, YAxisOptions};
use crate::core::{FormatKind, Series};

/// Builds the one or two y-axis descriptors for a pass.
///
/// The left axis is always emitted; the right axis only when some series is
/// bound to it. Stacked percentage mode overrides the format to percent.
pub fn configure_y_axes(
    series: &[Series],
    panel: &PanelConfig,
    view: &ViewContext,
) -> SmallVec<[YAxisOptions; 2]> {
    let mut axes: SmallVec<[YAxisOptions; 2]> = SmallVec::new();
    axes.push(axis_from_config(&panel.yaxes[0], 1, AxisSide::Left, panel));

    if series.iter().any(|entry| entry.yaxis == 2) {
        axes.push(axis_from_config(&panel.yaxes[1], 2, AxisSide::Right, panel));
    }

    for axis in axes.iter_mut() {
        apply_log_scale(axis, series, view.height_px);
    }

    axes
}

fn axis_from_config(
    config: &YAxisConfig,
    index: u8,
    side: AxisSide,
    panel: &PanelConfig,
) -> YAxisOptions {
    let format = if panel.percentage && panel.stack {
        FormatKind::Percent
    } else {
        config.format
    };

    // A log base must exceed 1 for the tick ladder to make progress.
    let log_base = if config.log_base.is_finite() && config.log_base > 1.0 {
        config.log_base
    } else {
        1.0
    };

    YAxisOptions {
        index,
        side,
        show: config.show,
        min: config.min,
        max: config.max,
        log_base,
        tick_decimals: config.decimals,
        format,
        transform: ValueTransform::Linear,
        ticks: None,
    }
}

/// Derives log-domain bounds and ticks for an axis with `log_base != 1`.
///
/// Degenerate configured bounds are discarded in favor of data-derived ones;
/// unknown bounds default to `base^±2` (both unknown) or `known × base^±4`
/// (one unknown). Non-finite results fall back to a fixed two-tick axis with
/// cleared bounds.
pub fn apply_log_scale(axis: &mut YAxisOptions, series: &[Series], height_px: u32) {
    if axis.log_base == 1.0 {
        return;
    }
    let base = axis.log_base;
    let transform = |value: f64| value.ln() / base.ln();
    let invert = |value: f64| base.powf(value);

    let min_set_to_zero = axis.min == Some(0.0);

    // Bounds below the smallest representable positive value cannot live on
    // a log axis; auto-derive instead.
    if axis.min.is_some_and(|value| value < f64::MIN_POSITIVE) {
        axis.min = None;
    }
    if axis.max.is_some_and(|value| value < f64::MIN_POSITIVE) {
        axis.max = None;
    }

    let mut derived_min = axis.min;
    let mut derived_max = axis.max;
    for entry in series.iter().filter(|entry| entry.yaxis == axis.index) {
        if derived_max.is_none_or(|value| value < entry.stats.max) {
            derived_max = Some(entry.stats.max);
        }
        if let Some(logmin) = entry.stats.logmin {
            if derived_min.is_none_or(|value| value > logmin) {
                derived_min = Some(logmin);
            }
        }
    }

    axis.transform = ValueTransform::Log { base };

    let (seed_min, seed_max) = match (derived_min, derived_max) {
        (None, None) => (invert(-2.0), invert(2.0)),
        (Some(min), None) => (min, min * invert(4.0)),
        (None, Some(max)) => (max * invert(-4.0), max),
        (Some(min), Some(max)) => (min, max),
    };

    // User bounds are snapped to whole transformed-space ticks; auto bounds
    // are widened outward and written back onto the axis.
    let walk_min = match axis.min {
        Some(configured) => invert(transform(configured).ceil()),
        None => {
            let snapped = invert(transform(seed_min).floor());
            axis.min = Some(snapped);
            snapped
        }
    };
    let walk_max = match axis.max {
        Some(configured) => invert(transform(configured).floor()),
        None => {
            let snapped = invert(transform(seed_max).ceil());
            axis.max = Some(snapped);
            snapped
        }
    };

    if !(walk_min >= f64::MIN_POSITIVE) || !(walk_max >= f64::MIN_POSITIVE) {
        warn!(
            index = axis.index,
            walk_min, walk_max, "log scale bounds collapsed; leaving axis without explicit ticks"
        );
        return;
    }

    if walk_min.is_finite() && walk_max.is_finite() {
        let walk_min = if min_set_to_zero {
            // A configured zero minimum gets a small positive floor.
            axis.min = Some(0.1);
            1.0
        } else {
            walk_min
        };

        let mut ticks = log_scale_ticks(walk_min, walk_max, base, height_px);
        if min_set_to_zero {
            ticks.insert(0, 0.1);
        }
        if let Some(&last) = ticks.last() {
            if axis.max.is_some_and(|max| last > max) {
                axis.max = Some(last);
            }
        }
        debug!(index = axis.index, ticks = ticks.len(), "applied log scale");
        axis.ticks = Some(ticks);
    } else {
        warn!(
            index = axis.index,
            "non-finite log scale bounds; falling back to placeholder ticks"
        );
        axis.ticks = Some(vec![1.0, 2.0]);
        axis.min = None;
        axis.max = None;
    }
}

/// Walks `min, min×base, min×base², …` up to `max`, thinning the ladder when
/// it would exceed the height-derived budget.
fn log_scale_ticks(min: f64, max: f64, base: f64, height_px: u32) -> Vec<f64> {
    let mut ticks = Vec::new();
    let mut next = min;
    while next <= max && next.is_finite() {
        ticks.push(next);
        next *= base;
    }

    let budget = ((f64::from(height_px) / 25.0).ceil() as usize).max(1);
    if ticks.len() > budget {
        let factor = (ticks.len() as f64 / budget as f64).ceil() * base;
        let limit = max * factor;
        ticks.clear();

        let mut next = min;
        while next <= limit && next.is_finite() {
            ticks.push(next);
            next *= factor;
        }
    }

    ticks
}
