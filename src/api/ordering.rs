//! Series ordering and bar layout planning.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use tracing::trace;

use crate::api::config::{PanelConfig, XAxisMode};
use crate::core::Series;

/// True when the series will be drawn as bars under the panel's bar flag.
///
/// With panel-level bars enabled, every series not explicitly opted out
/// counts; otherwise only series explicitly opted in count.
#[must_use]
pub fn bar_eligible(series: &Series, panel_bars: bool) -> bool {
    if panel_bars {
        series.style.bars != Some(false)
    } else {
        series.style.bars == Some(true)
    }
}

/// Stable sort: ascending z-index, then the configured per-series statistic
/// when stacking plus a sort key and direction are all configured.
pub fn sort_series(series: &mut [Series], panel: &PanelConfig) {
    let stack_sort = if panel.stack {
        panel.legend.sort.zip(panel.legend.sort_desc)
    } else {
        None
    };

    series.sort_by(|lhs, rhs| {
        match lhs.zindex.cmp(&rhs.zindex) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        if let Some((key, descending)) = stack_sort {
            let by_stat = OrderedFloat(lhs.stats.stat(key)).cmp(&OrderedFloat(rhs.stats.stat(key)));
            return if descending { by_stat.reverse() } else { by_stat };
        }

        Ordering::Equal
    });
}

/// Minimum sampling interval among bar-eligible series, clamped to the
/// visible range.
///
/// Series may carry different time steps; bars must be sized by the smallest
/// so that fine-interval series do not get oversized bars. Series without a
/// known step are skipped; with no eligible series the range itself is used.
#[must_use]
pub fn min_bar_time_step(series: &[Series], panel_bars: bool, range_ms: f64) -> f64 {
    let mut min = f64::INFINITY;
    for entry in series {
        let Some(step) = entry.stats.time_step else {
            continue;
        };
        if !bar_eligible(entry, panel_bars) {
            continue;
        }
        if step < min {
            min = step;
        }
    }

    if min >= range_ms { range_ms } else { min }
}

/// True when bars should be laid side by side instead of overlapping.
#[must_use]
pub fn should_display_side_by_side(panel: &PanelConfig) -> bool {
    panel.display_bars_side_by_side && !panel.stack && panel.xaxis.mode == XAxisMode::Time
}

/// Distributes a shared bar width evenly across bar-bearing series and
/// assigns each a zero-based draw order.
pub fn distribute_bars_side_by_side(series: &mut [Series], panel_bars: bool, shared_width: f64) {
    let bar_count = series
        .iter()
        .filter(|entry| bar_eligible(entry, panel_bars))
        .count();
    if bar_count == 0 {
        return;
    }

    let width = shared_width / bar_count as f64;
    trace!(bar_count, width, "distributing side-by-side bar widths");

    let mut order = 0;
    for entry in series.iter_mut() {
        if !bar_eligible(entry, panel_bars) {
            continue;
        }
        entry.draw_order = Some(order);
        entry.bar_width = Some(width);
        order += 1;
    }
}
