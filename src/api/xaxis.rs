//! X-axis resolution for the four layout modes.
//!
//! Each resolver produces the tagged [`XAxisOptions`] variant for its mode
//! plus the shared bar width the plotting surface should use. Series and
//! histogram modes rewrite series `data` in place, the same way the render
//! pass owns the working series list everywhere else.

use tracing::{debug, trace};

use crate::api::config::{LabelAlign, PanelConfig, ViewContext, XAxisMode};
use crate::api::options::{AxisTicks, Tick, XAxisOptions};
use crate::api::ordering::{distribute_bars_side_by_side, min_bar_time_step, should_display_side_by_side};
use crate::core::ticks::{auto_time_format, format_time_label, nice_tick_step};
use crate::core::{FormatKind, Series, convert_values_to_histogram, series_values};

/// Resolved x-axis descriptor plus derived bar geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisResolution {
    pub options: XAxisOptions,
    pub bar_width: f64,
}

/// Resolves the x-axis for the panel's configured mode.
pub fn resolve_x_axis(
    series: &mut Vec<Series>,
    panel: &PanelConfig,
    view: &ViewContext,
) -> XAxisResolution {
    match panel.xaxis.mode {
        XAxisMode::Time => resolve_time_axis(series, panel, view),
        XAxisMode::Series => resolve_series_axis(series, panel),
        XAxisMode::Histogram => resolve_histogram_axis(series, panel, view),
        XAxisMode::Table => resolve_table_axis(series),
    }
}

/// Time mode: bar width from the minimum eligible time step, tick positions
/// aligned to bar groups.
fn resolve_time_axis(series: &mut [Series], panel: &PanelConfig, view: &ViewContext) -> XAxisResolution {
    let range = view.range_ms();
    let min_time_step = min_bar_time_step(series, panel.bars, range);
    let bar_width = min_time_step / 1.5;

    if should_display_side_by_side(panel) {
        distribute_bars_side_by_side(series, panel.bars, bar_width);
    }

    let max_ticks = f64::from(view.width_px) / 100.0;
    let mut ticks = AxisTicks::Count(max_ticks.round() as usize);

    let has_samples = series.first().is_some_and(|entry| !entry.datapoints.is_empty());
    if panel.bars && has_samples {
        let groups_amount = range / min_time_step;
        let generated = generate_time_ticks(
            series,
            groups_amount,
            max_ticks,
            view.time_from_ms,
            view.time_to_ms,
            min_time_step,
            bar_width,
            panel.label_align,
        );

        if !generated.is_empty() {
            let format = match &panel.xaxis.custom_date_format {
                Some(custom) => custom.clone(),
                None => auto_time_format(generated.len(), range).to_owned(),
            };
            debug!(
                tick_count = generated.len(),
                %format,
                "generated bar-aligned time ticks"
            );

            ticks = AxisTicks::Labeled(
                generated
                    .into_iter()
                    .map(|(position, label_ts)| {
                        Tick::new(position, format_time_label(label_ts, &format, view.timezone))
                    })
                    .collect(),
            );
        }
    }

    XAxisResolution {
        options: XAxisOptions::Time {
            min: view.time_from_ms,
            max: view.time_to_ms,
            ticks,
            timezone: view.timezone,
        },
        bar_width,
    }
}

/// Walks bar-group tick positions over the visible range.
///
/// Returns `(position, label_timestamp)` pairs: the position carries the
/// alignment offset, the label timestamp is shifted back to the group start.
#[allow(clippy::too_many_arguments)]
fn generate_time_ticks(
    series: &[Series],
    groups_amount: f64,
    max_ticks: f64,
    range_from: f64,
    range_to: f64,
    time_step: f64,
    bar_width: f64,
    align: LabelAlign,
) -> Vec<(f64, f64)> {
    // Bars can bleed half a group outside the range; include those samples.
    let shifted_from = range_from - bar_width;
    let shifted_to = range_to + bar_width;

    let mut first_group_ts = f64::INFINITY;
    let mut max_datapoints = 0usize;
    for entry in series {
        let mut in_range = 0usize;
        for point in &entry.datapoints {
            if point.time >= shifted_from && point.time <= shifted_to {
                in_range += 1;
                if point.time < first_group_ts {
                    first_group_ts = point.time;
                }
            }
        }
        max_datapoints = max_datapoints.max(in_range);
    }

    let groups = (max_datapoints as f64).max(groups_amount);
    let multiplier = (groups / max_ticks).floor().max(1.0);
    let offset = match align {
        LabelAlign::Left => 0.0,
        LabelAlign::Center => bar_width / 2.0,
        LabelAlign::Right => bar_width,
    };
    trace!(
        groups,
        multiplier,
        offset,
        first_group_ts,
        "time tick walk parameters"
    );

    let effective_step = time_step * multiplier;
    if !first_group_ts.is_finite() || !effective_step.is_finite() || effective_step <= 0.0 {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    let mut tick = first_group_ts + offset;
    while tick <= range_to {
        if tick >= range_from {
            ticks.push((tick, tick - offset));
        }
        tick += effective_step;
    }
    ticks
}

/// Series mode: one x position per series, collapsed to a selected statistic.
fn resolve_series_axis(series: &mut [Series], panel: &PanelConfig) -> XAxisResolution {
    let stat_key = panel.xaxis.values.first().copied().unwrap_or_default();

    let mut ticks = Vec::with_capacity(series.len());
    for (index, entry) in series.iter_mut().enumerate() {
        let position = (index + 1) as f64;
        entry.data = vec![(position, entry.stats.stat(stat_key))];
        ticks.push(Tick::new(position, entry.alias.clone()));
    }

    XAxisResolution {
        options: XAxisOptions::SeriesIndex {
            min: 0.0,
            max: (ticks.len() + 1) as f64,
            ticks,
        },
        bar_width: 0.7,
    }
}

/// Histogram mode: bins every sample value into nice-step buckets and rewrites
/// the first series with the binned pairs.
fn resolve_histogram_axis(
    series: &mut Vec<Series>,
    panel: &PanelConfig,
    view: &ViewContext,
) -> XAxisResolution {
    let default_ticks = f64::from(view.width_px) / 50.0;
    let values = series_values(series);

    let mut bucket_size = 0.0;
    let mut bar_width = 1.0;
    if !series.is_empty() && !values.is_empty() {
        let hist_min = series
            .iter()
            .map(|entry| entry.stats.min)
            .fold(f64::INFINITY, f64::min);
        let hist_max = series
            .iter()
            .map(|entry| entry.stats.max)
            .fold(f64::NEG_INFINITY, f64::max);
        let target = panel
            .xaxis
            .buckets
            .map_or(default_ticks, |buckets| buckets as f64);

        bucket_size = nice_tick_step(hist_min, hist_max, target);
        let histogram = convert_values_to_histogram(&values, bucket_size);
        debug!(
            bucket_size,
            buckets = histogram.len(),
            "converted series values to histogram"
        );
        series[0].data = histogram
            .into_iter()
            .map(|(bucket_start, count)| (bucket_start, count as f64))
            .collect();
        bar_width = bucket_size * 0.8;
    }

    let bucket_starts: Vec<f64> = series
        .first()
        .map(|entry| entry.data.iter().map(|pair| pair.0).collect())
        .unwrap_or_default();

    let options = if bucket_size > 0.0 && !bucket_starts.is_empty() {
        let data_min = bucket_starts.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = bucket_starts
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        // Thin ticks by doubling the step until the label budget fits.
        let mut tick_step = bucket_size;
        let mut ticks_num = ((data_max - data_min) / tick_step).floor();
        while ticks_num > default_ticks {
            tick_step *= 2.0;
            ticks_num = ((data_max - data_min) / tick_step).ceil();
        }

        // Expand bounds outward to whole bucket boundaries.
        let min = (data_min / tick_step).floor() * tick_step;
        let max = (data_max / tick_step).ceil() * tick_step;

        let mut positions = Vec::new();
        let mut position = min;
        while position <= max {
            positions.push(position);
            position += tick_step;
        }

        XAxisOptions::Histogram {
            min,
            max,
            bucket_size,
            ticks: AxisTicks::Positions(positions),
            format: FormatKind::Short,
        }
    } else {
        XAxisOptions::Histogram {
            min: 0.0,
            max: 1.0,
            bucket_size,
            ticks: AxisTicks::Count((default_ticks / 2.0) as usize),
            format: FormatKind::Short,
        }
    };

    XAxisResolution { options, bar_width }
}

/// Table mode: one x position per sample in series-then-sample order.
fn resolve_table_axis(series: &[Series]) -> XAxisResolution {
    let mut ticks = Vec::new();
    for (series_index, entry) in series.iter().enumerate() {
        for (point_index, point) in entry.datapoints.iter().enumerate() {
            let tick_index = series_index * entry.datapoints.len() + point_index;
            ticks.push(Tick::new(
                (tick_index + 1) as f64,
                FormatKind::Plain.format(point.time, None),
            ));
        }
    }

    XAxisResolution {
        options: XAxisOptions::TableIndex {
            min: 0.0,
            max: (ticks.len() + 1) as f64,
            ticks,
        },
        bar_width: 0.7,
    }
}
