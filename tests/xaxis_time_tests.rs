use multibar_graph::api::{
    AxisTicks, LabelAlign, PanelConfig, ViewContext, XAxisOptions, resolve_x_axis,
};
use multibar_graph::core::{DataPoint, Series, SeriesStats, Timezone};

const HOUR_MS: f64 = 3_600_000.0;

fn bar_series(alias: &str, step_ms: f64, from_ms: f64, to_ms: f64) -> Series {
    let mut datapoints = Vec::new();
    let mut time = from_ms;
    while time <= to_ms {
        datapoints.push(DataPoint::new(1.0, time));
        time += step_ms;
    }

    let stats = SeriesStats {
        min: 1.0,
        max: 1.0,
        avg: 1.0,
        current: 1.0,
        total: datapoints.len() as f64,
        logmin: Some(1.0),
        time_step: Some(step_ms),
    };
    let mut series = Series::new(alias, datapoints, stats);
    series.style.bars = Some(true);
    series
}

fn bar_panel() -> PanelConfig {
    let mut panel = PanelConfig::default();
    panel.bars = true;
    panel
}

fn utc_view(width_px: u32, from_ms: f64, to_ms: f64) -> ViewContext {
    ViewContext::new(width_px, 600, from_ms, to_ms).with_timezone(Timezone::Utc)
}

fn labeled_ticks(options: &XAxisOptions) -> Vec<(f64, String)> {
    match options {
        XAxisOptions::Time {
            ticks: AxisTicks::Labeled(ticks),
            ..
        } => ticks
            .iter()
            .map(|tick| (tick.position, tick.label.clone()))
            .collect(),
        other => panic!("expected labeled time ticks, got {other:?}"),
    }
}

#[test]
fn bar_width_uses_min_time_step_of_bar_series() {
    let to = 2.0 * HOUR_MS;
    let mut series = vec![
        bar_series("coarse", 60_000.0, 0.0, to),
        bar_series("fine", 30_000.0, 0.0, to),
    ];

    let resolution = resolve_x_axis(&mut series, &bar_panel(), &utc_view(800, 0.0, to));
    assert_eq!(resolution.bar_width, 30_000.0 / 1.5);
}

#[test]
fn left_aligned_ticks_start_at_the_first_group() {
    let to = 2.0 * HOUR_MS;
    let mut series = vec![bar_series("a", 1_800_000.0, 0.0, to)];

    let resolution = resolve_x_axis(&mut series, &bar_panel(), &utc_view(800, 0.0, to));
    let ticks = labeled_ticks(&resolution.options);

    let positions: Vec<f64> = ticks.iter().map(|tick| tick.0).collect();
    assert_eq!(
        positions,
        vec![0.0, 1_800_000.0, 3_600_000.0, 5_400_000.0, 7_200_000.0]
    );
    // 1440s per tick selects hours:minutes.
    let labels: Vec<&str> = ticks.iter().map(|tick| tick.1.as_str()).collect();
    assert_eq!(labels, vec!["00:00", "00:30", "01:00", "01:30", "02:00"]);
}

#[test]
fn center_aligned_ticks_are_offset_but_labels_keep_group_start() {
    let to = 2.0 * HOUR_MS;
    let step = 1_800_000.0;
    let mut series = vec![bar_series("a", step, 0.0, to)];
    let mut panel = bar_panel();
    panel.label_align = LabelAlign::Center;

    let resolution = resolve_x_axis(&mut series, &panel, &utc_view(800, 0.0, to));
    let ticks = labeled_ticks(&resolution.options);

    let half_bar = step / 1.5 / 2.0;
    assert_eq!(ticks[0].0, half_bar);
    assert_eq!(ticks[0].1, "00:00");
    assert_eq!(ticks[1].0, step + half_bar);
    assert_eq!(ticks[1].1, "00:30");
}

#[test]
fn tick_count_stays_within_width_budget_for_dense_samples() {
    let to = 2.0 * HOUR_MS;
    // 7200 raw samples in range, far beyond the 8-label budget at 800px.
    let mut series = vec![bar_series("dense", 1_000.0, 0.0, to)];
    series[0].stats.time_step = Some(30_000.0);

    let resolution = resolve_x_axis(&mut series, &bar_panel(), &utc_view(800, 0.0, to));
    let ticks = labeled_ticks(&resolution.options);

    assert!(!ticks.is_empty());
    assert!(ticks.len() <= 8, "got {} ticks", ticks.len());
}

#[test]
fn custom_date_format_overrides_auto_selection() {
    let to = 2.0 * HOUR_MS;
    let mut series = vec![bar_series("a", 1_800_000.0, 0.0, to)];
    let mut panel = bar_panel();
    panel.xaxis.custom_date_format = Some("%H".to_owned());

    let resolution = resolve_x_axis(&mut series, &panel, &utc_view(800, 0.0, to));
    let ticks = labeled_ticks(&resolution.options);
    assert_eq!(ticks[0].1, "00");
    assert_eq!(ticks.last().expect("ticks").1, "02");
}

#[test]
fn non_bar_panel_falls_back_to_count_ticks() {
    let to = 2.0 * HOUR_MS;
    let mut series = vec![bar_series("a", 60_000.0, 0.0, to)];
    let panel = PanelConfig::default(); // lines panel

    let resolution = resolve_x_axis(&mut series, &panel, &utc_view(800, 0.0, to));
    match resolution.options {
        XAxisOptions::Time {
            min,
            max,
            ticks: AxisTicks::Count(count),
            ..
        } => {
            assert_eq!(min, 0.0);
            assert_eq!(max, to);
            assert_eq!(count, 8);
        }
        other => panic!("expected count ticks, got {other:?}"),
    }
}

#[test]
fn out_of_range_samples_produce_no_labeled_ticks() {
    let to = HOUR_MS;
    // All samples far after the visible range.
    let mut series = vec![bar_series("late", 60_000.0, 10.0 * HOUR_MS, 12.0 * HOUR_MS)];

    let resolution = resolve_x_axis(&mut series, &bar_panel(), &utc_view(800, 0.0, to));
    assert!(matches!(
        resolution.options,
        XAxisOptions::Time {
            ticks: AxisTicks::Count(8),
            ..
        }
    ));
}
