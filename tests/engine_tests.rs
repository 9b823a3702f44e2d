use std::cell::RefCell;
use std::rc::Rc;

use multibar_graph::api::{EngineEvent, PanelConfig, ViewContext, XAxisOptions};
use multibar_graph::core::{DataPoint, Series, SeriesStats};
use multibar_graph::error::{GraphError, GraphResult};
use multibar_graph::render::{NullSurface, PlotSurface};
use multibar_graph::GraphEngine;

/// Surface that rejects every draw call.
#[derive(Debug, Default)]
struct FailingSurface;

impl PlotSurface for FailingSurface {
    fn draw(&mut self, _series: &[Series], _options: &multibar_graph::RenderOptions) -> GraphResult<()> {
        Err(GraphError::DrawFailed("surface offline".to_owned()))
    }
}

fn sample_series(alias: &str, values: &[f64]) -> Series {
    let datapoints: Vec<DataPoint> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| DataPoint::new(value, 60_000.0 * index as f64))
        .collect();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let total: f64 = values.iter().sum();
    let stats = SeriesStats {
        min,
        max,
        avg: total / values.len().max(1) as f64,
        current: values.last().copied().unwrap_or(0.0),
        total,
        logmin: None,
        time_step: Some(60_000.0),
    };
    Series::new(alias, datapoints, stats)
}

fn view() -> ViewContext {
    ViewContext::new(800, 600, 0.0, 3_600_000.0)
}

#[test]
fn render_pass_produces_options_and_draws_once() {
    let mut engine = GraphEngine::new(NullSurface::default(), PanelConfig::default());
    let mut series = vec![
        sample_series("a", &[1.0, 2.0, 3.0]),
        sample_series("b", &[4.0, 5.0, 6.0]),
    ];

    let options = engine
        .render_pass(&mut series, &view())
        .expect("laid-out viewport renders");

    assert!(matches!(options.xaxis, XAxisOptions::Time { .. }));
    assert_eq!(options.yaxes.len(), 1);
    assert_eq!(engine.surface().draw_calls, 1);
    assert_eq!(engine.surface().last_series_count, 2);
    assert_eq!(engine.render_error(), None);

    // Data pairs were rebuilt from the datapoints during the pass.
    assert_eq!(series[0].data, vec![(0.0, 1.0), (60_000.0, 2.0), (120_000.0, 3.0)]);
}

#[test]
fn zero_width_viewport_skips_the_pass_entirely() {
    let mut engine = GraphEngine::new(NullSurface::default(), PanelConfig::default());
    let mut series = vec![sample_series("a", &[1.0])];

    let unsized_view = ViewContext::new(0, 600, 0.0, 3_600_000.0);
    assert!(engine.render_pass(&mut series, &unsized_view).is_none());
    assert_eq!(engine.surface().draw_calls, 0);
}

#[test]
fn completion_event_fires_on_every_pass() {
    let mut engine = GraphEngine::new(NullSurface::default(), PanelConfig::default());
    let seen: Rc<RefCell<Vec<EngineEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);
    engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut series = vec![sample_series("a", &[1.0, 2.0])];
    engine.render_pass(&mut series, &view());
    engine.render_pass(&mut series, &view());

    assert_eq!(
        *seen.borrow(),
        vec![EngineEvent::RenderCompleted, EngineEvent::RenderCompleted]
    );
}

#[test]
fn draw_failure_is_reported_but_the_pass_still_completes() {
    let mut engine = GraphEngine::new(FailingSurface, PanelConfig::default());
    let seen: Rc<RefCell<Vec<EngineEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);
    engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut series = vec![sample_series("a", &[1.0])];
    let options = engine.render_pass(&mut series, &view());

    assert!(options.is_some());
    let error = engine.render_error().expect("failure is recorded");
    assert!(error.contains("surface offline"), "got {error:?}");

    let events = seen.borrow();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], EngineEvent::RenderFailed { message } if message.contains("surface offline")));
    assert_eq!(events[1], EngineEvent::RenderCompleted);
}

#[test]
fn render_error_clears_after_a_successful_pass() {
    let mut engine = GraphEngine::new(NullSurface::default(), PanelConfig::default());
    let mut series = vec![sample_series("a", &[1.0])];

    engine.render_pass(&mut series, &view());
    assert_eq!(engine.render_error(), None);
}

#[test]
fn calculated_series_flows_through_the_full_pass() {
    let mut panel = PanelConfig::default();
    panel.calcul.operation = "{a}+{b}".to_owned();
    panel.calcul.name = "sum".to_owned();

    let mut engine = GraphEngine::new(NullSurface::default(), panel);
    let mut series = vec![
        sample_series("a", &[1.0, 2.0]),
        sample_series("b", &[10.0, 20.0]),
    ];
    engine.render_pass(&mut series, &view());

    assert_eq!(engine.surface().last_series_count, 3);
    let derived = series.iter().find(|entry| entry.alias == "sum").expect("derived series");
    assert_eq!(derived.data, vec![(0.0, 11.0), (60_000.0, 22.0)]);
}

#[test]
fn panel_config_survives_a_serde_round_trip() {
    let mut panel = PanelConfig::default();
    panel.bars = true;
    panel.stack = true;
    panel.yaxes[0].log_base = 10.0;
    panel.xaxis.buckets = Some(24);
    panel.calcul.operation = "{a}*2".to_owned();

    let json = serde_json::to_string(&panel).expect("serialize");
    let restored: PanelConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, panel);
}

#[test]
fn panel_config_defaults_fill_missing_fields() {
    let panel: PanelConfig = serde_json::from_str("{}").expect("empty object deserializes");
    assert!(panel.lines);
    assert!(!panel.bars);
    assert_eq!(panel.calcul.name, "Calcul-series");
    assert_eq!(panel.calcul.operation, "%");
    assert_eq!(panel.calcul.color, "FFFFFF");
    assert_eq!(panel.yaxes[0].log_base, 1.0);
}
