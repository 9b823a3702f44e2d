//! Render-pass orchestration.

use tracing::{debug, warn};

use crate::api::config::{PanelConfig, ViewContext};
use crate::api::events::{EngineEvent, EventBus};
use crate::api::options::RenderOptions;
use crate::api::ordering::sort_series;
use crate::api::synthesizer::synthesize_calculated_series;
use crate::api::xaxis::resolve_x_axis;
use crate::api::yaxis::configure_y_axes;
use crate::core::Series;
use crate::render::PlotSurface;

/// Single-threaded render-pass engine.
///
/// One pass runs to completion before the next is triggered; the caller owns
/// the series list and must not mutate it while a produced `RenderOptions`
/// is still being consumed. A draw failure is converted into a user-visible
/// error state instead of propagating, and the completion event is emitted
/// either way.
pub struct GraphEngine<S: PlotSurface> {
    surface: S,
    panel: PanelConfig,
    events: EventBus,
    render_error: Option<String>,
}

impl<S: PlotSurface> GraphEngine<S> {
    #[must_use]
    pub fn new(surface: S, panel: PanelConfig) -> Self {
        Self {
            surface,
            panel,
            events: EventBus::new(),
            render_error: None,
        }
    }

    #[must_use]
    pub fn panel(&self) -> &PanelConfig {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PanelConfig {
        &mut self.panel
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Registers a render lifecycle subscriber scoped to this engine.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&EngineEvent) + 'static) {
        self.events.subscribe(subscriber);
    }

    /// Last draw failure, kept for host inspection until a pass succeeds.
    #[must_use]
    pub fn render_error(&self) -> Option<&str> {
        self.render_error.as_deref()
    }

    /// Runs one full render pass over the working series list.
    ///
    /// Returns `None` without side effects when the viewport has no width
    /// yet (the hosting view may not be laid out).
    pub fn render_pass(
        &mut self,
        series: &mut Vec<Series>,
        view: &ViewContext,
    ) -> Option<RenderOptions> {
        if view.width_px == 0 {
            debug!("panel width is zero; skipping render pass");
            return None;
        }

        synthesize_calculated_series(series, &self.panel.calcul);

        for entry in series.iter_mut() {
            entry.rebuild_data_pairs();
        }

        sort_series(series, &self.panel);

        let x_resolution = resolve_x_axis(series, &self.panel, view);
        let yaxes = configure_y_axes(series, &self.panel, view);

        let options = RenderOptions {
            xaxis: x_resolution.options,
            xaxis_show: self.panel.xaxis.show,
            yaxes,
            bar_width: x_resolution.bar_width,
            stack: self.panel.stack,
            percentage: self.panel.percentage,
        };

        match self.surface.draw(series, &options) {
            Ok(()) => {
                self.render_error = None;
            }
            Err(error) => {
                warn!(%error, "plot surface draw failed");
                let message = error.to_string();
                self.render_error = Some(message.clone());
                self.events.emit(&EngineEvent::RenderFailed { message });
            }
        }

        // The host must see a completed pass even after a draw failure.
        self.events.emit(&EngineEvent::RenderCompleted);
        Some(options)
    }
}
