use crate::api::RenderOptions;
use crate::core::Series;
use crate::error::GraphResult;

/// Contract implemented by any plotting surface.
///
/// Surfaces receive the finalized series list and render options so painting
/// code stays isolated from axis and series-transformation logic.
pub trait PlotSurface {
    fn draw(&mut self, series: &[Series], options: &RenderOptions) -> GraphResult<()>;
}

/// No-op surface used by tests and headless engine usage.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub last_series_count: usize,
    pub last_yaxis_count: usize,
    pub draw_calls: usize,
}

impl PlotSurface for NullSurface {
    fn draw(&mut self, series: &[Series], options: &RenderOptions) -> GraphResult<()> {
        self.last_series_count = series.len();
        self.last_yaxis_count = options.yaxes.len();
        self.draw_calls += 1;
        Ok(())
    }
}
