pub mod config;
pub mod engine;
pub mod events;
pub mod options;
pub mod ordering;
pub mod synthesizer;
pub mod xaxis;
pub mod yaxis;

pub use config::{
    CalculConfig, LabelAlign, LegendConfig, PanelConfig, ViewContext, XAxisConfig, XAxisMode,
    YAxisConfig,
};
pub use engine::GraphEngine;
pub use events::{EngineEvent, EventBus};
pub use options::{AxisSide, AxisTicks, RenderOptions, Tick, ValueTransform, XAxisOptions, YAxisOptions};
pub use ordering::{
    bar_eligible, distribute_bars_side_by_side, min_bar_time_step, should_display_side_by_side,
    sort_series,
};
pub use synthesizer::synthesize_calculated_series;
pub use xaxis::{XAxisResolution, resolve_x_axis};
pub use yaxis::{apply_log_scale, configure_y_axes};
