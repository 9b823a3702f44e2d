pub mod expr;
pub mod histogram;
pub mod ticks;
pub mod types;

pub use expr::CompiledExpression;
pub use histogram::{convert_values_to_histogram, series_values};
pub use ticks::{FormatKind, Timezone, nice_tick_step};
pub use types::{DataPoint, Series, SeriesStats, SeriesStyle, StatKey};
