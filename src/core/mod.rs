pub mod layout;
pub mod percent;
pub mod series;
pub mod stack;
pub mod ticks;
pub mod types;

pub use layout::{BarLayout, ChartLayout, LayoutParams, PlotRect, SegmentLayout, layout_chart};
pub use percent::{integral_percentages, percentages};
pub use series::{Series, format_day_domain};
pub use stack::{Segment, Stack, StackBuildConfig, StackCollection, build_stacks};
pub use ticks::{Tick, TickCache, TickSet, format_tick_label, nice_step_at_least, resolve_ticks};
pub use types::{Insets, ValueAxis, Viewport};
