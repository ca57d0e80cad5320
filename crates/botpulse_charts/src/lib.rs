pub mod charts;
pub mod config;
pub mod html;
pub mod style;
pub mod surface;
pub mod terminal;

pub use charts::{activity_chart, render_activity_chart, render_response_chart, response_chart};
pub use config::{ChartConfig, ChartKind};
pub use html::{CanvasSurface, HtmlDashboard};
pub use style::ChartStyle;
pub use surface::{MemorySurface, RenderError, Surface};
pub use terminal::TerminalSurface;
