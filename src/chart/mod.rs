pub mod data;
pub mod engine;
pub mod error;
pub mod format;
pub mod kinds;
pub mod options;
pub mod placeholder;
pub mod snapshot;
pub mod widget;

pub use kinds::ChartName;
pub use widget::{Widget, WidgetContext, WidgetState};
