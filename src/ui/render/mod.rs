mod dashboard;
mod device_panel;
mod device_strip;
mod formatting;
mod frame;
pub mod layout;
mod lifecycle;
mod map;
mod theme;
mod timeline_bar;

pub use dashboard::{Ui, UiActions};
pub use device_panel::{DetailSection, detail_sections};
pub use formatting::{format_timestamp, format_timestamp_in};
pub use lifecycle::setup_render_ui;
