//! Read-only hits dashboard.
//!
//! Pull-based: every access re-reads the table. There is no cache, so a
//! listing is as fresh as the counter store behind it.

mod render;
mod sort;
mod view;

pub use render::render_html;
pub use sort::{SortField, SortKey};
pub use view::{DashboardSnapshot, HitsDashboard};
