//! Admin page views.
//!
//! - `index` - Dashboard linking every screen
//! - `list` - List screen driven by query parameters

mod index;
mod list;

pub use index::index_view;
pub use list::{list_view, render_resource, render_screen, ListLinks, ListViewParams};

use crate::site::AdminSite;
use crate::templates::{render_base, AdminContext};

/// Helper to render a page with the base admin layout.
#[must_use]
pub fn render_admin_page(
    site: &AdminSite,
    page_title: &str,
    active_url: Option<String>,
    content: String,
    breadcrumbs: Vec<(String, Option<String>)>,
    messages: Vec<(String, String)>,
) -> String {
    let ctx = AdminContext {
        site_title: site.name.clone(),
        models: site.model_list(),
        active_url,
        breadcrumbs,
        page_title: page_title.to_string(),
        content,
        messages,
        ..AdminContext::default()
    };

    render_base(&ctx)
}
