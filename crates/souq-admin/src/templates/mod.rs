//! Bootstrap 5 HTML templates for the admin screens.

mod base;
pub mod table;

pub use base::{render_base, AdminContext};
pub use table::{render_data_table, TableLinks};

/// Escapes HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
