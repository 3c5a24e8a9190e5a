//! # souq-admin
//!
//! Admin screens for the souq classifieds marketplace, rendered with
//! Bootstrap 5 in right-to-left layout.
//!
//! Each screen pairs a model with a [`souq_grid::DataTable`] configuration:
//!
//! - `users` - Accounts, newest first
//! - `categories` - Category tree with its feature lists
//! - `category-features` - Attributes a category asks for on new ads
//! - `advertisings` - Listings with price, status and view count
//!
//! ## Rendering
//!
//! Screens are rendered from the JSON body of the marketplace API. A body
//! carrying a page envelope (`current_page`, `last_page`, `total`, ...)
//! is shown as is with the server's paging; a plain list is searched,
//! sorted and paged locally.
//!
//! ```
//! use souq_admin::{render_resource, AdminSite, ListViewParams, Resource};
//!
//! let site = AdminSite::new("Souq Admin");
//! let params = ListViewParams::parse("?q=rami&o=-created_at");
//! let body = r#"{"success": true, "data": []}"#;
//!
//! let html = render_resource(&site, Resource::Users, body, &params).unwrap();
//! assert!(html.contains("No users found"));
//! ```
//!
//! Table state lives in the query string, see [`ListViewParams`].
//!
//! ## Reference data
//!
//! [`ReferenceCache`] keeps cities and categories for a month in any
//! [`KeyValueStore`].

pub mod api;
pub mod cache;
pub mod error;
pub mod models;
pub mod screens;
pub mod site;
pub mod templates;
pub mod views;

pub use api::{ApiResponse, PagePayload, RowsPayload};
pub use cache::{Clock, FileStore, KeyValueStore, MemoryStore, ReferenceCache, SystemClock};
pub use error::{AdminError, Result};
pub use screens::{Resource, Screen};
pub use site::AdminSite;
pub use views::{index_view, list_view, render_resource, render_screen, ListViewParams};
