//! Column sets and table options of the admin CRUD screens.
//!
//! Each screen numbers its rows with a `#` column counted across pages,
//! so the numbering continues on page 2 instead of restarting at 1.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use souq_grid::{
    Align, CellContent, CellContext, CellValue, Column, DataTable, EmptyState, PaginationMode,
    SortDirection, TableOptions,
};

use crate::error::{AdminError, Result};
use crate::models::{Advertising, Category, CategoryFeature, User};
use crate::templates::html_escape;

/// An admin list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Marketplace accounts.
    Users,
    /// Listing categories.
    Categories,
    /// Fields that ads of a category fill in.
    CategoryFeatures,
    /// Classified ads.
    Advertisings,
}

impl Resource {
    /// Every screen, in sidebar order.
    pub const ALL: [Self; 4] = [
        Self::Users,
        Self::Categories,
        Self::CategoryFeatures,
        Self::Advertisings,
    ];

    /// URL slug.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Categories => "categories",
            Self::CategoryFeatures => "category-features",
            Self::Advertisings => "advertisings",
        }
    }

    /// Page title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Categories => "Categories",
            Self::CategoryFeatures => "Category features",
            Self::Advertisings => "Advertisings",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Resource {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|r| r.slug() == wanted)
            .ok_or_else(|| AdminError::UnknownResource(s.to_string()))
    }
}

/// Columns and options of one screen.
pub struct Screen<T> {
    /// Which screen this is.
    pub resource: Resource,
    /// Column declarations.
    pub columns: Vec<Column<T>>,
    /// Table options.
    pub options: TableOptions<T>,
}

impl<T> Screen<T> {
    /// Switches the screen to server paging.
    ///
    /// Search moves to the server along with paging.
    #[must_use]
    pub fn delegated(mut self, mode: PaginationMode) -> Self {
        self.options = self.options.pagination(mode).server_side_search(true);
        self
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Grid`] when the columns or options are
    /// inconsistent.
    pub fn table(&self) -> Result<DataTable<T>> {
        Ok(DataTable::new(&self.columns, self.options.clone())?)
    }
}

/// The running `#` column.
#[must_use]
pub fn counter_column<T: 'static>() -> Column<T> {
    Column::new("counter", "#", |_: &T| CellValue::Null)
        .render(|_: &T, ctx: &CellContext| ctx.global_index.saturating_add(1).to_string())
        .toggleable(false)
        .searchable(false)
        .align(Align::Center)
        .header_class("text-muted")
        .cell_class("text-muted")
}

fn badge(class: &str, label: &str) -> CellContent {
    let label = html_escape(label);
    CellContent::html(format!(r#"<span class="badge {class}">{label}</span>"#))
}

fn active_badge(active: bool) -> CellContent {
    if active {
        badge("bg-success", "Active")
    } else {
        badge("bg-secondary", "Inactive")
    }
}

fn date_text(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// The users screen.
#[must_use]
pub fn users_screen() -> Screen<User> {
    let columns = vec![
        counter_column(),
        Column::new("name", "Name", |u: &User| u.name.clone())
            .sortable(true)
            .toggleable(false)
            .cell_class("fw-semibold"),
        Column::new("email", "E-mail", |u: &User| u.email.clone()).align(Align::Left),
        Column::new("phone", "Phone", |u: &User| u.phone.clone()).align(Align::Left),
        Column::new("city", "City", |u: &User| u.city.clone()).sortable(true),
        Column::new("role", "Role", |u: &User| u.role.clone()).render(|u: &User, _: &CellContext| {
            if u.role == "admin" {
                badge("bg-primary", "Admin")
            } else {
                badge("bg-light text-dark", &u.role)
            }
        }),
        Column::new("is_active", "Status", |u: &User| u.is_active)
            .render(|u: &User, _: &CellContext| active_badge(u.is_active))
            .sortable(true)
            .searchable(false),
        Column::new("ads_count", "Ads", |u: &User| u.ads_count)
            .sortable(true)
            .searchable(false)
            .default_hidden(),
        Column::new("created_at", "Joined", |u: &User| u.created_at)
            .render(|u: &User, _: &CellContext| date_text(&u.created_at))
            .sortable(true)
            .searchable(false),
    ];
    let options = TableOptions::new()
        .search_placeholder("Search by name, e-mail or phone...")
        .initial_sort("created_at", SortDirection::Desc)
        .row_key(|u: &User, _| u.id.to_string())
        .empty_state(
            EmptyState::new("No users found")
                .icon("bi bi-people")
                .description("Try another search or clear the filter."),
        );
    Screen {
        resource: Resource::Users,
        columns,
        options,
    }
}

/// The categories screen.
#[must_use]
pub fn categories_screen() -> Screen<Category> {
    let columns = vec![
        counter_column(),
        Column::new("image", "Icon", |c: &Category| c.image.clone())
            .render(|c: &Category, _: &CellContext| {
                c.image.as_deref().map_or_else(
                    || CellContent::html(r#"<i class="bi bi-image text-muted"></i>"#),
                    |src| {
                        let src = html_escape(src);
                        let alt = html_escape(&c.name);
                        CellContent::html(format!(
                            r#"<img src="{src}" alt="{alt}" class="rounded" width="32" height="32">"#
                        ))
                    },
                )
            })
            .searchable(false)
            .align(Align::Center),
        Column::new("name", "Name", |c: &Category| c.name.clone())
            .sortable(true)
            .toggleable(false),
        Column::new("slug", "Slug", |c: &Category| c.slug.clone())
            .align(Align::Left)
            .cell_class("font-monospace"),
        Column::new("parent", "Parent", |c: &Category| c.parent.clone()).sortable(true),
        Column::new("features", "Features", |c: &Category| c.features.clone())
            .sort_value(|c: &Category| c.features.len())
            .sortable(true),
        Column::new("ads_count", "Ads", |c: &Category| c.ads_count)
            .sortable(true)
            .searchable(false),
        Column::new("is_active", "Status", |c: &Category| c.is_active)
            .render(|c: &Category, _: &CellContext| active_badge(c.is_active))
            .searchable(false),
    ];
    let options = TableOptions::new()
        .search_placeholder("Search categories...")
        .per_page(20)
        .row_key(|c: &Category, _| c.id.to_string())
        .empty_state(
            EmptyState::new("No categories yet")
                .icon("bi bi-grid")
                .action("Add category", "/admin/categories/add/"),
        );
    Screen {
        resource: Resource::Categories,
        columns,
        options,
    }
}

/// The category features screen.
#[must_use]
pub fn category_features_screen() -> Screen<CategoryFeature> {
    let columns = vec![
        counter_column(),
        Column::new("name", "Feature", |f: &CategoryFeature| f.name.clone())
            .sortable(true)
            .toggleable(false),
        Column::new("category", "Category", |f: &CategoryFeature| f.category.clone())
            .sortable(true),
        Column::new("kind", "Input", |f: &CategoryFeature| f.kind.clone()),
        Column::new("options", "Choices", |f: &CategoryFeature| f.options.clone())
            .default_hidden(),
        Column::new("required", "Required", |f: &CategoryFeature| f.required)
            .render(|f: &CategoryFeature, _: &CellContext| {
                if f.required {
                    CellContent::html(r#"<i class="bi bi-check-lg text-success"></i>"#)
                } else {
                    CellContent::text("")
                }
            })
            .searchable(false)
            .align(Align::Center),
        Column::new("sort_order", "Order", |f: &CategoryFeature| f.sort_order)
            .sortable(true)
            .searchable(false),
    ];
    let options = TableOptions::new()
        .search_placeholder("Search features...")
        .real_time_search(true)
        .initial_sort("sort_order", SortDirection::Asc)
        .row_key(|f: &CategoryFeature, _| f.id.to_string())
        .empty_state(EmptyState::new("No features defined").icon("bi bi-sliders"));
    Screen {
        resource: Resource::CategoryFeatures,
        columns,
        options,
    }
}

/// The advertisings screen.
#[must_use]
pub fn advertisings_screen() -> Screen<Advertising> {
    let columns = vec![
        counter_column(),
        Column::new("title", "Title", |a: &Advertising| a.title.clone())
            .sortable(true)
            .toggleable(false),
        Column::new("category", "Category", |a: &Advertising| a.category.clone())
            .sortable(true),
        Column::new("city", "City", |a: &Advertising| a.city.clone()).sortable(true),
        Column::new("price", "Price", |a: &Advertising| a.price)
            .render(|a: &Advertising, _: &CellContext| {
                a.price
                    .map_or_else(|| "On request".to_string(), |price| format!("{price:.2} SAR"))
            })
            .sortable(true)
            .searchable(false)
            .align(Align::Left),
        Column::new("owner", "Owner", |a: &Advertising| a.owner.clone()),
        Column::new("status", "Status", |a: &Advertising| a.status.clone())
            .render(|a: &Advertising, _: &CellContext| {
                let class = match a.status.as_str() {
                    "active" => "bg-success",
                    "pending" => "bg-warning text-dark",
                    "rejected" => "bg-danger",
                    _ => "bg-secondary",
                };
                badge(class, &a.status)
            })
            .sortable(true),
        Column::new("views", "Views", |a: &Advertising| a.views)
            .sortable(true)
            .searchable(false)
            .default_hidden(),
        Column::new("created_at", "Posted", |a: &Advertising| a.created_at)
            .render(|a: &Advertising, _: &CellContext| date_text(&a.created_at))
            .sortable(true)
            .searchable(false),
    ];
    let options = TableOptions::new()
        .search_placeholder("Search ads by title, category, city or owner...")
        .per_page(20)
        .per_page_options(&[10, 20, 50, 100])
        .initial_sort("created_at", SortDirection::Desc)
        .row_key(|a: &Advertising, _| a.id.to_string())
        .empty_state(
            EmptyState::new("No advertisings found")
                .icon("bi bi-megaphone")
                .description("Ads show up here once users post them."),
        );
    Screen {
        resource: Resource::Advertisings,
        columns,
        options,
    }
}
