//! Data table template.
//!
//! Turns a [`TableView`] into a Bootstrap 5 card: toolbar, table or empty
//! state, and pager. Every interaction is a plain link or GET form, so the
//! page works without scripts; [`TableLinks`] decides what the URLs are.

use ironhtml::typed::Element;
use ironhtml_elements::{
    Button, Div, Form, Input, Li, Nav, Option_, Select as SelectEl, Span, Th, Ul, A, H5, I, P,
};
use souq_grid::{
    Align, BodyRow, CellContent, EmptyState, HeaderCell, PageItem, Pager, SortDirection,
    TableView, Toolbar,
};

use super::html_escape;

/// Builds the URLs behind the table's links and forms.
pub trait TableLinks {
    /// URL showing `page`.
    fn page(&self, page: usize) -> String;

    /// URL after clicking the header of `column`.
    fn sort(&self, column: &str) -> String;

    /// URL after switching the visibility of `column`.
    fn toggle(&self, column: &str) -> String;

    /// URL with the search cleared.
    fn clear_search(&self) -> String;

    /// Current query parameters a GET form must resubmit, leaving out
    /// the one it edits itself.
    fn hidden_fields(&self, edited: &str) -> Vec<(String, String)>;

    /// URL opened when a row is clicked.
    fn row(&self, _key: &str) -> Option<String> {
        None
    }
}

const fn align_class(align: Align) -> &'static str {
    match align {
        Align::Left => "text-start",
        Align::Center => "text-center",
        Align::Right => "text-end",
    }
}

fn cell_class(align: Align, extra: Option<&str>) -> String {
    let base = align_class(align);
    extra.map_or_else(|| base.to_string(), |extra| format!("{base} {extra}"))
}

/// Renders a table view.
#[must_use]
pub fn render_data_table<T>(view: &TableView<'_, T>, links: &dyn TableLinks) -> String {
    let toolbar = render_toolbar(&view.toolbar, links);
    let body = view
        .empty
        .as_ref()
        .map_or_else(|| render_table(view, links), render_empty_state);
    let footer = render_pager(&view.pager, links);

    format!(
        r#"{toolbar}
<div class="card">
    <div class="card-body p-0">
        {body}
    </div>
    <div class="card-footer bg-white">
        {footer}
    </div>
</div>"#
    )
}

fn hidden_inputs(form: Element<Form>, fields: &[(String, String)]) -> Element<Form> {
    form.children(fields.iter(), |(name, value), input: Element<Input>| {
        input
            .attr("type", "hidden")
            .attr("name", name)
            .attr("value", value)
    })
}

fn render_toolbar(toolbar: &Toolbar, links: &dyn TableLinks) -> String {
    let mut html = String::new();
    let search = if toolbar.search_enabled {
        render_search_form(toolbar, links)
    } else {
        String::new()
    };

    Element::<Div>::new()
        .class("d-flex flex-wrap gap-2 justify-content-between align-items-center mb-3")
        .child::<Div, _>(|d| d.class("flex-grow-1").raw(&search))
        .child::<Div, _>(|d| {
            d.class("d-flex gap-2")
                .raw(render_column_menu(toolbar, links))
                .raw(render_per_page_form(toolbar, links))
        })
        .render_to(&mut html);
    html
}

fn render_search_form(toolbar: &Toolbar, links: &dyn TableLinks) -> String {
    let hidden = links.hidden_fields("q");
    let clear_url = links.clear_search();
    let has_query = !toolbar.query.is_empty();

    let form = Element::<Form>::new()
        .attr("method", "GET")
        .class("search-form")
        .child::<Div, _>(|d| {
            let group = d
                .class("input-group")
                .child::<Input, _>(|i| {
                    i.attr("type", "search")
                        .attr("name", "q")
                        .class("form-control")
                        .attr("placeholder", &toolbar.search_placeholder)
                        .attr("value", &toolbar.search_draft)
                })
                .child::<Button, _>(|b| {
                    b.attr("type", "submit")
                        .class("btn btn-outline-secondary")
                        .attr("aria-label", "Search")
                        .child::<I, _>(|i| i.class("bi bi-search"))
                });
            if has_query {
                group.child::<A, _>(|a| {
                    a.attr("href", &clear_url)
                        .class("btn btn-outline-danger")
                        .attr("aria-label", "Clear search")
                        .child::<I, _>(|i| i.class("bi bi-x-lg"))
                })
            } else {
                group
            }
        });
    hidden_inputs(form, &hidden).render()
}

fn render_column_menu(toolbar: &Toolbar, links: &dyn TableLinks) -> String {
    Element::<Div>::new()
        .class("dropdown")
        .child::<Button, _>(|b| {
            b.attr("type", "button")
                .class("btn btn-outline-secondary dropdown-toggle")
                .attr("data-bs-toggle", "dropdown")
                .attr("aria-expanded", "false")
                .child::<I, _>(|i| i.class("bi bi-layout-three-columns ms-1"))
                .text("Columns")
        })
        .child::<Ul, _>(|ul| {
            ul.class("dropdown-menu dropdown-menu-end column-menu").children(
                toolbar.columns.iter(),
                |column, li: Element<Li>| {
                    let icon = if column.visible {
                        "bi bi-check-square ms-2"
                    } else {
                        "bi bi-square ms-2"
                    };
                    if column.toggleable {
                        let href = links.toggle(&column.id);
                        li.child::<A, _>(|a| {
                            a.attr("href", &href)
                                .class("dropdown-item")
                                .child::<I, _>(|i| i.class(icon))
                                .text(&column.label)
                        })
                    } else {
                        li.child::<Span, _>(|s| {
                            s.class("dropdown-item disabled")
                                .child::<I, _>(|i| i.class(icon))
                                .text(&column.label)
                        })
                    }
                },
            )
        })
        .render()
}

fn render_per_page_form(toolbar: &Toolbar, links: &dyn TableLinks) -> String {
    let hidden = links.hidden_fields("per_page");
    let current = toolbar.per_page;

    let form = Element::<Form>::new()
        .attr("method", "GET")
        .class("per-page-form")
        .child::<SelectEl, _>(|s| {
            s.attr("name", "per_page")
                .class("form-select per-page-select")
                .attr("aria-label", "Rows per page")
                .children(toolbar.per_page_options.iter(), |n, o: Element<Option_>| {
                    let value = n.to_string();
                    let o = o.attr("value", &value).text(&value);
                    if *n == current {
                        o.bool_attr("selected")
                    } else {
                        o
                    }
                })
        });
    hidden_inputs(form, &hidden).render()
}

fn render_header(header: &HeaderCell, links: &dyn TableLinks, out: &mut String) {
    let class = cell_class(header.align, header.class.as_deref());
    if !header.sortable {
        Element::<Th>::new()
            .class(&class)
            .attr("scope", "col")
            .text(&header.label)
            .render_to(out);
        return;
    }

    let (icon, aria) = match header.sort {
        Some(SortDirection::Asc) => ("bi bi-sort-up me-1", "ascending"),
        Some(SortDirection::Desc) => ("bi bi-sort-down me-1", "descending"),
        None => ("bi bi-arrow-down-up me-1 text-muted", "none"),
    };
    let href = links.sort(&header.id);
    Element::<Th>::new()
        .class(&class)
        .attr("scope", "col")
        .attr("aria-sort", aria)
        .bool_attr("data-sortable")
        .child::<A, _>(|a| {
            a.attr("href", &href)
                .text(&header.label)
                .child::<I, _>(|i| i.class(icon))
        })
        .render_to(out);
}

fn render_row<T>(row: &BodyRow<'_, T>, links: &dyn TableLinks) -> String {
    let cells: Vec<String> = row
        .cells
        .iter()
        .map(|cell| {
            let content = match &cell.content {
                CellContent::Text(text) => html_escape(text),
                CellContent::Html(html) => html.clone(),
            };
            let class = html_escape(&cell_class(cell.align, cell.class.as_deref()));
            format!(r#"<td class="{class}">{content}</td>"#)
        })
        .collect();

    let href = links
        .row(&row.key)
        .map(|url| format!(r#" data-href="{}""#, html_escape(&url)))
        .unwrap_or_default();

    let key = html_escape(&row.key);
    let cells = cells.concat();
    format!(r#"<tr data-row-key="{key}"{href}>{cells}</tr>"#)
}

fn render_table<T>(view: &TableView<'_, T>, links: &dyn TableLinks) -> String {
    let mut header_cells = String::new();
    for header in &view.headers {
        render_header(header, links, &mut header_cells);
    }

    let rows: Vec<String> = view.rows.iter().map(|row| render_row(row, links)).collect();

    // Tr and Tbody take no raw children, so the skeleton is written by hand.
    format!(
        r#"<div class="table-responsive">
            <table class="table table-striped table-hover align-middle mb-0 data-table">
                <thead class="table-light">
                    <tr>{header_cells}</tr>
                </thead>
                <tbody>
                    {rows}
                </tbody>
            </table>
        </div>"#,
        rows = rows.join("\n")
    )
}

fn render_empty_state(empty: &EmptyState) -> String {
    Element::<Div>::new()
        .class("text-center text-muted py-5 empty-state")
        .child::<I, _>(|i| i.class(format!("{} fs-1 d-block mb-3", empty.icon)))
        .child::<H5, _>(|h| h.text(&empty.title))
        .child::<P, _>(|p| {
            let class = if empty.description.is_some() {
                "mb-3"
            } else {
                "mb-0"
            };
            p.class(class)
                .text(empty.description.as_deref().unwrap_or_default())
        })
        .child::<Div, _>(|d| {
            d.children(empty.action.iter(), |action, a: Element<A>| {
                a.attr("href", &action.href)
                    .class("btn btn-primary")
                    .child::<I, _>(|i| i.class("bi bi-plus-lg ms-1"))
                    .text(&action.label)
            })
        })
        .render()
}

fn page_link(li: Element<Li>, href: &str, label: &str, enabled: bool) -> Element<Li> {
    if enabled {
        li.class("page-item")
            .child::<A, _>(|a| a.class("page-link").attr("href", href).text(label))
    } else {
        li.class("page-item disabled")
            .child::<Span, _>(|s| s.class("page-link").text(label))
    }
}

fn render_pager(pager: &Pager, links: &dyn TableLinks) -> String {
    let summary = if pager.total_rows == 0 {
        "No rows".to_string()
    } else {
        format!(
            "Showing {}-{} of {}",
            pager.first_row, pager.last_row, pager.total_rows
        )
    };

    let mut html = String::new();
    Element::<Div>::new()
        .class("d-flex justify-content-between align-items-center")
        .child::<Span, _>(|s| s.class("text-muted").text(&summary))
        .child::<Nav, _>(|n| {
            n.attr("aria-label", "Pagination").child::<Ul, _>(|ul| {
                let ul = ul.class("pagination pagination-sm mb-0").child::<Li, _>(|li| {
                    page_link(li, &links.page(pager.page.saturating_sub(1)), "«", pager.has_previous)
                });
                let ul = ul.children(pager.items.iter(), |item, li: Element<Li>| match item {
                    PageItem::Page(n) if *n == pager.page => li
                        .class("page-item active")
                        .attr("aria-current", "page")
                        .child::<Span, _>(|s| s.class("page-link").text(&n.to_string())),
                    PageItem::Page(n) => page_link(li, &links.page(*n), &n.to_string(), true),
                    PageItem::Ellipsis => page_link(li, "", "…", false),
                });
                ul.child::<Li, _>(|li| {
                    page_link(li, &links.page(pager.page.saturating_add(1)), "»", pager.has_next)
                })
            })
        })
        .render_to(&mut html);
    html
}
