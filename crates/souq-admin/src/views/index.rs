//! Admin dashboard view.

use ironhtml::typed::Element;
use ironhtml_elements::{Div, A, H5, I, P};

use crate::site::AdminSite;

use super::render_admin_page;

/// Renders the admin dashboard with one card per screen.
#[must_use]
pub fn index_view(site: &AdminSite) -> String {
    let resources = site.registered_resources();

    let content = if resources.is_empty() {
        Element::<Div>::new()
            .class("alert alert-info")
            .child::<I, _>(|i| i.class("bi bi-info-circle ms-2"))
            .text("No screens are enabled for this site.")
            .render()
    } else {
        let mut cards_html = String::new();
        for resource in resources {
            let list_url = site.list_url(*resource);
            let manage_text = format!("Browse and search {}", resource.title().to_lowercase());

            Element::<Div>::new()
                .class("col-md-4 col-lg-3 mb-4")
                .child::<Div, _>(|card| {
                    card.class("card h-100")
                        .child::<Div, _>(|cb| {
                            cb.class("card-body")
                                .child::<H5, _>(|h| {
                                    h.class("card-title")
                                        .child::<I, _>(|i| i.class("bi bi-table ms-2"))
                                        .text(resource.title())
                                })
                                .child::<P, _>(|p| {
                                    p.class("card-text text-muted").text(&manage_text)
                                })
                        })
                        .child::<Div, _>(|cf| {
                            cf.class("card-footer bg-transparent").child::<A, _>(|a| {
                                a.attr("href", &list_url)
                                    .class("btn btn-outline-success btn-sm")
                                    .child::<I, _>(|i| i.class("bi bi-list ms-1"))
                                    .text("View")
                            })
                        })
                })
                .render_to(&mut cards_html);
        }

        Element::<Div>::new()
            .class("row")
            .raw(&cards_html)
            .render()
    };

    let breadcrumbs = vec![("Home".to_string(), None)];

    render_admin_page(
        site,
        "Dashboard",
        Some(site.home_url()),
        content,
        breadcrumbs,
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_view_lists_screens() {
        let site = AdminSite::new("Test Admin");
        let body = index_view(&site);
        assert!(body.contains("/admin/category-features/"));
        assert!(body.contains("Browse and search advertisings"));
    }

    #[test]
    fn test_index_view_empty() {
        let site = AdminSite::new("Test Admin").resources(&[]);
        let body = index_view(&site);
        assert!(body.contains("No screens are enabled"));
    }
}
