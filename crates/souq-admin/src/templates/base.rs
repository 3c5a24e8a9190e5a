//! Base layout template (right-to-left).

use ironhtml::html;
use ironhtml::typed::{Document, Element};
use ironhtml_elements::{Body, Div, Head, Html, Li, Link, Meta, Nav, Ol, Script, Style, Title, Ul, H5, I};

/// Context for rendering the admin layout.
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// Site title.
    pub site_title: String,
    /// Document language.
    pub lang: String,
    /// Sidebar entries (name, url).
    pub models: Vec<(String, String)>,
    /// URL of the active sidebar entry.
    pub active_url: Option<String>,
    /// Breadcrumbs (label, url).
    pub breadcrumbs: Vec<(String, Option<String>)>,
    /// Page title.
    pub page_title: String,
    /// Main content HTML.
    pub content: String,
    /// Flash messages (type, message).
    pub messages: Vec<(String, String)>,
}

impl Default for AdminContext {
    fn default() -> Self {
        Self {
            site_title: "Souq Admin".to_string(),
            lang: "ar".to_string(),
            models: Vec::new(),
            active_url: None,
            breadcrumbs: vec![("Home".to_string(), Some("/admin/".to_string()))],
            page_title: "Dashboard".to_string(),
            content: String::new(),
            messages: Vec::new(),
        }
    }
}

const CSS: &str = "\
:root { --sidebar-width: 260px; }\n\
body { min-height: 100vh; }\n\
.sidebar { position: fixed; top: 0; right: 0; bottom: 0; \
width: var(--sidebar-width); background-color: #212529; \
z-index: 1000; overflow-y: auto; }\n\
.sidebar .nav-link { color: rgba(255,255,255,0.75); padding: 0.75rem 1rem; }\n\
.sidebar .nav-link:hover { color: #fff; background-color: rgba(255,255,255,0.1); }\n\
.sidebar .nav-link.active { color: #fff; background-color: #198754; }\n\
.sidebar-header { padding: 1rem; background-color: #198754; color: white; }\n\
.sidebar-header h5 { margin: 0; font-weight: 600; }\n\
.main-content { margin-right: var(--sidebar-width); min-height: 100vh; }\n\
.content-wrapper { padding: 1.5rem; }\n\
.data-table th a { color: inherit; text-decoration: none; }\n\
.data-table tbody tr[data-row-key] { cursor: pointer; }\n\
@media (max-width: 768px) {\n\
  .sidebar { transform: translateX(100%); transition: transform 0.3s ease; }\n\
  .sidebar.show { transform: translateX(0); }\n\
  .main-content { margin-right: 0; }\n\
}";

const JS: &str = "\
document.querySelectorAll('.per-page-select').forEach(select=>{\
select.addEventListener('change',function(){this.form.submit();});});\
document.querySelectorAll('.data-table tbody tr[data-href]').forEach(row=>{\
row.addEventListener('click',function(){window.location=this.dataset.href;});});";

/// Renders the base admin layout.
#[must_use]
pub fn render_base(ctx: &AdminContext) -> String {
    let title_str = format!("{} | {}", ctx.page_title, ctx.site_title);

    Document::new()
        .doctype()
        .root::<Html, _>(|html_el| {
            html_el
                .attr("lang", &ctx.lang)
                .attr("dir", "rtl")
                .child::<Head, _>(|head| {
                    head.child::<Meta, _>(|m| m.attr("charset", "UTF-8"))
                        .child::<Meta, _>(|m| {
                            m.attr("name", "viewport")
                                .attr("content", "width=device-width, initial-scale=1.0")
                        })
                        .child::<Title, _>(|t| t.text(&title_str))
                        .child::<Link, _>(|l| {
                            l.attr("href", "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.rtl.min.css")
                                .attr("rel", "stylesheet")
                        })
                        .child::<Link, _>(|l| {
                            l.attr("href", "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.1/font/bootstrap-icons.css")
                                .attr("rel", "stylesheet")
                        })
                        .child::<Style, _>(|s| s.raw(CSS))
                })
                .child::<Body, _>(|body| {
                    body.child::<Nav, _>(|nav| render_sidebar(nav, ctx))
                        .child::<Div, _>(|main| {
                            main.class("main-content")
                                .child::<Nav, _>(|n| render_topbar(n, ctx))
                                .child::<Div, _>(|cw| {
                                    let cw = render_messages_into(cw.class("content-wrapper"), &ctx.messages);
                                    let pt = &ctx.page_title;
                                    let title_el = html! {
                                        h2.class("mb-4") {
                                            #pt
                                        }
                                    };
                                    cw.raw(title_el.render()).raw(&ctx.content)
                                })
                        })
                        .child::<Script, _>(|s| {
                            s.attr("src", "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js")
                        })
                        .child::<Script, _>(|s| s.raw(JS))
                })
        })
        .build()
}

fn render_sidebar(nav: Element<Nav>, ctx: &AdminContext) -> Element<Nav> {
    let site = &ctx.site_title;

    nav.class("sidebar")
        .child::<Div, _>(|d| {
            d.class("sidebar-header").child::<H5, _>(|h| {
                h.child::<I, _>(|i| i.class("bi bi-shop ms-2")).text(site)
            })
        })
        .child::<Ul, _>(|ul| {
            ul.class("nav flex-column")
                .children(ctx.models.iter(), |item, li: Element<Li>| {
                    let (name, url) = item;
                    let class = if ctx.active_url.as_deref() == Some(url.as_str()) {
                        "nav-link active"
                    } else {
                        "nav-link"
                    };
                    let link = html! {
                        a.class(#class).href(#url) {
                            i.class("bi bi-table ms-2")
                            #name
                        }
                    };
                    li.class("nav-item").raw(link.render())
                })
        })
}

fn render_topbar(nav: Element<Nav>, ctx: &AdminContext) -> Element<Nav> {
    let toggle_btn = html! {
        button.class("btn btn-link d-md-none")
            .type_("button")
            .onclick(
                "document.querySelector('.sidebar')\
                 .classList.toggle('show')"
            ) {
            i.class("bi bi-list fs-4")
        }
    };

    nav.class("navbar navbar-expand-lg navbar-light bg-white border-bottom px-4")
        .child::<Div, _>(|d| {
            d.class("container-fluid")
                .child::<Div, _>(|d| d.raw(toggle_btn.render()))
                .child::<Nav, _>(|n| render_breadcrumbs(n, &ctx.breadcrumbs))
        })
}

fn render_breadcrumbs(nav: Element<Nav>, breadcrumbs: &[(String, Option<String>)]) -> Element<Nav> {
    let last_idx = breadcrumbs.len().saturating_sub(1);
    nav.attr("aria-label", "breadcrumb").child::<Ol, _>(|ol| {
        let mut ol = ol.class("breadcrumb mb-0");
        for (i, (label, url)) in breadcrumbs.iter().enumerate() {
            let is_last = i == last_idx;
            ol = ol.child::<Li, _>(|li| match url {
                Some(u) if !is_last => {
                    let link = html! {
                        a.href(#u) { #label }
                    };
                    li.class("breadcrumb-item").raw(link.render())
                }
                _ if is_last => li
                    .class("breadcrumb-item active")
                    .attr("aria-current", "page")
                    .text(label.as_str()),
                _ => li.class("breadcrumb-item").text(label.as_str()),
            });
        }
        ol
    })
}

fn render_messages_into(wrapper: Element<Div>, messages: &[(String, String)]) -> Element<Div> {
    let mut w = wrapper;
    for (msg_type, msg) in messages {
        let alert_class = match msg_type.as_str() {
            "success" => "alert-success",
            "error" => "alert-danger",
            "warning" => "alert-warning",
            _ => "alert-info",
        };
        let class = format!("alert {alert_class} alert-dismissible fade show");
        let dismiss = html! {
            button.type_("button").class("btn-close")
                .data_bs_dismiss("alert")
        };
        w = w.child::<Div, _>(|d| {
            d.class(&class)
                .attr("role", "alert")
                .text(msg.as_str())
                .raw(dismiss.render())
        });
    }
    w
}
