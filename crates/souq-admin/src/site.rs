//! Admin site configuration: name, URL prefix and the screens it serves.

use crate::screens::Resource;

/// Admin site listing the screens shown in the sidebar.
#[derive(Debug, Clone)]
pub struct AdminSite {
    /// Site name/title.
    pub name: String,
    /// URL prefix (default: "/admin").
    pub url_prefix: String,
    /// Screens in sidebar order.
    resources: Vec<Resource>,
}

impl Default for AdminSite {
    fn default() -> Self {
        Self::new("Souq Admin")
    }
}

impl AdminSite {
    /// Creates a site serving every screen.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_prefix: "/admin".to_string(),
            resources: Resource::ALL.to_vec(),
        }
    }

    /// Sets the URL prefix for the admin site.
    #[must_use]
    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    /// Restricts the site to the given screens.
    #[must_use]
    pub fn resources(mut self, resources: &[Resource]) -> Self {
        self.resources = resources.to_vec();
        self
    }

    /// Returns the screens in sidebar order.
    #[must_use]
    pub fn registered_resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Returns the home URL.
    #[must_use]
    pub fn home_url(&self) -> String {
        format!("{}/", self.url_prefix)
    }

    /// Returns the list URL of a screen.
    #[must_use]
    pub fn list_url(&self, resource: Resource) -> String {
        format!("{}/{}/", self.url_prefix, resource.slug())
    }

    /// Returns the sidebar entries as (title, url).
    #[must_use]
    pub fn model_list(&self) -> Vec<(String, String)> {
        self.resources
            .iter()
            .map(|r| (r.title().to_string(), self.list_url(*r)))
            .collect()
    }
}
