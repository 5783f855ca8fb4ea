#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub id: String,
    pub href: String,
    active: bool,
}

impl NavLink {
    pub fn new(id: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn matches_path(&self, path: &str) -> bool {
        let page = path.rsplit('/').next().unwrap_or_default();

        ((path == "/" || path == "/index.html") && self.href == "/")
            || (path == "/driver" && self.href == "/driver")
            || (page == "index.html" && self.id == "business-link")
            || ((page == "driver.html" || page == "drivers.html") && self.id == "drivers-link")
    }
}

/// Header links; at most one carries `active-link`.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    links: Vec<NavLink>,
}

impl NavBar {
    pub const ACTIVE_CLASS: &'static str = "active-link";

    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn active_link(&self) -> Option<&NavLink> {
        self.links.iter().find(|link| link.active)
    }

    /// Highlight the link for the page at `path`. Pages without a matching
    /// link end up with no active link.
    pub fn highlight_for_path(&mut self, path: &str) -> Option<&NavLink> {
        for link in &mut self.links {
            link.active = false;
        }
        if let Some(link) = self.links.iter_mut().find(|link| link.matches_path(path)) {
            link.active = true;
        }
        self.active_link()
    }

    pub fn click(&mut self, link_id: &str) -> bool {
        if !self.links.iter().any(|link| link.id == link_id) {
            return false;
        }
        for link in &mut self.links {
            link.active = link.id == link_id;
        }
        tracing::debug!("Active link is now: {}", link_id);
        true
    }
}

/// Fragment id for in-page anchors (`#section`); bare `#` has no target.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
