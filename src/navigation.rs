/// The site's independently loaded pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Catalog,
    Detail,
    Assistant,
}

impl Page {
    /// Identifies the page from `location.pathname`; unknown files are `Home`.
    pub fn from_path(pathname: &str) -> Self {
        match current_file(pathname) {
            "thematiques.html" => Page::Catalog,
            "detail.html" => Page::Detail,
            "assistantAI.html" => Page::Assistant,
            _ => Page::Home,
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Catalog => "thematiques.html",
            Page::Detail => "detail.html",
            Page::Assistant => "assistantAI.html",
        }
    }

    /// How many catalog cards the page shows.
    pub fn gallery_limit(&self) -> usize {
        match self {
            Page::Catalog => 15,
            _ => 6,
        }
    }
}

/// Last path segment, `index.html` for the site root.
pub fn current_file(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(file) if !file.is_empty() => file,
        _ => "index.html",
    }
}

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink { href: "index.html", label: "Accueil" },
    NavLink { href: "thematiques.html", label: "Thématiques" },
    NavLink { href: "assistantAI.html", label: "Assistant IA" },
];

pub fn is_active_link(href: &str, pathname: &str) -> bool {
    href == current_file(pathname)
}

/// Mobile menu: open/closed, nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Any link activation closes the menu.
    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path(""), Page::Home);
        assert_eq!(Page::from_path("/site/thematiques.html"), Page::Catalog);
        assert_eq!(Page::from_path("/detail.html"), Page::Detail);
        assert_eq!(Page::from_path("/assistantAI.html"), Page::Assistant);
    }

    #[test]
    fn test_active_link() {
        assert!(is_active_link("index.html", "/"));
        assert!(is_active_link("thematiques.html", "/app/thematiques.html"));
        assert!(!is_active_link("index.html", "/detail.html"));
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let mut menu = MenuState::default();
        menu.toggle();
        assert!(menu.is_open());
        menu.close();
        assert!(!menu.is_open());
        menu.close();
        assert!(!menu.is_open());
    }
}
