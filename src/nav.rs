//! Navigation chrome: which links the header shows on which route.

/// Routes that belong to the signed-in part of the site.
pub const APP_ROUTES: &[&str] = &[
    "/dashboard",
    "/report",
    "/my-reports",
    "/green-actions",
    "/profile",
];

/// Routes rendered without the header.
const BARE_ROUTES: &[&str] = &["/login", "/signup"];

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavBar {
    pub visible: bool,
    pub authenticated: bool,
    pub links: Vec<NavLink>,
}

fn under(path: &str, route: &str) -> bool {
    path == route
        || path
            .strip_prefix(route)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn is_app_route(path: &str) -> bool {
    APP_ROUTES.iter().any(|route| under(path, route))
}

impl NavBar {
    /// The authenticated link set is used only when a token is stored and
    /// the route is part of the app; everywhere else the public set shows.
    pub fn for_route(path: &str, has_token: bool) -> Self {
        let authenticated = has_token && is_app_route(path);
        let entries: &[(&'static str, &'static str)] = if authenticated {
            &[
                ("/dashboard", "Dashboard"),
                ("/report", "Report"),
                ("/my-reports", "My Reports"),
                ("/green-actions", "Green Actions"),
                ("/profile", "Profile"),
            ]
        } else {
            &[
                ("/", "Home"),
                ("/about", "About"),
                ("/contact", "Contact"),
                ("/login", "Join Now"),
            ]
        };

        let links = entries
            .iter()
            .map(|&(href, label)| NavLink {
                href,
                label,
                active: if href == "/" { path == "/" } else { under(path, href) },
            })
            .collect();

        Self {
            visible: !BARE_ROUTES.contains(&path),
            authenticated,
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(nav: &NavBar) -> Vec<&str> {
        nav.links.iter().map(|l| l.label).collect()
    }

    #[test]
    fn signed_in_app_route_shows_app_links() {
        let nav = NavBar::for_route("/my-reports", true);
        assert!(nav.authenticated);
        assert_eq!(
            labels(&nav),
            vec!["Dashboard", "Report", "My Reports", "Green Actions", "Profile"]
        );
        assert!(nav.links[2].active);
        assert!(!nav.links[1].active);
    }

    #[test]
    fn nested_app_paths_count_as_app_routes() {
        assert!(is_app_route("/dashboard/reports/4/edit"));
        assert!(!is_app_route("/reporting"));
        assert!(!is_app_route("/"));
    }

    #[test]
    fn public_route_shows_public_links_even_with_token() {
        let nav = NavBar::for_route("/about", true);
        assert!(!nav.authenticated);
        assert_eq!(labels(&nav), vec!["Home", "About", "Contact", "Join Now"]);
    }

    #[test]
    fn app_route_without_token_shows_public_links() {
        assert!(!NavBar::for_route("/dashboard", false).authenticated);
    }

    #[test]
    fn auth_pages_hide_the_header() {
        assert!(!NavBar::for_route("/login", false).visible);
        assert!(!NavBar::for_route("/signup", false).visible);
        assert!(NavBar::for_route("/", false).visible);
    }
}
