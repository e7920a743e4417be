//! Sidebar navigation.

/// A sidebar link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Link target (route file name).
    pub target: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Sidebar entries, in display order.
pub const NAVIGATION: [NavEntry; 3] = [
    NavEntry {
        target: "index.php",
        label: "Home",
    },
    NavEntry {
        target: "changelog.php",
        label: "Change Log",
    },
    NavEntry {
        target: "contact.php",
        label: "Contact Me",
    },
];

/// A navigation entry resolved against the current route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// The underlying entry.
    pub entry: NavEntry,
    /// Whether the entry is the current route.
    pub active: bool,
}

/// Resolve the sidebar for `route`.
///
/// An entry is active only when its target equals `route` exactly.
#[must_use]
pub fn navigation(route: &str) -> Vec<NavLink> {
    NAVIGATION
        .iter()
        .map(|entry| NavLink {
            entry: *entry,
            active: entry.target == route,
        })
        .collect()
}

/// Write the sidebar links for `route`.
pub(crate) fn write_navigation(route: &str, out: &mut String) {
    for link in navigation(route) {
        out.push_str("\t\t<a ");
        if link.active {
            out.push_str("class=\"active\" ");
        }
        out.push_str(&format!(
            "href=\"{}\">{}</a>\n",
            link.entry.target, link.entry.label
        ));
    }
}
