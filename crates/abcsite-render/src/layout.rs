//! Shared page layout.
//!
//! [`Layout::render`] wraps a [`Page`] in the site chrome: document head,
//! banner header, sidebar navigation with the donate button, and the closing
//! footer. Everything the chrome needs arrives as an argument; two renders
//! of the same page through the same layout are byte-identical.

use crate::embed::{audio_player_setup, donate_form};
use crate::html::{Fragment, escape_html};
use crate::navigation::write_navigation;

/// Site name, used as the document title.
pub const SITE_NAME: &str = "ABC Player";

const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \
                       \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">";

/// Error returned when a page can't be constructed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Route is empty or contains a path separator.
    #[error("Invalid route: {0:?}")]
    InvalidRoute(String),
    /// Page has no body content.
    #[error("Page {0:?} has no body fragments")]
    EmptyBody(String),
}

/// A page ready for layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    route: String,
    title: Option<String>,
    body: Vec<Fragment>,
}

impl Page {
    /// Create a page for `route` with the given body.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidRoute` if `route` is empty or contains `/`,
    /// and `LayoutError::EmptyBody` if `body` is empty.
    pub fn new(route: impl Into<String>, body: Vec<Fragment>) -> Result<Self, LayoutError> {
        let route = route.into();
        if route.is_empty() || route.contains('/') {
            return Err(LayoutError::InvalidRoute(route));
        }
        if body.is_empty() {
            return Err(LayoutError::EmptyBody(route));
        }
        Ok(Self {
            route,
            title: None,
            body,
        })
    }

    /// Set the title shown after the site name.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Route file name (e.g. "index.php").
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Title override.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Body fragments in order.
    #[must_use]
    pub fn body(&self) -> &[Fragment] {
        &self.body
    }
}

/// Site chrome shared by every page.
#[derive(Clone, Debug)]
pub struct Layout {
    base_url: String,
    donate_button_id: Option<String>,
}

impl Layout {
    /// Create a layout.
    ///
    /// `base_url` is the absolute URL of the site root (no trailing slash),
    /// used for the audio player's assets.
    #[must_use]
    pub fn new(base_url: impl Into<String>, donate_button_id: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            donate_button_id,
        }
    }

    /// Absolute site root URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render `page` into a complete HTML document.
    #[must_use]
    pub fn render(&self, page: &Page) -> String {
        let body_len: usize = page.body.iter().map(|f| f.as_str().len()).sum();
        let mut out = String::with_capacity(body_len + 4096);

        self.write_header(page, &mut out);
        for fragment in &page.body {
            out.push_str(fragment.as_str());
        }
        write_footer(&mut out);

        out
    }

    fn write_header(&self, page: &Page, out: &mut String) {
        let title = match &page.title {
            Some(title) => format!("{SITE_NAME} - {}", escape_html(title)),
            None => SITE_NAME.to_owned(),
        };

        out.push_str(DOCTYPE);
        out.push_str("\n<html>\n\n<head>\n");
        out.push_str(&format!("<title>{title}</title>\n\n"));
        out.push_str(
            "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\n\
             <link rel=\"stylesheet\" href=\"abcplayer.css\" type=\"text/css\" />\n\
             <link rel=\"icon\" type=\"image/vnd.microsoft.icon\" href=\"abcplayer.ico\" />\n\n",
        );
        out.push_str(&audio_player_setup(&self.base_url));
        out.push_str(
            "</head>\n\n<body>\n<div id=\"page\">\n\
             \t<div id=\"header\">\n\
             \t\t<img id=\"headericon\" src=\"images/abcplayer_96.png\" alt=\"\" />\n\
             \t\t<h1><a href=\"index.php\">ABC Player</a></h1>\n\
             \t\t<div class=\"description\">for <span style=\"font-style: italic;\">The Lord of the Rings Online</span></div>\n\
             \t</div>\n\n\
             \t<div id=\"mainarea\">\n\
             \t<div id=\"sidebar\">\n\
             \t\t<div id=\"sidebarnav\">\n",
        );
        write_navigation(&page.route, out);
        out.push_str("\t\t</div>\n");
        if let Some(button_id) = &self.donate_button_id {
            out.push_str(&donate_form(button_id));
        }
        out.push_str("\t</div>\n\n\t<div id=\"contentarea\">\n");
    }
}

fn write_footer(out: &mut String) {
    out.push_str(
        "\n\t</div>\n\
         \t</div>\n\
         \t<div id=\"footer\">ABC Player for The Lord of the Rings Online</div>\n\
         </div>\n\
         </body>\n\
         </html>\n",
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(route: &str, body: &[&str]) -> Page {
        Page::new(route, body.iter().map(|s| Fragment::markup(*s)).collect()).unwrap()
    }

    fn layout() -> Layout {
        Layout::new("http://example.com/", Some("KPX5YZW5SALAG".to_owned()))
    }

    #[test]
    fn test_page_rejects_empty_route() {
        let err = Page::new("", vec![Fragment::markup("x")]).unwrap_err();
        assert_eq!(err, LayoutError::InvalidRoute(String::new()));
    }

    #[test]
    fn test_page_rejects_route_with_slash() {
        let err = Page::new("a/b.php", vec![Fragment::markup("x")]).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRoute(_)));
    }

    #[test]
    fn test_page_rejects_empty_body() {
        let err = Page::new("index.php", Vec::new()).unwrap_err();
        assert_eq!(err, LayoutError::EmptyBody("index.php".to_owned()));
    }

    #[test]
    fn test_render_wraps_body_in_order() {
        let html = layout().render(&page("index.php", &["<p>one</p>", "<p>two</p>"]));

        let header_end = html.find("<div id=\"contentarea\">").unwrap();
        let one = html.find("<p>one</p>").unwrap();
        let two = html.find("<p>two</p>").unwrap();
        let footer = html.find("<div id=\"footer\">").unwrap();

        assert!(header_end < one && one < two && two < footer);
        assert!(html.starts_with("<!DOCTYPE html PUBLIC"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let layout = layout();
        let page = page("changelog.php", &["<h2>Version 1.3.0</h2>"]);
        assert_eq!(layout.render(&page), layout.render(&page));
    }

    #[test]
    fn test_render_title() {
        let plain = layout().render(&page("index.php", &["x"]));
        assert!(plain.contains("<title>ABC Player</title>"));

        let titled = layout().render(&page("contact.php", &["x"]).with_title("Contact"));
        assert!(titled.contains("<title>ABC Player - Contact</title>"));
    }

    #[test]
    fn test_render_escapes_title() {
        let html = layout().render(&page("contact.php", &["x"]).with_title("</title>"));
        assert!(html.contains("<title>ABC Player - &lt;/title&gt;</title>"));
    }

    #[test]
    fn test_render_single_active_entry() {
        let html = layout().render(&page("contact.php", &["x"]));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
        assert!(html.contains("<a class=\"active\" href=\"contact.php\">Contact Me</a>"));
    }

    #[test]
    fn test_render_unknown_route_has_no_active_entry() {
        let html = layout().render(&page("about.php", &["x"]));
        assert_eq!(html.matches("class=\"active\"").count(), 0);
    }

    #[test]
    fn test_render_structure_survives_hostile_body() {
        let html = layout().render(&page(
            "index.php",
            &["</html>", "<p>after</p></body><html><body>"],
        ));

        assert_eq!(html.matches("<html").count(), 1);
        assert_eq!(html.matches("</html>").count(), 1);
        assert_eq!(html.matches("<body").count(), 1);
        assert_eq!(html.matches("</body>").count(), 1);
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_render_donate_form_optional() {
        let with = layout().render(&page("index.php", &["x"]));
        assert!(with.contains("hosted_button_id"));

        let without = Layout::new("http://example.com", None).render(&page("index.php", &["x"]));
        assert!(!without.contains("hosted_button_id"));
        assert!(!without.contains("id=\"donate\""));
    }

    #[test]
    fn test_layout_trims_trailing_slash() {
        assert_eq!(layout().base_url(), "http://example.com");
        let html = layout().render(&page("index.php", &["x"]));
        assert!(html.contains("\"http://example.com/mp3/player.swf\""));
    }

    #[test]
    fn test_navigation_identical_across_routes() {
        fn nav_block(html: &str) -> String {
            let start = html.find("<div id=\"sidebarnav\">").unwrap();
            let end = start + html[start..].find("</div>").unwrap();
            html[start..end].replace("class=\"active\" ", "")
        }

        let layout = layout();
        let home = layout.render(&page("index.php", &["x"]));
        let notes = layout.render(&page("changelog.php", &["x"]));
        assert_eq!(nav_block(&home), nav_block(&notes));
    }
}
