//! Release history for the change log page.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::html::{Fragment, escape_html};

/// Release history bundled with the site, newest first.
const BUNDLED: &str = include_str!("../content/release_notes.toml");

#[derive(Deserialize)]
struct ReleaseNotesFile {
    release: Vec<ReleaseNotes>,
}

/// Notes for one released version.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ReleaseNotes {
    /// Version string.
    pub version: String,
    /// Release date.
    pub date: NaiveDate,
    /// New features (HTML markup).
    #[serde(default)]
    pub features: Vec<String>,
    /// Bug fixes (HTML markup).
    #[serde(default)]
    pub fixes: Vec<String>,
    /// Uncategorized notes (HTML markup).
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ReleaseNotes {
    /// Load the bundled release history.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the bundled file is malformed.
    pub fn bundled() -> Result<Vec<Self>, toml::de::Error> {
        Self::parse(BUNDLED)
    }

    /// Parse release history from TOML `[[release]]` tables, newest first.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if `content` is malformed.
    pub fn parse(content: &str) -> Result<Vec<Self>, toml::de::Error> {
        let mut file: ReleaseNotesFile = toml::from_str(content)?;
        file.release.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(file.release)
    }

    /// Render this release's section.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = format!(
            "<h2>Version {}</h2>\n<i>{}</i>\n",
            escape_html(&self.version),
            self.date.format("%B %-d, %Y")
        );
        write_list(None, &self.notes, &mut out);
        write_list(Some("New Features"), &self.features, &mut out);
        write_list(Some("Bug Fixes"), &self.fixes, &mut out);
        out
    }
}

fn write_list(heading: Option<&str>, items: &[String], out: &mut String) {
    if items.is_empty() {
        return;
    }
    if let Some(heading) = heading {
        out.push_str(&format!("<h3>{heading}</h3>\n"));
    }
    out.push_str("<ul>\n");
    for item in items {
        out.push_str(&format!("<li>{item}</li>\n"));
    }
    out.push_str("</ul>\n");
}

/// Body fragments for the change log, newest release first, sections
/// separated by rules.
#[must_use]
pub fn changelog_fragments(releases: &[ReleaseNotes]) -> Vec<Fragment> {
    let mut ordered: Vec<&ReleaseNotes> = releases.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let mut fragments = Vec::with_capacity(releases.len() * 2);
    for (i, release) in ordered.into_iter().enumerate() {
        if i > 0 {
            fragments.push(Fragment::markup("<hr/>\n"));
        }
        fragments.push(Fragment::markup(release.to_html()));
    }
    fragments
}
