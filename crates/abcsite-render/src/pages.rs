//! Page content.
//!
//! Each function builds the [`Page`] for one route from already-resolved
//! values; none of them touch the clock or the filesystem.

use crate::embed::audio_embed;
use crate::html::{Fragment, escape_html};
use crate::layout::{LayoutError, Page};
use crate::release::{Download, ReleaseDownloads};
use crate::release_notes::{ReleaseNotes, changelog_fragments};

/// A page of the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Description and downloads.
    Home,
    /// Release history.
    Changelog,
    /// Contact details.
    Contact,
}

impl Route {
    /// All pages, in navigation order.
    pub const ALL: [Self; 3] = [Self::Home, Self::Changelog, Self::Contact];

    /// File name the page is served under.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Home => "index.php",
            Self::Changelog => "changelog.php",
            Self::Contact => "contact.php",
        }
    }

    /// Look up a page by file name.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.file_name() == name)
    }
}

/// Values computed for the home page at render time.
#[derive(Clone, Debug)]
pub struct HomeContent<'a> {
    /// Current version.
    pub version: &'a str,
    /// Download links and sizes.
    pub downloads: &'a ReleaseDownloads,
    /// Whether the release announcement is shown.
    pub show_banner: bool,
    /// Absolute site root URL for the audio preview.
    pub base_url: &'a str,
}

/// Audio clip previewed on the home page.
const PREVIEW_CLIP: (&str, &str) = ("herecomesthesun", "Here Comes the Sun");

/// Build the home page.
///
/// # Errors
///
/// Propagates [`LayoutError`] from page construction.
pub fn home(content: &HomeContent<'_>) -> Result<Page, LayoutError> {
    let version = escape_html(content.version);
    let mut body = vec![Fragment::markup(DESCRIPTION)];

    if content.show_banner {
        body.push(Fragment::markup(format!(
            "\n<p style=\"color: yellow;\">Version {version} is here. Take a look at the \n\
             <a href=\"changelog.php\">Release Notes</a> to see what's new.</p>\n"
        )));
    }

    let installer = &content.downloads.installer;
    let archive = &content.downloads.archive;
    body.push(Fragment::markup(format!(
        "\n<h2>Downloads</h2>\n\
         <p id=\"maindownload\">\n\
         <b>Recommended Download</b><br/>\n\
         <a class=\"dnld\" style=\"font-weight:bold;\" href=\"{}\">ABC Player v{version} \n\
         \tInstaller</a>{}<br />\n\
         <i>The installer will configure your computer to open .abc files using ABC Player.</i>\n\
         </p>\n\
         <p>\n\
         ABC Player requires <a class=\"dnld\" href=\"http://java.com/\">Java 7</a> or greater.  \n\
         You must have the 32-bit version of Java installed, even if you're running 64-bit Windows.\n\
         </p>\n\
         <p>\n\
         <b>Advanced Download</b><br/>\n\
         <a class=\"dnld\" href=\"{}\">{}</a>{}<br />\n\
         <i>All of the files needed to run ABC Player in a .zip, if you prefer not to use the installer, or\n\
         want to try running ABC Player on another operating system (like 64-bit Java, MacOS, or Linux). \n\
         ABC Player has not been tested to run on operating systems other than Windows, your mileage may vary.</i>\n\
         </p>\n",
        escape_html(&installer.path),
        size_suffix(installer),
        escape_html(&archive.path),
        escape_html(archive.file_name()),
        size_suffix(archive),
    )));

    body.push(Fragment::markup(HOW_TO_USE));
    body.push(Fragment::markup(format!(
        "\n<h2>Preview</h2>\n\
         <p>\n\
         <img src=\"images/abcplayer_{version}.png\" alt=\"Screenshot of ABC Player\"/>\n\
         </p>\n\
         <p>\n\
         This is what the song pictured above sounds like when played in ABC Player:\n\
         </p>\n"
    )));
    body.push(audio_embed(content.base_url, PREVIEW_CLIP.0, PREVIEW_CLIP.1));
    body.push(Fragment::markup(
        "<p>\n\
         If you want to try the song yourself, download <a class=\"dnld\" href=\"files/sun.abc\">sun.abc</a> \n\
         and either open it in ABC Player, or get 9 friends together and play it in LotRO.\n\
         </p>\n",
    ));

    Page::new(Route::Home.file_name(), body)
}

/// Size label preceded by a space, or nothing when unavailable.
fn size_suffix(download: &Download) -> String {
    download
        .size_label
        .as_ref()
        .map_or_else(String::new, |label| format!(" {label}"))
}

/// Build the change log page.
///
/// # Errors
///
/// Returns `LayoutError::EmptyBody` if `releases` is empty.
pub fn changelog(releases: &[ReleaseNotes]) -> Result<Page, LayoutError> {
    Ok(Page::new(Route::Changelog.file_name(), changelog_fragments(releases))?
        .with_title("Release Notes"))
}

/// Build the contact page.
///
/// # Errors
///
/// Propagates [`LayoutError`] from page construction.
pub fn contact() -> Result<Page, LayoutError> {
    Ok(
        Page::new(Route::Contact.file_name(), vec![Fragment::markup(CONTACT)])?
            .with_title("Contact"),
    )
}

const DESCRIPTION: &str = "
<h2>Description</h2>
<p>
Use ABC Player to listen to .abc files as they would sound in
<a href=\"http://www.lotro.com/\">The Lord of the Rings Online</a>'s
<a href=\"http://lotro-wiki.com/index.php/Music\">player music system</a>.
ABC Player is especially useful for previewing songs with multiple parts, to see how the parts
sound with each other without having to get your band together in game.
</p>
";

const HOW_TO_USE: &str = "
<h2>How to use</h2>
<p>
Double-click on an .abc file in Windows Explorer to play it.  You can also drag and drop an .abc
file onto the player, or use File &gt; Open.
</p>
<p>
If you have a multi-part song separated into multiple files, drag and drop all of the
files in the song onto the player to open them as a single song.
</p>
<p>
You can paste ABC songs that you've copied out of a forum post or website (for example).
Use Ctrl+V to paste a new song, or Ctrl+Shift+V to add the contents of the clipboard
as a new part of the current song.  The latter is useful when pasting a multi-part song from
<a href=\"http://www.thefatlute.com/\">The Fat Lute</a>.
</p>
<p>
You can export the song to a .wav (uncompressed audio) file using File &gt; Save as Wave file.  You can then
use a program like <a href=\"http://lame.sourceforge.net/\">LAME</a> to convert the .wav file to .mp3.
</p>
";

const CONTACT: &str = "
<h2>Contact Me</h2>
<p>
ABC Player for the Lord of the Rings Online was created by Digero of the Landroval server.
</p>
<p>
Here are the various ways you can contact me (in order of preference):
</p>
<ul>
\t<li>Post in the <a class=\"contact\" href=\"http://forums.lotro.com/showthread.php?t=344226\">ABC Player thread</a> on the Lord of the Rings Online forums.</li>
\t<li>Send me a <a class=\"contact\" href=\"http://forums.lotro.com/private.php?do=newpm&amp;u=500355\">private message</a> on the Lord of the Rings Online forums.</li>
</ul>

<h2>Other Projects</h2>
<p>
You may be interested in some of the other projects I've worked on:
</p>
<ul>
\t<li><a class=\"contact\" href=\"http://code.google.com/p/lotromidiplayer/\">LotRO MIDI Player</a></li>
\t<li><a class=\"contact\" href=\"http://forums.lotro.com/showthread.php?t=340450\">Improve the list of Lottery winnings on my.lotro.com</a></li>
\t<li><a class=\"contact\" href=\"http://decal.acasylum.com/\">Digero's Decal Plugins</a> for <a href=\"http://ac.turbine.com/\">Asheron's Call</a></li>
</ul>
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Download;

    fn downloads(installer: Option<&str>, archive: Option<&str>) -> ReleaseDownloads {
        ReleaseDownloads {
            installer: Download {
                path: "installer/AbcPlayer_1.3.0.msi".to_owned(),
                size_label: installer.map(str::to_owned),
            },
            archive: Download {
                path: "installer/AbcPlayer_1.3.0.zip".to_owned(),
                size_label: archive.map(str::to_owned),
            },
        }
    }

    fn home_html(downloads: &ReleaseDownloads, show_banner: bool) -> String {
        let page = home(&HomeContent {
            version: "1.3.0",
            downloads,
            show_banner,
            base_url: "http://example.com",
        })
        .unwrap();
        page.body().iter().map(Fragment::as_str).collect()
    }

    #[test]
    fn test_route_file_names_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_file_name(route.file_name()), Some(route));
        }
        assert_eq!(Route::from_file_name("about.php"), None);
    }

    #[test]
    fn test_home_download_sizes() {
        let html = home_html(&downloads(Some("1.5MB"), Some("2.0MB")), false);

        assert!(html.contains("href=\"installer/AbcPlayer_1.3.0.msi\">ABC Player v1.3.0 \n\tInstaller</a> 1.5MB<br />"));
        assert!(html.contains(">AbcPlayer_1.3.0.zip</a> 2.0MB<br />"));
    }

    #[test]
    fn test_home_missing_sizes_omitted() {
        let html = home_html(&downloads(None, None), false);

        assert!(html.contains("Installer</a><br />"));
        assert!(html.contains(">AbcPlayer_1.3.0.zip</a><br />"));
        assert!(!html.contains("MB<br />"));
    }

    #[test]
    fn test_home_banner_toggle() {
        let with = home_html(&downloads(None, None), true);
        assert!(with.contains("Version 1.3.0 is here."));

        let without = home_html(&downloads(None, None), false);
        assert!(!without.contains("is here."));
        assert!(!without.contains("color: yellow"));
    }

    #[test]
    fn test_home_has_audio_preview() {
        let html = home_html(&downloads(None, None), false);
        assert!(html.contains("AudioPlayer.embed('herecomesthesun'"));
        assert!(html.contains("title='Here Comes the Sun'"));
    }

    #[test]
    fn test_changelog_title_and_route() {
        let page = changelog(&ReleaseNotes::bundled().unwrap()).unwrap();
        assert_eq!(page.route(), "changelog.php");
        assert_eq!(page.title(), Some("Release Notes"));
    }

    #[test]
    fn test_changelog_requires_releases() {
        assert!(matches!(changelog(&[]), Err(LayoutError::EmptyBody(_))));
    }

    #[test]
    fn test_contact_page() {
        let page = contact().unwrap();
        assert_eq!(page.route(), "contact.php");
        assert_eq!(page.title(), Some("Contact"));
        assert!(page.body()[0].as_str().contains("<h2>Contact Me</h2>"));
    }
}
