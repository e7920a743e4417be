//! Page composition for the ABC Player website.
//!
//! This crate provides:
//! - [`Site`]: renders any [`Route`] to a complete HTML document
//! - [`Layout`] and [`Page`]: the shared site chrome and its typed content slots
//! - [`Release`]: download links with size labels computed from the artifacts on disk
//! - [`PromoBanner`] and [`Clock`]: the time-limited release announcement
//!
//! Rendering is a pure function of its inputs: the route, the base URL, the
//! injected clock reading and the artifact sizes. Nothing is retained between
//! renders.

mod banner;
mod clock;
mod embed;
mod html;
mod layout;
mod navigation;
mod pages;
mod release;
mod release_notes;
mod site;

pub use banner::{CUTOFF_FORMAT, PromoBanner, parse_cutoff};
pub use clock::{Clock, FixedClock, SystemClock};
pub use embed::audio_embed;
pub use html::{Fragment, escape_html};
pub use layout::{Layout, LayoutError, Page, SITE_NAME};
pub use navigation::{NAVIGATION, NavEntry, NavLink, navigation};
pub use pages::{HomeContent, Route};
pub use release::{ArtifactSizes, Download, FsArtifacts, Release, ReleaseDownloads, format_size};
pub use release_notes::ReleaseNotes;
pub use site::{RenderError, Site, SiteConfig};
