//! `<head>` fragments and the sentinel slots they replace.
//!
//! The shared head template marks each slot with an empty meta tag, e.g.
//! `<meta name="open_graph">`. [`prepare_blueprint`] turns every sentinel
//! into a markup banner followed by a `${slot}` placeholder, ready for the
//! template engine.

use super::stylesheet::{GENERAL_STYLESHEET, page_stylesheet_block, stylesheet_link};
use super::template::Banner;

/// Favicon PNG advertised as the Open Graph image.
pub const OPEN_GRAPH_IMAGE: &str = "favicon-300x300.png";

const OPEN_GRAPH_IMAGE_SENTINEL: &str = "<meta property=\"open_graph_image\">";

const OPEN_GRAPH: &str = "    % url = request.environ['HTTP_HOST']
    <meta property=\"og:url\" content=\"http://{{url}}/\">
    <meta property=\"og:type\" content=\"website\">
    <meta property=\"og:title\" content=\"{{title}}\">
    <meta property=\"open_graph_image\">
    <meta property=\"og:description\" content=\"{{description}}\">";

const OPEN_GRAPH_IMAGE_TAGS: &str = "<meta property=\"og:image:type\" content=\"image/png\">
    <meta property=\"og:image:width\" content=\"300\">
    <meta property=\"og:image:height\" content=\"300\">
    <meta property=\"og:image:url\" content=\"http://{{url}}/favicon-300x300.png\">
    <meta property=\"og:image\" content=\"http://{{url}}/favicon-300x300.png\">";

/// Named slots of the shared head template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadSlot {
    FaviconResources,
    OpenGraph,
    StyleSheets,
}

impl HeadSlot {
    pub const ALL: [HeadSlot; 3] = [
        HeadSlot::FaviconResources,
        HeadSlot::OpenGraph,
        HeadSlot::StyleSheets,
    ];

    /// Placeholder and sentinel name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FaviconResources => "favicon_resources",
            Self::OpenGraph => "open_graph",
            Self::StyleSheets => "style_sheets",
        }
    }

    /// Banner label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FaviconResources => "Favicon Resources",
            Self::OpenGraph => "Open Graph",
            Self::StyleSheets => "Style Sheets",
        }
    }

    pub fn sentinel(self) -> String {
        format!("<meta name=\"{}\">", self.name())
    }

    fn replacement(self) -> String {
        format!("\n{}\n${{{}}}", Banner::Markup.marker(self.label()), self.name())
    }
}

/// Replace every slot sentinel with its banner marker and placeholder.
pub fn prepare_blueprint(head: &str) -> String {
    HeadSlot::ALL.iter().fold(head.to_string(), |text, slot| {
        text.replace(&slot.sentinel(), &slot.replacement())
    })
}

/// Open Graph tags, with image tags when the 300px favicon exists.
pub fn open_graph(has_image: bool) -> String {
    if has_image {
        OPEN_GRAPH.replace(OPEN_GRAPH_IMAGE_SENTINEL, OPEN_GRAPH_IMAGE_TAGS)
    } else {
        OPEN_GRAPH.to_string()
    }
}

/// Stylesheet links for the head.
///
/// `sheets` are base names of the persisted CSS files. The general sheet is
/// linked unconditionally first; every other sheet is linked only on the
/// view of the same name.
pub fn stylesheet_head<S: AsRef<str>>(sheets: &[S]) -> String {
    let mut lines = Vec::new();
    let pages: Vec<&str> = sheets
        .iter()
        .map(AsRef::as_ref)
        .filter(|sheet| *sheet != GENERAL_STYLESHEET)
        .collect();

    if sheets.iter().any(|sheet| sheet.as_ref() == GENERAL_STYLESHEET) {
        lines.push(stylesheet_link(&format!("{GENERAL_STYLESHEET}.css")));
    }
    if !pages.is_empty() {
        lines.push(page_stylesheet_block(&pages));
    }
    lines.join("\n")
}
