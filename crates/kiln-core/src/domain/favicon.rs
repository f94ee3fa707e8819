//! Favicon resolution tables and the head markup derived from them.

/// Resolutions packed into `favicon.ico`.
pub const ICO_RESOLUTIONS: &[u32] = &[16, 24, 32, 48, 64, 128, 256];
/// Standalone generic favicon PNGs.
pub const FAVICON_RESOLUTIONS: &[u32] = &[16, 32, 96, 160, 196, 300];
pub const ANDROID_RESOLUTIONS: &[u32] = &[192];
pub const APPLE_RESOLUTIONS: &[u32] = &[57, 76, 120, 152, 180];

pub const ICO_FILE: &str = "favicon.ico";
/// Standalone copy of the generated head markup.
pub const HEAD_FILE: &str = "head.html";

/// Icon family; each has its own file naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Favicon,
    Android,
    Apple,
    /// Named but never rendered or linked.
    ApplePrecomposed,
}

impl Flavor {
    pub fn file_name(self, resolution: u32) -> String {
        let r = resolution;
        match self {
            Self::Favicon => format!("favicon-{r}x{r}.png"),
            Self::Android => format!("touch-icon-{r}x{r}.png"),
            Self::Apple => format!("apple-touch-icon-{r}x{r}.png"),
            Self::ApplePrecomposed => format!("apple-touch-icon-{r}x{r}-precomposed.png"),
        }
    }
}

/// One PNG the rasterizer must produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub flavor: Flavor,
    pub resolution: u32,
    pub file_name: String,
}

impl Raster {
    fn new(flavor: Flavor, resolution: u32) -> Self {
        Self {
            flavor,
            resolution,
            file_name: flavor.file_name(resolution),
        }
    }
}

/// Every PNG to rasterize, each file once.
///
/// Generic favicons cover both the ICO and standalone tables.
pub fn raster_plan() -> Vec<Raster> {
    let mut plan: Vec<Raster> = Vec::new();
    let generic = ICO_RESOLUTIONS.iter().chain(FAVICON_RESOLUTIONS);
    for &res in generic {
        if !plan.iter().any(|r| r.resolution == res) {
            plan.push(Raster::new(Flavor::Favicon, res));
        }
    }
    plan.extend(ANDROID_RESOLUTIONS.iter().map(|&r| Raster::new(Flavor::Android, r)));
    plan.extend(APPLE_RESOLUTIONS.iter().map(|&r| Raster::new(Flavor::Apple, r)));
    plan
}

/// PNG file names packed into the ICO, in table order.
pub fn ico_sources() -> Vec<String> {
    ICO_RESOLUTIONS
        .iter()
        .map(|&r| Flavor::Favicon.file_name(r))
        .collect()
}

/// Resolutions rendered only for the ICO; their PNGs are removed after packing.
pub fn ico_only_resolutions() -> Vec<u32> {
    ICO_RESOLUTIONS
        .iter()
        .copied()
        .filter(|r| !FAVICON_RESOLUTIONS.contains(r))
        .collect()
}

// ============================================================================
// Head markup
// ============================================================================

/// Head markup plus the expected files that were absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaviconHead {
    pub markup: String,
    pub missing: Vec<String>,
}

impl FaviconHead {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

fn link(attrs: &[(&str, String)]) -> String {
    let mut element = String::from("    <link");
    for (name, value) in attrs {
        element.push_str(&format!(" {name}=\"{value}\""));
    }
    element.push('>');
    element
}

fn sizes(resolution: u32) -> String {
    format!("{resolution}x{resolution}")
}

/// Derive favicon links from which files exist.
///
/// Order: the ICO, then Android, Apple and generic PNGs, each largest first.
/// Absent files are skipped and reported in [`FaviconHead::missing`].
pub fn head_elements(exists: impl Fn(&str) -> bool) -> FaviconHead {
    let mut links = Vec::new();
    let mut missing = Vec::new();

    let mut push = |file: String, attrs: Vec<(&str, String)>| {
        if exists(&file) {
            links.push(link(&attrs));
        } else {
            missing.push(file);
        }
    };

    push(
        ICO_FILE.to_string(),
        vec![("rel", "shortcut icon".into()), ("href", ICO_FILE.into())],
    );

    for &res in ANDROID_RESOLUTIONS.iter().rev() {
        let file = Flavor::Android.file_name(res);
        let attrs = vec![("rel", "icon".into()), ("sizes", sizes(res)), ("href", format!("/{file}"))];
        push(file, attrs);
    }
    for &res in APPLE_RESOLUTIONS.iter().rev() {
        let file = Flavor::Apple.file_name(res);
        let attrs = vec![
            ("rel", "apple-touch-icon".into()),
            ("sizes", sizes(res)),
            ("href", format!("/{file}")),
        ];
        push(file, attrs);
    }
    for &res in FAVICON_RESOLUTIONS.iter().rev() {
        let file = Flavor::Favicon.file_name(res);
        let attrs = vec![
            ("rel", "icon".into()),
            ("type", "image/png".into()),
            ("sizes", sizes(res)),
            ("href", format!("/{file}")),
        ];
        push(file, attrs);
    }

    FaviconHead {
        markup: links.join("\n"),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(markup: &str) -> Vec<&str> {
        markup
            .lines()
            .filter_map(|line| line.split("href=\"").nth(1))
            .map(|rest| rest.trim_end_matches("\">"))
            .collect()
    }

    #[test]
    fn file_names() {
        assert_eq!(Flavor::Favicon.file_name(16), "favicon-16x16.png");
        assert_eq!(Flavor::Android.file_name(192), "touch-icon-192x192.png");
        assert_eq!(Flavor::Apple.file_name(57), "apple-touch-icon-57x57.png");
        assert_eq!(
            Flavor::ApplePrecomposed.file_name(57),
            "apple-touch-icon-57x57-precomposed.png"
        );
    }

    #[test]
    fn raster_plan_has_no_duplicates() {
        let plan = raster_plan();
        let mut names: Vec<&str> = plan.iter().map(|r| r.file_name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        // 7 ico + 4 extra generic + 1 android + 5 apple
        assert_eq!(total, 17);
        assert!(plan.iter().all(|r| r.flavor != Flavor::ApplePrecomposed));
    }

    #[test]
    fn ico_only_resolutions_exclude_standalone() {
        assert_eq!(ico_only_resolutions(), vec![24, 48, 64, 128, 256]);
        assert_eq!(ico_sources()[0], "favicon-16x16.png");
    }

    #[test]
    fn complete_head_ordering() {
        let head = head_elements(|_| true);
        assert!(head.is_complete());
        let lines: Vec<&str> = head.markup.lines().collect();
        assert_eq!(lines[0], "    <link rel=\"shortcut icon\" href=\"favicon.ico\">");
        assert_eq!(
            lines[1],
            "    <link rel=\"icon\" sizes=\"192x192\" href=\"/touch-icon-192x192.png\">"
        );
        assert_eq!(
            hrefs(&head.markup)[2..7],
            [
                "/apple-touch-icon-180x180.png",
                "/apple-touch-icon-152x152.png",
                "/apple-touch-icon-120x120.png",
                "/apple-touch-icon-76x76.png",
                "/apple-touch-icon-57x57.png",
            ]
        );
        assert_eq!(
            lines[7],
            "    <link rel=\"icon\" type=\"image/png\" sizes=\"300x300\" href=\"/favicon-300x300.png\">"
        );
    }

    #[test]
    fn generic_links_are_largest_first() {
        let head = head_elements(|_| true);
        let generic: Vec<&str> = hrefs(&head.markup)
            .into_iter()
            .filter(|h| h.starts_with("/favicon-"))
            .collect();
        assert_eq!(
            generic,
            [
                "/favicon-300x300.png",
                "/favicon-196x196.png",
                "/favicon-160x160.png",
                "/favicon-96x96.png",
                "/favicon-32x32.png",
                "/favicon-16x16.png",
            ]
        );
    }

    #[test]
    fn missing_files_produce_partial_head() {
        let head = head_elements(|file| file != "apple-touch-icon-76x76.png");
        assert!(!head.is_complete());
        assert_eq!(head.missing, vec!["apple-touch-icon-76x76.png".to_string()]);
        assert!(!head.markup.contains("76x76"));
        assert!(head.markup.contains("favicon-16x16.png"));
    }

    #[test]
    fn nothing_on_disk() {
        let head = head_elements(|_| false);
        assert_eq!(head.markup, "");
        assert_eq!(head.missing.len(), 13);
    }
}
