//! Placeholder templates with section-banner markers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Blueprint                                                  │
//! │  ├── $ph{Label}   primary code banner    (80 columns)       │
//! │  ├── $sh{Label}   secondary code banner  (80 columns)       │
//! │  ├── $wh{Label}   markup banner          (112 columns)      │
//! │  └── ${name}      value placeholder                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Banners are expanded once, in [`Template::compile`]. Placeholders are
//! expanded on every call to [`Template::substitute`], always starting from
//! the compiled blueprint, so a template can be rendered any number of times.
//!
//! ## Substitution rules
//!
//! - `${name}` and `$name` are replaced when `name` has a value.
//! - `$$` renders as a single `$`.
//! - Placeholders with no value are left as literal text (no error).
//! - Substituted text is never re-scanned.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Target width of banners in generated source code.
pub const CODE_LINE_LENGTH: usize = 80;

/// Target width of banners in generated markup.
pub const MARKUP_LINE_LENGTH: usize = 112;

static PRIMARY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$ph\{(.*?)\}").expect("valid primary banner pattern"));
static SECONDARY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$sh\{(.*?)\}").expect("valid secondary banner pattern"));
static MARKUP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$wh\{(.*?)\}").expect("valid markup banner pattern"));

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|([_A-Za-z][_A-Za-z0-9]*)|\{([_A-Za-z][_A-Za-z0-9]*)\})")
        .expect("valid placeholder pattern")
});

// ============================================================================
// Banners
// ============================================================================

/// The three visual weights of section banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// `$ph{Label}`: three-line `#` block, label upper-cased.
    Primary,
    /// `$sh{Label}`: single `###` line.
    Secondary,
    /// `$wh{Label}`: HTML comment line.
    Markup,
}

impl Banner {
    pub const ALL: [Banner; 3] = [Banner::Primary, Banner::Secondary, Banner::Markup];

    /// The marker sigil between `$` and `{`.
    pub fn sigil(self) -> &'static str {
        match self {
            Self::Primary => "ph",
            Self::Secondary => "sh",
            Self::Markup => "wh",
        }
    }

    /// Build the marker text for `label`, e.g. `$wh{Open Graph}`.
    pub fn marker(self, label: &str) -> String {
        format!("${}{{{}}}", self.sigil(), label)
    }

    /// Expand a label into the decorated banner text.
    ///
    /// Padding shrinks with the label length and bottoms out at zero, so an
    /// over-long label still produces a banner.
    pub fn expand(self, label: &str) -> String {
        let width = label.chars().count();
        match self {
            Self::Primary => {
                let rule = "#".repeat(CODE_LINE_LENGTH);
                format!(
                    "\n\n{rule}\n##### {} {}\n{rule}\n",
                    label.to_uppercase(),
                    "#".repeat(CODE_LINE_LENGTH.saturating_sub(width + 7)),
                )
            }
            Self::Secondary => format!(
                "\n### {} {}",
                label,
                "#".repeat(CODE_LINE_LENGTH.saturating_sub(width + 5)),
            ),
            Self::Markup => format!(
                "<!-- ***** {} {} -->",
                label,
                "*".repeat(MARKUP_LINE_LENGTH.saturating_sub(width + 16)),
            ),
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Primary => &PRIMARY_MARKER,
            Self::Secondary => &SECONDARY_MARKER,
            Self::Markup => &MARKUP_MARKER,
        }
    }
}

// ============================================================================
// Values
// ============================================================================

/// A value bound to a placeholder name.
#[derive(Debug, Clone)]
pub enum Value {
    /// Substituted as-is.
    Text(String),
    /// Each fragment is rendered and the results joined with `\n`.
    Fragments(Vec<Fragment>),
}

impl Value {
    /// Resolve to the text that replaces the placeholder.
    pub fn resolve(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Fragments(fragments) => fragments
                .iter()
                .map(Fragment::render)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<Fragment>> for Value {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self::Fragments(fragments)
    }
}

/// A sub-template paired with its own substitutions.
#[derive(Debug, Clone)]
pub struct Fragment {
    template: Template,
    values: Substitutions,
}

impl Fragment {
    pub fn new(template: Template, values: Substitutions) -> Self {
        Self { template, values }
    }

    pub fn render(&self) -> String {
        self.template.substitute(&self.values)
    }
}

/// Mapping from placeholder name to [`Value`].
///
/// Ordered so debug output and iteration are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: BTreeMap<String, Value>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value, consuming self and returning the extended map.
    ///
    /// ```rust
    /// use kiln_core::domain::template::Substitutions;
    ///
    /// let values = Substitutions::new()
    ///     .with("path", "about")
    ///     .with("method_name", "load_about");
    /// assert_eq!(values.get("path").map(|v| v.resolve()), Some("about".into()));
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Template
// ============================================================================

/// An immutable text blueprint with banners already expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    blueprint: String,
}

impl Template {
    /// Expand every banner marker in `blueprint`.
    ///
    /// Each marker kind is processed independently; they may coexist.
    pub fn compile(blueprint: &str) -> Self {
        let mut text = blueprint.to_string();
        for banner in Banner::ALL {
            text = banner
                .pattern()
                .replace_all(&text, |caps: &Captures<'_>| banner.expand(&caps[1]))
                .into_owned();
        }
        Self { blueprint: text }
    }

    /// The compiled blueprint, placeholders intact.
    pub fn as_str(&self) -> &str {
        &self.blueprint
    }

    /// Substitute placeholders, leaving unknown names untouched.
    pub fn substitute(&self, values: &Substitutions) -> String {
        PLACEHOLDER
            .replace_all(&self.blueprint, |caps: &Captures<'_>| {
                if caps.get(1).is_some() {
                    return "$".to_string();
                }
                let name = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                match values.get(name) {
                    Some(value) => value.resolve(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}
