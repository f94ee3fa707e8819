//! File-naming conventions shared by every generator.
//!
//! | Prefix | Meaning |
//! |--------|---------|
//! | `~`    | internal partial: copied, never routed or inlined |
//! | `!`    | disabled: never copied |
//! | `_`    | stylesheet partial: imported, never compiled standalone |
//! | `.`    | hidden: never copied |

use std::path::{Component, Path};

pub const INTERNAL_PREFIX: char = '~';
pub const DISABLED_PREFIX: char = '!';
pub const PARTIAL_PREFIX: char = '_';

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

pub fn is_internal(name: &str) -> bool {
    name.starts_with(INTERNAL_PREFIX)
}

pub fn is_disabled(name: &str) -> bool {
    name.starts_with(DISABLED_PREFIX)
}

pub fn is_partial(name: &str) -> bool {
    name.starts_with(PARTIAL_PREFIX)
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || IGNORED_FILES.contains(&name)
}

/// File name without its final extension (`about.tpl` → `about`).
pub fn stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Strip the final extension from a slash-separated path, keeping directories.
pub fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |idx| idx + 1);
    let name = &path[file_start..];
    &path[..file_start + stem(name).len()]
}

/// Last component of a slash-separated path.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Render a relative path with forward slashes regardless of host separator.
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().replace('\\', "/")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `true` if any component of `path` satisfies `predicate`.
pub fn any_component(path: &Path, predicate: impl Fn(&str) -> bool) -> bool {
    path.components().any(|c| match c {
        Component::Normal(part) => predicate(&part.to_string_lossy()),
        _ => false,
    })
}

/// File name of `path` as UTF-8, lossy.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn prefixes() {
        assert!(is_internal("~head.tpl"));
        assert!(is_disabled("!draft.tpl"));
        assert!(is_partial("_mixins.scss"));
        assert!(is_hidden(".gitkeep"));
        assert!(is_hidden(".DS_Store"));
        assert!(!is_hidden("logo.png"));
    }

    #[test]
    fn stem_strips_only_final_extension() {
        assert_eq!(stem("about.tpl"), "about");
        assert_eq!(stem("archive.tar.gz"), "archive.tar");
        assert_eq!(stem("README"), "README");
        assert_eq!(stem(".env"), ".env");
    }

    #[test]
    fn strip_extension_keeps_directories() {
        assert_eq!(strip_extension("blog/first-post.tpl"), "blog/first-post");
        assert_eq!(strip_extension("index.tpl"), "index");
        assert_eq!(strip_extension("v1.0/notes"), "v1.0/notes");
    }

    #[test]
    fn posix_paths() {
        let path: PathBuf = ["modules", "_mixins.scss"].iter().collect();
        assert_eq!(to_posix(&path), "modules/_mixins.scss");
        assert_eq!(to_posix(Path::new("./a/b")), "a/b");
    }

    #[test]
    fn last_segment_of_nested_path() {
        assert_eq!(last_segment("blog/post"), "post");
        assert_eq!(last_segment("about"), "about");
    }

    #[test]
    fn any_component_matches_directories() {
        assert!(any_component(Path::new("!old/page.tpl"), is_disabled));
        assert!(!any_component(Path::new("new/page.tpl"), is_disabled));
    }
}
