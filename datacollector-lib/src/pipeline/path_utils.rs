//! Path utilities for safe filesystem operations.

use std::path::{Component, Path, PathBuf};

/// Sanitize a string for use as a path component
///
/// Removes path traversal sequences and characters that are reserved on common filesystems,
/// so that provider-supplied names can never escape the output directory.
///
/// # Examples
///
/// ```
/// use datacollector_lib::pipeline::sanitize_path_component;
///
/// assert_eq!(sanitize_path_component("server1"), "server1");
/// assert_eq!(sanitize_path_component("../../etc/passwd"), "______etc_passwd");
/// assert_eq!(sanitize_path_component("cell:01?"), "cell_01_");
/// ```
#[must_use]
pub fn sanitize_path_component(s: &str) -> String {
    let s = s.replace("..", "__");
    let s = s.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
    if s.is_empty() { "_".to_string() } else { s }
}

/// Strips the root and any drive prefix from an absolute path, leaving only its normal components.
pub(crate) fn without_root(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Renders a path with `/` separators regardless of platform.
pub(crate) fn slash_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_normal_name() {
        assert_eq!(sanitize_path_component("server1"), "server1");
        assert_eq!(sanitize_path_component("my-app.ear"), "my-app.ear");
    }

    #[test]
    fn test_sanitize_path_traversal() {
        assert_eq!(sanitize_path_component(".."), "__");
        assert_eq!(sanitize_path_component("../etc"), "___etc");
    }

    #[test]
    fn test_sanitize_dangerous_chars() {
        assert_eq!(sanitize_path_component("foo/bar"), "foo_bar");
        assert_eq!(sanitize_path_component("foo\\bar"), "foo_bar");
        assert_eq!(sanitize_path_component("a<b>c|d\"e*f"), "a_b_c_d_e_f");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_path_component(""), "_");
    }

    #[test]
    #[cfg(unix)]
    fn test_without_root() {
        assert_eq!(without_root(Path::new("/opt/was/server.xml")), PathBuf::from("opt/was/server.xml"));
        assert_eq!(without_root(Path::new("/")), PathBuf::new());
    }

    #[test]
    #[cfg(unix)]
    fn test_slash_path() {
        assert_eq!(slash_path(Path::new("/opt/was/server.xml")), "/opt/was/server.xml");
        assert_eq!(slash_path(Path::new("rel/file")), "rel/file");
    }
}
