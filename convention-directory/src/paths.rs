//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: `.` and `..` components are resolved
//! purely on the path text, the same way a path-join would.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without consulting the filesystem.
///
/// A `..` at the root of an absolute path is dropped. A leading `..` on a
/// relative path is kept since there is nothing to pop.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.last() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }

    if normalized.is_empty() {
        return PathBuf::from(".");
    }
    normalized.iter().collect()
}

/// Render a path in rooted relative form, e.g. `./templates/sub/b.json`.
///
/// Absolute prefixes are stripped and `..` never climbs above the top, so
/// `/srv/app/x.json` becomes `./srv/app/x.json` and `../x.json` becomes
/// `./x.json`. Separators are always `/`.
pub fn to_rooted_relative(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        format!("./{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_removes_cur_dir() {
        assert_eq!(
            normalize_path(Path::new("/base/./src/./a")),
            PathBuf::from("/base/src/a")
        );
    }

    #[test]
    fn test_normalize_pops_parent_dir() {
        assert_eq!(
            normalize_path(Path::new("/base/src/../lib/x.yml")),
            PathBuf::from("/base/lib/x.yml")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_normalize_keeps_leading_parent_on_relative() {
        assert_eq!(normalize_path(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_rooted_relative_forms() {
        assert_eq!(
            to_rooted_relative(Path::new("./templates/a.json")),
            "./templates/a.json"
        );
        assert_eq!(
            to_rooted_relative(Path::new("templates/sub/b.json")),
            "./templates/sub/b.json"
        );
        assert_eq!(to_rooted_relative(Path::new("/srv/app/x.json")), "./srv/app/x.json");
        assert_eq!(to_rooted_relative(Path::new("../x.json")), "./x.json");
        assert_eq!(to_rooted_relative(Path::new("a/../b/c.json")), "./b/c.json");
    }
}
