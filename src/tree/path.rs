//! Relative path handling
//!
//! Two directions: turning walked filesystem paths into the manifest's canonical
//! forward-slash form, and turning a client-supplied relative path back into a
//! filesystem path that is guaranteed to stay under the served root.

use crate::error::{FileRequestError, ManifestError};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Express `full_path` relative to `root` using `/` separators.
///
/// Fails if `full_path` is not under `root`, is the root itself, or has a
/// component that is not valid UTF-8.
pub fn relative_slash_path(root: &Path, full_path: &Path) -> Result<String, ManifestError> {
    let relative = full_path.strip_prefix(root).map_err(|_| {
        ManifestError::InvalidPath(format!(
            "{} is not under {}",
            full_path.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => match name.to_str() {
                Some(name) => parts.push(name),
                None => {
                    return Err(ManifestError::InvalidPath(format!(
                        "{} is not valid UTF-8",
                        full_path.display()
                    )))
                }
            },
            Component::CurDir => {}
            other => {
                return Err(ManifestError::InvalidPath(format!(
                    "unexpected component {:?} in {}",
                    other,
                    full_path.display()
                )))
            }
        }
    }

    if parts.is_empty() {
        return Err(ManifestError::InvalidPath(format!(
            "{} has no path relative to the root",
            full_path.display()
        )));
    }

    Ok(parts.join("/"))
}

/// Resolve a client-supplied relative path against `root`.
///
/// Rejects empty paths, `..` components, absolute paths and platform prefixes.
/// `.` components and repeated separators are dropped. On Windows a backslash is
/// a separator; elsewhere it is an ordinary filename character.
pub fn sanitize_request_path(root: &Path, requested: &str) -> Result<PathBuf, FileRequestError> {
    if requested.is_empty() {
        return Err(FileRequestError::EmptyPath);
    }
    if requested.contains('\0') {
        return Err(FileRequestError::PathViolation(requested.to_string()));
    }

    let unified = if cfg!(windows) {
        Cow::Owned(requested.replace('\\', "/"))
    } else {
        Cow::Borrowed(requested)
    };
    if unified.starts_with('/') {
        return Err(FileRequestError::PathViolation(requested.to_string()));
    }

    let mut clean = PathBuf::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(FileRequestError::PathViolation(requested.to_string())),
            _ => {}
        }

        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => clean.push(name),
            _ => return Err(FileRequestError::PathViolation(requested.to_string())),
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(FileRequestError::EmptyPath);
    }

    let full = root.join(&clean);
    if !is_lexically_under(root, &full) {
        return Err(FileRequestError::PathViolation(requested.to_string()));
    }

    Ok(full)
}

/// True when `target` is `root` followed by one or more normal components.
fn is_lexically_under(root: &Path, target: &Path) -> bool {
    match target.strip_prefix(root) {
        Ok(rest) => {
            let mut any = false;
            for component in rest.components() {
                match component {
                    Component::Normal(_) => any = true,
                    _ => return false,
                }
            }
            any
        }
        Err(_) => false,
    }
}
