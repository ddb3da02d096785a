// Filesystem path helpers for the output generator
//
// Stateless utilities shared by the code that writes generated files; the
// reference resolver neither calls into nor is called by them.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Normalize backslashes to forward slashes so folder detection behaves the
/// same on every platform.
pub fn make_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Replace characters that generated file names must not contain. Keep in
/// sync with the equivalent escaping in the client-side scripts.
pub fn replace_invalid_filename_chars(name: &str) -> String {
    name.replace(':', ".")
}

/// Resolve `path` to an absolute real path (symlinks and dot segments
/// removed), forward-slashed on Windows.
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    let real = fs::canonicalize(path)
        .with_context(|| format!("cannot canonicalize {}", path.display()))?;

    #[cfg(windows)]
    let real = PathBuf::from(make_forward_slashes(&real.to_string_lossy()));

    Ok(real)
}

/// Create `path` and any missing parents, world-readable but only
/// owner-writable.
pub fn create_directories(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("cannot create directory {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("cannot set permissions on {}", path.display()))?;
    }

    Ok(())
}

/// Compute a relative path from `base` to `path` by comparing components:
/// shared leading components contribute nothing, every remaining `base`
/// component becomes a `..`, and the remaining `path` components follow.
///
/// A target on a different root is returned unchanged. A relative target
/// against a rooted base cannot be relativized at all; that case logs a
/// warning and also falls back to the target unchanged.
pub fn relativize(base: &Path, path: &Path) -> PathBuf {
    let (path_root, path_rest) = split_root(path);
    let (base_root, base_rest) = split_root(base);

    if !path_root.as_os_str().is_empty() {
        if path_root != base_root {
            return path.to_path_buf();
        }
        return relativize(&base_rest, &path_rest);
    }
    if !base_root.as_os_str().is_empty() {
        warn!(
            "relativize({}, {}): cannot relativize a relative path from a rooted base",
            base.display(),
            path.display()
        );
        return path.to_path_buf();
    }

    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();

    let mut shared = 0;
    while shared < path_components.len()
        && shared < base_components.len()
        && path_components[shared] == base_components[shared]
    {
        shared += 1;
    }

    let mut out = PathBuf::new();
    for _ in shared..base_components.len() {
        out.push("..");
    }
    for component in &path_components[shared..] {
        out.push(component.as_os_str());
    }
    out
}

/// Split a path into its root (prefix + root directory) and the rest.
fn split_root(path: &Path) -> (PathBuf, PathBuf) {
    let mut root = PathBuf::new();
    let mut rest = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => root.push(component.as_os_str()),
            _ => rest.push(component.as_os_str()),
        }
    }
    (root, rest)
}
