//! Plain-path helpers: catalog keys are forward-slash strings.

use std::path::{Path, PathBuf};

pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Directory of `file` relative to `root`: `/` for the root itself,
/// `/a/b` below it.
pub fn relative_dir(root: &Path, file: &Path) -> String {
    let parent = file.parent().unwrap_or(file);
    let rel = parent.strip_prefix(root).unwrap_or(parent);
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", parts.join("/"))
}

/// Parent of a catalog directory; `None` for the root.
pub fn parent_dir(dir: &str) -> Option<&str> {
    if dir == "/" {
        return None;
    }
    match dir.rfind('/') {
        Some(0) | None => Some("/"),
        Some(i) => Some(&dir[..i]),
    }
}

/// `.wad`, `.pwad`, `.iwad`, any case.
pub fn has_wad_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase().ends_with("wad"))
        .unwrap_or(false)
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A `.txt` file beside the WAD sharing its stem.
pub fn companion_text_file(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?;
    let parent = path.parent()?;
    let mut found: Vec<PathBuf> = std::fs::read_dir(parent)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_stem() == Some(stem)
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
                && p.is_file()
        })
        .collect();
    found.sort();
    found.into_iter().next()
}

/// Where a WAD's generated images go: beside it, or mirrored under the
/// artwork directory by its catalog directory.
pub fn artwork_dir(root: &Path, path: &Path, artwork: Option<&Path>) -> PathBuf {
    match artwork {
        Some(base) => {
            let dir = relative_dir(root, path);
            base.join(dir.trim_start_matches('/'))
        }
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
}

/// Name of a generated file for `path`: the WAD's full file name plus
/// `suffix`, so `pack.wad` and `pack.WAD` never share sidecars.
pub fn sidecar_name(path: &Path, suffix: &str) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{name}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_dirs() {
        let root = Path::new("/games/doom");
        assert_eq!(relative_dir(root, Path::new("/games/doom/x.wad")), "/");
        assert_eq!(
            relative_dir(root, Path::new("/games/doom/mypack/level1.wad")),
            "/mypack"
        );
        assert_eq!(
            relative_dir(root, Path::new("/games/doom/a/b/c.wad")),
            "/a/b"
        );
    }

    #[test]
    fn parents() {
        assert_eq!(parent_dir("/"), None);
        assert_eq!(parent_dir("/a"), Some("/"));
        assert_eq!(parent_dir("/a/b"), Some("/a"));
    }

    #[test]
    fn wad_extensions() {
        assert!(has_wad_extension(Path::new("x/level1.wad")));
        assert!(has_wad_extension(Path::new("x/LEVEL1.WAD")));
        assert!(has_wad_extension(Path::new("x/thing.pwad")));
        assert!(!has_wad_extension(Path::new("x/level1.zip")));
        assert!(!has_wad_extension(Path::new("x/wad")));
    }

    #[test]
    fn companion_text() {
        let dir = tempfile::tempdir().unwrap();
        let wad = dir.path().join("scythe.wad");
        std::fs::write(&wad, b"").unwrap();
        assert_eq!(companion_text_file(&wad), None);
        std::fs::write(dir.path().join("scythe.TXT"), b"readme").unwrap();
        std::fs::write(dir.path().join("other.txt"), b"readme").unwrap();
        assert_eq!(
            companion_text_file(&wad),
            Some(dir.path().join("scythe.TXT"))
        );
    }

    #[test]
    fn artwork_locations() {
        let root = Path::new("/wads");
        let wad = Path::new("/wads/pack/one.wad");
        assert_eq!(artwork_dir(root, wad, None), PathBuf::from("/wads/pack"));
        assert_eq!(
            artwork_dir(root, wad, Some(Path::new("/art"))),
            PathBuf::from("/art/pack")
        );
    }

    #[test]
    fn sidecars_keep_the_extension() {
        assert_eq!(sidecar_name(Path::new("/w/x/pack.wad"), ".nfo"), "pack.wad.nfo");
        assert_eq!(
            sidecar_name(Path::new("/w/x/pack.WAD"), "_fanart.png"),
            "pack.WAD_fanart.png"
        );
        assert_ne!(
            sidecar_name(Path::new("pack.wad"), ".nfo"),
            sidecar_name(Path::new("pack.pwad"), ".nfo")
        );
    }
}
