//! Level naming conventions used by the two original game families.

use once_cell::sync::Lazy;
use regex::Regex;

static EPISODIC_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^E[0-9]M[0-9]").unwrap());
static SEQUENTIAL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^MAP[0-9][0-9]").unwrap());
static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(E[0-9]M[0-9]|MAP[0-9][0-9])$").unwrap());

/// `E<d>M<d>...`, the Doom / Ultimate Doom episode-and-mission scheme.
pub fn is_episodic(name: &str) -> bool {
    EPISODIC_PREFIX.is_match(name)
}

/// `MAP<dd>...`, the Doom 2 / Final Doom scheme.
pub fn is_sequential(name: &str) -> bool {
    SEQUENTIAL_PREFIX.is_match(name)
}

/// Exact marker-lump names recognised without looking at the following lumps.
pub fn is_marker_name(name: &str) -> bool {
    MARKER.is_match(name)
}

/// Lumps that make up a binary-format level, following its marker.
pub const MAP_LUMPS: &[&str] = &[
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS", "REJECT",
    "BLOCKMAP", "BEHAVIOR", "SCRIPTS",
];

pub fn is_map_lump(name: &str) -> bool {
    MAP_LUMPS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episodic_names() {
        for e in 1..=4 {
            for m in 1..=9 {
                let name = format!("E{e}M{m}");
                assert!(is_episodic(&name), "{name}");
                assert!(!is_sequential(&name), "{name}");
                assert!(is_marker_name(&name), "{name}");
            }
        }
    }

    #[test]
    fn sequential_names() {
        for n in 1..=32 {
            let name = format!("MAP{n:02}");
            assert!(is_sequential(&name), "{name}");
            assert!(!is_episodic(&name), "{name}");
            assert!(is_marker_name(&name), "{name}");
        }
    }

    #[test]
    fn other_names() {
        for name in ["START", "Z1M1", "MAP1", "EXM1", "THINGS", "E1", "map01"] {
            assert!(!is_episodic(name), "{name}");
            assert!(!is_sequential(name), "{name}");
            assert!(!is_marker_name(name), "{name}");
        }
        // prefix match, as the launcher always classified them
        assert!(is_episodic("E1M10"));
        assert!(!is_marker_name("E1M10"));
    }
}
