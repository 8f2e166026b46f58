//! The `.nfo` sidecar written beside each PWAD.

use anyhow::{Context, Result};
use std::path::Path;
use wadshelf_wad::map_name;

use crate::record::{IwadTag, PwadRecord};

pub const LEVEL_LINES: usize = 4;

/// Four level-name lines. Doom levels group by episode, Doom 2 levels by
/// block of ten maps; anything else is packed in sorted order and cut off
/// after the last line.
pub fn level_lines(record: &PwadRecord) -> [String; LEVEL_LINES] {
    let mut lines: [Vec<&str>; LEVEL_LINES] = Default::default();
    match record.iwad {
        IwadTag::Doom => {
            for level in &record.levels {
                if let Some(i) = episode_line(level) {
                    lines[i].push(level);
                }
            }
        }
        IwadTag::Doom2 => {
            for level in &record.levels {
                if let Some(i) = map_block_line(level) {
                    lines[i].push(level);
                }
            }
        }
        _ => {
            for (line, chunk) in lines.iter_mut().zip(record.levels.chunks(LEVEL_LINES)) {
                line.extend(chunk.iter().map(String::as_str));
            }
        }
    }
    lines.map(|line| line.join(", "))
}

// E1M1..E4M9 -> 0..3
fn episode_line(level: &str) -> Option<usize> {
    if level.len() != 4 || !map_name::is_episodic(level) {
        return None;
    }
    let episode = level.as_bytes()[1] - b'0';
    let map = level.as_bytes()[3] - b'0';
    ((1..=4).contains(&episode) && map >= 1).then(|| episode as usize - 1)
}

// MAP01-10, MAP11-20, MAP21-30, MAP31-32
fn map_block_line(level: &str) -> Option<usize> {
    if level.len() != 5 || !map_name::is_sequential(level) {
        return None;
    }
    let n: usize = level[3..].parse().ok()?;
    match n {
        1..=30 => Some((n - 1) / 10),
        31 | 32 => Some(3),
        _ => None,
    }
}

pub fn to_xml(record: &PwadRecord) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>\n");
    out.push_str("<PWAD>\n");
    push_element(&mut out, "iwad", record.iwad.as_str());
    push_element(&mut out, "engine", record.engine.as_str());
    push_element(&mut out, "num_levels", &record.level_count.to_string());
    for (i, line) in level_lines(record).iter().enumerate() {
        push_element(&mut out, &format!("level_line_{}", i + 1), line);
    }
    out.push_str("</PWAD>\n");
    out
}

fn push_element(out: &mut String, tag: &str, text: &str) {
    out.push_str("  <");
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape(text));
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Overwrites any existing file.
pub fn write(record: &PwadRecord, path: &Path) -> Result<()> {
    std::fs::write(path, to_xml(record))
        .with_context(|| format!("failed to write NFO file {}", path.display()))
}
