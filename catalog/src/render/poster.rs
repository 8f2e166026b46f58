use crate::record::PwadRecord;

use super::scheme::Rgb;

pub const TEXT_COLOR: Rgb = [255, 100, 100];
pub const BACKGROUND: Rgb = [0, 0, 0];

/// Fixed text grid for a poster or icon canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub line_height: u32,
    /// Each 8x8 font pixel becomes a `glyph_scale` square.
    pub glyph_scale: u32,
    pub levels_per_line: usize,
}

impl TextLayout {
    pub const POSTER: TextLayout = TextLayout {
        width: 1000,
        height: 1500,
        margin: 40,
        line_height: 65,
        glyph_scale: 3,
        levels_per_line: 4,
    };

    pub const ICON: TextLayout = TextLayout {
        width: 512,
        height: 512,
        margin: 30,
        line_height: 30,
        glyph_scale: 1,
        levels_per_line: 4,
    };

    /// Same grid on a differently sized canvas.
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}

/// Text lines in drawing order. Empty strings are spacer rows.
pub fn text_rows(record: &PwadRecord, per_line: usize) -> Vec<String> {
    let mut rows = vec![
        format!("IWAD: {}", record.iwad),
        format!("ENGINE: {}", record.engine),
        format!(
            "TXT FILE: {}",
            if record.text_file.is_some() { "YES" } else { "NO" }
        ),
        format!("NUMBER of LEVELS: {}", record.level_count),
        String::new(),
        "LEVELS:".to_string(),
    ];
    rows.extend(record.levels.chunks(per_line.max(1)).map(|c| c.join(" ")));
    rows
}

/// Non-empty rows with their top-left pixel position.
pub fn placed_rows(record: &PwadRecord, layout: &TextLayout) -> Vec<(i32, i32, String)> {
    text_rows(record, layout.levels_per_line)
        .into_iter()
        .enumerate()
        .filter(|(_, row)| !row.is_empty())
        .map(|(i, row)| {
            let y = layout.margin as usize + i * layout.line_height as usize;
            (layout.margin as i32, y as i32, row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EngineTag, IwadTag};

    fn record(levels: &[&str]) -> PwadRecord {
        PwadRecord {
            path: "/wads/pack/pack.wad".into(),
            dir: "/pack".into(),
            name: "pack".into(),
            iwad: IwadTag::Doom2,
            engine: EngineTag::Vanilla,
            levels: levels.iter().map(|s| s.to_string()).collect(),
            level_count: levels.len(),
            text_file: Some("/wads/pack/pack.txt".into()),
            fanart: None,
            poster: None,
            icon: None,
            nfo: None,
        }
    }

    #[test]
    fn header_rows_then_levels_four_per_line() {
        let rec = record(&["MAP01", "MAP02", "MAP03", "MAP04", "MAP05", "MAP06"]);
        let rows = text_rows(&rec, 4);
        assert_eq!(
            rows,
            [
                "IWAD: Doom 2",
                "ENGINE: Vanilla",
                "TXT FILE: YES",
                "NUMBER of LEVELS: 6",
                "",
                "LEVELS:",
                "MAP01 MAP02 MAP03 MAP04",
                "MAP05 MAP06",
            ]
        );
    }

    #[test]
    fn rows_are_placed_on_a_fixed_grid() {
        let mut rec = record(&["MAP01"]);
        rec.text_file = None;
        let placed = placed_rows(&rec, &TextLayout::POSTER);
        assert_eq!(placed[0], (40, 40, "IWAD: Doom 2".to_string()));
        assert_eq!(placed[2], (40, 40 + 2 * 65, "TXT FILE: NO".to_string()));
        // the spacer row is skipped but keeps its slot
        assert_eq!(placed[4], (40, 40 + 5 * 65, "LEVELS:".to_string()));
        assert_eq!(placed[5], (40, 40 + 6 * 65, "MAP01".to_string()));

        let icon = placed_rows(&rec, &TextLayout::ICON);
        assert_eq!(icon[5].1, 30 + 6 * 30);
    }

    #[test]
    fn no_levels_means_no_level_rows() {
        let rec = record(&[]);
        assert_eq!(text_rows(&rec, 4).len(), 6);
    }

    #[test]
    fn full_level_row_fits_the_canvas() {
        let rec = record(&["E1M1XXXX", "E2M2XXXX", "E3M3XXXX", "E4M4XXXX", "E1M5XXXX"]);
        for layout in [TextLayout::POSTER, TextLayout::ICON] {
            let widest = text_rows(&rec, layout.levels_per_line)
                .iter()
                .map(|row| row.len())
                .max()
                .unwrap();
            assert_eq!(widest, 4 * 8 + 3);
            let right = layout.margin + widest as u32 * 8 * layout.glyph_scale;
            assert!(right <= layout.width, "{layout:?} ends at {right}");
        }
    }
}
