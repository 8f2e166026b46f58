//! Automap, poster and icon images.
//!
//! Everything up to pixel coordinates is plain data and always built. Only
//! the raster backend sits behind the `render` feature; without it the
//! writers return [`RenderError::Unavailable`].

pub mod automap;
#[cfg(feature = "render")]
pub mod canvas;
pub mod poster;
pub mod scheme;
pub mod transform;

use std::path::Path;
use thiserror::Error;
use wadshelf_wad::Level;

use crate::record::PwadRecord;
use automap::AutomapOptions;
use poster::TextLayout;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("rendering support not built in")]
    Unavailable,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "render")]
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Whether this build can produce images at all.
pub const fn available() -> bool {
    cfg!(feature = "render")
}

/// Renders one level's automap to a PNG at `path`.
#[cfg(feature = "render")]
pub fn write_automap(level: &Level, opts: &AutomapOptions, path: &Path) -> Result<(), RenderError> {
    let map = automap::plan(level, opts)?;
    map.rasterize().save_png(path)
}

#[cfg(not(feature = "render"))]
pub fn write_automap(level: &Level, opts: &AutomapOptions, path: &Path) -> Result<(), RenderError> {
    let _ = (level, opts, path);
    Err(RenderError::Unavailable)
}

/// Renders the record's text card (poster or icon) to a PNG at `path`.
#[cfg(feature = "render")]
pub fn write_text_card(
    record: &PwadRecord,
    layout: &TextLayout,
    path: &Path,
) -> Result<(), RenderError> {
    let mut canvas = canvas::Canvas::new(layout.width, layout.height, poster::BACKGROUND);
    for (x, y, row) in poster::placed_rows(record, layout) {
        canvas.text(x, y, layout.glyph_scale, &row, poster::TEXT_COLOR);
    }
    canvas.save_png(path)
}

#[cfg(not(feature = "render"))]
pub fn write_text_card(
    record: &PwadRecord,
    layout: &TextLayout,
    path: &Path,
) -> Result<(), RenderError> {
    let _ = (record, layout, path);
    Err(RenderError::Unavailable)
}

#[cfg(feature = "render")]
impl automap::Automap {
    pub fn rasterize(&self) -> canvas::Canvas {
        let mut canvas = canvas::Canvas::new(self.width, self.height, self.background);
        for stroke in &self.strokes {
            if stroke.thick {
                canvas.thick_line(stroke.from, stroke.to, stroke.color);
            } else {
                canvas.line(stroke.from, stroke.to, stroke.color);
            }
        }
        canvas
    }
}
