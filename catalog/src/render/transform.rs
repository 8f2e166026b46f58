use wadshelf_wad::Bounds;

use super::RenderError;

/// Uniform fit of a level's bounding box into a pixel canvas, with the map's
/// north at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub width: u32,
    pub height: u32,
    /// Pixels per map unit.
    pub scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl LinearTransform {
    pub fn fit(
        bounds: Bounds,
        width: u32,
        height: u32,
        border_percent: u32,
    ) -> Result<Self, RenderError> {
        let x_size = bounds.width() as f64;
        let y_size = bounds.height() as f64;
        if x_size <= 0.0 || y_size <= 0.0 {
            return Err(RenderError::DegenerateGeometry(format!(
                "bounding box is {}x{} map units",
                bounds.width(),
                bounds.height()
            )));
        }
        let border_x = (width as u64 * border_percent as u64 / 100) as f64;
        let border_y = (height as u64 * border_percent as u64 / 100) as f64;
        let usable_x = width as f64 - 2.0 * border_x;
        let usable_y = height as f64 - 2.0 * border_y;
        if usable_x <= 0.0 || usable_y <= 0.0 {
            return Err(RenderError::DegenerateGeometry(format!(
                "{border_percent}% border leaves no room in {width}x{height}"
            )));
        }
        let x_scale = usable_x / x_size;
        let y_scale = usable_y / y_size;
        // the constrained axis keeps its border, the other is centred
        let (scale, x_offset, y_offset) = if x_scale < y_scale {
            let used = (y_size * x_scale) as i64;
            (x_scale, border_x, ((height as i64 - used) / 2) as f64)
        } else {
            let used = (x_size * y_scale) as i64;
            (y_scale, ((width as i64 - used) / 2) as f64, border_y)
        };
        Ok(Self {
            left: bounds.left as f64,
            right: bounds.right as f64,
            bottom: bounds.bottom as f64,
            top: bounds.top as f64,
            width,
            height,
            scale,
            x_offset,
            y_offset,
        })
    }

    pub fn to_pixel(&self, map_x: f64, map_y: f64) -> (i32, i32) {
        let px = self.scale * (map_x - self.left) + self.x_offset;
        let py = self.scale * (self.top - map_y) + self.y_offset;
        (px as i32, py as i32)
    }
}
