use wadshelf_wad::Level;

use super::{
    RenderError,
    scheme::{ColorScheme, LineClass, Rgb, classify},
    transform::LinearTransform,
};

/// Vanilla automap player arrow, in map units, pointing east.
const THING_TRIANGLE: [[(f64, f64); 2]; 3] = [
    [(-8.0, -11.2), (16.0, 0.0)],
    [(16.0, 0.0), (-8.0, 11.2)],
    [(-8.0, 11.2), (-8.0, -11.2)],
];

/// Width of the scale bracket, in map units.
const SCALE_MARK_UNITS: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomapOptions {
    pub width: u32,
    pub height: u32,
    pub border_percent: u32,
    pub scheme: ColorScheme,
    pub scale_mark: bool,
}

impl Default for AutomapOptions {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            border_percent: 10,
            scheme: ColorScheme::CLASSIC,
            scale_mark: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub color: Rgb,
    /// Drawn with four 1-pixel offset copies.
    pub thick: bool,
}

/// Everything to draw for one level, already in pixel space and in drawing
/// order.
#[derive(Debug, Clone)]
pub struct Automap {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub transform: LinearTransform,
    pub strokes: Vec<Stroke>,
}

pub fn plan(level: &Level, opts: &AutomapOptions) -> Result<Automap, RenderError> {
    let bounds = level
        .bounds()
        .ok_or_else(|| RenderError::DegenerateGeometry(format!("{} has no vertices", level.name)))?;
    let t = LinearTransform::fit(bounds, opts.width, opts.height, opts.border_percent)?;
    let scheme = &opts.scheme;
    let mut strokes = Vec::with_capacity(level.linedefs.len() + level.things.len() * 3 + 4);

    if opts.scale_mark {
        strokes.extend(scale_mark(&t, scheme.scale_mark));
    }

    // two-sided first so walls stay on top where they overlap
    let mut lines: Vec<_> = level
        .linedefs
        .iter()
        .map(|line| (line, classify(level, line)))
        .collect();
    lines.sort_by_key(|(_, class)| *class == LineClass::Wall);
    for (line, class) in lines {
        let a = level.vertices[line.start];
        let b = level.vertices[line.end];
        strokes.push(Stroke {
            from: t.to_pixel(a.x as f64, a.y as f64),
            to: t.to_pixel(b.x as f64, b.y as f64),
            color: scheme.color(class),
            thick: true,
        });
    }

    for thing in &level.things {
        let (sin, cos) = (thing.angle as f64).to_radians().sin_cos();
        let rotate = |(x, y): (f64, f64)| {
            (
                x * cos - y * sin + thing.x as f64,
                x * sin + y * cos + thing.y as f64,
            )
        };
        for [a, b] in THING_TRIANGLE {
            let (ax, ay) = rotate(a);
            let (bx, by) = rotate(b);
            strokes.push(Stroke {
                from: t.to_pixel(ax, ay),
                to: t.to_pixel(bx, by),
                color: scheme.thing,
                thick: false,
            });
        }
    }

    Ok(Automap {
        width: opts.width,
        height: opts.height,
        background: scheme.background,
        transform: t,
        strokes,
    })
}

// A---B---C
// |   E   |
// D       F
fn scale_mark(t: &LinearTransform, color: Rgb) -> [Stroke; 4] {
    let half = SCALE_MARK_UNITS / 2.0;
    let a = t.to_pixel(t.right - SCALE_MARK_UNITS, t.top);
    let b = t.to_pixel(t.right - half, t.top);
    let c = t.to_pixel(t.right, t.top);
    let d = t.to_pixel(t.right - SCALE_MARK_UNITS, t.top - half / 2.0);
    let e = t.to_pixel(t.right - half, t.top - half / 4.0);
    let f = t.to_pixel(t.right, t.top - half / 2.0);
    [(a, c), (a, d), (b, e), (c, f)].map(|(from, to)| Stroke {
        from,
        to,
        color,
        thick: false,
    })
}
