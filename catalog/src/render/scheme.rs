use wadshelf_wad::{Level, Linedef};

pub type Rgb = [u8; 3];

/// Automap palette, after the vanilla automap's line categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Rgb,
    /// One-sided linedef.
    pub wall: Rgb,
    /// Two-sided, no height change.
    pub two_sided: Rgb,
    /// Two-sided with a floor height change.
    pub floor_change: Rgb,
    /// Two-sided with a ceiling change and level floor.
    pub ceiling_change: Rgb,
    pub thing: Rgb,
    pub scale_mark: Rgb,
}

impl ColorScheme {
    pub const CLASSIC: ColorScheme = ColorScheme {
        background: [0, 0, 0],
        wall: [255, 0, 0],
        two_sided: [150, 150, 150],
        floor_change: [139, 92, 55],
        ceiling_change: [255, 255, 0],
        thing: [220, 130, 50],
        scale_mark: [255, 255, 255],
    };

    pub const DOOMWORLD: ColorScheme = ColorScheme {
        background: [255, 255, 255],
        wall: [0, 0, 0],
        two_sided: [144, 144, 144],
        floor_change: [0, 0, 255],
        ceiling_change: [220, 130, 50],
        thing: [0, 255, 0],
        scale_mark: [0, 0, 0],
    };

    pub fn color(&self, class: LineClass) -> Rgb {
        match class {
            LineClass::Wall => self.wall,
            LineClass::FloorChange => self.floor_change,
            LineClass::CeilingChange => self.ceiling_change,
            LineClass::TwoSided => self.two_sided,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Wall,
    FloorChange,
    CeilingChange,
    TwoSided,
}

/// Highest priority first: one-sided, floor change, ceiling change. Line
/// specials do not affect the class.
pub fn classify(level: &Level, line: &Linedef) -> LineClass {
    match level.sectors_of(line) {
        None => LineClass::Wall,
        Some((front, back)) if front.floor != back.floor => LineClass::FloorChange,
        Some((front, back)) if front.ceiling != back.ceiling => LineClass::CeilingChange,
        Some(_) => LineClass::TwoSided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wadshelf_wad::{LevelFormat, Sector, Sidedef, Vertex};

    fn level(front: (i16, i16), back: (i16, i16)) -> Level {
        Level {
            name: "MAP01".into(),
            format: LevelFormat::Doom,
            vertices: vec![Vertex { x: 0, y: 0 }, Vertex { x: 8, y: 8 }],
            linedefs: Vec::new(),
            sidedefs: vec![Sidedef { sector: 0 }, Sidedef { sector: 1 }],
            sectors: vec![
                Sector {
                    floor: front.0,
                    ceiling: front.1,
                },
                Sector {
                    floor: back.0,
                    ceiling: back.1,
                },
            ],
            things: Vec::new(),
        }
    }

    fn line(back: Option<usize>, special: u16) -> Linedef {
        Linedef {
            start: 0,
            end: 1,
            flags: 0,
            special,
            front: Some(0),
            back,
        }
    }

    #[test]
    fn one_sided_is_wall() {
        let lvl = level((0, 128), (0, 128));
        assert_eq!(classify(&lvl, &line(None, 0)), LineClass::Wall);
    }

    #[test]
    fn floor_change_beats_ceiling_change() {
        let lvl = level((0, 128), (24, 96));
        assert_eq!(classify(&lvl, &line(Some(1), 0)), LineClass::FloorChange);
    }

    #[test]
    fn ceiling_change_with_level_floor() {
        let lvl = level((0, 128), (0, 96));
        assert_eq!(classify(&lvl, &line(Some(1), 0)), LineClass::CeilingChange);
    }

    #[test]
    fn plain_two_sided() {
        let lvl = level((0, 128), (0, 128));
        assert_eq!(classify(&lvl, &line(Some(1), 0)), LineClass::TwoSided);
    }

    #[test]
    fn specials_do_not_recolor() {
        let lvl = level((0, 128), (0, 128));
        assert_eq!(classify(&lvl, &line(Some(1), 11)), LineClass::TwoSided);
        assert_eq!(classify(&lvl, &line(None, 11)), LineClass::Wall);
    }
}
