use crate::{
    error::{Result, WadError},
    reader::Reader,
};

const VERTEX_SIZE: usize = 4;
const DOOM_LINEDEF_SIZE: usize = 14;
const HEXEN_LINEDEF_SIZE: usize = 16;
const SIDEDEF_SIZE: usize = 30;
const SECTOR_SIZE: usize = 26;
const DOOM_THING_SIZE: usize = 10;
const HEXEN_THING_SIZE: usize = 20;

/// Sidedef slot value meaning "no sidedef on this side".
const NO_SIDEDEF: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFormat {
    Doom,
    /// Detected by the presence of a `BEHAVIOR` lump.
    Hexen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linedef {
    pub start: usize,
    pub end: usize,
    /// Raw flag bits, uninterpreted.
    pub flags: u16,
    pub special: u16,
    pub front: Option<usize>,
    pub back: Option<usize>,
}

impl Linedef {
    /// Two-sided means a back sidedef exists, whatever the flag bits say.
    pub fn is_two_sided(&self) -> bool {
        self.back.is_some()
    }

    pub fn has_special(&self) -> bool {
        self.special != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidedef {
    pub sector: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub floor: i16,
    pub ceiling: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thing {
    pub x: i16,
    pub y: i16,
    /// Facing, in degrees counter-clockwise from east.
    pub angle: i16,
    pub kind: u16,
}

/// Axis-aligned extent of a level's vertices, in map units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.top - self.bottom
    }
}

/// Decoded geometry of one map. Every index it holds has been checked
/// against the collection it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    pub format: LevelFormat,
    pub vertices: Vec<Vertex>,
    pub linedefs: Vec<Linedef>,
    pub sidedefs: Vec<Sidedef>,
    pub sectors: Vec<Sector>,
    pub things: Vec<Thing>,
}

impl Level {
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?;
        let init = Bounds {
            left: first.x as i32,
            right: first.x as i32,
            bottom: first.y as i32,
            top: first.y as i32,
        };
        Some(self.vertices.iter().fold(init, |b, v| Bounds {
            left: b.left.min(v.x as i32),
            right: b.right.max(v.x as i32),
            bottom: b.bottom.min(v.y as i32),
            top: b.top.max(v.y as i32),
        }))
    }

    /// Front and back sectors of a two-sided linedef.
    pub fn sectors_of(&self, line: &Linedef) -> Option<(&Sector, &Sector)> {
        let front = &self.sidedefs[line.front?];
        let back = &self.sidedefs[line.back?];
        Some((&self.sectors[front.sector], &self.sectors[back.sector]))
    }

    /// Decodes a level from its named lumps. Absent lumps decode as empty
    /// collections.
    pub(crate) fn decode<'a, F>(name: &str, lump: F) -> Result<Level>
    where
        F: Fn(&str) -> Option<&'a [u8]>,
    {
        let format = if lump("BEHAVIOR").is_some() {
            LevelFormat::Hexen
        } else {
            LevelFormat::Doom
        };
        let empty: &[u8] = &[];
        let vertices = decode_vertices(name, lump("VERTEXES").unwrap_or(empty))?;
        let sectors = decode_sectors(name, lump("SECTORS").unwrap_or(empty))?;
        let sidedefs = decode_sidedefs(name, lump("SIDEDEFS").unwrap_or(empty), sectors.len())?;
        let linedefs = decode_linedefs(
            name,
            format,
            lump("LINEDEFS").unwrap_or(empty),
            vertices.len(),
            sidedefs.len(),
        )?;
        let things = decode_things(name, format, lump("THINGS").unwrap_or(empty))?;
        Ok(Level {
            name: name.to_string(),
            format,
            vertices,
            linedefs,
            sidedefs,
            sectors,
            things,
        })
    }
}

fn records<'a>(
    level: &str,
    lump: &str,
    data: &'a [u8],
    size: usize,
) -> Result<std::slice::ChunksExact<'a, u8>> {
    if data.len() % size != 0 {
        return Err(WadError::corrupt(
            level,
            format!(
                "{lump} is {} bytes, not a multiple of {size}",
                data.len()
            ),
        ));
    }
    Ok(data.chunks_exact(size))
}

// Record slices are exactly sized by `records`, so reads inside them cannot
// run short.
fn short(level: &str) -> impl Fn(crate::reader::Eof) -> WadError + '_ {
    move |e| WadError::corrupt(level, e.to_string())
}

fn decode_vertices(level: &str, data: &[u8]) -> Result<Vec<Vertex>> {
    records(level, "VERTEXES", data, VERTEX_SIZE)?
        .map(|rec| -> Result<Vertex> {
            let mut r = Reader::new(rec);
            Ok(Vertex {
                x: r.read_i16_le().map_err(short(level))?,
                y: r.read_i16_le().map_err(short(level))?,
            })
        })
        .collect()
}

fn decode_sectors(level: &str, data: &[u8]) -> Result<Vec<Sector>> {
    records(level, "SECTORS", data, SECTOR_SIZE)?
        .map(|rec| -> Result<Sector> {
            let mut r = Reader::new(rec);
            Ok(Sector {
                floor: r.read_i16_le().map_err(short(level))?,
                ceiling: r.read_i16_le().map_err(short(level))?,
            })
        })
        .collect()
}

fn decode_sidedefs(level: &str, data: &[u8], sector_count: usize) -> Result<Vec<Sidedef>> {
    records(level, "SIDEDEFS", data, SIDEDEF_SIZE)?
        .enumerate()
        .map(|(i, rec)| -> Result<Sidedef> {
            // x/y offsets and three texture names precede the sector
            let mut r = Reader::at(rec, 28);
            let sector = r.read_u16_le().map_err(short(level))? as usize;
            if sector >= sector_count {
                return Err(WadError::corrupt(
                    level,
                    format!("sidedef {i} references sector {sector} of {sector_count}"),
                ));
            }
            Ok(Sidedef { sector })
        })
        .collect()
}

fn decode_linedefs(
    level: &str,
    format: LevelFormat,
    data: &[u8],
    vertex_count: usize,
    sidedef_count: usize,
) -> Result<Vec<Linedef>> {
    let size = match format {
        LevelFormat::Doom => DOOM_LINEDEF_SIZE,
        LevelFormat::Hexen => HEXEN_LINEDEF_SIZE,
    };
    let side = |i: usize, slot: u16| -> Result<Option<usize>> {
        if slot == NO_SIDEDEF {
            return Ok(None);
        }
        let slot = slot as usize;
        if slot >= sidedef_count {
            return Err(WadError::corrupt(
                level,
                format!("linedef {i} references sidedef {slot} of {sidedef_count}"),
            ));
        }
        Ok(Some(slot))
    };
    records(level, "LINEDEFS", data, size)?
        .enumerate()
        .map(|(i, rec)| -> Result<Linedef> {
            let mut r = Reader::new(rec);
            let start = r.read_u16_le().map_err(short(level))? as usize;
            let end = r.read_u16_le().map_err(short(level))? as usize;
            let flags = r.read_u16_le().map_err(short(level))?;
            let special = match format {
                LevelFormat::Doom => {
                    let special = r.read_u16_le().map_err(short(level))?;
                    r.skip(2).map_err(short(level))?; // sector tag
                    special
                }
                LevelFormat::Hexen => {
                    let special = r.read_u8().map_err(short(level))? as u16;
                    r.skip(5).map_err(short(level))?; // special args
                    special
                }
            };
            let front = r.read_u16_le().map_err(short(level))?;
            let back = r.read_u16_le().map_err(short(level))?;
            for v in [start, end] {
                if v >= vertex_count {
                    return Err(WadError::corrupt(
                        level,
                        format!("linedef {i} references vertex {v} of {vertex_count}"),
                    ));
                }
            }
            Ok(Linedef {
                start,
                end,
                flags,
                special,
                front: side(i, front)?,
                back: side(i, back)?,
            })
        })
        .collect()
}

fn decode_things(level: &str, format: LevelFormat, data: &[u8]) -> Result<Vec<Thing>> {
    let size = match format {
        LevelFormat::Doom => DOOM_THING_SIZE,
        LevelFormat::Hexen => HEXEN_THING_SIZE,
    };
    records(level, "THINGS", data, size)?
        .map(|rec| -> Result<Thing> {
            let mut r = Reader::new(rec);
            if format == LevelFormat::Hexen {
                r.skip(2).map_err(short(level))?; // thing id
            }
            let x = r.read_i16_le().map_err(short(level))?;
            let y = r.read_i16_le().map_err(short(level))?;
            if format == LevelFormat::Hexen {
                r.skip(2).map_err(short(level))?; // z
            }
            let angle = r.read_i16_le().map_err(short(level))?;
            let kind = r.read_u16_le().map_err(short(level))?;
            Ok(Thing { x, y, angle, kind })
        })
        .collect()
}
