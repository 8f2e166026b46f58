//! In-memory WAD construction for tests.

/// Binary-format level contents, written field for field.
#[derive(Debug, Clone, Default)]
pub struct TestMap {
    /// (x, y)
    pub vertices: Vec<(i16, i16)>,
    /// (start, end, flags, special, front, back); 0xFFFF is "no sidedef"
    pub linedefs: Vec<(u16, u16, u16, u16, u16, u16)>,
    /// sector index
    pub sidedefs: Vec<u16>,
    /// (floor, ceiling)
    pub sectors: Vec<(i16, i16)>,
    /// (x, y, angle, type)
    pub things: Vec<(i16, i16, i16, u16)>,
}

impl TestMap {
    /// A single square room with its lower-left corner at the origin and one
    /// player start in the middle.
    pub fn square(size: i16) -> Self {
        Self {
            vertices: vec![(0, 0), (0, size), (size, size), (size, 0)],
            linedefs: (0..4u16)
                .map(|i| (i, (i + 1) % 4, 0x0001, 0, i, 0xFFFF))
                .collect(),
            sidedefs: vec![0; 4],
            sectors: vec![(0, 128)],
            things: vec![(size / 2, size / 2, 90, 1)],
        }
    }

    fn vertexes_lump(&self) -> Vec<u8> {
        self.vertices
            .iter()
            .flat_map(|(x, y)| [x.to_le_bytes(), y.to_le_bytes()].concat())
            .collect()
    }

    fn linedefs_lump(&self) -> Vec<u8> {
        self.linedefs
            .iter()
            .flat_map(|(v1, v2, flags, special, front, back)| {
                [*v1, *v2, *flags, *special, 0, *front, *back]
                    .into_iter()
                    .flat_map(u16::to_le_bytes)
            })
            .collect()
    }

    fn sidedefs_lump(&self) -> Vec<u8> {
        self.sidedefs
            .iter()
            .flat_map(|sector| {
                let mut rec = vec![0u8; 4];
                for texture in ["-", "-", "STARTAN3"] {
                    rec.extend(name_bytes(texture));
                }
                rec.extend(sector.to_le_bytes());
                rec
            })
            .collect()
    }

    fn sectors_lump(&self) -> Vec<u8> {
        self.sectors
            .iter()
            .flat_map(|(floor, ceiling)| {
                let mut rec = Vec::with_capacity(26);
                rec.extend(floor.to_le_bytes());
                rec.extend(ceiling.to_le_bytes());
                rec.extend(name_bytes("FLOOR4_8"));
                rec.extend(name_bytes("CEIL3_5"));
                rec.extend(160i16.to_le_bytes());
                rec.extend([0u8; 4]);
                rec
            })
            .collect()
    }

    fn things_lump(&self) -> Vec<u8> {
        self.things
            .iter()
            .flat_map(|(x, y, angle, kind)| {
                [
                    x.to_le_bytes(),
                    y.to_le_bytes(),
                    angle.to_le_bytes(),
                    kind.to_le_bytes(),
                    7u16.to_le_bytes(),
                ]
                .concat()
            })
            .collect()
    }
}

fn name_bytes(name: &str) -> [u8; 8] {
    let mut out = [0u8; 8];
    for (dst, src) in out.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    out
}

pub struct WadBuilder {
    magic: &'static [u8; 4],
    lumps: Vec<(String, Vec<u8>)>,
}

impl WadBuilder {
    pub fn iwad() -> Self {
        Self {
            magic: b"IWAD",
            lumps: Vec::new(),
        }
    }

    pub fn pwad() -> Self {
        Self {
            magic: b"PWAD",
            lumps: Vec::new(),
        }
    }

    pub fn lump(mut self, name: &str, data: &[u8]) -> Self {
        self.lumps.push((name.to_string(), data.to_vec()));
        self
    }

    pub fn map(self, name: &str, map: &TestMap) -> Self {
        self.lump(name, &[])
            .lump("THINGS", &map.things_lump())
            .lump("LINEDEFS", &map.linedefs_lump())
            .lump("SIDEDEFS", &map.sidedefs_lump())
            .lump("VERTEXES", &map.vertexes_lump())
            .lump("SECTORS", &map.sectors_lump())
    }

    /// Lump data first, directory last, as most editors write it.
    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::new();
        let mut directory = Vec::new();
        let mut offset = 12;
        for (name, lump) in &self.lumps {
            directory.extend((offset as i32).to_le_bytes());
            directory.extend((lump.len() as i32).to_le_bytes());
            directory.extend(name_bytes(name));
            data.extend_from_slice(lump);
            offset += lump.len();
        }
        let mut out = Vec::with_capacity(12 + data.len() + directory.len());
        out.extend_from_slice(self.magic);
        out.extend((self.lumps.len() as i32).to_le_bytes());
        out.extend((offset as i32).to_le_bytes());
        out.extend(data);
        out.extend(directory);
        out
    }
}
