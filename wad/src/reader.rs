use thiserror::Error;

#[derive(Debug, Error)]
#[error("unexpected end of data at offset {offset} (wanted {wanted} bytes)")]
pub struct Eof {
    pub offset: usize,
    pub wanted: usize,
}

/// Little-endian cursor over a borrowed byte slice.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn read_u8(&mut self) -> Result<u8, Eof> {
        let b = self.read_bytes(1)?;
        Ok(b[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, Eof> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i16_le(&mut self) -> Result<i16, Eof> {
        let b = self.read_bytes(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i32_le(&mut self) -> Result<i32, Eof> {
        let b = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Eof> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.buf.len());
        let Some(end) = end else {
            return Err(Eof {
                offset: self.pos,
                wanted: n,
            });
        };
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), Eof> {
        self.read_bytes(n).map(|_| ())
    }

    /// Reads a fixed-width, NUL-padded lump or texture name.
    pub fn read_name(&mut self) -> Result<String, Eof> {
        let raw = self.read_bytes(8)?;
        let len = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..len]).to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_values() {
        let data = [0x34, 0x12, 0xff, 0xff, 0x01, 0x00, 0x00, 0x80];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_u16_le().unwrap(), 0x1234);
        assert_eq!(r.read_i16_le().unwrap(), -1);
        assert_eq!(r.read_i32_le().unwrap(), i32::MIN + 1);
        assert!(r.read_u8().is_err());
    }

    #[test]
    fn name_stops_at_nul_and_uppercases() {
        let data = *b"e1m1\0\0\0\0";
        assert_eq!(Reader::new(&data).read_name().unwrap(), "E1M1");
        let full = *b"LINEDEFS";
        assert_eq!(Reader::new(&full).read_name().unwrap(), "LINEDEFS");
    }

    #[test]
    fn eof_reports_offset() {
        let data = [0u8; 3];
        let mut r = Reader::at(&data, 2);
        let err = r.read_u16_le().unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.wanted, 2);
    }
}
