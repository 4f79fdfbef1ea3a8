use crate::{LoadError, Result};

/// Byte cursor over a raw design file.
///
/// All multi-byte reads are little-endian: 16-bit values are
/// reconstructed as `low | (high << 8)` and 32-bit values from four
/// bytes the same way. Every read advances the cursor; running off the
/// end of the buffer fails with a `Truncated` error naming the field
/// that was being read.
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(LoadError::Truncated {
                field,
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub(crate) fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    pub(crate) fn read_u16_le(&mut self, field: &'static str) -> Result<u16> {
        let b = self.take(2, field)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_u32_le(&mut self, field: &'static str) -> Result<u32> {
        let b = self.take(4, field)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn skip(&mut self, n: usize, field: &'static str) -> Result<()> {
        self.take(n, field).map(|_| ())
    }

    /// Length-prefixed string: u16 length followed by that many bytes.
    /// Trailing NULs and whitespace are stripped.
    pub(crate) fn read_string(&mut self, field: &'static str) -> Result<String> {
        let len = self.read_u16_le(field)? as usize;
        let bytes = self.take(len, field)?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.trim_end_matches('\0').trim_end().to_string()),
            Err(_) => Err(LoadError::Malformed(format!(
                "{field} contains non-text bytes"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ByteCursor;
    use crate::LoadError;

    #[test]
    fn reads_little_endian_values() {
        let data = [0x2A, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_u8("byte").unwrap(), 0x2A);
        assert_eq!(cur.read_u16_le("word").unwrap(), 0x1234);
        assert_eq!(cur.read_u32_le("dword").unwrap(), 0x12345678);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn skip_advances_past_filler() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x05];
        let mut cur = ByteCursor::new(&data);
        cur.skip(4, "filler").unwrap();
        assert_eq!(cur.read_u8("value").unwrap(), 5);
    }

    #[test]
    fn truncated_read_names_the_field() {
        let data = [0x01, 0x02];
        let mut cur = ByteCursor::new(&data);
        let err = cur.read_u32_le("tonnage").unwrap_err();
        match err {
            LoadError::Truncated {
                field,
                offset,
                needed,
                remaining,
            } => {
                assert_eq!(field, "tonnage");
                assert_eq!(offset, 0);
                assert_eq!(needed, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reads_length_prefixed_string() {
        let data = [0x05, 0x00, b'A', b't', b'l', b'a', b's'];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_string("chassis").unwrap(), "Atlas");
    }

    #[test]
    fn string_shorter_than_length_prefix_is_truncated() {
        let data = [0x08, 0x00, b'A', b't'];
        let mut cur = ByteCursor::new(&data);
        assert!(matches!(
            cur.read_string("chassis").unwrap_err(),
            LoadError::Truncated { .. }
        ));
    }
}
