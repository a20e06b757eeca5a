//! Little-endian cursor over an in-memory .ehm file

use super::FormatError;

pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        if self.remaining() < len {
            return Err(FormatError::UnexpectedEof {
                offset: self.offset,
                needed: len - self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn u32(&mut self) -> Result<u32, FormatError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    pub(crate) fn u64(&mut self) -> Result<u64, FormatError> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    pub(crate) fn f32(&mut self) -> Result<f32, FormatError> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    /// Read a u64 element count and check that `count × min_record_size` bytes remain
    pub(crate) fn count(&mut self, min_record_size: usize) -> Result<usize, FormatError> {
        let offset = self.offset;
        let count = self.u64()?;
        let count =
            usize::try_from(count).map_err(|_| FormatError::CountOverflow { count, offset })?;
        let needed = count
            .checked_mul(min_record_size)
            .ok_or(FormatError::CountOverflow {
                count: count as u64,
                offset,
            })?;
        if needed > self.remaining() {
            return Err(FormatError::UnexpectedEof {
                offset: self.offset,
                needed: needed - self.remaining(),
            });
        }
        Ok(count)
    }

    pub(crate) fn string(&mut self) -> Result<String, FormatError> {
        let len = self.count(1)?;
        let offset = self.offset;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::InvalidUtf8 { offset })
    }

    pub(crate) fn matrix(&mut self) -> Result<[f32; 16], FormatError> {
        let mut m = [0.0f32; 16];
        for v in m.iter_mut() {
            *v = self.f32()?;
        }
        Ok(m)
    }
}
