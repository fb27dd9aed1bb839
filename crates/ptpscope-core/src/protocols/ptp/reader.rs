use super::error::PtpError;

pub struct PtpReader<'a> {
    data: &'a [u8],
}

impl<'a> PtpReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), PtpError> {
        if self.data.len() < needed {
            return Err(PtpError::TooShort {
                needed,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, PtpError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(PtpError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&self, range: std::ops::Range<usize>) -> Result<u32, PtpError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 4 {
            return Err(PtpError::TooShort {
                needed: 4,
                actual: bytes.len(),
            });
        }
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], PtpError> {
        self.data.get(range.clone()).ok_or(PtpError::TooShort {
            needed: range.end,
            actual: self.data.len(),
        })
    }

    /// Remaining bytes from `offset` to the end of the input, empty when
    /// `offset` is past the end.
    pub fn tail(&self, offset: usize) -> &'a [u8] {
        self.data.get(offset..).unwrap_or(&[])
    }
}
