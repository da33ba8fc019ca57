//! Little-endian primitive reader and writer.

use std::io::{Read, Write};

use crate::base::{AsgError, AsgResult};

/// Ordered primitive writes to an underlying byte sink.
pub struct BinaryWriter<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn write_u8(&mut self, value: u8) -> AsgResult<()> {
        self.write_bytes("BinaryWriter::write_u8", &[value])
    }

    pub fn write_bool(&mut self, value: bool) -> AsgResult<()> {
        self.write_bytes("BinaryWriter::write_bool", &[u8::from(value)])
    }

    pub fn write_u16(&mut self, value: u16) -> AsgResult<()> {
        self.write_bytes("BinaryWriter::write_u16", &value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> AsgResult<()> {
        self.write_bytes("BinaryWriter::write_u32", &value.to_le_bytes())
    }

    /// Length-prefixed (u32) UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> AsgResult<()> {
        let len = u32::try_from(value.len()).map_err(|_| {
            AsgError::io(
                "BinaryWriter::write_string",
                format!("string of {} bytes is too long", value.len()),
            )
        })?;
        self.write_u32(len)?;
        self.write_bytes("BinaryWriter::write_string", value.as_bytes())
    }

    pub fn flush(&mut self) -> AsgResult<()> {
        self.inner
            .flush()
            .map_err(|e| AsgError::from_io("BinaryWriter::flush", e))
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(mut self) -> AsgResult<W> {
        self.flush()?;
        Ok(self.inner)
    }

    fn write_bytes(&mut self, location: &'static str, bytes: &[u8]) -> AsgResult<()> {
        self.inner
            .write_all(bytes)
            .map_err(|e| AsgError::from_io(location, e))?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}

/// Ordered primitive reads from an underlying byte source.
pub struct BinaryReader<R: Read> {
    inner: R,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read_u8(&mut self) -> AsgResult<u8> {
        let mut buf = [0u8; 1];
        self.read_exact("BinaryReader::read_u8", &mut buf)?;
        Ok(buf[0])
    }

    pub fn read_bool(&mut self) -> AsgResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(AsgError::io(
                "BinaryReader::read_bool",
                format!("invalid boolean byte {other}"),
            )),
        }
    }

    pub fn read_u16(&mut self) -> AsgResult<u16> {
        let mut buf = [0u8; 2];
        self.read_exact("BinaryReader::read_u16", &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> AsgResult<u32> {
        let mut buf = [0u8; 4];
        self.read_exact("BinaryReader::read_u32", &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Length-prefixed (u32) UTF-8 string.
    ///
    /// The buffer only grows with bytes actually read, so a corrupt length
    /// prefix fails with `Io` instead of reserving its claimed size.
    pub fn read_string(&mut self) -> AsgResult<String> {
        const LOCATION: &str = "BinaryReader::read_string";

        let len = self.read_u32()?;
        let mut buf = Vec::new();
        let read = (&mut self.inner)
            .take(u64::from(len))
            .read_to_end(&mut buf)
            .map_err(|e| AsgError::from_io(LOCATION, e))?;
        if read as u64 != u64::from(len) {
            return Err(AsgError::io(
                LOCATION,
                format!("string claims {len} bytes but only {read} remain"),
            ));
        }
        String::from_utf8(buf)
            .map_err(|e| AsgError::io("BinaryReader::read_string", format!("invalid UTF-8: {e}")))
    }

    fn read_exact(&mut self, location: &'static str, buf: &mut [u8]) -> AsgResult<()> {
        self.inner
            .read_exact(buf)
            .map_err(|e| AsgError::from_io(location, e))
    }
}
