use std::io::{self, Read, Write};

const BUFFER_SIZE: usize = 8 * 1024;

#[inline(always)]
fn mask(len: u64) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1 << len) - 1
    }
}

/// MSB-first bit writer over any byte sink.
///
/// Complete bytes are staged in an internal buffer and handed to the sink in
/// blocks. [`close`](BinaryWriter::close) zero-pads the last partial byte.
pub struct BinaryWriter<W: Write> {
    os: W,
    buffer: Vec<u8>,
    pub written_bits: u64,
    current: u8,
    free: usize,
    closed: bool,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(os: W) -> Self {
        BinaryWriter {
            os,
            buffer: Vec::with_capacity(BUFFER_SIZE),
            written_bits: 0,
            current: 0,
            free: 8,
            closed: false,
        }
    }

    #[inline(always)]
    fn write(&mut self, b: u8) -> io::Result<()> {
        self.buffer.push(b);
        if self.buffer.len() >= BUFFER_SIZE {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn flush_buffer(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            self.os.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }

    /// Stores the low `len` bits of `b` in the current byte; `len` must fit in it.
    #[inline(always)]
    fn write_in_current(&mut self, b: u64, len: u64) -> io::Result<u64> {
        debug_assert!(len as usize <= self.free);
        self.free -= len as usize;
        self.current |= ((b & mask(len)) << self.free) as u8;

        if self.free == 0 {
            self.write(self.current)?;
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len;
        Ok(len)
    }

    /// Appends the low `len` bits of `x`, most significant first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> io::Result<u64> {
        assert!(len <= 64, "Cannot write {} bits from an integer", len);

        let mut left = len;
        while left > 0 {
            let take = left.min(self.free as u64);
            self.write_in_current(x >> (left - take), take)?;
            left -= take;
        }

        Ok(len)
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) -> io::Result<u64> {
        self.write_in_current(bit as u64, 1)
    }

    /// Pads the pending byte with zeros and writes everything out to the sink.
    fn flush_all(&mut self) -> io::Result<()> {
        if self.free < 8 {
            let b = self.current;
            self.write(b)?;
            self.free = 8;
            self.current = 0;
        }
        self.flush_buffer()?;
        self.os.flush()
    }

    /// Flushes the partial byte (zero padded) and releases the sink.
    pub fn close(mut self) -> io::Result<()> {
        self.closed = true;
        self.flush_all()
    }
}

impl<W: Write> Drop for BinaryWriter<W> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.flush_all();
        }
    }
}

/// MSB-first bit reader over any byte source.
pub struct BinaryReader<R: Read> {
    is: R,
    buffer: Box<[u8]>,
    pos: usize,
    avail: usize,
    pub read_bits: u64,
    current: u8,
    fill: usize,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(input_stream: R) -> Self {
        BinaryReader {
            is: input_stream,
            buffer: vec![0; BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            avail: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
        }
    }

    /// Reads the next byte from the source, `None` once it is exhausted.
    #[inline(always)]
    fn read(&mut self) -> io::Result<Option<u8>> {
        if self.avail == 0 {
            self.pos = 0;
            self.avail = loop {
                match self.is.read(&mut self.buffer) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            if self.avail == 0 {
                return Ok(None);
            }
        }

        self.avail -= 1;
        self.pos += 1;
        Ok(Some(self.buffer[self.pos - 1]))
    }

    /// Takes `len` bits out of the current byte; `len` must not exceed `fill`.
    #[inline(always)]
    fn read_from_current(&mut self, len: u64) -> u64 {
        debug_assert!(len as usize <= self.fill);
        self.fill -= len as usize;
        self.read_bits += len;
        (self.current as u64 >> self.fill) & mask(len)
    }

    /// Returns the next `len` bits as an unsigned integer, or `None` if the
    /// source ends first.
    #[inline(always)]
    pub fn read_int(&mut self, len: u64) -> io::Result<Option<u64>> {
        assert!(len <= 64, "Cannot read {} bits into an integer", len);

        let mut x = 0u64;
        let mut left = len;
        while left > 0 {
            if self.fill == 0 {
                match self.read()? {
                    Some(b) => {
                        self.current = b;
                        self.fill = 8;
                    }
                    None => return Ok(None),
                }
            }

            let take = left.min(self.fill as u64);
            x = (x << take) | self.read_from_current(take);
            left -= take;
        }

        Ok(Some(x))
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        Ok(self.read_int(1)?.map(|b| b == 1))
    }
}
