use crate::{max_encoded_len, CobsError, InvalidArguments, DELIMITER, MAX_CODE, MAX_RUN};
use std::io;

/// Stuff `src` into `dst`, returning the number of bytes written.
///
/// `dst` must hold at least [`max_encoded_len`]`(src.len())` bytes.
/// Nothing is written when the arguments are rejected.
pub fn encode(dst: &mut [u8], src: &[u8]) -> Result<usize, CobsError> {
    check_args(dst.len(), src.len())?;

    let last = src.len() - 1;
    let mut code_idx = 0;
    let mut out = 1;
    let mut code = 1u8;
    for (idx, &byte) in src.iter().enumerate() {
        if byte == DELIMITER {
            trace!("close block at {code_idx} with code {code:#04x} on zero");
            dst[code_idx] = code;
            code_idx = out;
            out += 1;
            code = 1;
            continue;
        }

        dst[out] = byte;
        out += 1;
        code += 1;
        // a full block ending the payload is closed after the loop
        if code == MAX_CODE && idx != last {
            trace!("close full block at {code_idx}");
            dst[code_idx] = code;
            code_idx = out;
            out += 1;
            code = 1;
        }
    }
    trace!("close last block at {code_idx} with code {code:#04x}");
    dst[code_idx] = code;

    debug_assert!(out <= max_encoded_len(src.len()));
    Ok(out)
}

/// Stuff `src` into a freshly allocated buffer.
pub fn encode_to_vec(src: &[u8]) -> Result<Vec<u8>, CobsError> {
    let mut out = vec![0; max_encoded_len(src.len())];
    let len = encode(&mut out, src)?;
    out.truncate(len);
    Ok(out)
}

fn check_args(dst_len: usize, src_len: usize) -> Result<(), CobsError> {
    if src_len == 0 {
        debug!("reject encode: empty source");
        return Err(InvalidArguments::EmptySource.into());
    }
    let required = max_encoded_len(src_len);
    if dst_len < required {
        debug!("reject encode: destination {dst_len} < {required}");
        return Err(InvalidArguments::DestinationTooSmall {
            required,
            available: dst_len,
        }
        .into());
    }
    Ok(())
}

/// Incremental COBS encoder.
///
/// Buffers at most one block, so each block is written to `W` once its
/// length is known.
pub struct Encoder<W> {
    block: [u8; MAX_RUN],
    len: usize,
    seen: bool,
    writer: W,
}

impl<W: io::Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Encoder {
            block: [0; MAX_RUN],
            len: 0,
            seen: false,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> io::Result<()> {
        self.seen = true;
        // a full block is only closed once more payload follows
        if self.len == MAX_RUN {
            self.emit_block()?;
        }
        if byte == DELIMITER {
            self.emit_block()
        } else {
            self.block[self.len] = byte;
            self.len += 1;
            Ok(())
        }
    }

    #[inline(always)]
    fn emit_block(&mut self) -> io::Result<()> {
        let code = self.len as u8 + 1;
        trace!("emit block with code {code:#04x}");
        self.writer.write_all(&[code])?;
        self.writer.write_all(&self.block[..self.len])?;
        self.len = 0;
        Ok(())
    }

    /// Emit the last block and hand back the writer.
    pub fn finalize(mut self) -> io::Result<W> {
        if !self.seen {
            debug!("reject encode: empty source");
            return Err(CobsError::from(InvalidArguments::EmptySource).into());
        }
        self.emit_block()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: io::Write> io::Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            self.update(*byte)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
