use crate::{max_decoded_len, CobsError, InvalidArguments, Malformed, DELIMITER, MAX_CODE};
use std::io;

/// Reconstruct the payload stuffed in `src` into `dst`, returning the number
/// of bytes written.
///
/// `src` must not contain the frame delimiter. `dst` must hold at least
/// [`max_decoded_len`]`(src.len())` bytes.
pub fn decode(dst: &mut [u8], src: &[u8]) -> Result<usize, CobsError> {
    check_args(dst.len(), src.len())?;

    let mut read = 0;
    let mut written = 0;
    while read < src.len() {
        let offset = read;
        let code = src[read];
        read += 1;
        if code == DELIMITER {
            debug!("reject decode: zero code at {offset}");
            return Err(Malformed::ZeroCode { offset }.into());
        }

        let run = code as usize - 1;
        let available = src.len() - read;
        if run > available {
            debug!("reject decode: block at {offset} wants {run}, {available} left");
            return Err(Malformed::Truncated {
                offset,
                missing: run - available,
            }
            .into());
        }

        let block = &src[read..read + run];
        if let Some(pos) = block.iter().position(|&b| b == DELIMITER) {
            debug!("reject decode: zero literal at {}", read + pos);
            return Err(Malformed::ZeroLiteral { offset: read + pos }.into());
        }
        trace!("block at {offset}: code {code:#04x}");
        dst[written..written + run].copy_from_slice(block);
        read += run;
        written += run;

        // the last block carries no zero
        if read < src.len() && code != MAX_CODE {
            dst[written] = 0;
            written += 1;
        }
    }
    Ok(written)
}

/// Reconstruct the payload stuffed in `src` into a freshly allocated buffer.
pub fn decode_to_vec(src: &[u8]) -> Result<Vec<u8>, CobsError> {
    let mut out = vec![0; max_decoded_len(src.len())];
    let len = decode(&mut out, src)?;
    out.truncate(len);
    Ok(out)
}

fn check_args(dst_len: usize, src_len: usize) -> Result<(), CobsError> {
    if src_len == 0 {
        debug!("reject decode: empty source");
        return Err(InvalidArguments::EmptySource.into());
    }
    let required = max_decoded_len(src_len);
    if dst_len < required {
        debug!("reject decode: destination {dst_len} < {required}");
        return Err(InvalidArguments::DestinationTooSmall {
            required,
            available: dst_len,
        }
        .into());
    }
    Ok(())
}

/// Incremental COBS decoder.
pub struct Decoder<W> {
    /// literals left in the current block, 0 when a code byte is expected
    remaining: u8,
    pending_zero: bool,
    block_start: usize,
    offset: usize,
    writer: W,
}

impl<W: io::Write> Decoder<W> {
    pub fn new(writer: W) -> Decoder<W> {
        Decoder {
            remaining: 0,
            pending_zero: false,
            block_start: 0,
            offset: 0,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> io::Result<()> {
        let offset = self.offset;
        if self.remaining == 0 {
            if byte == DELIMITER {
                debug!("reject decode: zero code at {offset}");
                return Err(CobsError::from(Malformed::ZeroCode { offset }).into());
            }
            // the previous block was not the last one
            if self.pending_zero {
                self.writer.write_all(&[0])?;
            }
            trace!("block at {offset}: code {byte:#04x}");
            self.remaining = byte - 1;
            self.pending_zero = byte != MAX_CODE;
            self.block_start = offset;
        } else {
            if byte == DELIMITER {
                debug!("reject decode: zero literal at {offset}");
                return Err(CobsError::from(Malformed::ZeroLiteral { offset }).into());
            }
            self.writer.write_all(&[byte])?;
            self.remaining -= 1;
        }
        self.offset += 1;
        Ok(())
    }

    /// Check the last block is complete and hand back the writer.
    pub fn finalize(mut self) -> io::Result<W> {
        if self.offset == 0 {
            debug!("reject decode: empty source");
            return Err(CobsError::from(InvalidArguments::EmptySource).into());
        }
        if self.remaining != 0 {
            debug!(
                "reject decode: block at {} is short by {}",
                self.block_start, self.remaining
            );
            return Err(CobsError::from(Malformed::Truncated {
                offset: self.block_start,
                missing: self.remaining as usize,
            })
            .into());
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: io::Write> io::Write for Decoder<W> {
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
