// HDLC bit stuffing. The body between the two flags may never show more
// than five consecutive 1 bits on the wire, so the flag pattern stays
// unique. A run of seven 1 bits is the HDLC abort/idle pattern.

use crate::error::LinkError;
use crate::utils::consts::AX25_FLAG_BITS;

const ABORT_RUN: u32 = 7;

/// Expand an unstuffed frame (both flag bytes present) into a
/// one-bit-per-byte stream with stuffing applied to the body.
///
/// The flags pass through verbatim. Body bytes are scanned LSB first;
/// after any run of five 1 bits a 0 is inserted, whatever the next bit is.
pub fn stuff_frame(frame: &[u8]) -> Result<Vec<u8>, LinkError> {
    if frame.len() < 2 {
        return Err(LinkError::InvalidParam("frame must include both flag bytes"));
    }

    let body = &frame[1..frame.len() - 1];
    let mut bits = Vec::with_capacity(16 + body.len() * 8 + body.len() * 8 / 5);
    bits.extend_from_slice(&AX25_FLAG_BITS);

    let mut ones = 0u32;
    for i in 0..body.len() * 8 {
        let bit = (body[i / 8] >> (i % 8)) & 1;
        if ones == 5 {
            bits.push(0);
            ones = 0;
        }
        bits.push(bit);
        if bit == 1 {
            ones += 1;
            if ones >= ABORT_RUN {
                return Err(LinkError::EncodeAbort);
            }
        } else {
            ones = 0;
        }
    }

    bits.extend_from_slice(&AX25_FLAG_BITS);
    Ok(bits)
}

/// Remove stuff bits from the body bits found between two flags. After
/// five consecutive 1 bits the next bit must be the stuffed 0 and is
/// dropped; a sixth 1 means the frame was cut by an abort or noise.
pub fn unstuff_body(stuffed: &[u8]) -> Result<Vec<u8>, LinkError> {
    let mut bits = Vec::with_capacity(stuffed.len());
    let mut ones = 0u32;

    for &bit in stuffed {
        if ones == 5 {
            if bit != 0 {
                return Err(LinkError::DecodeDesync(
                    "six consecutive 1 bits inside frame body",
                ));
            }
            ones = 0;
            continue;
        }
        bits.push(bit);
        if bit == 1 {
            ones += 1;
        } else {
            ones = 0;
        }
    }

    Ok(bits)
}
