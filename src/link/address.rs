use std::fmt;

use crate::error::LinkError;
use crate::utils::consts::{AX25_ADDR_LEN, AX25_CALLSIGN_LEN, AX25_MAX_SSID};

/// A station identity: callsign plus Secondary Station Identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationId {
    callsign: String,
    ssid: u8,
}

impl StationId {
    pub fn new(callsign: &str, ssid: u8) -> Result<Self, LinkError> {
        if callsign.is_empty() || callsign.len() > AX25_CALLSIGN_LEN {
            return Err(LinkError::InvalidParam("callsign must be 1-6 characters"));
        }
        if !callsign
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(LinkError::InvalidParam(
                "callsign must be uppercase ASCII letters or digits",
            ));
        }
        if ssid > AX25_MAX_SSID {
            return Err(LinkError::InvalidParam("SSID must be 0-15"));
        }
        Ok(Self {
            callsign: callsign.to_string(),
            ssid,
        })
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn ssid(&self) -> u8 {
        self.ssid
    }

    /// Write the 7 wire bytes of this address. Callsign bytes go out
    /// shifted left by 1, space padded; the SSID byte carries the reserved
    /// bits 0x60 and, on the final address of the field, the
    /// end-of-address bit.
    fn encode_into(&self, out: &mut [u8], last: bool) {
        let padded = self.callsign.bytes().chain(std::iter::repeat(b' '));
        for (slot, byte) in out[..AX25_CALLSIGN_LEN].iter_mut().zip(padded) {
            *slot = byte << 1;
        }
        out[AX25_CALLSIGN_LEN] = ((self.ssid & 0x0F) << 1) | 0x60 | (last as u8);
    }

    /// Read a station identity back out of 7 wire bytes.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, LinkError> {
        if bytes.len() < AX25_CALLSIGN_LEN + 1 {
            return Err(LinkError::DecodeDesync("address shorter than 7 bytes"));
        }
        let callsign: String = bytes[..AX25_CALLSIGN_LEN]
            .iter()
            .map(|&b| (b >> 1) as char)
            .collect::<String>()
            .trim_end()
            .to_string();
        let ssid = (bytes[AX25_CALLSIGN_LEN] >> 1) & 0x0F;
        Ok(Self { callsign, ssid })
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ssid > 0 {
            write!(f, "{}-{}", self.callsign, self.ssid)
        } else {
            write!(f, "{}", self.callsign)
        }
    }
}

/// Build the 14-byte address field: destination first, then source with
/// the end-of-address bit set.
pub fn encode_address_field(dest: &StationId, source: &StationId) -> [u8; AX25_ADDR_LEN] {
    let mut field = [0u8; AX25_ADDR_LEN];
    dest.encode_into(&mut field[..7], false);
    source.encode_into(&mut field[7..], true);
    field
}
