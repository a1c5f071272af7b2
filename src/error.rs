use thiserror::Error;

/// Everything that can go wrong while encoding or decoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid parameter: {0}")]
    InvalidParam(&'static str),

    #[error("bit stuffing aborted: run of seven 1 bits in frame body")]
    EncodeAbort,

    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferOverflow { needed: usize, available: usize },

    #[error("frame desynchronized: {0}")]
    DecodeDesync(&'static str),

    #[error("FCS mismatch: frame carries {sent:#06x}, computed {computed:#06x}")]
    FcsMismatch { sent: u16, computed: u16 },
}

impl LinkError {
    /// Numeric return code for peers that speak the legacy convention
    /// (negative code on failure, byte count on success).
    pub fn code(&self) -> i32 {
        match self {
            LinkError::InvalidParam(_) => -2,
            LinkError::EncodeAbort => -1,
            LinkError::BufferOverflow { .. } => -3,
            LinkError::DecodeDesync(_) => -1,
            LinkError::FcsMismatch { .. } => -4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_codes() {
        assert_eq!(LinkError::InvalidParam("x").code(), -2);
        assert_eq!(LinkError::EncodeAbort.code(), -1);
        assert_eq!(
            LinkError::BufferOverflow {
                needed: 10,
                available: 5
            }
            .code(),
            -3
        );
        assert_eq!(LinkError::DecodeDesync("x").code(), -1);
        assert_eq!(
            LinkError::FcsMismatch {
                sent: 0,
                computed: 1
            }
            .code(),
            -4
        );
    }
}
