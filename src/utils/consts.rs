// ============================================================================
// AX.25 framing parameters
// ============================================================================

/// Frame delimiter byte (01111110)
pub const AX25_FLAG: u8 = 0x7E;

/// The flag as an expanded bit pattern, transmission order
pub const AX25_FLAG_BITS: [u8; 8] = [0, 1, 1, 1, 1, 1, 1, 0];

/// Two-address field length (destination + source, no digipeaters)
pub const AX25_ADDR_LEN: usize = 14;

/// Maximum callsign length in characters
pub const AX25_CALLSIGN_LEN: usize = 6;

/// Highest SSID a station can carry (4-bit field)
pub const AX25_MAX_SSID: u8 = 15;

/// Maximum information field length (bytes)
pub const AX25_MAX_INFO_LEN: usize = 240;

/// Decoded header length ahead of the payload: address + control + PID
pub const AX25_HEADER_LEN: usize = AX25_ADDR_LEN + 1 + 1;

/// Control byte for Unnumbered Information frames
pub const AX25_CTRL_UI: u8 = 0x03;

/// PID byte meaning "no layer 3 protocol"
pub const AX25_PID_NO_LAYER3: u8 = 0xF0;

/// Frame Check Sequence length (bytes)
pub const AX25_FCS_LEN: usize = 2;

/// Upper bound on a packed wire frame; decode rejects anything longer
pub const MAX_WIRE_FRAME_LEN: usize = 500;

// ============================================================================
// Link identity defaults
// ============================================================================

/// Satellite (source) callsign of the reference build
pub const DEFAULT_SAT_CALLSIGN: &str = "PARSAT";

/// Satellite SSID
pub const DEFAULT_SAT_SSID: u8 = 0;

/// Ground station (destination) callsign of the reference build
pub const DEFAULT_GRD_CALLSIGN: &str = "ABCD";

/// Ground station SSID
pub const DEFAULT_GRD_SSID: u8 = 0;

// ============================================================================
// Matrix fragmentation parameters
// ============================================================================

/// Fixed metadata header inside every fragment's information field
pub const MATRIX_METADATA_LEN: usize = 11;

/// Most data bytes one fragment can carry after its metadata header
pub const MATRIX_MAX_CHUNK_DATA: usize = AX25_MAX_INFO_LEN - MATRIX_METADATA_LEN;

/// Default target data bytes per fragment
pub const MATRIX_CHUNK_SIZE: usize = 200;

/// Dimension guardrails
pub const MATRIX_MAX_ROWS: u16 = 1000;
pub const MATRIX_MAX_COLS: u16 = 1000;

/// Length prefix ahead of each wire frame in a fragment stream (bytes)
pub const MATRIX_LEN_PREFIX: usize = 2;

// ============================================================================
// Misc
// ============================================================================

/// Log level fallback (overridden by RUST_LOG)
pub const LOG_LEVEL: &str = "info";
