use crate::utils::consts::{
    DEFAULT_GRD_CALLSIGN, DEFAULT_GRD_SSID, DEFAULT_SAT_CALLSIGN, DEFAULT_SAT_SSID,
    MATRIX_CHUNK_SIZE, MATRIX_MAX_CHUNK_DATA, MATRIX_MAX_COLS, MATRIX_MAX_ROWS,
};

/// Link configuration: the station identity pair plus matrix-layer tuning.
///
/// The reference firmware hard-wired these as compile-time constants; here
/// they are injected at codec construction so several peer identities can
/// coexist in one process.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Source (satellite) callsign, 1-6 uppercase ASCII letters or digits
    pub sat_callsign: String,
    /// Source SSID, 0-15
    pub sat_ssid: u8,
    /// Destination (ground station) callsign
    pub grd_callsign: String,
    /// Destination SSID, 0-15
    pub grd_ssid: u8,
    /// Target data bytes per matrix fragment
    pub matrix_chunk_size: usize,
    /// Most rows a matrix may have
    pub matrix_max_rows: u16,
    /// Most columns a matrix may have
    pub matrix_max_cols: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            sat_callsign: DEFAULT_SAT_CALLSIGN.to_string(),
            sat_ssid: DEFAULT_SAT_SSID,
            grd_callsign: DEFAULT_GRD_CALLSIGN.to_string(),
            grd_ssid: DEFAULT_GRD_SSID,
            matrix_chunk_size: MATRIX_CHUNK_SIZE,
            matrix_max_rows: MATRIX_MAX_ROWS,
            matrix_max_cols: MATRIX_MAX_COLS,
        }
    }
}

impl LinkConfig {
    /// Data bytes per fragment after the metadata header. Never more than
    /// the information field can hold, never zero.
    pub fn chunk_data_size(&self) -> usize {
        self.matrix_chunk_size.clamp(1, MATRIX_MAX_CHUNK_DATA)
    }
}
