// Unstuffed frame assembly.
// Format: [Flag] [Addr:14] [Ctrl:1-2] [PID:1, I/UI only] [Info:0-240] [FCS:2] [Flag]

use crate::error::LinkError;
use crate::link::crc;
use crate::utils::consts::{
    AX25_ADDR_LEN, AX25_FLAG, AX25_MAX_INFO_LEN, AX25_PID_NO_LAYER3,
};

/// AX.25 frame types. Only UI frames carry traffic on this link; the
/// others are recognized so callers get a clean rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Information frame
    I,
    /// Supervisory frame
    S,
    /// Unnumbered frame
    U,
    /// Unnumbered Information frame
    Ui,
}

impl FrameType {
    /// I and UI frames carry a PID byte after the control field.
    pub fn has_pid(self) -> bool {
        matches!(self, FrameType::I | FrameType::Ui)
    }
}

/// Assemble the in-memory frame before stuffing. Both delimiter flags are
/// present; the FCS covers everything between them except itself.
///
/// The control field goes out low byte first; the FCS is the one field
/// sent high byte first. That asymmetry is AX.25.
pub fn build_frame(
    info: &[u8],
    frame_type: FrameType,
    addr: &[u8],
    ctrl: u16,
    ctrl_len: usize,
) -> Result<Vec<u8>, LinkError> {
    if info.len() > AX25_MAX_INFO_LEN {
        return Err(LinkError::InvalidParam("info field longer than 240 bytes"));
    }
    if addr.len() != AX25_ADDR_LEN {
        return Err(LinkError::InvalidParam("address field must be 14 bytes"));
    }
    if ctrl_len != 1 && ctrl_len != 2 {
        return Err(LinkError::InvalidParam("control field must be 1 or 2 bytes"));
    }

    let mut frame = Vec::with_capacity(1 + AX25_ADDR_LEN + ctrl_len + 1 + info.len() + 3);
    frame.push(AX25_FLAG);
    frame.extend_from_slice(addr);
    frame.extend_from_slice(&ctrl.to_le_bytes()[..ctrl_len]);
    if frame_type.has_pid() {
        frame.push(AX25_PID_NO_LAYER3);
    }
    frame.extend_from_slice(info);

    // FCS over addr + ctrl + PID + info; the leading flag is not covered
    let fcs = crc::fcs(&frame[1..]);
    frame.extend_from_slice(&fcs.to_be_bytes());
    frame.push(AX25_FLAG);

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::address::{encode_address_field, StationId};
    use crate::utils::consts::AX25_CTRL_UI;

    fn test_addr() -> [u8; AX25_ADDR_LEN] {
        let dest = StationId::new("DEST", 0).unwrap();
        let src = StationId::new("SRC", 0).unwrap();
        encode_address_field(&dest, &src)
    }

    #[test]
    fn test_minimal_ui_frame_layout() {
        let addr = test_addr();
        let frame = build_frame(b"A", FrameType::Ui, &addr, AX25_CTRL_UI as u16, 1).unwrap();

        // FLAG + ADDR(14) + CTRL + PID + INFO(1) + FCS(2) + FLAG = 21
        assert_eq!(frame.len(), 21);
        assert_eq!(frame[0], AX25_FLAG);
        assert_eq!(*frame.last().unwrap(), AX25_FLAG);
        assert_eq!(frame[15], AX25_CTRL_UI);
        assert_eq!(frame[16], AX25_PID_NO_LAYER3);
        assert_eq!(frame[17], b'A');
    }

    #[test]
    fn test_fcs_is_high_byte_first() {
        let addr = test_addr();
        let frame = build_frame(b"Test", FrameType::Ui, &addr, AX25_CTRL_UI as u16, 1).unwrap();

        let fcs = crc::fcs(&frame[1..frame.len() - 3]);
        assert_eq!(frame[frame.len() - 3], (fcs >> 8) as u8);
        assert_eq!(frame[frame.len() - 2], (fcs & 0xFF) as u8);
    }

    #[test]
    fn test_two_byte_control_is_low_byte_first() {
        let addr = test_addr();
        let frame = build_frame(b"", FrameType::S, &addr, 0x1234, 2).unwrap();

        assert_eq!(frame[15], 0x34);
        assert_eq!(frame[16], 0x12);
        // S frames carry no PID; FCS follows the control field directly
        assert_eq!(frame.len(), 1 + 14 + 2 + 2 + 1);
    }

    #[test]
    fn test_pid_only_for_i_and_ui() {
        let addr = test_addr();
        let with_pid = build_frame(b"", FrameType::I, &addr, 0x00, 1).unwrap();
        let without = build_frame(b"", FrameType::U, &addr, 0x03, 1).unwrap();
        assert_eq!(with_pid.len(), without.len() + 1);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let addr = test_addr();
        let long = vec![0u8; AX25_MAX_INFO_LEN + 1];
        assert_eq!(
            build_frame(&long, FrameType::Ui, &addr, 0x03, 1),
            Err(LinkError::InvalidParam("info field longer than 240 bytes"))
        );
        assert!(build_frame(b"x", FrameType::Ui, &addr[..13], 0x03, 1).is_err());
        assert!(build_frame(b"x", FrameType::Ui, &addr, 0x03, 3).is_err());
        assert!(build_frame(b"x", FrameType::Ui, &addr, 0x03, 0).is_err());
    }

    #[test]
    fn test_max_info_accepted() {
        let addr = test_addr();
        let info = vec![0x55u8; AX25_MAX_INFO_LEN];
        let frame = build_frame(&info, FrameType::Ui, &addr, 0x03, 1).unwrap();
        assert_eq!(frame.len(), 1 + 14 + 1 + 1 + 240 + 2 + 1);
    }
}
