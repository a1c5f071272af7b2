//! AX.25 v2.2 UI-frame link codec for a satellite/ground pair, with a
//! fragmentation layer that carries two-dimensional byte arrays across
//! many frames.
//!
//! The codec produces and consumes HDLC-framed byte streams: flag
//! delimiters, a 14-byte two-address field, a 16-bit CRC (FCS), and
//! bit stuffing so the flag pattern never appears inside a frame. It
//! presumes a reliable byte pipe; radio error correction and KISS
//! framing belong to the peer.
//!
//! ```
//! use satlink::{Ax25Codec, FrameType};
//!
//! let codec = Ax25Codec::new_default();
//! let wire = codec.encode(b"Hello", FrameType::Ui).unwrap();
//! let decoded = codec.recv(&wire).unwrap();
//! assert_eq!(Ax25Codec::payload_of(&decoded).unwrap(), b"Hello");
//! ```

pub mod config;
pub mod error;
pub mod link;
pub mod matrix;
pub mod utils;

pub use config::LinkConfig;
pub use error::LinkError;
pub use link::{Ax25Codec, FrameType, StationId};
pub use matrix::{FragmentStream, MatrixFragmenter, MatrixImage, MatrixReassembler};
