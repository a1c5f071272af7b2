// Link layer: the AX.25 UI frame codec and its building blocks.
// Encode path: builder (address + CRC) -> stuffing -> bit packing.
// Decode path runs the same stages in reverse.

pub mod address;
pub mod bits;
pub mod builder;
pub mod codec;
pub mod crc;
pub mod stuffing;

pub use address::StationId;
pub use builder::FrameType;
pub use codec::Ax25Codec;
