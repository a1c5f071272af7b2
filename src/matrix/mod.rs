// Matrix fragmentation: carries a rows x cols array of fixed-width
// elements across many UI frames. Every fragment's information field
// starts with an 11-byte metadata header, so the receiver can rebuild
// shape and ordering with no side channel. The fragment stream is
// length-prefixed wire frames back to back and is assumed in-order and
// complete.

use tracing::debug;

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::link::builder::FrameType;
use crate::link::codec::Ax25Codec;
use crate::utils::consts::{
    AX25_HEADER_LEN, MATRIX_LEN_PREFIX, MATRIX_METADATA_LEN, MAX_WIRE_FRAME_LEN,
};

/// Per-fragment metadata, the first 11 bytes of the information field.
/// All multi-byte fields are big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub total_chunks: u16,
    pub chunk_index: u16,
    pub rows: u16,
    pub cols: u16,
    pub data_len: u16,
    pub element_size: u8,
}

impl ChunkHeader {
    pub fn to_bytes(&self) -> [u8; MATRIX_METADATA_LEN] {
        let mut out = [0u8; MATRIX_METADATA_LEN];
        out[0..2].copy_from_slice(&self.total_chunks.to_be_bytes());
        out[2..4].copy_from_slice(&self.chunk_index.to_be_bytes());
        out[4..6].copy_from_slice(&self.rows.to_be_bytes());
        out[6..8].copy_from_slice(&self.cols.to_be_bytes());
        out[8..10].copy_from_slice(&self.data_len.to_be_bytes());
        out[10] = self.element_size;
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LinkError> {
        if bytes.len() < MATRIX_METADATA_LEN {
            return Err(LinkError::DecodeDesync(
                "fragment too short for the metadata header",
            ));
        }
        Ok(Self {
            total_chunks: u16::from_be_bytes([bytes[0], bytes[1]]),
            chunk_index: u16::from_be_bytes([bytes[2], bytes[3]]),
            rows: u16::from_be_bytes([bytes[4], bytes[5]]),
            cols: u16::from_be_bytes([bytes[6], bytes[7]]),
            data_len: u16::from_be_bytes([bytes[8], bytes[9]]),
            element_size: bytes[10],
        })
    }
}

/// A fragmented matrix: `[len u16 BE][wire frame]` units back to back.
#[derive(Debug, Clone)]
pub struct FragmentStream {
    pub bytes: Vec<u8>,
    pub chunk_count: usize,
}

/// A reassembled matrix image with its latched shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixImage {
    pub data: Vec<u8>,
    pub rows: u16,
    pub cols: u16,
    pub element_size: u8,
}

/// Splits a flat matrix image into metadata-tagged UI frames.
pub struct MatrixFragmenter {
    codec: Ax25Codec,
    chunk_data_size: usize,
    max_rows: u16,
    max_cols: u16,
}

impl MatrixFragmenter {
    pub fn new(config: &LinkConfig) -> Result<Self, LinkError> {
        Ok(Self {
            codec: Ax25Codec::new(config)?,
            chunk_data_size: config.chunk_data_size(),
            max_rows: config.matrix_max_rows,
            max_cols: config.matrix_max_cols,
        })
    }

    pub fn new_default() -> Self {
        Self::new(&LinkConfig::default()).expect("default link configuration is valid")
    }

    /// Fragment `image`, the row-major byte image of a `rows x cols`
    /// array with `element_size`-byte elements.
    pub fn fragment(
        &self,
        image: &[u8],
        rows: u16,
        cols: u16,
        element_size: u8,
    ) -> Result<FragmentStream, LinkError> {
        if rows == 0 || cols == 0 || element_size == 0 {
            return Err(LinkError::InvalidParam("matrix dimensions must be non-zero"));
        }
        if rows > self.max_rows || cols > self.max_cols {
            return Err(LinkError::InvalidParam(
                "matrix dimensions exceed the configured bounds",
            ));
        }
        let total = rows as usize * cols as usize * element_size as usize;
        if image.len() != total {
            return Err(LinkError::InvalidParam(
                "image length does not match rows x cols x element size",
            ));
        }

        let chunks = total.div_ceil(self.chunk_data_size);
        if chunks > u16::MAX as usize {
            return Err(LinkError::InvalidParam(
                "matrix needs more than 65535 fragments",
            ));
        }

        let mut stream = Vec::with_capacity(chunks * (self.chunk_data_size + 64));
        let mut info = Vec::with_capacity(MATRIX_METADATA_LEN + self.chunk_data_size);
        let mut offset = 0usize;

        for index in 0..chunks {
            let data_len = self.chunk_data_size.min(total - offset);
            let header = ChunkHeader {
                total_chunks: chunks as u16,
                chunk_index: index as u16,
                rows,
                cols,
                data_len: data_len as u16,
                element_size,
            };

            info.clear();
            info.extend_from_slice(&header.to_bytes());
            info.extend_from_slice(&image[offset..offset + data_len]);

            let wire = self.codec.encode(&info, FrameType::Ui)?;
            stream.extend_from_slice(&(wire.len() as u16).to_be_bytes());
            stream.extend_from_slice(&wire);
            offset += data_len;
        }

        debug!(
            "Fragmented {}x{} matrix ({} bytes) into {} frames",
            rows, cols, total, chunks
        );
        Ok(FragmentStream {
            bytes: stream,
            chunk_count: chunks,
        })
    }
}

/// Walks a length-prefixed fragment stream and rebuilds the image.
pub struct MatrixReassembler {
    codec: Ax25Codec,
}

impl MatrixReassembler {
    pub fn new(config: &LinkConfig) -> Result<Self, LinkError> {
        Ok(Self {
            codec: Ax25Codec::new(config)?,
        })
    }

    pub fn new_default() -> Self {
        Self::new(&LinkConfig::default()).expect("default link configuration is valid")
    }

    /// Reassemble `total_chunks` fragments from `stream`. The shape is
    /// latched from the first chunk; every later chunk must match it and
    /// carry the expected index, or the stream is treated as corrupt.
    pub fn reassemble(
        &self,
        stream: &[u8],
        total_chunks: usize,
    ) -> Result<MatrixImage, LinkError> {
        if total_chunks == 0 {
            return Err(LinkError::InvalidParam(
                "fragment stream must hold at least one chunk",
            ));
        }

        let mut cursor = 0usize;
        let mut shape: Option<(u16, u16, u8)> = None;
        let mut data = Vec::new();

        for index in 0..total_chunks {
            let prefix = stream
                .get(cursor..cursor + MATRIX_LEN_PREFIX)
                .ok_or(LinkError::DecodeDesync(
                    "fragment stream truncated at a length prefix",
                ))?;
            let len = u16::from_be_bytes([prefix[0], prefix[1]]) as usize;
            cursor += MATRIX_LEN_PREFIX;

            if len == 0 || len > MAX_WIRE_FRAME_LEN {
                return Err(LinkError::DecodeDesync(
                    "fragment length prefix out of range",
                ));
            }

            let wire = stream
                .get(cursor..cursor + len)
                .ok_or(LinkError::DecodeDesync("fragment stream truncated mid-frame"))?;
            cursor += len;

            let decoded = self.codec.recv(wire)?;
            if decoded.len() < AX25_HEADER_LEN + MATRIX_METADATA_LEN {
                return Err(LinkError::DecodeDesync(
                    "fragment too short for the metadata header",
                ));
            }

            let info = &decoded[AX25_HEADER_LEN..];
            let header = ChunkHeader::from_bytes(info)?;
            if header.total_chunks as usize != total_chunks {
                return Err(LinkError::DecodeDesync(
                    "fragment disagrees about the chunk count",
                ));
            }
            if header.chunk_index as usize != index {
                return Err(LinkError::DecodeDesync("fragment arrived out of order"));
            }

            match shape {
                None => {
                    shape = Some((header.rows, header.cols, header.element_size));
                    data.reserve(
                        header.rows as usize
                            * header.cols as usize
                            * header.element_size as usize,
                    );
                }
                Some(latched) if latched != (header.rows, header.cols, header.element_size) => {
                    return Err(LinkError::DecodeDesync(
                        "fragment shape does not match the first chunk",
                    ));
                }
                Some(_) => {}
            }

            let payload = info
                .get(MATRIX_METADATA_LEN..MATRIX_METADATA_LEN + header.data_len as usize)
                .ok_or(LinkError::DecodeDesync(
                    "fragment data shorter than its declared length",
                ))?;
            data.extend_from_slice(payload);
        }

        let (rows, cols, element_size) = match shape {
            Some(latched) => latched,
            None => return Err(LinkError::DecodeDesync("empty fragment stream")),
        };

        let expected = rows as usize * cols as usize * element_size as usize;
        if data.len() != expected {
            return Err(LinkError::DecodeDesync(
                "reassembled image does not match the declared shape",
            ));
        }

        debug!(
            "Reassembled {}x{} matrix, {} bytes from {} fragments",
            rows,
            cols,
            data.len(),
            total_chunks
        );
        Ok(MatrixImage {
            data,
            rows,
            cols,
            element_size,
        })
    }
}
