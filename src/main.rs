use clap::{Parser, Subcommand};
use tracing::{error, info};

use satlink::utils::logging::init_logging;
use satlink::{Ax25Codec, FrameType, LinkConfig, MatrixFragmenter, MatrixReassembler};

#[derive(Parser)]
#[command(name = "satlink")]
#[command(about = "AX.25 UI-frame link codec demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Satellite (source) callsign
    #[arg(long, default_value = "PARSAT")]
    sat: String,

    /// Satellite SSID
    #[arg(long, default_value = "0")]
    sat_ssid: u8,

    /// Ground station (destination) callsign
    #[arg(long, default_value = "ABCD")]
    grd: String,

    /// Ground station SSID
    #[arg(long, default_value = "0")]
    grd_ssid: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text payload and print the wire bytes
    Encode {
        /// Payload text
        payload: String,
    },

    /// Encode a text payload, decode it back, and compare
    Roundtrip {
        /// Payload text
        payload: String,
    },

    /// Fragment a generated matrix and reassemble it
    Matrix {
        /// Rows
        #[arg(long, default_value = "10")]
        rows: u16,

        /// Columns
        #[arg(long, default_value = "10")]
        cols: u16,

        /// Element size in bytes
        #[arg(long, default_value = "4")]
        element_size: u8,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let config = LinkConfig {
        sat_callsign: cli.sat,
        sat_ssid: cli.sat_ssid,
        grd_callsign: cli.grd,
        grd_ssid: cli.grd_ssid,
        ..LinkConfig::default()
    };

    let result = match cli.command {
        Commands::Encode { payload } => run_encode(&config, payload.as_bytes()),
        Commands::Roundtrip { payload } => run_roundtrip(&config, payload.as_bytes()),
        Commands::Matrix {
            rows,
            cols,
            element_size,
        } => run_matrix(&config, rows, cols, element_size),
    };

    if let Err(e) = result {
        error!("{} (code {})", e, e.code());
        std::process::exit(1);
    }
}

fn run_encode(config: &LinkConfig, payload: &[u8]) -> Result<(), satlink::LinkError> {
    let codec = Ax25Codec::new(config)?;
    info!(
        "Link {} -> {}",
        codec.satellite(),
        codec.ground()
    );

    let wire = codec.encode(payload, FrameType::Ui)?;
    info!("Encoded {} payload bytes into {} wire bytes", payload.len(), wire.len());
    println!("{}", hex_dump(&wire));
    Ok(())
}

fn run_roundtrip(config: &LinkConfig, payload: &[u8]) -> Result<(), satlink::LinkError> {
    let codec = Ax25Codec::new(config)?;
    let wire = codec.encode(payload, FrameType::Ui)?;
    let decoded = codec.recv(&wire)?;
    let recovered = Ax25Codec::payload_of(&decoded)?;

    info!("Wire frame: {} bytes", wire.len());
    info!("Decoded:    {} bytes ({} header + {} payload)",
        decoded.len(),
        decoded.len() - recovered.len(),
        recovered.len()
    );

    if recovered == payload {
        info!("Round trip OK: {:?}", String::from_utf8_lossy(recovered));
        Ok(())
    } else {
        error!("Round trip mismatch");
        Err(satlink::LinkError::DecodeDesync("round trip mismatch"))
    }
}

fn run_matrix(
    config: &LinkConfig,
    rows: u16,
    cols: u16,
    element_size: u8,
) -> Result<(), satlink::LinkError> {
    let total = rows as usize * cols as usize * element_size as usize;
    let image: Vec<u8> = (0..total).map(|i| (i % 256) as u8).collect();

    let fragmenter = MatrixFragmenter::new(config)?;
    let stream = fragmenter.fragment(&image, rows, cols, element_size)?;
    info!(
        "Fragmented {}x{} matrix ({} bytes) into {} frames, {} stream bytes",
        rows,
        cols,
        total,
        stream.chunk_count,
        stream.bytes.len()
    );

    let reassembler = MatrixReassembler::new(config)?;
    let matrix = reassembler.reassemble(&stream.bytes, stream.chunk_count)?;
    info!(
        "Reassembled {}x{} matrix, element size {}",
        matrix.rows, matrix.cols, matrix.element_size
    );

    if matrix.data == image {
        info!("All {} bytes verified", total);
        Ok(())
    } else {
        error!("Matrix data mismatch after reassembly");
        Err(satlink::LinkError::DecodeDesync("matrix data mismatch"))
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
