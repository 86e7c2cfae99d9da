//! This is the command line tool that loads an input file and either compresses
//! or decompresses it. The output is the raw bitstream, so the same window and
//! lookahead sizes must be passed when decompressing.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{value_parser, Arg, ArgAction, Command};
use shrink::{Decoder, Encoder, DEFAULT_INPUT_BUFFER_SIZE};

use std::{fs, process, time::Instant};
use std::{fs::File, io::Write};

/// Appended to the name of compressed files.
const FILE_EXTENSION: &str = ".lzs";

fn save_file(data: &[u8], path: &str) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(data)?;
    log::info!("Wrote {}.", &path);
    Ok(())
}

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

/// The codec parameters collected from the command line.
struct Params {
    window: u8,
    lookahead: u8,
    buffer: usize,
}

fn handle_buffers(
    is_compress: bool,
    params: &Params,
    input: &[u8],
) -> shrink::Result<Vec<u8>> {
    if is_compress {
        log::info!(
            "Compressing with a window of 2^{} and a lookahead of 2^{}",
            params.window,
            params.lookahead
        );
        let mut encoder = Encoder::new(params.window, params.lookahead)?;
        return Ok(encoder.encode(input));
    }

    log::info!(
        "Decompressing with a window of 2^{}, a lookahead of 2^{} and a {} byte input buffer",
        params.window,
        params.lookahead,
        params.buffer
    );
    let mut decoder =
        Decoder::with_input_buffer(params.buffer, params.window, params.lookahead)?;
    decoder.decode(input)
}

fn main() {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Enables checked-mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompress")
                .short('d')
                .long("decompress")
                .help("Try to decompress the input")
                .action(ArgAction::SetTrue)
                .conflicts_with("compress"),
        )
        .arg(
            Arg::new("compress")
                .short('c')
                .long("compress")
                .help("Compress the input")
                .conflicts_with("decompress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("window")
                .short('w')
                .long("window")
                .value_name("BITS")
                .help("Log2 of the window size (4..=15)")
                .value_parser(value_parser!(u8))
                .default_value("8"),
        )
        .arg(
            Arg::new("lookahead")
                .short('l')
                .long("lookahead")
                .value_name("BITS")
                .help("Log2 of the longest match (3..window)")
                .value_parser(value_parser!(u8))
                .default_value("4"),
        )
        .arg(
            Arg::new("buffer")
                .long("buffer")
                .value_name("BYTES")
                .help("Size of the decoder input buffer")
                .value_parser(value_parser!(usize))
                .default_value("256"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let mut cli_compress = matches.get_flag("compress");
    let cli_decompress = matches.get_flag("decompress");
    let cli_checked_mode = matches.get_flag("checked");
    let mut cli_output_path = matches.get_one::<String>("output").cloned();
    let params = Params {
        window: *matches.get_one::<u8>("window").unwrap_or(&8),
        lookahead: *matches.get_one::<u8>("lookahead").unwrap_or(&4),
        buffer: *matches
            .get_one::<usize>("buffer")
            .unwrap_or(&DEFAULT_INPUT_BUFFER_SIZE),
    };

    let input_path = match matches.get_one::<String>("INPUT") {
        Some(path) => path.clone(),
        None => return,
    };
    let input = match fs::read(&input_path) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Can't open the input file {}: {}", input_path, err);
            process::exit(1);
        }
    };

    // The user did not specify if this is compress of decompress. Try to figure
    // out using the extension.
    let ends_with_ext = input_path.ends_with(FILE_EXTENSION);
    if !cli_compress && !cli_decompress && !ends_with_ext {
        cli_compress = true;
    }

    // Come up with a file name.
    if cli_output_path.is_none() {
        if ends_with_ext {
            // remove the extension.
            let end = input_path.len() - FILE_EXTENSION.len();
            cli_output_path = Some(String::from(&input_path[0..end]));
        } else {
            // Add the extension.
            cli_output_path = Some(input_path.clone() + FILE_EXTENSION);
        }
    }

    let out = cli_output_path.unwrap_or_default();
    let x = Timer::new();

    let dest = match handle_buffers(cli_compress, &params, &input) {
        Ok(dest) => dest,
        Err(err) => {
            log::error!("Operation failed: {}", err);
            process::exit(1);
        }
    };

    if cli_compress {
        log::info!("Compressed from {} to {} bytes.", input.len(), dest.len());
        log::info!(
            "Compression ratio is {:.4}x.",
            input.len() as f64 / dest.len().max(1) as f64
        );
    } else {
        log::info!("Decompressed from {} to {} bytes.", input.len(), dest.len());
    }

    if let Err(err) = save_file(&dest, &out) {
        log::error!("Can't write {}: {}", out, err);
        process::exit(1);
    }

    if cli_compress && cli_checked_mode {
        match handle_buffers(false, &params, &dest) {
            Ok(decoded) if decoded == input => log::info!("Correct!"),
            Ok(_) => {
                log::error!("Incorrect!");
                process::exit(1);
            }
            Err(err) => {
                log::error!("Could not decompress the file: {}", err);
                process::exit(1);
            }
        }
    }

    drop(x);
}
