use clap::{Parser, Subcommand};
use qr_scanner::config::{DecodeOptions, GrayscaleWeights, InversionAttempts};
use qr_scanner::detector::locate;
use qr_scanner::error::DecodeError;
use qr_scanner::models::{Frame, QRCode};
use qr_scanner::tools::{binary_stats, load_rgba, save_binary_png};
use qr_scanner::utils::binarization::binarize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR scanner CLI tools")]
struct Cli {
    /// Log pipeline stages at debug level (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode the QR code in a single image
    Decode {
        #[arg(long)]
        image: PathBuf,
        /// Which binarized grids to scan
        #[arg(long, value_enum)]
        inversion: Option<InversionAttempts>,
        /// Use the integer grayscale approximation
        #[arg(long)]
        integer_grayscale: bool,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the location hypotheses found in an image
    Locate {
        #[arg(long)]
        image: PathBuf,
    },
    /// Write the binarized image as a PNG
    Binarize {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Write the inverted grid instead
        #[arg(long)]
        inverted: bool,
    },
    /// Decode several images in parallel
    Batch {
        images: Vec<PathBuf>,
        #[arg(long, value_enum)]
        inversion: Option<InversionAttempts>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Command::Decode {
            image,
            inversion,
            integer_grayscale,
            json,
        } => decode_cmd(&image, inversion, integer_grayscale, json),
        Command::Locate { image } => locate_cmd(&image),
        Command::Binarize {
            image,
            output,
            inverted,
        } => binarize_cmd(&image, &output, inverted),
        Command::Batch { images, inversion } => batch_cmd(&images, inversion),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn options_for(inversion: Option<InversionAttempts>, integer_grayscale: bool) -> DecodeOptions {
    let mut options = DecodeOptions::from_env();
    if let Some(inversion) = inversion {
        options = options.with_inversion_attempts(inversion);
    }
    if integer_grayscale {
        options = options.with_grayscale_weights(GrayscaleWeights::INTEGER);
    }
    options
}

fn print_code(qr: &QRCode) {
    println!(
        "  version={}, error_correction={:?}, mask={:?}, chunks={}",
        qr.version,
        qr.error_correction,
        qr.mask_pattern,
        qr.chunks.len()
    );
    println!("  content: {}", qr.data);
    let loc = &qr.location;
    println!(
        "  corners: TL({:.1}, {:.1}) TR({:.1}, {:.1}) BR({:.1}, {:.1}) BL({:.1}, {:.1})",
        loc.top_left_corner.x,
        loc.top_left_corner.y,
        loc.top_right_corner.x,
        loc.top_right_corner.y,
        loc.bottom_right_corner.x,
        loc.bottom_right_corner.y,
        loc.bottom_left_corner.x,
        loc.bottom_left_corner.y
    );
}

fn decode_cmd(
    image: &Path,
    inversion: Option<InversionAttempts>,
    integer_grayscale: bool,
    json: bool,
) -> Result<ExitCode, DecodeError> {
    let (pixels, width, height) = load_rgba(image)?;
    let options = options_for(inversion, integer_grayscale);

    let start = Instant::now();
    let result = qr_scanner::decode_image_owned(pixels, width, height, &options)?;
    let elapsed = start.elapsed();

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("error: {}", e),
        }
    } else {
        println!("Image: {} ({}x{})", image.display(), width, height);
        match &result {
            Some(qr) => print_code(qr),
            None => println!("  no QR code found"),
        }
        println!("  time: {:.2?}", elapsed);
    }

    Ok(if result.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn locate_cmd(image: &Path) -> Result<ExitCode, DecodeError> {
    let (pixels, width, height) = load_rgba(image)?;
    let options = DecodeOptions::from_env();
    let grids = binarize(
        &pixels,
        width,
        height,
        options.inversion_attempts.needs_inverted(),
        &options.grayscale_weights,
    )?;

    println!("Image: {} ({}x{})", image.display(), width, height);
    let mut found = false;
    let named = [("normal", Some(&grids.binarized)), ("inverted", grids.inverted.as_ref())];
    for (name, grid) in named {
        let Some(grid) = grid else { continue };
        let locations = locate(grid).unwrap_or_default();
        println!("  {} grid: {} hypotheses", name, locations.len());
        for (i, loc) in locations.iter().enumerate() {
            found = true;
            println!(
                "    {}: dimension={} TL({:.1}, {:.1}) TR({:.1}, {:.1}) BL({:.1}, {:.1}) align({:.1}, {:.1})",
                i,
                loc.dimension,
                loc.top_left.x,
                loc.top_left.y,
                loc.top_right.x,
                loc.top_right.y,
                loc.bottom_left.x,
                loc.bottom_left.y,
                loc.alignment_pattern.x,
                loc.alignment_pattern.y
            );
        }
    }

    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn binarize_cmd(image: &Path, output: &Path, inverted: bool) -> Result<ExitCode, DecodeError> {
    let (pixels, width, height) = load_rgba(image)?;
    let options = DecodeOptions::from_env();
    let grids = binarize(&pixels, width, height, inverted, &options.grayscale_weights)?;
    let matrix = match grids.inverted {
        Some(inverted) => inverted,
        None => grids.binarized,
    };

    let stats = binary_stats(&matrix);
    println!(
        "Binarized {}x{}: {} of {} pixels dark ({:.1}%)",
        width,
        height,
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );
    save_binary_png(&matrix, output)?;
    println!("Wrote {}", output.display());
    Ok(ExitCode::SUCCESS)
}

fn batch_cmd(images: &[PathBuf], inversion: Option<InversionAttempts>) -> Result<ExitCode, DecodeError> {
    let options = options_for(inversion, false);

    let mut frames = Vec::with_capacity(images.len());
    for path in images {
        let (pixels, width, height) = load_rgba(path)?;
        frames.push(Frame::new(pixels, width, height));
    }

    let start = Instant::now();
    let results = qr_scanner::decode_batch(&frames, &options);
    let elapsed = start.elapsed();

    let mut decoded = 0usize;
    for (path, result) in images.iter().zip(&results) {
        match result {
            Ok(Some(qr)) => {
                decoded += 1;
                println!("{}: {}", path.display(), qr.data);
            }
            Ok(None) => println!("{}: no QR code found", path.display()),
            Err(e) => println!("{}: error: {}", path.display(), e),
        }
    }
    println!(
        "Decoded {}/{} images in {:.2?}",
        decoded,
        images.len(),
        elapsed
    );
    Ok(ExitCode::SUCCESS)
}
