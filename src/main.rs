//! Convert pixel art image into SVG, one square per pixel
#![deny(warnings)]

use pixel2svg::{ConvertError, ConvertOptions, DEFAULT_SQUARE_SIZE, convert, load};
use std::{io::IsTerminal, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
struct Args {
    input_file: PathBuf,
    overlap: bool,
    square_size: u32,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        Self::parse_from(std::env::args())
    }

    fn parse_from(mut args: impl Iterator<Item = String>) -> Result<Args, Error> {
        let mut input_file = None;
        let mut overlap = false;
        let mut square_size = DEFAULT_SQUARE_SIZE as i64;
        let cmd = args.next().unwrap_or_else(|| "pixel2svg".to_owned());
        while let Some(arg) = args.next() {
            // only `--squaresize` takes a value, `--flag=value` is rejected for others
            let (flag, value) = match arg.split_once('=') {
                Some(("--squaresize", value)) => ("--squaresize", Some(value.to_owned())),
                _ => (arg.as_str(), None),
            };
            match flag {
                "-h" | "--help" => {
                    usage(&cmd);
                    std::process::exit(0);
                }
                "--version" => {
                    println!("{}", VERSION);
                    std::process::exit(0);
                }
                "--overlap" => overlap = true,
                "--squaresize" => {
                    let value = match value {
                        Some(value) => value,
                        None => args.next().ok_or("--squaresize requires argument")?,
                    };
                    square_size = value
                        .parse()
                        .map_err(|_| format!("--squaresize expects integer, got '{}'", value))?;
                }
                _ if flag.starts_with('-') && flag.len() > 1 => {
                    usage(&cmd);
                    return Err(format!("unknown option '{}'", arg).into());
                }
                _ if input_file.is_none() => input_file = Some(PathBuf::from(&arg)),
                _ => {
                    usage(&cmd);
                    return Err("unexpected positional argument".into());
                }
            }
        }
        let Some(input_file) = input_file else {
            usage(&cmd);
            std::process::exit(1);
        };
        let square_size = u32::try_from(square_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ConvertError::InvalidDimension(square_size))?;
        Ok(Args {
            input_file,
            overlap,
            square_size,
        })
    }

    /// Output document lives next to the input with `.svg` extension
    fn output_file(&self) -> PathBuf {
        self.input_file.with_extension("svg")
    }
}

fn usage(cmd: &str) {
    eprintln!("Convert pixel art to SVG");
    eprintln!("\nUSAGE:");
    eprintln!("    {} [--overlap] [--squaresize <size>] <imagefile>", cmd);
    eprintln!("\nARGS:");
    eprintln!("    --overlap            overlap vector squares by 1px");
    eprintln!(
        "    --squaresize <size>  width and height of vector squares in pixels (default: {})",
        DEFAULT_SQUARE_SIZE
    );
    eprintln!("    --version            display the program version");
    eprintln!("    <imagefile>          the image file to convert");
}

fn run() -> Result<(), Error> {
    let args = Args::parse()?;
    tracing::info!("pixel2svg {}", VERSION);

    let image = load(&args.input_file)?;
    let options = ConvertOptions::new(args.square_size, args.overlap);
    tracing::info!(
        "Will use a square overlap of {}px",
        u32::from(options.overlap)
    );
    let doc = convert(&image, options)?;

    let output_file = args.output_file();
    tracing::info!("Saving SVG to '{}'", output_file.display());
    doc.save(&output_file)?;
    tracing::info!("Operation finished. Have fun with your SVG.");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();

    if let Err(error) = run() {
        eprintln!("pixel2svg: {}", error);
        std::process::exit(1);
    }
}
