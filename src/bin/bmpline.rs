//! Interactive shell: load a BMP, draw one line, save the result.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use bmpline::{BitmapError, DecodeRequest, Limits, Point, PreviewStyle, Unstoppable};
use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Style {
    /// One character per pixel
    Glyph,
    /// Bracketed [b,g,r] values per pixel
    Triple,
}

impl From<Style> for PreviewStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Glyph => PreviewStyle::Glyph,
            Style::Triple => PreviewStyle::Triple,
        }
    }
}

/// Draw a straight line on a 24-bit BMP image.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// BMP file to read (prompted for when omitted)
    input: Option<PathBuf>,

    /// BMP file to write (prompted for when omitted)
    output: Option<PathBuf>,

    /// Preview rendering
    #[arg(long, value_enum, default_value_t = Style::Glyph)]
    style: Style,

    /// Refuse images with more pixels than this
    #[arg(long)]
    max_pixels: Option<u64>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Route the library's `log` records to stderr; stdout carries the preview.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

/// Print `prompt` and read one trimmed line. End of input is an error.
fn prompt_line(input: &mut impl BufRead, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input");
    }
    Ok(line.trim().to_owned())
}

fn path_or_prompt(
    path: Option<PathBuf>,
    input: &mut impl BufRead,
    prompt: &str,
) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(PathBuf::from(prompt_line(input, prompt)?)),
    }
}

/// Four whitespace-separated integers: `x1 y1 x2 y2`.
fn parse_points(line: &str) -> Option<(Point, Point)> {
    let coords = line
        .split_whitespace()
        .map(str::parse::<i32>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match coords[..] {
        [x1, y1, x2, y2] => Some((Point::new(x1, y1), Point::new(x2, y2))),
        _ => None,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let input_path = path_or_prompt(args.input, &mut input, "Enter *.bmp image filename to read from: ")?;
    let data = std::fs::read(&input_path)
        .with_context(|| format!("failed to open file \"{}\"", input_path.display()))?;
    let limits = args.max_pixels.map(Limits::pixels).unwrap_or_default();
    let mut image = DecodeRequest::new(&data)
        .with_limits(&limits)
        .decode(Unstoppable)
        .with_context(|| format!("failed to decode \"{}\"", input_path.display()))?;

    let style = PreviewStyle::from(args.style);
    println!("\n{}", image.preview(style));

    loop {
        let line = prompt_line(
            &mut input,
            "Enter 2 points (x1 y1 x2 y2) to draw a line on the image: ",
        )?;
        let Some((start, end)) = parse_points(&line) else {
            println!("Incorrect input!");
            continue;
        };
        match image.draw(start, end) {
            Ok(()) => break,
            Err(BitmapError::OutOfBounds { .. }) => {
                println!(
                    "Couldn't draw at these coordinates! The image is {}x{}.",
                    image.width(),
                    image.height()
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\n{}", image.preview(style));

    let output_path = path_or_prompt(args.output, &mut input, "Enter *.bmp image filename to write to: ")?;
    let file = File::create(&output_path)
        .with_context(|| format!("failed to open file \"{}\"", output_path.display()))?;
    image
        .write(&mut BufWriter::new(file))
        .with_context(|| format!("failed to write \"{}\"", output_path.display()))?;
    log::info!("saved {}", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn parses_four_integers() {
        assert_eq!(
            parse_points(" 0 1\t2 3 "),
            Some((Point::new(0, 1), Point::new(2, 3)))
        );
        assert_eq!(
            parse_points("-1 0 4 4"),
            Some((Point::new(-1, 0), Point::new(4, 4)))
        );
    }

    #[test]
    fn rejects_malformed_points() {
        assert_eq!(parse_points(""), None);
        assert_eq!(parse_points("1 2 3"), None);
        assert_eq!(parse_points("1 2 3 4 5"), None);
        assert_eq!(parse_points("1 2 x 4"), None);
    }

    #[test]
    fn prompt_reads_trimmed_line() {
        let mut input = BufReader::new(&b"  in.bmp \nnext\n"[..]);
        assert_eq!(prompt_line(&mut input, "").unwrap(), "in.bmp");
        assert_eq!(prompt_line(&mut input, "").unwrap(), "next");
        assert!(prompt_line(&mut input, "").is_err());
    }
}
