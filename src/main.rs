//! # Bluberry CLI
//!
//! Command-line interface for rendering receipt text to thermal printers.
//!
//! ## Usage
//!
//! ```bash
//! # Packed bitmap as hex on stdout
//! echo "<center><b>HELLO" | bluberry render --hex
//!
//! # Preview what would print
//! bluberry render receipt.txt --png receipt.png
//!
//! # Complete ESC/POS job, ready for any transport
//! bluberry render receipt.txt --job --output receipt.bin
//!
//! # Several receipts at once, written next to their sources
//! bluberry render --hex day/*.txt
//!
//! # Print over Bluetooth, in small writes for a printer with a tiny buffer
//! bluberry print receipt.txt --device /dev/rfcomm0 --chunk-size 512
//!
//! # HTTP API
//! bluberry serve --listen 0.0.0.0:8080 --device /dev/rfcomm0
//! ```

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bluberry::{
    BluberryError,
    codec::hex::{HexCase, to_hex},
    pipeline::{print_job, render_receipt},
    printer::{PrinterConfig, RenderOptions},
    protocol::CommandSet,
    receipt::samples,
    render::{
        dither::Dithering,
        font::{BitmapFont, TextRasterizer, TtfFont},
        pack::PackedBitmap,
    },
    server::{self, ServerConfig},
    transport::{BluetoothTransport, Transport, bluetooth},
};

/// Bluberry - receipt text to thermal printer raster
#[derive(Parser, Debug)]
#[command(name = "bluberry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render receipt text to a packed bitmap, hex text, PNG or print job
    Render {
        /// Receipt text files (stdin when omitted)
        files: Vec<PathBuf>,

        /// Render a built-in sample receipt instead of files
        #[arg(long, conflicts_with = "files")]
        sample: Option<String>,

        /// Write hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Also save a PNG preview (single input only)
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Output file (single input only, default stdout)
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Wrap the bitmap in init, raster, feed and cut commands
        #[arg(long)]
        job: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render receipt text and send it to the printer
    Print {
        /// Receipt text file (stdin when omitted)
        file: Option<PathBuf>,

        /// Print a built-in sample receipt
        #[arg(long, conflicts_with = "file")]
        sample: Option<String>,

        /// Input is an already-built job in hex (from `render --job --hex`)
        #[arg(long)]
        from_hex: bool,

        /// Printer device path
        #[arg(long, default_value = bluetooth::DEFAULT_DEVICE)]
        device: String,

        /// Bytes per Bluetooth write
        #[arg(long, default_value_t = bluetooth::CHUNK_SIZE)]
        chunk_size: usize,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Printer device path
        #[arg(long, default_value = bluetooth::DEFAULT_DEVICE)]
        device: String,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List built-in sample receipts
    Samples,
}

/// Rendering flags shared by every command. Flags override `--config`.
#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON options file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Paper preset (58mm, 80mm)
    #[arg(long)]
    paper: Option<String>,

    /// Paper width in dots
    #[arg(long)]
    width: Option<usize>,

    /// Default font size in pixels
    #[arg(long)]
    font_size: Option<f32>,

    /// Darkness threshold (1-255); pixels at or above it print
    #[arg(long)]
    threshold: Option<u8>,

    /// Dithering: threshold, bayer, floyd-steinberg, atkinson
    #[arg(long)]
    dither: Option<Dithering>,

    /// Command set for print jobs: escpos, star
    #[arg(long)]
    command_set: Option<CommandSet>,

    /// Lowercase hex output
    #[arg(long)]
    lowercase: bool,

    /// Word-wrap lines wider than the paper
    #[arg(long)]
    wrap: bool,

    /// Do not cut after printing
    #[arg(long)]
    no_cut: bool,

    /// Paper feed after the image, in dots
    #[arg(long)]
    feed: Option<u16>,

    /// TTF/OTF font (default: built-in bitmap font)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// TTF/OTF font for bold lines
    #[arg(long, value_name = "FILE", requires = "font")]
    bold_font: Option<PathBuf>,
}

impl RenderArgs {
    fn options(&self) -> Result<RenderOptions, BluberryError> {
        let mut options = match (&self.config, &self.paper) {
            (Some(path), _) => RenderOptions::from_json_file(path)?,
            (None, Some(name)) => {
                let preset = PrinterConfig::by_name(name).ok_or_else(|| {
                    BluberryError::Configuration(format!("Unknown paper preset '{}'", name))
                })?;
                RenderOptions::for_printer(&preset)
            }
            (None, None) => RenderOptions::default(),
        };

        if let Some(width) = self.width {
            options.paper_width_dots = width;
        }
        if let Some(size) = self.font_size {
            options.default_font_size = size;
        }
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        if let Some(dither) = self.dither {
            options.dithering = dither;
        }
        if let Some(set) = self.command_set {
            options.command_set = set;
        }
        if let Some(feed) = self.feed {
            options.feed_dots = feed;
        }
        if self.lowercase {
            options.hex_case = HexCase::Lower;
        }
        if self.wrap {
            options.wrap = true;
        }
        if self.no_cut {
            options.cut = false;
        }

        options.validate()?;
        Ok(options)
    }

    fn rasterizer(&self) -> Result<Box<dyn TextRasterizer>, BluberryError> {
        let Some(path) = &self.font else {
            return Ok(Box::new(BitmapFont::new()));
        };
        let mut font = TtfFont::from_path(path)?;
        if let Some(bold) = &self.bold_font {
            font = font.with_bold_path(bold)?;
        }
        Ok(Box::new(font))
    }
}

/// Receipt text and where it came from.
struct Source {
    path: Option<PathBuf>,
    text: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BluberryError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            files,
            sample,
            hex,
            png,
            output,
            job,
            render,
        } => {
            let options = render.options()?;
            let rasterizer = render.rasterizer()?;

            let sources = if let Some(name) = sample {
                vec![sample_source(&name)?]
            } else if files.is_empty() {
                vec![stdin_source()?]
            } else {
                files
                    .iter()
                    .map(|path| file_source(path))
                    .collect::<Result<Vec<_>, _>>()?
            };

            if sources.len() > 1 && (png.is_some() || output.is_some()) {
                return Err(BluberryError::Configuration(
                    "--png and --output take a single input; with several files each result is written next to its source".to_string(),
                ));
            }

            let bitmaps = sources
                .par_iter()
                .map(|source| render_receipt(&source.text, &options, rasterizer.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;

            for (source, bitmap) in sources.iter().zip(&bitmaps) {
                let payload = encode(bitmap, &options, job, hex)?;

                match (&source.path, sources.len()) {
                    (Some(path), n) if n > 1 => {
                        let out = path.with_extension(if hex { "hex" } else { "bin" });
                        std::fs::write(&out, &payload)?;
                        log::info!("{} → {}", path.display(), out.display());
                    }
                    _ => write_output(output.as_deref(), &payload)?,
                }
            }

            if let (Some(png_path), Some(bitmap)) = (png, bitmaps.first()) {
                std::fs::write(&png_path, bitmap.to_png()?)?;
                log::info!("saved preview to {}", png_path.display());
            }
        }

        Commands::Print {
            file,
            sample,
            from_hex,
            device,
            chunk_size,
            render,
        } => {
            let source = match (&sample, &file) {
                (Some(name), _) => sample_source(name)?,
                (None, Some(path)) => file_source(path)?,
                (None, None) => stdin_source()?,
            };

            let mut transport = BluetoothTransport::open(&device)?;
            transport.set_chunk_size(chunk_size);
            if from_hex {
                transport.write_hex(&source.text)?;
            } else {
                let options = render.options()?;
                let rasterizer = render.rasterizer()?;
                let bitmap = render_receipt(&source.text, &options, rasterizer.as_ref())?;
                transport.write_all(&print_job(&bitmap, &options)?)?;
            }
            println!("Printed successfully!");
        }

        Commands::Serve {
            listen,
            device,
            render,
        } => {
            let config = ServerConfig {
                device_path: device,
                listen_addr: listen,
                options: render.options()?,
            };
            let rasterizer: Arc<dyn TextRasterizer> = Arc::from(render.rasterizer()?);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, rasterizer))?;
        }

        Commands::Samples => {
            println!("Available samples:");
            for name in samples::list_samples() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

/// Bitmap data, or a full job, as bytes or hex text.
fn encode(
    bitmap: &PackedBitmap,
    options: &RenderOptions,
    job: bool,
    hex: bool,
) -> Result<Vec<u8>, BluberryError> {
    let bytes = if job {
        print_job(bitmap, options)?
    } else {
        bitmap.data.clone()
    };
    if hex {
        let mut text = to_hex(&bytes, options.hex_case);
        text.push('\n');
        Ok(text.into_bytes())
    } else {
        Ok(bytes)
    }
}

fn write_output(path: Option<&Path>, payload: &[u8]) -> Result<(), BluberryError> {
    match path {
        Some(path) => std::fs::write(path, payload)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn sample_source(name: &str) -> Result<Source, BluberryError> {
    let text = samples::by_name(name).ok_or_else(|| {
        BluberryError::Configuration(format!(
            "Unknown sample '{}'. Run `bluberry samples` to list them.",
            name
        ))
    })?;
    Ok(Source {
        path: None,
        text: text.to_string(),
    })
}

fn file_source(path: &Path) -> Result<Source, BluberryError> {
    let text = std::fs::read_to_string(path)?;
    Ok(Source {
        path: Some(path.to_path_buf()),
        text,
    })
}

fn stdin_source() -> Result<Source, BluberryError> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(Source { path: None, text })
}
