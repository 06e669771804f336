use clap::{Parser, Subcommand};
use emulsion_core::models::{Adjustments, FilmStock};
use emulsion_core::pipeline::{render, Histogram, ImageBuffer};
use emulsion_core::presets::{load_grade_preset, save_grade_preset};
use emulsion_core::{parse_cube, synthesize, write_cube, Lut3D};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "emulsion")]
#[command(version, about = "Film-emulation photo grading engine", long_about = None)]
struct Cli {
    /// Print engine debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a PNG image
    Grade {
        /// Input PNG file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output path (defaults to <input>_graded.png)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Grade preset file (YAML)
        #[arg(short, long, value_name = "FILE")]
        preset: Option<PathBuf>,

        /// External .cube LUT, used instead of the synthesized one
        #[arg(long, value_name = "FILE")]
        lut: Option<PathBuf>,

        /// Film stock override (e.g. velvia, classic-chrome, acros-r)
        #[arg(long, value_name = "NAME")]
        film: Option<String>,

        /// LUT intensity override, 0.0-1.0
        #[arg(long, value_name = "FLOAT")]
        intensity: Option<f32>,

        /// Write the output histogram to a text file
        #[arg(long, value_name = "PATH")]
        histogram: Option<PathBuf>,
    },

    /// Synthesize a LUT from a preset and export it as .cube
    Lut {
        /// Grade preset file (YAML); defaults to a neutral preset
        #[arg(short, long, value_name = "FILE")]
        preset: Option<PathBuf>,

        /// Film stock override
        #[arg(long, value_name = "NAME")]
        film: Option<String>,

        /// Output .cube path
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,
    },

    /// Write a template grade preset to edit by hand
    Init {
        /// Output YAML path
        #[arg(value_name = "PATH")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    emulsion_core::config::set_verbose(cli.verbose);

    let result = match cli.command {
        Commands::Grade {
            input,
            out,
            preset,
            lut,
            film,
            intensity,
            histogram,
        } => run_grade(input, out, preset, lut, film, intensity, histogram),
        Commands::Lut { preset, film, out } => run_lut(preset, film, out),
        Commands::Init { out } => run_init(out),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_grade(
    input: PathBuf,
    out: Option<PathBuf>,
    preset: Option<PathBuf>,
    lut_path: Option<PathBuf>,
    film: Option<String>,
    intensity: Option<f32>,
    histogram: Option<PathBuf>,
) -> Result<(), String> {
    let adjustments = build_adjustments(preset, film, intensity)?;

    let lut = match lut_path {
        Some(path) => load_cube_file(&path)?,
        None => synthesize(
            adjustments.film,
            &adjustments.white_balance,
            &adjustments.grading,
        ),
    };

    let source = load_png(&input)?;
    let started = Instant::now();
    let result = render(&source, &lut, &adjustments, &[]).map_err(|e| e.to_string())?;
    let elapsed = started.elapsed();

    let out_path = out.unwrap_or_else(|| default_output_path(&input));
    save_png(&out_path, &result.image)?;

    println!(
        "Graded {}x{} in {:.1} ms -> {}",
        source.width,
        source.height,
        elapsed.as_secs_f64() * 1000.0,
        out_path.display()
    );

    if let Some(path) = histogram {
        write_histogram(&path, &result.histogram)?;
        println!("Histogram -> {}", path.display());
    }

    Ok(())
}

fn run_lut(preset: Option<PathBuf>, film: Option<String>, out: PathBuf) -> Result<(), String> {
    let adjustments = build_adjustments(preset, film, None)?;
    let lut = synthesize(
        adjustments.film,
        &adjustments.white_balance,
        &adjustments.grading,
    );

    let title = format!("{:?}", adjustments.film);
    std::fs::write(&out, write_cube(&lut, &title))
        .map_err(|e| format!("Failed to write .cube file: {}", e))?;

    println!("Wrote {}^3 LUT -> {}", lut.size(), out.display());
    Ok(())
}

fn run_init(out: PathBuf) -> Result<(), String> {
    let mut template = Adjustments::default();
    template.film = FilmStock::Provia;
    template.intensity = 1.0;

    save_grade_preset(&template, &out)?;
    println!("Wrote template preset -> {}", out.display());
    Ok(())
}

/// Load the preset (or start neutral) and fold in command-line overrides.
fn build_adjustments(
    preset: Option<PathBuf>,
    film: Option<String>,
    intensity: Option<f32>,
) -> Result<Adjustments, String> {
    let mut adjustments = match preset {
        Some(path) => load_grade_preset(&path)?,
        None => Adjustments::default(),
    };

    if let Some(name) = film {
        adjustments.film = parse_film(&name)?;
        // A film chosen on the command line should be visible by default
        if adjustments.intensity == 0.0 && intensity.is_none() {
            adjustments.intensity = 1.0;
        }
    }

    if let Some(value) = intensity {
        adjustments.intensity = value;
    }

    Ok(adjustments)
}

fn parse_film(name: &str) -> Result<FilmStock, String> {
    let normalized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    match normalized.as_str() {
        "none" | "passthrough" => Ok(FilmStock::None),
        "provia" => Ok(FilmStock::Provia),
        "velvia" => Ok(FilmStock::Velvia),
        "astia" => Ok(FilmStock::Astia),
        "classicchrome" => Ok(FilmStock::ClassicChrome),
        "classicneg" => Ok(FilmStock::ClassicNeg),
        "nostalgicneg" => Ok(FilmStock::NostalgicNeg),
        "realaace" => Ok(FilmStock::RealaAce),
        "eterna" => Ok(FilmStock::Eterna),
        "acros" | "acrosn" => Ok(FilmStock::AcrosNeutral),
        "acrosye" | "acrosy" => Ok(FilmStock::AcrosYellow),
        "acrosr" => Ok(FilmStock::AcrosRed),
        "acrosg" => Ok(FilmStock::AcrosGreen),
        "sepia" => Ok(FilmStock::Sepia),
        _ => Err(format!(
            "Unknown film stock '{}'. Expected one of: none, provia, velvia, astia, \
             classic-chrome, classic-neg, nostalgic-neg, reala-ace, eterna, \
             acros-n, acros-ye, acros-r, acros-g, sepia",
            name
        )),
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_graded.png", stem))
}

fn load_cube_file(path: &Path) -> Result<Lut3D, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read .cube file: {}", e))?;
    parse_cube(&text).map_err(|e| e.to_string())
}

/// Decode an 8-bit PNG into a straight-alpha RGBA frame
fn load_png(path: &Path) -> Result<ImageBuffer, String> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let info = reader.info();
    let width = info.width as usize;
    let height = info.height as usize;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;
    let bytes = &buf[..frame_info.buffer_size()];

    let data = match (color_type, bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => bytes.to_vec(),
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            let mut rgba = Vec::with_capacity(width * height * 4);
            for px in bytes.chunks_exact(3) {
                rgba.extend_from_slice(px);
                rgba.push(255);
            }
            rgba
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let mut rgba = Vec::with_capacity(width * height * 4);
            for &v in bytes {
                rgba.extend_from_slice(&[v, v, v, 255]);
            }
            rgba
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let mut rgba = Vec::with_capacity(width * height * 4);
            for px in bytes.chunks_exact(2) {
                rgba.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
            rgba
        }
        (ct, bd) => {
            return Err(format!(
                "Unsupported PNG format: {:?} at {:?} bit depth (8-bit only)",
                ct, bd
            ));
        }
    };

    ImageBuffer::new(width, height, data).map_err(|e| e.to_string())
}

/// Encode a frame back out as 8-bit RGBA PNG
fn save_png(path: &Path, image: &ImageBuffer) -> Result<(), String> {
    use std::fs::File;
    use std::io::BufWriter;

    let file = File::create(path).map_err(|e| format!("Failed to create PNG file: {}", e))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width as u32, image.height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    png_writer
        .write_image_data(&image.data)
        .map_err(|e| format!("Failed to write PNG data: {}", e))
}

/// Dump the histogram as one `bin r g b` line per bin
fn write_histogram(path: &Path, histogram: &Histogram) -> Result<(), String> {
    let mut out = String::with_capacity(256 * 16);
    out.push_str("bin r g b\n");
    for i in 0..256 {
        out.push_str(&format!(
            "{} {} {} {}\n",
            i, histogram.r[i], histogram.g[i], histogram.b[i]
        ));
    }
    std::fs::write(path, out).map_err(|e| format!("Failed to write histogram: {}", e))
}
