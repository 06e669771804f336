//! `.cube` text interchange.
//!
//! The in-memory layout is a `.cube` file flattened to bytes, so import is
//! domain normalization plus quantization and export is the reverse.

use super::{Lut3D, LutError};

/// Parse `.cube` text into a table.
///
/// Honors `LUT_3D_SIZE`, `DOMAIN_MIN`, and `DOMAIN_MAX`; `TITLE`, comment
/// lines, and blank lines are skipped. Sample rows are three floats,
/// red-fastest. Fractional samples are normalized by the declared domain
/// before quantization to bytes.
pub fn parse_cube(text: &str) -> Result<Lut3D, LutError> {
    let mut size: Option<usize> = None;
    let mut domain_min = [0.0f32; 3];
    let mut domain_max = [1.0f32; 3];
    let mut values: Vec<[f32; 3]> = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let first = fields.next().unwrap();

        match first {
            "TITLE" => continue,
            "LUT_1D_SIZE" => {
                return Err(LutError::Parse("1D LUTs are not supported".to_string()));
            }
            "LUT_3D_SIZE" => {
                let n = fields
                    .next()
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|&n| n >= 2)
                    .ok_or_else(|| {
                        LutError::Parse(format!("line {}: bad LUT_3D_SIZE", line_no + 1))
                    })?;
                size = Some(n);
            }
            "DOMAIN_MIN" => parse_triple(&mut fields, &mut domain_min, line_no)?,
            "DOMAIN_MAX" => parse_triple(&mut fields, &mut domain_max, line_no)?,
            _ => {
                let mut rgb = [0.0f32; 3];
                rgb[0] = parse_float(first, line_no)?;
                for slot in rgb.iter_mut().skip(1) {
                    let field = fields.next().ok_or_else(|| {
                        LutError::Parse(format!("line {}: expected 3 values", line_no + 1))
                    })?;
                    *slot = parse_float(field, line_no)?;
                }
                values.push(rgb);
            }
        }
    }

    let size = size.ok_or_else(|| LutError::Parse("missing LUT_3D_SIZE".to_string()))?;
    if values.len() != size * size * size {
        return Err(LutError::Parse(format!(
            "expected {} samples for size {}, got {}",
            size * size * size,
            size,
            values.len()
        )));
    }

    let mut samples = Vec::with_capacity(values.len() * 3);
    for rgb in values {
        for ch in 0..3 {
            let span = domain_max[ch] - domain_min[ch];
            if span <= 0.0 {
                return Err(LutError::Parse("degenerate DOMAIN_MIN/MAX".to_string()));
            }
            let norm = (rgb[ch] - domain_min[ch]) / span;
            samples.push((norm.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
    }

    Lut3D::from_samples(size, samples)
}

/// Serialize a table back to `.cube` text, samples as fractions of 255.
pub fn write_cube(lut: &Lut3D, title: &str) -> String {
    let n = lut.size();
    let mut out = String::with_capacity(n * n * n * 24 + 128);

    out.push_str(&format!("TITLE \"{}\"\n", title));
    out.push_str(&format!("LUT_3D_SIZE {}\n", n));
    out.push_str("DOMAIN_MIN 0.0 0.0 0.0\n");
    out.push_str("DOMAIN_MAX 1.0 1.0 1.0\n\n");

    for rgb in lut.samples().chunks_exact(3) {
        out.push_str(&format!(
            "{:.6} {:.6} {:.6}\n",
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0
        ));
    }

    out
}

fn parse_float(field: &str, line_no: usize) -> Result<f32, LutError> {
    field
        .parse::<f32>()
        .map_err(|_| LutError::Parse(format!("line {}: bad float '{}'", line_no + 1, field)))
}

fn parse_triple<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    out: &mut [f32; 3],
    line_no: usize,
) -> Result<(), LutError> {
    for slot in out.iter_mut() {
        let field = fields
            .next()
            .ok_or_else(|| LutError::Parse(format!("line {}: expected 3 values", line_no + 1)))?;
        *slot = parse_float(field, line_no)?;
    }
    Ok(())
}
