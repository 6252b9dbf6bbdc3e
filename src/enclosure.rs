//! Binary enclosures: `<binary>` payloads materialized as image files.
//!
//! The table is built once per document, before any body content is
//! converted, and is read-only afterwards. Each supported image is decoded,
//! converted to 8-bit grayscale, stamped with a fixed resolution and written
//! next to the TeX output under a collision-free name.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::GrayImage;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};

use crate::error::Result;
use crate::fb2::BinaryResource;

/// Native resolution of the Sony Reader screen the default page geometry targets.
pub const DEFAULT_DPI: u16 = 166;

const JPEG_QUALITY: u8 = 90;

/// Image formats an enclosure can be materialized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Map a `content-type` attribute to a supported kind.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}

/// A materialized enclosure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub kind: ImageKind,
    /// File name relative to the output directory, as referenced from TeX.
    pub path: PathBuf,
}

/// Enclosure id → generated artifact.
#[derive(Debug, Clone, Default)]
pub struct EnclosureTable {
    entries: HashMap<String, Enclosure>,
}

impl EnclosureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize every supported resource into `out_dir`.
    ///
    /// Unsupported content types are skipped with a warning. A resource that
    /// fails to decode or write is logged and skipped; it never aborts the
    /// remaining resources.
    pub fn build(resources: &[BinaryResource<'_>], out_dir: &Path, dpi: u16) -> Self {
        let mut table = Self::new();

        for resource in resources {
            let Some(kind) = ImageKind::from_content_type(resource.content_type) else {
                log::warn!(
                    "Unknown content-type '{}' for binary with id {}. Skipping",
                    resource.content_type,
                    resource.id
                );
                continue;
            };

            match materialize(resource, kind, out_dir, dpi) {
                Ok(path) => {
                    log::info!("Wrote enclosure '{}' to {}", resource.id, path.display());
                    table.insert(resource.id, Enclosure { kind, path });
                }
                Err(e) => {
                    log::error!("Failed to process binary with id {}: {e}", resource.id);
                }
            }
        }

        table
    }

    pub fn insert(&mut self, id: impl Into<String>, enclosure: Enclosure) {
        self.entries.insert(id.into(), enclosure);
    }

    /// Look up an enclosure by id (without the leading `#`).
    pub fn resolve(&self, id: &str) -> Option<&Enclosure> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn materialize(
    resource: &BinaryResource<'_>,
    kind: ImageKind,
    out_dir: &Path,
    dpi: u16,
) -> Result<PathBuf> {
    let bytes = decode_payload(resource.payload)?;
    let gray = image::load_from_memory(&bytes)?.to_luma8();
    log::debug!(
        "Decoded binary {} ({} bytes, {}x{})",
        resource.id,
        bytes.len(),
        gray.width(),
        gray.height()
    );

    let suffix = format!(".{}", kind.extension());
    let mut file = tempfile::Builder::new()
        .prefix("enc")
        .suffix(&suffix)
        .tempfile_in(out_dir)?;

    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write_grayscale(&gray, kind, dpi, &mut writer)?;
        writer.flush()?;
    }

    let (_, full_path): (File, PathBuf) = file.keep().map_err(|e| e.error)?;
    let name = full_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or(full_path);
    Ok(name)
}

/// Decode a base64 payload, ignoring the line wrapping FictionBook files use.
fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

fn write_grayscale<W: Write>(gray: &GrayImage, kind: ImageKind, dpi: u16, writer: W) -> Result<()> {
    match kind {
        ImageKind::Jpeg => {
            let mut writer = writer;
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            encoder.set_pixel_density(PixelDensity::dpi(dpi));
            encoder.encode_image(gray)?;
        }
        ImageKind::Png => {
            let mut encoder = png::Encoder::new(writer, gray.width(), gray.height());
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let ppm = dots_per_meter(dpi);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));
            let mut png_writer = encoder.write_header()?;
            png_writer.write_image_data(gray.as_raw())?;
            png_writer.finish()?;
        }
    }
    Ok(())
}

fn dots_per_meter(dpi: u16) -> u32 {
    (f64::from(dpi) / 0.0254).round() as u32
}
