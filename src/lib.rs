#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case, confusable_idents, mixed_script_confusables, uncommon_codepoints)]

pub mod error;
pub mod info;
pub mod palette;
pub mod planar;

pub use error::{Error, Result};

use {
	image::{imageops::FilterType, GenericImageView, RgbImage},
	info::IconMetadata,
	log::debug,
	palette::Palette,
	planar::{buildIndexGrid, encodeBitplanes, IndexGrid},
	png::ColorType,
	std::{
		fs::File,
		io::BufWriter,
		path::{Path, PathBuf},
	},
};

pub const INFO_EXTENSION: &str = "info";

pub fn defaultOutputPath(input: &Path) -> PathBuf {
	input.with_extension(INFO_EXTENSION)
}

/// Decodes `path` and resamples it to exactly `width`×`height`, dropping any alpha.
pub fn loadImage(path: &Path, width: u16, height: u16) -> Result<RgbImage> {
	let image = image::open(path).map_err(|source| Error::ImageDecode { path: path.to_owned(), source })?;
	let (width, height) = (u32::from(width), u32::from(height));
	debug!("{path:?}: decoded {}x{}", image.width(), image.height());
	Ok(if image.dimensions() == (width, height) {
		image.to_rgb8()
	} else {
		image.resize_exact(width, height, FilterType::Lanczos3).to_rgb8()
	})
}

/// Loads `input`, quantizes it to `palette` and writes the icon described by `metadata`.
/// The quantized grid is handed back for previewing.
pub fn createIcon(input: &Path, metadata: &IconMetadata, palette: &Palette) -> Result<IndexGrid> {
	let image = loadImage(input, metadata.width, metadata.height)?;
	let grid = buildIndexGrid(&image, palette);
	let bitplanes = encodeBitplanes(&grid);
	debug!(
		"palette {}, {}x{} padded to {} ({} bytes per plane)",
		palette.name,
		grid.width,
		grid.height,
		bitplanes.paddedWidth,
		bitplanes.planeLen()
	);
	info::write(metadata, &bitplanes)?;
	Ok(grid)
}

/// Writes the quantized icon as an indexed PNG so it can be checked without an Amiga.
pub fn writePreview(grid: &IndexGrid, palette: &Palette, path: &Path) -> Result<()> {
	let previewError = |source| Error::Preview { path: path.to_owned(), source };
	let file = File::create(path).map_err(|source| Error::Io { path: path.to_owned(), source })?;
	let mut png = png::Encoder::new(BufWriter::new(file), grid.width as _, grid.height as _);
	png.set_color(ColorType::Indexed);
	png.set_palette(palette.pngPalette().to_vec());
	let mut png = png.write_header().map_err(previewError)?;
	png.write_image_data(&grid.data).map_err(previewError)?;
	png.finish().map_err(previewError)
}
