use {
	std::{io, path::PathBuf},
	thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid palette version {0} (choose 1 or 2)")]
	InvalidPaletteVersion(u8),

	#[error("invalid icon type {0} (expected 1..=8)")]
	InvalidIconType(u8),

	#[error("invalid icon dimensions {width}x{height} (each must be 1..=65535)")]
	InvalidDimensions { width: u32, height: u32 },

	#[error("{path:?}: {source}")]
	ImageDecode {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},

	#[error("{path:?}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("{path:?}: failed writing preview: {source}")]
	Preview {
		path: PathBuf,
		#[source]
		source: png::EncodingError,
	},
}

pub type Result<T> = core::result::Result<T, Error>;
