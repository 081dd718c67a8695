use crate::{Error, Result};

pub type Rgb = [u8; RGB_SIZE];

pub const RGB_SIZE: usize = 3;
pub const PALETTE_LEN: usize = 4;

/// A Workbench icon palette. Index `i` of `colors` is the pen encoded by
/// bitplane bits `i & 1` (plane 0) and `i >> 1 & 1` (plane 1).
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
	pub version: u8,
	pub name: &'static str,
	pub colors: [Rgb; PALETTE_LEN],
}

pub static PALETTES: &[Palette] = &[
	Palette {
		version: 1,
		name: "1.x",
		colors: [
			[0x55, 0xAA, 0xFF], // light blue
			[0xFF, 0xFF, 0xFF], // white
			[0x00, 0x00, 0x00], // black
			[0xFF, 0x88, 0x00], // orange
		],
	},
	Palette {
		version: 2,
		name: "2.x",
		colors: [
			[0x95, 0x95, 0x95], // gray
			[0x00, 0x00, 0x00], // black
			[0xFF, 0xFF, 0xFF], // white
			[0x3B, 0x67, 0xA2], // blue
		],
	},
];

pub fn lookup(version: u8) -> Result<&'static Palette> {
	PALETTES.iter().find(|palette| palette.version == version).ok_or(Error::InvalidPaletteVersion(version))
}

impl Palette {
	pub fn pngPalette(&self) -> [u8; PALETTE_LEN * RGB_SIZE] {
		let mut pngPAL = [0; PALETTE_LEN * RGB_SIZE];
		for (chunk, color) in pngPAL.chunks_exact_mut(RGB_SIZE).zip(&self.colors) {
			chunk.copy_from_slice(color);
		}
		pngPAL
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookupKnownVersions() {
		assert_eq!(lookup(1).unwrap().name, "1.x");
		assert_eq!(lookup(2).unwrap().colors[3], [0x3B, 0x67, 0xA2]);
	}

	#[test]
	fn lookupUnknownVersion() {
		for version in [0, 3, u8::MAX] {
			assert!(matches!(lookup(version), Err(Error::InvalidPaletteVersion(v)) if v == version));
		}
	}

	#[test]
	fn versionsAreUnique() {
		for (i, palette) in PALETTES.iter().enumerate() {
			assert!(PALETTES[i + 1..].iter().all(|other| other.version != palette.version));
		}
	}

	#[test]
	fn pngPaletteIsFlattenedInIndexOrder() {
		assert_eq!(
			lookup(1).unwrap().pngPalette(),
			[0x55, 0xAA, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x88, 0x00]
		);
	}
}
