use {
	crate::palette::{Palette, Rgb},
	core::array,
	glam::IVec3,
	image::RgbImage,
};

pub const NUM_PLANES: usize = 2;

/// Rows of a planar image are stored in whole 16-bit words.
pub const WORD_BITS: usize = u16::BITS as _;

/// Read-only RGB view of a decoded picture.
pub trait PixelSource {
	fn width(&self) -> usize;
	fn height(&self) -> usize;
	fn rgb(&self, x: usize, y: usize) -> Rgb;
}

impl PixelSource for RgbImage {
	fn width(&self) -> usize {
		self.dimensions().0 as _
	}
	fn height(&self) -> usize {
		self.dimensions().1 as _
	}
	fn rgb(&self, x: usize, y: usize) -> Rgb {
		self.get_pixel(x as _, y as _).0
	}
}

#[inline(always)]
fn ivec3(color: Rgb) -> IVec3 {
	IVec3::from_array(color.map(|colorComponent| colorComponent as _))
}

/// Index of the palette color nearest to `pixel` by squared euclidean distance.
/// On a tie the lowest index wins.
pub fn quantizePixel(pixel: Rgb, palette: &Palette) -> u8 {
	let pixel = ivec3(pixel);
	let (mut nearestSquaredDist, mut nearestI) = (i32::MAX, 0);
	for (i, &palColor) in palette.colors.iter().enumerate() {
		let Δ = pixel - ivec3(palColor);
		let squaredDist = Δ.dot(Δ);
		if squaredDist < nearestSquaredDist {
			(nearestSquaredDist, nearestI) = (squaredDist, i);
		}
	}
	nearestI as _
}

/// Palette indices in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
	pub width: usize,
	pub height: usize,
	pub data: Box<[u8]>,
}

impl IndexGrid {
	#[inline(always)]
	pub fn get(&self, x: usize, y: usize) -> u8 {
		self.data[y * self.width + x]
	}
}

pub fn buildIndexGrid(source: &impl PixelSource, palette: &Palette) -> IndexGrid {
	let (width, height) = (source.width(), source.height());
	let mut data = Vec::with_capacity(width * height);
	for y in 0..height {
		for x in 0..width {
			data.push(quantizePixel(source.rgb(x, y), palette));
		}
	}
	IndexGrid { width, height, data: data.into_boxed_slice() }
}

#[inline(always)]
pub const fn paddedWidth(width: usize) -> usize {
	((width + (WORD_BITS - 1)) >> 4) << 4
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitplanes {
	pub paddedWidth: usize,
	pub height: usize,
	pub planes: [Box<[u8]>; NUM_PLANES],
}

impl Bitplanes {
	#[inline(always)]
	pub fn planeLen(&self) -> usize {
		self.paddedWidth * self.height / u8::BITS as usize
	}
}

/// Splits the index grid into bitplanes, plane `n` holding bit `n` of every index.
/// The leftmost pixel of each byte lands in its most significant bit; columns past
/// the grid width stay zero up to the word-aligned row end.
pub fn encodeBitplanes(grid: &IndexGrid) -> Bitplanes {
	let &IndexGrid { width, height, .. } = grid;
	let paddedWidth = paddedWidth(width);
	let planeLen = paddedWidth * height / u8::BITS as usize;
	let mut planes: [Box<[u8]>; NUM_PLANES] = array::from_fn(|_| vec![0; planeLen].into_boxed_slice());
	for (plane, planeData) in planes.iter_mut().enumerate() {
		for y in 0..height {
			let rowStart = y * paddedWidth;
			for x in 0..width {
				if grid.get(x, y) & (1 << plane) != 0 {
					planeData[(rowStart + x) / 8] |= 0x80 >> (x % 8);
				}
			}
		}
	}
	Bitplanes { paddedWidth, height, planes }
}
