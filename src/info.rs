//! Workbench `.info` files: a big-endian `DiskObject` followed by the planar image data.

use {
	crate::{planar::Bitplanes, Error, Result},
	byteorder::{WriteBytesExt, BE},
	serde::Serialize,
	std::{
		fs::File,
		io::{self, BufWriter, Write},
		path::{Path, PathBuf},
	},
};

pub const WB_DISKMAGIC: u16 = 0xE310;
pub const WB_DISKVERSION: u16 = 1;
/// Marks the gadget user data of icons drawn with the 2.x-era palette.
pub const WB_DISKREVISION: u32 = 1;

const GFLG_GADGIMAGE_GADGHCOMP: u16 = 5;
const GACT_RELVERIFY_IMMEDIATE: u16 = 3;
const GTYP_BOOLGADGET: u16 = 1;
const DEFAULT_STACK_SIZE: u32 = 4096;
const IMAGE_DEPTH: u16 = 2;
const PLANE_PICK: u8 = 0b11;

/// Byte length of everything preceding the first bitplane.
pub const HEADER_SIZE: usize = 98;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IconType {
	Disk = 1,
	Drawer,
	Tool,
	Project,
	Garbage,
	Device,
	Kick,
	AppIcon,
}

impl TryFrom<u8> for IconType {
	type Error = Error;
	fn try_from(code: u8) -> Result<Self> {
		use IconType::*;
		Ok(match code {
			1 => Disk,
			2 => Drawer,
			3 => Tool,
			4 => Project,
			5 => Garbage,
			6 => Device,
			7 => Kick,
			8 => AppIcon,
			_ => return Err(Error::InvalidIconType(code)),
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMetadata {
	pub iconType: IconType,
	pub width: u16,
	pub height: u16,
	pub path: PathBuf,
}

impl IconMetadata {
	pub fn new(iconType: u8, width: u32, height: u32, path: impl Into<PathBuf>) -> Result<Self> {
		let iconType = IconType::try_from(iconType)?;
		let (Ok(w @ 1..=u16::MAX), Ok(h @ 1..=u16::MAX)) = (u16::try_from(width), u16::try_from(height)) else {
			return Err(Error::InvalidDimensions { width, height });
		};
		Ok(Self { iconType, width: w, height: h, path: path.into() })
	}
}

#[derive(Debug, Serialize)]
pub struct Gadget {
	pub nextGadget: u32,
	pub leftEdge: i16,
	pub topEdge: i16,
	pub width: u16,
	pub height: u16,
	pub flags: u16,
	pub activation: u16,
	pub gadgetType: u16,
	pub gadgetRender: u32,
	pub selectRender: u32,
	pub gadgetText: u32,
	pub mutualExclude: u32,
	pub specialInfo: u32,
	pub gadgetID: u16,
	pub userData: u32,
}

#[derive(Debug, Serialize)]
pub struct ImageHeader {
	pub leftEdge: i16,
	pub topEdge: i16,
	pub width: u16,
	pub height: u16,
	pub depth: u16,
	pub imageData: u32,
	pub planePick: u8,
	pub planeOnOff: u8,
	pub nextImage: u32,
}

// Scalar fields come first so the TOML rendering places both tables last.
#[derive(Debug, Serialize)]
pub struct DiskObject {
	pub magic: u16,
	pub version: u16,
	pub iconType: u8,
	pub defaultTool: u32,
	pub toolTypes: u32,
	pub currentX: i32,
	pub currentY: i32,
	pub drawerData: u32,
	pub toolWindow: u32,
	pub stackSize: u32,
	pub gadget: Gadget,
	pub image: ImageHeader,
}

impl DiskObject {
	pub fn new(metadata: &IconMetadata) -> Self {
		let &IconMetadata { iconType, width, height, .. } = metadata;
		DiskObject {
			magic: WB_DISKMAGIC,
			version: WB_DISKVERSION,
			iconType: iconType as _,
			defaultTool: 0,
			toolTypes: 0,
			currentX: 0,
			currentY: 0,
			drawerData: 0,
			toolWindow: 0,
			stackSize: DEFAULT_STACK_SIZE,
			gadget: Gadget {
				nextGadget: 0,
				leftEdge: 0,
				topEdge: 0,
				width,
				height,
				flags: GFLG_GADGIMAGE_GADGHCOMP,
				activation: GACT_RELVERIFY_IMMEDIATE,
				gadgetType: GTYP_BOOLGADGET,
				gadgetRender: 1,
				selectRender: 0,
				gadgetText: 0,
				mutualExclude: 0,
				specialInfo: 0,
				gadgetID: 0,
				userData: WB_DISKREVISION,
			},
			image: ImageHeader {
				leftEdge: 0,
				topEdge: 0,
				width,
				height,
				depth: IMAGE_DEPTH,
				imageData: 1,
				planePick: PLANE_PICK,
				planeOnOff: 0,
				nextImage: 0,
			},
		}
	}

	pub fn writeTo(&self, w: &mut impl Write, bitplanes: &Bitplanes) -> io::Result<()> {
		let Self { gadget: g, image: i, .. } = self;
		assert_eq!(bitplanes.height, i.height as usize);
		assert!(bitplanes.paddedWidth >= i.width as usize && bitplanes.paddedWidth % 16 == 0);

		w.write_u16::<BE>(self.magic)?;
		w.write_u16::<BE>(self.version)?;

		w.write_u32::<BE>(g.nextGadget)?;
		w.write_i16::<BE>(g.leftEdge)?;
		w.write_i16::<BE>(g.topEdge)?;
		w.write_u16::<BE>(g.width)?;
		w.write_u16::<BE>(g.height)?;
		w.write_u16::<BE>(g.flags)?;
		w.write_u16::<BE>(g.activation)?;
		w.write_u16::<BE>(g.gadgetType)?;
		w.write_u32::<BE>(g.gadgetRender)?;
		w.write_u32::<BE>(g.selectRender)?;
		w.write_u32::<BE>(g.gadgetText)?;
		w.write_u32::<BE>(g.mutualExclude)?;
		w.write_u32::<BE>(g.specialInfo)?;
		w.write_u16::<BE>(g.gadgetID)?;
		w.write_u32::<BE>(g.userData)?;

		w.write_u8(self.iconType)?;
		w.write_u8(0)?; // pad

		w.write_u32::<BE>(self.defaultTool)?;
		w.write_u32::<BE>(self.toolTypes)?;
		w.write_i32::<BE>(self.currentX)?;
		w.write_i32::<BE>(self.currentY)?;
		w.write_u32::<BE>(self.drawerData)?;
		w.write_u32::<BE>(self.toolWindow)?;
		w.write_u32::<BE>(self.stackSize)?;

		w.write_i16::<BE>(i.leftEdge)?;
		w.write_i16::<BE>(i.topEdge)?;
		w.write_u16::<BE>(i.width)?;
		w.write_u16::<BE>(i.height)?;
		w.write_u16::<BE>(i.depth)?;
		w.write_u32::<BE>(i.imageData)?;
		w.write_u8(i.planePick)?;
		w.write_u8(i.planeOnOff)?;
		w.write_u32::<BE>(i.nextImage)?;

		for plane in &bitplanes.planes {
			w.write_all(plane)?;
		}
		Ok(())
	}

	pub fn toToml(&self) -> core::result::Result<String, toml::ser::Error> {
		toml::to_string_pretty(self)
	}
}

/// Creates (or truncates) `metadata.path` and writes the whole icon to it.
pub fn write(metadata: &IconMetadata, bitplanes: &Bitplanes) -> Result<()> {
	let path: &Path = &metadata.path;
	let ioError = |source| Error::Io { path: path.to_owned(), source };
	let mut file = BufWriter::new(File::create(path).map_err(ioError)?);
	DiskObject::new(metadata).writeTo(&mut file, bitplanes).map_err(ioError)?;
	file.flush().map_err(ioError)
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::planar::{encodeBitplanes, IndexGrid},
	};

	fn bitplanesFor(width: usize, height: usize, index: u8) -> Bitplanes {
		encodeBitplanes(&IndexGrid { width, height, data: vec![index; width * height].into_boxed_slice() })
	}

	fn beU16(bytes: &[u8], offset: usize) -> u16 {
		u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
	}

	fn beU32(bytes: &[u8], offset: usize) -> u32 {
		u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap())
	}

	#[test]
	fn iconTypeRange() {
		for code in 1..=8 {
			assert_eq!(IconType::try_from(code).unwrap() as u8, code);
		}
		for code in [0, 9, u8::MAX] {
			assert!(matches!(IconType::try_from(code), Err(Error::InvalidIconType(c)) if c == code));
		}
	}

	#[test]
	fn metadataValidation() {
		assert!(IconMetadata::new(3, 48, 48, "a.info").is_ok());
		assert!(matches!(IconMetadata::new(0, 48, 48, "a.info"), Err(Error::InvalidIconType(0))));
		assert!(matches!(IconMetadata::new(9, 48, 48, "a.info"), Err(Error::InvalidIconType(9))));
		for (width, height) in [(0, 48), (48, 0), (65536, 1), (1, 70000)] {
			assert!(matches!(
				IconMetadata::new(3, width, height, "a.info"),
				Err(Error::InvalidDimensions { width: w, height: h }) if (w, h) == (width, height)
			));
		}
		assert_eq!(IconMetadata::new(8, 65535, 1, "a.info").unwrap().width, u16::MAX);
	}

	#[test]
	fn headerLayout() {
		let metadata = IconMetadata::new(3, 8, 8, "unused.info").unwrap();
		let bitplanes = bitplanesFor(8, 8, 1);
		let mut bytes = Vec::new();
		DiskObject::new(&metadata).writeTo(&mut bytes, &bitplanes).unwrap();

		assert_eq!(bytes.len(), HEADER_SIZE + 2 * 16);
		assert_eq!(beU16(&bytes, 0), WB_DISKMAGIC);
		assert_eq!(beU16(&bytes, 2), 1);
		assert_eq!(beU32(&bytes, 4), 0); // nextGadget
		assert_eq!([beU16(&bytes, 12), beU16(&bytes, 14)], [8, 8]);
		assert_eq!([beU16(&bytes, 16), beU16(&bytes, 18), beU16(&bytes, 20)], [5, 3, 1]);
		assert_eq!(beU32(&bytes, 22), 1); // gadgetRender
		assert_eq!(beU32(&bytes, 44), 1); // userData
		assert_eq!(&bytes[48..50], &[3, 0]);
		assert_eq!(beU32(&bytes, 74), 4096);
		assert_eq!([beU16(&bytes, 82), beU16(&bytes, 84), beU16(&bytes, 86)], [8, 8, 2]);
		assert_eq!(beU32(&bytes, 88), 1);
		assert_eq!(&bytes[92..94], &[0b11, 0]);
		assert_eq!(beU32(&bytes, 94), 0);
		// index 1 sets plane 0 only; each 8-pixel row is followed by a zero pad byte
		assert_eq!(&bytes[HEADER_SIZE..HEADER_SIZE + 16], &[0xFF_u8, 0].repeat(8)[..]);
		assert!(bytes[HEADER_SIZE + 16..].iter().all(|&byte| byte == 0));
	}

	#[test]
	fn tomlDump() {
		let toml = DiskObject::new(&IconMetadata::new(4, 32, 16, "unused.info").unwrap()).toToml().unwrap();
		assert!(toml.contains("iconType = 4"));
		assert!(toml.contains("stackSize = 4096"));
		assert!(toml.contains("[gadget]"));
		assert!(toml.contains("[image]"));
	}

	#[test]
	fn writeCreatesFile() {
		let path = std::env::temp_dir().join(format!("amiga_icon-write-{}.info", std::process::id()));
		let metadata = IconMetadata::new(2, 20, 3, &path).unwrap();
		write(&metadata, &bitplanesFor(20, 3, 3)).unwrap();
		let bytes = std::fs::read(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(bytes.len(), HEADER_SIZE + 2 * (32 * 3 / 8));
		assert_eq!(bytes[48], 2);
	}

	#[test]
	fn writeToMissingDirectoryIsIoError() {
		let path = std::env::temp_dir().join("amiga_icon-no-such-dir").join("icon.info");
		let metadata = IconMetadata::new(3, 8, 8, &path).unwrap();
		assert!(matches!(write(&metadata, &bitplanesFor(8, 8, 0)), Err(Error::Io { path: p, .. }) if p == path));
	}
}
