#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	amiga_icon::{
		createIcon, defaultOutputPath,
		info::{DiskObject, IconMetadata},
		palette, writePreview, Result, INFO_EXTENSION,
	},
	clap::Parser,
	const_format::formatcp,
	log::{error, info},
	std::{path::PathBuf, process::ExitCode},
};

const DEFAULT_ICON_TYPE: u8 = 3;
const DEFAULT_SIZE: u32 = 48;
const DEFAULT_PALETTE: u8 = 2;

/// Convert an image to an Amiga Workbench icon
#[derive(Parser)]
#[clap(version)]
struct Args {
	/// Path to the input image
	#[clap(value_parser)]
	inputImage: PathBuf,

	#[clap(
		long = "type",
		default_value_t = DEFAULT_ICON_TYPE,
		help = "Icon type (1: Disk, 2: Drawer, 3: Tool, 4: Project, 5: Trashcan, 6: Device, 7: Kickstart ROM, 8: AppIcon)"
	)]
	iconType: u8,

	/// Icon width in pixels
	#[clap(long, default_value_t = DEFAULT_SIZE)]
	width: u32,

	/// Icon height in pixels
	#[clap(long, default_value_t = DEFAULT_SIZE)]
	height: u32,

	#[clap(long, value_parser, help = formatcp!("Output path [default: input path with .{} extension]", INFO_EXTENSION))]
	output: Option<PathBuf>,

	/// Palette version (1 for 1.x, 2 for 2.x)
	#[clap(long, default_value_t = DEFAULT_PALETTE)]
	palette: u8,

	/// Also write the quantized icon as an indexed PNG
	#[clap(long, value_parser)]
	preview: Option<PathBuf>,

	/// Print the icon header as TOML to stdout
	#[clap(long)]
	dumpHeader: bool,
}

fn run(args: Args) -> Result<PathBuf> {
	let Args { inputImage, iconType, width, height, output, palette: paletteVersion, preview, dumpHeader } = args;
	let outputPath = output.unwrap_or_else(|| defaultOutputPath(&inputImage));
	let metadata = IconMetadata::new(iconType, width, height, outputPath)?;
	let palette = palette::lookup(paletteVersion)?;

	let grid = createIcon(&inputImage, &metadata, palette)?;
	if let Some(previewPath) = &preview {
		writePreview(&grid, palette, previewPath)?;
		info!("preview written to {previewPath:?}");
	}
	if dumpHeader {
		match DiskObject::new(&metadata).toToml() {
			Ok(toml) => print!("{toml}"),
			Err(err) => error!("failed rendering header: {err}"),
		}
	}
	Ok(metadata.path)
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	match run(Args::parse()) {
		Ok(iconPath) => {
			info!("Amiga Workbench icon created at: {}", iconPath.display());
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!("{err}");
			ExitCode::FAILURE
		}
	}
}
