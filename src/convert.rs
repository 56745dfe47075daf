//! Pixel-format converter selection.
//!
//! The 1x1 capture is turned into a textual color descriptor by whichever
//! supported converter is installed. Each one lays the pixel line out
//! differently, so the field extraction depends on the variant chosen.

use std::path::Path;
use std::process::Command;
use tracing::warn;

use crate::tools::find_in_path;

/// Fixed install path probed for GraphicsMagick.
const GM_PATH: &str = "/usr/bin/gm";

/// Descriptor format for the pixel at (0,0) of the capture.
const PIXEL_FORMAT: &str = "%[pixel:p{0,0}]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// GraphicsMagick `gm convert`, preferred when installed.
    GraphicsMagick,
    /// ImageMagick 7 unified binary.
    Magick,
    /// Legacy ImageMagick 6 `convert`.
    Convert,
    /// No converter installed; the capture is decoded in-process.
    Builtin,
}

/// Pick the converter once at startup, in preference order.
pub fn detect() -> Converter {
    choose(
        Path::new(GM_PATH).is_file(),
        find_in_path("magick").is_some(),
        find_in_path("convert").is_some(),
    )
}

fn choose(gm: bool, magick: bool, convert: bool) -> Converter {
    if gm {
        Converter::GraphicsMagick
    } else if magick {
        Converter::Magick
    } else if convert {
        Converter::Convert
    } else {
        Converter::Builtin
    }
}

impl Converter {
    /// Invocation template reading PNG data on stdin, or `None` for the
    /// built-in decoder.
    pub fn command(self) -> Option<Command> {
        match self {
            Converter::GraphicsMagick => {
                let mut cmd = Command::new(GM_PATH);
                cmd.args(["convert", "-", "-format", PIXEL_FORMAT, "txt:-"]);
                Some(cmd)
            }
            Converter::Magick => {
                let mut cmd = Command::new("magick");
                cmd.args(["-", "-format", PIXEL_FORMAT, "txt:-"]);
                Some(cmd)
            }
            Converter::Convert => {
                let mut cmd = Command::new("convert");
                cmd.args(["-", "-format", PIXEL_FORMAT, "txt:-"]);
                Some(cmd)
            }
            Converter::Builtin => None,
        }
    }

    /// Pull the pixel color field out of the converter's last output line.
    pub fn extract(self, line: &str) -> String {
        match self {
            // gm prints the color as the final field of the line
            Converter::GraphicsMagick => {
                line.split_whitespace().last().unwrap_or("").to_string()
            }
            // ImageMagick pads with double spaces; counting single-space
            // fields (empty ones included) puts the color in field four
            Converter::Magick | Converter::Convert => {
                line.split(' ').nth(3).unwrap_or("").to_string()
            }
            Converter::Builtin => line.trim().to_string(),
        }
    }
}

/// Decode a captured PNG and format its (0,0) pixel as `#rrggbb`.
///
/// A capture that cannot be decoded degrades to the empty string, the same
/// way a misbehaving converter binary would.
pub fn decode_pixel(png: &[u8]) -> String {
    let img = match image::load_from_memory(png) {
        Ok(img) => img.to_rgb8(),
        Err(err) => {
            warn!("could not decode capture: {err}");
            return String::new();
        }
    };
    match img.get_pixel_checked(0, 0) {
        Some(pixel) => format!("#{:02x}{:02x}{:02x}", pixel[0], pixel[1], pixel[2]),
        None => {
            warn!("capture contains no pixels");
            String::new()
        }
    }
}
