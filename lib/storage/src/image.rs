use crate::error::StorageError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// One band of a cell's tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileImage<'data> {
    size: u32,
    pixels: &'data [i16],
    missing_value: i16,
}

impl<'data> TileImage<'data> {
    pub(crate) fn new(size: u32, pixels: &'data [i16], missing_value: i16) -> Self {
        Self {
            size,
            pixels,
            missing_value,
        }
    }

    /// The number of pixels along one edge.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The raw pixel values in row-major order.
    pub fn pixels(&self) -> &'data [i16] {
        self.pixels
    }

    /// Converts the pixels into 8-bit grey and alpha samples.
    ///
    /// Invalid pixels become fully transparent. Valid pixels are scaled down by 128, negative
    /// values are clamped to black.
    pub fn grey_alpha_samples(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&value| {
                if value == self.missing_value {
                    [0, 0]
                } else {
                    let intensity = u8::try_from(value.max(0) / 128).unwrap_or(u8::MAX);
                    [intensity, u8::MAX]
                }
            })
            .collect()
    }

    /// Encodes the tile as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, StorageError> {
        let mut bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut bytes, self.size, self.size);
        encoder.set_color(png::ColorType::GrayscaleAlpha);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| StorageError::Other(Box::new(e)))?;
        writer
            .write_image_data(&self.grey_alpha_samples())
            .map_err(|e| StorageError::Other(Box::new(e)))?;
        writer
            .finish()
            .map_err(|e| StorageError::Other(Box::new(e)))?;
        Ok(bytes)
    }

    /// Encodes the tile as a `data:` URI holding a base64 PNG.
    pub fn to_data_uri(&self) -> Result<String, StorageError> {
        let png = self.encode_png()?;
        Ok(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(png)))
    }
}
