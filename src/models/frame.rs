/// One RGBA image handed to the batch and frame-scanning entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// `width * height * 4` bytes, row-major RGBA
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Frame {
    /// Wrap an RGBA buffer; the length is checked when the frame is decoded
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }
}
