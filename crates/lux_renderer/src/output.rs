//! Pixel encoding and image sinks.

use crate::{Color, Interval, RenderError};
use std::fmt::Write as _;
use std::io::Write;

/// Channel range kept before scaling to 8 bits.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0). NaN and negatives map to 0.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct, clamp and quantize a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f64| (255.999 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Destination for finished scanlines, fed strictly top to bottom.
pub trait ScanlineSink {
    /// Called once before the first scanline.
    fn write_header(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Called once per row, in increasing `index` order.
    fn write_scanline(&mut self, index: u32, pixels: &[Color]) -> Result<(), RenderError>;

    /// Called after the last row.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

impl<S: ScanlineSink + ?Sized> ScanlineSink for &mut S {
    fn write_header(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        (**self).write_header(width, height)
    }

    fn write_scanline(&mut self, index: u32, pixels: &[Color]) -> Result<(), RenderError> {
        (**self).write_scanline(index, pixels)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        (**self).finish()
    }
}

/// Plain-text PPM (`P3`) writer: one `r g b` line per pixel.
pub struct PpmSink<W: Write> {
    writer: W,
    line: String,
}

impl<W: Write> PpmSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line: String::new(),
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ScanlineSink for PpmSink<W> {
    fn write_header(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        write!(self.writer, "P3\n{width} {height}\n255\n")?;
        Ok(())
    }

    fn write_scanline(&mut self, _index: u32, pixels: &[Color]) -> Result<(), RenderError> {
        // Format the whole row first so it goes out in a single write
        self.line.clear();
        for &color in pixels {
            let [r, g, b] = color_to_rgb(color);
            // Writing into a String cannot fail
            let _ = writeln!(self.line, "{r} {g} {b}");
        }
        self.writer.write_all(self.line.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert_eq!(linear_to_gamma(f64::NAN), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgb_quantization() {
        // 1.0 clamps to 0.999 -> 255; 0.5 -> sqrt -> 0.7071 -> 181
        let rgb = color_to_rgb(Color::new(1.0, 0.0, 0.5));
        assert_eq!(rgb, [255, 0, 181]);

        // Same input, same bits
        assert_eq!(color_to_rgb(Color::new(1.0, 0.0, 0.5)), rgb);
    }

    #[test]
    fn test_color_to_rgb_saturates() {
        assert_eq!(color_to_rgb(Color::new(50.0, -3.0, f64::NAN)), [255, 0, 0]);
        assert_eq!(color_to_rgb(Color::new(f64::INFINITY, 0.25, 0.0)), [255, 127, 0]);
    }

    #[test]
    fn test_ppm_header_and_rows() {
        let mut sink = PpmSink::new(Vec::new());
        sink.write_header(2, 1).unwrap();
        sink.write_scanline(0, &[Color::ONE, Color::ZERO]).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n0 0 0\n");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ppm_write_failure_is_reported() {
        let mut sink = PpmSink::new(FailingWriter);
        let err = sink.write_scanline(0, &[Color::ONE]).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
