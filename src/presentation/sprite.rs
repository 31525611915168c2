// Sprite decoding and terminal rendering: integer fit scale, nearest-neighbour
// resize and half-block cells (one cell = two vertical pixels)
use colored::Colorize;
use image::imageops::{self, FilterType};
use image::{ImageResult, Rgba, RgbaImage};

const ALPHA_CUTOFF: u8 = 128;

/// Decode any supported image payload into RGBA pixels.
pub fn decode(data: &[u8]) -> ImageResult<RgbaImage> {
    Ok(image::load_from_memory(data)?.to_rgba8())
}

/// Largest integer scale that fits `width`x`height` inside the box, never below 1.
pub fn fit_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> u32 {
    let max_width = max_width.max(1);
    let max_height = max_height.max(1);
    let width = width.max(1);
    let height = height.max(1);
    (max_width / width).min(max_height / height).max(1)
}

pub fn scale_nearest(pixels: &RgbaImage, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    imageops::resize(
        pixels,
        pixels.width() * scale,
        pixels.height() * scale,
        FilterType::Nearest,
    )
}

fn is_clear(pixel: &Rgba<u8>) -> bool {
    pixel.0[3] < ALPHA_CUTOFF
}

/// Render pixels as rows of `▀`/`▄` cells, top pixel in the foreground and
/// bottom pixel in the background. Transparent pairs become spaces.
pub fn half_block_rows(pixels: &RgbaImage) -> Vec<String> {
    let blank = Rgba([0, 0, 0, 0]);
    let mut rows = Vec::with_capacity(pixels.height().div_ceil(2) as usize);

    for y in (0..pixels.height()).step_by(2) {
        let mut row = String::new();
        for x in 0..pixels.width() {
            let top = *pixels.get_pixel(x, y);
            let bottom = if y + 1 < pixels.height() {
                *pixels.get_pixel(x, y + 1)
            } else {
                blank
            };
            let [tr, tg, tb, _] = top.0;
            let [br, bg, bb, _] = bottom.0;

            let cell = match (is_clear(&top), is_clear(&bottom)) {
                (true, true) => " ".to_string(),
                (false, true) => "▀".truecolor(tr, tg, tb).to_string(),
                (true, false) => "▄".truecolor(br, bg, bb).to_string(),
                (false, false) => "▀"
                    .truecolor(tr, tg, tb)
                    .on_truecolor(br, bg, bb)
                    .to_string(),
            };
            row.push_str(&cell);
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::io::Cursor;

    const RED: Rgba<u8> = Rgba([200, 30, 30, 255]);
    const BLUE: Rgba<u8> = Rgba([30, 30, 200, 255]);

    fn encode(pixels: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        pixels
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_real_png() {
        let pixels = RgbaImage::from_pixel(56, 48, RED);
        let decoded = decode(&encode(&pixels)).unwrap();
        assert_eq!(decoded.dimensions(), (56, 48));
        assert_eq!(*decoded.get_pixel(10, 10), RED);
    }

    #[test]
    fn test_decode_rejects_header_without_pixel_data() {
        let mut data = encode(&RgbaImage::from_pixel(56, 56, RED));
        // Keep the signature and IHDR chunk, replace everything after it.
        data.truncate(33);
        data.extend_from_slice(b"garbage-not-zlib-not-IDAT");
        assert!(decode(&data).is_err());
        assert!(decode(b"definitely not an image").is_err());
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_fit_scale() {
        assert_eq!(fit_scale(56, 56, 336, 196), 3);
        assert_eq!(fit_scale(96, 96, 80, 40), 1);
        assert_eq!(fit_scale(10, 20, 100, 100), 5);
        assert_eq!(fit_scale(0, 0, 0, 0), 1);
    }

    #[test]
    fn test_scale_nearest_keeps_hard_edges() {
        let mut pixels = RgbaImage::from_pixel(2, 1, RED);
        pixels.put_pixel(1, 0, BLUE);

        let scaled = scale_nearest(&pixels, 3);
        assert_eq!(scaled.dimensions(), (6, 3));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(*scaled.get_pixel(x, y), RED);
                assert_eq!(*scaled.get_pixel(x + 3, y), BLUE);
            }
        }
        assert_eq!(scale_nearest(&pixels, 0).dimensions(), (2, 1));
    }

    #[test]
    fn test_half_block_rows() {
        colored::control::set_override(false);
        let mut pixels = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 0]));
        pixels.put_pixel(0, 0, RED);
        pixels.put_pixel(1, 1, RED);
        pixels.put_pixel(2, 0, RED);
        pixels.put_pixel(2, 1, BLUE);
        pixels.put_pixel(0, 2, BLUE);

        let rows = half_block_rows(&pixels);
        assert_eq!(rows, vec!["▀▄▀".to_string(), "▀  ".to_string()]);
    }
}
