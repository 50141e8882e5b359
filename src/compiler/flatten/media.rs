use crate::compiler::native;
use anyhow::{Result, anyhow};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::fs::File;
use std::io::{Cursor, Read, Write};

/// Buffer a sound resource's data file.
///
/// A missing or unopenable file yields an empty buffer; the rest of the
/// project keeps flattening. A short read keeps whatever bytes were obtained
/// and reports a diagnostic.
pub fn read_sound_data(path: &str) -> Vec<u8> {
    if path.is_empty() {
        return Vec::new();
    }

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return Vec::new(),
    };

    let expected = file.metadata().map(|meta| meta.len() as usize).unwrap_or(0);
    let mut data = Vec::with_capacity(expected);
    let _ = file.read_to_end(&mut data);
    if data.len() < expected {
        eprintln!("warning: resource stream cut short while loading sound data: {path}");
    }
    data
}

/// Decode a raster image into a padded, channel-reordered, zlib-compressed
/// native record. Any read or decode failure yields an empty record without
/// aborting the flatten.
pub fn load_image(path: &str) -> native::Image {
    match decode_and_pack(path) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("warning: failed to load image {path}: {err}");
            native::Image::default()
        }
    }
}

fn decode_and_pack(path: &str) -> Result<native::Image> {
    let bytes = std::fs::read(path)?;

    // Normalize RGB, grayscale, indexed and 16-bit sources to 8-bit with an
    // alpha channel, the same canonical layout the legacy decoder produced.
    let mut decoder = png::Decoder::new(Cursor::new(bytes.as_slice()));
    decoder
        .set_transformations(png::Transformations::normalize_to_color8() | png::Transformations::ALPHA);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());
    let rgba = match frame.color_type {
        png::ColorType::Rgba => buf,
        // ALPHA leaves grayscale sources as gray+alpha pairs.
        png::ColorType::GrayscaleAlpha => {
            let mut expanded = Vec::with_capacity(buf.len() * 2);
            for pair in buf.chunks_exact(2) {
                expanded.extend_from_slice(&[pair[0], pair[0], pair[0], pair[1]]);
            }
            expanded
        }
        other => return Err(anyhow!("unsupported pixel layout {other:?}")),
    };
    let (width, height) = (frame.width as usize, frame.height as usize);

    // Pad to the legacy power-of-two bound and reorder RGBA into the BGRA
    // layout the runner samples. Padding rows/columns stay zeroed.
    let wid_full = nlpo2dc(frame.width).wrapping_add(1) as usize;
    let hgt_full = nlpo2dc(frame.height).wrapping_add(1) as usize;
    let bitmap_size = wid_full * hgt_full * 4;
    let mut bitmap = vec![0u8; bitmap_size];
    debug_assert_eq!(rgba.len(), width * height * 4);

    for row in 0..height {
        let mut out = row * wid_full * 4;
        for col in 0..width {
            let src = (row * width + col) * 4;
            bitmap[out] = rgba[src + 2];
            bitmap[out + 1] = rgba[src + 1];
            bitmap[out + 2] = rgba[src];
            bitmap[out + 3] = rgba[src + 3];
            out += 4;
        }
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&bitmap)?;
    let data = encoder.finish()?;

    Ok(native::Image {
        width: wid_full as u32,
        height: hgt_full as u32,
        data,
        full_size: bitmap_size,
    })
}

/// Smear the low bits of `x - 1`. The padded dimension is this plus one,
/// kept bit-exact with the legacy rounding rule.
fn nlpo2dc(x: u32) -> u32 {
    let mut x = x.wrapping_sub(1);
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x | (x >> 16)
}
