use anyhow::{Context, Result};
use fast_image_resize as fr;
use fr::images::Image;
use image::ImageFormat;

use super::frame_data::FrameData;

const SUPPORTED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif];

/// Format recognized from the leading magic bytes, if it is one we decode.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .filter(|format| SUPPORTED_FORMATS.contains(format))
}

/// Decodes JPEG, PNG or GIF bytes into an RGB24 frame.
///
/// The format is sniffed from the content, not the file name. Alpha is
/// dropped.
pub fn decode_image(bytes: &[u8]) -> Result<FrameData> {
    let img = image::load_from_memory(bytes).context("unsupported or corrupt image data")?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(FrameData::new(rgb.into_raw(), width, height))
}

/// Aspect-preserving size whose longer side is at most `max_dimension`.
///
/// Frames already inside the bound keep their size, and `0` disables the
/// bound entirely.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
        return (width, height);
    }

    let max = max_dimension as u64;
    let (w, h) = (width as u64, height as u64);
    let (new_w, new_h) = if w > h {
        (max, max * h / w)
    } else {
        (max * w / h, max)
    };
    ((new_w as u32).max(1), (new_h as u32).max(1))
}

/// Shrinks a frame to fit `max_dimension` with a Lanczos3 convolution.
pub fn resize_to_bound(frame: FrameData, max_dimension: u32) -> Result<FrameData> {
    let (new_w, new_h) = fit_within(frame.width, frame.height, max_dimension);
    if (new_w, new_h) == (frame.width, frame.height) {
        return Ok(frame);
    }

    let (orig_w, orig_h) = (frame.width, frame.height);
    let src_image = Image::from_vec_u8(orig_w, orig_h, frame.buffer, fr::PixelType::U8x3)
        .context("frame buffer does not match its dimensions")?;
    let mut dst_image = Image::new(new_w, new_h, fr::PixelType::U8x3);

    // Default algorithm is Convolution(Lanczos3)
    let mut resizer = fr::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, None)
        .with_context(|| format!("failed to resize {}x{} to {}x{}", orig_w, orig_h, new_w, new_h))?;

    crate::utils::logger::debug(&format!(
        "resized {}x{} -> {}x{}",
        orig_w, orig_h, new_w, new_h
    ));

    Ok(FrameData::new(dst_image.into_vec(), new_w, new_h))
}

/// Decodes and bounds the contents of one image file.
pub fn load_image(bytes: &[u8], max_dimension: u32) -> Result<FrameData> {
    let frame = decode_image(bytes).context("failed to decode image")?;
    resize_to_bound(frame, max_dimension).context("failed to resize image")
}
