use crate::error::IoError;
use jpeg_encoder::{ColorType, Encoder};
use segview_image::{Image, ImageSize};
use std::{fs, path::Path};

/// Writes the given _(rgb8)_ image as JPEG to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The RGB image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    quality: u8,
) -> Result<(), IoError> {
    let (width, height) = jpeg_dimensions(image.size())?;
    let encoder = Encoder::new_file(file_path, quality)?;
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    Ok(())
}

/// Encodes the given _(rgb8)_ image into JPEG bytes.
///
/// # Arguments
///
/// - `image` - The RGB image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
pub fn encode_image_jpeg_rgb8(image: &Image<u8, 3>, quality: u8) -> Result<Vec<u8>, IoError> {
    let (width, height) = jpeg_dimensions(image.size())?;
    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    encoder.encode(image.as_slice(), width, height, ColorType::Rgb)?;
    Ok(buffer)
}

/// Read a JPEG image as a three channel _(rgb8)_ image.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG file.
///
/// # Returns
///
/// A RGB image with three channels _(rgb8)_.
pub fn read_image_jpeg_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("jpg") && !ext.eq_ignore_ascii_case("jpeg")
    }) {
        return Err(IoError::InvalidFileExtension(file_path));
    }

    let jpeg_data = fs::read(&file_path)?;
    decode_image_jpeg_rgb8(&jpeg_data)
}

/// Decodes a JPEG image with three channel _(rgb8)_ from raw bytes.
///
/// Grayscale JPEGs are expanded to RGB by replicating the luma channel.
///
/// # Arguments
///
/// - `src` - Raw bytes of the jpeg file
pub fn decode_image_jpeg_rgb8(src: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let mut decoder = zune_jpeg::JpegDecoder::new(src);
    decoder.decode_headers()?;

    let image_info = decoder.info().ok_or_else(|| {
        IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
            "Failed to find image info from its metadata",
        )))
    })?;

    let image_size = ImageSize {
        width: image_info.width as usize,
        height: image_info.height as usize,
    };

    let img_data = decoder.decode()?;
    let num_pixels = image_size.area();

    let rgb = match img_data.len() {
        n if n == num_pixels * 3 => img_data,
        n if n == num_pixels => img_data.iter().flat_map(|&v| [v, v, v]).collect(),
        n if n == num_pixels * 4 => img_data
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
        n => {
            return Err(IoError::UnsupportedPixelLayout(
                n,
                image_size.width,
                image_size.height,
            ))
        }
    };

    log::debug!("decoded jpeg image of {image_size}");

    Ok(Image::new(image_size, rgb)?)
}

fn jpeg_dimensions(size: ImageSize) -> Result<(u16, u16), IoError> {
    match (u16::try_from(size.width), u16::try_from(size.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(IoError::ImageTooLarge(size.width, size.height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Result<Image<u8, 3>, IoError> {
        let data = (0..height)
            .flat_map(|y| (0..width).flat_map(move |x| [(x * 4) as u8, (y * 4) as u8, 128]))
            .collect();
        Ok(Image::new([width, height].into(), data)?)
    }

    #[test]
    fn encode_decode_bytes() -> Result<(), IoError> {
        let image = gradient(32, 24)?;
        let bytes = encode_image_jpeg_rgb8(&image, 95)?;
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = decode_image_jpeg_rgb8(&bytes)?;
        assert_eq!(decoded.cols(), 32);
        assert_eq!(decoded.rows(), 24);
        assert_eq!(decoded.num_channels(), 3);

        // lossy, but a flat blue channel survives closely
        let blue = decoded.get_pixel(10, 10, 2)?;
        assert!((*blue as i32 - 128).abs() < 10, "blue channel {blue}");

        Ok(())
    }

    #[test]
    fn read_write_jpeg() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("frame.jpg");

        let image = gradient(16, 8)?;
        write_image_jpeg_rgb8(&file_path, &image, 90)?;
        assert!(file_path.exists(), "File does not exist: {file_path:?}");

        let image_back = read_image_jpeg_rgb8(&file_path)?;
        assert_eq!(image_back.size(), image.size());

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_jpeg_rgb8("does/not/exist.jpg");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_wrong_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("frame.png");
        fs::write(&file_path, b"not an image")?;

        let res = read_image_jpeg_rgb8(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }

    #[test]
    fn decode_garbage() {
        let res = decode_image_jpeg_rgb8(b"definitely not a jpeg");
        assert!(matches!(res, Err(IoError::JpegDecodingError(_))));
    }
}
