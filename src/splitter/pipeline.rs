//! # 解码与预览流水线模块
//!
//! ## 设计思路
//!
//! 将"字节 → 原图 → 预览"的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低超大输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 读取 header 尺寸
//! 2. 按像素/内存上限快速拒绝
//! 3. 完整解码，并再次校验
//! 4. 按预览上限降采样（`fast_image_resize`，失败时回退 `image::resize_exact`）
//!
//! 原图与预览各自独立持有，提取阶段只使用原图。

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

use super::source::{PreviewImage, RawImageData, SourceImage};
use super::{SplitError, SplitterConfig};

/// 阻塞式"解码并报告尺寸"。失败时返回明确的错误分支。
pub(crate) fn decode_source(
    raw: RawImageData,
    file_name: &str,
    config: &SplitterConfig,
) -> Result<SourceImage, SplitError> {
    let (header_width, header_height) = inspect_dimensions_from_memory(&raw.bytes)?;
    validate_pixel_limits(config, header_width, header_height)?;
    validate_decoded_memory_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory(&raw.bytes)
        .map_err(|e| SplitError::Decode(format!("图片解码失败：{}", e)))?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(SplitError::Decode("图片尺寸为零".to_string()));
    }
    validate_pixel_limits(config, width, height)?;
    validate_decoded_memory_limits(config, width, height)?;

    log::info!(
        "✅ 图片解码成功 - 来源: {} 类型: {} 尺寸: {}x{}",
        raw.source_hint,
        raw.mime_type,
        width,
        height
    );

    Ok(SourceImage::new(file_name, raw.mime_type, decoded))
}

/// 仅通过内存中的图片头信息读取宽高。
fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), SplitError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| SplitError::Decode(format!("无法识别图片格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| SplitError::Decode(format!("无法读取图片尺寸：{}", e)))
}

fn validate_pixel_limits(config: &SplitterConfig, width: u32, height: u32) -> Result<(), SplitError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| SplitError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels > config.max_decoded_pixels {
        return Err(SplitError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}

fn validate_decoded_memory_limits(
    config: &SplitterConfig,
    width: u32,
    height: u32,
) -> Result<(), SplitError> {
    let estimated = (width as u64)
        .checked_mul(height as u64)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| SplitError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

    if estimated > config.max_decoded_bytes {
        return Err(SplitError::ResourceLimit(format!(
            "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
            estimated as f64 / 1024.0 / 1024.0,
            config.max_decoded_bytes as f64 / 1024.0 / 1024.0
        )));
    }

    Ok(())
}

/// 生成编辑器预览：单边不超过 `preview_max_dimension`，不放大。
pub(crate) fn build_preview(
    source: &SourceImage,
    config: &SplitterConfig,
) -> Result<PreviewImage, SplitError> {
    let (width, height) = source.dimensions();
    let max_dimension = config.preview_max_dimension.max(1);

    let scale = (max_dimension as f64 / width as f64)
        .min(max_dimension as f64 / height as f64)
        .min(1.0);

    let target_width = ((width as f64 * scale).floor() as u32).clamp(1, width);
    let target_height = ((height as f64 * scale).floor() as u32).clamp(1, height);

    let preview = if target_width == width && target_height == height {
        source.pixels().clone()
    } else {
        log::info!(
            "🧩 生成预览：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target_width,
            target_height,
            config.preview_filter
        );
        match resize_with_fast_image_resize(
            source.pixels(),
            target_width,
            target_height,
            config.preview_filter,
        ) {
            Ok(resized) => resized,
            Err(err) => {
                log::warn!("⚠️ fast_image_resize 降采样失败，回退 image::resize_exact：{}", err);
                source
                    .pixels()
                    .resize_exact(target_width, target_height, config.preview_filter)
            }
        }
    };

    let png = encode_png(&preview)?;

    Ok(PreviewImage {
        width: preview.width(),
        height: preview.height(),
        scale,
        png,
    })
}

/// 以 PNG 编码，供预览与分割结果共用。
pub(crate) fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, SplitError> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| SplitError::Encode(format!("PNG 编码失败：{}", e)))?;
    Ok(cursor.into_inner())
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<DynamicImage, SplitError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image =
        fr::images::Image::from_vec_u8(src_width, src_height, src.into_raw(), fr::PixelType::U8x4)
            .map_err(|e| SplitError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| SplitError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        target_width,
        target_height,
        dst_image.into_vec(),
    )
    .ok_or_else(|| SplitError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

    Ok(DynamicImage::ImageRgba8(rgba))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}
