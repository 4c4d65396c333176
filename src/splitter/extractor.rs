//! # 分段提取模块
//!
//! ## 设计思路
//!
//! 给定最终的分割位置、方向与原图，一次性同步产出全部分段：
//! 1. 排序边界并补上 0 / 100
//! 2. 每对相邻边界映射为像素矩形（宽高至少 1 像素）
//! 3. 从原图（而非预览）裁剪出恰好该尺寸的新缓冲
//! 4. 编码为 PNG，序号为边界对的位置（1 起始）
//!
//! 任一分段失败则整体失败，不返回部分结果。

use super::geometry::{self, Orientation};
use super::output::OutputImage;
use super::pipeline::encode_png;
use super::source::SourceImage;
use super::SplitError;

/// 按分割位置提取全部分段，结果数量恒为 `positions.len() + 1`。
///
/// # 示例
/// ```rust
/// use image::{DynamicImage, RgbaImage};
/// use image_splitter::splitter::{extract, Orientation, SourceImage};
///
/// let source = SourceImage::new("a.png", "image/png", DynamicImage::ImageRgba8(RgbaImage::new(400, 200)));
/// let outputs = extract(&source, Orientation::Vertical, &[25.0, 50.0, 75.0])?;
/// assert_eq!(outputs.len(), 4);
/// assert!(outputs.iter().all(|o| o.width == 100 && o.height == 200));
/// # Ok::<(), image_splitter::splitter::SplitError>(())
/// ```
pub fn extract(
    source: &SourceImage,
    orientation: Orientation,
    positions: &[f64],
) -> Result<Vec<OutputImage>, SplitError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(SplitError::RenderingUnavailable(format!(
            "源图尺寸无效：{}x{}",
            width, height
        )));
    }

    let rects = geometry::segment_rects(width, height, orientation, positions);
    let mut outputs = Vec::with_capacity(rects.len());

    // 矩形均落在原图内（见 `geometry::segment_rects`），裁剪结果恰为矩形尺寸
    for rect in rects {
        let cropped = source.pixels().crop_imm(rect.x, rect.y, rect.width, rect.height);
        let png = encode_png(&cropped)?;
        log::debug!(
            "✂️ 分段 #{} - 区域 ({}, {}) {}x{} PNG={}KB",
            rect.ordinal,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            png.len() / 1024
        );

        outputs.push(OutputImage {
            ordinal: rect.ordinal,
            width: rect.width,
            height: rect.height,
            png,
        });
    }

    Ok(outputs)
}
