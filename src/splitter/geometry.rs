//! 分割几何计算模块
//!
//! 该模块实现编辑器与提取器共用的几何算法：
//!
//! 1. **指针投影** (`percent_along_axis`)：
//!    把指针坐标投影到当前方向的轴上，换算为容器尺寸的百分比并收敛到 `[0, 100]`。
//!
//! 2. **分段边界** (`boundaries`)：
//!    排序后的分割位置，首尾补上 0 与 100。
//!
//! 3. **像素矩形** (`segment_rects`)：
//!    相邻边界对映射为原图中的像素矩形。
//!
//! # 设计思路
//!
//! - 算法纯函数化：输入为坐标、尺寸、百分比，输出唯一结果，便于测试。
//! - 先算理想值，再做边界收敛，保证矩形不会越出原图。
//! - 对异常输入（零尺寸容器、NaN 坐标）给出明确的 `None` 或安全回退。

use serde::{Deserialize, Serialize};

/// 分割方向。
///
/// `Vertical` 表示竖直分割线，位置沿图片宽度度量；`Horizontal` 沿高度度量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// 拖拽期间宿主页面应使用的光标样式。
    pub fn cursor_hint(self) -> &'static str {
        match self {
            Self::Vertical => "col-resize",
            Self::Horizontal => "row-resize",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// 指针在客户端坐标系中的位置。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// 预览容器的包围盒（客户端坐标）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// 提取阶段的一个像素矩形。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRect {
    /// 1 起始的序号（从左到右 / 从上到下）。
    pub ordinal: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 把百分比收敛到 `[0, 100]`，非有限值按 0 处理。
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// 指针投影到当前轴上的百分比。
///
/// 容器在该轴上的尺寸不为正、或结果不是有限数时返回 `None`，调用方据此忽略本次移动。
pub fn percent_along_axis(
    orientation: Orientation,
    point: PointerPoint,
    container: &ContainerRect,
) -> Option<f64> {
    let (offset, extent) = match orientation {
        Orientation::Vertical => (point.client_x - container.left, container.width),
        Orientation::Horizontal => (point.client_y - container.top, container.height),
    };

    if !(extent > 0.0) {
        return None;
    }

    let percent = offset / extent * 100.0;
    percent.is_finite().then(|| percent.clamp(0.0, 100.0))
}

/// 排序后的分段边界：`[0, ...sorted(positions), 100]`。
///
/// 输入顺序不影响结果，长度恒为 `positions.len() + 2`。
pub fn boundaries(positions: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = positions.iter().copied().map(clamp_percent).collect();
    sorted.sort_by(f64::total_cmp);

    let mut result = Vec::with_capacity(sorted.len() + 2);
    result.push(0.0);
    result.extend(sorted);
    result.push(100.0);
    result
}

/// 计算每个分段在原图中的像素矩形。
///
/// # 像素对齐
/// - 边界两端各自 `round` 到像素，相邻分段因此无缝拼接。
/// - 长度至少 1 像素；落在末端的 1 像素分段向内平移，保证矩形不越界。
/// - 垂直于分割方向的一边始终为原图完整尺寸。
pub fn segment_rects(
    image_width: u32,
    image_height: u32,
    orientation: Orientation,
    positions: &[f64],
) -> Vec<SegmentRect> {
    let extent = match orientation {
        Orientation::Vertical => image_width,
        Orientation::Horizontal => image_height,
    };

    boundaries(positions)
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (offset, length) = axis_span(pair[0], pair[1], extent);
            let ordinal = index as u32 + 1;
            match orientation {
                Orientation::Vertical => SegmentRect {
                    ordinal,
                    x: offset,
                    y: 0,
                    width: length,
                    height: image_height.max(1),
                },
                Orientation::Horizontal => SegmentRect {
                    ordinal,
                    x: 0,
                    y: offset,
                    width: image_width.max(1),
                    height: length,
                },
            }
        })
        .collect()
}

fn axis_span(start_percent: f64, end_percent: f64, extent: u32) -> (u32, u32) {
    let to_px = |percent: f64| ((percent / 100.0 * extent as f64).round() as u32).min(extent);

    let mut start = to_px(start_percent);
    let end = to_px(end_percent);
    let length = end.saturating_sub(start).max(1);

    if start + length > extent {
        start = extent.saturating_sub(length);
    }

    (start, length)
}
