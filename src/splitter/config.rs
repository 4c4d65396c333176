//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有"可调策略"集中到 `SplitterConfig`，保证运行时行为可观测、可调整、可测试。
//! 预览档位（quality / balanced / speed）作为高层语义，映射到预览尺寸与缩放滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供编辑器首次打开时的默认值（三条分割线、1200px 预览）。
//! - `PreviewProfile` 负责档位字符串解析与反向输出。
//! - `apply_preview_profile` 将档位转换为具体参数。
//! - `SplitterAdvancedConfig` 是可序列化的高级配置，应用前逐项校验；校验失败不改动现有配置。

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::SplitError;

/// 载入或重置后的默认分割位置（百分比），得到四段大致等宽的结果。
pub const DEFAULT_SPLIT_POSITIONS: [f64; 3] = [25.0, 50.0, 75.0];

/// 分割线数量上限。
pub const MAX_SPLIT_HANDLES: usize = 16;

/// 分割器配置。
///
/// 字段覆盖了上传校验、解码限制、预览生成三个阶段。
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// 载入/重置时使用的分割位置。
    pub default_split_positions: Vec<f64>,
    /// 上传内容允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 预览图宽/高单边最大值。
    pub preview_max_dimension: u32,
    /// 预览缩放滤镜。
    pub preview_filter: FilterType,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            default_split_positions: DEFAULT_SPLIT_POSITIONS.to_vec(),
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            preview_max_dimension: 1200,
            preview_filter: FilterType::Triangle,
        }
    }
}

/// 预览档位。
///
/// - `Quality`：大尺寸、高质量滤镜
/// - `Balanced`：默认
/// - `Speed`：小尺寸、最近邻
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewProfile {
    Quality,
    Balanced,
    Speed,
}

impl PreviewProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use image_splitter::splitter::PreviewProfile;
    ///
    /// let p = PreviewProfile::parse("balanced")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), image_splitter::splitter::SplitError>(())
    /// ```
    pub fn parse(profile: &str) -> Result<Self, SplitError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(SplitError::InvalidConfig(format!(
                "未知预览档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl SplitterConfig {
    /// 基于当前参数反推预览档位。
    pub fn infer_preview_profile(&self) -> PreviewProfile {
        if self.preview_max_dimension >= 2400 {
            return PreviewProfile::Quality;
        }
        if self.preview_max_dimension <= 800 {
            return PreviewProfile::Speed;
        }
        PreviewProfile::Balanced
    }

    /// 应用指定预览档位到实际参数。
    pub fn apply_preview_profile(&mut self, profile: PreviewProfile) {
        match profile {
            PreviewProfile::Quality => {
                self.preview_max_dimension = 2400;
                self.preview_filter = FilterType::CatmullRom;
            }
            PreviewProfile::Balanced => {
                self.preview_max_dimension = 1200;
                self.preview_filter = FilterType::Triangle;
            }
            PreviewProfile::Speed => {
                self.preview_max_dimension = 800;
                self.preview_filter = FilterType::Nearest;
            }
        }
    }

    /// 校验并应用高级配置。任一字段越界时返回错误，配置保持原样。
    pub fn apply_advanced(&mut self, advanced: &SplitterAdvancedConfig) -> Result<(), SplitError> {
        advanced.validate()?;

        self.default_split_positions = advanced.default_split_positions.clone();
        self.max_file_size = advanced.max_file_size;
        self.max_decoded_pixels = advanced.max_decoded_pixels;
        self.max_decoded_bytes = advanced.max_decoded_bytes;
        Ok(())
    }

    pub fn advanced(&self) -> SplitterAdvancedConfig {
        SplitterAdvancedConfig {
            default_split_positions: self.default_split_positions.clone(),
            max_file_size: self.max_file_size,
            max_decoded_pixels: self.max_decoded_pixels,
            max_decoded_bytes: self.max_decoded_bytes,
        }
    }
}

/// 可由前端读写的高级配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitterAdvancedConfig {
    pub default_split_positions: Vec<f64>,
    pub max_file_size: u64,
    pub max_decoded_pixels: u64,
    pub max_decoded_bytes: u64,
}

impl SplitterAdvancedConfig {
    fn validate(&self) -> Result<(), SplitError> {
        if self.default_split_positions.len() > MAX_SPLIT_HANDLES {
            return Err(SplitError::InvalidConfig(format!(
                "分割线数量不能超过 {}",
                MAX_SPLIT_HANDLES
            )));
        }
        if let Some(bad) = self
            .default_split_positions
            .iter()
            .find(|value| !(0.0..=100.0).contains(*value))
        {
            return Err(SplitError::InvalidConfig(format!(
                "分割位置必须在 0~100 之间：{}",
                bad
            )));
        }
        if self.max_file_size < 1024 * 1024 {
            return Err(SplitError::InvalidConfig("max_file_size 不能小于 1MB".to_string()));
        }
        if self.max_decoded_bytes < 8 * 1024 * 1024 {
            return Err(SplitError::InvalidConfig("max_decoded_bytes 不能小于 8MB".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(SplitError::InvalidConfig("max_decoded_pixels 必须大于 0".to_string()));
        }
        Ok(())
    }
}
