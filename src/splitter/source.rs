//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将"外部输入类型"和"流水线中间结果"解耦：
//! - `ImageUpload` / `UploadPayload` 表示上传来源语义
//! - `RawImageData` 表示已加载、已校验但未解码的字节
//! - `SourceImage` 表示解码完成、载入后不可变的原图
//! - `PreviewImage` 表示供编辑器展示的缩小副本

use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;

/// 上传载荷。
#[derive(Debug, Clone)]
pub enum UploadPayload {
    /// 已读入内存的文件字节。
    Bytes(Vec<u8>),
    /// Data URL（`data:image/png;base64,...`）或纯 Base64 字符串。
    DataUrl(String),
    /// 本地文件路径。
    FilePath(PathBuf),
}

/// 一次上传：文件名、声明的 MIME 类型与载荷。
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    /// 浏览器 `File.type`；为空时只做文件签名校验。
    pub mime_type: Option<String>,
    pub payload: UploadPayload,
}

impl ImageUpload {
    pub fn from_bytes(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: Some(mime_type.into()),
            payload: UploadPayload::Bytes(bytes),
        }
    }

    pub fn from_data_url(file_name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            payload: UploadPayload::DataUrl(data_url.into()),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            file_name,
            mime_type: None,
            payload: UploadPayload::FilePath(path),
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// 文件签名识别出的 MIME 类型。
    pub(crate) mime_type: &'static str,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

/// 已载入的原图。
///
/// 载入后不可变；新的上传或重置会整体替换/释放它。
#[derive(Debug, Clone)]
pub struct SourceImage {
    name: String,
    mime_type: String,
    width: u32,
    height: u32,
    pixels: Arc<DynamicImage>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, pixels: DynamicImage) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            width: pixels.width(),
            height: pixels.height(),
            pixels: Arc::new(pixels),
        }
    }

    /// 原始文件名，用于生成下载文件名。
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 原图像素（非预览），提取阶段始终从这里裁剪。
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

/// 编辑器预览图。
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    /// 原图到预览的缩放比例（≤ 1）。
    pub scale: f64,
    /// PNG 编码后的字节。
    pub png: Vec<u8>,
}
