//! 分割结果模型：PNG 字节、序号、Data URL 与下载文件名。

use base64::{Engine as _, engine::general_purpose};
use once_cell::sync::Lazy;
use regex::Regex;

/// 去掉最后一个扩展名（与浏览器端 `/\.[^/.]+$/` 一致）。
static EXTENSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[^/.]+$").expect("extension pattern is valid"));

/// 一个分段的输出图片。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    /// 1 起始，按从左到右 / 从上到下排列。
    pub ordinal: u32,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl OutputImage {
    /// 可直接用于 `<img src>` 或新标签页打开的 Data URL。
    pub fn data_url(&self) -> String {
        png_data_url(&self.png)
    }

    /// 下载文件名：`<原文件名去扩展名>_split_<序号>.png`。
    pub fn file_name(&self, original_name: &str) -> String {
        format!("{}_split_{}.png", base_name(original_name), self.ordinal)
    }
}

pub(crate) fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(png))
}

/// 原始文件名去掉最后一个扩展名。
pub fn base_name(original_name: &str) -> String {
    EXTENSION_PATTERN.replace(original_name, "").into_owned()
}
