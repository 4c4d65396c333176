//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理不同来源（字节 / Data URL / 本地文件）的原始字节加载，并在"尽可能早"的阶段执行输入校验。
//! 目标是尽快失败：非图片输入在解码前就被拒绝，且不改动任何会话状态。
//!
//! ## 实现思路
//!
//! - 声明的 MIME 类型必须以 `image/` 开头。
//! - 字节：体积限制 + 文件签名。
//! - Data URL：格式解析 + 解码前体积预估 + 文件签名。
//! - 文件：存在性 + metadata 体积限制 + 读取 + 文件签名。

use base64::{Engine as _, engine::general_purpose};
use std::path::Path;

use super::source::{ImageUpload, RawImageData, UploadPayload};
use super::{SplitError, SplitterConfig};

/// 按上传来源加载原始字节并完成全部输入校验。
pub(crate) fn load_upload(
    upload: ImageUpload,
    config: &SplitterConfig,
) -> Result<RawImageData, SplitError> {
    if let Some(mime) = upload.mime_type.as_deref() {
        validate_declared_mime(mime)?;
    }

    match upload.payload {
        UploadPayload::Bytes(bytes) => load_from_bytes(bytes, config),
        UploadPayload::DataUrl(data) => load_from_data_url(&data, config),
        UploadPayload::FilePath(path) => load_from_file(&path, config),
    }
}

fn validate_declared_mime(mime: &str) -> Result<(), SplitError> {
    if mime.trim().to_ascii_lowercase().starts_with("image/") {
        return Ok(());
    }
    Err(SplitError::InvalidInput(format!(
        "请选择图片文件（jpg、png 等），当前类型：{}",
        mime
    )))
}

fn load_from_bytes(bytes: Vec<u8>, config: &SplitterConfig) -> Result<RawImageData, SplitError> {
    log::info!("📝 开始处理上传字节 - {} 字节", bytes.len());

    if bytes.len() as u64 > config.max_file_size {
        return Err(too_large(bytes.len() as u64, config.max_file_size));
    }
    let mime_type = validate_image_signature(&bytes)?;

    Ok(RawImageData {
        bytes,
        mime_type,
        source_hint: "bytes",
    })
}

fn load_from_data_url(data: &str, config: &SplitterConfig) -> Result<RawImageData, SplitError> {
    log::info!("📝 开始处理 Data URL 图片");

    let bytes = parse_data_url_with_limit(data, config.max_file_size)?;
    if bytes.len() as u64 > config.max_file_size {
        return Err(too_large(bytes.len() as u64, config.max_file_size));
    }
    let mime_type = validate_image_signature(&bytes)?;

    Ok(RawImageData {
        bytes,
        mime_type,
        source_hint: "data-url",
    })
}

fn load_from_file(path: &Path, config: &SplitterConfig) -> Result<RawImageData, SplitError> {
    log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

    if !path.exists() {
        return Err(SplitError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| SplitError::FileSystem(format!("无法读取文件信息：{}", e)))?;
    if metadata.len() > config.max_file_size {
        return Err(too_large(metadata.len(), config.max_file_size));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| SplitError::FileSystem(format!("无法读取图片文件：{}", e)))?;
    let mime_type = validate_image_signature(&bytes)?;

    Ok(RawImageData {
        bytes,
        mime_type,
        source_hint: "file",
    })
}

/// 解析 Data URL 或纯 Base64，并在解码前按长度预估体积。
pub(crate) fn parse_data_url_with_limit(data: &str, max_file_size: u64) -> Result<Vec<u8>, SplitError> {
    let normalized = data.trim();

    let base64_data = if normalized.starts_with("data:") {
        if !normalized.starts_with("data:image/") {
            return Err(SplitError::InvalidInput("Data URL 不是图片类型".to_string()));
        }
        let base64_start = normalized
            .find(";base64,")
            .ok_or_else(|| SplitError::Decode("缺少 base64 标记".to_string()))?;
        &normalized[base64_start + 8..]
    } else {
        normalized
    };

    let estimated_len = estimate_base64_decoded_upper_bound_len(base64_data);
    if estimated_len > max_file_size {
        return Err(SplitError::PayloadTooLarge(format!(
            "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
            estimated_len as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    general_purpose::STANDARD
        .decode(base64_data)
        .map_err(|e| SplitError::Decode(format!("Base64 解码失败：{}", e)))
}

fn estimate_base64_decoded_upper_bound_len(base64_data: &str) -> u64 {
    (base64_data.len() as u64).div_ceil(4) * 3
}

/// 通过文件签名确认内容为图片，返回识别出的 MIME 类型。
fn validate_image_signature(bytes: &[u8]) -> Result<&'static str, SplitError> {
    if bytes.is_empty() {
        return Err(SplitError::InvalidInput("图片内容为空".to_string()));
    }

    let kind = infer::get(bytes)
        .ok_or_else(|| SplitError::InvalidInput("无法识别图片类型".to_string()))?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(SplitError::InvalidInput(format!(
            "文件签名不是图片类型：{}",
            kind.mime_type()
        )));
    }

    Ok(kind.mime_type())
}

fn too_large(actual: u64, limit: u64) -> SplitError {
    SplitError::PayloadTooLarge(format!(
        "文件过大：{:.2} MB（限制：{:.2} MB）",
        actual as f64 / 1024.0 / 1024.0,
        limit as f64 / 1024.0 / 1024.0
    ))
}
