//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError` 枚举，替代各调用点分散的 `.map_err(|e| e.to_string())`、
//! `format!(...)` 等不一致模式。
//!
//! 配置类命令统一返回 `Result<T, AppError>`，宿主通过 `Serialize` 获得可读错误信息；
//! 流水线命令则返回带错误码的 `CommandError`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `SplitError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串。

use serde::Serialize;

use crate::splitter::SplitError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 分割流水线错误（加载 / 解码 / 提取 / 配置）
    #[error("{0}")]
    Split(#[from] SplitError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_error_message_passes_through() {
        let err: AppError = SplitError::NoSourceImage.into();
        assert_eq!(err.to_string(), SplitError::NoSourceImage.to_string());
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(err.to_string().starts_with("文件系统错误"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let err = AppError::Split(SplitError::InvalidConfig("未知档位".to_string()));
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"配置错误：未知档位\"");
    }
}
