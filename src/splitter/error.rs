//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载"上传 → 解码 → 提取"链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 每个分支额外提供稳定的 `code()` 与所属阶段 `stage()`，供命令层序列化给前端。
//! 拖拽相关的越界索引、空闲状态下的移动事件属于"静默忽略"，不在此处建模。

/// 分割链路统一错误类型。
///
/// 该类型会在命令层被转换为 `CommandError`，或上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// 上传内容不是图片（MIME 或文件签名不符、内容为空）。
    #[error("无效输入：{0}")]
    InvalidInput(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("解码错误：{0}")]
    Decode(String),

    /// 上传内容超过体积上限（含 Base64 解码前的预估）。
    #[error("上传内容过大：{0}")]
    PayloadTooLarge(String),

    /// 解码阶段的像素或内存上限。
    #[error("资源限制：{0}")]
    ResourceLimit(String),

    /// 尚未加载图片就触发了分割。
    #[error("尚未加载图片")]
    NoSourceImage,

    /// 源图没有可绘制的区域（零尺寸），本次提取不产生任何结果。
    #[error("渲染表面不可用：{0}")]
    RenderingUnavailable(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),

    /// 共享会话状态无法访问（锁已中毒）。
    #[error("会话不可用：{0}")]
    SessionUnavailable(String),
}

impl SplitError {
    /// 稳定错误码，前端据此决定提示文案。
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::FileSystem(_) => "E_FILE_SYSTEM",
            Self::Decode(_) => "E_DECODE",
            Self::PayloadTooLarge(_) => "E_PAYLOAD_TOO_LARGE",
            Self::ResourceLimit(_) => "E_RESOURCE_LIMIT",
            Self::NoSourceImage => "E_NO_IMAGE",
            Self::RenderingUnavailable(_) => "E_RENDERING_UNAVAILABLE",
            Self::Encode(_) => "E_ENCODE",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::SessionUnavailable(_) => "E_SESSION_UNAVAILABLE",
        }
    }

    /// 错误发生的流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) | Self::FileSystem(_) | Self::PayloadTooLarge(_) => "load",
            Self::Decode(_) | Self::ResourceLimit(_) => "decode",
            Self::NoSourceImage | Self::RenderingUnavailable(_) | Self::Encode(_) => "extract",
            Self::InvalidConfig(_) => "config",
            Self::SessionUnavailable(_) => "session",
        }
    }
}

impl From<SplitError> for String {
    /// 兼容部分仍使用字符串错误的调用点。
    fn from(error: SplitError) -> Self {
        error.to_string()
    }
}
