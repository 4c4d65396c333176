//! # 图片分割模块（splitter）
//!
//! ## 设计思路
//!
//! 该模块将“上传校验 → 解码预览 → 拖拽编辑分割线 → 基于原图提取分段 → 命令暴露”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：仅做 IPC 入参/出参适配（薄封装）
//! - `session`：持有全部可变状态并编排整条流程
//! - `editor`：拖拽状态机与分割位置（纯函数迁移）
//! - `geometry`：指针投影、边界、像素矩形
//! - `extractor`：从原图裁剪分段并编码 PNG
//! - `loader`：负责 Data URL/字节/文件加载与类型校验
//! - `pipeline`：负责解码、像素限制、预览降采样、PNG 编码
//! - `config/error/source/output`：配置、错误、中间数据模型、输出模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! 宿主 invoke
//!    ↓
//! commands.rs（参数适配 + 视图 DTO）
//!    ↓
//! session.rs（SplitSession，阶段耗时日志）
//!    ├─ loader.rs（来源加载 + MIME/签名/体积校验）
//!    ├─ pipeline.rs（解码 + 像素限制 + 预览）
//!    ├─ editor.rs → geometry.rs（拖拽 → 百分比）
//!    └─ extractor.rs → geometry.rs（边界 → 像素矩形 → PNG）
//!    ↓
//! 返回 CommandError / AppError 给宿主
//! ```
//!
//! ## 分层职责建议
//!
//! - 命令名/参数变更优先改 `commands.rs`
//! - 拖拽交互变更优先改 `editor.rs`
//! - 像素对齐规则变更只改 `geometry.rs`

pub mod commands;
mod config;
mod editor;
mod error;
mod extractor;
mod geometry;
mod loader;
mod output;
mod pipeline;
mod session;
mod source;

pub use commands::{CommandError, EditorStateView, EditorView, SplitResultView, SplitterState, UploadRequest};
pub use config::{
    DEFAULT_SPLIT_POSITIONS, MAX_SPLIT_HANDLES, PreviewProfile, SplitterAdvancedConfig, SplitterConfig,
};
pub use editor::{DragState, EditorEvent, EditorState, GuideLine, PointerInput, SplitPositions, TouchPoint};
pub use error::SplitError;
pub use extractor::extract;
pub use geometry::{
    ContainerRect, Orientation, PointerPoint, SegmentRect, boundaries, clamp_percent, percent_along_axis,
    segment_rects,
};
pub use output::{OutputImage, base_name};
pub use session::SplitSession;
pub use source::{ImageUpload, PreviewImage, SourceImage, UploadPayload};
