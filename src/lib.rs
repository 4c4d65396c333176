//! # 图片分割工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  宿主页面 (预览 + 分割线)                 │
//! │                                                          │
//! │  上传 ── 拖拽手柄 ── 切换方向 ── 确认 / 重置 ── 下载      │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ 命令调用 (Result<T, CommandError | AppError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ logging ──── env_logger 初始化                        │
//! │  │                                                       │
//! │  └─ splitter ─── SplitSession                            │
//! │      ├─ editor     拖拽状态机                              │
//! │      ├─ geometry   百分比 · 边界 · 像素矩形                │
//! │      └─ extractor  原图裁剪 · PNG 编码                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，配置类命令的返回类型 |
//! | [`logging`] | 宿主启动时初始化日志 |
//! | [`splitter`] | 上传校验、预览、分割线编辑、分段提取与命令层 |

pub mod error;
pub mod logging;
pub mod splitter;
