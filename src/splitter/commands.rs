//! # 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 所有实际处理交由 `SplitterState` 内部的 `SplitSession`，命令函数保持薄、稳定、易测试。
//!
//! 流水线命令返回结构化的 `CommandError`（含 `code` / `stage`），
//! 配置类命令与宿主约定一致，返回序列化为字符串的 `AppError`。

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::editor::{EditorEvent, GuideLine};
use super::geometry::Orientation;
use super::output::{self, OutputImage};
use super::source::{ImageUpload, UploadPayload};
use super::{PreviewProfile, SplitError, SplitSession, SplitterAdvancedConfig, SplitterConfig};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
    pub code: &'static str,
    pub stage: &'static str,
    pub message: String,
}

impl From<SplitError> for CommandError {
    fn from(error: SplitError) -> Self {
        Self {
            code: error.code(),
            stage: error.stage(),
            message: error.to_string(),
        }
    }
}

/// 宿主注入的共享状态。
pub struct SplitterState {
    session: Mutex<SplitSession>,
}

impl Default for SplitterState {
    fn default() -> Self {
        Self::with_config(SplitterConfig::default())
    }
}

impl SplitterState {
    pub fn with_config(config: SplitterConfig) -> Self {
        Self {
            session: Mutex::new(SplitSession::new(config)),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, SplitSession>, SplitError> {
        self.session
            .lock()
            .map_err(|_| SplitError::SessionUnavailable("会话状态锁已中毒".to_string()))
    }
}

/// 前端上传请求。`data` 为 Data URL，`path` 为本地文件路径，二者取其一。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl UploadRequest {
    fn into_upload(self) -> Result<ImageUpload, SplitError> {
        let payload = match (self.data, self.path) {
            (Some(data), _) => UploadPayload::DataUrl(data),
            (None, Some(path)) => UploadPayload::FilePath(path),
            (None, None) => return Err(SplitError::InvalidInput("上传内容为空".to_string())),
        };
        Ok(ImageUpload {
            file_name: self.file_name,
            mime_type: self.mime_type.filter(|mime| !mime.is_empty()),
            payload,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfoView {
    pub name: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

/// 拖拽等高频事件返回的轻量视图，不携带预览图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorStateView {
    pub has_image: bool,
    pub orientation: Orientation,
    pub split_points: Vec<f64>,
    pub active_handle: Option<usize>,
    pub guide_lines: Vec<GuideLine>,
    /// 拖拽期间的全局光标样式，空闲时为 `None`。
    pub cursor: Option<&'static str>,
    pub result_count: usize,
}

impl EditorStateView {
    fn from_session(session: &SplitSession) -> Self {
        let editor = session.editor();
        let active_handle = editor.drag.active_handle();
        Self {
            has_image: session.source().is_some(),
            orientation: editor.orientation,
            split_points: editor.positions.as_slice().to_vec(),
            active_handle,
            guide_lines: editor.guide_lines(),
            cursor: active_handle.map(|_| editor.orientation.cursor_hint()),
            result_count: session.results().len(),
        }
    }
}

/// 编辑器首次渲染所需的完整视图（含预览 Data URL），仅在上传与主动查询时返回。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub image: Option<ImageInfoView>,
    pub preview: Option<PreviewView>,
    #[serde(flatten)]
    pub editor: EditorStateView,
}

impl EditorView {
    fn from_session(session: &SplitSession) -> Self {
        Self {
            image: session.source().map(|source| ImageInfoView {
                name: source.name().to_string(),
                mime_type: source.mime_type().to_string(),
                width: source.width(),
                height: source.height(),
            }),
            preview: session.preview().map(|preview| PreviewView {
                url: output::png_data_url(&preview.png),
                width: preview.width,
                height: preview.height,
                scale: preview.scale,
            }),
            editor: EditorStateView::from_session(session),
        }
    }
}

/// 单个分割结果的视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResultView {
    pub id: u32,
    pub url: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl SplitResultView {
    fn new(output: &OutputImage, original_name: &str) -> Self {
        Self {
            id: output.ordinal,
            url: output.data_url(),
            file_name: output.file_name(original_name),
            width: output.width,
            height: output.height,
        }
    }
}

/// 上传图片并返回新的编辑器视图。
pub fn upload_image(state: &SplitterState, request: UploadRequest) -> Result<EditorView, CommandError> {
    let upload = request.into_upload()?;
    let mut session = state.session()?;
    session.load_image(upload)?;
    Ok(EditorView::from_session(&session))
}

/// 转发一个编辑器事件（按下、移动、松开、取消、切换方向、重置）。
pub fn dispatch_editor_event(
    state: &SplitterState,
    event: EditorEvent,
) -> Result<EditorStateView, CommandError> {
    let mut session = state.session()?;
    session.dispatch(event);
    Ok(EditorStateView::from_session(&session))
}

pub fn set_split_mode(state: &SplitterState, orientation: Orientation) -> Result<EditorStateView, CommandError> {
    let mut session = state.session()?;
    session.set_orientation(orientation);
    Ok(EditorStateView::from_session(&session))
}

pub fn reset(state: &SplitterState) -> Result<EditorStateView, CommandError> {
    let mut session = state.session()?;
    session.reset();
    Ok(EditorStateView::from_session(&session))
}

/// 确认分割，返回全部分段（按序号排列）。
pub fn generate_crops(state: &SplitterState) -> Result<Vec<SplitResultView>, CommandError> {
    let mut session = state.session()?;
    let original_name = session
        .source()
        .map(|source| source.name().to_string())
        .unwrap_or_default();
    let outputs = session.confirm_split()?;
    Ok(outputs
        .iter()
        .map(|output| SplitResultView::new(output, &original_name))
        .collect())
}

/// 把当前结果按下载文件名写入目录，返回写入的路径。
pub fn save_results(state: &SplitterState, directory: &Path) -> Result<Vec<PathBuf>, AppError> {
    let session = state.session()?;
    let source = session.source().ok_or(SplitError::NoSourceImage)?;

    std::fs::create_dir_all(directory)?;
    let mut written = Vec::with_capacity(session.results().len());
    for output in session.results() {
        let path = directory.join(output.file_name(source.name()));
        std::fs::write(&path, &output.png)?;
        written.push(path);
    }

    log::info!("💾 已保存 {} 个分段到 {}", written.len(), directory.display());
    Ok(written)
}

pub fn editor_view(state: &SplitterState) -> Result<EditorView, CommandError> {
    let session = state.session()?;
    Ok(EditorView::from_session(&session))
}

/// 切换预览档位（quality / balanced / speed）。
pub fn set_preview_profile(state: &SplitterState, profile: String) -> Result<(), AppError> {
    let profile = PreviewProfile::parse(&profile)?;
    state.session()?.set_preview_profile(profile)?;
    Ok(())
}

pub fn get_preview_profile(state: &SplitterState) -> Result<String, AppError> {
    Ok(state.session()?.preview_profile().as_str().to_string())
}

pub fn set_advanced_config(state: &SplitterState, config: SplitterAdvancedConfig) -> Result<(), AppError> {
    state.session()?.set_advanced_config(&config)?;
    Ok(())
}

pub fn get_advanced_config(state: &SplitterState) -> Result<SplitterAdvancedConfig, AppError> {
    Ok(state.session()?.advanced_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::pipeline;
    use image::{DynamicImage, RgbaImage};

    fn png_data_url(width: u32, height: u32) -> String {
        let bytes = pipeline::encode_png(&DynamicImage::ImageRgba8(RgbaImage::new(width, height))).unwrap();
        output::png_data_url(&bytes)
    }

    fn upload_request(name: &str, width: u32, height: u32) -> UploadRequest {
        UploadRequest {
            file_name: name.to_string(),
            mime_type: Some("image/png".to_string()),
            data: Some(png_data_url(width, height)),
            path: None,
        }
    }

    #[test]
    fn upload_then_generate_returns_named_results() {
        let state = SplitterState::default();
        let view = upload_image(&state, upload_request("holiday.jpg", 400, 200)).unwrap();
        assert_eq!(view.editor.split_points, vec![25.0, 50.0, 75.0]);
        assert_eq!(view.image.as_ref().map(|i| (i.width, i.height)), Some((400, 200)));
        assert!(view.preview.as_ref().is_some_and(|p| p.url.starts_with("data:image/png;base64,")));

        let results = generate_crops(&state).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "holiday_split_1.png",
                "holiday_split_2.png",
                "holiday_split_3.png",
                "holiday_split_4.png"
            ]
        );
        assert!(results.iter().all(|r| r.width == 100 && r.height == 200));
    }

    #[test]
    fn non_image_upload_reports_load_stage() {
        let state = SplitterState::default();
        let request = UploadRequest {
            file_name: "notes.txt".to_string(),
            mime_type: Some("text/plain".to_string()),
            data: Some("data:text/plain;base64,aGVsbG8=".to_string()),
            path: None,
        };

        let error = upload_image(&state, request).unwrap_err();
        assert_eq!(error.code, "E_INVALID_INPUT");
        assert_eq!(error.stage, "load");
        assert!(editor_view(&state).unwrap().image.is_none());
    }

    #[test]
    fn oversized_upload_reports_load_stage() {
        let mut config = SplitterConfig::default();
        config.max_file_size = 16;
        let state = SplitterState::with_config(config);

        let error = upload_image(&state, upload_request("big.png", 64, 64)).unwrap_err();
        assert_eq!(error.code, "E_PAYLOAD_TOO_LARGE");
        assert_eq!(error.stage, "load");
    }

    #[test]
    fn empty_request_is_invalid_input() {
        let state = SplitterState::default();
        let request = UploadRequest {
            file_name: "x.png".to_string(),
            mime_type: None,
            data: None,
            path: None,
        };
        assert_eq!(upload_image(&state, request).unwrap_err().code, "E_INVALID_INPUT");
    }

    #[test]
    fn generate_without_image_reports_no_image() {
        let state = SplitterState::default();
        let error = generate_crops(&state).unwrap_err();
        assert_eq!(error.code, "E_NO_IMAGE");
        assert_eq!(error.stage, "extract");
    }

    #[test]
    fn editor_events_drive_view() {
        let state = SplitterState::default();
        upload_image(&state, upload_request("a.png", 400, 200)).unwrap();

        let down: EditorEvent = serde_json::from_str(r#"{"type":"down","handle":0}"#).unwrap();
        let view = dispatch_editor_event(&state, down).unwrap();
        assert_eq!(view.active_handle, Some(0));
        assert_eq!(view.cursor, Some("col-resize"));

        let movement: EditorEvent = serde_json::from_str(
            r#"{"type":"move","input":{"source":"mouse","clientX":40,"clientY":0},
                "container":{"left":0,"top":0,"width":400,"height":200}}"#,
        )
        .unwrap();
        let view = dispatch_editor_event(&state, movement).unwrap();
        assert_eq!(view.split_points, vec![10.0, 50.0, 75.0]);

        let view = dispatch_editor_event(&state, EditorEvent::Up).unwrap();
        assert_eq!(view.active_handle, None);
        assert_eq!(view.cursor, None);
    }

    #[test]
    fn split_mode_and_reset() {
        let state = SplitterState::default();
        upload_image(&state, upload_request("a.png", 40, 20)).unwrap();

        let view = set_split_mode(&state, Orientation::Horizontal).unwrap();
        assert_eq!(view.orientation, Orientation::Horizontal);
        assert!(view.guide_lines.iter().all(|g| g.orientation == Orientation::Horizontal));

        let view = reset(&state).unwrap();
        assert!(!view.has_image);
        assert_eq!(view.result_count, 0);
        assert_eq!(view.split_points, vec![25.0, 50.0, 75.0]);
    }

    #[test]
    fn pointer_events_do_not_resend_preview() {
        let state = SplitterState::default();
        upload_image(&state, upload_request("big.png", 1600, 1200)).unwrap();
        dispatch_editor_event(&state, EditorEvent::Down { handle: 1 }).unwrap();

        let movement: EditorEvent = serde_json::from_str(
            r#"{"type":"move","input":{"source":"mouse","clientX":300,"clientY":0},
                "container":{"left":0,"top":0,"width":1200,"height":900}}"#,
        )
        .unwrap();
        let view = dispatch_editor_event(&state, movement).unwrap();
        let json = serde_json::to_string(&view).unwrap();

        assert_eq!(view.split_points, vec![25.0, 25.0, 75.0]);
        assert!(!json.contains("base64"));
        assert!(json.len() < 2048, "event view is {} bytes", json.len());

        let full = serde_json::to_string(&editor_view(&state).unwrap()).unwrap();
        assert!(full.contains("data:image/png;base64,"));
    }

    #[test]
    fn view_serializes_camel_case() {
        let state = SplitterState::default();
        let json = serde_json::to_value(editor_view(&state).unwrap()).unwrap();
        assert_eq!(json["orientation"], "vertical");
        assert_eq!(json["splitPoints"], serde_json::json!([25.0, 50.0, 75.0]));
        assert!(json["activeHandle"].is_null());
        assert_eq!(json["hasImage"], false);
        assert!(json["preview"].is_null());
        assert_eq!(json["guideLines"][0]["label"], 1);
    }

    #[test]
    fn save_results_writes_download_names() {
        let state = SplitterState::default();
        upload_image(&state, upload_request("scan.png", 40, 20)).unwrap();
        generate_crops(&state).unwrap();

        let dir = std::env::temp_dir().join(format!("image-splitter-save-{}", std::process::id()));
        let written = save_results(&state, &dir).unwrap();

        assert_eq!(written.len(), 4);
        assert!(written[0].ends_with("scan_split_1.png"));
        let reloaded = image::open(&written[3]).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (10, 20));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_results_without_image_fails() {
        let state = SplitterState::default();
        let dir = std::env::temp_dir().join("image-splitter-save-none");
        assert!(matches!(
            save_results(&state, &dir),
            Err(AppError::Split(SplitError::NoSourceImage))
        ));
    }

    #[test]
    fn preview_profile_commands() {
        let state = SplitterState::default();
        assert_eq!(get_preview_profile(&state).unwrap(), "balanced");
        set_preview_profile(&state, "speed".to_string()).unwrap();
        assert_eq!(get_preview_profile(&state).unwrap(), "speed");
        assert!(set_preview_profile(&state, "turbo".to_string()).is_err());
    }

    #[test]
    fn advanced_config_commands() {
        let state = SplitterState::default();
        let mut config = get_advanced_config(&state).unwrap();
        config.default_split_positions = vec![33.0, 66.0];
        set_advanced_config(&state, config.clone()).unwrap();
        assert_eq!(get_advanced_config(&state).unwrap(), config);

        config.default_split_positions = vec![120.0];
        assert!(set_advanced_config(&state, config).is_err());
    }
}
