//! # 会话编排模块
//!
//! ## 设计思路
//!
//! `SplitSession` 是全部可变状态的唯一持有者（当前图片、预览、编辑器状态、分割结果），
//! 只负责流程编排，不与任何渲染表面绑定。处理链路固定为：
//! 1. 上传：加载校验 → 解码 → 生成预览（任一失败都不改动现有状态）
//! 2. 编辑：指针事件交给 `EditorState` 的纯函数迁移
//! 3. 确认：基于原图同步提取全部分段，整体替换结果列表
//!
//! ## 实现思路
//!
//! - 记录 `load/decode/preview/extract` 阶段耗时，便于性能诊断。
//! - 新上传或重置时直接替换/丢弃旧的 `SourceImage`，旧像素随之释放。

use std::time::Instant;

use super::editor::{EditorEvent, EditorState, GuideLine, SplitPositions};
use super::geometry::{ContainerRect, Orientation, PointerPoint};
use super::output::OutputImage;
use super::source::{ImageUpload, PreviewImage, SourceImage};
use super::{extractor, loader, pipeline};
use super::{PreviewProfile, SplitError, SplitterAdvancedConfig, SplitterConfig};

/// 图片分割会话。
pub struct SplitSession {
    config: SplitterConfig,
    source: Option<SourceImage>,
    preview: Option<PreviewImage>,
    editor: EditorState,
    results: Vec<OutputImage>,
}

impl Default for SplitSession {
    fn default() -> Self {
        Self::new(SplitterConfig::default())
    }
}

impl SplitSession {
    /// 根据配置创建空会话。
    ///
    /// # 示例
    /// ```rust
    /// use image_splitter::splitter::{SplitSession, SplitterConfig};
    ///
    /// let session = SplitSession::new(SplitterConfig::default());
    /// assert!(session.source().is_none());
    /// assert_eq!(session.positions().as_slice(), &[25.0, 50.0, 75.0]);
    /// ```
    pub fn new(config: SplitterConfig) -> Self {
        let editor = EditorState::new(
            Orientation::default(),
            SplitPositions::new(config.default_split_positions.iter().copied()),
        );
        Self {
            config,
            source: None,
            preview: None,
            editor,
            results: Vec::new(),
        }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn orientation(&self) -> Orientation {
        self.editor.orientation
    }

    pub fn positions(&self) -> &SplitPositions {
        &self.editor.positions
    }

    pub fn results(&self) -> &[OutputImage] {
        &self.results
    }

    pub fn guide_lines(&self) -> Vec<GuideLine> {
        self.editor.guide_lines()
    }

    /// 载入新图片：校验 → 解码 → 预览。
    ///
    /// 成功后替换原图、恢复默认分割位置并清空旧结果；失败时会话保持不变。
    pub fn load_image(&mut self, upload: ImageUpload) -> Result<&SourceImage, SplitError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let file_name = upload.file_name.clone();
        let raw = loader::load_upload(upload, &self.config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let source = pipeline::decode_source(raw, &file_name, &self.config)?;
        let decode_elapsed = decode_start.elapsed();

        let preview_start = Instant::now();
        let preview = pipeline::build_preview(&source, &self.config)?;
        let preview_elapsed = preview_start.elapsed();

        log::info!(
            "✅ 图片载入完成 - {} {}x{} load={}ms decode={}ms preview={}ms total={}ms",
            source.name(),
            source.width(),
            source.height(),
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            preview_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        let defaults = self.config.default_split_positions.clone();
        self.editor = std::mem::take(&mut self.editor).reset(&defaults);
        self.results.clear();
        self.preview = Some(preview);
        Ok(self.source.insert(source))
    }

    pub fn begin_drag(&mut self, handle: usize) {
        self.editor = std::mem::take(&mut self.editor).begin_drag(handle);
    }

    pub fn update_position(&mut self, point: PointerPoint, container: &ContainerRect) {
        self.editor = std::mem::take(&mut self.editor).update_position(point, container);
    }

    pub fn end_drag(&mut self) {
        self.editor = std::mem::take(&mut self.editor).end_drag();
    }

    /// 处理宿主转发的编辑器事件。`Reset` 事件等同于 [`SplitSession::reset`]。
    pub fn dispatch(&mut self, event: EditorEvent) {
        if event == EditorEvent::Reset {
            self.reset();
            return;
        }
        let defaults = &self.config.default_split_positions;
        self.editor = std::mem::take(&mut self.editor).apply(event, defaults);
    }

    /// 切换分割方向，已有百分比原样沿新轴解释。
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.editor.orientation != orientation {
            log::info!("↔️ 分割方向切换为 {:?}", orientation);
        }
        self.editor = std::mem::take(&mut self.editor).with_orientation(orientation);
    }

    /// 重置：恢复默认分割位置、清空结果，并释放当前图片。
    pub fn reset(&mut self) {
        let defaults = self.config.default_split_positions.clone();
        self.editor = std::mem::take(&mut self.editor).reset(&defaults);
        self.results.clear();
        self.source = None;
        self.preview = None;
        log::info!("🔄 会话已重置");
    }

    /// 确认分割：基于原图同步提取全部分段。
    ///
    /// 成功时整体替换结果列表；失败时结果列表为空。
    pub fn confirm_split(&mut self) -> Result<&[OutputImage], SplitError> {
        self.results.clear();
        let source = self.source.as_ref().ok_or(SplitError::NoSourceImage)?;

        let extract_start = Instant::now();
        let outputs = extractor::extract(
            source,
            self.editor.orientation,
            self.editor.positions.as_slice(),
        )?;

        log::info!(
            "✅ 分割完成 - {} 段 方向={:?} 分割位置={:?} extract={}ms",
            outputs.len(),
            self.editor.orientation,
            self.editor.positions.as_slice(),
            extract_start.elapsed().as_millis()
        );

        self.results = outputs;
        Ok(&self.results)
    }

    /// 切换预览档位；已载入图片时重新生成预览。
    pub fn set_preview_profile(&mut self, profile: PreviewProfile) -> Result<(), SplitError> {
        self.config.apply_preview_profile(profile);
        log::info!(
            "⚙️ 已切换预览档位：{:?}（max_dim={}, filter={:?}）",
            profile,
            self.config.preview_max_dimension,
            self.config.preview_filter
        );

        if let Some(source) = self.source.as_ref() {
            self.preview = Some(pipeline::build_preview(source, &self.config)?);
        }
        Ok(())
    }

    pub fn preview_profile(&self) -> PreviewProfile {
        self.config.infer_preview_profile()
    }

    /// 应用高级配置。新的默认分割位置在下一次载入或重置时生效。
    pub fn set_advanced_config(&mut self, advanced: &SplitterAdvancedConfig) -> Result<(), SplitError> {
        self.config.apply_advanced(advanced)
    }

    pub fn advanced_config(&self) -> SplitterAdvancedConfig {
        self.config.advanced()
    }
}
