//! # 分割线编辑器模块
//!
//! ## 设计思路
//!
//! 拖拽交互建模为显式状态机 `{Idle, Dragging(handle)}`，由归一化后的指针事件驱动：
//!
//! ```text
//!            Down{handle ∈ 范围}
//!   Idle ───────────────────────▶ Dragging(handle)
//!    ▲                                 │  Move → 更新 positions[handle]
//!    └──────── Up / Cancel ────────────┘
//! ```
//!
//! 鼠标与触摸在进入状态机前统一为 `PointerPoint`：触摸事件取第一个触点，没有触点则忽略。
//!
//! ## 实现思路
//!
//! - 所有状态迁移都是纯函数：`EditorState` 按值传入、按值返回，不依赖任何渲染表面。
//! - 越界索引、空闲时的移动事件均为静默 no-op。
//! - 切换方向只替换 `orientation`，已有百分比原样沿新轴解释。

use serde::{Deserialize, Serialize};

use super::config::DEFAULT_SPLIT_POSITIONS;
use super::geometry::{self, ContainerRect, Orientation, PointerPoint};

/// 分割位置序列。
///
/// 索引即手柄身份；数值不要求有序，手柄可以被拖过相邻手柄。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitPositions(Vec<f64>);

impl SplitPositions {
    /// 构造时把每个值收敛到 `[0, 100]`。
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().map(geometry::clamp_percent).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// 覆盖单个手柄的值。索引越界时返回 `false` 且不做任何修改。
    fn set(&mut self, index: usize, value: f64) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = geometry::clamp_percent(value);
                true
            }
            None => false,
        }
    }
}

impl Default for SplitPositions {
    fn default() -> Self {
        Self::new(DEFAULT_SPLIT_POSITIONS)
    }
}

/// 拖拽会话。全局至多一个。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { handle: usize },
}

impl DragState {
    pub fn active_handle(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { handle } => Some(handle),
        }
    }
}

/// 单个触点。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// 宿主转发的原始指针输入。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum PointerInput {
    #[serde(rename_all = "camelCase")]
    Mouse { client_x: f64, client_y: f64 },
    Touch { touches: Vec<TouchPoint> },
}

impl PointerInput {
    /// 归一化为单一坐标。触摸事件取第一个触点；没有触点时返回 `None`。
    pub fn point(&self) -> Option<PointerPoint> {
        match self {
            Self::Mouse { client_x, client_y } => Some(PointerPoint {
                client_x: *client_x,
                client_y: *client_y,
            }),
            Self::Touch { touches } => touches.first().map(|touch| PointerPoint {
                client_x: touch.client_x,
                client_y: touch.client_y,
            }),
        }
    }
}

/// 编辑器事件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    /// 在某个手柄上按下（mousedown / touchstart）。
    Down { handle: usize },
    /// 指针移动（mousemove / touchmove），附带当前容器包围盒。
    Move {
        input: PointerInput,
        container: ContainerRect,
    },
    /// 松开（mouseup / touchend）。
    Up,
    /// 取消（touchcancel / 失去捕获）。
    Cancel,
    SetOrientation { orientation: Orientation },
    /// 恢复默认分割位置，默认值由调用方（会话配置）提供。
    Reset,
}

/// 单条引导线的视图模型。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideLine {
    pub index: usize,
    /// 手柄徽标上的编号（1 起始）。
    pub label: u32,
    pub percent: f64,
    pub orientation: Orientation,
    pub active: bool,
}

/// 编辑器状态：方向、分割位置与拖拽会话。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub orientation: Orientation,
    pub positions: SplitPositions,
    pub drag: DragState,
}

impl EditorState {
    pub fn new(orientation: Orientation, positions: SplitPositions) -> Self {
        Self {
            orientation,
            positions,
            drag: DragState::Idle,
        }
    }

    /// 开始拖拽。索引越界时保持原状态。
    pub fn begin_drag(mut self, handle: usize) -> Self {
        if handle < self.positions.len() {
            log::debug!("🖱️ 开始拖拽分割线 #{}", handle + 1);
            self.drag = DragState::Dragging { handle };
        }
        self
    }

    /// 拖拽中：把指针投影为百分比并写回当前手柄。空闲时不做任何事。
    pub fn update_position(mut self, point: PointerPoint, container: &ContainerRect) -> Self {
        let DragState::Dragging { handle } = self.drag else {
            return self;
        };
        if let Some(percent) = geometry::percent_along_axis(self.orientation, point, container) {
            self.positions.set(handle, percent);
        }
        self
    }

    /// 结束拖拽，幂等。
    pub fn end_drag(mut self) -> Self {
        if let DragState::Dragging { handle } = self.drag {
            log::debug!(
                "🖱️ 结束拖拽分割线 #{} -> {:.2}%",
                handle + 1,
                self.positions.get(handle).unwrap_or_default()
            );
        }
        self.drag = DragState::Idle;
        self
    }

    /// 切换方向，数值不变。
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// 恢复默认分割位置并结束拖拽。
    pub fn reset(mut self, defaults: &[f64]) -> Self {
        self.positions = SplitPositions::new(defaults.iter().copied());
        self.drag = DragState::Idle;
        self
    }

    /// 事件驱动的统一入口。`defaults` 仅在 `Reset` 时使用。
    pub fn apply(self, event: EditorEvent, defaults: &[f64]) -> Self {
        match event {
            EditorEvent::Down { handle } => self.begin_drag(handle),
            EditorEvent::Move { input, container } => match input.point() {
                Some(point) => self.update_position(point, &container),
                None => self,
            },
            EditorEvent::Up | EditorEvent::Cancel => self.end_drag(),
            EditorEvent::SetOrientation { orientation } => self.with_orientation(orientation),
            EditorEvent::Reset => self.reset(defaults),
        }
    }

    /// 当前所有手柄的引导线视图。
    pub fn guide_lines(&self) -> Vec<GuideLine> {
        let active = self.drag.active_handle();
        self.positions
            .as_slice()
            .iter()
            .enumerate()
            .map(|(index, &percent)| GuideLine {
                index,
                label: index as u32 + 1,
                percent,
                orientation: self.orientation,
                active: active == Some(index),
            })
            .collect()
    }
}
