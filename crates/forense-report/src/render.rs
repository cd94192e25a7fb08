//! 渲染器边界
//!
//! 组装层只交付数据视图（有序行、标题与坐标轴文字），
//! 配色、布局与交互全部由渲染器决定。

use crate::geo::MapMarker;
use crate::pivot::CooccurrenceMatrix;
use forense_core::Result;

/// 条形方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// 类别在纵轴，数值沿横轴
    Horizontal,
    /// 类别在横轴，数值沿纵轴
    Vertical,
}

/// 单个条形
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: i64,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self { label: label.into(), value }
    }
}

/// 条形图视图
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub orientation: Orientation,
    pub bars: Vec<Bar>,
}

/// 热力图视图
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub matrix: CooccurrenceMatrix,
}

/// 地图视图
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub title: String,
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

/// 纯文本报告
#[derive(Debug, Clone, PartialEq)]
pub struct TextReport {
    pub title: String,
    pub body: String,
}

/// 渲染器
pub trait Renderer {
    fn bar_chart(&mut self, chart: &BarChart) -> Result<()>;

    fn heatmap(&mut self, view: &HeatmapView) -> Result<()>;

    fn map(&mut self, view: &MapView) -> Result<()>;

    fn text(&mut self, report: &TextReport) -> Result<()>;
}
