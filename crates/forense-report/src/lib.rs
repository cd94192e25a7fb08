//! # 法医报告组装模块
//!
//! 在查询目录与渲染器之间完成每个报告操作：执行查询、判断空结果、
//! 做展示前的变换（标签映射、透视、地图标记），再交给渲染器。
//! - 报告组装：六个报告操作及其结果类型
//! - 共现矩阵：物质 × 疾病的稠密计数表
//! - 地名坐标表：地点到坐标的静态查找
//! - 选择解析：序号输入校验
//! - 患者报告：纯文本格式化

pub mod assembler;
pub mod geo;
pub mod patient_report;
pub mod pivot;
pub mod prompt;
pub mod render;
pub mod selection;

// 重新导出主要类型
pub use assembler::{ReportAssembler, ReportOutcome};
pub use geo::{Gazetteer, MapMarker};
pub use pivot::CooccurrenceMatrix;
pub use prompt::Prompter;
pub use render::{Bar, BarChart, HeatmapView, MapView, Orientation, Renderer, TextReport};
pub use selection::{parse_ordinal, SelectionError};
