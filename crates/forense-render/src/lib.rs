//! # 法医报告渲染模块
//!
//! 报告视图的具体渲染实现：
//! - 终端渲染：ASCII 条形图、计数网格与纯文本报告
//! - SVG 导出：条形图与热力图
//! - 地图输出：Leaflet HTML 文件
//! - 浏览器：在默认浏览器中打开生成的文件

pub mod browser;
pub mod map_html;
pub mod svg;
pub mod terminal;

pub use browser::open_browser;
pub use map_html::MapWriter;
pub use terminal::TerminalRenderer;

/// HTML/XML 文本转义
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
