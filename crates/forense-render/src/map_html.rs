//! Leaflet 地图输出
//!
//! 每次调用都会覆盖同一个 HTML 文件。

use crate::{browser, escape};
use forense_core::Result;
use forense_report::MapView;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const LEAFLET_VERSION: &str = "1.9.4";

/// 地图文件写入器
#[derive(Debug, Clone)]
pub struct MapWriter {
    path: PathBuf,
    open_browser: bool,
}

impl MapWriter {
    pub fn new(path: impl Into<PathBuf>, open_browser: bool) -> Self {
        Self {
            path: path.into(),
            open_browser,
        }
    }

    /// 写入地图文件，按配置在浏览器中打开，返回文件路径
    pub fn write(&self, view: &MapView) -> Result<&Path> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let html = render_html(view)?;
        std::fs::write(&self.path, html)?;
        info!(path = %self.path.display(), markers = view.markers.len(), "Map written");

        if self.open_browser {
            // 打不开浏览器不影响文件本身
            if let Err(e) = browser::open_browser(&self.path) {
                warn!(error = %e, "Failed to open map in browser");
            }
        }

        Ok(&self.path)
    }
}

/// 生成完整的 Leaflet HTML 文档
pub fn render_html(view: &MapView) -> Result<String> {
    let markers: Vec<serde_json::Value> = view
        .markers
        .iter()
        .map(|m| {
            json!({
                "lat": m.lat,
                "lon": m.lon,
                "mapped": m.mapped,
                "popup": escape(&m.popup),
            })
        })
        .collect();

    // 防止数据中的 `</` 提前结束 script 标签
    let markers_json = serde_json::to_string(&markers)?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
    <script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
    <style>
        html, body, #map {{ height: 100%; margin: 0; }}
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
        const map = L.map('map').setView([{lat}, {lon}], {zoom});
        L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
            attribution: '&copy; OpenStreetMap contributors'
        }}).addTo(map);
        const markers = {markers};
        for (const m of markers) {{
            const marker = m.mapped
                ? L.marker([m.lat, m.lon])
                : L.circleMarker([m.lat, m.lon], {{ color: 'gray' }});
            marker.addTo(map).bindPopup(m.popup);
        }}
    </script>
</body>
</html>
"#,
        title = escape(&view.title),
        version = LEAFLET_VERSION,
        lat = view.center.0,
        lon = view.center.1,
        zoom = view.zoom,
        markers = markers_json,
    ))
}
