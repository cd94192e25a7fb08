//! 地名坐标表与地图标记
//!
//! 每个地点都会生成一个标记；坐标表中没有的地点钉在 (0, 0) 并在弹窗中注明。

use forense_core::LocationCount;
use std::collections::BTreeMap;

/// 地图默认中心（纬度, 经度）
pub const DEFAULT_CENTER: (f64, f64) = (10.0, -60.0);

/// 地图默认缩放级别
pub const DEFAULT_ZOOM: u8 = 3;

/// 未登记地点使用的退化坐标
pub const UNMAPPED_COORDS: (f64, f64) = (0.0, 0.0);

const BUILTIN_LOCATIONS: &[(&str, f64, f64)] = &[
    ("Buenos Aires", -34.6037, -58.3816),
    ("Ciudad de México", 19.4326, -99.1332),
    ("Madrid", 40.4168, -3.7038),
    ("Bogotá", 4.7110, -74.0721),
    ("Lima", -12.0464, -77.0428),
    ("Santiago", -33.4489, -70.6693),
    ("Montevideo", -34.9011, -56.1645),
    ("Caracas", 10.4806, -66.9036),
];

/// 地图标记
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub location: String,
    pub cases: i64,
    pub lat: f64,
    pub lon: f64,
    /// 坐标是否来自坐标表
    pub mapped: bool,
    pub popup: String,
}

/// 地名 → 坐标查找表
#[derive(Debug, Clone)]
pub struct Gazetteer {
    coords: BTreeMap<String, (f64, f64)>,
}

impl Gazetteer {
    /// 内置坐标表
    pub fn builtin() -> Self {
        let coords = BUILTIN_LOCATIONS
            .iter()
            .map(|(name, lat, lon)| (name.to_string(), (*lat, *lon)))
            .collect();
        Self { coords }
    }

    /// 内置坐标表加上配置中的附加地点，同名时以配置为准
    pub fn with_extra(extra: &BTreeMap<String, [f64; 2]>) -> Self {
        let mut gazetteer = Self::builtin();
        for (name, [lat, lon]) in extra {
            gazetteer.coords.insert(name.clone(), (*lat, *lon));
        }
        gazetteer
    }

    pub fn lookup(&self, location: &str) -> Option<(f64, f64)> {
        self.coords.get(location).copied()
    }

    /// 为每个地点生成恰好一个标记
    pub fn markers(&self, rows: &[LocationCount]) -> Vec<MapMarker> {
        rows.iter()
            .map(|row| match self.lookup(&row.location) {
                Some((lat, lon)) => MapMarker {
                    location: row.location.clone(),
                    cases: row.cases,
                    lat,
                    lon,
                    mapped: true,
                    popup: format!("{}: {} 例案件", row.location, row.cases),
                },
                None => {
                    tracing::warn!(location = %row.location, "Location has no coordinates, pinning at origin");
                    MapMarker {
                        location: row.location.clone(),
                        cases: row.cases,
                        lat: UNMAPPED_COORDS.0,
                        lon: UNMAPPED_COORDS.1,
                        mapped: false,
                        popup: format!("{}: {} 例案件（无坐标）", row.location, row.cases),
                    }
                }
            })
            .collect()
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::builtin()
    }
}
