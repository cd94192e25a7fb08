//! 物质标签映射
//!
//! 原始物质代码到显示名称的静态映射，仅在展示时应用，不修改源数据。

use crate::models::SubstanceFrequency;
use std::collections::BTreeMap;

/// 物质标签映射表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    remap: BTreeMap<String, String>,
}

impl LabelMap {
    pub fn new(remap: BTreeMap<String, String>) -> Self {
        Self { remap }
    }

    /// 默认映射：两种代号药物
    pub fn default_remap() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Medicamento X".to_string(), "Paracetamol".to_string()),
            ("Medicamento Y".to_string(), "Ibuprofeno".to_string()),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.remap.is_empty()
    }

    /// 原始名称对应的显示名称；未映射时原样返回
    pub fn display<'a>(&'a self, raw: &'a str) -> &'a str {
        self.remap.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// 解析为同一显示名称的全部原始名称（含显示名称本身），已排序
    pub fn raw_names_for(&self, display: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .remap
            .iter()
            .filter(|(_, shown)| shown.as_str() == display)
            .map(|(raw, _)| raw.clone())
            .collect();
        if !names.iter().any(|n| n == display) {
            names.push(display.to_string());
        }
        names.sort();
        names
    }

    /// 将原始名称列表转换为去重、排序后的显示名称
    pub fn display_names(&self, raw: &[String]) -> Vec<String> {
        let mut shown: Vec<String> = raw.iter().map(|r| self.display(r).to_string()).collect();
        shown.sort();
        shown.dedup();
        shown
    }

    /// 应用映射后按显示名称合并频次，按频次降序、名称升序排列
    pub fn merge_frequencies(&self, rows: &[SubstanceFrequency]) -> Vec<SubstanceFrequency> {
        let mut merged: BTreeMap<&str, i64> = BTreeMap::new();
        for row in rows {
            *merged.entry(self.display(&row.substance)).or_insert(0) += row.frequency;
        }

        let mut out: Vec<SubstanceFrequency> = merged
            .into_iter()
            .map(|(substance, frequency)| SubstanceFrequency {
                substance: substance.to_string(),
                frequency,
            })
            .collect();
        out.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.substance.cmp(&b.substance)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(name: &str, n: i64) -> SubstanceFrequency {
        SubstanceFrequency { substance: name.to_string(), frequency: n }
    }

    #[test]
    fn test_display_falls_back_to_raw() {
        let labels = LabelMap::new(LabelMap::default_remap());
        assert_eq!(labels.display("Medicamento X"), "Paracetamol");
        assert_eq!(labels.display("Cocaína"), "Cocaína");
    }

    #[test]
    fn test_raw_names_include_display_name() {
        let labels = LabelMap::new(LabelMap::default_remap());
        assert_eq!(
            labels.raw_names_for("Paracetamol"),
            vec!["Medicamento X".to_string(), "Paracetamol".to_string()]
        );
        assert_eq!(labels.raw_names_for("Etanol"), vec!["Etanol".to_string()]);
    }

    #[test]
    fn test_merge_frequencies_sums_codes_and_sorts() {
        let labels = LabelMap::new(LabelMap::default_remap());
        let rows = vec![freq("Etanol", 20), freq("Medicamento X", 15), freq("Paracetamol", 10)];
        let merged = labels.merge_frequencies(&rows);
        assert_eq!(merged, vec![freq("Paracetamol", 25), freq("Etanol", 20)]);
    }

    #[test]
    fn test_merge_without_remap_keeps_rows() {
        let labels = LabelMap::default();
        let rows = vec![freq("Paracetamol", 42), freq("Ibuprofeno", 17)];
        assert_eq!(labels.merge_frequencies(&rows), rows);
    }

    #[test]
    fn test_display_names_dedup() {
        let labels = LabelMap::new(LabelMap::default_remap());
        let raw = vec!["Paracetamol".to_string(), "Medicamento X".to_string(), "Etanol".to_string()];
        assert_eq!(labels.display_names(&raw), vec!["Etanol".to_string(), "Paracetamol".to_string()]);
    }
}
