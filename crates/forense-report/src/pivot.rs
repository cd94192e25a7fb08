//! 物质 × 疾病共现矩阵
//!
//! 将长格式的 (物质, 疾病, 计数) 行透视为稠密矩阵：行为物质，列为疾病，
//! 查询结果中缺失的组合计为 0。矩阵在观测到的行、列标签集合上始终是满的。

use forense_core::{LabelMap, SubstanceDiseaseCount};
use std::collections::{BTreeMap, BTreeSet};

/// 共现矩阵
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooccurrenceMatrix {
    /// 行标签（物质显示名称），升序
    pub substances: Vec<String>,
    /// 列标签（疾病），升序
    pub diseases: Vec<String>,
    /// `counts[row][col]`
    pub counts: Vec<Vec<i64>>,
}

impl CooccurrenceMatrix {
    /// 透视长格式行；映射到同一显示名称的行会被累加
    pub fn pivot(rows: &[SubstanceDiseaseCount], labels: &LabelMap) -> Self {
        let mut cells: BTreeMap<(&str, &str), i64> = BTreeMap::new();
        let mut substances = BTreeSet::new();
        let mut diseases = BTreeSet::new();

        for row in rows {
            let substance = labels.display(&row.substance);
            substances.insert(substance);
            diseases.insert(row.disease.as_str());
            *cells.entry((substance, row.disease.as_str())).or_insert(0) += row.frequency;
        }

        let counts: Vec<Vec<i64>> = substances
            .iter()
            .map(|s| {
                diseases
                    .iter()
                    .map(|d| cells.get(&(*s, *d)).copied().unwrap_or(0))
                    .collect::<Vec<i64>>()
            })
            .collect();

        Self {
            substances: substances.into_iter().map(str::to_string).collect(),
            diseases: diseases.into_iter().map(str::to_string).collect(),
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty() || self.diseases.is_empty()
    }

    pub fn get(&self, substance: &str, disease: &str) -> Option<i64> {
        let row = self.substances.iter().position(|s| s == substance)?;
        let col = self.diseases.iter().position(|d| d == disease)?;
        Some(self.counts[row][col])
    }

    pub fn max_count(&self) -> i64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// 还原为长格式，包含计数为 0 的单元格
    pub fn to_long(&self) -> Vec<SubstanceDiseaseCount> {
        let mut rows = Vec::with_capacity(self.substances.len() * self.diseases.len());
        for (substance, counts) in self.substances.iter().zip(&self.counts) {
            for (disease, count) in self.diseases.iter().zip(counts) {
                rows.push(SubstanceDiseaseCount {
                    substance: substance.clone(),
                    disease: disease.clone(),
                    frequency: *count,
                });
            }
        }
        rows
    }
}
