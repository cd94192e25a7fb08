//! 核心数据模型定义
//!
//! 所有实体均由外部数据库维护，本系统只读取并展示。

use serde::{Deserialize, Serialize};

/// 患者基本信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub blood_type: Option<String>, // 血型，可能未登记
}

/// 患者列表条目（用于选择对话框）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: i64,
    pub name: String,
}

impl PatientSummary {
    /// 列表中显示的标签，格式为 "ID. 姓名"
    pub fn label(&self) -> String {
        format!("{}. {}", self.id, self.name)
    }
}

/// 法医案件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicCase {
    pub id: i64,
    pub patient_id: i64,
    pub location: String,
}

/// 某患者样本中检出的物质
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceReading {
    pub substance: String,
    pub concentration: Option<f64>,
    pub analysis_type: Option<String>,
    pub analysis_date: Option<String>, // 样本分析日期，按数据库文本格式保留
}

/// 某患者样本中检出的疾病
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseFinding {
    pub disease: String,
    pub analysis_date: Option<String>,
}

/// 物质检出频次
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceFrequency {
    pub substance: String,
    pub frequency: i64,
}

/// 物质与疾病共现计数（长格式）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceDiseaseCount {
    pub substance: String,
    pub disease: String,
    pub frequency: i64,
}

/// 按地点统计的案件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub cases: i64,
}

/// 按血型统计的案件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodTypeCount {
    pub blood_type: String,
    pub cases: i64,
}

/// 患者详细报告所需的四组数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientBundle {
    pub patient: Patient,
    pub cases: Vec<ForensicCase>,
    pub substances: Vec<SubstanceReading>,
    pub diseases: Vec<DiseaseFinding>,
}
