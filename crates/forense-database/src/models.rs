//! 数据库行模型
//!
//! 查询列别名与字段名一一对应，使用 FromRow 直接解码后转换为核心模型。

use forense_core::models::*;
use sqlx::FromRow;

/// 患者表行
#[derive(Debug, FromRow)]
pub struct DbPatient {
    pub id: i64,
    pub name: String,
    pub blood_type: Option<String>,
}

impl From<DbPatient> for Patient {
    fn from(row: DbPatient) -> Self {
        Patient {
            id: row.id,
            name: row.name,
            blood_type: row.blood_type,
        }
    }
}

impl From<DbPatient> for PatientSummary {
    fn from(row: DbPatient) -> Self {
        PatientSummary { id: row.id, name: row.name }
    }
}

/// 案件表行
#[derive(Debug, FromRow)]
pub struct DbCase {
    pub id: i64,
    pub patient_id: i64,
    pub location: String,
}

impl From<DbCase> for ForensicCase {
    fn from(row: DbCase) -> Self {
        ForensicCase {
            id: row.id,
            patient_id: row.patient_id,
            location: row.location,
        }
    }
}

/// 患者物质检出行（化学成分 ⨝ 血样）
#[derive(Debug, FromRow)]
pub struct DbSubstanceReading {
    pub substance: String,
    pub concentration: Option<f64>,
    pub analysis_type: Option<String>,
    pub analysis_date: Option<String>,
}

impl From<DbSubstanceReading> for SubstanceReading {
    fn from(row: DbSubstanceReading) -> Self {
        SubstanceReading {
            substance: row.substance,
            concentration: row.concentration,
            analysis_type: row.analysis_type,
            analysis_date: row.analysis_date,
        }
    }
}

/// 患者疾病检出行（疾病 ⨝ 血样）
#[derive(Debug, FromRow)]
pub struct DbDiseaseFinding {
    pub disease: String,
    pub analysis_date: Option<String>,
}

impl From<DbDiseaseFinding> for DiseaseFinding {
    fn from(row: DbDiseaseFinding) -> Self {
        DiseaseFinding {
            disease: row.disease,
            analysis_date: row.analysis_date,
        }
    }
}

/// 物质频次聚合行
#[derive(Debug, FromRow)]
pub struct DbSubstanceFrequency {
    pub substance: String,
    pub frequency: i64,
}

impl From<DbSubstanceFrequency> for SubstanceFrequency {
    fn from(row: DbSubstanceFrequency) -> Self {
        SubstanceFrequency {
            substance: row.substance,
            frequency: row.frequency,
        }
    }
}

/// 物质-疾病共现聚合行
#[derive(Debug, FromRow)]
pub struct DbSubstanceDiseaseCount {
    pub substance: String,
    pub disease: String,
    pub frequency: i64,
}

impl From<DbSubstanceDiseaseCount> for SubstanceDiseaseCount {
    fn from(row: DbSubstanceDiseaseCount) -> Self {
        SubstanceDiseaseCount {
            substance: row.substance,
            disease: row.disease,
            frequency: row.frequency,
        }
    }
}

/// 地点案件数聚合行
#[derive(Debug, FromRow)]
pub struct DbLocationCount {
    pub location: String,
    pub cases: i64,
}

impl From<DbLocationCount> for LocationCount {
    fn from(row: DbLocationCount) -> Self {
        LocationCount {
            location: row.location,
            cases: row.cases,
        }
    }
}

/// 血型案件数聚合行
#[derive(Debug, FromRow)]
pub struct DbBloodTypeCount {
    pub blood_type: Option<String>,
    pub cases: i64,
}

impl From<DbBloodTypeCount> for BloodTypeCount {
    fn from(row: DbBloodTypeCount) -> Self {
        BloodTypeCount {
            blood_type: row.blood_type.unwrap_or_else(|| "未知".to_string()),
            cases: row.cases,
        }
    }
}
