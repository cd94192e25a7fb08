//! 查询目录接口
//!
//! 固定的只读查询集合。每个查询至多接受一个参数，返回表格化的行；
//! 空结果不是错误，由调用方决定如何呈现。

use crate::error::Result;
use crate::models::*;
use async_trait::async_trait;

/// 只读查询目录
#[async_trait]
pub trait QueryCatalog: Send + Sync {
    /// 所有物质的检出频次，按频次降序
    async fn substance_frequencies(&self) -> Result<Vec<SubstanceFrequency>>;

    /// 不区分大小写的部分匹配，返回去重并排序后的原始物质名称
    async fn search_substances(&self, term: &str) -> Result<Vec<String>>;

    /// 指定原始名称集合的检出频次
    async fn frequency_for_substances(&self, names: &[String]) -> Result<Vec<SubstanceFrequency>>;

    /// 物质与疾病的共现计数（长格式）
    async fn substance_disease_counts(&self) -> Result<Vec<SubstanceDiseaseCount>>;

    /// 按地点统计的案件数，按数量降序
    async fn cases_by_location(&self) -> Result<Vec<LocationCount>>;

    /// 按血型统计的案件数，按数量降序
    async fn blood_type_distribution(&self) -> Result<Vec<BloodTypeCount>>;

    /// 患者列表，按姓名排序
    async fn list_patients(&self) -> Result<Vec<PatientSummary>>;

    /// 患者详细数据；患者不存在时返回 `None`
    async fn patient_bundle(&self, patient_id: i64) -> Result<Option<PatientBundle>>;
}
