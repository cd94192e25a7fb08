//! 数据库查询操作
//!
//! 所有语句均为只读且参数化，用户输入只通过绑定参数传入。
//! 语句同时兼容 PostgreSQL 与 SQLite：日期统一以文本读取，标识和计数统一转换为 BIGINT。
//! 物质搜索在 Rust 侧做 Unicode 大小写折叠，SQLite 的 `LOWER` 只处理 ASCII。

use crate::connection::DatabasePool;
use crate::models::*;
use async_trait::async_trait;
use forense_core::models::*;
use forense_core::{ForenseError, QueryCatalog, Result};

const SUBSTANCE_FREQUENCY_SQL: &str = r#"
    SELECT Sustancia AS substance, COUNT(*) AS frequency
    FROM ComponentesQuimicos
    GROUP BY Sustancia
    ORDER BY frequency DESC, substance
"#;

const SUBSTANCE_NAMES_SQL: &str = r#"
    SELECT DISTINCT Sustancia AS substance
    FROM ComponentesQuimicos
    ORDER BY substance
"#;

const SUBSTANCE_DISEASE_SQL: &str = r#"
    SELECT cq.Sustancia AS substance, ed.Enfermedad AS disease, COUNT(*) AS frequency
    FROM ComponentesQuimicos cq
    JOIN MuestrasSangre ms ON cq.ID_Muestra = ms.ID_Muestra
    JOIN EnfermedadesDetectadas ed ON ms.ID_Muestra = ed.ID_Muestra
    GROUP BY cq.Sustancia, ed.Enfermedad
    ORDER BY disease, frequency DESC, substance
"#;

const CASES_BY_LOCATION_SQL: &str = r#"
    SELECT Ubicacion AS location, COUNT(*) AS cases
    FROM CasosForenses
    GROUP BY Ubicacion
    ORDER BY cases DESC, location
"#;

const BLOOD_TYPE_SQL: &str = r#"
    SELECT p.Tipo_Sangre AS blood_type, COUNT(cf.ID_Caso) AS cases
    FROM Pacientes p
    JOIN CasosForenses cf ON p.ID_Paciente = cf.ID_Paciente
    GROUP BY p.Tipo_Sangre
    ORDER BY cases DESC, blood_type
"#;

const LIST_PATIENTS_SQL: &str = r#"
    SELECT CAST(ID_Paciente AS BIGINT) AS id, Nombre AS name, Tipo_Sangre AS blood_type
    FROM Pacientes
    ORDER BY Nombre, ID_Paciente
"#;

const PATIENT_SQL: &str = r#"
    SELECT CAST(ID_Paciente AS BIGINT) AS id, Nombre AS name, Tipo_Sangre AS blood_type
    FROM Pacientes
    WHERE ID_Paciente = $1
"#;

const PATIENT_CASES_SQL: &str = r#"
    SELECT CAST(ID_Caso AS BIGINT) AS id, CAST(ID_Paciente AS BIGINT) AS patient_id, Ubicacion AS location
    FROM CasosForenses
    WHERE ID_Paciente = $1
    ORDER BY ID_Caso
"#;

const PATIENT_SUBSTANCES_SQL: &str = r#"
    SELECT cq.Sustancia AS substance,
           CAST(cq.Concentracion AS DOUBLE PRECISION) AS concentration,
           cq.Tipo_Analisis AS analysis_type,
           CAST(ms.Fecha_Analisis AS TEXT) AS analysis_date
    FROM ComponentesQuimicos cq
    JOIN MuestrasSangre ms ON cq.ID_Muestra = ms.ID_Muestra
    JOIN CasosForenses cf ON ms.ID_Caso = cf.ID_Caso
    WHERE cf.ID_Paciente = $1
    ORDER BY analysis_date, substance
"#;

const PATIENT_DISEASES_SQL: &str = r#"
    SELECT ed.Enfermedad AS disease, CAST(ms.Fecha_Analisis AS TEXT) AS analysis_date
    FROM EnfermedadesDetectadas ed
    JOIN MuestrasSangre ms ON ed.ID_Muestra = ms.ID_Muestra
    JOIN CasosForenses cf ON ms.ID_Caso = cf.ID_Caso
    WHERE cf.ID_Paciente = $1
    ORDER BY analysis_date, disease
"#;

/// 数据库查询操作接口
pub struct DatabaseQueries<'a> {
    pool: &'a DatabasePool,
}

impl<'a> DatabaseQueries<'a> {
    pub fn new(pool: &'a DatabasePool) -> Self {
        Self { pool }
    }
}

/// 大小写无关的子串匹配，按 Unicode 规则折叠；输入中的字符全部按字面匹配
pub fn matches_term(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// 生成 `$1, $2, ...` 形式的占位符列表
fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn db_err(e: sqlx::Error) -> ForenseError {
    ForenseError::Database(e.to_string())
}

#[async_trait]
impl<'a> QueryCatalog for DatabaseQueries<'a> {
    async fn substance_frequencies(&self) -> Result<Vec<SubstanceFrequency>> {
        let rows = sqlx::query_as::<_, DbSubstanceFrequency>(SUBSTANCE_FREQUENCY_SQL)
            .fetch_all(self.pool.pool())
            .await
            .map_err(db_err)?;

        tracing::debug!(rows = rows.len(), "Substance frequency query finished");
        Ok(rows.into_iter().map(SubstanceFrequency::from).collect())
    }

    async fn search_substances(&self, term: &str) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar::<_, String>(SUBSTANCE_NAMES_SQL)
            .fetch_all(self.pool.pool())
            .await
            .map_err(db_err)?
            .into_iter()
            .filter(|name| matches_term(name, term))
            .collect();

        tracing::debug!(term, matches = names.len(), "Substance search finished");
        Ok(names)
    }

    async fn frequency_for_substances(&self, names: &[String]) -> Result<Vec<SubstanceFrequency>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT Sustancia AS substance, COUNT(*) AS frequency \
             FROM ComponentesQuimicos \
             WHERE Sustancia IN ({}) \
             GROUP BY Sustancia \
             ORDER BY frequency DESC, substance",
            placeholders(names.len())
        );

        let mut query = sqlx::query_as::<_, DbSubstanceFrequency>(&sql);
        for name in names {
            query = query.bind(name.as_str());
        }

        let rows = query.fetch_all(self.pool.pool()).await.map_err(db_err)?;
        tracing::debug!(names = names.len(), rows = rows.len(), "Substance detail query finished");
        Ok(rows.into_iter().map(SubstanceFrequency::from).collect())
    }

    async fn substance_disease_counts(&self) -> Result<Vec<SubstanceDiseaseCount>> {
        let rows = sqlx::query_as::<_, DbSubstanceDiseaseCount>(SUBSTANCE_DISEASE_SQL)
            .fetch_all(self.pool.pool())
            .await
            .map_err(db_err)?;

        tracing::debug!(rows = rows.len(), "Substance-disease query finished");
        Ok(rows.into_iter().map(SubstanceDiseaseCount::from).collect())
    }

    async fn cases_by_location(&self) -> Result<Vec<LocationCount>> {
        let rows = sqlx::query_as::<_, DbLocationCount>(CASES_BY_LOCATION_SQL)
            .fetch_all(self.pool.pool())
            .await
            .map_err(db_err)?;

        tracing::debug!(rows = rows.len(), "Cases by location query finished");
        Ok(rows.into_iter().map(LocationCount::from).collect())
    }

    async fn blood_type_distribution(&self) -> Result<Vec<BloodTypeCount>> {
        let rows = sqlx::query_as::<_, DbBloodTypeCount>(BLOOD_TYPE_SQL)
            .fetch_all(self.pool.pool())
            .await
            .map_err(db_err)?;

        tracing::debug!(rows = rows.len(), "Blood type query finished");
        Ok(rows.into_iter().map(BloodTypeCount::from).collect())
    }

    async fn list_patients(&self) -> Result<Vec<PatientSummary>> {
        let rows = sqlx::query_as::<_, DbPatient>(LIST_PATIENTS_SQL)
            .fetch_all(self.pool.pool())
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(PatientSummary::from).collect())
    }

    async fn patient_bundle(&self, patient_id: i64) -> Result<Option<PatientBundle>> {
        let pool = self.pool.pool();

        let patient = sqlx::query_as::<_, DbPatient>(PATIENT_SQL)
            .bind(patient_id)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;

        let Some(patient) = patient else {
            return Ok(None);
        };

        let cases = sqlx::query_as::<_, DbCase>(PATIENT_CASES_SQL)
            .bind(patient_id)
            .fetch_all(pool)
            .await
            .map_err(db_err)?;

        let substances = sqlx::query_as::<_, DbSubstanceReading>(PATIENT_SUBSTANCES_SQL)
            .bind(patient_id)
            .fetch_all(pool)
            .await
            .map_err(db_err)?;

        let diseases = sqlx::query_as::<_, DbDiseaseFinding>(PATIENT_DISEASES_SQL)
            .bind(patient_id)
            .fetch_all(pool)
            .await
            .map_err(db_err)?;

        tracing::debug!(
            patient_id,
            cases = cases.len(),
            substances = substances.len(),
            diseases = diseases.len(),
            "Patient bundle loaded"
        );

        Ok(Some(PatientBundle {
            patient: patient.into(),
            cases: cases.into_iter().map(ForensicCase::from).collect(),
            substances: substances.into_iter().map(SubstanceReading::from).collect(),
            diseases: diseases.into_iter().map(DiseaseFinding::from).collect(),
        }))
    }
}
