//! 报告组装
//!
//! 每个操作的流程都是线性的：查询 → 判空 → 变换 → 渲染。
//! 空结果与无效输入都不是错误，而是各自独立的 [`ReportOutcome`]；
//! 只有数据库、渲染或交互层本身的故障才以 `Err` 返回。

use crate::geo::{Gazetteer, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::patient_report::format_patient_report;
use crate::pivot::CooccurrenceMatrix;
use crate::prompt::Prompter;
use crate::render::{Bar, BarChart, HeatmapView, MapView, Orientation, Renderer, TextReport};
use crate::selection::{numbered_list, parse_ordinal};
use forense_core::{LabelMap, QueryCatalog, Result};
use tracing::{info, warn};

pub const NO_SUBSTANCE_DATA: &str = "未找到物质数据。";
pub const NO_SEARCH_MATCH: &str = "未找到与该关键词匹配的物质。";
pub const NO_SUBSTANCE_RECORDS: &str = "未找到该物质的检出记录。";
pub const NO_CORRELATION_DATA: &str = "没有可用于关联物质与疾病的数据。";
pub const NO_LOCATION_DATA: &str = "未找到按地点统计的案件数据。";
pub const NO_BLOOD_TYPE_DATA: &str = "未找到血型数据。";
pub const NO_PATIENTS: &str = "没有登记的患者。";
pub const PATIENT_NOT_FOUND: &str = "未找到该患者。";
pub const EMPTY_SEARCH_TERM: &str = "搜索关键词不能为空。";

/// 单次报告操作的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// 已交给渲染器
    Rendered,
    /// 查询结果为空，未渲染
    NoData(String),
    /// 用户输入无效，操作中止且未执行后续查询
    InvalidSelection(String),
    /// 用户取消
    Cancelled,
}

impl ReportOutcome {
    /// 需要告知用户的提示信息
    pub fn message(&self) -> Option<&str> {
        match self {
            ReportOutcome::NoData(msg) | ReportOutcome::InvalidSelection(msg) => Some(msg),
            ReportOutcome::Rendered | ReportOutcome::Cancelled => None,
        }
    }

    fn no_data(message: &str) -> Self {
        warn!(reason = message, "Report skipped: no data");
        ReportOutcome::NoData(message.to_string())
    }

    fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(reason = %message, "Report aborted: invalid selection");
        ReportOutcome::InvalidSelection(message)
    }
}

/// 报告组装器
pub struct ReportAssembler<C, R> {
    catalog: C,
    renderer: R,
    labels: LabelMap,
    gazetteer: Gazetteer,
}

impl<C: QueryCatalog, R: Renderer> ReportAssembler<C, R> {
    pub fn new(catalog: C, renderer: R, labels: LabelMap, gazetteer: Gazetteer) -> Self {
        Self {
            catalog,
            renderer,
            labels,
            gazetteer,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// 1. 最常见物质（按检出次数降序）
    pub async fn substance_frequency(&mut self) -> Result<ReportOutcome> {
        let rows = self.catalog.substance_frequencies().await?;
        if rows.is_empty() {
            return Ok(ReportOutcome::no_data(NO_SUBSTANCE_DATA));
        }

        let merged = self.labels.merge_frequencies(&rows);
        let chart = BarChart {
            title: "法医血样中最常见的物质".to_string(),
            x_label: "检出次数".to_string(),
            y_label: "物质".to_string(),
            orientation: Orientation::Horizontal,
            bars: merged.into_iter().map(|r| Bar::new(r.substance, r.frequency)).collect(),
        };
        self.renderer.bar_chart(&chart)?;

        info!(bars = chart.bars.len(), "Substance frequency chart rendered");
        Ok(ReportOutcome::Rendered)
    }

    /// 2. 搜索物质并显示所选物质的检出频次
    pub async fn substance_search(&mut self, prompter: &mut dyn Prompter) -> Result<ReportOutcome> {
        let Some(term) = prompter.input("请输入物质名称的一部分")? else {
            return Ok(ReportOutcome::Cancelled);
        };
        let term = term.trim();
        if term.is_empty() {
            return Ok(ReportOutcome::invalid(EMPTY_SEARCH_TERM));
        }

        let raw = self.catalog.search_substances(term).await?;
        if raw.is_empty() {
            return Ok(ReportOutcome::no_data(NO_SEARCH_MATCH));
        }

        let candidates = self.labels.display_names(&raw);
        let prompt = format!("找到以下物质:\n{}\n请输入要显示的物质编号", numbered_list(&candidates));
        let Some(answer) = prompter.input(&prompt)? else {
            return Ok(ReportOutcome::Cancelled);
        };

        let index = match parse_ordinal(&answer, candidates.len()) {
            Ok(index) => index,
            Err(e) => return Ok(ReportOutcome::invalid(e.to_string())),
        };
        let chosen = &candidates[index];

        let raw_names = self.labels.raw_names_for(chosen);
        let rows = self.catalog.frequency_for_substances(&raw_names).await?;
        if rows.is_empty() {
            return Ok(ReportOutcome::no_data(NO_SUBSTANCE_RECORDS));
        }

        let merged = self.labels.merge_frequencies(&rows);
        let chart = BarChart {
            title: format!("物质检出: {}", chosen),
            x_label: "物质".to_string(),
            y_label: "检出频次".to_string(),
            orientation: Orientation::Vertical,
            bars: merged.into_iter().map(|r| Bar::new(r.substance, r.frequency)).collect(),
        };
        self.renderer.bar_chart(&chart)?;

        info!(substance = %chosen, "Substance detail chart rendered");
        Ok(ReportOutcome::Rendered)
    }

    /// 3. 物质与疾病的共现热力图
    pub async fn substance_disease_heatmap(&mut self) -> Result<ReportOutcome> {
        let rows = self.catalog.substance_disease_counts().await?;
        if rows.is_empty() {
            return Ok(ReportOutcome::no_data(NO_CORRELATION_DATA));
        }

        let matrix = CooccurrenceMatrix::pivot(&rows, &self.labels);
        let view = HeatmapView {
            title: "物质与疾病的关联".to_string(),
            x_label: "疾病".to_string(),
            y_label: "物质".to_string(),
            matrix,
        };
        self.renderer.heatmap(&view)?;

        info!(
            substances = view.matrix.substances.len(),
            diseases = view.matrix.diseases.len(),
            "Substance-disease heatmap rendered"
        );
        Ok(ReportOutcome::Rendered)
    }

    /// 4. 按地点分布的案件：条形图与地图
    pub async fn cases_by_location(&mut self) -> Result<ReportOutcome> {
        let rows = self.catalog.cases_by_location().await?;
        if rows.is_empty() {
            return Ok(ReportOutcome::no_data(NO_LOCATION_DATA));
        }

        let chart = BarChart {
            title: "按地点分布的法医案件".to_string(),
            x_label: "地点".to_string(),
            y_label: "案件数".to_string(),
            orientation: Orientation::Vertical,
            bars: rows.iter().map(|r| Bar::new(r.location.clone(), r.cases)).collect(),
        };
        self.renderer.bar_chart(&chart)?;

        let view = MapView {
            title: "按地点分布的法医案件".to_string(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            markers: self.gazetteer.markers(&rows),
        };
        self.renderer.map(&view)?;

        info!(markers = view.markers.len(), "Cases by location rendered");
        Ok(ReportOutcome::Rendered)
    }

    /// 5. 案件中的血型分布
    pub async fn blood_type_distribution(&mut self) -> Result<ReportOutcome> {
        let rows = self.catalog.blood_type_distribution().await?;
        if rows.is_empty() {
            return Ok(ReportOutcome::no_data(NO_BLOOD_TYPE_DATA));
        }

        let chart = BarChart {
            title: "法医案件中的血型分布".to_string(),
            x_label: "血型".to_string(),
            y_label: "案件数".to_string(),
            orientation: Orientation::Vertical,
            bars: rows.into_iter().map(|r| Bar::new(r.blood_type, r.cases)).collect(),
        };
        self.renderer.bar_chart(&chart)?;

        info!(bars = chart.bars.len(), "Blood type chart rendered");
        Ok(ReportOutcome::Rendered)
    }

    /// 6. 选择患者并生成详细报告
    pub async fn patient_report(&mut self, prompter: &mut dyn Prompter) -> Result<ReportOutcome> {
        let patients = self.catalog.list_patients().await?;
        if patients.is_empty() {
            return Ok(ReportOutcome::no_data(NO_PATIENTS));
        }

        let items: Vec<String> = patients.iter().map(|p| p.label()).collect();
        let Some(index) = prompter.select("选择患者", &items)? else {
            return Ok(ReportOutcome::Cancelled);
        };
        let Some(selected) = patients.get(index) else {
            return Ok(ReportOutcome::invalid(format!("选择无效: {} 不在 1 到 {} 之间", index + 1, items.len())));
        };

        let Some(bundle) = self.catalog.patient_bundle(selected.id).await? else {
            return Ok(ReportOutcome::no_data(PATIENT_NOT_FOUND));
        };

        let report = TextReport {
            title: format!(
                "患者详细报告: {}（生成于 {}）",
                bundle.patient.name,
                chrono::Local::now().format("%Y-%m-%d %H:%M")
            ),
            body: format_patient_report(&bundle, &self.labels),
        };
        self.renderer.text(&report)?;

        info!(patient_id = selected.id, "Patient report rendered");
        Ok(ReportOutcome::Rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::UNMAPPED_COORDS;
    use async_trait::async_trait;
    use forense_core::models::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// 记录调用的内存查询目录
    #[derive(Default)]
    struct FakeCatalog {
        frequencies: Vec<SubstanceFrequency>,
        substances: Vec<String>,
        pairs: Vec<SubstanceDiseaseCount>,
        locations: Vec<LocationCount>,
        blood_types: Vec<BloodTypeCount>,
        patients: Vec<PatientSummary>,
        bundles: Vec<PatientBundle>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryCatalog for FakeCatalog {
        async fn substance_frequencies(&self) -> Result<Vec<SubstanceFrequency>> {
            self.record("frequencies");
            Ok(self.frequencies.clone())
        }

        async fn search_substances(&self, term: &str) -> Result<Vec<String>> {
            self.record(format!("search:{}", term));
            let needle = term.to_lowercase();
            let mut found: Vec<String> = self
                .substances
                .iter()
                .filter(|s| s.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            found.sort();
            found.dedup();
            Ok(found)
        }

        async fn frequency_for_substances(&self, names: &[String]) -> Result<Vec<SubstanceFrequency>> {
            self.record(format!("detail:{}", names.join("|")));
            Ok(self
                .frequencies
                .iter()
                .filter(|f| names.contains(&f.substance))
                .cloned()
                .collect())
        }

        async fn substance_disease_counts(&self) -> Result<Vec<SubstanceDiseaseCount>> {
            self.record("pairs");
            Ok(self.pairs.clone())
        }

        async fn cases_by_location(&self) -> Result<Vec<LocationCount>> {
            self.record("locations");
            Ok(self.locations.clone())
        }

        async fn blood_type_distribution(&self) -> Result<Vec<BloodTypeCount>> {
            self.record("blood");
            Ok(self.blood_types.clone())
        }

        async fn list_patients(&self) -> Result<Vec<PatientSummary>> {
            self.record("patients");
            Ok(self.patients.clone())
        }

        async fn patient_bundle(&self, patient_id: i64) -> Result<Option<PatientBundle>> {
            self.record(format!("bundle:{}", patient_id));
            Ok(self.bundles.iter().find(|b| b.patient.id == patient_id).cloned())
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        charts: Vec<BarChart>,
        heatmaps: Vec<HeatmapView>,
        maps: Vec<MapView>,
        texts: Vec<TextReport>,
    }

    impl RecordingRenderer {
        fn total(&self) -> usize {
            self.charts.len() + self.heatmaps.len() + self.maps.len() + self.texts.len()
        }
    }

    impl Renderer for RecordingRenderer {
        fn bar_chart(&mut self, chart: &BarChart) -> Result<()> {
            self.charts.push(chart.clone());
            Ok(())
        }

        fn heatmap(&mut self, view: &HeatmapView) -> Result<()> {
            self.heatmaps.push(view.clone());
            Ok(())
        }

        fn map(&mut self, view: &MapView) -> Result<()> {
            self.maps.push(view.clone());
            Ok(())
        }

        fn text(&mut self, report: &TextReport) -> Result<()> {
            self.texts.push(report.clone());
            Ok(())
        }
    }

    /// 预设答案的提示器
    #[derive(Default)]
    struct ScriptedPrompter {
        inputs: VecDeque<Option<String>>,
        selections: VecDeque<Option<usize>>,
        prompts: Vec<String>,
    }

    impl ScriptedPrompter {
        fn with_inputs(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| Some(s.to_string())).collect(),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, prompt: &str) -> Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.inputs.pop_front().flatten())
        }

        fn select(&mut self, prompt: &str, _items: &[String]) -> Result<Option<usize>> {
            self.prompts.push(prompt.to_string());
            Ok(self.selections.pop_front().flatten())
        }

        fn confirm(&mut self, _prompt: &str) -> Result<bool> {
            Ok(true)
        }
    }

    fn freq(name: &str, n: i64) -> SubstanceFrequency {
        SubstanceFrequency { substance: name.to_string(), frequency: n }
    }

    fn assembler(catalog: FakeCatalog, labels: LabelMap) -> ReportAssembler<FakeCatalog, RecordingRenderer> {
        ReportAssembler::new(catalog, RecordingRenderer::default(), labels, Gazetteer::builtin())
    }

    fn search_catalog() -> FakeCatalog {
        FakeCatalog {
            substances: vec![
                "Paracetamol".to_string(),
                "Ibuprofeno".to_string(),
                "Paracetamol Forte".to_string(),
            ],
            frequencies: vec![freq("Paracetamol", 42), freq("Ibuprofeno", 17), freq("Paracetamol Forte", 4)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_frequency_chart_sorted_descending() {
        let catalog = FakeCatalog {
            frequencies: vec![freq("Ibuprofeno", 17), freq("Paracetamol", 42)],
            ..Default::default()
        };
        let mut asm = assembler(catalog, LabelMap::default());

        let outcome = asm.substance_frequency().await.unwrap();
        assert_eq!(outcome, ReportOutcome::Rendered);

        let chart = &asm.renderer().charts[0];
        assert_eq!(chart.bars, vec![Bar::new("Paracetamol", 42), Bar::new("Ibuprofeno", 17)]);
        assert_eq!(chart.orientation, Orientation::Horizontal);
    }

    #[tokio::test]
    async fn test_empty_frequency_is_no_data() {
        let mut asm = assembler(FakeCatalog::default(), LabelMap::default());

        let outcome = asm.substance_frequency().await.unwrap();
        assert_eq!(outcome, ReportOutcome::NoData(NO_SUBSTANCE_DATA.to_string()));
        assert_eq!(asm.renderer().total(), 0);
    }

    #[tokio::test]
    async fn test_search_and_select_first_candidate() {
        let mut asm = assembler(search_catalog(), LabelMap::default());
        let mut prompter = ScriptedPrompter::with_inputs(&["parac", "1"]);

        let outcome = asm.substance_search(&mut prompter).await.unwrap();
        assert_eq!(outcome, ReportOutcome::Rendered);

        assert!(prompter.prompts[1].contains("1. Paracetamol\n2. Paracetamol Forte"));
        assert!(!prompter.prompts[1].contains("Ibuprofeno"));

        let chart = &asm.renderer().charts[0];
        assert_eq!(chart.title, "物质检出: Paracetamol");
        assert_eq!(chart.bars, vec![Bar::new("Paracetamol", 42)]);
        assert_eq!(
            asm.catalog().calls(),
            vec!["search:parac".to_string(), "detail:Paracetamol".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_without_matches_issues_no_further_query() {
        for term in ["xyz", "cocaína", "zz"] {
            let mut asm = assembler(search_catalog(), LabelMap::default());
            let mut prompter = ScriptedPrompter::with_inputs(&[term, "1"]);

            let outcome = asm.substance_search(&mut prompter).await.unwrap();
            assert_eq!(outcome, ReportOutcome::NoData(NO_SEARCH_MATCH.to_string()));
            assert_eq!(asm.catalog().calls(), vec![format!("search:{}", term)]);
            assert_eq!(prompter.prompts.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_invalid_selection_issues_no_query() {
        for answer in ["0", "3", "-1", "uno", "", "1.5"] {
            let mut asm = assembler(search_catalog(), LabelMap::default());
            let mut prompter = ScriptedPrompter::with_inputs(&["parac", answer]);

            let outcome = asm.substance_search(&mut prompter).await.unwrap();
            assert!(matches!(outcome, ReportOutcome::InvalidSelection(_)), "answer {:?}", answer);
            assert_eq!(asm.catalog().calls(), vec!["search:parac".to_string()]);
            assert_eq!(asm.renderer().total(), 0);
        }
    }

    #[tokio::test]
    async fn test_empty_search_term_is_invalid() {
        let mut asm = assembler(search_catalog(), LabelMap::default());
        let mut prompter = ScriptedPrompter::with_inputs(&["   "]);

        let outcome = asm.substance_search(&mut prompter).await.unwrap();
        assert_eq!(outcome, ReportOutcome::InvalidSelection(EMPTY_SEARCH_TERM.to_string()));
        assert!(asm.catalog().calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_search() {
        let mut asm = assembler(search_catalog(), LabelMap::default());
        let mut prompter = ScriptedPrompter::default();

        let outcome = asm.substance_search(&mut prompter).await.unwrap();
        assert_eq!(outcome, ReportOutcome::Cancelled);
        assert!(asm.catalog().calls().is_empty());
    }

    #[tokio::test]
    async fn test_raw_code_and_display_name_share_count() {
        let catalog = FakeCatalog {
            substances: vec!["Medicamento X".to_string(), "Paracetamol".to_string()],
            frequencies: vec![freq("Paracetamol", 5), freq("Medicamento X", 3)],
            ..Default::default()
        };
        let labels = LabelMap::new(LabelMap::default_remap());
        let mut asm = assembler(catalog, labels);

        // 原始代码与显示名称合并为同一个候选
        let mut prompter = ScriptedPrompter::with_inputs(&["a", "1"]);
        asm.substance_search(&mut prompter).await.unwrap();
        assert!(prompter.prompts[1].contains("1. Paracetamol"));
        assert!(!prompter.prompts[1].contains("2."));

        asm.substance_frequency().await.unwrap();

        let detail = &asm.renderer().charts[0];
        let overall = &asm.renderer().charts[1];
        assert_eq!(detail.bars, vec![Bar::new("Paracetamol", 8)]);
        assert_eq!(overall.bars, vec![Bar::new("Paracetamol", 8)]);
    }

    #[tokio::test]
    async fn test_heatmap_is_dense() {
        let catalog = FakeCatalog {
            pairs: vec![
                SubstanceDiseaseCount { substance: "Etanol".into(), disease: "Cirrosis".into(), frequency: 4 },
                SubstanceDiseaseCount { substance: "Paracetamol".into(), disease: "Hepatitis".into(), frequency: 2 },
            ],
            ..Default::default()
        };
        let mut asm = assembler(catalog, LabelMap::default());

        assert_eq!(asm.substance_disease_heatmap().await.unwrap(), ReportOutcome::Rendered);
        let matrix = &asm.renderer().heatmaps[0].matrix;
        assert_eq!(matrix.counts, vec![vec![4, 0], vec![0, 2]]);
    }

    #[tokio::test]
    async fn test_empty_heatmap_is_no_data() {
        let mut asm = assembler(FakeCatalog::default(), LabelMap::default());
        let outcome = asm.substance_disease_heatmap().await.unwrap();
        assert_eq!(outcome, ReportOutcome::NoData(NO_CORRELATION_DATA.to_string()));
    }

    #[tokio::test]
    async fn test_location_chart_and_map_markers() {
        let catalog = FakeCatalog {
            locations: vec![
                LocationCount { location: "Madrid".into(), cases: 5 },
                LocationCount { location: "Atlántida".into(), cases: 2 },
            ],
            ..Default::default()
        };
        let mut asm = assembler(catalog, LabelMap::default());

        assert_eq!(asm.cases_by_location().await.unwrap(), ReportOutcome::Rendered);
        let renderer = asm.renderer();
        assert_eq!(renderer.charts[0].bars.len(), 2);

        let map = &renderer.maps[0];
        assert_eq!(map.center, DEFAULT_CENTER);
        assert_eq!(map.markers.len(), 2);
        assert!(map.markers[0].mapped);
        assert!(!map.markers[1].mapped);
        assert_eq!((map.markers[1].lat, map.markers[1].lon), UNMAPPED_COORDS);
    }

    #[tokio::test]
    async fn test_empty_locations_produce_no_map() {
        let mut asm = assembler(FakeCatalog::default(), LabelMap::default());
        let outcome = asm.cases_by_location().await.unwrap();
        assert_eq!(outcome, ReportOutcome::NoData(NO_LOCATION_DATA.to_string()));
        assert!(asm.renderer().maps.is_empty());
    }

    #[tokio::test]
    async fn test_blood_type_chart() {
        let catalog = FakeCatalog {
            blood_types: vec![
                BloodTypeCount { blood_type: "O+".into(), cases: 9 },
                BloodTypeCount { blood_type: "AB-".into(), cases: 1 },
            ],
            ..Default::default()
        };
        let mut asm = assembler(catalog, LabelMap::default());

        assert_eq!(asm.blood_type_distribution().await.unwrap(), ReportOutcome::Rendered);
        assert_eq!(
            asm.renderer().charts[0].bars,
            vec![Bar::new("O+", 9), Bar::new("AB-", 1)]
        );
    }

    fn patient_catalog() -> FakeCatalog {
        FakeCatalog {
            patients: vec![
                PatientSummary { id: 1, name: "Ana Gómez".into() },
                PatientSummary { id: 3, name: "Carla Ruiz".into() },
            ],
            bundles: vec![PatientBundle {
                patient: Patient { id: 3, name: "Carla Ruiz".into(), blood_type: Some("O+".into()) },
                cases: vec![],
                substances: vec![],
                diseases: vec![],
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_patient_without_cases_renders_placeholders() {
        let mut asm = assembler(patient_catalog(), LabelMap::default());
        let mut prompter = ScriptedPrompter {
            selections: VecDeque::from([Some(1)]),
            ..Default::default()
        };

        assert_eq!(asm.patient_report(&mut prompter).await.unwrap(), ReportOutcome::Rendered);
        assert_eq!(asm.catalog().calls(), vec!["patients".to_string(), "bundle:3".to_string()]);

        let report = &asm.renderer().texts[0];
        assert!(report.title.contains("Carla Ruiz"));
        assert!(report.body.contains(crate::patient_report::NO_CASES));
        assert!(report.body.contains(crate::patient_report::NO_SUBSTANCES));
        assert!(report.body.contains(crate::patient_report::NO_DISEASES));
    }

    #[tokio::test]
    async fn test_patient_not_found_and_cancel() {
        let mut asm = assembler(patient_catalog(), LabelMap::default());
        let mut prompter = ScriptedPrompter {
            selections: VecDeque::from([Some(0), None, Some(7)]),
            ..Default::default()
        };

        let outcome = asm.patient_report(&mut prompter).await.unwrap();
        assert_eq!(outcome, ReportOutcome::NoData(PATIENT_NOT_FOUND.to_string()));

        let outcome = asm.patient_report(&mut prompter).await.unwrap();
        assert_eq!(outcome, ReportOutcome::Cancelled);

        let outcome = asm.patient_report(&mut prompter).await.unwrap();
        assert!(matches!(outcome, ReportOutcome::InvalidSelection(_)));
        assert!(asm.renderer().texts.is_empty());
    }

    #[tokio::test]
    async fn test_no_patients() {
        let mut asm = assembler(FakeCatalog::default(), LabelMap::default());
        let mut prompter = ScriptedPrompter::default();

        let outcome = asm.patient_report(&mut prompter).await.unwrap();
        assert_eq!(outcome, ReportOutcome::NoData(NO_PATIENTS.to_string()));
        assert!(prompter.prompts.is_empty());
    }
}
