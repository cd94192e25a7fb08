//! 患者详细报告（纯文本）
//!
//! 四个分节：患者资料、法医案件、检出物质、检出疾病。
//! 非空分节输出列对齐的文本表格，空分节输出明确的占位说明。

use forense_core::{LabelMap, PatientBundle};
use unicode_width::UnicodeWidthStr;

pub const NO_CASES: &str = "无登记案件";
pub const NO_SUBSTANCES: &str = "无物质检出数据";
pub const NO_DISEASES: &str = "无疾病检出数据";

/// 生成患者报告正文
pub fn format_patient_report(bundle: &PatientBundle, labels: &LabelMap) -> String {
    let mut report = String::new();

    let patient = &bundle.patient;
    let patient_rows = vec![vec![
        patient.id.to_string(),
        patient.name.clone(),
        optional(patient.blood_type.as_deref()),
    ]];
    push_section(&mut report, "患者资料", &["ID", "姓名", "血型"], &patient_rows, "");

    let case_rows: Vec<Vec<String>> = bundle
        .cases
        .iter()
        .map(|c| vec![c.id.to_string(), c.location.clone()])
        .collect();
    push_section(&mut report, "法医案件", &["案件ID", "地点"], &case_rows, NO_CASES);

    let substance_rows: Vec<Vec<String>> = bundle
        .substances
        .iter()
        .map(|s| {
            vec![
                labels.display(&s.substance).to_string(),
                s.concentration.map(|c| format!("{:.2}", c)).unwrap_or_else(|| "-".to_string()),
                optional(s.analysis_type.as_deref()),
                optional(s.analysis_date.as_deref()),
            ]
        })
        .collect();
    push_section(
        &mut report,
        "检出物质",
        &["物质", "浓度", "分析类型", "分析日期"],
        &substance_rows,
        NO_SUBSTANCES,
    );

    let disease_rows: Vec<Vec<String>> = bundle
        .diseases
        .iter()
        .map(|d| vec![d.disease.clone(), optional(d.analysis_date.as_deref())])
        .collect();
    push_section(&mut report, "检出疾病", &["疾病", "分析日期"], &disease_rows, NO_DISEASES);

    report
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn push_section(report: &mut String, title: &str, headers: &[&str], rows: &[Vec<String>], placeholder: &str) {
    report.push_str(&format!("--- {} ---\n", title));
    if rows.is_empty() {
        report.push_str(placeholder);
        report.push('\n');
    } else {
        report.push_str(&text_table(headers, rows));
    }
    report.push('\n');
}

/// 列对齐的文本表格，列宽按终端显示宽度计算（中日韩字符占两列）
pub fn text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&format_row(&header_cells, &widths));
    for row in rows {
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forense_core::{DiseaseFinding, ForensicCase, Patient, SubstanceReading};

    fn patient() -> Patient {
        Patient { id: 3, name: "Carla Ruiz".to_string(), blood_type: Some("O+".to_string()) }
    }

    #[test]
    fn test_empty_sections_render_placeholders() {
        let bundle = PatientBundle {
            patient: patient(),
            cases: vec![],
            substances: vec![],
            diseases: vec![],
        };
        let report = format_patient_report(&bundle, &LabelMap::default());

        assert!(report.contains("--- 患者资料 ---"));
        assert!(report.contains("Carla Ruiz"));
        assert!(report.contains(NO_CASES));
        assert!(report.contains(NO_SUBSTANCES));
        assert!(report.contains(NO_DISEASES));
        assert!(!report.contains("案件ID"));
    }

    #[test]
    fn test_full_report_tables() {
        let bundle = PatientBundle {
            patient: patient(),
            cases: vec![ForensicCase { id: 10, patient_id: 3, location: "Madrid".to_string() }],
            substances: vec![SubstanceReading {
                substance: "Medicamento X".to_string(),
                concentration: Some(3.0),
                analysis_type: Some("GC-MS".to_string()),
                analysis_date: Some("2024-01-05".to_string()),
            }],
            diseases: vec![DiseaseFinding {
                disease: "Hepatitis".to_string(),
                analysis_date: None,
            }],
        };
        let report = format_patient_report(&bundle, &LabelMap::new(LabelMap::default_remap()));

        assert!(report.contains("案件ID  地点"));
        assert!(report.contains("10      Madrid"));
        assert!(report.contains("Paracetamol"));
        assert!(!report.contains("Medicamento X"));
        assert!(report.contains("3.00"));
        assert!(report.contains("Hepatitis  -"));
        assert!(!report.contains(NO_CASES));
    }

    #[test]
    fn test_text_table_alignment() {
        let rows = vec![
            vec!["a".to_string(), "1".to_string()],
            vec!["long".to_string(), "22".to_string()],
        ];
        let table = text_table(&["k", "v"], &rows);
        assert_eq!(table, "k     v\na     1\nlong  22\n");
    }

    #[test]
    fn test_text_table_aligns_wide_headers() {
        let rows = vec![vec!["10".to_string(), "Madrid".to_string()]];
        let table = text_table(&["案件ID", "地点"], &rows);
        assert_eq!(table, "案件ID  地点\n10      Madrid\n");

        let lines: Vec<&str> = table.lines().collect();
        let header_col = lines[0].find("地点").map(|i| lines[0][..i].width());
        let row_col = lines[1].find("Madrid").map(|i| lines[1][..i].width());
        assert_eq!(header_col, Some(8));
        assert_eq!(header_col, row_col);
    }

    #[test]
    fn test_wide_cells_widen_column() {
        let rows = vec![vec!["未知".to_string(), "3".to_string()], vec!["O+".to_string(), "12".to_string()]];
        let table = text_table(&["血型", "n"], &rows);
        assert_eq!(table, "血型  n\n未知  3\nO+    12\n");
    }
}
