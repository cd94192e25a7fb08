//! SVG 导出
//!
//! 生成自包含的 SVG 文档，所有文本经过转义。

use crate::escape;
use forense_report::{BarChart, HeatmapView, Orientation};

const BAR_THICKNESS: u32 = 24;
const BAR_GAP: u32 = 6;
const LABEL_WIDTH: u32 = 180;
const PLOT_LENGTH: u32 = 400;
const TITLE_HEIGHT: u32 = 40;
const AXIS_HEIGHT: u32 = 40;
const CELL_WIDTH: u32 = 56;
const CELL_HEIGHT: u32 = 28;

/// 由标题生成文件名：保留字母数字（含非 ASCII），其余字符折叠为 `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "chart".to_string()
    } else {
        slug
    }
}

/// 条形图 SVG
pub fn bar_chart_svg(chart: &BarChart) -> String {
    let max = chart.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1) as f64;
    let count = chart.bars.len() as u32;
    let span = count * (BAR_THICKNESS + BAR_GAP);

    let (width, height) = match chart.orientation {
        Orientation::Horizontal => (LABEL_WIDTH + PLOT_LENGTH + 60, TITLE_HEIGHT + span + AXIS_HEIGHT),
        Orientation::Vertical => (60 + span.max(PLOT_LENGTH / 2), TITLE_HEIGHT + PLOT_LENGTH + LABEL_WIDTH),
    };

    let mut body = String::new();
    for (i, bar) in chart.bars.iter().enumerate() {
        let offset = i as u32 * (BAR_THICKNESS + BAR_GAP);
        let length = ((bar.value.max(0) as f64 / max) * PLOT_LENGTH as f64).round() as u32;
        let label = escape(&bar.label);
        match chart.orientation {
            Orientation::Horizontal => {
                let y = TITLE_HEIGHT + offset;
                body.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"12\">{}</text>",
                    LABEL_WIDTH - 8,
                    y + BAR_THICKNESS / 2 + 4,
                    label
                ));
                body.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#4c78a8\"/>",
                    LABEL_WIDTH, y, length, BAR_THICKNESS
                ));
                body.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" font-size=\"12\">{}</text>",
                    LABEL_WIDTH + length + 4,
                    y + BAR_THICKNESS / 2 + 4,
                    bar.value
                ));
            }
            Orientation::Vertical => {
                let x = 40 + offset;
                let base = TITLE_HEIGHT + PLOT_LENGTH;
                body.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#4c78a8\"/>",
                    x,
                    base - length,
                    BAR_THICKNESS,
                    length
                ));
                body.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\">{}</text>",
                    x + BAR_THICKNESS / 2,
                    base - length - 4,
                    bar.value
                ));
                body.push_str(&format!(
                    "<text x=\"{cx}\" y=\"{cy}\" transform=\"rotate(45 {cx} {cy})\" font-size=\"12\">{label}</text>",
                    cx = x + BAR_THICKNESS / 2,
                    cy = base + 14,
                    label = label
                ));
            }
        }
    }

    document(width, height, &chart.title, &chart.x_label, &chart.y_label, &body)
}

/// 热力图 SVG，颜色深浅按单元格计数与最大值之比
pub fn heatmap_svg(view: &HeatmapView) -> String {
    let matrix = &view.matrix;
    let max = matrix.max_count().max(1) as f64;
    let width = LABEL_WIDTH + matrix.diseases.len() as u32 * CELL_WIDTH + 20;
    let height = TITLE_HEIGHT + LABEL_WIDTH / 2 + matrix.substances.len() as u32 * CELL_HEIGHT + AXIS_HEIGHT;
    let top = TITLE_HEIGHT + LABEL_WIDTH / 2;

    let mut body = String::new();
    for (col, disease) in matrix.diseases.iter().enumerate() {
        let cx = LABEL_WIDTH + col as u32 * CELL_WIDTH + CELL_WIDTH / 2;
        body.push_str(&format!(
            "<text x=\"{cx}\" y=\"{cy}\" transform=\"rotate(-45 {cx} {cy})\" font-size=\"12\">{label}</text>",
            cx = cx,
            cy = top - 6,
            label = escape(disease)
        ));
    }

    for (row, (substance, counts)) in matrix.substances.iter().zip(&matrix.counts).enumerate() {
        let y = top + row as u32 * CELL_HEIGHT;
        body.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"12\">{}</text>",
            LABEL_WIDTH - 8,
            y + CELL_HEIGHT / 2 + 4,
            escape(substance)
        ));
        for (col, count) in counts.iter().enumerate() {
            let x = LABEL_WIDTH + col as u32 * CELL_WIDTH;
            let ratio = *count as f64 / max;
            body.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"#ffffff\"/>",
                x,
                y,
                CELL_WIDTH,
                CELL_HEIGHT,
                heat_color(ratio)
            ));
            body.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\">{}</text>",
                x + CELL_WIDTH / 2,
                y + CELL_HEIGHT / 2 + 4,
                count
            ));
        }
    }

    document(width, height, &view.title, &view.x_label, &view.y_label, &body)
}

/// 从浅黄到深红的线性插值
fn heat_color(ratio: f64) -> String {
    let t = ratio.clamp(0.0, 1.0);
    let lerp = |from: f64, to: f64| (from + (to - from) * t).round() as u8;
    format!("#{:02x}{:02x}{:02x}", lerp(255.0, 189.0), lerp(255.0, 0.0), lerp(204.0, 38.0))
}

fn document(width: u32, height: u32, title: &str, x_label: &str, y_label: &str, body: &str) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" font-family=\"sans-serif\">",
            "<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>",
            "<text x=\"{mid}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"bold\">{title}</text>",
            "{body}",
            "<text x=\"{mid}\" y=\"{bottom}\" text-anchor=\"middle\" font-size=\"12\">{x_label}</text>",
            "<text x=\"14\" y=\"{vmid}\" transform=\"rotate(-90 14 {vmid})\" text-anchor=\"middle\" font-size=\"12\">{y_label}</text>",
            "</svg>\n"
        ),
        w = width,
        h = height,
        mid = width / 2,
        vmid = height / 2,
        bottom = height - 10,
        title = escape(title),
        x_label = escape(x_label),
        y_label = escape(y_label),
        body = body
    )
}
