//! 终端渲染器

use crate::map_html::MapWriter;
use crate::svg;
use forense_core::Result;
use forense_report::patient_report::text_table;
use forense_report::{BarChart, HeatmapView, MapView, Renderer, TextReport};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

/// 将报告视图输出到终端；可选地同时导出 SVG
pub struct TerminalRenderer<W: Write> {
    out: W,
    bar_width: usize,
    svg_dir: Option<PathBuf>,
    map_writer: MapWriter,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, bar_width: usize, map_writer: MapWriter) -> Self {
        Self {
            out,
            bar_width: bar_width.max(1),
            svg_dir: None,
            map_writer,
        }
    }

    pub fn with_svg_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.svg_dir = dir;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== {} ===", title)?;
        Ok(())
    }

    fn export_svg(&mut self, title: &str, document: impl FnOnce() -> String) -> Result<()> {
        let Some(dir) = self.svg_dir.as_deref() else {
            return Ok(());
        };
        let path = write_svg(dir, title, &document())?;
        writeln!(self.out, "SVG 已保存: {}", path.display())?;
        Ok(())
    }
}

fn write_svg(dir: &Path, title: &str, document: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.svg", svg::slugify(title)));
    std::fs::write(&path, document)?;
    debug!(path = %path.display(), "SVG exported");
    Ok(path)
}

/// 按最大值缩放的条形长度；非零值至少占一格
fn scaled(value: i64, max: i64, width: usize) -> usize {
    if value <= 0 || max <= 0 {
        return 0;
    }
    let len = (value as f64 / max as f64 * width as f64).round() as usize;
    len.max(1)
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn bar_chart(&mut self, chart: &BarChart) -> Result<()> {
        self.heading(&chart.title)?;
        writeln!(self.out, "({} / {})", chart.y_label, chart.x_label)?;

        let label_width = chart.bars.iter().map(|b| b.label.width()).max().unwrap_or(0);
        let max = chart.bars.iter().map(|b| b.value).max().unwrap_or(0);
        for bar in &chart.bars {
            let pad = label_width - bar.label.width();
            writeln!(
                self.out,
                "{}{}  {} {}",
                bar.label,
                " ".repeat(pad),
                "#".repeat(scaled(bar.value, max, self.bar_width)),
                bar.value
            )?;
        }

        self.export_svg(&chart.title, || svg::bar_chart_svg(chart))
    }

    fn heatmap(&mut self, view: &HeatmapView) -> Result<()> {
        self.heading(&view.title)?;
        writeln!(self.out, "(行: {} / 列: {})", view.y_label, view.x_label)?;

        let matrix = &view.matrix;
        let mut headers: Vec<&str> = vec![""];
        headers.extend(matrix.diseases.iter().map(String::as_str));
        let rows: Vec<Vec<String>> = matrix
            .substances
            .iter()
            .zip(&matrix.counts)
            .map(|(substance, counts)| {
                std::iter::once(substance.clone())
                    .chain(counts.iter().map(|c| c.to_string()))
                    .collect()
            })
            .collect();
        write!(self.out, "{}", text_table(&headers, &rows))?;

        self.export_svg(&view.title, || svg::heatmap_svg(view))
    }

    fn map(&mut self, view: &MapView) -> Result<()> {
        let path = self.map_writer.write(view)?.to_path_buf();
        let unmapped = view.markers.iter().filter(|m| !m.mapped).count();
        writeln!(self.out, "地图已生成: {}", path.display())?;
        if unmapped > 0 {
            writeln!(self.out, "{} 个地点没有坐标，已标注在 (0, 0)", unmapped)?;
        }
        info!(unmapped, "Map rendered");
        Ok(())
    }

    fn text(&mut self, report: &TextReport) -> Result<()> {
        self.heading(&report.title)?;
        write!(self.out, "{}", report.body)?;
        self.out.flush()?;
        Ok(())
    }
}
