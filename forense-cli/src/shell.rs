//! 交互菜单

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use forense_core::{ForenseError, QueryCatalog, Result};
use forense_report::{Prompter, ReportAssembler, ReportOutcome, Renderer};
use std::io::{ErrorKind, Write};
use tracing::{error, info};

/// 菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Frequency,
    Search,
    Heatmap,
    Locations,
    BloodTypes,
    PatientReport,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Frequency,
        MenuChoice::Search,
        MenuChoice::Heatmap,
        MenuChoice::Locations,
        MenuChoice::BloodTypes,
        MenuChoice::PatientReport,
        MenuChoice::Exit,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuChoice::Frequency => "显示最常见的物质",
            MenuChoice::Search => "搜索并显示指定物质的检出情况",
            MenuChoice::Heatmap => "显示物质与疾病的关联",
            MenuChoice::Locations => "显示法医案件的地点分布（含地图）",
            MenuChoice::BloodTypes => "显示法医案件中的血型分布",
            MenuChoice::PatientReport => "生成患者详细报告",
            MenuChoice::Exit => "退出",
        }
    }
}

/// 菜单文本
pub fn menu_text() -> String {
    let mut text = String::from("\n--- 法医血样交互分析 ---\n");
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, choice.title()));
    }
    text
}

/// 运行菜单循环，直到用户确认退出或输入结束
pub async fn run<C, R, W>(
    assembler: &mut ReportAssembler<C, R>,
    prompter: &mut dyn Prompter,
    out: &mut W,
) -> Result<()>
where
    C: QueryCatalog,
    R: Renderer,
    W: Write,
{
    loop {
        write!(out, "{}", menu_text())?;
        out.flush()?;

        let Some(answer) = prompter.input(&format!("选择一个选项 (1-{})", MenuChoice::ALL.len()))? else {
            info!("Input closed, leaving menu");
            break;
        };

        let Some(choice) = MenuChoice::parse(&answer) else {
            writeln!(out, "无效选项，请重试。")?;
            continue;
        };

        let outcome = match choice {
            MenuChoice::Exit => {
                if prompter.confirm("确定要退出吗?")? {
                    writeln!(out, "正在退出程序...")?;
                    break;
                }
                continue;
            }
            MenuChoice::Frequency => assembler.substance_frequency().await,
            MenuChoice::Search => assembler.substance_search(prompter).await,
            MenuChoice::Heatmap => assembler.substance_disease_heatmap().await,
            MenuChoice::Locations => assembler.cases_by_location().await,
            MenuChoice::BloodTypes => assembler.blood_type_distribution().await,
            MenuChoice::PatientReport => assembler.patient_report(prompter).await,
        };

        match outcome {
            Ok(ReportOutcome::Cancelled) => writeln!(out, "已取消。")?,
            Ok(outcome) => {
                if let Some(message) = outcome.message() {
                    writeln!(out, "{}", message)?;
                }
            }
            Err(e) => {
                error!(choice = ?choice, error = %e, "Report failed");
                writeln!(out, "操作失败: {}", e)?;
            }
        }
    }

    Ok(())
}

/// 基于 dialoguer 的终端提示器
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// 输入流结束视为取消
fn interaction<T>(result: std::result::Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(ForenseError::Interaction(e.to_string())),
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        interaction(
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text(),
        )
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        let selected = interaction(
            Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .default(0)
                .interact_opt(),
        )?;
        Ok(selected.flatten())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let confirmed = interaction(
            Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(false)
                .interact(),
        )?;
        // 输入结束时直接退出
        Ok(confirmed.unwrap_or(true))
    }
}
