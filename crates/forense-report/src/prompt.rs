//! 交互提示接口
//!
//! 由外部交互层实现（终端、测试脚本）。返回 `None` 表示用户取消或输入流结束。

use forense_core::Result;

/// 交互提示器
pub trait Prompter {
    /// 自由文本输入
    fn input(&mut self, prompt: &str) -> Result<Option<String>>;

    /// 从列表中直接选择，返回零起始下标
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    /// 是/否确认
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}
