//! 在默认浏览器中打开文件

use forense_core::{ForenseError, Result};
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::thread::JoinHandle;
use tracing::debug;

/// 用系统默认浏览器打开本地文件
pub fn open_browser(path: &Path) -> Result<()> {
    let target = path.to_string_lossy().to_string();
    debug!(target = %target, "Opening browser");

    #[cfg(target_os = "macos")]
    {
        spawn_detached(Command::new("open").arg(&target))
            .map_err(|e| ForenseError::Render(format!("无法打开浏览器: {}", e)))?;
    }

    #[cfg(target_os = "linux")]
    {
        let browsers = ["xdg-open", "firefox", "chromium", "google-chrome", "x-www-browser"];
        let opened = browsers
            .iter()
            .any(|browser| spawn_detached(Command::new(browser).arg(&target)).is_ok());

        if !opened {
            return Err(ForenseError::Render(
                "未找到可用的浏览器，请安装 xdg-open 或其他浏览器".to_string(),
            ));
        }
    }

    #[cfg(target_os = "windows")]
    {
        spawn_detached(Command::new("cmd").args(["/C", "start", "", &target]))
            .map_err(|e| ForenseError::Render(format!("无法打开浏览器: {}", e)))?;
    }

    Ok(())
}

/// 启动子进程并在后台线程中等待其退出，避免留下僵尸进程
fn spawn_detached(command: &mut Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command.spawn()?;
    let pid = child.id();
    let handle = std::thread::spawn(move || {
        let status = child.wait();
        debug!(pid, ?status, "Browser launcher exited");
        status
    });
    Ok(handle)
}
