//! 進度回報模組
//!
//! 重新命名流程只透過 [`RenameReporter`] 發出事件，終端輸出與測試收集各自實作

use super::outcome::{RenameError, RenameSummary};
use console::style;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// 重新命名流程中的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    ScanStarted { root: PathBuf, dry_run: bool },
    DirectoryEntered { path: PathBuf },
    DirectoryUnreadable { path: PathBuf, reason: String },
    FileFound { path: PathBuf },
    Ignored { path: PathBuf },
    AlreadyNamed { path: PathBuf },
    RenameAttempt { from: PathBuf, to: PathBuf },
    Renamed { from: PathBuf, to: PathBuf },
    WouldRename { from: PathBuf, to: PathBuf },
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        error: RenameError,
    },
    Finished { summary: RenameSummary },
}

/// 事件接收端
pub trait RenameReporter {
    fn report(&mut self, event: &RenameEvent);
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// 同步寫入 log，讓 RUST_LOG 也能看到流程
fn log_event(event: &RenameEvent) {
    match event {
        RenameEvent::ScanStarted { root, dry_run } => {
            info!("開始掃描目錄: {} (試跑: {dry_run})", root.display());
        }
        RenameEvent::DirectoryEntered { path } => debug!("進入資料夾: {}", path.display()),
        RenameEvent::DirectoryUnreadable { path, reason } => {
            warn!("無法讀取資料夾 {}: {reason}", path.display());
        }
        RenameEvent::FileFound { path } => debug!("找到檔案: {}", path.display()),
        RenameEvent::Ignored { path } => debug!("略過（無解析度）: {}", path.display()),
        RenameEvent::AlreadyNamed { path } => debug!("已是標準檔名: {}", path.display()),
        RenameEvent::RenameAttempt { from, to } => {
            debug!("重新命名: {} -> {}", from.display(), to.display());
        }
        RenameEvent::Renamed { to, .. } => debug!("重新命名成功: {}", to.display()),
        RenameEvent::WouldRename { from, to } => {
            debug!("試跑: {} -> {}", from.display(), to.display());
        }
        RenameEvent::RenameFailed { from, error, .. } => {
            warn!("重新命名失敗 {}: {error}", from.display());
        }
        RenameEvent::Finished { summary } => info!(
            "處理完成 - 成功: {}, 已標準: {}, 略過: {}, 失敗: {}",
            summary.renamed, summary.already_named, summary.ignored, summary.failed
        ),
    }
}

/// 以人類可讀文字輸出到 stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub const fn new() -> Self {
        Self
    }

    fn print_summary(summary: &RenameSummary) {
        println!("{}", style("=== 重新命名結果 ===").cyan().bold());
        println!("  資料夾: {} 個", summary.directories);
        println!("  MP4 檔案: {} 個", summary.files_found);
        println!("  成功: {} 個", style(summary.renamed).green());
        if summary.would_rename > 0 {
            println!("  預計重新命名: {} 個", style(summary.would_rename).cyan());
        }
        println!("  已是標準檔名: {} 個", summary.already_named);
        println!("  略過: {} 個", style(summary.ignored).yellow());
        if summary.failed > 0 {
            println!(
                "  失敗: {} 個（其中 {} 個檔名衝突）",
                style(summary.failed).red(),
                summary.collisions
            );
        }
        if summary.unreadable_directories > 0 {
            println!(
                "  無法讀取的資料夾: {} 個",
                style(summary.unreadable_directories).red()
            );
        }
    }
}

impl RenameReporter for ConsoleReporter {
    fn report(&mut self, event: &RenameEvent) {
        log_event(event);

        match event {
            RenameEvent::ScanStarted { root, dry_run } => {
                println!(
                    "{} {}",
                    style("掃描根目錄:").cyan().bold(),
                    root.display()
                );
                if *dry_run {
                    println!("{}", style("試跑模式：不會重新命名任何檔案").yellow());
                }
                println!();
            }
            RenameEvent::DirectoryEntered { path } => {
                println!("{} {}", style("資料夾:").cyan(), path.display());
            }
            RenameEvent::DirectoryUnreadable { path, reason } => {
                println!(
                    "{} {} ({reason})",
                    style("無法讀取資料夾:").red(),
                    path.display()
                );
            }
            RenameEvent::FileFound { path } => {
                println!("   {} {}", style("找到檔案:").dim(), file_name(path));
            }
            RenameEvent::Ignored { .. } => {
                println!(
                    "   {}",
                    style("略過（檔名不含解析度）").yellow()
                );
            }
            RenameEvent::AlreadyNamed { .. } => {
                println!("   {}", style("已是標準檔名，無需處理").dim());
            }
            RenameEvent::RenameAttempt { from, to } => {
                println!(
                    "   {} {}  ->  {}",
                    style("重新命名:").cyan(),
                    file_name(from),
                    file_name(to)
                );
            }
            RenameEvent::Renamed { to, .. } => {
                println!("   {} {}", style("成功:").green(), file_name(to));
            }
            RenameEvent::WouldRename { from, to } => {
                println!(
                    "   {} {}  ->  {}",
                    style("預計重新命名:").cyan(),
                    file_name(from),
                    file_name(to)
                );
            }
            RenameEvent::RenameFailed { error, .. } => {
                println!("   {} {error}", style("重新命名失敗:").red());
            }
            RenameEvent::Finished { summary } => {
                println!("{}", style("處理完成：所有檔案皆已檢查").green().bold());
                println!();
                Self::print_summary(summary);
            }
        }
    }
}

/// 將事件保存在記憶體中，供測試或其他程式檢查
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<RenameEvent>,
}

impl RecordingReporter {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    #[must_use]
    pub fn events(&self) -> &[RenameEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<RenameEvent> {
        self.events
    }
}

impl RenameReporter for RecordingReporter {
    fn report(&mut self, event: &RenameEvent) {
        log_event(event);
        self.events.push(event.clone());
    }
}
