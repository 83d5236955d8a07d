//! 重新命名結果型別

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 單一檔案重新命名失敗的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    /// 目標檔名已被同資料夾中的其他檔案佔用
    #[error("目標檔名已被佔用: {}", .target.display())]
    Collision { target: PathBuf },

    #[error("權限不足: {message}")]
    PermissionDenied { message: String },

    /// 來源檔案在掃描後消失
    #[error("來源檔案不存在: {message}")]
    SourceMissing { message: String },

    #[error("I/O 錯誤 ({kind}): {message}")]
    Io { kind: io::ErrorKind, message: String },
}

impl RenameError {
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::Collision { .. })
    }
}

impl From<io::Error> for RenameError {
    fn from(error: io::Error) -> Self {
        let message = error.to_string();
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { message },
            io::ErrorKind::NotFound => Self::SourceMissing { message },
            kind => Self::Io { kind, message },
        }
    }
}

/// 單一 mp4 檔案的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    /// dry run 模式下計畫中的重新命名
    WouldRename { from: PathBuf, to: PathBuf },
    /// 檔名已是標準格式
    AlreadyNamed { path: PathBuf },
    /// 檔名不含解析度
    Ignored { path: PathBuf },
    Failed {
        from: PathBuf,
        to: PathBuf,
        error: RenameError,
    },
}

/// 重新命名結果統計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameSummary {
    pub directories: usize,
    pub unreadable_directories: usize,
    pub files_found: usize,
    pub renamed: usize,
    pub would_rename: usize,
    pub already_named: usize,
    pub ignored: usize,
    pub failed: usize,
    /// 失敗中屬於檔名衝突的數量
    pub collisions: usize,
}

impl RenameSummary {
    pub fn record(&mut self, outcome: &RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed { .. } => self.renamed += 1,
            RenameOutcome::WouldRename { .. } => self.would_rename += 1,
            RenameOutcome::AlreadyNamed { .. } => self.already_named += 1,
            RenameOutcome::Ignored { .. } => self.ignored += 1,
            RenameOutcome::Failed { error, .. } => {
                self.failed += 1;
                if error.is_collision() {
                    self.collisions += 1;
                }
            }
        }
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
