use crate::tools::validate_directory_exists;
use anyhow::Result;
use std::path::PathBuf;

/// 重新命名執行設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamerConfig {
    /// 要掃描的根目錄
    pub root: PathBuf,
    /// 只回報計畫，不實際重新命名
    pub dry_run: bool,
    /// 任一檔案失敗時以非零狀態結束
    pub strict: bool,
}

impl RenamerConfig {
    /// 建立設定，`root` 必須是可讀取的資料夾
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        validate_directory_exists(&root)?;
        Ok(Self {
            root,
            dry_run: false,
            strict: false,
        })
    }
}
