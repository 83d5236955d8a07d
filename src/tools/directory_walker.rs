use log::warn;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 單一資料夾與其直屬檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub path: PathBuf,
    /// 依名稱排序的檔案名稱（含指向檔案的符號連結）
    pub file_names: Vec<OsString>,
    /// 讀取失敗時的錯誤訊息
    pub read_error: Option<String>,
}

impl DirectoryListing {
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            file_names: Vec::new(),
            read_error: None,
        }
    }
}

/// 一般檔案，或不指向資料夾的符號連結
fn is_file_like(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && !entry.path().is_dir())
}

#[derive(Default)]
struct ListingBuilder {
    listings: Vec<DirectoryListing>,
    index: HashMap<PathBuf, usize>,
}

impl ListingBuilder {
    fn slot(&mut self, path: &Path) -> usize {
        if let Some(&slot) = self.index.get(path) {
            return slot;
        }
        self.listings.push(DirectoryListing::new(path.to_path_buf()));
        let slot = self.listings.len() - 1;
        self.index.insert(path.to_path_buf(), slot);
        slot
    }

    fn add_file(&mut self, parent: &Path, file_name: OsString) {
        if let Some(&slot) = self.index.get(parent) {
            self.listings[slot].file_names.push(file_name);
        }
    }

    /// 走訪錯誤只有發生在資料夾上時才標記為無法讀取，
    /// 其餘錯誤記錄後略過，已收集的檔案保留
    fn record_error(&mut self, path: Option<&Path>, reason: String) {
        match path {
            Some(path) if path.is_dir() => {
                let slot = self.slot(path);
                self.listings[slot].read_error = Some(reason);
            }
            Some(path) => warn!("略過無法讀取的項目 {}: {reason}", path.display()),
            None => warn!("走訪時發生錯誤: {reason}"),
        }
    }
}

/// 遞迴列出 `root` 底下所有資料夾（含 `root` 本身）
///
/// 整棵樹會先完整列出再回傳，之後的重新命名不會影響已列出的內容。
/// 無法讀取的子資料夾不會中斷走訪，而是記錄在 `read_error`。
pub fn list_directories(root: &Path) -> Vec<DirectoryListing> {
    let mut builder = ListingBuilder::default();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                builder.record_error(err.path(), err.to_string());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            builder.slot(entry.path());
        } else if is_file_like(&entry) {
            let Some(parent) = entry.path().parent() else {
                continue;
            };
            builder.add_file(parent, entry.file_name().to_owned());
        }
    }

    builder.listings
}
