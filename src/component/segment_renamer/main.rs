//! 解析度重新命名主模組
//!
//! 走訪資料夾樹，將帶有解析度的 mp4 檔案改名為 `segment_<res>p.mp4`

use super::outcome::{RenameError, RenameOutcome, RenameSummary};
use super::report::{RenameEvent, RenameReporter};
use super::resolution_matcher::ResolutionMatcher;
use crate::config::RenamerConfig;
use crate::tools::{DirectoryListing, list_directories};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

/// 解析度重新命名器
pub struct SegmentRenamer {
    config: RenamerConfig,
    matcher: ResolutionMatcher,
}

impl SegmentRenamer {
    pub fn new(config: RenamerConfig) -> Self {
        Self {
            config,
            matcher: ResolutionMatcher::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RenamerConfig {
        &self.config
    }

    /// 執行整棵樹的重新命名
    ///
    /// 單一檔案的失敗只會記錄在結果中，不會中斷走訪。
    pub fn run(&self, reporter: &mut dyn RenameReporter) -> RenameSummary {
        let root = &self.config.root;
        reporter.report(&RenameEvent::ScanStarted {
            root: root.clone(),
            dry_run: self.config.dry_run,
        });

        let summary = self.process_listings(&list_directories(root), reporter);

        reporter.report(&RenameEvent::Finished {
            summary: summary.clone(),
        });
        summary
    }

    fn process_listings(
        &self,
        listings: &[DirectoryListing],
        reporter: &mut dyn RenameReporter,
    ) -> RenameSummary {
        let mut summary = RenameSummary::default();
        for listing in listings {
            self.process_directory(listing, &mut summary, reporter);
        }
        summary
    }

    fn process_directory(
        &self,
        listing: &DirectoryListing,
        summary: &mut RenameSummary,
        reporter: &mut dyn RenameReporter,
    ) {
        if let Some(reason) = &listing.read_error {
            summary.unreadable_directories += 1;
            reporter.report(&RenameEvent::DirectoryUnreadable {
                path: listing.path.clone(),
                reason: reason.clone(),
            });
            if listing.file_names.is_empty() {
                return;
            }
        }

        summary.directories += 1;
        reporter.report(&RenameEvent::DirectoryEntered {
            path: listing.path.clone(),
        });

        // 本次執行中已被認領的目標檔名
        let mut claimed: HashSet<OsString> = HashSet::new();

        for file_name in &listing.file_names {
            let name = file_name.to_string_lossy();
            if !self.matcher.is_mp4(&name) {
                continue;
            }

            summary.files_found += 1;
            reporter.report(&RenameEvent::FileFound {
                path: listing.path.join(file_name),
            });

            let outcome = self.rename_file(&listing.path, file_name, &mut claimed, reporter);
            summary.record(&outcome);
        }
    }

    /// 處理單一 mp4 檔案並回報結果
    fn rename_file(
        &self,
        directory: &Path,
        file_name: &OsStr,
        claimed: &mut HashSet<OsString>,
        reporter: &mut dyn RenameReporter,
    ) -> RenameOutcome {
        let old_path = directory.join(file_name);

        let Some(new_name) = self.matcher.target_filename(&file_name.to_string_lossy()) else {
            reporter.report(&RenameEvent::Ignored {
                path: old_path.clone(),
            });
            return RenameOutcome::Ignored { path: old_path };
        };
        let new_path = directory.join(&new_name);

        if old_path == new_path {
            claimed.insert(OsString::from(new_name));
            reporter.report(&RenameEvent::AlreadyNamed {
                path: old_path.clone(),
            });
            return RenameOutcome::AlreadyNamed { path: old_path };
        }

        reporter.report(&RenameEvent::RenameAttempt {
            from: old_path.clone(),
            to: new_path.clone(),
        });

        let result = if claimed.contains(OsStr::new(&new_name))
            || is_taken_by_other_file(&old_path, &new_path)
        {
            Err(RenameError::Collision {
                target: new_path.clone(),
            })
        } else if self.config.dry_run {
            claimed.insert(OsString::from(new_name));
            reporter.report(&RenameEvent::WouldRename {
                from: old_path.clone(),
                to: new_path.clone(),
            });
            return RenameOutcome::WouldRename {
                from: old_path,
                to: new_path,
            };
        } else {
            rename_in_place(&old_path, &new_path).inspect(|_| {
                claimed.insert(OsString::from(new_name));
            })
        };

        match result {
            Ok(()) => {
                reporter.report(&RenameEvent::Renamed {
                    from: old_path.clone(),
                    to: new_path.clone(),
                });
                RenameOutcome::Renamed {
                    from: old_path,
                    to: new_path,
                }
            }
            Err(error) => {
                reporter.report(&RenameEvent::RenameFailed {
                    from: old_path.clone(),
                    to: new_path.clone(),
                    error: error.clone(),
                });
                RenameOutcome::Failed {
                    from: old_path,
                    to: new_path,
                    error,
                }
            }
        }
    }
}

/// 在同一資料夾內重新命名
pub fn rename_in_place(from: &Path, to: &Path) -> Result<(), RenameError> {
    fs::rename(from, to).map_err(RenameError::from)
}

/// 目標路徑是否已被「另一個」檔案佔用
///
/// 不分大小寫的檔案系統上，只改大小寫時目標會指向來源本身，不算衝突。
fn is_taken_by_other_file(source: &Path, target: &Path) -> bool {
    let Ok(target_meta) = fs::symlink_metadata(target) else {
        return false;
    };
    let Ok(source_meta) = fs::symlink_metadata(source) else {
        return true;
    };
    !same_file(source, &source_meta, target, &target_meta)
}

#[cfg(unix)]
fn same_file(_: &Path, source: &fs::Metadata, _: &Path, target: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    source.dev() == target.dev() && source.ino() == target.ino()
}

#[cfg(not(unix))]
fn same_file(source: &Path, _: &fs::Metadata, target: &Path, _: &fs::Metadata) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::segment_renamer::report::RecordingReporter;
    use tempfile::TempDir;

    fn renamer(root: &Path, dry_run: bool) -> SegmentRenamer {
        SegmentRenamer::new(RenamerConfig {
            dry_run,
            ..RenamerConfig::new(root).unwrap()
        })
    }

    #[test]
    fn test_vanished_source_fails_and_later_files_still_rename() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("b_720.mp4"), b"b").unwrap();

        // a_360.mp4 在列出後、重新命名前被移除
        let listing = DirectoryListing {
            path: root.to_path_buf(),
            file_names: vec![OsString::from("a_360.mp4"), OsString::from("b_720.mp4")],
            read_error: None,
        };

        let mut reporter = RecordingReporter::new();
        let summary = renamer(root, false).process_listings(&[listing], &mut reporter);

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.collisions, 0);
        assert_eq!(summary.renamed, 1);
        assert!(root.join("segment_720p.mp4").exists());

        let outcomes: Vec<&RenameEvent> = reporter
            .events()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    RenameEvent::RenameFailed { .. } | RenameEvent::Renamed { .. }
                )
            })
            .collect();
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0],
            RenameEvent::RenameFailed {
                error: RenameError::SourceMissing { .. },
                ..
            }
        ));
        assert_eq!(
            outcomes[1],
            &RenameEvent::Renamed {
                from: root.join("b_720.mp4"),
                to: root.join("segment_720p.mp4"),
            }
        );
    }

    #[test]
    fn test_unreadable_listing_still_processes_collected_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("clip_360.mp4"), b"a").unwrap();

        let listing = DirectoryListing {
            path: root.to_path_buf(),
            file_names: vec![OsString::from("clip_360.mp4")],
            read_error: Some("read interrupted".to_string()),
        };

        let mut reporter = RecordingReporter::new();
        let summary = renamer(root, false).process_listings(&[listing], &mut reporter);

        assert_eq!(summary.unreadable_directories, 1);
        assert_eq!(summary.renamed, 1);
        assert!(root.join("segment_360p.mp4").exists());
    }

    #[test]
    fn test_rename_file_renames_matching_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("clip_360.mp4"), b"video").unwrap();

        let mut reporter = RecordingReporter::new();
        let mut claimed = HashSet::new();
        let outcome = renamer(root, false).rename_file(
            root,
            OsStr::new("clip_360.mp4"),
            &mut claimed,
            &mut reporter,
        );

        assert_eq!(
            outcome,
            RenameOutcome::Renamed {
                from: root.join("clip_360.mp4"),
                to: root.join("segment_360p.mp4"),
            }
        );
        assert!(root.join("segment_360p.mp4").exists());
        assert!(!root.join("clip_360.mp4").exists());
        assert!(claimed.contains(OsStr::new("segment_360p.mp4")));
    }

    #[test]
    fn test_rename_file_already_named_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("segment_480p.mp4"), b"video").unwrap();

        let mut reporter = RecordingReporter::new();
        let outcome = renamer(root, false).rename_file(
            root,
            OsStr::new("segment_480p.mp4"),
            &mut HashSet::new(),
            &mut reporter,
        );

        assert_eq!(
            outcome,
            RenameOutcome::AlreadyNamed {
                path: root.join("segment_480p.mp4"),
            }
        );
        assert_eq!(
            reporter.events(),
            &[RenameEvent::AlreadyNamed {
                path: root.join("segment_480p.mp4"),
            }]
        );
    }

    #[test]
    fn test_rename_file_existing_target_is_collision() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("segment_360p.mp4"), b"first").unwrap();
        fs::write(root.join("b_360.mp4"), b"second").unwrap();

        let mut reporter = RecordingReporter::new();
        let outcome = renamer(root, false).rename_file(
            root,
            OsStr::new("b_360.mp4"),
            &mut HashSet::new(),
            &mut reporter,
        );

        assert!(matches!(
            outcome,
            RenameOutcome::Failed {
                error: RenameError::Collision { .. },
                ..
            }
        ));
        assert_eq!(fs::read(root.join("segment_360p.mp4")).unwrap(), b"first");
        assert_eq!(fs::read(root.join("b_360.mp4")).unwrap(), b"second");
    }

    #[test]
    fn test_rename_file_missing_source_is_typed_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let mut reporter = RecordingReporter::new();
        let outcome = renamer(root, false).rename_file(
            root,
            OsStr::new("gone_720.mp4"),
            &mut HashSet::new(),
            &mut reporter,
        );

        assert!(matches!(
            outcome,
            RenameOutcome::Failed {
                error: RenameError::SourceMissing { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_dry_run_claims_target_without_renaming() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a_360.mp4"), b"a").unwrap();
        fs::write(root.join("b_360.mp4"), b"b").unwrap();

        let renamer = renamer(root, true);
        let mut reporter = RecordingReporter::new();
        let mut claimed = HashSet::new();

        let first = renamer.rename_file(root, OsStr::new("a_360.mp4"), &mut claimed, &mut reporter);
        let second =
            renamer.rename_file(root, OsStr::new("b_360.mp4"), &mut claimed, &mut reporter);

        assert!(matches!(first, RenameOutcome::WouldRename { .. }));
        assert!(matches!(
            second,
            RenameOutcome::Failed {
                error: RenameError::Collision { .. },
                ..
            }
        ));
        assert!(root.join("a_360.mp4").exists());
        assert!(!root.join("segment_360p.mp4").exists());
    }

    #[test]
    fn test_rename_in_place_reports_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let err = rename_in_place(
            &temp_dir.path().join("a_360.mp4"),
            &temp_dir.path().join("segment_360p.mp4"),
        )
        .unwrap_err();
        assert!(matches!(err, RenameError::SourceMissing { .. }));
    }

    #[test]
    fn test_is_taken_by_other_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let source = root.join("a_360.mp4");
        let target = root.join("segment_360p.mp4");
        fs::write(&source, b"a").unwrap();

        assert!(!is_taken_by_other_file(&source, &target));
        assert!(!is_taken_by_other_file(&source, &source));

        fs::write(&target, b"other").unwrap();
        assert!(is_taken_by_other_file(&source, &target));
    }
}
