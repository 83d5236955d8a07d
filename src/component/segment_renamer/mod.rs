//! 影片解析度重新命名元件
//!
//! 遞迴掃描資料夾，將檔名帶有解析度的 mp4 統一改名為 `segment_<res>p.mp4`

mod main;
mod outcome;
mod report;
mod resolution_matcher;

pub use main::{SegmentRenamer, rename_in_place};
pub use outcome::{RenameError, RenameOutcome, RenameSummary};
pub use report::{ConsoleReporter, RecordingReporter, RenameEvent, RenameReporter};
pub use resolution_matcher::{MP4_EXTENSION, Resolution, ResolutionMatcher, SEGMENT_PREFIX};
