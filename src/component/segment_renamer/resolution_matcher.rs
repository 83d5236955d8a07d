//! 解析度比對模組
//!
//! 負責從 mp4 檔名中擷取解析度並產生標準化的 segment 檔名

use regex::Regex;
use std::sync::LazyLock;

/// 副檔名（比對時不分大小寫）
pub const MP4_EXTENSION: &str = ".mp4";

/// 標準化檔名前綴
pub const SEGMENT_PREFIX: &str = "segment_";

static REGEX_RESOLUTION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)_?(\d{3,4})(p?)\.mp4$").expect("Invalid regex"));

/// 從檔名中擷取出的解析度
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// 3 或 4 位數字，例如 "360"、"1080"
    pub digits: String,
    /// 原始檔名是否帶有 "p"（僅供記錄，輸出一律補上 "p"）
    pub had_p_suffix: bool,
}

impl Resolution {
    /// 產生標準化檔名 `segment_<digits>p.mp4`
    #[must_use]
    pub fn segment_filename(&self) -> String {
        format!("{SEGMENT_PREFIX}{}p{MP4_EXTENSION}", self.digits)
    }
}

/// 解析度比對器
pub struct ResolutionMatcher {
    regex_resolution_suffix: &'static Regex,
}

impl Default for ResolutionMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionMatcher {
    pub fn new() -> Self {
        Self {
            regex_resolution_suffix: &REGEX_RESOLUTION_SUFFIX,
        }
    }

    /// 檔名是否以 .mp4 結尾（不分大小寫）
    #[must_use]
    pub fn is_mp4(&self, filename: &str) -> bool {
        filename.to_lowercase().ends_with(MP4_EXTENSION)
    }

    /// 擷取解析度
    ///
    /// # Arguments
    /// * `filename` - 檔名（含副檔名，不含目錄）
    ///
    /// # Returns
    /// 檔名結尾符合 `_?<3-4 位數字>p?.mp4` 時回傳解析度，否則 `None`
    #[must_use]
    pub fn extract(&self, filename: &str) -> Option<Resolution> {
        let captures = self.regex_resolution_suffix.captures(filename)?;
        let digits = captures.get(1)?.as_str().to_string();
        let had_p_suffix = captures.get(2).is_some_and(|m| !m.as_str().is_empty());

        Some(Resolution {
            digits,
            had_p_suffix,
        })
    }

    /// 直接產生目標檔名
    #[must_use]
    pub fn target_filename(&self, filename: &str) -> Option<String> {
        self.extract(filename).map(|resolution| resolution.segment_filename())
    }
}
