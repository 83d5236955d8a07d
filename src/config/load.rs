use anyhow::{Result, bail};
use console::Term;
use dialoguer::Input;
use std::path::PathBuf;

/// 未提供命令列參數時讀取的環境變數
pub const ROOT_ENV_VAR: &str = "SEGMENT_RENAMER_ROOT";

/// 決定根目錄
///
/// 優先使用命令列參數（clap 已處理環境變數後備），
/// 都沒有時若在互動終端機中則詢問使用者，否則回傳錯誤。
pub fn resolve_root(from_args: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = from_args {
        return Ok(root);
    }

    let term = Term::stdout();
    if !term.is_term() {
        bail!("未指定根目錄：請傳入 ROOT 參數或設定 {ROOT_ENV_VAR}");
    }

    prompt_root()
}

fn prompt_root() -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("請輸入要掃描的資料夾路徑")
        .interact_text()?;
    let path = path.trim();
    if path.is_empty() {
        bail!("未指定根目錄");
    }
    Ok(PathBuf::from(path))
}
