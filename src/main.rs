use anyhow::Result;
use clap::Parser;
use console::style;
use log::{info, warn};
use segment_renamer::component::SegmentRenamer;
use segment_renamer::component::segment_renamer::ConsoleReporter;
use segment_renamer::config::{ROOT_ENV_VAR, RenamerConfig, resolve_root};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "segment_renamer",
    version,
    about = "遞迴掃描資料夾，將帶有解析度的 MP4 檔案重新命名為 segment_<res>p.mp4"
)]
struct Cli {
    /// 要掃描的根目錄（在終端機中省略時會詢問）
    #[arg(env = ROOT_ENV_VAR)]
    root: Option<PathBuf>,

    /// 試跑：只列出預計的重新命名，不改動任何檔案
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// 任一檔案重新命名失敗時以狀態碼 1 結束
    #[arg(long)]
    strict: bool,

    /// 在 stderr 輸出除錯 log
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let root = resolve_root(cli.root)?;
    let config = RenamerConfig {
        dry_run: cli.dry_run,
        strict: cli.strict,
        ..RenamerConfig::new(root)?
    };

    let renamer = SegmentRenamer::new(config);
    let summary = renamer.run(&mut ConsoleReporter::new());

    if summary.has_failures() && renamer.config().strict {
        warn!("{} 個檔案重新命名失敗，以失敗狀態結束", summary.failed);
        return Ok(ExitCode::FAILURE);
    }

    info!("程式正常結束");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            warn!("程式錯誤: {e:#}");
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            ExitCode::FAILURE
        }
    }
}
