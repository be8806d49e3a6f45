//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! ファイル探索 → 1件ずつの変換 → 集計 という処理フローを実装します。

use crate::domain::converter::Converter;
use crate::domain::eml_file::create_eml::EmlSerializer;
use crate::domain::input_source::input_source::InputSource;
use crate::domain::input_source::path_error::PathError;
use crate::domain::models::{ConversionRequest, ConversionResult, Outcome};
use crate::domain::msg_file::parse_msg::MessageParser;
use crate::error::AppError;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// 1回の実行の集計結果。
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<ConversionResult>,
    /// 走査中に読めなかったエントリ。失敗として数える。
    pub scan_errors: Vec<PathError>,
    /// 割り込みにより途中で打ち切ったか。
    pub interrupted: bool,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded() + self.scan_errors.len()
    }

    /// すべて成功していれば 0、失敗または中断があれば 1。
    pub fn exit_code(&self) -> u8 {
        if self.failed() == 0 && !self.interrupted {
            0
        } else {
            1
        }
    }

    /// 件数と失敗の一覧を書き出す。
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        if self.interrupted {
            writeln!(out, "中断されました。処理済みの結果のみを表示します。")?;
        }
        writeln!(
            out,
            "完了: {} 件成功, {} 件失敗",
            self.succeeded(),
            self.failed()
        )?;
        for result in &self.results {
            if let Some(reason) = result.failure() {
                writeln!(out, "  ✗ {}: {}", result.job.source_path.display(), reason)?;
            }
        }
        for error in &self.scan_errors {
            writeln!(out, "  ✗ {}", error)?;
        }
        Ok(())
    }
}

// --- public な main 関数 ---

/// 変換要求を最後まで実行します。
///
/// # 引数
/// * `request`: コマンドライン引数から組み立てた変換要求。
/// * `converter`: 1ファイルずつの変換を担う変換器。
/// * `interrupted`: Ctrl-C で立つフラグ。次のジョブに進む前に確認する。
///
/// # 戻り値
/// * `Ok(RunSummary)`: 1件以上のジョブを処理した（個々の失敗を含む）場合。
/// * `Err(AppError)`: 入力パスが存在しない、または変換対象が1件もない場合。
pub fn run<P, S>(
    request: &ConversionRequest,
    converter: &Converter<P, S>,
    interrupted: &AtomicBool,
) -> Result<RunSummary, AppError>
where
    P: MessageParser,
    S: EmlSerializer,
{
    // 1. 入力パスの検証とジョブの列挙
    tracing::debug!(input = %request.input_path().display(), "discovering input");
    let source = InputSource::from_request(request)?;
    let mut jobs = source.into_jobs().peekable();
    if jobs.peek().is_none() {
        return Err(AppError::NoMsgFiles(
            request.input_path().display().to_string(),
        ));
    }

    // 2. 1件ずつ変換
    let mut summary = RunSummary::default();
    for item in jobs {
        if interrupted.load(Ordering::SeqCst) {
            tracing::info!("interrupted, skipping remaining jobs");
            summary.interrupted = true;
            break;
        }

        let job = match item {
            Ok(job) => job,
            Err(e) => {
                // 読めないサブディレクトリがあっても、残りの走査は続ける
                tracing::warn!(error = %e, "skipping unreadable entry");
                eprintln!("[警告] {}", e);
                summary.scan_errors.push(e);
                continue;
            }
        };

        tracing::debug!(source = %job.source_path.display(), "converting");
        let result = converter.convert(&job);
        match &result.outcome {
            Outcome::Success { .. } => println!(
                "✓ 変換完了: {} -> {}",
                job.source_path.display(),
                job.destination_path.display()
            ),
            Outcome::Failure(e) => eprintln!(
                "エラー: '{}' の変換に失敗しました: {}",
                job.source_path.display(),
                e
            ),
        }
        summary.results.push(result);
    }

    // 3. 集計
    tracing::info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "run finished"
    );
    Ok(summary)
}
