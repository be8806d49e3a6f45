use crate::error::{ConversionError, UsageError};
use std::path::{Path, PathBuf};

/// コマンドライン引数から一度だけ組み立てられる変換要求。
///
/// `new` を通してのみ生成でき、`-r` が `-d` なしで指定されていないことが保証される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    input_path: PathBuf,
    output_path: Option<PathBuf>,
    is_directory: bool,
    recursive: bool,
}

impl ConversionRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: Option<PathBuf>,
        is_directory: bool,
        recursive: bool,
    ) -> Result<Self, UsageError> {
        if recursive && !is_directory {
            return Err(UsageError::RecursiveWithoutDirectory);
        }
        Ok(Self {
            input_path: input_path.into(),
            output_path,
            is_directory,
            recursive,
        })
    }

    // --- ゲッターメソッド ---

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }
    pub fn recursive(&self) -> bool {
        self.recursive
    }
}

/// 変換元と変換先の組。発見されるたびに作られ、変換後に破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
}

impl FileJob {
    pub fn new(source_path: impl Into<PathBuf>, destination_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }
}

/// 1ファイル分の変換結果。
#[derive(Debug)]
pub enum Outcome {
    /// 書き込んだバイト数を保持する。
    Success { bytes_written: usize },
    Failure(ConversionError),
}

#[derive(Debug)]
pub struct ConversionResult {
    pub job: FileJob,
    pub outcome: Outcome,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// 失敗していればその理由を返す。
    pub fn failure(&self) -> Option<&ConversionError> {
        match &self.outcome {
            Outcome::Failure(e) => Some(e),
            Outcome::Success { .. } => None,
        }
    }
}
