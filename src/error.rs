use crate::domain::eml_file::create_eml::SerializeError;
use crate::domain::input_source::path_error::PathError;
use crate::domain::msg_file::parse_msg::ParseError;
use std::io;
use thiserror::Error;

/// 引数の組み合わせが不正な場合のエラー。I/O を行う前に検出される。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("入力MSGファイルか -d でディレクトリを指定してください")]
    MissingInput,

    #[error("入力ファイルとディレクトリは同時に指定できません")]
    ConflictingInputs,

    #[error("-r/--recursive は -d/--directory と一緒に指定してください")]
    RecursiveWithoutDirectory,
}

/// 実行全体を中断させるエラー。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("引数エラー: {0}")]
    Usage(#[from] UsageError),

    #[error("入力が見つかりません: {0}")]
    NotFound(#[from] PathError),

    #[error("MSGファイルが見つかりませんでした: {0}")]
    NoMsgFiles(String),
}

impl AppError {
    /// スクリプトから判別できるように、エラーの種類をプロセスの終了コードに変換する。
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 1,
            AppError::NotFound(_) | AppError::NoMsgFiles(_) => 2,
        }
    }
}

/// 1ファイルの変換失敗の理由。実行全体は止めずに集計される。
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("MSGファイルを読み込めません: {0}")]
    Read(#[source] io::Error),

    #[error("MSGの解析に失敗しました: {0}")]
    Parse(#[from] ParseError),

    #[error("EMLの生成に失敗しました: {0}")]
    Serialize(#[from] SerializeError),

    #[error("出力ディレクトリを作成できません: {0}")]
    CreateDir(#[source] io::Error),

    #[error("EMLファイルを書き込めません: {0}")]
    Write(#[source] io::Error),
}
