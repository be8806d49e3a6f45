use crate::domain::models::ConversionRequest;
use crate::error::UsageError;
use clap::Parser;
use std::path::PathBuf;

/// Outlook の MSG ファイルを EML 形式に変換するツール
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "例:\n  \
        msg2eml message.msg                    # message.eml に変換\n  \
        msg2eml message.msg -o output.eml      # 出力ファイルを指定\n  \
        msg2eml -d input_folder                # フォルダ内のMSGをすべて変換\n  \
        msg2eml -d input_folder -o output_dir  # 出力先フォルダを指定\n  \
        msg2eml -d input_folder -r             # サブフォルダも再帰的に処理"
)]
pub struct Args {
    /// 変換するMSGファイルのパス
    pub input: Option<PathBuf>,

    /// 出力EMLファイル、または出力先ディレクトリ (オプション: デフォルトは入力と同じ場所)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// このディレクトリ内のMSGファイルをすべて変換する
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// サブディレクトリも再帰的に処理する (-d と併用)
    #[arg(short, long)]
    pub recursive: bool,

    /// 診断ログを詳しく出力する (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// 引数の組み合わせを検証し、変換要求に変換する。
    pub fn to_request(&self) -> Result<ConversionRequest, UsageError> {
        match (&self.input, &self.directory) {
            (Some(_), Some(_)) => Err(UsageError::ConflictingInputs),
            (None, None) => Err(UsageError::MissingInput),
            (Some(file), None) => {
                ConversionRequest::new(file, self.output.clone(), false, self.recursive)
            }
            (None, Some(dir)) => {
                ConversionRequest::new(dir, self.output.clone(), true, self.recursive)
            }
        }
    }
}
