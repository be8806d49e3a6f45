use super::path_error::PathError;
use crate::domain::output_path::has_msg_extension;
use std::fmt;
use std::path::{Path, PathBuf};

/// 単一ファイルモードで指定されたMSGファイルへのパス。
#[derive(Debug)]
pub struct MsgFilePath(PathBuf);

impl MsgFilePath {
    /// 新しい `MsgFilePath` インスタンスを生成する。
    ///
    /// パスが存在し、ファイルであることを検証する。
    /// 拡張子が `.msg` でない場合は警告を出すだけで、変換は試みる。
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PathError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(PathError::NotAFile(path.to_path_buf()));
        }
        if !has_msg_extension(path) {
            tracing::warn!(path = %path.display(), "file does not have a .msg extension");
            eprintln!(
                "警告: ファイル '{}' の拡張子は .msg ではありません",
                path.display()
            );
        }
        Ok(Self(path.to_path_buf()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for MsgFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
