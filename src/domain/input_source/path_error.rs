use std::fmt;
use std::path::PathBuf;

// 入力パスの検証・走査で発生するエラー
#[derive(Debug)]
pub enum PathError {
    NotFound(PathBuf),
    NotADirectory(PathBuf),
    NotAFile(PathBuf),
    // ディレクトリ走査中のエラー（読み取り権限のないサブディレクトリなど）
    Walk(walkdir::Error),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NotFound(p) => write!(f, "パス '{}' は存在しません。", p.display()),
            PathError::NotADirectory(p) => {
                write!(f, "パス '{}' はディレクトリではありません。", p.display())
            }
            PathError::NotAFile(p) => write!(f, "パス '{}' はファイルではありません。", p.display()),
            PathError::Walk(e) => match e.path() {
                Some(p) => write!(f, "'{}' の走査に失敗しました: {}", p.display(), e),
                None => write!(f, "走査に失敗しました: {}", e),
            },
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::Walk(e) => Some(e),
            _ => None,
        }
    }
}
