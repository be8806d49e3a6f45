//! 変換先パスの導出。ファイルシステムには `-o` がディレクトリかどうかの確認以外触れない。

use std::path::{Path, PathBuf};

pub const EML_EXTENSION: &str = "eml";
pub const MSG_EXTENSION: &str = "msg";

/// 拡張子が `.msg` か（大文字小文字は区別しない）。
///
/// ファイル名が UTF-8 でなくても判定できるよう、`OsStr` のまま比較する。
pub fn has_msg_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(MSG_EXTENSION))
        .unwrap_or(false)
}

/// 末尾がパス区切り文字か（`out/` のように、まだ存在しないディレクトリを指す指定）。
fn names_directory(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(|c| c == '/' || c == std::path::MAIN_SEPARATOR)
}

/// 拡張子を `.eml` に置き換えたパスを返す。拡張子がなければ付け足す。
pub fn eml_path(path: &Path) -> PathBuf {
    path.with_extension(EML_EXTENSION)
}

/// 単一ファイルモードの変換先。
///
/// * `-o` が既存のディレクトリ、または区切り文字で終わるなら、その中に `<元のファイル名>.eml` を置く。
///   存在しないディレクトリは書き込み時に作成される。
/// * `-o` がそれ以外なら、指定されたパスをそのまま使う。
/// * `-o` がなければ、元ファイルの隣に `.eml` を置く。
pub fn single_file_destination(source: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(out) if out.is_dir() || names_directory(out) => match source.file_name() {
            Some(name) => eml_path(&out.join(name)),
            None => eml_path(source),
        },
        Some(out) => out.to_path_buf(),
        None => eml_path(source),
    }
}

/// ディレクトリモードの変換先。
///
/// 出力ディレクトリが指定されていれば、走査ルートからの相対パスをその下に再現する。
/// 指定がなければ元ファイルと同じディレクトリに出力する。
pub fn directory_destination(root: &Path, source: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(out) => {
            let relative = source
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| source.file_name().map(PathBuf::from).unwrap_or_default());
            eml_path(&out.join(relative))
        }
        None => eml_path(source),
    }
}
