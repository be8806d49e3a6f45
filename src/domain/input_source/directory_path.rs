use super::path_error::PathError;
use crate::domain::models::FileJob;
use crate::domain::output_path::{directory_destination, has_msg_extension};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// 走査対象のルートディレクトリ。存在し、ディレクトリであることが保証される
#[derive(Debug)]
pub struct DirectoryPath {
    pub path: PathBuf,
}

impl DirectoryPath {
    // コンストラクタ: パスを受け取り、バリデーションを行う
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PathError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// ディレクトリ内の `.msg` ファイルを1回だけ走査するイテレータを返す。
    ///
    /// `recursive` が false の場合はルート直下のみを対象とし、サブディレクトリには降りない。
    /// 出力順を安定させるため、エントリはファイル名でソートされる。
    pub fn msg_jobs(self, recursive: bool, output_dir: Option<PathBuf>) -> MsgJobs {
        let mut walker = WalkDir::new(&self.path).min_depth(1).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }
        MsgJobs {
            entries: walker.into_iter(),
            root: self.path,
            output_dir,
        }
    }
}

/// `.msg` ファイルを見つけるたびに `FileJob` を生成する遅延イテレータ。
///
/// 走査中のエラーは要素として返され、走査自体は続行される。
pub struct MsgJobs {
    entries: walkdir::IntoIter,
    root: PathBuf,
    output_dir: Option<PathBuf>,
}

impl Iterator for MsgJobs {
    type Item = Result<FileJob, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(PathError::Walk(e))),
            };
            let path = entry.path();
            if !path.is_file() || !has_msg_extension(path) {
                continue;
            }
            let destination = directory_destination(&self.root, path, self.output_dir.as_deref());
            return Some(Ok(FileJob::new(path, destination)));
        }
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn collect_jobs(dir: &Path, recursive: bool, output: Option<&Path>) -> Vec<FileJob> {
        DirectoryPath::new(dir)
            .unwrap()
            .msg_jobs(recursive, output.map(Path::to_path_buf))
            .map(|res| res.expect("walk should not fail"))
            .collect()
    }

    // a.msg, B.MSG, note.txt, sub/c.msg, sub/deeper/d.Msg を持つツリーを作る
    fn build_tree() -> tempfile::TempDir {
        let dir = tempdir().expect("Failed to create temp directory");
        let root = dir.path();
        fs::write(root.join("a.msg"), "a").unwrap();
        fs::write(root.join("B.MSG"), "b").unwrap();
        fs::write(root.join("note.txt"), "not mail").unwrap();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("sub/c.msg"), "c").unwrap();
        fs::write(root.join("sub/deeper/d.Msg"), "d").unwrap();
        dir
    }

    #[test]
    fn test_valid_directory_path() {
        let dir = tempdir().expect("Failed to create temp directory");
        let dir_path = DirectoryPath::new(dir.path()).unwrap();
        assert_eq!(dir_path.as_path(), dir.path());
        assert_eq!(dir_path.to_string(), dir.path().display().to_string());
    }

    #[test]
    fn test_non_existent_path_returns_error() {
        let res = DirectoryPath::new("this_directory_should_not_exist");
        assert!(matches!(res, Err(PathError::NotFound(_))));
    }

    #[test]
    fn test_file_path_returns_error() {
        let res = DirectoryPath::new("Cargo.toml"); // 常に存在するファイル
        assert!(matches!(res, Err(PathError::NotADirectory(_))));
    }

    #[test]
    fn non_recursive_scan_stays_at_root() {
        let dir = build_tree();
        let jobs = collect_jobs(dir.path(), false, None);
        let sources: Vec<PathBuf> = jobs.iter().map(|j| j.source_path.clone()).collect();
        assert_eq!(
            sources,
            vec![dir.path().join("B.MSG"), dir.path().join("a.msg")]
        );
    }

    #[test]
    fn recursive_scan_visits_every_msg_once() {
        let dir = build_tree();
        let jobs = collect_jobs(dir.path(), true, None);
        let mut sources: Vec<PathBuf> = jobs.iter().map(|j| j.source_path.clone()).collect();
        sources.sort();
        let mut expected = vec![
            dir.path().join("B.MSG"),
            dir.path().join("a.msg"),
            dir.path().join("sub/c.msg"),
            dir.path().join("sub/deeper/d.Msg"),
        ];
        expected.sort();
        assert_eq!(sources, expected);
        assert!(jobs
            .iter()
            .all(|j| j.destination_path.extension().unwrap() == "eml"));
    }

    #[test]
    fn recursive_scan_mirrors_tree_under_output() {
        let dir = build_tree();
        let out = tempdir().expect("Failed to create output directory");
        let jobs = collect_jobs(dir.path(), true, Some(out.path()));
        let mut destinations: Vec<PathBuf> =
            jobs.into_iter().map(|j| j.destination_path).collect();
        destinations.sort();
        let mut expected = vec![
            out.path().join("B.eml"),
            out.path().join("a.eml"),
            out.path().join("sub/c.eml"),
            out.path().join("sub/deeper/d.eml"),
        ];
        expected.sort();
        assert_eq!(destinations, expected);
    }

    #[test]
    fn directories_named_like_msg_are_skipped() {
        let dir = tempdir().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("folder.msg")).unwrap();
        assert!(collect_jobs(dir.path(), true, None).is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_names_are_scanned() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().expect("Failed to create temp directory");
        // Latin-1 のまま保存されたファイル名
        let name = OsStr::from_bytes(b"r\xe9union.msg");
        fs::write(dir.path().join(name), "x").unwrap();

        let jobs = collect_jobs(dir.path(), false, None);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source_path, dir.path().join(name));
        assert_eq!(
            jobs[0].destination_path,
            dir.path().join(OsStr::from_bytes(b"r\xe9union.eml"))
        );
    }
}
