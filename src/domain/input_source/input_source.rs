use super::directory_path::{DirectoryPath, MsgJobs};
use super::msg_file_path::MsgFilePath;
use super::path_error::PathError;
use crate::domain::models::{ConversionRequest, FileJob};
use crate::domain::output_path::single_file_destination;
use std::path::PathBuf;

/// 入力ソースを表現する列挙型。
/// 単一のMSGファイルか、走査対象のディレクトリのいずれかを保持する。
#[derive(Debug)]
pub enum InputSource {
    File {
        file: MsgFilePath,
        output: Option<PathBuf>,
    },
    Directory {
        dir: DirectoryPath,
        output_dir: Option<PathBuf>,
        recursive: bool,
    },
}

impl InputSource {
    /// 変換要求の入力パスを検証し、入力ソースを決定する。
    pub fn from_request(request: &ConversionRequest) -> Result<Self, PathError> {
        let output = request.output_path().map(PathBuf::from);
        if request.is_directory() {
            Ok(InputSource::Directory {
                dir: DirectoryPath::new(request.input_path())?,
                output_dir: output,
                recursive: request.recursive(),
            })
        } else {
            Ok(InputSource::File {
                file: MsgFilePath::new(request.input_path())?,
                output,
            })
        }
    }

    /// ファイルシステムを1回だけ走査する `FileJob` の遅延イテレータに変換する。
    pub fn into_jobs(self) -> Jobs {
        match self {
            InputSource::File { file, output } => {
                let destination = single_file_destination(file.as_path(), output.as_deref());
                Jobs::Single(Some(FileJob::new(file.as_path(), destination)))
            }
            InputSource::Directory {
                dir,
                output_dir,
                recursive,
            } => Jobs::Scan(dir.msg_jobs(recursive, output_dir)),
        }
    }
}

pub enum Jobs {
    Single(Option<FileJob>),
    Scan(MsgJobs),
}

impl Iterator for Jobs {
    type Item = Result<FileJob, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Jobs::Single(job) => job.take().map(Ok),
            Jobs::Scan(scan) => scan.next(),
        }
    }
}
