//! 1ファイル分の変換処理（読み込み → 解析 → EML生成 → 書き込み）。

use crate::domain::eml_file::create_eml::{EmlSerializer, MailBuilderSerializer};
use crate::domain::models::{ConversionResult, FileJob, Outcome};
use crate::domain::msg_file::parse_msg::{MessageParser, OutlookParser};
use crate::error::ConversionError;
use chrono::{DateTime, FixedOffset, Utc};
use std::fs;
use std::path::Path;

/// MSGパーサーとEMLシリアライザーを組み合わせた変換器。
///
/// どちらもトレイト越しに呼び出すので、バックエンドを差し替えても
/// 探索や実行フローのコードは変わらない。
#[derive(Debug, Default, Clone)]
pub struct Converter<P = OutlookParser, S = MailBuilderSerializer> {
    parser: P,
    serializer: S,
}

impl<P: MessageParser, S: EmlSerializer> Converter<P, S> {
    pub fn new(parser: P, serializer: S) -> Self {
        Self { parser, serializer }
    }

    /// ジョブを1つ変換する。失敗しても `Outcome::Failure` として返し、パニックはしない。
    pub fn convert(&self, job: &FileJob) -> ConversionResult {
        let outcome = match self.try_convert(job) {
            Ok(bytes_written) => Outcome::Success { bytes_written },
            Err(e) => Outcome::Failure(e),
        };
        ConversionResult {
            job: job.clone(),
            outcome,
        }
    }

    fn try_convert(&self, job: &FileJob) -> Result<usize, ConversionError> {
        let source = &job.source_path;
        let destination = &job.destination_path;

        let bytes = fs::read(source).map_err(ConversionError::Read)?;
        tracing::debug!(source = %source.display(), size = bytes.len(), "read msg file");

        let mut message = self.parser.parse(&bytes)?;
        // Date が無いと出力のたびに現在時刻が入ってしまうため、元ファイルの更新日時で補う
        if message.date.is_none() {
            message.date = modified_time(source);
        }

        let eml = self.serializer.serialize(&message)?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ConversionError::CreateDir)?;
        }
        fs::write(destination, &eml).map_err(ConversionError::Write)?;
        tracing::debug!(
            destination = %destination.display(),
            size = eml.len(),
            attachments = message.attachments.len(),
            "wrote eml file"
        );
        Ok(eml.len())
    }
}

fn modified_time(path: &Path) -> Option<DateTime<FixedOffset>> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified).fixed_offset())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::message::{Mailbox, StructuredMessage};
    use crate::domain::msg_file::parse_msg::ParseError;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// テスト用パーサー。`MSG:` で始まるデータだけを受け付け、残りを件名とする。
    #[derive(Debug, Default, Clone, Copy)]
    pub(crate) struct StubParser;

    impl MessageParser for StubParser {
        fn parse(&self, bytes: &[u8]) -> Result<StructuredMessage, ParseError> {
            let subject = bytes
                .strip_prefix(b"MSG:")
                .ok_or_else(|| ParseError::Malformed("missing MSG: prefix".to_string()))?;
            Ok(StructuredMessage {
                subject: String::from_utf8_lossy(subject).trim().to_string(),
                from: Some(Mailbox::new(Some("Sender"), "sender@example.com")),
                to: vec![Mailbox::new(None, "rcpt@example.com")],
                text_body: Some("body".to_string()),
                ..Default::default()
            })
        }
    }

    pub(crate) fn stub_converter() -> Converter<StubParser, MailBuilderSerializer> {
        Converter::new(StubParser, MailBuilderSerializer)
    }

    #[test]
    fn converts_and_creates_parent_directories() {
        let dir = tempdir().expect("Failed to create temp directory");
        let source = dir.path().join("mail.msg");
        fs::write(&source, b"MSG: hello").unwrap();
        let destination = dir.path().join("out/nested/mail.eml");

        let result = stub_converter().convert(&FileJob::new(&source, &destination));

        assert!(result.is_success(), "{:?}", result.failure());
        let eml = fs::read_to_string(&destination).unwrap();
        assert!(eml.contains("Subject: hello"));
        // 元ファイルの更新日時で Date が補われる
        assert!(eml.contains("Date: "));
    }

    #[test]
    fn corrupted_input_is_a_parse_failure() {
        let dir = tempdir().expect("Failed to create temp directory");
        let source = dir.path().join("broken.msg");
        fs::write(&source, b"garbage").unwrap();
        let destination = dir.path().join("broken.eml");

        let result = stub_converter().convert(&FileJob::new(&source, &destination));

        assert!(matches!(result.failure(), Some(ConversionError::Parse(_))));
        assert!(!destination.exists());
    }

    #[test]
    fn unreadable_source_is_a_read_failure() {
        let dir = tempdir().expect("Failed to create temp directory");
        let job = FileJob::new(dir.path().join("missing.msg"), dir.path().join("missing.eml"));

        let result = stub_converter().convert(&job);

        assert!(matches!(result.failure(), Some(ConversionError::Read(_))));
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempdir().expect("Failed to create temp directory");
        let source = dir.path().join("mail.msg");
        fs::write(&source, b"MSG: hello").unwrap();
        // 通常ファイルの下にはディレクトリを作れない
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let destination: PathBuf = blocker.join("mail.eml");

        let result = stub_converter().convert(&FileJob::new(&source, &destination));

        assert!(matches!(
            result.failure(),
            Some(ConversionError::CreateDir(_))
        ));
    }

    #[test]
    fn converting_twice_overwrites_with_identical_bytes() {
        let dir = tempdir().expect("Failed to create temp directory");
        let source = dir.path().join("mail.msg");
        fs::write(&source, b"MSG: same").unwrap();
        let destination = dir.path().join("mail.eml");
        let job = FileJob::new(&source, &destination);
        let converter = stub_converter();

        assert!(converter.convert(&job).is_success());
        let first = fs::read(&destination).unwrap();
        assert!(converter.convert(&job).is_success());
        let second = fs::read(&destination).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn output_with_trailing_separator_creates_directory() {
        use crate::domain::output_path::single_file_destination;

        let dir = tempdir().expect("Failed to create temp directory");
        let source = dir.path().join("Report.MSG");
        fs::write(&source, b"MSG: report").unwrap();
        let out = format!("{}/exported/", dir.path().display());
        let destination = single_file_destination(&source, Some(Path::new(&out)));

        let result = stub_converter().convert(&FileJob::new(&source, &destination));

        assert!(result.is_success(), "{:?}", result.failure());
        assert!(dir.path().join("exported").is_dir());
        assert!(dir.path().join("exported/Report.eml").is_file());
    }
}
