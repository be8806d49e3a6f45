//! MSGバイト列を `StructuredMessage` に変換するパーサー。
//!
//! OLE複合ファイルの読み取りとプロパティストリームの解釈は `msg_parser` クレートに任せ、
//! このモジュールはその結果を本クレートのメッセージ表現に詰め替えるだけを担う。

use crate::domain::message::{Attachment, Mailbox, StructuredMessage};
use chrono::DateTime;
use msg_parser::Outlook;
use thiserror::Error;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// MSGの解析に失敗した場合のエラー。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("MSGファイルとして読み取れません: {0}")]
    Malformed(String),

    #[error("添付ファイル '{name}' のデータが壊れています: {reason}")]
    Attachment { name: String, reason: String },
}

/// `parse(bytes) -> StructuredMessage | ParseError` の契約。
///
/// 別のMSG解析ライブラリに差し替える場合はこのトレイトを実装する。
pub trait MessageParser {
    fn parse(&self, bytes: &[u8]) -> Result<StructuredMessage, ParseError>;
}

/// `msg_parser` クレートを使った既定のパーサー。
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlookParser;

impl MessageParser for OutlookParser {
    fn parse(&self, bytes: &[u8]) -> Result<StructuredMessage, ParseError> {
        let outlook =
            Outlook::from_slice(bytes).map_err(|e| ParseError::Malformed(e.to_string()))?;
        into_message(outlook)
    }
}

fn into_message(outlook: Outlook) -> Result<StructuredMessage, ParseError> {
    let headers = &outlook.headers;

    let date = non_empty(&headers.date).and_then(|raw| match DateTime::parse_from_rfc2822(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(date = raw, error = %e, "ignoring unparsable date header");
            None
        }
    });
    let message_id = non_empty(&headers.message_id)
        .map(|id| id.trim_start_matches('<').trim_end_matches('>').to_string())
        .filter(|id| !id.is_empty());
    let reply_to = non_empty(&headers.reply_to).and_then(Mailbox::parse);

    let from = person_to_mailbox(&outlook.sender.name, &outlook.sender.email);
    let to = outlook
        .to
        .iter()
        .filter_map(|p| person_to_mailbox(&p.name, &p.email))
        .collect();
    let cc = outlook
        .cc
        .iter()
        .filter_map(|p| person_to_mailbox(&p.name, &p.email))
        .collect();
    // Bcc は表示名を ';' で連結した文字列としてしか得られない
    let bcc = outlook.bcc.split(';').filter_map(Mailbox::parse).collect();

    let mut attachments = Vec::with_capacity(outlook.attachments.len());
    for (i, a) in outlook.attachments.iter().enumerate() {
        let file_name = attachment_name(&a.file_name, &a.display_name, &a.extension, i);
        let data = hex::decode(a.payload.trim()).map_err(|e| ParseError::Attachment {
            name: file_name.clone(),
            reason: e.to_string(),
        })?;
        let content_type = match non_empty(&a.mime_tag) {
            Some(tag) => tag.to_string(),
            None => mime_guess::from_path(&file_name)
                .first_raw()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string(),
        };
        attachments.push(Attachment {
            file_name,
            content_type,
            data,
        });
    }

    Ok(StructuredMessage {
        subject: outlook.subject.trim().to_string(),
        from,
        to,
        cc,
        bcc,
        reply_to,
        date,
        message_id,
        text_body: non_empty(&outlook.body).map(|_| outlook.body.clone()),
        html_body: None,
        attachments,
    })
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// MSGの受信者情報をメールボックスに変換する。
///
/// SMTPアドレスが無い場合、Exchange は `/O=.../CN=...` 形式の X.500 DN を返す。
/// `@` を含まないアドレスは使わず、表示名がアドレス形式ならそれで代用する。
fn person_to_mailbox(name: &str, email: &str) -> Option<Mailbox> {
    let name = non_empty(name);
    match non_empty(email).filter(|email| email.contains('@')) {
        Some(email) => Some(Mailbox::new(name, email)),
        None => {
            if let Some(dn) = non_empty(email) {
                tracing::debug!(address = dn, "dropping non-SMTP address");
            }
            name.and_then(Mailbox::parse)
        }
    }
}

fn attachment_name(file_name: &str, display_name: &str, extension: &str, index: usize) -> String {
    non_empty(file_name)
        .or_else(|| non_empty(display_name))
        .map(str::to_string)
        .unwrap_or_else(|| format!("attachment-{}{}", index + 1, extension.trim()))
}
