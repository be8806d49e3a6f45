// --- 依存モジュール ---

use crate::domain::message::{Mailbox, StructuredMessage};
// mail-builder クレートで RFC 822/MIME 形式のメッセージを組み立てる。
use mail_builder::headers::address::Address;
use mail_builder::headers::content_type::ContentType;
use mail_builder::headers::raw::Raw;
use mail_builder::mime::MimePart;
use mail_builder::MessageBuilder;
use sha2::{Digest, Sha256};
use std::io;
use thiserror::Error;

/// Message-ID が無いメッセージに付与するドメイン部。
const FALLBACK_ID_DOMAIN: &str = "msg2eml";

/// EMLの生成時に発生するエラー。
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("メッセージの書き出しに失敗しました: {0}")]
    Io(#[from] io::Error),
}

/// `serialize(StructuredMessage) -> bytes` の契約。
pub trait EmlSerializer {
    fn serialize(&self, message: &StructuredMessage) -> Result<Vec<u8>, SerializeError>;
}

/// `mail-builder` クレートを使った既定のシリアライザー。
///
/// 同じメッセージからは常に同じバイト列が得られるように、
/// Message-ID の補完とMIME境界文字列の指定をこちらで行う。
/// Date が無い場合は `mail-builder` が現在時刻を補うため、呼び出し側で埋めておくこと。
#[derive(Debug, Default, Clone, Copy)]
pub struct MailBuilderSerializer;

impl EmlSerializer for MailBuilderSerializer {
    fn serialize(&self, message: &StructuredMessage) -> Result<Vec<u8>, SerializeError> {
        let digest = message_digest(message);
        let fallback_id = format!("{}@{}", &digest[..32], FALLBACK_ID_DOMAIN);

        let mut builder = MessageBuilder::new()
            .message_id(message.message_id.as_deref().unwrap_or(&fallback_id))
            .subject(message.subject.as_str());

        if let Some(date) = message.date {
            // 送信者のタイムゾーンを残すため、RFC 2822 の文字列をそのまま書く
            builder = builder.header("Date", Raw::new(date.to_rfc2822()));
        }
        if let Some(from) = &message.from {
            builder = builder.from(address(from));
        }
        if !message.to.is_empty() {
            builder = builder.to(address_list(&message.to));
        }
        if !message.cc.is_empty() {
            builder = builder.cc(address_list(&message.cc));
        }
        if !message.bcc.is_empty() {
            builder = builder.bcc(address_list(&message.bcc));
        }
        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(address(reply_to));
        }

        let eml = builder.body(body_part(message, &digest)).write_to_vec()?;
        Ok(eml)
    }
}

/// 本文と添付ファイルから MIME ツリーを組み立てる。
///
/// `mail-builder` は境界文字列を乱数で作るので、multipart には
/// ダイジェストから作った `boundary` 属性を明示的に付ける。
fn body_part<'x>(message: &'x StructuredMessage, digest: &str) -> MimePart<'x> {
    let text = message
        .text_body
        .as_deref()
        .map(|text| MimePart::new("text/plain", text));
    let html = message
        .html_body
        .as_deref()
        .map(|html| MimePart::new("text/html", html));

    let body = match (text, html) {
        (Some(text), Some(html)) => MimePart::new(
            multipart("multipart/alternative", digest, "alt"),
            vec![text, html],
        ),
        (Some(part), None) | (None, Some(part)) => part,
        (None, None) => MimePart::new("text/plain", ""),
    };

    if message.attachments.is_empty() {
        return body;
    }

    let mut parts = Vec::with_capacity(message.attachments.len() + 1);
    parts.push(body);
    for attachment in &message.attachments {
        parts.push(
            MimePart::new(
                attachment.content_type.as_str(),
                attachment.data.as_slice(),
            )
            .attachment(attachment.file_name.as_str()),
        );
    }
    MimePart::new(multipart("multipart/mixed", digest, "mixed"), parts)
}

fn multipart<'x>(content_type: &'x str, digest: &str, kind: &str) -> ContentType<'x> {
    ContentType::new(content_type)
        .attribute("boundary", format!("msg2eml-{}-{}", &digest[..16], kind))
}

fn address(mailbox: &Mailbox) -> Address<'_> {
    Address::new_address(mailbox.name.as_deref(), mailbox.email.as_str())
}

fn address_list(mailboxes: &[Mailbox]) -> Address<'_> {
    Address::new_list(mailboxes.iter().map(address).collect())
}

/// メッセージの内容から決まる16進のダイジェスト。
fn message_digest(message: &StructuredMessage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(message.subject.as_bytes());
    for mailbox in message
        .from
        .iter()
        .chain(&message.to)
        .chain(&message.cc)
        .chain(&message.bcc)
    {
        hasher.update(mailbox.email.as_bytes());
        hasher.update([0u8]);
    }
    if let Some(date) = message.date {
        hasher.update(date.timestamp().to_be_bytes());
    }
    for body in message.text_body.iter().chain(&message.html_body) {
        hasher.update(body.as_bytes());
    }
    for attachment in &message.attachments {
        hasher.update(attachment.file_name.as_bytes());
        hasher.update(&attachment.data);
    }
    hex::encode(hasher.finalize())
}
