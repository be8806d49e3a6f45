//! MSGパーサーとEMLシリアライザーの間でやり取りされるメッセージ表現。
//!
//! どちらのバックエンドもこの型だけを扱うため、片方を別のライブラリに
//! 差し替えても探索や実行フローの処理には影響しない。

use chrono::{DateTime, FixedOffset};

/// 表示名とメールアドレスの組。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: String,
}

impl Mailbox {
    pub fn new(name: Option<&str>, email: impl Into<String>) -> Self {
        Self {
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            email: email.into(),
        }
    }

    /// `Name <user@example.com>` または `user@example.com` 形式の文字列を解析する。
    ///
    /// `@` を含まない文字列はアドレスとして扱えないため `None` を返す。
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let (Some(start), Some(end)) = (raw.rfind('<'), raw.rfind('>')) {
            if start < end {
                let email = raw[start + 1..end].trim();
                if email.contains('@') {
                    let name = raw[..start].trim().trim_matches('"');
                    return Some(Self::new(Some(name), email));
                }
            }
        }
        if raw.contains('@') {
            Some(Self::new(None, raw))
        } else {
            None
        }
    }
}

/// 添付ファイル。データはデコード済みのバイト列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredMessage {
    pub subject: String,
    pub from: Option<Mailbox>,
    pub to: Vec<Mailbox>,
    pub cc: Vec<Mailbox>,
    pub bcc: Vec<Mailbox>,
    pub reply_to: Option<Mailbox>,
    pub date: Option<DateTime<FixedOffset>>,
    /// 山括弧を含まない Message-ID。
    pub message_id: Option<String>,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub attachments: Vec<Attachment>,
}
