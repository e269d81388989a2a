//! Chat webhook alert transport
//!
//! Posts alerts as Feishu "post" messages: one rich-text paragraph holding a
//! single text element.

use crate::core::side_channel::{Alert, AlertDestination, AlertTransport};
use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    msg_type: &'static str,
    content: PostContent<'a>,
}

#[derive(Debug, Serialize)]
struct PostContent<'a> {
    post: LocalizedPost<'a>,
}

#[derive(Debug, Serialize)]
struct LocalizedPost<'a> {
    zh_cn: PostBody<'a>,
}

#[derive(Debug, Serialize)]
struct PostBody<'a> {
    title: &'a str,
    content: Vec<Vec<TextElement>>,
}

#[derive(Debug, Serialize)]
struct TextElement {
    tag: &'static str,
    text: String,
}

impl<'a> PostMessage<'a> {
    fn new(title: &'a str, text: String) -> Self {
        Self {
            msg_type: "post",
            content: PostContent {
                post: LocalizedPost {
                    zh_cn: PostBody {
                        title,
                        content: vec![vec![TextElement { tag: "text", text }]],
                    },
                },
            },
        }
    }
}

/// Blocking webhook client; runs on the side-channel worker.
///
/// The HTTP client is built on the first post, so constructing the transport
/// is safe from any thread, including one driving an async runtime.
pub struct FeishuWebhook {
    timeout: Duration,
    client: Mutex<Option<reqwest::blocking::Client>>,
}

impl FeishuWebhook {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: Mutex::new(None),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn client(&self) -> Result<reqwest::blocking::Client> {
        let mut cached = self.client.lock();
        if let Some(client) = cached.as_ref() {
            return Ok(client.clone());
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoggerError::config("FeishuWebhook", e.to_string()))?;
        *cached = Some(client.clone());
        Ok(client)
    }

    fn payload(destination: &AlertDestination, alert: &Alert) -> serde_json::Value {
        serde_json::to_value(PostMessage::new(&destination.title, alert.text()))
            .unwrap_or(serde_json::Value::Null)
    }
}

impl AlertTransport for FeishuWebhook {
    fn post(&self, destination: &AlertDestination, alert: &Alert) -> Result<()> {
        let response = self
            .client()?
            .post(&destination.url)
            .json(&Self::payload(destination, alert))
            .send()
            .map_err(|e| LoggerError::alert_delivery(&destination.url, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().unwrap_or_default();
            Err(LoggerError::alert_delivery(
                &destination.url,
                format!("HTTP {}: {}", status.as_u16(), body),
            ))
        }
    }
}
