//! Client for the VietQR REST API (account lookup and QR generation).
//! https://www.vietqr.io/danh-sach-api
//!
//! Plain pass-through wrapper: one blocking request per call, no retries,
//! no caching. Responses arrive in a `{ code, desc, data }` envelope;
//! decoding is kept in pure functions so the failure taxonomy is testable
//! without a network.

use std::time::Duration;

use log::error;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::VietQrConfig;

pub const BASE_URL: &str = "https://api.vietqr.io/v2";

/// Envelope code meaning the service accepted the request.
const SUCCESS_CODE: &str = "00";

#[derive(Debug, Error)]
pub enum VietQrError {
    #[error("HTTP Error: {0}")]
    Http(u16),
    #[error("yêu cầu VietQR thất bại: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("phản hồi VietQR không hợp lệ: {0}")]
    Decode(String),
    /// The service answered 200 but flagged the request; `desc` is its own
    /// description text.
    #[error("VietQR error: {code} - {desc}")]
    Service { code: String, desc: String },
}

/// One record of the `/banks` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub bin: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub transfer_supported: i64,
    #[serde(default)]
    pub lookup_supported: i64,
}

/// `/lookup` result: the registered holder name of the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub account_name: String,
}

/// `/generate` request body. Optional fields are omitted from the payload
/// entirely when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRequest {
    /// Bank account number, 6-19 characters.
    pub account_no: String,
    /// Account holder name, 5-50 characters, unaccented.
    pub account_name: String,
    /// 6-digit bank BIN.
    pub acq_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    /// Transfer note, at most 25 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// `/generate` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrData {
    #[serde(default)]
    pub qr_code: String,
    #[serde(default, rename = "qrDataURL")]
    pub qr_data_url: String,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: serde::de::Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    data: Option<T>,
}

pub struct VietQr {
    base_url: String,
    api_key: String,
    client_id: String,
    client: reqwest::blocking::Client,
}

impl VietQr {
    pub fn new(cfg: &VietQrConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        VietQr {
            base_url: BASE_URL.to_string(),
            api_key: cfg.api_key.clone(),
            client_id: cfg.client_id.clone(),
            client,
        }
    }

    /// List supported banks.
    pub fn banks(&self) -> Result<Vec<Bank>, VietQrError> {
        let resp = self
            .with_headers(self.client.get(format!("{}/banks", self.base_url)))
            .send()
            .map_err(|e| self.log(VietQrError::Transport(e)))?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| self.log(VietQrError::Transport(e)))?;
        decode_data(status, &body).map_err(|e| self.log(e))
    }

    /// Look up an account holder name. `bin` is the 6-digit bank code,
    /// `account_number` is 6-19 characters.
    pub fn lookup_account(
        &self,
        bin: &str,
        account_number: &str,
    ) -> Result<AccountInfo, VietQrError> {
        let payload = json!({ "bin": bin, "accountNumber": account_number });
        let resp = self
            .with_headers(self.client.post(format!("{}/lookup", self.base_url)))
            .json(&payload)
            .send()
            .map_err(|e| self.log(VietQrError::Transport(e)))?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| self.log(VietQrError::Transport(e)))?;
        decode_data(status, &body).map_err(|e| self.log(e))
    }

    /// Generate a transfer QR code. Unlike the other operations, the
    /// envelope code is enforced here: a non-"00" code fails with the
    /// service's own description.
    pub fn generate_qr(&self, request: &QrRequest) -> Result<QrData, VietQrError> {
        let resp = self
            .with_headers(self.client.post(format!("{}/generate", self.base_url)))
            .json(request)
            .send()
            .map_err(|e| self.log(VietQrError::Transport(e)))?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| self.log(VietQrError::Transport(e)))?;
        decode_generate(status, &body).map_err(|e| self.log(e))
    }

    fn with_headers(
        &self,
        mut builder: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        if !self.api_key.is_empty() {
            builder = builder.header("x-api-key", &self.api_key);
        }
        if !self.client_id.is_empty() {
            builder = builder.header("x-client-id", &self.client_id);
        }
        builder
    }

    fn log(&self, err: VietQrError) -> VietQrError {
        error!("VietQR: {}", err);
        err
    }
}

/// Decode an envelope where only the HTTP status decides success.
fn decode_data<T: serde::de::DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<T, VietQrError> {
    let envelope = parse_envelope(status, body)?;
    envelope
        .data
        .ok_or_else(|| VietQrError::Decode("thiếu trường data".to_string()))
}

/// Decode a `/generate` envelope: HTTP status first, then the embedded code.
fn decode_generate<T: serde::de::DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<T, VietQrError> {
    let envelope = parse_envelope(status, body)?;
    let code = envelope.code.as_deref().unwrap_or(SUCCESS_CODE);
    if code != SUCCESS_CODE {
        return Err(VietQrError::Service {
            code: code.to_string(),
            desc: envelope.desc.unwrap_or_default(),
        });
    }
    envelope
        .data
        .ok_or_else(|| VietQrError::Decode("thiếu trường data".to_string()))
}

fn parse_envelope<T: serde::de::DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<Envelope<T>, VietQrError> {
    if !(200..300).contains(&status) {
        return Err(VietQrError::Http(status));
    }
    serde_json::from_str(body).map_err(|e| VietQrError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_data_returns_payload() {
        let body = r#"{"code":"00","desc":"success","data":{"accountName":"NGUYEN MINH TIN"}}"#;
        let info: AccountInfo = decode_data(200, body).unwrap();
        assert_eq!(info.account_name, "NGUYEN MINH TIN");
    }

    #[test]
    fn decode_data_fails_on_http_status() {
        let err = decode_data::<AccountInfo>(429, "{}").unwrap_err();
        assert!(matches!(err, VietQrError::Http(429)));
    }

    #[test]
    fn decode_generate_surfaces_service_description() {
        // HTTP 200 with an embedded failure code must carry the service's
        // own text, not a generic error.
        let body = r#"{"code":"42","desc":"Số tài khoản không hợp lệ","data":null}"#;
        let err = decode_generate::<QrData>(200, body).unwrap_err();
        match err {
            VietQrError::Service { code, desc } => {
                assert_eq!(code, "42");
                assert_eq!(desc, "Số tài khoản không hợp lệ");
            }
            other => panic!("expected Service error, got {:?}", other),
        }
        let shown = decode_generate::<QrData>(200, body).unwrap_err().to_string();
        assert!(shown.contains("Số tài khoản không hợp lệ"));
    }

    #[test]
    fn decode_generate_accepts_success_code() {
        let body = r#"{"code":"00","desc":"Gen VietQR successful!","data":{"qrCode":"000201","qrDataURL":"data:image/png;base64,AAA"}}"#;
        let data: QrData = decode_generate(200, body).unwrap();
        assert_eq!(data.qr_code, "000201");
        assert_eq!(data.qr_data_url, "data:image/png;base64,AAA");
    }

    #[test]
    fn decode_fails_on_malformed_body() {
        let err = decode_data::<AccountInfo>(200, "not json").unwrap_err();
        assert!(matches!(err, VietQrError::Decode(_)));
    }

    #[test]
    fn qr_request_omits_unset_fields() {
        let request = QrRequest {
            account_no: "113366668888".to_string(),
            account_name: "QUY VAC XIN".to_string(),
            acq_id: "970415".to_string(),
            amount: None,
            add_info: None,
            format: None,
            template: Some("compact".to_string()),
        };
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(payload["accountNo"], "113366668888");
        assert_eq!(payload["acqId"], "970415");
        assert!(payload.get("amount").is_none());
        assert!(payload.get("addInfo").is_none());
        assert_eq!(payload["template"], "compact");
    }
}
