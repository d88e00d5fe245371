use log::error;
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::vietqr::{QrRequest, VietQr};

// ── Bank list ──────────────────────────────────────────

#[get("/banks")]
pub fn banks(cfg: &State<SiteConfig>) -> Json<Value> {
    let client = VietQr::new(&cfg.vietqr);
    match client.banks() {
        Ok(banks) => Json(json!({ "ok": true, "banks": banks })),
        Err(e) => {
            error!("lấy danh sách ngân hàng thất bại: {}", e);
            Json(json!({ "ok": false, "error": e.to_string() }))
        }
    }
}

// ── Account lookup ─────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub bin: String,
    pub account_number: String,
}

#[post("/lookup", format = "json", data = "<body>")]
pub fn lookup(cfg: &State<SiteConfig>, body: Json<LookupRequest>) -> Json<Value> {
    let client = VietQr::new(&cfg.vietqr);
    match client.lookup_account(&body.bin, &body.account_number) {
        Ok(account) => Json(json!({ "ok": true, "accountName": account.account_name })),
        Err(e) => {
            error!("tra cứu tài khoản thất bại: {}", e);
            Json(json!({ "ok": false, "error": e.to_string() }))
        }
    }
}

// ── QR generation ──────────────────────────────────────

#[post("/qr", format = "json", data = "<body>")]
pub fn generate_qr(cfg: &State<SiteConfig>, body: Json<QrRequest>) -> Json<Value> {
    let client = VietQr::new(&cfg.vietqr);
    match client.generate_qr(&body) {
        Ok(data) => Json(json!({ "ok": true, "qrCode": data.qr_code, "qrDataURL": data.qr_data_url })),
        Err(e) => {
            error!("tạo mã QR thất bại: {}", e);
            Json(json!({ "ok": false, "error": e.to_string() }))
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![banks, lookup, generate_qr]
}
