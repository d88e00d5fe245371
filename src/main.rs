#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;

mod boot;
mod config;
mod data;
mod flipbook;
mod lightbox;
mod models;
mod render;
mod routes;
mod vietqr;


#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Không tìm thấy trang.</p><a href='/'>← Trang chủ</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Lỗi máy chủ. Vui lòng thử lại sau.</p><a href='/'>← Trang chủ</a></body></html>".to_string())
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let cfg = config::load();

    // Create missing directories, probe the data files
    boot::run(&cfg);

    rocket::build()
        .manage(cfg)
        .mount("/static", FileServer::from("website/static"))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}
