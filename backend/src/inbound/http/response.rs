//! Success response shapes.
//!
//! - single resource: `200 {"data": ...}`
//! - created: `201 {"data": ...}`
//! - list: `200 {"data": [...], "nextCursor": ...}` plus `Link: rel="next"`
//! - deleted: `204` with no body

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use pagination::{Page, next_link_header};
use serde::Serialize;
use tracing::warn;
use url::Url;

/// `{"data": ...}` wrapper.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    /// Payload.
    pub data: T,
}

/// 200 with the payload wrapped in `data`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Data { data })
}

/// 201 with the payload wrapped in `data`.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(Data { data })
}

/// 204 with an empty body.
pub fn no_content() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// 200 list page, with a `Link` header when another page follows.
pub fn page<T: Serialize>(req: &HttpRequest, page: Page<T>) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if let Some(cursor) = page.next_cursor.as_deref() {
        match Url::parse(req.full_url().as_str()) {
            Ok(current) => {
                builder.insert_header((header::LINK, next_link_header(&current, cursor)));
            }
            Err(error) => warn!(%error, "could not build next-page link"),
        }
    }
    builder.json(page)
}
