use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use cookie::{Cookie, SameSite};
use uuid::Uuid;

pub const VISITOR_COOKIE: &str = "board_visitor";

/// The browser a request comes from; each one gets its own board state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visitor {
    pub id: String,
}

pub async fn visitor_session(mut request: Request, next: Next) -> Response {
    let known = visitor_from_cookies(request.headers());
    let visitor = known.clone().unwrap_or_else(|| Visitor {
        id: Uuid::new_v4().to_string(),
    });
    request.extensions_mut().insert(visitor.clone());

    let mut response = next.run(request).await;
    if known.is_none() {
        if let Some(value) = session_cookie(&visitor) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Reads the visitor id from the `Cookie` header. Values that are not ids we handed out are
/// ignored, so the visitor gets a fresh one.
pub fn visitor_from_cookies(headers: &HeaderMap) -> Option<Visitor> {
    let prefix = format!("{}=", VISITOR_COOKIE);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|hv| hv.to_str().ok())
        .flat_map(|cookies| cookies.split("; "))
        .find_map(|c| c.strip_prefix(prefix.as_str()))
        .and_then(|value| Uuid::parse_str(value).ok())
        .map(|id| Visitor { id: id.to_string() })
}

fn session_cookie(visitor: &Visitor) -> Option<HeaderValue> {
    let mut cookie = Cookie::new(VISITOR_COOKIE, visitor.id.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    HeaderValue::from_str(&cookie.to_string()).ok()
}
