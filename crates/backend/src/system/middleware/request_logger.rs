use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};

/// Размер с разделителем разрядов: `12345` -> `12.345`
fn grouped(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && i % 3 == head {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Строка журнала запросов
struct RequestLine<'a> {
    at: DateTime<Utc>,
    millis: u128,
    /// `None`, если тело ответа не удалось прочитать
    size: Option<usize>,
    status: StatusCode,
    method: &'a Method,
    path: &'a str,
}

impl RequestLine<'_> {
    /// Голубой для 2xx, коричневый для остального
    fn color_code(&self) -> &'static str {
        if self.status.is_success() && self.size.is_some() {
            "36"
        } else {
            "33"
        }
    }

    fn render(&self) -> String {
        let size = self
            .size
            .map(grouped)
            .unwrap_or_else(|| "error".to_string());
        format!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
            self.color_code(),
            self.at.format("%H:%M:%S"),
            self.millis,
            size,
            self.status.as_u16(),
            self.method.as_str(),
            self.path
        )
    }
}

/// Middleware для логирования HTTP запросов
///
/// Выводит время, длительность, размер ответа, статус, метод и путь.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = to_bytes(body, usize::MAX).await.ok();

    let line = RequestLine {
        at: Utc::now(),
        millis: start.elapsed().as_millis(),
        size: bytes.as_ref().map(|b| b.len()),
        status: parts.status,
        method: &method,
        path: uri.path(),
    };
    println!("{}", line.render());
    if parts.status.is_server_error() {
        tracing::warn!("{} {} -> {}", method, uri.path(), parts.status);
    }

    match bytes {
        Some(bytes) => Response::from_parts(parts, Body::from(bytes)),
        None => Response::from_parts(parts, Body::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(status: StatusCode, size: Option<usize>) -> String {
        let method = Method::GET;
        RequestLine {
            at: DateTime::parse_from_rfc3339("2024-05-01T12:30:05Z")
                .unwrap()
                .with_timezone(&Utc),
            millis: 7,
            size,
            status,
            method: &method,
            path: "/api/catalog",
        }
        .render()
    }

    #[test]
    fn test_render_success_line() {
        let rendered = line(StatusCode::OK, Some(12345));
        assert!(rendered.starts_with("\x1b[36m12:30:05"));
        assert!(rendered.contains("12.345"));
        assert!(rendered.ends_with("200    GET /api/catalog"));
    }

    #[test]
    fn test_grouped_sizes() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1.000");
        assert_eq!(grouped(1234567), "1.234.567");
    }

    #[test]
    fn test_render_unreadable_body() {
        let rendered = line(StatusCode::OK, None);
        assert!(rendered.starts_with("\x1b[33m"));
        assert!(rendered.contains("error"));
    }
}
