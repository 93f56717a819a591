use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::io::markup;
use crate::model::{Category, LatLng, LookupScope, PhotoDetails, ServerConfig, Suggestion};

/// Error type for requests to the gallery server
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("malformed response: {0}")]
    Protocol(String),
    #[error("server responded {status}")]
    Status { status: u16 },
    #[error("invalid server url {url}: {reason}")]
    BadUrl { url: String, reason: String },
}

impl From<reqwest::Error> for GalleryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GalleryError::Timeout
        } else {
            GalleryError::Network(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

/// Rotation requested by the rotate buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Left,
    Right,
    Degrees(i16),
}

impl Rotation {
    pub fn angle(self) -> i16 {
        match self {
            Rotation::Left => -90,
            Rotation::Right => 90,
            Rotation::Degrees(a) => a,
        }
    }

    pub fn parse(s: &str) -> Option<Rotation> {
        match s {
            "left" | "l" => Some(Rotation::Left),
            "right" | "r" => Some(Rotation::Right),
            other => other.parse().ok().map(Rotation::Degrees),
        }
    }
}

/// HTTP client for the gallery's public and admin endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    client: reqwest::Client,
    origin: String,
    timeout: Duration,
}

impl GalleryClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let origin = config.url.trim_end_matches('/').to_string();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(GalleryError::BadUrl {
                url: config.url.clone(),
                reason: "expected an http:// or https:// origin".into(),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.cookie {
            let value = HeaderValue::from_str(cookie).map_err(|e| GalleryError::BadUrl {
                url: config.url.clone(),
                reason: format!("cookie is not a valid header value: {}", e),
            })?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("darkroom/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(GalleryError::Network)?;

        Ok(GalleryClient {
            client,
            origin,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    /// GET `/ac?q=` or `/ac/<category>?q=` and decode the suggestions.
    pub async fn suggest(
        &self,
        scope: LookupScope,
        query: &str,
        timeout: Duration,
    ) -> Result<Vec<Suggestion>> {
        let url = self.url(&scope.path());
        debug!(%url, query, "lookup");
        let resp = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .timeout(timeout)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        scope
            .decode(&body)
            .map_err(|e| GalleryError::Protocol(e.to_string()))
    }

    /// POST `/adm/rotate`. Any 200 is success.
    pub async fn rotate(&self, imgid: u32, rotation: Rotation) -> Result<()> {
        info!(imgid, angle = rotation.angle(), "rotate");
        let angle = rotation.angle().to_string();
        let image = imgid.to_string();
        self.post_form("/adm/rotate", &[("angle", angle.as_str()), ("image", image.as_str())])
            .await
    }

    /// POST `/adm/<category>` once per value (the endpoint takes one name per request).
    pub async fn attach(&self, imgid: u32, category: Category, values: &[String]) -> Result<()> {
        let image = imgid.to_string();
        let path = format!("/adm/{}", category.path());
        for value in values {
            info!(imgid, %category, value = value.as_str(), "attach");
            self.post_form(&path, &[("image", image.as_str()), (category.path(), value.as_str())])
                .await?;
        }
        Ok(())
    }

    /// POST `/adm/grade`; the grade is clamped to 0-100.
    pub async fn grade(&self, imgid: u32, grade: u8) -> Result<()> {
        let grade = grade.min(100).to_string();
        let image = imgid.to_string();
        info!(imgid, grade = grade.as_str(), "grade");
        self.post_form("/adm/grade", &[("image", image.as_str()), ("grade", grade.as_str())])
            .await
    }

    /// POST `/adm/locate`
    pub async fn locate(&self, imgid: u32, pos: LatLng) -> Result<()> {
        let image = imgid.to_string();
        let lat = pos.lat.to_string();
        let lng = pos.lng.to_string();
        info!(imgid, lat = pos.lat, lng = pos.lng, "locate");
        self.post_form(
            "/adm/locate",
            &[("image", image.as_str()), ("lat", lat.as_str()), ("lng", lng.as_str())],
        )
        .await
    }

    /// GET the detail page `/img/<id>` and scrape its data attributes.
    pub async fn details(&self, imgid: u32) -> Result<PhotoDetails> {
        let url = self.url(&format!("/img/{}", imgid));
        let resp = self.client.get(&url).timeout(self.timeout).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                status: status.as_u16(),
            });
        }
        let html = resp.text().await?;
        let mut details =
            markup::parse_details(&html).map_err(|e| GalleryError::Protocol(e.to_string()))?;
        if details.imgid.is_none() {
            warn!(imgid, "detail page carries no data-imgid, using requested id");
            details.imgid = Some(imgid);
        }
        Ok(details)
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<()> {
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!(path, status = status.as_u16(), "admin request failed");
            Err(GalleryError::Status {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> GalleryClient {
        GalleryClient::new(&ServerConfig {
            url: server.url(),
            cookie: Some("EXAUTH=secret".into()),
            timeout_ms: 2_000,
        })
        .unwrap()
    }

    #[test]
    fn rejects_non_http_origin() {
        let err = GalleryClient::new(&ServerConfig {
            url: "photos.example.org".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, GalleryError::BadUrl { .. }));
    }

    #[test]
    fn rotation_parse() {
        assert_eq!(Rotation::parse("left"), Some(Rotation::Left));
        assert_eq!(Rotation::parse("r").map(Rotation::angle), Some(90));
        assert_eq!(Rotation::parse("180"), Some(Rotation::Degrees(180)));
        assert_eq!(Rotation::parse("sideways"), None);
    }

    #[tokio::test]
    async fn suggest_encodes_query_and_sends_cookie() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/ac/person")
            .match_query(Matcher::UrlEncoded("q".into(), "par é".into()))
            .match_header("cookie", "EXAUTH=secret")
            .with_status(200)
            .with_body(r#"["Parker","Paris"]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let got = client
            .suggest(
                LookupScope::Category(Category::Person),
                "par é",
                Duration::from_secs(2),
            )
            .await
            .unwrap();
        m.assert_async().await;
        let names: Vec<_> = got.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(names, ["Parker", "Paris"]);
    }

    #[tokio::test]
    async fn suggest_malformed_json_is_protocol_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ac")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .suggest(LookupScope::Global, "st", Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::Protocol(_)));
    }

    #[tokio::test]
    async fn rotate_posts_form_fields() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/adm/rotate")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("angle".into(), "-90".into()),
                Matcher::UrlEncoded("image".into(), "42".into()),
            ]))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        client_for(&server).rotate(42, Rotation::Left).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn rotate_failure_reports_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/adm/rotate")
            .with_status(401)
            .create_async()
            .await;

        let err = client_for(&server).rotate(42, Rotation::Right).await.unwrap_err();
        assert!(matches!(err, GalleryError::Status { status: 401 }));
    }

    #[tokio::test]
    async fn attach_posts_one_request_per_value() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/adm/person")
            .match_body(Matcher::UrlEncoded("image".into(), "7".into()))
            .with_status(200)
            .expect(2)
            .create_async()
            .await;

        client_for(&server)
            .attach(7, Category::Person, &["Paris".into(), "Parker".into()])
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn grade_is_clamped() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/adm/grade")
            .match_body(Matcher::UrlEncoded("grade".into(), "100".into()))
            .with_status(200)
            .create_async()
            .await;

        client_for(&server).grade(3, 250).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn details_scrapes_data_attributes() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/img/12")
            .with_status(200)
            .with_body(
                r#"<html><body><main><div class="details" data-imgid="12" data-grade="65"
                   data-position="[59.3,18.1]"><div class="meta"><p>Stockholm</p></div></div>
                   </main></body></html>"#,
            )
            .create_async()
            .await;

        let details = client_for(&server).details(12).await.unwrap();
        assert_eq!(details.imgid, Some(12));
        assert_eq!(details.grade, Some(65));
        assert_eq!(details.position, Some(LatLng::new(59.3, 18.1)));
    }
}
