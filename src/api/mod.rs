pub(crate) mod about;
pub(crate) mod events;
pub(crate) mod files;
pub(crate) mod gallery;
pub(crate) mod projects;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ClubError, Result};
use crate::model::{Deleted, UploadFile};

/// Header carrying the shared admin secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Whether a route needs the API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Public,
    Admin,
}

/// Borrowed view of a client's connection settings.
pub(crate) struct Backend<'a> {
    pub http: &'a reqwest::Client,
    pub base_url: &'a str,
    pub api_key: Option<&'a str>,
}

impl Backend<'_> {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Start a request, attaching the API key on admin routes. Admin routes
    /// without a key fail here, before anything goes on the wire.
    fn request(
        &self,
        method: Method,
        path: &str,
        access: Access,
    ) -> Result<(String, RequestBuilder)> {
        let url = self.url(path);
        let request = self.http.request(method, &url);
        let request = match access {
            Access::Public => request,
            Access::Admin => {
                let key = self
                    .api_key
                    .ok_or_else(|| ClubError::MissingApiKey { url: url.clone() })?;
                request.header(API_KEY_HEADER, key)
            }
        };
        Ok((url, request))
    }
}

/// Send a request and fail on any non-success status. The error keeps the
/// raw response body so callers can show what the server said.
async fn dispatch(request: RequestBuilder, url: &str) -> Result<Response> {
    let response = request.send().await.map_err(|e| ClubError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url, %status, error = %e, "could not read error response body");
                format!("<unreadable response body: {e}>")
            }
        };
        warn!(url, %status, "backend rejected request");
        return Err(ClubError::UnexpectedStatus {
            url: url.to_owned(),
            status,
            body,
        });
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let body = response.text().await.map_err(|e| ClubError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;
    serde_json::from_str(&body).map_err(|e| ClubError::Decode {
        url: url.to_owned(),
        source: e,
    })
}

/// GET a JSON document.
pub(crate) async fn get_json<T: DeserializeOwned>(
    backend: &Backend<'_>,
    path: &str,
    access: Access,
) -> Result<T> {
    let (url, request) = backend.request(Method::GET, path, access)?;
    debug!(%url, "fetching");
    let response = dispatch(request, &url).await?;
    decode(response, &url).await
}

/// POST or PUT a JSON body to an admin route and decode the answer.
pub(crate) async fn send_json<T, B>(
    backend: &Backend<'_>,
    method: Method,
    path: &str,
    body: &B,
) -> Result<T>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let (url, request) = backend.request(method.clone(), path, Access::Admin)?;
    debug!(%url, %method, "sending");
    let response = dispatch(request.json(body), &url).await?;
    decode(response, &url).await
}

/// DELETE an admin resource.
pub(crate) async fn delete(backend: &Backend<'_>, path: &str) -> Result<Deleted> {
    let (url, request) = backend.request(Method::DELETE, path, Access::Admin)?;
    debug!(%url, "deleting");
    let response = dispatch(request, &url).await?;
    decode(response, &url).await
}

/// POST a multipart form built from `file` plus extra text fields.
pub(crate) async fn upload<T: DeserializeOwned>(
    backend: &Backend<'_>,
    path: &str,
    file: UploadFile,
    fields: Vec<(&'static str, String)>,
) -> Result<T> {
    let (url, request) = backend.request(Method::POST, path, Access::Admin)?;
    let mime = file.mime_type();
    debug!(%url, file_name = %file.file_name, size = file.bytes.len(), "uploading");

    let part = Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(mime)
        .map_err(|e| ClubError::Http {
            url: url.clone(),
            source: e,
        })?;
    let form = fields
        .into_iter()
        .fold(Form::new().part("file", part), |form, (name, value)| {
            form.text(name, value)
        });

    let response = dispatch(request.multipart(form), &url).await?;
    decode(response, &url).await
}

/// GET a binary body.
pub(crate) async fn download(
    backend: &Backend<'_>,
    path: &str,
    access: Access,
) -> Result<Vec<u8>> {
    let (url, request) = backend.request(Method::GET, path, access)?;
    debug!(%url, "downloading");
    let response = dispatch(request, &url).await?;
    let bytes = response.bytes().await.map_err(|e| ClubError::ResponseBody {
        url: url.clone(),
        source: e,
    })?;
    Ok(bytes.to_vec())
}

/// Resolve a server-returned relative path against the asset origin.
pub(crate) fn asset_url(origin: &str, file_path: &str) -> String {
    if file_path.starts_with("http://") || file_path.starts_with("https://") {
        file_path.to_string()
    } else {
        format!("{origin}/{}", file_path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_url() {
        let origin = "http://localhost:8000";
        assert_eq!(
            asset_url(origin, "static/images/a.png"),
            "http://localhost:8000/static/images/a.png"
        );
        assert_eq!(
            asset_url(origin, "/static/images/a.png"),
            "http://localhost:8000/static/images/a.png"
        );
        assert_eq!(
            asset_url(origin, "https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
    }

    #[test]
    fn test_admin_request_without_key_fails_locally() {
        let http = reqwest::Client::new();
        let backend = Backend {
            http: &http,
            base_url: "http://localhost:8000/api",
            api_key: None,
        };
        let err = backend
            .request(Method::DELETE, "/admin/projects/1", Access::Admin)
            .unwrap_err();
        assert!(matches!(err, ClubError::MissingApiKey { .. }));
        assert!(backend
            .request(Method::GET, "/projects/", Access::Public)
            .is_ok());
    }
}
