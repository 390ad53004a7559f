//! Typed client for the conversion backend's REST routes.
//!
//! The route table is fixed; the base URL is configurable. Nothing in the
//! front end calls these yet because no processing backend exists.
use std::time::Duration;

use hub_logging::{hub_debug, hub_warn};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::BackendError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendRoute {
    ImageConvert,
    ImageCompress,
    ImageResize,
    PdfMerge,
    PdfSplit,
    PdfCompress,
    PdfUnlock,
    PdfReorder,
    DocConvert,
    DocProcess,
    Upload,
    Download,
    History,
}

impl BackendRoute {
    pub const ALL: [BackendRoute; 13] = [
        BackendRoute::ImageConvert,
        BackendRoute::ImageCompress,
        BackendRoute::ImageResize,
        BackendRoute::PdfMerge,
        BackendRoute::PdfSplit,
        BackendRoute::PdfCompress,
        BackendRoute::PdfUnlock,
        BackendRoute::PdfReorder,
        BackendRoute::DocConvert,
        BackendRoute::DocProcess,
        BackendRoute::Upload,
        BackendRoute::Download,
        BackendRoute::History,
    ];

    pub fn path(self) -> &'static str {
        match self {
            BackendRoute::ImageConvert => "/images/convert",
            BackendRoute::ImageCompress => "/images/compress",
            BackendRoute::ImageResize => "/images/resize",
            BackendRoute::PdfMerge => "/pdf/merge",
            BackendRoute::PdfSplit => "/pdf/split",
            BackendRoute::PdfCompress => "/pdf/compress",
            BackendRoute::PdfUnlock => "/pdf/unlock",
            BackendRoute::PdfReorder => "/pdf/reorder",
            BackendRoute::DocConvert => "/documents/convert",
            BackendRoute::DocProcess => "/documents/process",
            BackendRoute::Upload => "/upload",
            BackendRoute::Download => "/download",
            BackendRoute::History => "/history",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            BackendRoute::Download | BackendRoute::History => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let base_url = settings.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| BackendError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::Network(err.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn route_url(&self, route: BackendRoute) -> Result<Url, BackendError> {
        let raw = format!("{}{}", self.base_url, route.path());
        Url::parse(&raw).map_err(|err| BackendError::InvalidUrl(err.to_string()))
    }

    pub async fn convert_images(
        &self,
        files: &[String],
        format: &str,
    ) -> Result<Value, BackendError> {
        self.post_json(
            BackendRoute::ImageConvert,
            &json!({ "files": files, "format": format }),
        )
        .await
    }

    pub async fn compress_images(
        &self,
        files: &[String],
        quality: u8,
    ) -> Result<Value, BackendError> {
        self.post_json(
            BackendRoute::ImageCompress,
            &json!({ "files": files, "quality": quality }),
        )
        .await
    }

    pub async fn resize_images(
        &self,
        files: &[String],
        width: u32,
        height: u32,
    ) -> Result<Value, BackendError> {
        self.post_json(
            BackendRoute::ImageResize,
            &json!({ "files": files, "width": width, "height": height }),
        )
        .await
    }

    pub async fn merge_pdfs(&self, files: &[String]) -> Result<Value, BackendError> {
        self.post_json(BackendRoute::PdfMerge, &json!({ "files": files }))
            .await
    }

    pub async fn split_pdf(&self, file: &str, pages: &[u32]) -> Result<Value, BackendError> {
        self.post_json(BackendRoute::PdfSplit, &json!({ "file": file, "pages": pages }))
            .await
    }

    pub async fn compress_pdf(&self, file: &str) -> Result<Value, BackendError> {
        self.post_json(BackendRoute::PdfCompress, &json!({ "file": file }))
            .await
    }

    pub async fn unlock_pdf(&self, file: &str, password: &str) -> Result<Value, BackendError> {
        self.post_json(
            BackendRoute::PdfUnlock,
            &json!({ "file": file, "password": password }),
        )
        .await
    }

    pub async fn reorder_pdf(&self, file: &str, order: &[u32]) -> Result<Value, BackendError> {
        self.post_json(BackendRoute::PdfReorder, &json!({ "file": file, "order": order }))
            .await
    }

    pub async fn convert_document(&self, file: &str, format: &str) -> Result<Value, BackendError> {
        self.post_json(
            BackendRoute::DocConvert,
            &json!({ "file": file, "format": format }),
        )
        .await
    }

    pub async fn process_document(
        &self,
        text: &str,
        operation: &str,
    ) -> Result<Value, BackendError> {
        self.post_json(
            BackendRoute::DocProcess,
            &json!({ "text": text, "operation": operation }),
        )
        .await
    }

    /// Sends the raw file body; the name travels as the `fileName` query parameter.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<Value, BackendError> {
        let mut url = self.route_url(BackendRoute::Upload)?;
        url.query_pairs_mut().append_pair("fileName", file_name);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>, BackendError> {
        let mut url = self.route_url(BackendRoute::Download)?;
        url.query_pairs_mut().append_pair("fileId", file_id);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }

    pub async fn history(&self) -> Result<Value, BackendError> {
        let url = self.route_url(BackendRoute::History)?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        route: BackendRoute,
        body: &T,
    ) -> Result<Value, BackendError> {
        let url = self.route_url(route)?;
        let body = serde_json::to_vec(body).map_err(|err| BackendError::Decode(err.to_string()))?;
        hub_debug!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        hub_warn!("Backend {} returned {}", response.url().path(), status);
        Err(BackendError::Status(status.as_u16()))
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, BackendError> {
    let response = check_status(response)?;
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| BackendError::Decode(err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::Timeout;
    }
    BackendError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_download_and_history_are_get() {
        let gets: Vec<_> = BackendRoute::ALL
            .into_iter()
            .filter(|route| route.method() == HttpMethod::Get)
            .collect();
        assert_eq!(gets, vec![BackendRoute::Download, BackendRoute::History]);
    }

    #[test]
    fn route_url_joins_base_without_double_slash() {
        let client = BackendClient::new(BackendSettings {
            base_url: "http://localhost:3001/api/".to_string(),
            ..BackendSettings::default()
        })
        .unwrap();
        let url = client.route_url(BackendRoute::PdfMerge).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/pdf/merge");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = BackendClient::new(BackendSettings {
            base_url: "not a url".to_string(),
            ..BackendSettings::default()
        })
        .unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }
}
