//! HTTP client helpers (REST).

use crate::core::api::{CloudApi, DownloadedFile};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use skyvault_api_models::format::content_disposition_filename;
use skyvault_api_models::{
    AdminStats, AdminUser, ApiError, AuthResponse, ClearHistoryAck, FileRecord, HistoryEntry,
    LoginRequest, RegisterRequest, StorageSummary, User, fallback, paths,
};
use std::cell::RefCell;
use web_sys::FormData;

/// Browser REST client; one instance per app boot.
#[derive(Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    token: RefCell<Option<String>>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RefCell::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        paths::join(&self.base_url, path)
    }

    fn authorize(&self, mut req: Request) -> Request {
        if let Some(token) = self.token.borrow().as_deref() {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        req
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, ApiError> {
        let req = self.authorize(Request::get(&self.url(path)));
        decode(send(req).await?, fallback).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let req = Request::post(&self.url(path))
            .json(body)
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        decode(send(req).await?, fallback).await
    }

    async fn delete(&self, path: &str, fallback: &str) -> Result<Response, ApiError> {
        let req = self.authorize(Request::delete(&self.url(path)));
        ensure_ok(send(req).await?, fallback).await
    }

    /// Send one file as multipart form data under the `file` field.
    pub(crate) async fn upload(&self, file: &web_sys::File) -> Result<FileRecord, ApiError> {
        let form = FormData::new().map_err(|_| ApiError::Transport("form-data failed".into()))?;
        form.append_with_blob_and_filename(paths::UPLOAD_FIELD, file, &file.name())
            .map_err(|err| ApiError::Transport(format!("attach file: {err:?}")))?;
        let req = self.authorize(Request::post(&self.url(paths::UPLOAD)).body(form));
        decode(send(req).await?, fallback::UPLOAD).await
    }
}

async fn send(req: Request) -> Result<Response, ApiError> {
    req.send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))
}

async fn ensure_ok(resp: Response, fallback: &str) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.binary().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body, fallback))
}

async fn decode<T: DeserializeOwned>(resp: Response, fallback: &str) -> Result<T, ApiError> {
    ensure_ok(resp, fallback)
        .await?
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl CloudApi for ApiClient {
    fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json(paths::LOGIN, request, fallback::LOGIN).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json(paths::REGISTER, request, fallback::REGISTER)
            .await
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.get_json(paths::ME, fallback::ME).await
    }

    async fn history(&self, limit: u32) -> Result<Vec<HistoryEntry>, ApiError> {
        self.get_json(&paths::history(limit), fallback::HISTORY)
            .await
    }

    async fn clear_history(&self) -> Result<ClearHistoryAck, ApiError> {
        let resp = self.delete(paths::HISTORY_CLEAR, fallback::CLEAR_HISTORY).await?;
        resp.json::<ClearHistoryAck>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>, ApiError> {
        self.get_json(paths::FILES, fallback::FILES).await
    }

    async fn storage(&self) -> Result<StorageSummary, ApiError> {
        self.get_json(paths::STORAGE, fallback::STORAGE).await
    }

    async fn download_file(&self, id: i64) -> Result<DownloadedFile, ApiError> {
        let req = self.authorize(Request::get(&self.url(&paths::download(id))));
        let resp = ensure_ok(send(req).await?, fallback::DOWNLOAD).await?;
        let headers = resp.headers();
        let filename = content_disposition_filename(headers.get("content-disposition").as_deref());
        let content_type = headers.get("content-type");
        let bytes = resp
            .binary()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(DownloadedFile {
            filename,
            content_type,
            bytes,
        })
    }

    async fn delete_file(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&paths::file(id), fallback::DELETE).await?;
        Ok(())
    }

    async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get_json(paths::ADMIN_STATS, fallback::ADMIN_STATS)
            .await
    }

    async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get_json(paths::ADMIN_USERS, fallback::ADMIN_USERS)
            .await
    }
}
