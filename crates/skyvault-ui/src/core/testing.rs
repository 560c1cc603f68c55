//! Scriptable in-memory [`CloudApi`] for controller tests.

use crate::core::api::{CloudApi, DownloadedFile};
use async_trait::async_trait;
use skyvault_api_models::{
    AdminStats, AdminUser, ApiError, AuthResponse, ClearHistoryAck, FileRecord, HistoryEntry,
    LoginRequest, RegisterRequest, StorageSummary, User,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use tokio::sync::oneshot;

/// A scripted reply: either immediate or released later through a channel.
pub(crate) enum Reply<T> {
    Ready(Result<T, ApiError>),
    Gated(oneshot::Receiver<Result<T, ApiError>>),
}

type Queue<T> = RefCell<VecDeque<Reply<T>>>;

#[derive(Default)]
pub(crate) struct FakeApi {
    token: RefCell<Option<String>>,
    calls: RefCell<Vec<String>>,
    login: Queue<AuthResponse>,
    me: Queue<User>,
    history: Queue<Vec<HistoryEntry>>,
    clear_history: Queue<ClearHistoryAck>,
    files: Queue<Vec<FileRecord>>,
    storage: Queue<StorageSummary>,
    download: Queue<DownloadedFile>,
    delete: Queue<()>,
    admin_stats: Queue<AdminStats>,
    admin_users: Queue<Vec<AdminUser>>,
}

impl FakeApi {
    pub(crate) fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Number of recorded calls whose label starts with `prefix`.
    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn push_login(&self, reply: Result<AuthResponse, ApiError>) {
        self.login.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn push_me(&self, reply: Result<User, ApiError>) {
        self.me.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn push_history(&self, reply: Result<Vec<HistoryEntry>, ApiError>) {
        self.history.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn push_clear_history(&self, reply: Result<ClearHistoryAck, ApiError>) {
        self.clear_history.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn push_files(&self, reply: Result<Vec<FileRecord>, ApiError>) {
        self.files.borrow_mut().push_back(Reply::Ready(reply));
    }

    /// Queue a file-list reply that resolves when the returned sender fires.
    pub(crate) fn gate_files(&self) -> oneshot::Sender<Result<Vec<FileRecord>, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.files.borrow_mut().push_back(Reply::Gated(rx));
        tx
    }

    pub(crate) fn push_storage(&self, reply: Result<StorageSummary, ApiError>) {
        self.storage.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn push_download(&self, reply: Result<DownloadedFile, ApiError>) {
        self.download.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn gate_download(&self) -> oneshot::Sender<Result<DownloadedFile, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.download.borrow_mut().push_back(Reply::Gated(rx));
        tx
    }

    pub(crate) fn push_delete(&self, reply: Result<(), ApiError>) {
        self.delete.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn push_admin_stats(&self, reply: Result<AdminStats, ApiError>) {
        self.admin_stats.borrow_mut().push_back(Reply::Ready(reply));
    }

    pub(crate) fn push_admin_users(&self, reply: Result<Vec<AdminUser>, ApiError>) {
        self.admin_users.borrow_mut().push_back(Reply::Ready(reply));
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

async fn next<T>(queue: &Queue<T>, missing: impl FnOnce() -> Result<T, ApiError>) -> Result<T, ApiError> {
    let reply = queue.borrow_mut().pop_front();
    match reply {
        Some(Reply::Ready(result)) => result,
        Some(Reply::Gated(rx)) => rx
            .await
            .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".into()))),
        None => missing(),
    }
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("no scripted reply".into()))
}

#[async_trait(?Send)]
impl CloudApi for FakeApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.record("login");
        next(&self.login, unscripted).await
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.record("register");
        next(&self.login, unscripted).await
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.record("me");
        next(&self.me, unscripted).await
    }

    async fn history(&self, limit: u32) -> Result<Vec<HistoryEntry>, ApiError> {
        self.record(format!("history:{limit}"));
        next(&self.history, || Ok(Vec::new())).await
    }

    async fn clear_history(&self) -> Result<ClearHistoryAck, ApiError> {
        self.record("clear_history");
        next(&self.clear_history, || Ok(ClearHistoryAck { cleared: true })).await
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>, ApiError> {
        self.record("list_files");
        next(&self.files, || Ok(Vec::new())).await
    }

    async fn storage(&self) -> Result<StorageSummary, ApiError> {
        self.record("storage");
        next(&self.storage, || Ok(StorageSummary::default())).await
    }

    async fn download_file(&self, id: i64) -> Result<DownloadedFile, ApiError> {
        self.record(format!("download:{id}"));
        next(&self.download, unscripted).await
    }

    async fn delete_file(&self, id: i64) -> Result<(), ApiError> {
        self.record(format!("delete:{id}"));
        next(&self.delete, || Ok(())).await
    }

    async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.record("admin_stats");
        next(&self.admin_stats, || Ok(AdminStats::default())).await
    }

    async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.record("admin_users");
        next(&self.admin_users, || Ok(Vec::new())).await
    }
}

pub(crate) fn user(id: i64, email: &str, is_admin: bool) -> User {
    User {
        id,
        email: email.to_string(),
        full_name: None,
        is_admin,
    }
}

pub(crate) fn file(id: i64, name: &str, uploaded_at: &str) -> FileRecord {
    FileRecord {
        id,
        original_filename: name.to_string(),
        size_bytes: 1024,
        uploaded_at: Some(uploaded_at.to_string()),
    }
}

pub(crate) fn entry(id: i64, action: &str, filename: &str) -> HistoryEntry {
    HistoryEntry {
        id,
        action: action.to_string(),
        filename: Some(filename.to_string()),
        created_at: Some("2024-01-01T10:00:00".to_string()),
    }
}
