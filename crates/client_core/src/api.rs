use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Student, StudentId},
    protocol::{student_path, StudentRequest, STUDENTS_PATH},
};
use tracing::debug;
use url::Url;

use crate::error::DirectoryError;

/// Remote student collection. The server validates, persists and assigns ids.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>, DirectoryError>;
    async fn create_student(&self, request: &StudentRequest) -> Result<Student, DirectoryError>;
    async fn delete_student(&self, id: StudentId) -> Result<(), DirectoryError>;
}

#[async_trait]
impl<T> StudentApi for Arc<T>
where
    T: StudentApi + ?Sized,
{
    async fn list_students(&self) -> Result<Vec<Student>, DirectoryError> {
        (**self).list_students().await
    }

    async fn create_student(&self, request: &StudentRequest) -> Result<Student, DirectoryError> {
        (**self).create_student(request).await
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), DirectoryError> {
        (**self).delete_student(id).await
    }
}

pub struct UnavailableStudentApi;

#[async_trait]
impl StudentApi for UnavailableStudentApi {
    async fn list_students(&self) -> Result<Vec<Student>, DirectoryError> {
        Err(DirectoryError::Transport("student api is unavailable".into()))
    }

    async fn create_student(&self, _request: &StudentRequest) -> Result<Student, DirectoryError> {
        Err(DirectoryError::Transport("student api is unavailable".into()))
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), DirectoryError> {
        Err(DirectoryError::Transport(format!(
            "student api is unavailable (delete {id})"
        )))
    }
}

/// JSON over HTTP against `/api/students`. Paths are resolved against the
/// origin of `base_url`.
#[derive(Clone)]
pub struct HttpStudentApi {
    http: Client,
    base_url: Url,
}

impl HttpStudentApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, DirectoryError> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET /api/students/{id}`.
    pub async fn fetch_student(&self, id: StudentId) -> Result<Student, DirectoryError> {
        let res = self
            .http
            .get(self.endpoint(&student_path(id))?)
            .send()
            .await?;
        let res = ensure_success(res).await?;
        Ok(res.json().await?)
    }
}

/// Turns a non-2xx response into `DirectoryError::Server`, keeping the body text
/// as the error detail.
async fn ensure_success(res: Response) -> Result<Response, DirectoryError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body_len = body.len(), "student api returned an error status");
    Err(DirectoryError::Server {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list_students(&self) -> Result<Vec<Student>, DirectoryError> {
        let res = self.http.get(self.endpoint(STUDENTS_PATH)?).send().await?;
        let res = ensure_success(res).await?;
        Ok(res.json().await?)
    }

    async fn create_student(&self, request: &StudentRequest) -> Result<Student, DirectoryError> {
        let res = self
            .http
            .post(self.endpoint(STUDENTS_PATH)?)
            .json(request)
            .send()
            .await?;
        let res = ensure_success(res).await?;
        Ok(res.json().await?)
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), DirectoryError> {
        let res = self
            .http
            .delete(self.endpoint(&student_path(id))?)
            .send()
            .await?;
        ensure_success(res).await?;
        Ok(())
    }
}
