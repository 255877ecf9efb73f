use std::fmt::Display;

use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::{HeaderMap, HeaderValue},
    Method, Url,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::auth;
use super::credentials::ServiceAccountKey;
use super::value::{Document, Fields};
use super::DocumentStore;

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com/v1/";
const LIST_PAGE_SIZE: usize = 300;

/// Length of the ids the official SDKs generate for `.add()`; the commit
/// path needs a client-side id because transforms address a full document
/// name.
const AUTO_ID_LEN: usize = 20;

/// Blocking Firestore REST client, scoped to one project's default
/// database. Constructed once at startup and passed by reference to every
/// operation that needs it.
#[derive(Clone)]
pub struct FirestoreClient {
    client: Client,
    project_id: String,
    token: String,
}

#[derive(Error, Debug)]
pub enum ClientError {
    RequestError(reqwest::Error),
    // All invalid status codes
    ApiError(u16, Box<Url>, String),
    InvalidUrl(String),
    MalformedResponse(String),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::RequestError(err) => write!(f, "Request error: {err}"),
            ClientError::InvalidUrl(msg) => {
                write!(f, "Failed to build URL: {msg}")
            }
            ClientError::MalformedResponse(msg) => {
                write!(f, "Malformed response: {msg}")
            }
            ClientError::ApiError(status, url, body) => {
                // Only parsed on display so non-JSON error bodies still surface
                match serde_json::from_str::<ApiErrorResponse>(body) {
                    Ok(api_error) => {
                        write!(f, "API error: {api_error}")
                    }
                    Err(_) => write!(
                        f,
                        "API error: status='{status}' url='{url}' message='{body}'",
                    ),
                }
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::RequestError(error)
    }
}

/// Google's standard error envelope: `{"error": {code, message, status}}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Serialize, Deserialize, Debug)]
struct ApiErrorBody {
    code: u16,
    message: String,
    status: String,
}

impl Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "status='{}' code='{}' message='{}'",
            self.error.status, self.error.code, self.error.message
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitRequest {
    writes: Vec<Write>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Write {
    update: Document,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    update_transforms: Vec<FieldTransform>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldTransform {
    field_path: String,
    set_to_server_value: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

impl FirestoreClient {
    /// Build the HTTP client and perform the token exchange. Fails fast so
    /// no data operation ever runs with unresolved credentials.
    pub fn connect(key: &ServiceAccountKey) -> anyhow::Result<Self> {
        let client = Client::builder().build()?;
        let token = auth::fetch_access_token(&client, key)?;
        Ok(Self {
            client,
            project_id: key.project_id.clone(),
            token,
        })
    }

    #[cfg(test)]
    fn for_tests(project_id: &str) -> Self {
        Self {
            client: Client::new(),
            project_id: project_id.to_string(),
            token: "test-token".to_string(),
        }
    }

    fn send_request<F: FnOnce(RequestBuilder) -> RequestBuilder>(
        &self,
        method: Method,
        url: Url,
        builder: F,
    ) -> Result<Response, ClientError> {
        let request = builder(self.create_request(method, url));
        match request.send() {
            Ok(response) => {
                if response.status().is_success() {
                    Ok(response)
                } else {
                    let status = response.status().as_u16();
                    let box_url = Box::new(response.url().clone());
                    let body = response.text()?;
                    Err(ClientError::ApiError(status, box_url, body))
                }
            }
            Err(err) => Err(ClientError::from(err)),
        }
    }

    fn create_request(&self, method: Method, url: Url) -> RequestBuilder {
        let headers = self.build_headers();
        debug!("building request for {method} {url}");
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .headers(headers)
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static("lonepeak-seed"));
        headers
    }

    /// Resource prefix of the project's default database.
    fn root(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    fn collection_url(&self, collection: &str) -> Result<Url, ClientError> {
        self.build_url(&format!("{}/{collection}", self.root()))
    }

    fn document_url(&self, collection: &str, doc_id: &str) -> Result<Url, ClientError> {
        self.build_url(&format!("{}/{collection}/{doc_id}", self.root()))
    }

    fn commit_url(&self) -> Result<Url, ClientError> {
        self.build_url(&format!("{}:commit", self.root()))
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        Url::parse(FIRESTORE_HOST)
            .and_then(|base| base.join(path))
            .map_err(|e| ClientError::InvalidUrl(format!("{e} {FIRESTORE_HOST}{path}")))
    }
}

impl DocumentStore for FirestoreClient {
    fn add_document(&self, collection: &str, fields: &Fields) -> Result<String, ClientError> {
        let url = self.collection_url(collection)?;
        let body = Document {
            name: None,
            fields: fields.clone(),
        };
        let response = self.send_request(Method::POST, url, |r| r.json(&body))?;
        let created: Document = response.json()?;
        let name = created.name.ok_or_else(|| {
            ClientError::MalformedResponse("created document carries no name".to_string())
        })?;
        Ok(doc_id_from_name(&name))
    }

    fn set_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: &Fields,
    ) -> Result<(), ClientError> {
        let url = self.document_url(collection, doc_id)?;
        let body = Document {
            name: None,
            fields: fields.clone(),
        };
        self.send_request(Method::PATCH, url, |r| r.json(&body))?;
        Ok(())
    }

    fn add_document_with_server_times(
        &self,
        collection: &str,
        fields: &Fields,
        stamp_paths: &[&str],
    ) -> Result<String, ClientError> {
        let doc_id = auto_id();
        let name = format!("{}/{collection}/{doc_id}", self.root());
        let body = CommitRequest {
            writes: vec![Write {
                update: Document {
                    name: Some(name),
                    fields: fields.clone(),
                },
                update_transforms: stamp_paths
                    .iter()
                    .map(|path| FieldTransform {
                        field_path: path.to_string(),
                        set_to_server_value: "REQUEST_TIME",
                    })
                    .collect(),
            }],
        };
        let url = self.commit_url()?;
        self.send_request(Method::POST, url, |r| r.json(&body))?;
        Ok(doc_id)
    }

    fn list_document_ids(&self, collection: &str) -> Result<Vec<String>, ClientError> {
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        // The name-only field mask keeps enumeration cheap; the page-token
        // loop mirrors what the admin SDK's stream() does under the hood.
        loop {
            let url = self.collection_url(collection)?;
            let token = page_token.take();
            let response = self.send_request(Method::GET, url, |r| {
                let r = r.query(&[
                    ("pageSize", LIST_PAGE_SIZE.to_string().as_str()),
                    ("mask.fieldPaths", "__name__"),
                ]);
                match &token {
                    Some(t) => r.query(&[("pageToken", t.as_str())]),
                    None => r,
                }
            })?;
            let page: ListResponse = response.json()?;
            ids.extend(
                page.documents
                    .into_iter()
                    .filter_map(|doc| doc.name)
                    .map(|name| doc_id_from_name(&name)),
            );
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(ids)
    }

    fn delete_document(&self, collection: &str, doc_id: &str) -> Result<(), ClientError> {
        let url = self.document_url(collection, doc_id)?;
        self.send_request(Method::DELETE, url, |r| r)?;
        Ok(())
    }
}

/// Last path segment of a full document resource name.
fn doc_id_from_name(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

fn auto_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect()
}
