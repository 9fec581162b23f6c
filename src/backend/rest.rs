use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::application::{ApplicantRow, Application, ApplicationStatus, NewApplication};
use crate::models::interview::{Interview, NewInterview};
use crate::models::job::Job;
use crate::models::job_match::{JobMatch, NewMatch};
use crate::models::swipe::{NewSwipeAction, SwipeAction};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use super::store::SwipeStore;

/// Asking the backend for exactly one row; zero rows come back as a 406.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const PREFER_REPRESENTATION: &str = "return=representation";
const PREFER_IGNORE_DUPLICATES: &str = "resolution=ignore-duplicates,return=representation";

const CANDIDATE_COLUMNS: &str = "id,job_id,job_seeker_id,status,applied_at,\
job:job_id(id,title),\
job_seeker:job_seeker_id(id,full_name,profession,summary,skills,qualifications,avatar_url)";

/// REST client for the managed backend's PostgREST-style dialect.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base: Url,
    headers: HeaderMap,
}

impl RestStore {
    pub fn new(backend_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        let base = parse_base_url(backend_url)?;
        let headers = auth_headers(api_key)?;
        Ok(Self {
            client,
            base,
            headers,
        })
    }

    pub fn from_config() -> Result<Self> {
        let config = get_config();
        Self::new(&config.backend_url, &config.backend_api_key)
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.base
            .join(&format!("rest/v1/{}", table))
            .map_err(|e| Error::Internal(format!("Bad table URL for {}: {}", table, e)))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self
            .client
            .get(self.table_url(table)?)
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await?;
        decode_rows(response).await
    }

    async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.table_url(table)?)
            .headers(self.headers.clone())
            .header(ACCEPT, SINGLE_OBJECT)
            .query(query)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Err(Error::NotFound(format!("{}: no rows", table)));
        }
        let status = response.status();
        if !status.is_success() {
            return Err(backend_error(status, response).await);
        }
        Ok(response.json().await?)
    }

    async fn insert_returning<T, B>(&self, table: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.table_url(table)?)
            .headers(self.headers.clone())
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = decode_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("{} insert returned no representation", table).into())
    }

    /// Insert that defers to the table's unique index: a swallowed
    /// duplicate comes back as an empty representation.
    async fn insert_ignoring_duplicates<T, B>(
        &self,
        table: &str,
        on_conflict: &str,
        body: &B,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.table_url(table)?)
            .headers(self.headers.clone())
            .header("Prefer", PREFER_IGNORE_DUPLICATES)
            .query(&[("on_conflict", on_conflict)])
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = decode_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn update<B: Serialize + Sync>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<()> {
        let response = self
            .client
            .patch(self.table_url(table)?)
            .headers(self.headers.clone())
            .query(query)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(backend_error(status, response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl SwipeStore for RestStore {
    async fn list_jobs_excluding(&self, exclude: Vec<Uuid>, limit: u32) -> Result<Vec<Job>> {
        let mut query = vec![
            (
                "select",
                "*,recruiters:recruiter_id(id,company_name,company_logo)".to_string(),
            ),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        if !exclude.is_empty() {
            query.push(("id", not_in_filter(&exclude)));
        }
        self.select("jobs", &query).await
    }

    async fn list_applied_job_ids(&self, job_seeker_id: Uuid) -> Result<Vec<Uuid>> {
        #[derive(serde::Deserialize)]
        struct Row {
            job_id: Uuid,
        }
        let rows: Vec<Row> = self
            .select(
                "applications",
                &[
                    ("select", "job_id".to_string()),
                    ("job_seeker_id", eq_filter(job_seeker_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|r| r.job_id).collect())
    }

    async fn list_pending_applicants(&self, limit: u32) -> Result<Vec<ApplicantRow>> {
        self.select(
            "applications",
            &[
                ("select", CANDIDATE_COLUMNS.to_string()),
                ("status", "eq.pending".to_string()),
                ("order", "applied_at.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn find_application(
        &self,
        job_id: Uuid,
        job_seeker_id: Uuid,
    ) -> Result<Option<Application>> {
        let result = self
            .select_single(
                "applications",
                &[
                    ("job_id", eq_filter(job_id)),
                    ("job_seeker_id", eq_filter(job_seeker_id)),
                ],
            )
            .await;
        match result {
            Ok(application) => Ok(Some(application)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn insert_application(&self, new: NewApplication) -> Result<Option<Application>> {
        self.insert_ignoring_duplicates("applications", "job_id,job_seeker_id", &new)
            .await
    }

    async fn update_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<()> {
        self.update(
            "applications",
            &[("id", eq_filter(id))],
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn insert_swipe_action(&self, new: NewSwipeAction) -> Result<Option<SwipeAction>> {
        self.insert_ignoring_duplicates("swipe_actions", "recruiter_id,job_seeker_id,direction", &new)
            .await
    }

    async fn find_match(&self, job_id: Uuid, job_seeker_id: Uuid) -> Result<Option<JobMatch>> {
        let result = self
            .select_single(
                "matches",
                &[
                    ("job_id", eq_filter(job_id)),
                    ("job_seeker_id", eq_filter(job_seeker_id)),
                ],
            )
            .await;
        match result {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn insert_match(&self, new: NewMatch) -> Result<Option<JobMatch>> {
        self.insert_ignoring_duplicates("matches", "job_id,job_seeker_id", &new)
            .await
    }

    async fn insert_interview(&self, new: NewInterview) -> Result<Interview> {
        self.insert_returning("interviews", &new).await
    }
}

fn parse_base_url(backend_url: &str) -> Result<Url> {
    let mut normalized = backend_url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| Error::Config(format!("Invalid BACKEND_URL: {}", e)))
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(api_key)
        .map_err(|_| Error::Config("BACKEND_API_KEY contains invalid characters".to_string()))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| Error::Config("BACKEND_API_KEY contains invalid characters".to_string()))?;
    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

async fn decode_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(backend_error(status, response).await);
    }
    Ok(response.json().await?)
}

async fn backend_error(status: StatusCode, response: Response) -> Error {
    let message = response.text().await.unwrap_or_default();
    Error::Backend {
        status: status.as_u16(),
        message,
    }
}

fn eq_filter(id: Uuid) -> String {
    format!("eq.{}", id)
}

fn not_in_filter(ids: &[Uuid]) -> String {
    let joined = ids
        .iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("not.in.({})", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_filter_formats_operator() {
        let id = Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap();
        assert_eq!(
            eq_filter(id),
            "eq.11111111-2222-3333-4444-555555555555"
        );
    }

    #[test]
    fn not_in_filter_joins_ids() {
        let a = Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap();
        let b = Uuid::parse_str("22222222-2222-2222-2222-222222222222").unwrap();
        assert_eq!(
            not_in_filter(&[a, b]),
            "not.in.(11111111-1111-1111-1111-111111111111,22222222-2222-2222-2222-222222222222)"
        );
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = parse_base_url("https://backend.example.com").unwrap();
        assert_eq!(base.as_str(), "https://backend.example.com/");

        let joined = base.join("rest/v1/jobs").unwrap();
        assert_eq!(joined.as_str(), "https://backend.example.com/rest/v1/jobs");
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
