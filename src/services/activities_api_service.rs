use std::future::Future;
use std::time::Duration;

use http::StatusCode;
use reqwest::{Client, RequestBuilder, Url};
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::models::{ActivitiesListing, ServiceReplyBody};

/// Reply of a signup or unregister call, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub status: StatusCode,
    pub body: ServiceReplyBody,
}

impl ServiceReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// The three calls the board makes against the activities service.
///
/// Transport and decoding problems are errors; a non-2xx status on a mutation is a
/// regular [`ServiceReply`] so the caller can show the service's own detail text.
pub trait ActivitiesApi {
    fn list_activities(&self) -> impl Future<Output = Result<ActivitiesListing, ApiError>> + Send;

    fn sign_up(
        &self,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<ServiceReply, ApiError>> + Send;

    fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> impl Future<Output = Result<ServiceReply, ApiError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MalformedBody {
    Reject,
    TreatAsEmpty,
}

#[derive(Debug, Clone)]
pub struct HttpActivitiesApi {
    client: Client,
    base_url: Url,
}

impl HttpActivitiesApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_string(),
                source,
            })?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn listing_url(&self) -> Url {
        self.endpoint(&["activities"], None)
    }

    pub fn signup_url(&self, activity: &str, email: &str) -> Url {
        self.endpoint(&["activities", activity, "signup"], Some(email))
    }

    pub fn participants_url(&self, activity: &str, email: &str) -> Url {
        self.endpoint(&["activities", activity, "participants"], Some(email))
    }

    // Every segment and the email are percent-encoded, so names with spaces or slashes stay one segment.
    fn endpoint(&self, segments: &[&str], email: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(email) = email {
            // Form encoding: a space becomes `+`, a literal `+` becomes `%2B`.
            url.query_pairs_mut().append_pair("email", email);
        }
        url
    }

    async fn send_command(
        &self,
        request: RequestBuilder,
        url: &Url,
        malformed: MalformedBody,
    ) -> Result<ServiceReply, ApiError> {
        let resp = request.send().await.map_err(|e| transport(url, e))?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| transport(url, e))?;

        let body = match serde_json::from_slice::<ServiceReplyBody>(&bytes) {
            Ok(body) => body,
            Err(source) if malformed == MalformedBody::TreatAsEmpty => {
                warn!("{} answered {} with an unreadable body: {}", url, status, source);
                ServiceReplyBody::default()
            }
            Err(source) => {
                return Err(ApiError::Decode {
                    url: url.to_string(),
                    source,
                })
            }
        };

        debug!("{} -> {}", url.path(), status);
        Ok(ServiceReply { status, body })
    }
}

impl ActivitiesApi for HttpActivitiesApi {
    async fn list_activities(&self) -> Result<ActivitiesListing, ApiError> {
        let url = self.listing_url();
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport(&url, e))?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| transport(&url, e))?;
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn sign_up(&self, activity: &str, email: &str) -> Result<ServiceReply, ApiError> {
        let url = self.signup_url(activity, email);
        let request = self.client.post(url.clone());
        self.send_command(request, &url, MalformedBody::Reject).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<ServiceReply, ApiError> {
        let url = self.participants_url(activity, email);
        let request = self.client.delete(url.clone());
        self.send_command(request, &url, MalformedBody::TreatAsEmpty).await
    }
}

fn transport(url: &Url, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpActivitiesApi {
        HttpActivitiesApi::with_client(Client::new(), base).unwrap()
    }

    #[test]
    fn signup_url_encodes_name_and_email() {
        let url = api("http://127.0.0.1:8000").signup_url("Chess Club", "a@x.com");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Chess%20Club/signup?email=a%40x.com"
        );
    }

    #[test]
    fn participants_url_keeps_slashes_inside_one_segment() {
        let url = api("http://127.0.0.1:8000/").participants_url("Art/Craft", "b+c@x.com");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Art%2FCraft/participants?email=b%2Bc%40x.com"
        );
    }

    #[test]
    fn space_in_email_is_form_encoded_as_plus() {
        let url = api("http://127.0.0.1:8000").signup_url("Chess Club", "a b@x.com");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Chess%20Club/signup?email=a+b%40x.com"
        );
        let (_, email) = url.query_pairs().next().unwrap();
        assert_eq!(email, "a b@x.com");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = api("http://svc.local/school/").listing_url();
        assert_eq!(url.as_str(), "http://svc.local/school/activities");
    }

    #[test]
    fn rejects_base_without_path() {
        let err = HttpActivitiesApi::with_client(Client::new(), "mailto:desk@x.com").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }
}
