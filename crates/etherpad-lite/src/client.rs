//! HTTP client for the Etherpad Lite API

use crate::{
    config::ClientConfig,
    error::{EtherpadError, Result},
    pad::Pad,
    params::Params,
    types::*,
    url::generate_url,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Client for the Etherpad Lite HTTP API
///
/// Each method performs exactly one GET round trip, with no retries and no
/// caching. Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct EtherpadClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EtherpadClient {
    /// Create a client with default timeout and pool settings
    ///
    /// # Example
    /// ```no_run
    /// # use etherpad_lite::EtherpadClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = EtherpadClient::new("http://localhost:9001/api/1.2.12", "secret")?;
    /// let pads = client.list_pads(None, None).await?;
    /// println!("{} pads", pads.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url, api_key))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(EtherpadError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key,
        })
    }

    /// The API root this client talks to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ===== Dispatch =====

    /// Call an API function and return its `data` unchanged
    ///
    /// The API key is added to `params` automatically. A `null` or absent
    /// `data` comes back as [`Value::Null`].
    pub async fn send(&self, function: &str, params: Params) -> Result<Value> {
        let url = generate_url(&self.base_url, function, &params, &self.api_key)?;
        debug!(
            function,
            params = ?params.keys().collect::<Vec<_>>(),
            "Calling Etherpad API"
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope = ApiResponse::parse(&body).map_err(|err| {
            warn!(function, status = status.as_u16(), "Malformed Etherpad response: {}", err);
            match err {
                EtherpadError::MalformedResponse(detail) => EtherpadError::MalformedResponse(
                    format!("HTTP {} from {}: {}", status.as_u16(), function, detail),
                ),
                other => other,
            }
        })?;

        match envelope.into_data() {
            Ok(data) => Ok(data),
            Err(err) => {
                warn!(function, code = ?err.wire_code(), "Etherpad call failed: {}", err);
                Err(err)
            }
        }
    }

    /// Call an API function and deserialize its `data` into `T`
    pub async fn call<T: DeserializeOwned>(&self, function: &str, params: Params) -> Result<T> {
        let data = self.send(function, params).await?;
        from_data(function, data)
    }

    /// Succeeds when the server accepts the configured API key
    pub async fn check_token(&self) -> Result<()> {
        self.send("checkToken", Params::new()).await?;
        Ok(())
    }

    // ===== Pad Operations =====

    /// Facade for an existing pad. No request is made.
    pub fn pad(&self, pad_id: impl Into<String>) -> Pad {
        Pad::new(pad_id, self.clone())
    }

    /// Create a pad, optionally with initial text
    pub async fn create_pad(&self, pad_id: &str, text: Option<&str>) -> Result<Pad> {
        let params = Params::new().with("padID", pad_id).with_opt("text", text);
        self.send("createPad", params).await?;
        Ok(self.pad(pad_id))
    }

    /// Create a pad inside a group
    ///
    /// The returned facade is bound to the server-assigned ID,
    /// `{group_id}${pad_name}`.
    pub async fn create_group_pad(
        &self,
        group_id: &str,
        pad_name: &str,
        text: Option<&str>,
    ) -> Result<Pad> {
        let params = Params::new()
            .with("groupID", group_id)
            .with("padName", pad_name)
            .with_opt("text", text);
        let created: PadId = self.call("createGroupPad", params).await?;
        Ok(self.pad(created.pad_id))
    }

    pub async fn delete_pad(&self, pad_id: &str) -> Result<()> {
        self.send("deletePad", Params::new().with("padID", pad_id))
            .await?;
        Ok(())
    }

    /// List pad IDs, optionally filtered by author, group, or both
    ///
    /// * neither: every pad on the instance (`listAllPads`)
    /// * only `author_id`: pads the author edited (`listPadsOfAuthor`)
    /// * only `group_id`: pads in the group (`listPads`)
    /// * both: the author's pads whose ID contains `group_id`
    ///
    /// The combined filter is a substring match on pad IDs, relying on
    /// group pads being named `groupID$padName`. A group ID that is a
    /// substring of another group ID will match pads from both.
    pub async fn list_pads(
        &self,
        author_id: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<Vec<String>> {
        match (author_id, group_id) {
            (Some(author_id), Some(group_id)) => {
                let pads = self.pads_of_author(author_id).await?;
                Ok(pads
                    .into_iter()
                    .filter(|pad| pad.contains(group_id))
                    .collect())
            }
            (Some(author_id), None) => self.pads_of_author(author_id).await,
            (None, Some(group_id)) => {
                self.pad_ids("listPads", Params::new().with("groupID", group_id))
                    .await
            }
            (None, None) => self.pad_ids("listAllPads", Params::new()).await,
        }
    }

    async fn pads_of_author(&self, author_id: &str) -> Result<Vec<String>> {
        self.pad_ids("listPadsOfAuthor", Params::new().with("authorID", author_id))
            .await
    }

    async fn pad_ids(&self, function: &str, params: Params) -> Result<Vec<String>> {
        let listing: PadIds = self.call(function, params).await?;
        Ok(listing.pad_ids)
    }

    // ===== Group Operations =====

    /// Create a group
    ///
    /// With a `group_mapper`, the server returns the group already mapped to
    /// it or creates one (`createGroupIfNotExistsFor`).
    pub async fn create_group(&self, group_mapper: Option<&str>) -> Result<String> {
        let (function, params) = match group_mapper {
            Some(mapper) => (
                "createGroupIfNotExistsFor",
                Params::new().with("groupMapper", mapper),
            ),
            None => ("createGroup", Params::new()),
        };
        let group: GroupId = self.call(function, params).await?;
        Ok(group.group_id)
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        self.send("deleteGroup", Params::new().with("groupID", group_id))
            .await?;
        Ok(())
    }

    pub async fn list_groups(&self) -> Result<Vec<String>> {
        let groups: GroupIds = self.call("listAllGroups", Params::new()).await?;
        Ok(groups.group_ids)
    }

    // ===== Author Operations =====

    /// Create an author, optionally named
    ///
    /// With an `author_mapper`, the server returns the author already mapped
    /// to it or creates one (`createAuthorIfNotExistsFor`). The mapper goes
    /// out as the `authorMapper` parameter, which is the name that function
    /// reads. Clients that send it as `authorID` get the parameter ignored.
    pub async fn create_author(
        &self,
        name: Option<&str>,
        author_mapper: Option<&str>,
    ) -> Result<String> {
        let (function, params) = match author_mapper {
            Some(mapper) => (
                "createAuthorIfNotExistsFor",
                Params::new().with("authorMapper", mapper),
            ),
            None => ("createAuthor", Params::new()),
        };
        let author: AuthorId = self.call(function, params.with_opt("name", name)).await?;
        Ok(author.author_id)
    }

    /// The author's display name, `None` if the author never set one
    pub async fn get_author_name(&self, author_id: &str) -> Result<Option<String>> {
        self.call("getAuthorName", Params::new().with("authorID", author_id))
            .await
    }

    // ===== Session Operations =====

    /// Create a session giving `author_id` access to `group_id` until
    /// `valid_until` (Unix seconds). Returns the new session ID.
    pub async fn create_session(
        &self,
        group_id: &str,
        author_id: &str,
        valid_until: i64,
    ) -> Result<String> {
        let params = Params::new()
            .with("groupID", group_id)
            .with("authorID", author_id)
            .with("validUntil", valid_until);
        let session: SessionId = self.call("createSession", params).await?;
        Ok(session.session_id)
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.send("deleteSession", Params::new().with("sessionID", session_id))
            .await?;
        Ok(())
    }

    /// List sessions filtered by author, group, or both
    ///
    /// At least one filter is required. With a single filter the server's
    /// listing is returned as is, including `None` entries for sessions it
    /// could not resolve. With both, the author's sessions are kept when
    /// their `groupID` contains `group_id`; `None` entries are dropped since
    /// they have no group to match.
    pub async fn list_sessions(
        &self,
        author_id: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<SessionMap> {
        let (function, params) = match (author_id, group_id) {
            (None, None) => {
                return Err(EtherpadError::InvalidArguments(
                    "author_id and group_id cannot both be empty".to_string(),
                ))
            }
            (Some(author_id), _) => (
                "listSessionsOfAuthor",
                Params::new().with("authorID", author_id),
            ),
            (None, Some(group_id)) => (
                "listSessionsOfGroup",
                Params::new().with("groupID", group_id),
            ),
        };

        // The server answers `null` instead of `{}` when there are no sessions
        let sessions: Option<SessionMap> = self.call(function, params).await?;
        let mut sessions = sessions.unwrap_or_default();

        if let (Some(_), Some(group_id)) = (author_id, group_id) {
            sessions.retain(|_, info| {
                info.as_ref()
                    .is_some_and(|info| info.group_id.contains(group_id))
            });
        }
        Ok(sessions)
    }

    pub async fn get_session_details(&self, session_id: &str) -> Result<SessionInfo> {
        self.call("getSessionInfo", Params::new().with("sessionID", session_id))
            .await
    }
}

impl fmt::Debug for EtherpadClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtherpadClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
