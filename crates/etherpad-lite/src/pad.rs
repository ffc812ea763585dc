//! Pad facade
//!
//! A [`Pad`] is a pad ID bound to a client. Nothing is cached: every getter
//! and setter is a live call with `padID` filled in. Constructing or dropping
//! a `Pad` never creates or deletes anything on the server; use
//! [`EtherpadClient::create_pad`] and [`Pad::delete`] for that.

use crate::{
    client::EtherpadClient,
    error::Result,
    params::Params,
    types::{data_field, from_data, AuthorIds},
};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct Pad {
    id: String,
    client: EtherpadClient,
}

impl Pad {
    pub fn new(id: impl Into<String>, client: EtherpadClient) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client(&self) -> &EtherpadClient {
        &self.client
    }

    /// Call `function` with this pad's `padID` added to `params`
    pub async fn send(&self, function: &str, mut params: Params) -> Result<serde_json::Value> {
        params.set("padID", self.id.as_str());
        self.client.send(function, params).await
    }

    async fn fetch<T: DeserializeOwned>(&self, function: &str, key: &str) -> Result<T> {
        let data = self.send(function, Params::new()).await?;
        data_field(function, data, key)
    }

    // ===== Revisions =====

    pub async fn revisions_count(&self) -> Result<u64> {
        self.fetch("getRevisionsCount", "revisions").await
    }

    pub async fn saved_revisions_count(&self) -> Result<u64> {
        self.fetch("getSavedRevisionsCount", "savedRevisions").await
    }

    /// Revision numbers that were explicitly saved
    pub async fn saved_revisions(&self) -> Result<Vec<u64>> {
        self.fetch("listSavedRevisions", "savedRevisions").await
    }

    /// Mark a revision as saved. Without `revision`, the server saves the head.
    pub async fn save_revision(&self, revision: Option<u64>) -> Result<()> {
        self.send("saveRevision", Params::new().with_opt("rev", revision))
            .await?;
        Ok(())
    }

    // ===== Metadata =====

    /// Number of users currently connected to the pad
    pub async fn users_count(&self) -> Result<u64> {
        self.fetch("padUsersCount", "padUsersCount").await
    }

    pub async fn read_only_id(&self) -> Result<String> {
        self.fetch("getReadOnlyID", "readOnlyID").await
    }

    /// Last edit time in milliseconds since the Unix epoch
    pub async fn last_edited(&self) -> Result<u64> {
        self.fetch("getLastEdited", "lastEdited").await
    }

    /// IDs of every author who contributed to the pad
    pub async fn authors(&self) -> Result<Vec<String>> {
        let data = self.send("listAuthorsOfPad", Params::new()).await?;
        let authors: AuthorIds = from_data("listAuthorsOfPad", data)?;
        Ok(authors.author_ids)
    }

    /// Whether the pad is public. Only meaningful for group pads.
    pub async fn is_public(&self) -> Result<bool> {
        self.fetch("getPublicStatus", "publicStatus").await
    }

    pub async fn set_public(&self, public: bool) -> Result<()> {
        self.send("setPublicStatus", Params::new().with("publicStatus", public))
            .await?;
        Ok(())
    }

    // ===== Content =====

    /// Current text. The server always ends it with a newline.
    pub async fn text(&self) -> Result<String> {
        self.fetch("getText", "text").await
    }

    /// Text as of a given revision
    pub async fn text_at(&self, revision: u64) -> Result<String> {
        let data = self
            .send("getText", Params::new().with("rev", revision))
            .await?;
        data_field("getText", data, "text")
    }

    pub async fn set_text(&self, text: &str) -> Result<()> {
        self.send("setText", Params::new().with("text", text))
            .await?;
        Ok(())
    }

    pub async fn html(&self) -> Result<String> {
        self.fetch("getHTML", "html").await
    }

    pub async fn set_html(&self, html: &str) -> Result<()> {
        self.send("setHTML", Params::new().with("html", html))
            .await?;
        Ok(())
    }

    // ===== Copy / Move / Delete =====

    /// Copy this pad to `destination`, returning a facade for the copy
    ///
    /// With `force`, an existing pad at `destination` is overwritten.
    pub async fn copy(&self, destination: &str, force: bool) -> Result<Pad> {
        self.client
            .send("copyPad", self.transfer_params(destination, force))
            .await?;
        Ok(Pad::new(destination, self.client.clone()))
    }

    /// Rename this pad to `destination`
    ///
    /// On success the facade is rebound: every later call targets
    /// `destination`. On failure the ID is left untouched.
    pub async fn move_to(&mut self, destination: &str, force: bool) -> Result<()> {
        self.client
            .send("movePad", self.transfer_params(destination, force))
            .await?;
        self.id = destination.to_string();
        Ok(())
    }

    /// Delete the pad on the server
    pub async fn delete(self) -> Result<()> {
        self.client.delete_pad(&self.id).await
    }

    fn transfer_params(&self, destination: &str, force: bool) -> Params {
        Params::new()
            .with("sourceID", self.id.as_str())
            .with("destinationID", destination)
            .with("force", force)
    }
}
