//! Tag API
//!
//! Tag catalog administration and tag-to-entity association calls.

use async_trait::async_trait;
use shared::models::{Tag, TagCreate, TagType, TagUpdate, TagWire};
use tracing::{debug, warn};

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Association-level operations the reconciler drives
#[async_trait]
pub trait TagAssignments: Send + Sync {
    /// Attach `tag_id` to the entity
    async fn assign(&self, kind: TagType, entity_id: i64, tag_id: i64) -> ClientResult<()>;
    /// Detach `tag_id` from the entity
    async fn unassign(&self, kind: TagType, entity_id: i64, tag_id: i64) -> ClientResult<()>;
}

/// `/api/tags/assign-{kind}/{entity_id}/{tag_id}`
pub fn assignment_path(kind: TagType, entity_id: i64, tag_id: i64) -> String {
    format!("/api/tags/assign-{}/{}/{}", kind, entity_id, tag_id)
}

/// Tag endpoints on top of an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct TagClient<C> {
    http: C,
}

impl<C: HttpClient> TagClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Commerce the underlying session acts on
    pub fn commerce(&self) -> Option<&str> {
        self.http.session().commerce.as_deref()
    }

    /// GET /api/tags
    ///
    /// Entries that fail normalization are skipped with a warning so one bad
    /// row does not hide the rest of the catalog.
    pub async fn list_tags(&self) -> ClientResult<Vec<Tag>> {
        let wire: Vec<TagWire> = self.http.get("/api/tags").await?;
        let total = wire.len();
        let tags: Vec<Tag> = wire
            .into_iter()
            .filter_map(|w| {
                let id = w.id;
                Tag::try_from(w)
                    .map_err(|e| warn!(tag_id = ?id, error = %e, "[Tags] skipping malformed tag"))
                    .ok()
            })
            .collect();
        debug!(total, kept = tags.len(), "[Tags] catalog loaded");
        Ok(tags)
    }

    /// Tags that may be attached to entities of `kind`, including hidden ones
    pub async fn list_tags_for(&self, kind: TagType) -> ClientResult<Vec<Tag>> {
        let mut tags: Vec<Tag> = self
            .list_tags()
            .await?
            .into_iter()
            .filter(|t| t.applies_to(kind))
            .collect();
        tags.sort_by(|a, b| a.display_cmp(b));
        Ok(tags)
    }

    /// POST /api/tags
    pub async fn create_tag(&self, payload: &TagCreate) -> ClientResult<Tag> {
        let wire: TagWire = self.http.post("/api/tags", payload).await?;
        normalize(wire)
    }

    /// PUT /api/tags/{id}
    pub async fn update_tag(&self, id: i64, payload: &TagUpdate) -> ClientResult<Tag> {
        let wire: TagWire = self.http.put(&format!("/api/tags/{}", id), payload).await?;
        normalize(wire)
    }

    /// DELETE /api/tags/{id}
    pub async fn delete_tag(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/api/tags/{}", id)).await
    }
}

fn normalize(wire: TagWire) -> ClientResult<Tag> {
    Tag::try_from(wire).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl<C: HttpClient> TagAssignments for TagClient<C> {
    async fn assign(&self, kind: TagType, entity_id: i64, tag_id: i64) -> ClientResult<()> {
        debug!(commerce = ?self.commerce(), %kind, entity_id, tag_id, "[Tags] assign");
        self.http
            .post_empty(&assignment_path(kind, entity_id, tag_id))
            .await
    }

    async fn unassign(&self, kind: TagType, entity_id: i64, tag_id: i64) -> ClientResult<()> {
        debug!(commerce = ?self.commerce(), %kind, entity_id, tag_id, "[Tags] unassign");
        self.http
            .delete(&assignment_path(kind, entity_id, tag_id))
            .await
    }
}
