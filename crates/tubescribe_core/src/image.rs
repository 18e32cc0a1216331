//! Generated image references and their stored records.

use crate::{Identity, RecordId, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handle to a generated image, as returned by the image provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", url)]
pub struct ImageReference {
    /// Provider-side storage id
    pub storage_id: String,
    /// Location the image can be fetched from
    pub url: String,
}

/// An image stored for a video, scoped to the identity that generated it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ImageRecord {
    id: RecordId,
    storage_id: String,
    url: String,
    resource_id: ResourceId,
    owner_id: Identity,
    created_at: DateTime<Utc>,
}

impl ImageRecord {
    /// Creates a record for `reference`, generated by `owner_id` for `resource_id`.
    pub fn new(reference: &ImageReference, resource_id: ResourceId, owner_id: Identity) -> Self {
        Self {
            id: RecordId::generate(),
            storage_id: reference.storage_id.clone(),
            url: reference.url.clone(),
            resource_id,
            owner_id,
            created_at: Utc::now(),
        }
    }
}
