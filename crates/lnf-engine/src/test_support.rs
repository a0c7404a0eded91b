//! Shared fixtures for engine tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use lnf_config::StorageConfig;
use lnf_core::entities::{Item, User};
use lnf_core::enums::{ItemStatus, UserRole};
use lnf_core::errors::BlobError;
use lnf_core::identity::Identity;
use lnf_core::ports::{BlobStore, Repository};
use object_store::memory::InMemory;

use crate::blob::ObjectBlobStore;
use crate::inputs::NewItem;
use crate::memory::InMemoryRepository;
use crate::service::CatalogService;

pub struct Harness {
    pub repo: Arc<InMemoryRepository>,
    pub service: CatalogService,
}

/// Engine over an empty in-memory repository, no blob store.
pub fn harness() -> Harness {
    let repo = Arc::new(InMemoryRepository::new());
    let service = CatalogService::new(repo.clone());
    Harness { repo, service }
}

/// Engine whose blob store writes to an in-memory bucket.
pub fn harness_with_blobs() -> Harness {
    let repo = Arc::new(InMemoryRepository::new());
    let config = StorageConfig {
        bucket: "campus-lnf".into(),
        ..StorageConfig::default()
    };
    let blobs = ObjectBlobStore::new(Arc::new(InMemory::new()), config);
    let service = CatalogService::new(repo.clone()).with_blob_store(Arc::new(blobs));
    Harness { repo, service }
}

/// Engine whose blob store always fails.
pub fn harness_with_broken_blobs() -> Harness {
    let repo = Arc::new(InMemoryRepository::new());
    let service = CatalogService::new(repo.clone()).with_blob_store(Arc::new(BrokenBlobStore));
    Harness { repo, service }
}

struct BrokenBlobStore;

#[async_trait]
impl BlobStore for BrokenBlobStore {
    async fn store(&self, _bytes: Vec<u8>, _filename: &str) -> Result<String, BlobError> {
        Err(BlobError::Upload("credentials rejected".into()))
    }
}

pub async fn seed_user(repo: &InMemoryRepository, id: &str, name: &str, role: UserRole) -> Identity {
    repo.seed_user(User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@campus.test", name.to_lowercase()),
        role,
        created_at: Utc::now(),
    })
    .await;
    Identity::new(id, role)
}

pub fn new_item(description: &str, status: &str) -> NewItem {
    NewItem {
        description: Some(description.to_string()),
        status: Some(status.to_string()),
        location: Some("Library".to_string()),
        ..NewItem::default()
    }
}

/// Insert an item straight into the repository with a fixed timestamp.
pub async fn put_item(
    repo: &InMemoryRepository,
    id: &str,
    owner: &str,
    status: ItemStatus,
    created_at: DateTime<Utc>,
) -> Item {
    let item = Item {
        id: id.to_string(),
        title: format!("Item {id}"),
        description: String::new(),
        category: "other".to_string(),
        status,
        location: String::new(),
        date_found: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        image_url: None,
        user_id: owner.to_string(),
        custody_status: None,
        admin_notes: None,
        contact_info: None,
        created_at,
        updated_at: created_at,
    };
    repo.insert_item(&item).await.unwrap()
}
