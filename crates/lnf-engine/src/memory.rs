//! In-memory `Repository` used by engine tests and throwaway sessions.
//!
//! Mirrors the libSQL backend's contract: unique `(item, user)` claims,
//! unique emails, and cascades on item and user deletion. A couple of
//! fault-injection switches let tests exercise the best-effort and race
//! paths of the engine.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use lnf_core::entities::{
    AuditEntry, Category, Claim, Item, ItemImage, Notification, User, UserStats,
};
use lnf_core::enums::{ClaimStatus, ItemStatus};
use lnf_core::errors::RepoError;
use lnf_core::filters::{AuditFilter, ItemFilter, UserFilter};
use lnf_core::ports::Repository;
use lnf_core::updates::ItemPatch;

const SEED_CATEGORIES: [(&str, &str); 6] = [
    ("accessories", "Bags, wallets, keys, jewellery"),
    ("books", "Textbooks, notebooks, and printed material"),
    ("clothing", "Jackets, hats, scarves, shoes"),
    ("documents", "ID cards, passports, certificates"),
    ("electronics", "Phones, laptops, chargers, headphones"),
    ("other", "Anything that does not fit elsewhere"),
];

#[derive(Debug, Default)]
struct State {
    items: Vec<Item>,
    images: Vec<ItemImage>,
    claims: Vec<Claim>,
    notifications: Vec<Notification>,
    audit: Vec<AuditEntry>,
    users: Vec<User>,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
    next_id: AtomicU64,
    fail_side_effects: AtomicBool,
    hide_claims: AtomicBool,
    pinned_id: Mutex<Option<(String, usize)>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make notification and audit inserts fail.
    pub fn fail_side_effects(&self, on: bool) {
        self.fail_side_effects.store(on, Ordering::SeqCst);
    }

    /// Make `find_claim` report nothing, as if a concurrent insert had not
    /// landed yet when the engine checked.
    pub fn hide_claims(&self, on: bool) {
        self.hide_claims.store(on, Ordering::SeqCst);
    }

    /// Make the next `times` calls to `generate_id` return `id`, as if the
    /// random generator had repeated itself.
    pub fn pin_next_ids(&self, id: &str, times: usize) {
        if let Ok(mut pinned) = self.pinned_id.lock() {
            *pinned = (times > 0).then(|| (id.to_string(), times));
        }
    }

    /// Insert a user directly, bypassing validation.
    pub async fn seed_user(&self, user: User) {
        self.state.write().await.users.push(user);
    }

    pub async fn claim_count(&self) -> usize {
        self.state.read().await.claims.len()
    }

    pub async fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        self.state
            .read()
            .await
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    fn side_effect_guard(&self, what: &str) -> Result<(), RepoError> {
        if self.fail_side_effects.load(Ordering::SeqCst) {
            return Err(RepoError::Query(format!("{what} insert rejected")));
        }
        Ok(())
    }
}

fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, String)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn generate_id(&self, prefix: &str) -> Result<String, RepoError> {
        {
            let mut pinned = self
                .pinned_id
                .lock()
                .map_err(|_| RepoError::Query("id generator poisoned".into()))?;
            if let Some((id, left)) = pinned.as_mut() {
                let id = id.clone();
                *left -= 1;
                if *left == 0 {
                    *pinned = None;
                }
                return Ok(id);
            }
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("{prefix}-{n:08x}"))
    }

    async fn find_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepoError> {
        let state = self.state.read().await;
        let mut items: Vec<Item> = state
            .items
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        newest_first(&mut items, |i| (i.created_at, i.id.clone()));
        Ok(items)
    }

    async fn find_item(&self, id: &str) -> Result<Option<Item>, RepoError> {
        let state = self.state.read().await;
        Ok(state.items.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_item(&self, item: &Item) -> Result<Item, RepoError> {
        let mut state = self.state.write().await;
        if state.items.iter().any(|i| i.id == item.id) {
            return Err(RepoError::IdCollision(format!("items.id {}", item.id)));
        }
        state.items.push(item.clone());
        Ok(item.clone())
    }

    async fn update_item_fields(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepoError> {
        let mut state = self.state.write().await;
        let Some(item) = state.items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        patch.apply_to(item);
        item.updated_at = updated_at;
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, id: &str) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Ok(false);
        }
        state.images.retain(|img| img.item_id != id);
        state.claims.retain(|c| c.item_id != id);
        for n in &mut state.notifications {
            if n.item_id.as_deref() == Some(id) {
                n.item_id = None;
            }
        }
        Ok(true)
    }

    async fn insert_item_image(&self, image: &ItemImage) -> Result<(), RepoError> {
        self.state.write().await.images.push(image.clone());
        Ok(())
    }

    async fn find_item_images(&self, item_id: &str) -> Result<Vec<ItemImage>, RepoError> {
        let state = self.state.read().await;
        let mut images: Vec<ItemImage> = state
            .images
            .iter()
            .filter(|img| img.item_id == item_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(images)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepoError> {
        Ok(SEED_CATEGORIES
            .iter()
            .map(|(name, description)| Category {
                name: (*name).to_string(),
                description: Some((*description).to_string()),
            })
            .collect())
    }

    async fn find_claim(&self, item_id: &str, user_id: &str) -> Result<Option<Claim>, RepoError> {
        if self.hide_claims.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let state = self.state.read().await;
        Ok(state
            .claims
            .iter()
            .find(|c| c.item_id == item_id && c.user_id == user_id)
            .cloned())
    }

    async fn find_claim_by_id(&self, id: &str) -> Result<Option<Claim>, RepoError> {
        let state = self.state.read().await;
        Ok(state.claims.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_claim(&self, claim: &Claim) -> Result<Claim, RepoError> {
        let mut state = self.state.write().await;
        if state.claims.iter().any(|c| c.id == claim.id) {
            return Err(RepoError::IdCollision(format!("claims.id {}", claim.id)));
        }
        if state
            .claims
            .iter()
            .any(|c| c.item_id == claim.item_id && c.user_id == claim.user_id)
        {
            return Err(RepoError::Unique(format!(
                "claims.item_id, claims.user_id ({}, {})",
                claim.item_id, claim.user_id
            )));
        }
        state.claims.push(claim.clone());
        Ok(claim.clone())
    }

    async fn update_claim_status(
        &self,
        id: &str,
        status: ClaimStatus,
    ) -> Result<Option<Claim>, RepoError> {
        let mut state = self.state.write().await;
        Ok(state.claims.iter_mut().find(|c| c.id == id).map(|c| {
            c.status = status;
            c.clone()
        }))
    }

    async fn insert_notification(&self, notification: &Notification) -> Result<(), RepoError> {
        self.side_effect_guard("notification")?;
        self.state
            .write()
            .await
            .notifications
            .push(notification.clone());
        Ok(())
    }

    async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, RepoError> {
        let state = self.state.read().await;
        let mut notifications: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !(unread_only && n.is_read))
            .cloned()
            .collect();
        newest_first(&mut notifications, |n| (n.created_at, n.id.clone()));
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: &str, user_id: &str) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        match state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(n) => {
                n.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_audit_entry(&self, entry: &AuditEntry) -> Result<(), RepoError> {
        self.side_effect_guard("audit")?;
        self.state.write().await.audit.push(entry.clone());
        Ok(())
    }

    async fn list_audit_entries(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, RepoError> {
        let state = self.state.read().await;
        let mut entries: Vec<AuditEntry> = state
            .audit
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        newest_first(&mut entries, |e| (e.created_at, e.id.clone()));
        let limit = usize::try_from(filter.limit.unwrap_or(100)).unwrap_or(usize::MAX);
        entries.truncate(limit);
        Ok(entries)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<User, RepoError> {
        let mut state = self.state.write().await;
        if state
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepoError::Unique(format!("users.email {}", user.email)));
        }
        state.users.push(user.clone());
        Ok(user.clone())
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserStats>, RepoError> {
        let state = self.state.read().await;
        let count = |user_id: &str, status: Option<ItemStatus>| -> u32 {
            let n = state
                .items
                .iter()
                .filter(|i| i.user_id == user_id && status.is_none_or(|s| s == i.status))
                .count();
            u32::try_from(n).unwrap_or(u32::MAX)
        };
        let mut users: Vec<UserStats> = state
            .users
            .iter()
            .filter(|u| filter.matches(u))
            .map(|u| UserStats {
                user: u.clone(),
                item_count: count(&u.id, None),
                lost_count: count(&u.id, Some(ItemStatus::Lost)),
                found_count: count(&u.id, Some(ItemStatus::Found)),
                returned_count: count(&u.id, Some(ItemStatus::Returned)),
            })
            .collect();
        newest_first(&mut users, |s| (s.user.created_at, s.user.id.clone()));
        Ok(users)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, RepoError> {
        let mut state = self.state.write().await;
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Ok(false);
        }
        let owned: Vec<String> = state
            .items
            .iter()
            .filter(|i| i.user_id == id)
            .map(|i| i.id.clone())
            .collect();
        state.items.retain(|i| i.user_id != id);
        state.images.retain(|img| !owned.contains(&img.item_id));
        state
            .claims
            .retain(|c| c.user_id != id && !owned.contains(&c.item_id));
        state.notifications.retain(|n| n.user_id != id);
        Ok(true)
    }
}
