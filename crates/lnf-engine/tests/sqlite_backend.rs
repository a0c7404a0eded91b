//! Engine workflows against the libSQL backend.
//!
//! The in-memory repository covers the engine's branches; these tests check
//! that the same workflows hold when constraints, cascades, and timestamps
//! come from SQLite.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use lnf_core::enums::{ClaimStatus, ItemStatus, NotificationKind, UserRole, ViewerRole};
use lnf_core::errors::RepoError;
use lnf_core::filters::{AuditFilter, UserFilter};
use lnf_core::identity::Identity;
use lnf_core::ports::{IdentityResolver, Repository};
use lnf_core::updates::ItemPatchBuilder;
use lnf_db::LnfDb;
use lnf_engine::{CatalogService, ErrorKind, ListQuery, NewItem, NewUser};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup() -> (Arc<LnfDb>, CatalogService) {
    let db = Arc::new(LnfDb::open_local(":memory:").await.unwrap());
    let service = CatalogService::new(db.clone());
    (db, service)
}

async fn register(service: &CatalogService, name: &str, role: UserRole) -> Identity {
    let user = service
        .register_user(NewUser {
            name: name.to_string(),
            email: format!("{}@campus.edu", name.to_lowercase()),
            role,
        })
        .await
        .unwrap();
    Identity::new(user.id, role)
}

fn report(description: &str, status: &str) -> NewItem {
    NewItem {
        description: Some(description.to_string()),
        status: Some(status.to_string()),
        location: Some("Main library, 2nd floor".to_string()),
        ..NewItem::default()
    }
}

// ---------------------------------------------------------------------------
// Item lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_item_round_trips_through_sqlite() {
    let (db, service) = setup().await;
    let ana = register(&service, "Ana", UserRole::User).await;

    let item = service
        .create_item(
            Some(&ana),
            report(
                "Blue backpack found in library, has a water bottle attached",
                "found",
            ),
        )
        .await
        .unwrap();

    assert_eq!(item.title, "Blue backpack found in library, has a water bottle...");
    assert_eq!(item.category, "other");
    assert_eq!(db.find_item(&item.id).await.unwrap(), Some(item.clone()));

    let detail = service.get_item(ViewerRole::Public, &item.id).await.unwrap();
    assert_eq!(detail.view.user_name, "Ana");
    assert_eq!(detail.view.user_email, "ana@campus.edu");
}

#[tokio::test]
async fn update_rejects_empty_patch_and_applies_real_ones() {
    let (_db, service) = setup().await;
    let admin = register(&service, "Admin", UserRole::Admin).await;
    let item = service
        .create_item(Some(&admin), report("Black umbrella", "lost"))
        .await
        .unwrap();

    let err = service
        .update_item(&admin, &item.id, ItemPatchBuilder::new().build())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let updated = service
        .update_item(
            &admin,
            &item.id,
            ItemPatchBuilder::new()
                .status(ItemStatus::Returned)
                .admin_notes(Some("collected at front desk".into()))
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(updated.status, ItemStatus::Returned);
    assert_eq!(updated.admin_notes.as_deref(), Some("collected at front desk"));
    assert!(updated.updated_at >= item.updated_at);

    let err = service
        .get_item(ViewerRole::Public, &item.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn pagination_over_sqlite_listing() {
    let (_db, service) = setup().await;
    let ana = register(&service, "Ana", UserRole::User).await;
    for n in 0..25 {
        service
            .create_item(Some(&ana), report(&format!("Notebook {n}"), "found"))
            .await
            .unwrap();
    }

    let query = |page| ListQuery {
        page: Some(page),
        per_page: Some(12),
        ..ListQuery::default()
    };
    let first = service.list_items(ViewerRole::Public, &query(1)).await.unwrap();
    let third = service.list_items(ViewerRole::Public, &query(3)).await.unwrap();
    let fourth = service.list_items(ViewerRole::Public, &query(4)).await.unwrap();

    assert_eq!(first.items.len(), 12);
    assert_eq!(third.items.len(), 1);
    assert!(fourth.items.is_empty());
    assert_eq!(fourth.total, 25);
    assert_eq!(first.pages, 3);
}

#[tokio::test]
async fn search_matches_title_or_description_case_insensitively() {
    let (_db, service) = setup().await;
    let ana = register(&service, "Ana", UserRole::User).await;
    service
        .create_item(Some(&ana), report("Silver LAPTOP charger", "found"))
        .await
        .unwrap();
    service
        .create_item(Some(&ana), report("Student ID card", "lost"))
        .await
        .unwrap();

    let hits = service
        .list_items(
            ViewerRole::Public,
            &ListQuery {
                search: Some("laptop".into()),
                ..ListQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(hits.total, 1);
    assert_eq!(hits.items[0].item.description, "Silver LAPTOP charger");

    service
        .create_item(Some(&ana), report("ÉCHARPE rouge", "found"))
        .await
        .unwrap();
    for needle in ["écharpe", "ÉCHARPE", "Écharpe"] {
        let hits = service
            .list_items(
                ViewerRole::Public,
                &ListQuery {
                    search: Some(needle.into()),
                    ..ListQuery::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(hits.total, 1, "search {needle:?}");
        assert_eq!(hits.items[0].item.description, "ÉCHARPE rouge");
    }
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

#[tokio::test]
async fn claim_review_flow_end_to_end() {
    let (db, service) = setup().await;
    let finder = register(&service, "Ana", UserRole::User).await;
    let owner = register(&service, "Bo", UserRole::User).await;
    let admin = register(&service, "Admin", UserRole::Admin).await;

    let item = service
        .create_item(Some(&finder), report("Leather wallet", "found"))
        .await
        .unwrap();

    let submitted = service
        .submit_claim(Some(&owner), &item.id, Some("Has my student card inside".into()))
        .await
        .unwrap();
    assert_eq!(submitted.claim.status, ClaimStatus::Pending);

    let err = service
        .submit_claim(Some(&owner), &item.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateClaim);

    let inbox = service.list_notifications(&finder, true).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::ClaimRequest);
    assert_eq!(inbox[0].title, "Claim request for your found item");
    assert_eq!(inbox[0].message, "Bo has requested to claim 'Leather wallet'");

    let approved = service
        .review_claim(&admin, &submitted.claim.id, ClaimStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.item.status, ItemStatus::Claimed);

    let verified = service
        .review_claim(&admin, &submitted.claim.id, ClaimStatus::Verified)
        .await
        .unwrap();
    assert_eq!(verified.item.status, ItemStatus::Returned);
    assert_eq!(
        db.find_item(&item.id).await.unwrap().unwrap().status,
        ItemStatus::Returned
    );

    let claimant_inbox = service.list_notifications(&owner, false).await.unwrap();
    assert_eq!(claimant_inbox.len(), 1);
    assert_eq!(claimant_inbox[0].kind, NotificationKind::ClaimApproved);
}

#[tokio::test]
async fn second_claim_row_hits_unique_constraint() {
    let (db, service) = setup().await;
    let finder = register(&service, "Ana", UserRole::User).await;
    let owner = register(&service, "Bo", UserRole::User).await;
    let item = service
        .create_item(Some(&finder), report("Keys on a red lanyard", "found"))
        .await
        .unwrap();
    let first = service
        .submit_claim(Some(&owner), &item.id, None)
        .await
        .unwrap();

    let mut again = first.claim.clone();
    again.id = db.generate_id("clm").await.unwrap();
    let result = Repository::insert_claim(db.as_ref(), &again).await;
    assert!(matches!(result, Err(RepoError::Unique(_))));
}

#[tokio::test]
async fn reused_claim_id_is_a_collision_not_a_duplicate() {
    let (db, service) = setup().await;
    let finder = register(&service, "Ana", UserRole::User).await;
    let owner = register(&service, "Bo", UserRole::User).await;
    let other = register(&service, "Cy", UserRole::User).await;
    let item = service
        .create_item(Some(&finder), report("Umbrella with a wooden handle", "found"))
        .await
        .unwrap();
    let first = service
        .submit_claim(Some(&owner), &item.id, None)
        .await
        .unwrap();

    let mut reused = first.claim.clone();
    reused.user_id = other.user_id.clone();
    let result = Repository::insert_claim(db.as_ref(), &reused).await;
    assert!(
        matches!(result, Err(RepoError::IdCollision(_))),
        "got {result:?}"
    );

    let second = service
        .submit_claim(Some(&other), &item.id, None)
        .await
        .unwrap();
    assert_eq!(second.claim.status, ClaimStatus::Pending);
}

#[tokio::test]
async fn owner_claim_creates_no_notification() {
    let (_db, service) = setup().await;
    let ana = register(&service, "Ana", UserRole::User).await;
    let item = service
        .create_item(Some(&ana), report("Water bottle", "lost"))
        .await
        .unwrap();

    service.submit_claim(Some(&ana), &item.id, None).await.unwrap();
    assert!(service.list_notifications(&ana, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_item_drops_claims_and_keeps_notifications() {
    let (db, service) = setup().await;
    let finder = register(&service, "Ana", UserRole::User).await;
    let owner = register(&service, "Bo", UserRole::User).await;
    let admin = register(&service, "Admin", UserRole::Admin).await;
    let item = service
        .create_item(Some(&finder), report("Scarf", "found"))
        .await
        .unwrap();
    let claim = service
        .submit_claim(Some(&owner), &item.id, None)
        .await
        .unwrap()
        .claim;

    service.delete_item(&admin, &item.id).await.unwrap();

    assert_eq!(db.find_claim_by_id(&claim.id).await.unwrap(), None);
    let inbox = service.list_notifications(&finder, false).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].item_id, None);

    let audit = service
        .list_audit(&AuditFilter {
            resource_id: Some(item.id.clone()),
            ..AuditFilter::default()
        })
        .await
        .unwrap();
    let actions: Vec<String> = audit.iter().map(|e| e.action.to_string()).collect();
    assert!(actions.contains(&"delete_item".to_string()));
    assert!(actions.contains(&"claim_item".to_string()));
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

#[tokio::test]
async fn issued_token_resolves_to_identity() {
    let (db, service) = setup().await;
    let admin = register(&service, "Admin", UserRole::Admin).await;

    let token = db.issue_token(&admin.user_id).await.unwrap();
    let resolved = db.resolve(&token).await.unwrap().unwrap();
    assert_eq!(resolved, admin);
    assert!(db.resolve("not-a-token").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected_by_sqlite_backend() {
    let (_db, service) = setup().await;
    register(&service, "Ana", UserRole::User).await;
    let err = service
        .register_user(NewUser {
            name: "Ana Again".into(),
            email: "ANA@campus.edu".into(),
            role: UserRole::User,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn deleting_user_cascades_to_their_items() {
    let (db, service) = setup().await;
    let admin = register(&service, "Admin", UserRole::Admin).await;
    let ana = register(&service, "Ana", UserRole::User).await;
    let item = service
        .create_item(Some(&ana), report("Calculator", "lost"))
        .await
        .unwrap();

    let before = service.list_users(&UserFilter::default()).await.unwrap();
    let stats = before.iter().find(|s| s.user.id == ana.user_id).unwrap();
    assert_eq!(stats.item_count, 1);
    assert_eq!(stats.lost_count, 1);

    service.delete_user(&admin, &ana.user_id).await.unwrap();
    assert_eq!(db.find_item(&item.id).await.unwrap(), None);
    assert_eq!(service.list_users(&UserFilter::default()).await.unwrap().len(), 1);
}
