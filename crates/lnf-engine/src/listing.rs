//! Listing & Filter Engine: what a viewer sees, one page at a time.
//!
//! Every read goes to the repository. Owner display data is looked up per
//! call; a failed or missing lookup degrades to placeholders instead of
//! failing the listing.

use std::collections::HashMap;

use tracing::{debug, warn};

use lnf_core::entities::{Category, Item};
use lnf_core::enums::ViewerRole;
use lnf_core::filters::ItemFilter;
use lnf_core::responses::{ItemDetail, ItemPage, ItemView, UNKNOWN_OWNER_NAME};

use crate::error::CatalogError;
use crate::inputs::ListQuery;
use crate::service::CatalogService;

/// Resolved page window over a filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub per_page: u32,
}

impl PageWindow {
    /// Clamp `per_page` into `1..=max_per_page` and `page` to at least 1.
    #[must_use]
    pub fn resolve(page: Option<u32>, per_page: Option<u32>, default: u32, max: u32) -> Self {
        let max = max.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(default).clamp(1, max),
        }
    }

    #[must_use]
    pub fn offset(self) -> usize {
        let skipped = u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Number of pages needed for `total` rows.
    #[must_use]
    pub fn page_count(self, total: u64) -> u32 {
        u32::try_from(total.div_ceil(u64::from(self.per_page))).unwrap_or(u32::MAX)
    }
}

impl CatalogService {
    /// One page of the items `viewer` may see, newest first.
    ///
    /// Public viewers never see returned items, whatever the filters say.
    ///
    /// # Errors
    ///
    /// `Storage` if the repository query fails.
    pub async fn list_items(
        &self,
        viewer: ViewerRole,
        query: &ListQuery,
    ) -> Result<ItemPage, CatalogError> {
        let filter = ItemFilter::for_viewer(
            viewer,
            query.search.as_deref(),
            query.category.as_deref(),
            query.status,
        );

        let mut items = self.repo().find_items(&filter).await?;
        items.retain(|item| viewer.can_see(item.status) && filter.matches(item));
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let settings = self.settings();
        let window = PageWindow::resolve(
            query.page,
            query.per_page,
            settings.per_page,
            settings.max_per_page,
        );
        let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let per_page = usize::try_from(window.per_page).unwrap_or(usize::MAX);
        let page_items: Vec<Item> = items
            .into_iter()
            .skip(window.offset())
            .take(per_page)
            .collect();

        debug!(
            %viewer,
            total,
            page = window.page,
            returned = page_items.len(),
            "items listed"
        );

        let mut owners = HashMap::new();
        let mut views = Vec::with_capacity(page_items.len());
        for item in page_items {
            views.push(self.enrich(item, &mut owners).await);
        }

        Ok(ItemPage {
            items: views,
            total,
            page: window.page,
            per_page: window.per_page,
            pages: window.page_count(total),
        })
    }

    /// A single item with owner display data and its images.
    ///
    /// # Errors
    ///
    /// `NotFound` if the item does not exist or is hidden from `viewer`.
    pub async fn get_item(
        &self,
        viewer: ViewerRole,
        item_id: &str,
    ) -> Result<ItemDetail, CatalogError> {
        let item = self
            .repo()
            .find_item(item_id)
            .await?
            .filter(|item| viewer.can_see(item.status))
            .ok_or_else(|| CatalogError::not_found("Item not found"))?;

        let additional_images = self.repo().find_item_images(item_id).await?;
        let view = self.enrich(item, &mut HashMap::new()).await;
        Ok(ItemDetail {
            view,
            additional_images,
        })
    }

    /// # Errors
    ///
    /// `Storage` if the repository query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.repo().list_categories().await?)
    }

    async fn enrich(
        &self,
        item: Item,
        owners: &mut HashMap<String, (String, String)>,
    ) -> ItemView {
        let (user_name, user_email) = match owners.get(&item.user_id) {
            Some(owner) => owner.clone(),
            None => {
                let owner = self.owner_display(&item.user_id).await;
                owners.insert(item.user_id.clone(), owner.clone());
                owner
            }
        };
        ItemView {
            item,
            user_name,
            user_email,
        }
    }

    /// `(name, email)` of a user, or the placeholders when unavailable.
    pub(crate) async fn owner_display(&self, user_id: &str) -> (String, String) {
        match self.repo().find_user(user_id).await {
            Ok(Some(user)) => (user.name, user.email),
            Ok(None) => self.placeholder_owner(),
            Err(e) => {
                warn!(user_id, error = %e, "owner lookup failed, using placeholder");
                self.placeholder_owner()
            }
        }
    }

    pub(crate) async fn display_name(&self, user_id: &str) -> String {
        self.owner_display(user_id).await.0
    }

    fn placeholder_owner(&self) -> (String, String) {
        (
            UNKNOWN_OWNER_NAME.to_string(),
            self.settings().unknown_owner_email.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use lnf_core::enums::{ItemStatus, UserRole};
    use lnf_core::ports::Repository;
    use lnf_core::updates::ItemPatchBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::error::ErrorKind;
    use crate::test_support::{Harness, harness, put_item, seed_user};

    /// `count` items owned by `usr-1`, one minute apart, `itm-01` oldest.
    async fn catalog(count: u32, status: ItemStatus) -> Harness {
        let h = harness();
        seed_user(&h.repo, "usr-1", "Ana", UserRole::User).await;
        let start = Utc::now() - Duration::days(1);
        for n in 1..=count {
            let id = format!("itm-{n:02}");
            put_item(&h.repo, &id, "usr-1", status, start + Duration::minutes(i64::from(n))).await;
        }
        h
    }

    fn page(n: u32) -> ListQuery {
        ListQuery {
            page: Some(n),
            per_page: Some(12),
            ..ListQuery::default()
        }
    }

    #[tokio::test]
    async fn pages_through_twenty_five_items() {
        let h = catalog(25, ItemStatus::Found).await;

        let first = h.service.list_items(ViewerRole::Public, &page(1)).await.unwrap();
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.total, 25);
        assert_eq!(first.pages, 3);
        assert_eq!(first.items[0].item.id, "itm-25");

        let third = h.service.list_items(ViewerRole::Public, &page(3)).await.unwrap();
        assert_eq!(third.items.len(), 1);
        assert_eq!(third.items[0].item.id, "itm-01");

        let past_end = h.service.list_items(ViewerRole::Public, &page(4)).await.unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 25);
        assert_eq!(past_end.page, 4);
    }

    #[tokio::test]
    async fn default_page_size_comes_from_settings() {
        let h = catalog(15, ItemStatus::Lost).await;
        let listed = h
            .service
            .list_items(ViewerRole::Public, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.per_page, 12);
        assert_eq!(listed.page, 1);
        assert_eq!(listed.items.len(), 12);
    }

    #[rstest]
    #[case(ListQuery::default())]
    #[case(ListQuery { status: Some(ItemStatus::Returned), ..ListQuery::default() })]
    #[case(ListQuery { search: Some("item".into()), ..ListQuery::default() })]
    #[case(ListQuery { category: Some("other".into()), ..ListQuery::default() })]
    #[tokio::test]
    async fn returned_items_stay_hidden_from_public(#[case] query: ListQuery) {
        let h = catalog(2, ItemStatus::Found).await;
        put_item(&h.repo, "itm-ret", "usr-1", ItemStatus::Returned, Utc::now()).await;

        let public = h.service.list_items(ViewerRole::Public, &query).await.unwrap();
        assert!(public.items.iter().all(|v| v.item.status != ItemStatus::Returned));

        let admin = h.service.list_items(ViewerRole::Admin, &query).await.unwrap();
        assert!(admin.items.iter().any(|v| v.item.id == "itm-ret"));
    }

    #[tokio::test]
    async fn public_total_excludes_returned() {
        let h = catalog(3, ItemStatus::Lost).await;
        put_item(&h.repo, "itm-ret", "usr-1", ItemStatus::Returned, Utc::now()).await;

        let public = h
            .service
            .list_items(ViewerRole::Public, &ListQuery::default())
            .await
            .unwrap();
        let admin = h
            .service
            .list_items(ViewerRole::Admin, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(public.total, 3);
        assert_eq!(admin.total, 4);
    }

    #[tokio::test]
    async fn search_and_category_narrow_the_listing() {
        let h = catalog(3, ItemStatus::Found).await;
        h.repo
            .update_item_fields(
                "itm-02",
                &ItemPatchBuilder::new()
                    .title("Blue Backpack")
                    .category("accessories")
                    .build(),
                Utc::now(),
            )
            .await
            .unwrap();

        let by_search = h
            .service
            .list_items(
                ViewerRole::Public,
                &ListQuery {
                    search: Some("backpack".into()),
                    ..ListQuery::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_search.total, 1);
        assert_eq!(by_search.items[0].item.id, "itm-02");

        let by_category = h
            .service
            .list_items(
                ViewerRole::Public,
                &ListQuery {
                    category: Some("other".into()),
                    ..ListQuery::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_category.total, 2);
    }

    #[tokio::test]
    async fn same_timestamp_breaks_tie_by_id() {
        let h = harness();
        seed_user(&h.repo, "usr-1", "Ana", UserRole::User).await;
        let at = Utc::now();
        put_item(&h.repo, "itm-a", "usr-1", ItemStatus::Found, at).await;
        put_item(&h.repo, "itm-b", "usr-1", ItemStatus::Found, at).await;

        let listed = h
            .service
            .list_items(ViewerRole::Public, &ListQuery::default())
            .await
            .unwrap();
        let ids: Vec<&str> = listed.items.iter().map(|v| v.item.id.as_str()).collect();
        assert_eq!(ids, ["itm-b", "itm-a"]);
    }

    #[tokio::test]
    async fn items_carry_owner_display_data() {
        let h = catalog(1, ItemStatus::Found).await;
        put_item(&h.repo, "itm-orphan", "usr-gone", ItemStatus::Lost, Utc::now()).await;

        let listed = h
            .service
            .list_items(ViewerRole::Public, &ListQuery::default())
            .await
            .unwrap();
        let orphan = &listed.items[0];
        assert_eq!(orphan.item.id, "itm-orphan");
        assert_eq!(orphan.user_name, "Unknown");
        assert_eq!(orphan.user_email, "team@example.com");

        let owned = &listed.items[1];
        assert_eq!(owned.user_name, "Ana");
        assert_eq!(owned.user_email, "ana@campus.test");
    }

    #[tokio::test]
    async fn returned_item_detail_is_admin_only() {
        let h = catalog(0, ItemStatus::Found).await;
        put_item(&h.repo, "itm-ret", "usr-1", ItemStatus::Returned, Utc::now()).await;

        let err = h
            .service
            .get_item(ViewerRole::Public, "itm-ret")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let detail = h.service.get_item(ViewerRole::Admin, "itm-ret").await.unwrap();
        assert_eq!(detail.view.item.id, "itm-ret");
        assert_eq!(detail.view.user_name, "Ana");
        assert!(detail.additional_images.is_empty());
    }

    #[tokio::test]
    async fn missing_item_detail_is_not_found() {
        let h = harness();
        let err = h
            .service
            .get_item(ViewerRole::Admin, "itm-404")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn categories_are_sorted_by_name() {
        let h = harness();
        let names: Vec<String> = h
            .service
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            names,
            ["accessories", "books", "clothing", "documents", "electronics", "other"]
        );
    }

    #[rstest]
    #[case(None, None, PageWindow { page: 1, per_page: 12 })]
    #[case(Some(0), Some(0), PageWindow { page: 1, per_page: 1 })]
    #[case(Some(3), Some(500), PageWindow { page: 3, per_page: 100 })]
    #[case(Some(2), Some(5), PageWindow { page: 2, per_page: 5 })]
    fn window_is_clamped(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] expected: PageWindow,
    ) {
        assert_eq!(PageWindow::resolve(page, per_page, 12, 100), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(12, 1)]
    #[case(13, 2)]
    #[case(25, 3)]
    fn page_count_rounds_up(#[case] total: u64, #[case] pages: u32) {
        let window = PageWindow::resolve(None, Some(12), 12, 100);
        assert_eq!(window.page_count(total), pages);
    }

    #[test]
    fn offset_of_third_page() {
        let window = PageWindow::resolve(Some(3), Some(12), 12, 100);
        assert_eq!(window.offset(), 24);
    }
}
