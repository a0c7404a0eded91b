use std::sync::Arc;

use anyhow::Context;
use lnf_config::LnfConfig;
use lnf_core::enums::ViewerRole;
use lnf_core::identity::Identity;
use lnf_core::ports::IdentityResolver;
use lnf_db::LnfDb;
use lnf_engine::blob::ObjectBlobStore;
use lnf_engine::{CatalogError, CatalogService, ListingSettings};

/// Everything a command handler needs: the engine, the database it runs on,
/// and the resolved caller.
pub struct AppContext {
    pub service: CatalogService,
    pub db: Arc<LnfDb>,
    pub identity: Option<Identity>,
}

impl AppContext {
    /// Wire the engine over `db` and resolve `token` to a caller identity.
    ///
    /// A configured but unusable storage section is logged and the engine runs
    /// without a blob store; uploads then degrade the way they do on failure.
    pub async fn init(
        db: Arc<LnfDb>,
        config: &LnfConfig,
        token: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut service = CatalogService::new(db.clone())
            .with_settings(ListingSettings::from(&config.general));

        if config.storage.is_configured() {
            match ObjectBlobStore::from_config(&config.storage) {
                Ok(store) => service = service.with_blob_store(Arc::new(store)),
                Err(error) => {
                    tracing::warn!(%error, "image storage unavailable; uploads will be skipped");
                }
            }
        } else {
            tracing::debug!("storage not configured; item images will not be uploaded");
        }

        let identity = match token {
            Some(token) => Some(
                db.resolve(token)
                    .await
                    .context("failed to resolve API token")?
                    .ok_or_else(|| anyhow::anyhow!("unknown API token"))?,
            ),
            None => None,
        };

        Ok(Self {
            service,
            db,
            identity,
        })
    }

    /// Admins see everything, everyone else gets the public view.
    pub fn viewer(&self) -> ViewerRole {
        self.identity
            .as_ref()
            .map_or(ViewerRole::Public, Identity::viewer)
    }

    pub fn require_identity(&self) -> Result<&Identity, CatalogError> {
        self.identity.as_ref().ok_or(CatalogError::Unauthenticated)
    }

    pub fn require_admin(&self) -> anyhow::Result<&Identity> {
        let identity = self.require_identity()?;
        if !identity.is_admin() {
            anyhow::bail!("this command requires an admin token");
        }
        Ok(identity)
    }
}
