//! Banner Repository
//!
//! The placement type is the record key (`banner:homepage`), so
//! create-or-replace cannot produce duplicates per type.

use super::{BaseRepository, CountResult, RepoError, RepoResult};
use crate::db::models::{ActiveStatus, Banner, BannerType, BannerUpsert};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "banner";

#[derive(Clone)]
pub struct BannerRepository {
    base: BaseRepository,
}

impl BannerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All banners (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Banner>> {
        let banners: Vec<Banner> = self
            .base
            .db()
            .query("SELECT * FROM banner ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(banners)
    }

    /// Find banner by placement type
    pub async fn find_by_type(&self, banner_type: BannerType) -> RepoResult<Option<Banner>> {
        let banner: Option<Banner> = self
            .base
            .db()
            .select((TABLE, banner_type.record_key()))
            .await?;
        Ok(banner)
    }

    /// Active banners for the public site, optionally for one placement
    pub async fn find_public(&self, banner_type: Option<BannerType>) -> RepoResult<Vec<Banner>> {
        match banner_type {
            Some(t) => {
                let banner = self.find_by_type(t).await?;
                Ok(banner
                    .into_iter()
                    .filter(|b| b.status == ActiveStatus::Active)
                    .collect())
            }
            None => {
                let banners: Vec<Banner> = self
                    .base
                    .db()
                    .query("SELECT * FROM banner WHERE status = 'ACTIVE'")
                    .await?
                    .take(0)?;
                Ok(banners)
            }
        }
    }

    /// Create or replace the banner for a placement
    pub async fn upsert(&self, data: BannerUpsert) -> RepoResult<Banner> {
        let banner_type = data
            .banner_type
            .ok_or_else(|| RepoError::Validation("type is required".to_string()))?;

        let now = shared::util::now_millis();
        let created_at = self
            .find_by_type(banner_type)
            .await?
            .map(|b| b.created_at)
            .unwrap_or(now);

        let banner = Banner {
            id: None,
            banner_type,
            link: data.link,
            status: data.status.unwrap_or_default(),
            image: data.image,
            created_at,
            updated_at: now,
        };

        let upserted: Option<Banner> = self
            .base
            .db()
            .upsert((TABLE, banner_type.record_key()))
            .content(banner)
            .await?;
        upserted.ok_or_else(|| RepoError::Database("Failed to upsert banner".to_string()))
    }

    /// Hard delete a banner
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.base.parse_id(TABLE, id)?;
        let existing: Option<Banner> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Banner {} not found", id)));
        }

        let _: Option<Banner> = self.base.db().delete(rid).await?;
        Ok(true)
    }

    /// Total banner count (dashboard)
    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM banner GROUP ALL")
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        Ok(count.first().map(|c| c.total).unwrap_or(0))
    }
}
