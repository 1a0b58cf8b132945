//! Media Repository
//!
//! Media rows are created by the upload adapter only. Entity deletes
//! never cascade into media; deleting a media row is refused while a
//! content entity still references it.

use super::{BaseRepository, CountResult, RepoError, RepoResult};
use crate::db::models::Media;
use shared::PageQuery;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "media";

#[derive(Clone)]
pub struct MediaRepository {
    base: BaseRepository,
}

impl MediaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert an upload metadata row
    pub async fn create(&self, media: Media) -> RepoResult<Media> {
        let created: Option<Media> = self
            .base
            .db()
            .create((TABLE, shared::util::snowflake_id()))
            .content(media)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create media record".to_string()))
    }

    /// Find media by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Media>> {
        let rid = self.base.parse_id(TABLE, id)?;
        let media: Option<Media> = self.base.db().select(rid).await?;
        Ok(media)
    }

    /// Paged listing, newest first
    pub async fn find_page(&self, page: &PageQuery) -> RepoResult<(Vec<Media>, u64)> {
        let sql = format!(
            "SELECT count() AS total FROM {TABLE} GROUP ALL; \
             SELECT * FROM {TABLE} ORDER BY createdAt DESC LIMIT {} START {}",
            page.limit(),
            page.offset()
        );
        let mut result = self.base.db().query(sql).await?;

        let count: Vec<CountResult> = result.take(0)?;
        let total = count.first().map(|c| c.total).unwrap_or(0);
        let media: Vec<Media> = result.take(1)?;
        Ok((media, total))
    }

    /// Number of content rows referencing a media id
    ///
    /// Media references are stored in string form (`media:xyz`).
    pub async fn reference_count(&self, id: &str) -> RepoResult<u64> {
        let rid = self.base.parse_id(TABLE, id)?;
        let media_ref = rid.to_string();

        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() AS total FROM service \
                 WHERE featureImage = $m OR featureImageEn = $m GROUP ALL; \
                 SELECT count() AS total FROM post WHERE featureImage = $m GROUP ALL; \
                 SELECT count() AS total FROM team_member \
                 WHERE image = $m OR imageEn = $m GROUP ALL; \
                 SELECT count() AS total FROM banner WHERE image = $m GROUP ALL",
            )
            .bind(("m", media_ref))
            .await?;

        let mut total = 0;
        for i in 0..4 {
            let count: Vec<CountResult> = result.take(i)?;
            total += count.first().map(|c| c.total).unwrap_or(0);
        }
        Ok(total)
    }

    /// Delete a media row; refused while references exist
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.base.parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Media {} not found", id)))?;

        if self.reference_count(id).await? > 0 {
            return Err(RepoError::Validation(
                "Cannot delete media that is still referenced by content".to_string(),
            ));
        }

        let _: Option<Media> = self.base.db().delete(rid).await?;
        Ok(true)
    }

    /// Total media count (dashboard)
    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM media GROUP ALL")
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        Ok(count.first().map(|c| c.total).unwrap_or(0))
    }
}
