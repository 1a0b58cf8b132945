//! Contact Repository (Singleton)
//!
//! One record per installation under a fixed key, updated by merge.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Contact, ContactUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "contact";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct ContactRepository {
    base: BaseRepository,
}

impl ContactRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get the singleton contact record
    pub async fn get(&self) -> RepoResult<Option<Contact>> {
        let contact: Option<Contact> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(contact)
    }

    /// Get or create the singleton contact record
    pub async fn get_or_create(&self) -> RepoResult<Contact> {
        if let Some(contact) = self.get().await? {
            return Ok(contact);
        }

        let contact = Contact {
            updated_at: shared::util::now_millis(),
            ..Contact::default()
        };

        let created: Option<Contact> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(contact)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create contact info".to_string()))
    }

    /// Update contact info (partial merge)
    pub async fn update(&self, data: ContactUpdate) -> RepoResult<Contact> {
        // Ensure the singleton exists
        self.get_or_create().await?;

        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updatedAt = $now")
            .bind(("id", singleton_id.clone()))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let updated: Option<Contact> = self.base.db().update(singleton_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update contact info".to_string()))
    }
}
