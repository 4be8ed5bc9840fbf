//! MongoDB implementation of UserRepository

use std::sync::Arc;

use async_trait::async_trait;
use database::ConnectionCache;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use tokio::sync::OnceCell;
use tracing::{instrument, warn};

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserDocument};
use crate::repository::UserRepository;

pub const COLLECTION: &str = "users";

const DUPLICATE_KEY: i32 = 11000;

/// Ensure the unique index on `email`.
///
/// Idempotent.
pub async fn init_indexes(db: &Database) -> Result<(), MongoError> {
    let index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build(),
        )
        .build();

    db.collection::<UserDocument>(COLLECTION)
        .create_index(index)
        .await?;

    tracing::info!(collection = COLLECTION, "User indexes ensured");
    Ok(())
}

/// Best-effort [`init_indexes`]: a failure is logged and otherwise ignored.
///
/// The upsert still works without the index; only the duplicate-key fallback
/// for racing first sign-ins loses its trigger.
pub async fn ensure_indexes(db: &Database) {
    if let Err(e) = init_indexes(db).await {
        warn!(collection = COLLECTION, error = %e, "Could not ensure user indexes");
    }
}

pub struct MongoUserRepository {
    connection: Arc<ConnectionCache<Database>>,
    /// Set once the first index attempt has run, whatever its outcome
    indexes: OnceCell<()>,
}

impl MongoUserRepository {
    pub fn new(connection: Arc<ConnectionCache<Database>>) -> Self {
        Self {
            connection,
            indexes: OnceCell::new(),
        }
    }

    async fn collection(&self) -> UserResult<Collection<UserDocument>> {
        let db = self.connection.ensure_connected().await?;
        self.indexes.get_or_init(|| ensure_indexes(&db)).await;
        Ok(db.collection::<UserDocument>(COLLECTION))
    }
}

fn into_user(doc: UserDocument) -> UserResult<User> {
    let id = doc.id.clone();
    User::try_from(doc).map_err(|e| UserError::Database(format!("invalid _id '{id}': {e}")))
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn upsert_by_email(&self, input: NewUser) -> UserResult<User> {
        let collection = self.collection().await?;
        let email = input.email.clone();
        let fresh = UserDocument::from(&User::new(input));

        // The filter supplies `email` on insert.
        let update = doc! {
            "$setOnInsert": {
                "_id": fresh.id.clone(),
                "name": fresh.name.clone(),
                "image": fresh.image.clone(),
                "createdAt": fresh.created_at,
                "updatedAt": fresh.updated_at,
            }
        };

        let result = collection
            .find_one_and_update(doc! { "email": email.as_str() }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await;

        let doc = match result {
            Ok(doc) => doc,
            // Lost an insert race on the unique index; the winner's row is there now.
            Err(e) if is_duplicate_key(&e) => {
                tracing::debug!("Concurrent first sign-in, reading existing user");
                collection.find_one(doc! { "email": email.as_str() }).await?
            }
            Err(e) => return Err(e.into()),
        };

        let user = into_user(
            doc.ok_or_else(|| UserError::Database("upsert returned no document".into()))?,
        )?;

        if user.id.to_string() == fresh.id {
            tracing::info!(user_id = %user.id, "Created user on first sign-in");
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.collection()
            .await?
            .find_one(doc! { "email": email })
            .await?
            .map(into_user)
            .transpose()
    }
}
