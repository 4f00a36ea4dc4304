use crate::db::DbPool;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel::r2d2::PoolError;
use thiserror::Error;

use super::crypto::{generate_token, hash_token};

/// Create a session for `user_id` and return the plaintext token.
/// Only the token's hash is stored.
pub fn create_session(
    conn: &mut PgConnection,
    user_id: uuid::Uuid,
    ttl: Duration,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + ttl;

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

#[derive(Error, Debug)]
pub enum SessionLookupError {
    #[error("database unavailable: {0}")]
    Pool(#[from] PoolError),

    #[error("session query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// `Ok(None)` when no live session matches the token.
pub async fn get_user_from_token(
    pool: &DbPool,
    token: &str,
) -> Result<Option<User>, SessionLookupError> {
    let mut conn = pool.get()?;
    let token_hash = hash_token(token);

    let user = sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .filter(users::deleted_at.is_null())
        .select(User::as_select())
        .first(&mut conn)
        .optional()?;

    Ok(user)
}
