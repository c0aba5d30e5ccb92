//! Account service

use chrono::Utc;
use congtac_api::Page;
use congtac_common::error::CongtacError;
use congtac_persistence::entity::users;
use congtac_persistence::sea_orm::sea_query::Asterisk;
use congtac_persistence::sea_orm::*;
use uuid::Uuid;

use crate::model::UserSummary;

/// Find a live account by username
pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> anyhow::Result<Option<users::Model>> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    Ok(user)
}

/// Find a live account by email
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> anyhow::Result<Option<users::Model>> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    Ok(user)
}

/// Find a live account by id
pub async fn find_by_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> anyhow::Result<Option<users::Model>> {
    let user = users::Entity::find_by_id(user_id)
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    Ok(user)
}

/// Create a new account; the password is hashed here
pub async fn create(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password: &str,
    full_name: &str,
    role: &str,
) -> anyhow::Result<users::Model> {
    let hashed_password = bcrypt::hash(password, 10u32)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let entity = users::ActiveModel {
        user_id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password: Set(hashed_password),
        full_name: Set(Some(full_name.to_string())),
        role: Set(role.to_string()),
        avatar_url: Set(None),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        deleted_at: Set(None),
    };

    let model = entity.insert(db).await?;

    Ok(model)
}

/// Check username/password credentials.
///
/// Locked accounts fail with `AccountLocked`; everything else that does not
/// match fails with the non-discriminating `InvalidCredentials`.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> anyhow::Result<users::Model> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(CongtacError::InvalidCredentials.into()),
    };

    if user.deleted_at.is_some() {
        return Err(CongtacError::AccountLocked(username.to_string()).into());
    }

    let matches = bcrypt::verify(password, &user.password).unwrap_or(false);
    if !matches {
        return Err(CongtacError::InvalidCredentials.into());
    }

    Ok(user)
}

/// Replace an account's password
pub async fn update_password(
    db: &DatabaseConnection,
    user_id: Uuid,
    new_password: &str,
) -> anyhow::Result<()> {
    match find_by_id(db, user_id).await? {
        Some(entity) => {
            let mut user: users::ActiveModel = entity.into();

            let hashed_password = bcrypt::hash(new_password, 10u32)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
            user.password = Set(hashed_password);
            user.updated_at = Set(Some(Utc::now()));

            user.update(db).await?;

            Ok(())
        }
        None => Err(CongtacError::UserNotExist(user_id.to_string()).into()),
    }
}

/// Paginated account listing for the admin console, optionally filtered by
/// username substring. Locked accounts are included so they can be unlocked.
pub async fn search_page(
    db: &DatabaseConnection,
    username: &str,
    page_no: u64,
    page_size: u64,
) -> anyhow::Result<Page<UserSummary>> {
    let mut count_select = users::Entity::find();
    let mut query_select = users::Entity::find();

    if !username.is_empty() {
        count_select = count_select.filter(users::Column::Username.contains(username));
        query_select = query_select.filter(users::Column::Username.contains(username));
    }

    let total_count = count_select
        .select_only()
        .column_as(prelude::Expr::col(Asterisk).count(), "count")
        .into_tuple::<i64>()
        .one(db)
        .await?
        .unwrap_or_default() as u64;

    if total_count > 0 {
        let offset = (page_no.max(1) - 1) * page_size;
        let page_items = query_select
            .order_by_desc(users::Column::CreatedAt)
            .offset(offset)
            .limit(page_size)
            .all(db)
            .await?
            .into_iter()
            .map(UserSummary::from)
            .collect();

        return Ok(Page::<UserSummary>::new(
            total_count,
            page_no,
            page_size,
            page_items,
        ));
    }

    Ok(Page::<UserSummary>::default())
}

/// Admin update: change role and/or toggle the lock (soft delete) flag
pub async fn update_account(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: Option<String>,
    locked: Option<bool>,
) -> anyhow::Result<()> {
    // Locked accounts must stay reachable here, so no deleted_at filter
    match users::Entity::find_by_id(user_id).one(db).await? {
        Some(entity) => {
            let mut user: users::ActiveModel = entity.into();

            if let Some(role) = role {
                user.role = Set(role);
            }
            if let Some(locked) = locked {
                user.deleted_at = Set(if locked { Some(Utc::now()) } else { None });
            }
            user.updated_at = Set(Some(Utc::now()));

            user.update(db).await?;

            Ok(())
        }
        None => Err(CongtacError::UserNotExist(user_id.to_string()).into()),
    }
}
