//! Password-reset OTP service

use chrono::{Duration, Utc};
use congtac_common::error::CongtacError;
use congtac_persistence::entity::password_resets;
use congtac_persistence::sea_orm::*;
use rand::Rng;
use uuid::Uuid;

use crate::model::OTP_EXPIRE_SECONDS;

/// Generate a 6-digit code
fn generate_code() -> String {
    let code: u32 = rand::rng().random_range(0..1_000_000);
    format!("{:06}", code)
}

/// Issue a fresh OTP for the user.
///
/// Any earlier unused codes are retired first so only the newest code can
/// ever verify.
pub async fn issue(db: &DatabaseConnection, user_id: Uuid) -> anyhow::Result<String> {
    password_resets::Entity::update_many()
        .col_expr(
            password_resets::Column::DeletedAt,
            prelude::Expr::value(Some(Utc::now())),
        )
        .filter(password_resets::Column::UserId.eq(user_id))
        .filter(password_resets::Column::Used.eq(false))
        .filter(password_resets::Column::DeletedAt.is_null())
        .exec(db)
        .await?;

    let code = generate_code();
    let entity = password_resets::ActiveModel {
        user_id: Set(user_id),
        token: Set(code.clone()),
        expires_at: Set(Utc::now() + Duration::seconds(OTP_EXPIRE_SECONDS)),
        used: Set(false),
        deleted_at: Set(None),
        ..Default::default()
    };

    entity.insert(db).await?;

    Ok(code)
}

/// Verify and consume an OTP. Fails with `OtpInvalid` when no live, unused,
/// unexpired code matches.
pub async fn verify(db: &DatabaseConnection, user_id: Uuid, code: &str) -> anyhow::Result<()> {
    let reset = password_resets::Entity::find()
        .filter(password_resets::Column::UserId.eq(user_id))
        .filter(password_resets::Column::Token.eq(code))
        .filter(password_resets::Column::Used.eq(false))
        .filter(password_resets::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    let reset = match reset {
        Some(r) => r,
        None => return Err(CongtacError::OtpInvalid.into()),
    };

    if reset.expires_at < Utc::now() {
        return Err(CongtacError::OtpInvalid.into());
    }

    let mut active: password_resets::ActiveModel = reset.into();
    active.used = Set(true);
    active.update(db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..32 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
