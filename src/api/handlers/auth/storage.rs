//! Database access for the lifecycle stores.
//!
//! All expiry arithmetic happens in Postgres: issuance writes
//! `NOW() + ttl` and validation reads `expires_at <= NOW()` in the same
//! statement, so both sides of the comparison share one clock. The conflict
//! points are single statements (upsert) or transactions (consume, reset),
//! never application-level locks.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Activated account row.
pub(super) struct AccountRecord {
    pub(super) id: Uuid,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) password_hash: String,
}

/// Newest reset challenge for an account, with the expiry already resolved
/// against the database clock.
pub(super) struct ChallengeRecord {
    pub(super) otp_code: String,
    pub(super) expired: bool,
}

/// Outcome of consuming a staged registration.
#[derive(Debug)]
pub(super) enum VerifyOutcome {
    Activated(Uuid),
    NoPending,
    CodeMismatch,
    Expired,
}

/// Outcome of a password reset attempt.
#[derive(Debug)]
pub(super) enum ResetOutcome {
    Completed,
    NoChallenge,
    CodeMismatch,
    Expired,
}

pub(super) async fn lookup_account(pool: &PgPool, email: &str) -> Result<Option<AccountRecord>> {
    let query = "SELECT id, name, email, password_hash FROM accounts WHERE email = $1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup account")?;

    Ok(row.map(|row| AccountRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
    }))
}

/// Stage a signup behind its code. The upsert replaces any previous staging
/// row for the email in one atomic statement, so re-requesting invalidates
/// the prior code with no window where two rows (or none) exist.
pub(super) async fn stage_registration(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
    otp_code: &str,
    ttl_seconds: i64,
) -> Result<()> {
    let query = r"
        INSERT INTO pending_registrations (email, name, password_hash, otp_code, expires_at)
        VALUES ($1, $2, $3, $4, NOW() + ($5 * INTERVAL '1 second'))
        ON CONFLICT (email) DO UPDATE
        SET name = EXCLUDED.name,
            password_hash = EXCLUDED.password_hash,
            otp_code = EXCLUDED.otp_code,
            expires_at = EXCLUDED.expires_at,
            created_at = NOW()
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .bind(otp_code)
        .bind(ttl_seconds)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to stage registration")?;

    Ok(())
}

/// Consume the staged registration and activate the account.
///
/// The delete is the consumption point: on code mismatch or expiry the
/// transaction rolls back and the row survives for another attempt, while a
/// successful path inserts the account and commits, making delete+insert one
/// atomic unit. A concurrent verifier blocks on the row lock and then
/// deletes nothing, observing `NoPending` rather than a second activation.
///
/// Check order is existence, then code, then expiry: a wrong code on an
/// already-expired row reports the mismatch.
pub(super) async fn complete_registration(
    pool: &PgPool,
    email: &str,
    otp: &str,
) -> Result<VerifyOutcome> {
    let mut tx = pool
        .begin()
        .await
        .context("begin register-verify transaction")?;

    let query = r"
        DELETE FROM pending_registrations
        WHERE email = $1
        RETURNING name, password_hash, otp_code, (expires_at <= NOW()) AS expired
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(&mut *tx)
        .instrument(span)
        .await
        .context("failed to consume pending registration")?;

    let Some(row) = row else {
        let _ = tx.rollback().await;
        return Ok(VerifyOutcome::NoPending);
    };

    let stored_code: String = row.get("otp_code");
    if stored_code != otp {
        let _ = tx.rollback().await;
        return Ok(VerifyOutcome::CodeMismatch);
    }

    let expired: bool = row.get("expired");
    if expired {
        let _ = tx.rollback().await;
        return Ok(VerifyOutcome::Expired);
    }

    let name: String = row.get("name");
    let password_hash: String = row.get("password_hash");
    let query = r"
        INSERT INTO accounts (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .instrument(span)
        .await
        .context("failed to insert account")?;

    let account_id: Uuid = row.get("id");
    tx.commit()
        .await
        .context("commit register-verify transaction")?;

    Ok(VerifyOutcome::Activated(account_id))
}

/// Append a reset challenge. Prior rows are left in place; recency decides
/// which one is authoritative.
pub(super) async fn insert_challenge(
    pool: &PgPool,
    account_id: Uuid,
    otp_code: &str,
    ttl_seconds: i64,
) -> Result<()> {
    let query = r"
        INSERT INTO otp_challenges (account_id, otp_code, created_at, expires_at)
        VALUES ($1, $2, NOW(), NOW() + ($3 * INTERVAL '1 second'))
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(account_id)
        .bind(otp_code)
        .bind(ttl_seconds)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to insert otp challenge")?;

    Ok(())
}

/// Read the newest challenge for an account without consuming anything.
pub(super) async fn latest_challenge(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<ChallengeRecord>> {
    let query = r"
        SELECT otp_code, (expires_at <= NOW()) AS expired
        FROM otp_challenges
        WHERE account_id = $1
        ORDER BY id DESC
        LIMIT 1
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(account_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup latest challenge")?;

    Ok(row.map(|row| ChallengeRecord {
        otp_code: row.get("otp_code"),
        expired: row.get("expired"),
    }))
}

/// Overwrite the digest and purge the account's entire challenge history as
/// one atomic unit. The purge, not a per-row flag, is the single-use
/// enforcement: after any successful reset every outstanding code is gone.
///
/// Check order here is existence, then expiry, then code - the reverse
/// tie-break from registration verification, kept deliberately.
pub(super) async fn reset_password(
    pool: &PgPool,
    account_id: Uuid,
    otp: &str,
    new_password_hash: &str,
) -> Result<ResetOutcome> {
    let mut tx = pool
        .begin()
        .await
        .context("begin reset-password transaction")?;

    // Lock the newest challenge so concurrent resets serialize; the loser
    // re-evaluates after commit and finds the history already purged.
    let query = r"
        SELECT otp_code, (expires_at <= NOW()) AS expired
        FROM otp_challenges
        WHERE account_id = $1
        ORDER BY id DESC
        LIMIT 1
        FOR UPDATE
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(account_id)
        .fetch_optional(&mut *tx)
        .instrument(span)
        .await
        .context("failed to lock latest challenge")?;

    let Some(row) = row else {
        let _ = tx.rollback().await;
        return Ok(ResetOutcome::NoChallenge);
    };

    let expired: bool = row.get("expired");
    if expired {
        let _ = tx.rollback().await;
        return Ok(ResetOutcome::Expired);
    }

    let stored_code: String = row.get("otp_code");
    if stored_code != otp {
        let _ = tx.rollback().await;
        return Ok(ResetOutcome::CodeMismatch);
    }

    let query = r"
        UPDATE accounts
        SET password_hash = $2,
            updated_at = NOW()
        WHERE id = $1
    ";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(account_id)
        .bind(new_password_hash)
        .execute(&mut *tx)
        .instrument(span)
        .await
        .context("failed to update password digest")?;

    let query = "DELETE FROM otp_challenges WHERE account_id = $1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(account_id)
        .execute(&mut *tx)
        .instrument(span)
        .await
        .context("failed to purge otp challenges")?;

    tx.commit()
        .await
        .context("commit reset-password transaction")?;

    Ok(ResetOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::{ResetOutcome, VerifyOutcome};

    #[test]
    fn verify_outcome_debug_names() {
        assert_eq!(format!("{:?}", VerifyOutcome::NoPending), "NoPending");
        assert_eq!(format!("{:?}", VerifyOutcome::CodeMismatch), "CodeMismatch");
        assert_eq!(format!("{:?}", VerifyOutcome::Expired), "Expired");
    }

    #[test]
    fn reset_outcome_debug_names() {
        assert_eq!(format!("{:?}", ResetOutcome::Completed), "Completed");
        assert_eq!(format!("{:?}", ResetOutcome::NoChallenge), "NoChallenge");
        assert_eq!(format!("{:?}", ResetOutcome::CodeMismatch), "CodeMismatch");
        assert_eq!(format!("{:?}", ResetOutcome::Expired), "Expired");
    }
}
