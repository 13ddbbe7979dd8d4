//! Account provisioning and login.
//!
//! Login is staged so the shell can tell the user which part was wrong:
//! unknown email, then wrong password, then missing role, then course.

use lectern_db::queries::{courses, identity};
use lectern_types::identity::{Role, Session};
use lectern_types::{CourseId, PostCreatorId, UserId};
use rusqlite::Connection;

use crate::credentials::{self, PasswordCost};
use crate::{ForumError, Result};

/// Input for [`provision_account`].
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Identifiers assigned to a provisioned account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub user_id: UserId,
    pub post_creator_id: PostCreatorId,
}

/// Create a user with its post creator, role record and credential.
pub fn provision_account(
    conn: &mut Connection,
    account: &NewAccount,
    cost: &PasswordCost,
) -> Result<Account> {
    let hash = credentials::hash_password(&account.password, cost)?;
    let ids = Account {
        user_id: UserId::new_v4(),
        post_creator_id: PostCreatorId::new_v4(),
    };

    let tx = conn.transaction()?;
    identity::insert_user(&tx, ids.user_id, &account.name, &account.email)?;
    identity::insert_post_creator(&tx, ids.post_creator_id, account.role)?;
    identity::insert_role(&tx, ids.user_id, ids.post_creator_id, account.role)?;
    identity::insert_credential(&tx, &account.email, &hash)?;
    tx.commit()?;

    tracing::info!(user = %ids.user_id, role = %account.role, "account provisioned");
    Ok(ids)
}

/// First login stage: the email must belong to a user.
pub fn check_email(conn: &Connection, email: &str) -> Result<()> {
    identity::get_by_email(conn, email.trim())?;
    Ok(())
}

/// Resolve credentials to a session for `expected` role.
///
/// With `course` set the user must be a member of it. Without, the user's
/// memberships decide: a single one is used as is, several fall back to the
/// earliest enrollment.
pub fn login(
    conn: &Connection,
    email: &str,
    password: &str,
    expected: Role,
    course: Option<CourseId>,
) -> Result<Session> {
    let email = email.trim();
    let user = identity::get_by_email(conn, email)?;

    let Some(stored) = identity::password_hash(conn, email)? else {
        tracing::debug!(user = %user.user_id, "no credential on record");
        return Err(ForumError::AuthenticationFailed);
    };
    if !credentials::verify_password(password, &stored)? {
        tracing::debug!(user = %user.user_id, "password rejected");
        return Err(ForumError::AuthenticationFailed);
    }

    let post_creator_id = match identity::role_of(conn, user.user_id)? {
        Some((role, pcid)) if role == expected => pcid,
        actual => {
            tracing::debug!(user = %user.user_id, %expected, "role mismatch");
            return Err(ForumError::RoleMismatch {
                expected,
                actual: actual.map(|(role, _)| role),
            });
        }
    };

    let course_id = resolve_course(conn, user.user_id, course)?;
    tracing::info!(user = %user.user_id, role = %expected, course = %course_id, "logged in");
    Ok(Session {
        user_id: user.user_id,
        role: expected,
        course_id,
        post_creator_id,
    })
}

fn resolve_course(conn: &Connection, user_id: UserId, course: Option<CourseId>) -> Result<CourseId> {
    if let Some(course_id) = course {
        if courses::is_member(conn, user_id, course_id)? {
            return Ok(course_id);
        }
        return Err(ForumError::NotFound(format!(
            "membership of user {user_id} in course {course_id}"
        )));
    }

    let memberships = courses::memberships_of(conn, user_id)?;
    match memberships.as_slice() {
        [] => Err(ForumError::NotFound(format!("course membership of user {user_id}"))),
        [only] => Ok(*only),
        [first, ..] => {
            tracing::warn!(
                user = %user_id,
                memberships = memberships.len(),
                course = %first,
                "user belongs to several courses, using the earliest"
            );
            Ok(*first)
        }
    }
}

/// Replace a password after checking the current one. The new hash uses
/// `cost`, so this also upgrades hashes made with older parameters.
pub fn change_password(
    conn: &Connection,
    email: &str,
    current: &str,
    new_password: &str,
    cost: &PasswordCost,
) -> Result<()> {
    let email = email.trim();
    let user = identity::get_by_email(conn, email)?;
    let stored = identity::password_hash(conn, email)?.ok_or(ForumError::AuthenticationFailed)?;
    if !credentials::verify_password(current, &stored)? {
        return Err(ForumError::AuthenticationFailed);
    }
    let hash = credentials::hash_password(new_password, cost)?;
    identity::update_credential(conn, email, &hash)?;
    tracing::info!(user = %user.user_id, "password changed");
    Ok(())
}

/// Delete a user. Credentials, memberships, reactions, the role record and
/// authored posts go with it.
pub fn delete_user(conn: &Connection, user_id: UserId) -> Result<()> {
    identity::delete_user(conn, user_id)?;
    tracing::info!(user = %user_id, "user deleted");
    Ok(())
}
