use crate::partner::{Partner, PartnerDirection, PartnerId, PartnerStore, PartnerUser};
use crate::sqlite_column;
use crate::sqlite_persistence::{
    system_time_from_column_result, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table,
    VersionedSchema, BASE_DB_VERSION, DEFAULT_TIMESTAMP,
};
use crate::user::*;
use anyhow::{bail, Context, Result};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{debug, info};

/// V 0
const USER_TABLE_V_0: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("email", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[],
};
const AUTH_TOKEN_TABLE_V_0: Table = Table {
    name: "auth_token",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("value", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("last_used", &SqlType::Integer),
    ],
    unique_constraints: &[],
    indices: &[("idx_auth_token_value", "value")],
};
const PARTNER_TABLE_V_0: Table = Table {
    name: "partner",
    columns: &[
        sqlite_column!(
            "shared_by_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "shared_with_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "in_timeline",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!(
            "updated",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[&["shared_by_id", "shared_with_id"]],
    indices: &[("idx_partner_shared_with_id", "shared_with_id")],
};

pub const VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[USER_TABLE_V_0, AUTH_TOKEN_TABLE_V_0, PARTNER_TABLE_V_0],
}];

const PARTNER_COLUMNS: &str = "shared_by_id, shared_with_id, in_timeline, created, updated";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
    })
}

fn token_from_row(row: &Row) -> rusqlite::Result<AuthToken> {
    Ok(AuthToken {
        user_id: row.get(0)?,
        value: AuthTokenValue(row.get(1)?),
        created: system_time_from_column_result(row.get(2)?),
        last_used: row
            .get::<usize, Option<i64>>(3)?
            .map(system_time_from_column_result),
    })
}

fn partner_from_row(row: &Row) -> rusqlite::Result<Partner> {
    Ok(Partner {
        shared_by_id: row.get(0)?,
        shared_with_id: row.get(1)?,
        in_timeline: row.get(2)?,
        created: system_time_from_column_result(row.get(3)?),
        updated: system_time_from_column_result(row.get(4)?),
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        }
        _ => false,
    }
}

/// SQLite row ids are signed 64 bit, larger ids cannot match any row.
fn is_row_id(id: usize) -> bool {
    i64::try_from(id).is_ok()
}

fn is_partner_row_id(id: &PartnerId) -> bool {
    is_row_id(id.shared_by_id) && is_row_id(id.shared_with_id)
}

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = if db_path.as_ref().exists() {
            Connection::open_with_flags(
                db_path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        } else {
            info!("Creating new user database at {:?}", db_path.as_ref());
            let conn = Connection::open(db_path)?;
            VERSIONED_SCHEMAS
                .last()
                .context("No schema defined")?
                .create(&conn)?;
            conn
        };

        // Foreign keys are enforced per connection, not per database.
        conn.execute("PRAGMA foreign_keys = ON;", [])?;

        let db_version = conn
            .query_row("PRAGMA user_version;", [], |row| row.get::<usize, i64>(0))
            .context("Failed to read database version")?
            - BASE_DB_VERSION as i64;

        if db_version < 0 {
            bail!(
                "Database version {} is too old, does not contain base db version {}",
                db_version,
                BASE_DB_VERSION
            );
        }
        if db_version >= VERSIONED_SCHEMAS.len() as i64 {
            bail!("Database version {} is too new", db_version);
        }
        VERSIONED_SCHEMAS
            .get(db_version as usize)
            .context("Failed to get schema")?
            .validate(&conn)?;

        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("User db connection mutex poisoned"))
    }

    fn get_partner_locked(conn: &Connection, id: &PartnerId) -> Result<Option<Partner>> {
        if !is_partner_row_id(id) {
            return Ok(None);
        }
        Ok(conn
            .query_row(
                &format!(
                    "SELECT {} FROM {} WHERE shared_by_id = ?1 AND shared_with_id = ?2",
                    PARTNER_COLUMNS, PARTNER_TABLE_V_0.name
                ),
                params![id.shared_by_id, id.shared_with_id],
                partner_from_row,
            )
            .optional()?)
    }
}

impl UserStore for SqliteUserStore {
    fn create_user(&self, email: &str, name: &str) -> Result<usize> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (email, name) VALUES (?1, ?2)",
                USER_TABLE_V_0.name
            ),
            params![email, name],
        )
        .with_context(|| format!("Failed to create user {}", email))?;
        Ok(conn.last_insert_rowid() as usize)
    }

    fn get_user(&self, user_id: usize) -> Result<Option<User>> {
        if !is_row_id(user_id) {
            return Ok(None);
        }
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                &format!(
                    "SELECT id, email, name FROM {} WHERE id = ?1",
                    USER_TABLE_V_0.name
                ),
                params![user_id],
                user_from_row,
            )
            .optional()?)
    }

    fn get_user_id(&self, email: &str) -> Result<Option<usize>> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                &format!("SELECT id FROM {} WHERE email = ?1", USER_TABLE_V_0.name),
                params![email],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn get_all_users(&self) -> Result<Vec<User>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, email, name FROM {} ORDER BY id",
            USER_TABLE_V_0.name
        ))?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}

impl UserAuthTokenStore for SqliteUserStore {
    fn get_user_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(
                &format!(
                    "SELECT user_id, value, created, last_used FROM {} WHERE value = ?1",
                    AUTH_TOKEN_TABLE_V_0.name
                ),
                params![value.0],
                token_from_row,
            )
            .optional()?)
    }

    fn update_user_auth_token_last_used_timestamp(&self, value: &AuthTokenValue) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "UPDATE {} SET last_used = {} WHERE value = ?1",
                AUTH_TOKEN_TABLE_V_0.name, DEFAULT_TIMESTAMP
            ),
            params![value.0],
        )?;
        Ok(())
    }

    fn add_user_auth_token(&self, token: AuthToken) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (value, user_id) VALUES (?1, ?2)",
                AUTH_TOKEN_TABLE_V_0.name
            ),
            params![token.value.0, token.user_id],
        )
        .with_context(|| format!("Failed to add auth token for user {}", token.user_id))?;
        Ok(())
    }

    fn delete_user_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let conn = self.lock()?;
        let token = conn
            .query_row(
                &format!(
                    "SELECT user_id, value, created, last_used FROM {} WHERE value = ?1",
                    AUTH_TOKEN_TABLE_V_0.name
                ),
                params![value.0],
                token_from_row,
            )
            .optional()?;
        if token.is_some() {
            conn.execute(
                &format!("DELETE FROM {} WHERE value = ?1", AUTH_TOKEN_TABLE_V_0.name),
                params![value.0],
            )?;
        }
        Ok(token)
    }
}

impl PartnerStore for SqliteUserStore {
    fn get_partner(&self, id: &PartnerId) -> Result<Option<Partner>> {
        let conn = self.lock()?;
        Self::get_partner_locked(&conn, id)
    }

    fn create_partner(&self, id: &PartnerId) -> Result<Option<Partner>> {
        let conn = self.lock()?;
        let inserted = conn.execute(
            &format!(
                "INSERT INTO {} (shared_by_id, shared_with_id) VALUES (?1, ?2)",
                PARTNER_TABLE_V_0.name
            ),
            params![id.shared_by_id, id.shared_with_id],
        );
        match inserted {
            Ok(_) => Self::get_partner_locked(&conn, id),
            Err(err) if is_unique_violation(&err) => {
                debug!("Partner {:?} already exists", id);
                Ok(None)
            }
            Err(err) => Err(err).with_context(|| format!("Failed to create partner {:?}", id)),
        }
    }

    fn update_partner(&self, id: &PartnerId, in_timeline: bool) -> Result<Option<Partner>> {
        if !is_partner_row_id(id) {
            return Ok(None);
        }
        let conn = self.lock()?;
        let updated = conn.execute(
            &format!(
                "UPDATE {} SET in_timeline = ?3, updated = {} WHERE shared_by_id = ?1 AND shared_with_id = ?2",
                PARTNER_TABLE_V_0.name, DEFAULT_TIMESTAMP
            ),
            params![id.shared_by_id, id.shared_with_id, in_timeline],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        Self::get_partner_locked(&conn, id)
    }

    fn remove_partner(&self, id: &PartnerId) -> Result<Option<Partner>> {
        let conn = self.lock()?;
        let partner = match Self::get_partner_locked(&conn, id)? {
            Some(partner) => partner,
            None => return Ok(None),
        };
        conn.execute(
            &format!(
                "DELETE FROM {} WHERE shared_by_id = ?1 AND shared_with_id = ?2",
                PARTNER_TABLE_V_0.name
            ),
            params![id.shared_by_id, id.shared_with_id],
        )?;
        Ok(Some(partner))
    }

    fn get_partners(
        &self,
        user_id: usize,
        direction: PartnerDirection,
    ) -> Result<Vec<PartnerUser>> {
        if !is_row_id(user_id) {
            return Ok(vec![]);
        }
        // The listed user is always the one on the other side of the row.
        let (own_column, other_column) = match direction {
            PartnerDirection::SharedBy => ("shared_by_id", "shared_with_id"),
            PartnerDirection::SharedWith => ("shared_with_id", "shared_by_id"),
        };
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT u.id, u.email, u.name, p.in_timeline FROM {} p JOIN {} u ON u.id = p.{} WHERE p.{} = ?1 ORDER BY p.created, u.id",
            PARTNER_TABLE_V_0.name, USER_TABLE_V_0.name, other_column, own_column
        ))?;
        let partners = stmt
            .query_map(params![user_id], |row| {
                Ok(PartnerUser {
                    user: User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                    },
                    in_timeline: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(partners)
    }
}
