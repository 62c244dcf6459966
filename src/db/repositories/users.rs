use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::parse_datetime,
    models::{NewUser, User},
};

fn row_to_user(row: &Row) -> Result<User> {
    let created_at: String = row.get("created_at")?;
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn create_user(&self, input: NewUser) -> Result<User> {
        input.validate()?;
        let created_at = Utc::now();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)",
                params![input.name, input.email, created_at.to_rfc3339()],
            )?;
            Ok(User {
                id: conn.last_insert_rowid(),
                name: input.name,
                email: input.email,
                created_at,
            })
        })
        .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.execute(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, email, created_at FROM users ORDER BY id ASC")?;
            let mut rows = stmt.query([])?;
            let mut users = Vec::new();
            while let Some(row) = rows.next()? {
                users.push(row_to_user(row)?);
            }
            Ok(users)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("sleep.sqlite3")).unwrap();

        let ada = db
            .create_user(NewUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            })
            .await
            .unwrap();
        let bob = db
            .create_user(NewUser {
                name: "Bob".into(),
                email: "bob@example.com".into(),
            })
            .await
            .unwrap();

        assert!(bob.id > ada.id);
        assert_eq!(db.list_users().await.unwrap(), vec![ada, bob]);
    }

    #[tokio::test]
    async fn blank_name_never_reaches_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("sleep.sqlite3")).unwrap();

        let result = db
            .create_user(NewUser {
                name: String::new(),
                email: "x@example.com".into(),
            })
            .await;
        assert!(result.is_err());
        assert!(db.list_users().await.unwrap().is_empty());
    }
}
