// Copyright 2025 The secureswipe Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use chrono::Utc;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use secureswipe_core::error::ErrorReport;
use secureswipe_core::error::Fallible;
use secureswipe_core::store::Store;
use serde_json::Value;

/// A [`Store`] kept in a SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

impl SqliteStore {
    pub fn open(database_path: &Path) -> Fallible<Self> {
        let mut conn = Connection::open(database_path).map_err(db_error)?;
        {
            let tx = conn.transaction().map_err(db_error)?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {}", database_path.display());
                tx.execute_batch(include_str!("schema.sql"))
                    .map_err(db_error)?;
                tx.commit().map_err(db_error)?;
            }
        }
        Ok(Self { conn })
    }

    /// The number of stored keys.
    pub fn len(&self) -> Fallible<usize> {
        let sql = "select count(*) from entries;";
        let count: i64 = self
            .conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(db_error)?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Fallible<bool> {
        Ok(self.len()? == 0)
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> Fallible<Option<Value>> {
        let sql = "select value from entries where key = ?;";
        let text: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()
            .map_err(db_error)?;
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Fallible<()> {
        let sql = "insert into entries (key, value, updated_at) values (?, ?, ?) on conflict (key) do update set value = excluded.value, updated_at = excluded.updated_at;";
        let text = serde_json::to_string(&value)?;
        let updated_at = Utc::now().to_rfc3339();
        self.conn
            .execute(sql, (key, text, updated_at))
            .map_err(db_error)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        let sql = "delete from entries where key = ?;";
        self.conn.execute(sql, [key]).map_err(db_error)?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx
        .query_row(sql, ["entries"], |row| row.get(0))
        .map_err(db_error)?;
    Ok(count > 0)
}
