//! Raw and JSON key-value operations.

use super::connection::KvStore;
use crate::Error;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl KvStore {
    /// Get the raw string stored under `key`.
    ///
    /// Returns None if the key doesn't exist.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| row.get(0));

                match result {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Store a raw string under `key`, replacing any previous value.
    pub async fn set_raw(&self, key: &str, value: &str) -> Result<(), Error> {
        let key = key.to_string();
        let value = value.to_string();
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    params![key, value, updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete `key`. Returns whether a value was present.
    pub async fn remove(&self, key: &str) -> Result<bool, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Length in bytes of the value stored under `key`, 0 when absent.
    pub async fn value_len(&self, key: &str) -> Result<usize, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<usize, Error> {
                let len: Option<i64> = conn
                    .query_row("SELECT length(CAST(value AS BLOB)) FROM kv_store WHERE key = ?1", params![key], |row| {
                        row.get(0)
                    })
                    .or_else(|e| match e {
                        rusqlite::Error::QueryReturnedNoRows => Ok(None),
                        e => Err(e),
                    })?;
                Ok(len.unwrap_or(0) as usize)
            })
            .await
            .map_err(Error::from)
    }

    /// Decode the JSON value stored under `key`.
    ///
    /// A missing key is `Ok(None)`; a value that does not parse as `T` is an
    /// [`Error::Serialization`].
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.get_raw(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), Error> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw).await
    }
}
