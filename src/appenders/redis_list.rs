//! Redis list mirror
//!
//! Appends each mirrored line with `RPUSH`. One connection is cached and
//! re-established after any failure; connect, read and write are all bounded by
//! the configured timeout.

use crate::core::side_channel::RemoteListStore;
use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use std::time::Duration;

pub struct RedisListStore {
    client: redis::Client,
    connection: Mutex<Option<redis::Connection>>,
    timeout: Duration,
}

impl RedisListStore {
    /// Parse `url`. No connection is made until the first push.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is not a valid Redis URL
    pub fn open(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| LoggerError::config("RedisListStore", format!("invalid URL '{}': {}", url, e)))?;
        Ok(Self {
            client,
            connection: Mutex::new(None),
            timeout,
        })
    }

    fn connect(&self) -> redis::RedisResult<redis::Connection> {
        let connection = self.client.get_connection_with_timeout(self.timeout)?;
        connection.set_read_timeout(Some(self.timeout))?;
        connection.set_write_timeout(Some(self.timeout))?;
        Ok(connection)
    }
}

impl RemoteListStore for RedisListStore {
    fn push(&self, key: &str, line: &str) -> Result<()> {
        let mut cached = self.connection.lock();

        if cached.is_none() {
            let connection = self
                .connect()
                .map_err(|e| LoggerError::remote_store(key, format!("connect failed: {}", e)))?;
            *cached = Some(connection);
        }
        let Some(connection) = cached.as_mut() else {
            return Err(LoggerError::remote_store(key, "no connection"));
        };

        let pushed: redis::RedisResult<()> = redis::cmd("RPUSH").arg(key).arg(line).query(connection);
        if let Err(e) = pushed {
            // Reconnect on the next push
            *cached = None;
            return Err(LoggerError::remote_store(key, e.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(matches!(
            RedisListStore::open("not a url", Duration::from_secs(1)),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_unreachable_server_fails_push() {
        let store = RedisListStore::open("redis://127.0.0.1:1/", Duration::from_millis(200)).unwrap();
        let result = store.push("svc:logs", "line");

        assert!(matches!(result, Err(LoggerError::RemoteStore { .. })));
        assert!(store.connection.lock().is_none());
    }
}
