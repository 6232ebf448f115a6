mod db;
mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use crate::RiskbriefError;

/// Key the last submitted credential is stored under
pub const CREDENTIAL_KEY: &str = "openai_api_key";

/// Durable string key/value storage
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RiskbriefError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), RiskbriefError>;
}

/// Read the saved credential used to prefill the form at startup
pub async fn load_saved_credential(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(CREDENTIAL_KEY).await {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            tracing::warn!("Could not read saved credential: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_saved_credential_missing() {
        let store = MemoryStore::new();
        assert_eq!(load_saved_credential(&store).await, None);
    }

    #[tokio::test]
    async fn test_load_saved_credential_present() {
        let store = MemoryStore::new();
        store.set(CREDENTIAL_KEY, "sk-test").await.unwrap();
        assert_eq!(
            load_saved_credential(&store).await,
            Some("sk-test".to_string())
        );
    }
}
