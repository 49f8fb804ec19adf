//! Profile persistence over a [`TreeStore`]: schema fallback on read,
//! dual-write on save.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::codec::{decode_profile, encode_profile, legacy};
use crate::error::{LtError, Result};
use crate::model::Profile;
use crate::store::{paths, SharedStore};

/// Loads and saves profiles by name.
#[derive(Clone)]
pub struct ProfileRepository {
    store: SharedStore,
}

impl ProfileRepository {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Load a profile by name.
    ///
    /// Tries the advanced record first; falls back to the legacy record
    /// plus migration. When neither is present this is the one hard
    /// failure: no safe default profile identity can be invented.
    pub async fn load(&self, name: &str) -> Result<Profile> {
        check_name(name)?;

        if let Some(record) = self.store.get(&paths::advanced(name)).await? {
            if record.is_object() {
                debug!(name, "Loaded advanced profile record");
                let mut profile = decode_profile(&record);
                if profile.name.is_empty() {
                    profile.name = name.to_string();
                }
                return Ok(profile);
            }
            warn!(name, "Advanced record is not an object, trying legacy");
        }

        if let Some(record) = self.store.get(&paths::basic(name)).await? {
            if legacy::is_basic_record(&record) {
                info!(name, "Migrating legacy profile record");
                return Ok(legacy::migrate_basic(&record));
            }
            warn!(name, "Legacy record is not parseable");
        }

        Err(LtError::ProfileNotFound {
            name: name.to_string(),
        })
    }

    /// Save a profile under its name.
    ///
    /// Dual-write: the legacy record first (for old consumers), then the
    /// advanced record (source of truth). Not a transaction: when the
    /// advanced write fails after a successful legacy write, the failure
    /// is surfaced and no compensating rollback is attempted.
    pub async fn save(&self, profile: &Profile) -> Result<()> {
        check_name(&profile.name)?;

        self.store
            .set(&paths::basic(&profile.name), legacy::to_basic_record(profile))
            .await?;
        self.store
            .set(&paths::advanced(&profile.name), encode_profile(profile))
            .await?;

        debug!(name = %profile.name, "Profile saved (legacy + advanced)");
        Ok(())
    }

    /// Names of all stored profiles.
    pub async fn list(&self) -> Result<Vec<String>> {
        let root = self.store.get(paths::PROFILES).await?;
        Ok(root
            .as_ref()
            .and_then(Value::as_object)
            .map(|profiles| profiles.keys().cloned().collect())
            .unwrap_or_default())
    }
}

/// Profile names key store paths, so they must be non-empty and must not
/// contain the path separator.
pub(crate) fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LtError::EmptyProfileName);
    }
    if name.contains('/') {
        return Err(LtError::InvalidStorePath {
            path: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogoMode, ProfileCategory};
    use crate::store::{MemoryStore, TreeStore};
    use serde_json::json;
    use std::sync::Arc;

    fn repo() -> (Arc<MemoryStore>, ProfileRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = ProfileRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (_store, repo) = repo();
        let mut profile = Profile::with_defaults("Noticias");
        profile.guest.name = "Ana".to_string();
        repo.save(&profile).await.unwrap();

        let loaded = repo.load("Noticias").await.unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_save_writes_both_records() {
        let (store, repo) = repo();
        repo.save(&Profile::with_defaults("Noticias")).await.unwrap();

        let basic = store.get(&paths::basic("Noticias")).await.unwrap().unwrap();
        assert_eq!(basic["NombrePerfil"], "Noticias");
        let advanced = store.get(&paths::advanced("Noticias")).await.unwrap().unwrap();
        assert_eq!(advanced["name"], "Noticias");
    }

    #[tokio::test]
    async fn test_legacy_fallback_scenario() {
        let (store, repo) = repo();
        store
            .set(
                &paths::basic("Noticias"),
                json!({
                    "NombrePerfil": "Noticias",
                    "colorFondo1": "#1066FF",
                    "urlLogo": "https://x/a.png",
                    "Invitado": "Ana",
                }),
            )
            .await
            .unwrap();

        let profile = repo.load("Noticias").await.unwrap();
        assert_eq!(profile.category, ProfileCategory::Noticias);
        assert_eq!(profile.guest.name, "Ana");
        let LogoMode::Simple(simple) = &profile.config.logo.mode else {
            panic!("expected simple mode");
        };
        assert_eq!(simple.url, "https://x/a.png");
        assert_eq!(profile.config.main_text.content, "");
    }

    #[tokio::test]
    async fn test_advanced_preferred_over_legacy() {
        let (store, repo) = repo();
        let profile = Profile::with_defaults("X");
        repo.save(&profile).await.unwrap();
        // Poison the legacy record; it must not be consulted
        store
            .set(&paths::basic("X"), json!({"NombrePerfil": "Wrong"}))
            .await
            .unwrap();

        assert_eq!(repo.load("X").await.unwrap().name, "X");
    }

    #[tokio::test]
    async fn test_missing_profile_is_hard_error() {
        let (_store, repo) = repo();
        assert!(matches!(
            repo.load("Nadie").await,
            Err(LtError::ProfileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_name_validation() {
        let (_store, repo) = repo();
        assert!(matches!(repo.load("").await, Err(LtError::EmptyProfileName)));
        assert!(matches!(
            repo.load("a/b").await,
            Err(LtError::InvalidStorePath { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_profiles() {
        let (_store, repo) = repo();
        repo.save(&Profile::with_defaults("A")).await.unwrap();
        repo.save(&Profile::with_defaults("B")).await.unwrap();
        let mut names = repo.list().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["A", "B"]);
    }
}
