use async_trait::async_trait;
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use giftpool_core::contributions::Contribution;
use giftpool_core::fundings::Funding;
use giftpool_core::storage::{ContributorEntry, FundingStore};
use giftpool_core::{Error, Result};

use crate::errors::StorageError;

const FUNDINGS_FILE: &str = "fundings.json";
const CONTRIBUTIONS_FILE: &str = "contributions.json";

/// `FundingStore` over JSON collection files in a local data directory.
///
/// Reads degrade to empty collections on any internal failure (missing file,
/// parse error, I/O error); writes propagate a `Persistence` error.
pub struct LocalStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles inside this process. Other
    // processes writing the same files still race, last write wins.
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Opens (and creates if needed) the data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(StorageError::from)?;
        debug!("Local funding store at {}", data_dir.display());
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn fundings_path(&self) -> PathBuf {
        self.data_dir.join(FUNDINGS_FILE)
    }

    fn contributions_path(&self) -> PathBuf {
        self.data_dir.join(CONTRIBUTIONS_FILE)
    }

    fn read_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
        if !path.exists() {
            return Vec::new();
        }
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(items) => items,
            Err(e) => {
                error!("Error parsing {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
        let data = serde_json::to_string(items).map_err(StorageError::from)?;
        fs::write(path, data).map_err(StorageError::from)?;
        Ok(())
    }

    fn read_fundings(&self) -> Vec<Funding> {
        Self::read_collection(&self.fundings_path())
    }

    fn read_contributions(&self) -> Vec<Contribution> {
        Self::read_collection(&self.contributions_path())
    }
}

#[async_trait]
impl FundingStore for LocalStore {
    async fn save_funding(&self, funding: Funding) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut fundings = self.read_fundings();
        if let Some(existing) = fundings.iter_mut().find(|f| f.id == funding.id) {
            *existing = funding;
        } else {
            fundings.push(funding);
        }
        Self::write_collection(&self.fundings_path(), &fundings)
    }

    async fn get_funding(&self, id: &str) -> Result<Option<Funding>> {
        Ok(self.read_fundings().into_iter().find(|f| f.id == id))
    }

    async fn get_all_fundings(&self) -> Result<Vec<Funding>> {
        Ok(self.read_fundings())
    }

    async fn get_fundings_by_host(&self, host_id: &str) -> Result<Vec<Funding>> {
        Ok(self
            .read_fundings()
            .into_iter()
            .filter(|f| f.host_id == host_id)
            .collect())
    }

    async fn get_fundings_by_contributor(
        &self,
        identifier: &str,
    ) -> Result<Vec<ContributorEntry>> {
        let needle = identifier.to_lowercase();
        let fundings = self.read_fundings();
        Ok(self
            .read_contributions()
            .into_iter()
            .filter(|c| c.contributor_name.to_lowercase().contains(&needle) || !c.is_anonymous)
            .filter_map(|contribution| {
                // A contribution whose parent funding is gone is dropped.
                fundings
                    .iter()
                    .find(|f| f.id == contribution.funding_id)
                    .map(|funding| ContributorEntry {
                        funding: funding.clone(),
                        contribution,
                    })
            })
            .collect())
    }

    async fn add_contribution(&self, contribution: Contribution) -> Result<()> {
        contribution.validate()?;
        let _guard = self.write_lock.lock().await;

        let mut fundings = self.read_fundings();
        let funding = fundings
            .iter_mut()
            .find(|f| f.id == contribution.funding_id)
            .ok_or_else(|| Error::NotFound(format!("funding {}", contribution.funding_id)))?;

        let mut contributions = self.read_contributions();
        contributions.push(contribution.clone());
        Self::write_collection(&self.contributions_path(), &contributions)?;

        // Second step of the compound write. A crash between the two leaves
        // the contribution recorded but the total not yet updated.
        funding.current_amount += contribution.amount;
        Self::write_collection(&self.fundings_path(), &fundings)
    }

    async fn get_contributions(&self, funding_id: &str) -> Result<Vec<Contribution>> {
        Ok(self
            .read_contributions()
            .into_iter()
            .filter(|c| c.funding_id == funding_id)
            .collect())
    }

    async fn clear_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        for path in [self.fundings_path(), self.contributions_path()] {
            if path.exists() {
                fs::remove_file(&path).map_err(StorageError::from)?;
            }
        }
        Ok(())
    }
}
