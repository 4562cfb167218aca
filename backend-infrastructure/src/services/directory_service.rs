use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};

use backend_domain::ports::IdentityLookup;
use backend_domain::{Person, PersonRef};

/// Employee directory read from a YAML list of people.
#[derive(Debug, Default)]
pub struct DirectoryFileLookup {
    people: HashMap<PersonRef, Person>,
}

impl DirectoryFileLookup {
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            people: people
                .into_iter()
                .map(|person| (person.casy_ref, person))
                .collect(),
        }
    }

    pub async fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!("directory file {} not found, every lookup will miss", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).await?;
        let lookup = Self::from_yaml_str(&content)?;
        info!("loaded {} directory entries", lookup.people.len());
        Ok(lookup)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let people: Vec<Person> = serde_yaml::from_str(content)?;
        Ok(Self::new(people))
    }
}

#[async_trait]
impl IdentityLookup for DirectoryFileLookup {
    async fn resolve(&self, person: PersonRef) -> anyhow::Result<Option<Person>> {
        Ok(self.people.get(&person).cloned())
    }
}
