use std::{collections::HashMap, convert::Infallible};

use crate::domain::{config_repository::ConfigRepository, Id, Target};

/// Targets held in memory, e.g. a single target given on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigRepository {
    targets: HashMap<Id, Target>,
}
impl StaticConfigRepository {
    pub fn new(targets: HashMap<Id, Target>) -> Self {
        Self { targets }
    }

    pub fn single(id: Id, target: Target) -> Self {
        Self::new(HashMap::from([(id, target)]))
    }
}

#[async_trait::async_trait]
impl ConfigRepository for StaticConfigRepository {
    type Error = Infallible;

    async fn get_all(&mut self) -> Result<HashMap<Id, Target>, Self::Error> {
        Ok(self.targets.clone())
    }
}
