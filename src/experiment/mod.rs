//! Experiment tracking for training and evaluation runs.
//!
//! An experiment collects run metadata and logged scalars. A remote MongoDB
//! observer is attached only when user, password and host are all
//! configured; otherwise the run is tracked locally.

use std::collections::BTreeMap;
use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::Result;

pub const ENV_DB_USER: &str = "MONGO_DB_USER";
pub const ENV_DB_PASS: &str = "MONGO_DB_PASS";
pub const ENV_DB_HOST: &str = "MONGO_DB_HOST";

/// Credentials for the remote observer. Any missing field disables it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverConfig {
    pub user: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub host: Option<String>,
}

impl fmt::Debug for ObserverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .finish()
    }
}

impl ObserverConfig {
    /// Read `MONGO_DB_USER`, `MONGO_DB_PASS` and `MONGO_DB_HOST`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            user: get(ENV_DB_USER),
            password: get(ENV_DB_PASS),
            host: get(ENV_DB_HOST),
        }
    }

    /// `(user, password, host)` when all three are present
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.user, &self.password, &self.host) {
            (Some(user), Some(password), Some(host)) => {
                Some((user.as_str(), password.as_str(), host.as_str()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    /// Database the remote observer writes to
    pub database: Option<String>,
    pub observer: ObserverConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: "exp".to_string(),
            database: None,
            observer: ObserverConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_database<S: Into<String>>(mut self, database: S) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_observer(mut self, observer: ObserverConfig) -> Self {
        self.observer = observer;
        self
    }
}

/// Remote sink for run records
#[derive(Clone, PartialEq, Eq)]
pub enum Observer {
    Mongo { url: String, db_name: Option<String> },
}

impl Observer {
    fn mongo(user: &str, password: &str, host: &str, db_name: Option<String>) -> Self {
        Observer::Mongo {
            url: format!("mongodb+srv://{}:{}@{}", user, password, host),
            db_name,
        }
    }

    /// Connection URL with the password masked
    pub fn redacted_url(&self) -> String {
        match self {
            Observer::Mongo { url, .. } => match (url.find("://"), url.rfind('@')) {
                (Some(scheme_end), Some(at)) => {
                    let userinfo = &url[scheme_end + 3..at];
                    let user = userinfo.split(':').next().unwrap_or_default();
                    format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..])
                }
                _ => url.clone(),
            },
        }
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observer::Mongo { db_name, .. } => f
                .debug_struct("Mongo")
                .field("url", &self.redacted_url())
                .field("db_name", db_name)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarEntry {
    pub step: u64,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Serializable snapshot of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord<'a> {
    pub name: &'a str,
    pub started_at: DateTime<Utc>,
    pub observers: Vec<String>,
    pub info: &'a serde_json::Map<String, serde_json::Value>,
    pub metrics: &'a BTreeMap<String, Vec<ScalarEntry>>,
}

#[derive(Debug, Clone)]
pub struct Experiment {
    name: String,
    started_at: DateTime<Utc>,
    observers: Vec<Observer>,
    info: serde_json::Map<String, serde_json::Value>,
    metrics: BTreeMap<String, Vec<ScalarEntry>>,
}

/// Create an experiment, attaching the remote observer if fully configured
pub fn create_experiment(config: ExperimentConfig) -> Experiment {
    let mut observers = Vec::new();

    match config.observer.credentials() {
        Some((user, password, host)) => {
            let observer = Observer::mongo(user, password, host, config.database.clone());
            log::info!(
                "Experiment '{}' reporting to {}",
                config.name,
                observer.redacted_url()
            );
            observers.push(observer);
        }
        None => {
            log::info!(
                "Experiment '{}' has no remote observer (set {}, {} and {} to enable)",
                config.name,
                ENV_DB_USER,
                ENV_DB_PASS,
                ENV_DB_HOST
            );
        }
    }

    Experiment {
        name: config.name,
        started_at: Utc::now(),
        observers,
        info: serde_json::Map::new(),
        metrics: BTreeMap::new(),
    }
}

impl Experiment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn observers(&self) -> &[Observer] {
        &self.observers
    }

    pub fn has_remote_observer(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Record one value of a named metric
    pub fn log_scalar(&mut self, name: &str, value: f64, step: u64) {
        self.metrics.entry(name.to_string()).or_default().push(ScalarEntry {
            step,
            value,
            timestamp: Utc::now(),
        });
    }

    pub fn metric(&self, name: &str) -> Option<&[ScalarEntry]> {
        self.metrics.get(name).map(Vec::as_slice)
    }

    /// Attach arbitrary run metadata
    pub fn add_info<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.info.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn run_record(&self) -> RunRecord<'_> {
        RunRecord {
            name: &self.name,
            started_at: self.started_at,
            observers: self.observers.iter().map(Observer::redacted_url).collect(),
            info: &self.info,
            metrics: &self.metrics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.run_record())?)
    }
}
