// src/loader/mod.rs

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};
use crate::fetch::{self, TextSource};
use crate::process::parse_csv;
use crate::schema::{Constructor, ConstructorStanding, Driver, DriverStanding, FromRecord, Race};
use serde::Serialize;
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::{debug, info, instrument};

/// The five files every load reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Drivers,
    DriverStandings,
    Constructors,
    ConstructorStandings,
    Races,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Drivers,
        Resource::DriverStandings,
        Resource::Constructors,
        Resource::ConstructorStandings,
        Resource::Races,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Resource::Drivers => "drivers.csv",
            Resource::DriverStandings => "drivers_standings.csv",
            Resource::Constructors => "constructors.csv",
            Resource::ConstructorStandings => "constructors_standings.csv",
            Resource::Races => "races.csv",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.file_name())
    }
}

/// Everything one load produces: the five collections in file order plus
/// the lookup maps derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub drivers: Vec<Driver>,
    pub driver_standings: Vec<DriverStanding>,
    pub constructors: Vec<Constructor>,
    pub constructor_standings: Vec<ConstructorStanding>,
    pub races: Vec<Arc<Race>>,

    /// `"{season}-{round}"` → race. On duplicate keys the later row wins.
    pub race_key_map: HashMap<String, Arc<Race>>,
    /// `driverId` → `"{givenName} {familyName}"`.
    pub driver_names: HashMap<String, String>,
    /// `constructorId` → `name`.
    pub constructor_names: HashMap<String, String>,
}

impl Dataset {
    /// Join the raw collections: build the lookup maps, then attach display
    /// names to every standing. Ids without a match leave the name `None`.
    pub fn assemble(
        drivers: Vec<Driver>,
        driver_standings: Vec<DriverStanding>,
        constructors: Vec<Constructor>,
        constructor_standings: Vec<ConstructorStanding>,
        races: Vec<Race>,
    ) -> Self {
        let races: Vec<Arc<Race>> = races.into_iter().map(Arc::new).collect();

        let race_key_map: HashMap<String, Arc<Race>> = races
            .iter()
            .map(|race| (race.key(), Arc::clone(race)))
            .collect();

        let driver_names: HashMap<String, String> = drivers
            .iter()
            .map(|d| (d.driver_id.to_string(), d.full_name()))
            .collect();

        let constructor_names: HashMap<String, String> = constructors
            .iter()
            .map(|c| (c.constructor_id.to_string(), c.name.to_string()))
            .collect();

        let driver_standings: Vec<DriverStanding> = driver_standings
            .into_iter()
            .map(|s| {
                let name = driver_names.get(&s.driver_id.to_string()).cloned();
                s.with_driver(name)
            })
            .collect();

        let constructor_standings: Vec<ConstructorStanding> = constructor_standings
            .into_iter()
            .map(|s| {
                let name = constructor_names.get(&s.constructor_id.to_string()).cloned();
                s.with_constructor(name)
            })
            .collect();

        let dataset = Self {
            drivers,
            driver_standings,
            constructors,
            constructor_standings,
            races,
            race_key_map,
            driver_names,
            constructor_names,
        };
        let unresolved = dataset.unresolved();
        if unresolved > 0 {
            debug!(unresolved, "standings reference unknown ids");
        }
        dataset
    }

    /// Standings whose id had no match in the name maps.
    pub fn unresolved(&self) -> usize {
        self.driver_standings
            .iter()
            .filter(|s| s.driver.is_none())
            .count()
            + self
                .constructor_standings
                .iter()
                .filter(|s| s.constructor.is_none())
                .count()
    }

    pub fn race(&self, key: &str) -> Option<&Race> {
        self.race_key_map.get(key).map(Arc::as_ref)
    }

    pub fn race_at(&self, season: i64, round: i64) -> Option<&Race> {
        self.race(&format!("{}-{}", season, round))
    }

    pub fn driver_name(&self, driver_id: &str) -> Option<&str> {
        self.driver_names.get(driver_id).map(String::as_str)
    }

    pub fn constructor_name(&self, constructor_id: &str) -> Option<&str> {
        self.constructor_names.get(constructor_id).map(String::as_str)
    }

    /// Row count per source file, in `Resource::ALL` order.
    pub fn counts(&self) -> [(Resource, usize); 5] {
        [
            (Resource::Drivers, self.drivers.len()),
            (Resource::DriverStandings, self.driver_standings.len()),
            (Resource::Constructors, self.constructors.len()),
            (Resource::ConstructorStandings, self.constructor_standings.len()),
            (Resource::Races, self.races.len()),
        ]
    }
}

/// Reads and joins the five resources. Holds no state between loads.
#[derive(Clone)]
pub struct DatasetLoader {
    source: Arc<dyn TextSource>,
    config: LoaderConfig,
}

impl DatasetLoader {
    /// HTTP when `config.base` is an http(s) URL, filesystem otherwise.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            source: fetch::source_for_base(&config.base),
            config,
        }
    }

    pub fn with_source(source: Arc<dyn TextSource>, config: LoaderConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetch and parse all five resources concurrently, then join them.
    ///
    /// The first failing resource fails the whole load; nothing partial is
    /// returned and nothing is retried. Every call re-reads every file.
    #[instrument(level = "info", skip(self), fields(base = %self.config.base))]
    pub async fn load(&self) -> Result<Dataset> {
        let (drivers, driver_standings, constructors, constructor_standings, races) = tokio::try_join!(
            self.load_resource::<Driver>(Resource::Drivers),
            self.load_resource::<DriverStanding>(Resource::DriverStandings),
            self.load_resource::<Constructor>(Resource::Constructors),
            self.load_resource::<ConstructorStanding>(Resource::ConstructorStandings),
            self.load_resource::<Race>(Resource::Races),
        )?;

        let dataset = Dataset::assemble(
            drivers,
            driver_standings,
            constructors,
            constructor_standings,
            races,
        );

        info!(
            drivers = dataset.drivers.len(),
            driver_standings = dataset.driver_standings.len(),
            constructors = dataset.constructors.len(),
            constructor_standings = dataset.constructor_standings.len(),
            races = dataset.races.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    async fn load_resource<T: FromRecord>(&self, resource: Resource) -> Result<Vec<T>> {
        let path = self.config.resource_path(resource.file_name());
        debug!(%resource, %path, "fetching");

        let text = self
            .source
            .fetch_text(&path)
            .await
            .map_err(|source| LoadError::Retrieval {
                path: path.clone(),
                source,
            })?;

        let table = parse_csv(&text).map_err(|source| LoadError::Parse {
            path: path.clone(),
            source,
        })?;

        debug!(%resource, rows = table.len(), "parsed");
        Ok(table.rows.into_iter().map(T::from_record).collect())
    }
}

impl fmt::Debug for DatasetLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One-shot load from `base` with the default `/data` directory.
pub async fn load(base: &str) -> Result<Dataset> {
    DatasetLoader::new(LoaderConfig::new(base)).load().await
}
