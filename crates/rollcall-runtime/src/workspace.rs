use rollcall_engine::{Clock, Command, CsvReport, Dispatcher, Outcome, RenamePolicy, Roster, SystemClock};
use rollcall_store::{KeyValueStore, SqliteStore};
use rollcall_types::{CLASSES_KEY, Timestamp, decode_classes, normalize_name};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::download::Download;
use crate::persister::{FlushFailure, Persister};
use crate::{Error, Result};

/// The loaded roster plus everything needed to change and keep it.
///
/// State is read once on open; afterwards every mutating command is
/// followed by exactly one flush of the whole mapping.
pub struct Workspace {
    config: Config,
    roster: Roster,
    dispatcher: Dispatcher,
    persister: Persister,
}

impl Workspace {
    pub fn open(data_dir: &Path) -> Result<Self> {
        Self::open_with_clock(data_dir, Arc::new(SystemClock))
    }

    pub fn open_with_clock(data_dir: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let config = Config::load_from(&Config::path_in(data_dir))?;
        let storage_path = config.storage_path(data_dir);
        debug!(path = %storage_path.display(), "opening store");

        let store = SqliteStore::open(&storage_path)?;
        Self::with_store(store, config, clock)
    }

    pub fn with_store<S>(store: S, config: Config, clock: Arc<dyn Clock>) -> Result<Self>
    where
        S: KeyValueStore + 'static,
    {
        let classes = decode_classes(store.get(CLASSES_KEY)?)?;
        let roster = Roster::from_classes(classes);

        for bad in roster.malformed_sessions() {
            warn!(
                class = %bad.class,
                student = %bad.student,
                start = %bad.session.start,
                end = %bad.session.end,
                "stored session ends before it starts"
            );
        }
        info!(classes = roster.classes().len(), "roster loaded");

        let dispatcher = Dispatcher::new(clock).with_rename_policy(config.on_rename_conflict);
        let persister = Persister::spawn(store)?;

        Ok(Self {
            config,
            roster,
            dispatcher,
            persister,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn now(&self) -> Timestamp {
        self.dispatcher.clock().now()
    }

    /// Apply a command, then flush if it is a mutation
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let name = command.name();
        let mutation = command.is_mutation();
        let replaced = self.rename_target_to_replace(&command);

        let outcome = self.dispatcher.dispatch(&mut self.roster, command)?;

        match &outcome {
            Outcome::Changed => {
                info!(command = name, "applied");
                if let Some(target) = replaced {
                    warn!(class = %target, "rename replaced an existing class");
                }
            }
            Outcome::Unchanged(reason) => debug!(command = name, %reason, "unchanged"),
            Outcome::Exported(report) => {
                info!(file = %report.file_name, rows = report.row_count, "report built")
            }
        }

        if mutation {
            self.persister.flush(self.roster.classes())?;
        }
        Ok(outcome)
    }

    /// Build the report and hand it to `download`
    pub fn export(&mut self, download: &dyn Download) -> Result<(CsvReport, PathBuf)> {
        let report = self.build_report()?;
        let path = download.deliver(&report)?;
        info!(path = %path.display(), "report written");
        Ok((report, path))
    }

    pub fn build_report(&mut self) -> Result<CsvReport> {
        match self.execute(Command::Export)? {
            Outcome::Exported(report) => Ok(report),
            _ => Err(Error::InvalidOperation(
                "export produced no report".to_string(),
            )),
        }
    }

    /// Persistence failures since the last call
    pub fn take_failures(&self) -> Vec<FlushFailure> {
        self.persister.take_failures()
    }

    /// Wait for queued flushes to be attempted
    pub fn sync(&self) -> Result<()> {
        self.persister.sync()
    }

    fn rename_target_to_replace(&self, command: &Command) -> Option<String> {
        let Command::RenameClass { from, to } = command else {
            return None;
        };
        if self.dispatcher.rename_policy() != RenamePolicy::Overwrite {
            return None;
        }
        let to = normalize_name(to)?;
        (to != *from && self.roster.class(from).is_some() && self.roster.class(&to).is_some())
            .then_some(to)
    }
}
