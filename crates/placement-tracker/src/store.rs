//! The application store.
//!
//! [`ApplicationStore`] owns the tracked applications in insertion order and
//! mirrors them to a persistence slot after every mutation. It does no I/O
//! of its own beyond the [`SlotStore`] it is given; prompting the user and
//! printing results belong to the caller.

use chrono::{Days, Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::application::{ApplicationRecord, NewApplication, Outcome, Stage, Summary};
use crate::error::{Error, Result};
use crate::storage::SlotStore;

/// Slot key the collection is stored under unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "placementApplications";

/// Question put to the user before a record is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this application?";

/// Source of the current time.
pub trait Clock: std::fmt::Debug {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Today's calendar date.
    fn today(&self) -> NaiveDate;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    /// Milliseconds since the Unix epoch.
    pub millis: i64,
    /// The date reported as today.
    pub today: NaiveDate,
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Return `true` if the user agrees to `prompt`.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Options controlling how a store is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Slot key holding the serialized collection.
    pub key: String,
    /// Seed example records when the slot is empty.
    pub seed_examples: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_SLOT_KEY.to_string(),
            seed_examples: true,
        }
    }
}

/// Where the collection came from when the store was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Decoded from the persisted slot.
    Stored,
    /// The slot was empty and example records were seeded.
    Seeded,
    /// The slot was empty and seeding is disabled.
    Empty,
    /// The slot held data that could not be decoded; starting empty.
    Corrupt,
}

/// Tracked applications backed by a persistence slot.
#[derive(Debug)]
pub struct ApplicationStore<S> {
    slots: S,
    key: String,
    records: Vec<ApplicationRecord>,
    origin: LoadOrigin,
    clock: Box<dyn Clock>,
}

impl<S: SlotStore> ApplicationStore<S> {
    /// Load the collection from `slots` using the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read, or if seeding is needed
    /// and the seeded collection cannot be written.
    pub fn load(slots: S, options: StoreOptions) -> Result<Self> {
        Self::load_with_clock(slots, options, Box::new(SystemClock))
    }

    /// Load the collection from `slots` using the given clock.
    ///
    /// A missing or blank slot is seeded with [`example_records`] and
    /// persisted unless seeding is disabled. A slot that holds undecodable data is logged and
    /// treated as an empty collection; it is left as is until the next
    /// mutation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read, or if seeding is needed
    /// and the seeded collection cannot be written.
    pub fn load_with_clock(slots: S, options: StoreOptions, clock: Box<dyn Clock>) -> Result<Self> {
        let mut store = Self {
            slots,
            key: options.key,
            records: Vec::new(),
            origin: LoadOrigin::Empty,
            clock,
        };

        let raw = store.slots.read(&store.key)?.filter(|raw| !raw.trim().is_empty());
        match raw {
            Some(raw) => match serde_json::from_str::<Vec<ApplicationRecord>>(&raw) {
                Ok(records) => {
                    debug!("Loaded {} applications from slot {}", records.len(), store.key);
                    store.records = records;
                    store.origin = LoadOrigin::Stored;
                }
                Err(e) => {
                    warn!(
                        "Slot {} holds unreadable data ({}); starting with no applications",
                        store.key, e
                    );
                    store.origin = LoadOrigin::Corrupt;
                }
            },
            None if options.seed_examples => {
                store.records = example_records(store.clock.today());
                store.origin = LoadOrigin::Seeded;
                store.persist()?;
                info!("Seeded {} example applications", store.records.len());
            }
            None => {
                debug!("Slot {} is empty", store.key);
            }
        }

        Ok(store)
    }

    /// Validate `form` and append it as a new record.
    ///
    /// The new id is the current time in milliseconds, bumped past the
    /// largest existing id if needed so ids stay unique and increasing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a required field is missing or
    /// [`Error::IdExhausted`] if the largest stored id is `i64::MAX`. Both
    /// leave the collection unchanged. A storage error means persisting
    /// failed.
    pub fn add(&mut self, form: NewApplication) -> Result<ApplicationRecord> {
        let record = form.validate(self.next_id()?)?;
        self.records.push(record.clone());
        self.persist()?;
        debug!(
            "Added application {} for {} ({})",
            record.id, record.company_name, record.role
        );
        Ok(record)
    }

    /// Delete the record with `id` once `confirm` agrees.
    ///
    /// Returns `true` if a record was removed and `false` if no record had
    /// that id. The slot is rewritten in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeleteDeclined`] if the user declines, leaving the
    /// collection unchanged, or a storage error if persisting fails.
    pub fn delete(&mut self, id: i64, confirm: &mut impl Confirm) -> Result<bool> {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!("Deletion of {} declined", id);
            return Err(Error::DeleteDeclined);
        }

        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() < before;

        self.persist()?;
        if removed {
            debug!("Deleted application {}", id);
        } else {
            debug!("No application with id {}", id);
        }
        Ok(removed)
    }

    /// Drop every record and clear the slot, so the next load seeds afresh.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the slot cannot be cleared.
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.slots.remove(&self.key)?;
        self.origin = LoadOrigin::Empty;
        info!("Cleared slot {}", self.key);
        Ok(())
    }

    /// Summary counts over the current collection.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }

    /// Write the whole collection to the slot, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the slot write fails.
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.slots.write(&self.key, &json)
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&ApplicationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Slot key the collection is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// How the collection was obtained at load time.
    #[must_use]
    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// The backing slot store.
    #[must_use]
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Consume the store, returning the backing slot store.
    #[must_use]
    pub fn into_slots(self) -> S {
        self.slots
    }

    fn next_id(&self) -> Result<i64> {
        let now = self.clock.now_millis();
        match self.records.iter().map(|record| record.id).max() {
            Some(max) if now <= max => max.checked_add(1).ok_or(Error::IdExhausted { max }),
            _ => Ok(now),
        }
    }
}

/// The example records seeded on first run, dated relative to `today`.
#[must_use]
pub fn example_records(today: NaiveDate) -> Vec<ApplicationRecord> {
    let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
    let example = |id, company: &str, role: &str, stage, result, applied_date| ApplicationRecord {
        id,
        company_name: company.to_string(),
        role: role.to_string(),
        stage,
        result,
        applied_date,
    };

    vec![
        example(
            1,
            "TechCorp Inc.",
            "Software Engineer Intern",
            Stage::Applied,
            Outcome::Pending,
            today,
        ),
        example(
            2,
            "DataSystems Ltd.",
            "Data Analyst",
            Stage::OnlineAssessment,
            Outcome::Cleared,
            days_ago(5),
        ),
        example(
            3,
            "InnovateSoft",
            "Frontend Developer",
            Stage::Interview,
            Outcome::Pending,
            days_ago(3),
        ),
        example(
            4,
            "GlobalBank",
            "Cybersecurity Analyst",
            Stage::Offer,
            Outcome::Cleared,
            days_ago(10),
        ),
        example(
            5,
            "RetailGiant",
            "Product Manager Intern",
            Stage::Rejected,
            Outcome::Rejected,
            days_ago(14),
        ),
    ]
}
