//! Importación: lee un libro y lo confirma como el horario del propietario.
//!
//! Las importaciones de un mismo propietario se ejecutan de una en una; las de
//! propietarios distintos solo comparten el candado de la conexión.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::Result;
use crate::excel::{parse_timetable, ExcelWorkbook, HeaderLayout, SheetSource};
use crate::models::OwnerId;
use crate::store::ScheduleStore;

/// One lock per owner, created on first use and dropped once no import holds it.
#[derive(Debug, Default)]
pub struct OwnerLocks {
    inner: Mutex<HashMap<OwnerId, Arc<Mutex<()>>>>,
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self, owner: OwnerId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        Arc::clone(map.entry(owner).or_default())
    }

    /// Returns a token taken with [`OwnerLocks::token`]. The owner's entry is
    /// removed when nobody else holds or waits on it.
    pub fn release(&self, owner: OwnerId, token: Arc<Mutex<()>>) {
        let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        drop(token);
        if map.get(&owner).is_some_and(|t| Arc::strong_count(t) == 1) {
            map.remove(&owner);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summary of a committed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub owner: OwnerId,
    pub sheet: String,
    pub layout: HeaderLayout,
    pub teachers: usize,
    pub slots: usize,
    pub lessons: usize,
}

#[derive(Debug)]
pub struct Importer {
    store: ScheduleStore,
    locks: OwnerLocks,
    scan_rows: usize,
}

impl Importer {
    pub fn new(store: ScheduleStore, scan_rows: usize) -> Self {
        Importer { store, locks: OwnerLocks::new(), scan_rows }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(ScheduleStore::open(config)?, config.scan_rows))
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// Parses `workbook` and replaces the owner's schedule with the result.
    /// On any error the owner's previous schedule is left as it was.
    pub fn import<W: SheetSource + ?Sized>(&self, owner: OwnerId, workbook: &mut W) -> Result<ImportReport> {
        let token = self.locks.token(owner);
        let result = {
            let _guard = token.lock().unwrap_or_else(|p| p.into_inner());
            debug!(%owner, "import lock acquired");
            self.run(owner, workbook)
        };
        self.locks.release(owner, token);
        result
    }

    fn run<W: SheetSource + ?Sized>(&self, owner: OwnerId, workbook: &mut W) -> Result<ImportReport> {
        let timetable = parse_timetable(workbook, self.scan_rows)?;
        let schedule = self.store.replace_schedule(owner, &timetable)?;

        let report = ImportReport {
            owner,
            sheet: timetable.sheet,
            layout: timetable.layout,
            teachers: schedule.teachers.len(),
            slots: schedule.slots.len(),
            lessons: schedule.slots.iter().filter(|s| s.has_lesson).count(),
        };
        info!(
            %owner,
            sheet = %report.sheet,
            teachers = report.teachers,
            slots = report.slots,
            lessons = report.lessons,
            "import committed"
        );
        Ok(report)
    }

    pub fn import_file<P: AsRef<Path>>(&self, owner: OwnerId, path: P) -> Result<ImportReport> {
        let mut workbook = ExcelWorkbook::open(path)?;
        self.import(owner, &mut workbook)
    }
}
