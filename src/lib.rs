// Biblioteca raíz del crate `timetable_sub`.
// Lectura de horarios escolares desde Excel, persistencia por propietario en
// SQLite y ranking de docentes suplentes.
pub mod config;
pub mod error;
pub mod excel;
pub mod ingest;
pub mod lexicon;
pub mod models;
pub mod ranking;
pub mod store;

pub use config::AppConfig;
pub use error::{Result, TimetableError};
pub use excel::{parse_timetable, parse_timetable_file, MemoryWorkbook, SheetSource, Timetable};
pub use ingest::{ImportReport, Importer, OwnerLocks};
pub use models::{Candidate, Day, OwnerId, Schedule, Slot, Substitution, Teacher, TeacherId};
pub use ranking::{find_substitutes, rank_candidates, Ranking, RankingNotice};
pub use store::ScheduleStore;
