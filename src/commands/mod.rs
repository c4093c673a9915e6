//! CLI commands for frm

pub mod add;
pub mod check;
pub mod contacts;
pub mod context;
pub mod dispatch;
pub mod format;
pub mod group;
pub mod history;
pub mod ignore;
pub mod list;
pub mod log;
pub mod snooze;
pub mod spread;
pub mod stats;
pub mod track;
pub mod triage;
