mod contacts;
mod interactions;
mod metadata;
mod schedule;
mod triage;
