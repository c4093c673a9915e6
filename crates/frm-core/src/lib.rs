//! frm Core Library
//!
//! Core domain logic for frm: tracking fields on address-book contacts, the
//! local interaction ledger, multi-account aggregation, due-date evaluation
//! and spread scheduling.

pub mod aggregator;
pub mod config;
pub mod contact;
pub mod context;
pub mod due;
pub mod duration;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod spread;
pub mod stats;
pub mod store;
