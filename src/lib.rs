//! # FloatChat
//!
//! ARGO float profile extraction and relevance ranking for ocean data
//! assistants.
//!
//! FloatChat reads ARGO NetCDF profile files into normalized
//! [`ProfileRecord`](models::ProfileRecord)s, keeps them in a caller-owned
//! [`ProfileCollection`](collection::ProfileCollection), and ranks them
//! against natural-language questions by date, region and parameter. The
//! top records are rendered into a compact text block for a language model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌────────────┐
//! │  NetCDF /   │──▶│  Extractor  │──▶│ Collection │
//! │  in-memory  │   │  QC+Regions │   │ (snapshot) │
//! └─────────────┘   └─────────────┘   └─────┬──────┘
//!                                           │
//!                      ┌────────────────────┤
//!                      ▼                    ▼
//!                 ┌──────────┐        ┌──────────┐
//!                 │  Scorer  │───────▶│ Context  │
//!                 │ strict → │        │  block   │
//!                 │ relaxed  │        └──────────┘
//!                 └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! floatchat ingest ./argo/                  # extract every *.nc file
//! floatchat inspect ./argo/R2902114_001.nc  # show one extraction
//! floatchat search "temperature in Arabian Sea March 2023" --explain
//! floatchat context "salinity near 15 March 2023"
//! floatchat stats
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`parameters`] | Parameter aliases, ranges and query words |
//! | [`qc`] | Missing-value filtering and statistics |
//! | [`regions`] | Named ocean regions |
//! | [`source`] | Array file access (NetCDF, in-memory) |
//! | [`extract`] | Profile extraction |
//! | [`ingest`] | Batch ingestion with per-file report |
//! | [`collection`] | In-memory record collection |
//! | [`query`] | Query parsing |
//! | [`search`] | Relevance scoring and two-phase search |
//! | [`context`] | Context block rendering |
//! | [`export`] | JSON snapshots |
//! | [`inspect`] | Single-file inspection |
//! | [`stats`] | Collection overview |

pub mod collection;
pub mod config;
pub mod context;
pub mod export;
pub mod extract;
pub mod ingest;
pub mod inspect;
pub mod models;
pub mod parameters;
pub mod qc;
pub mod query;
pub mod regions;
pub mod search;
pub mod source;
pub mod stats;
