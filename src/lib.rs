/*!
# daylog

daylog persists date-keyed activity logs in a remote object store and offers
aggregation (day, week, month, arbitrary ranges) and search over them.

## Core Features

- One JSON day log per calendar date, stored at `base/YYYY/MM/YYYY-MM-DD.json`
- Entry create/update/delete with optimistic concurrency and bounded retries
- Filtered search over a date window with a caller-visible limit policy
- Week and month views, range statistics and templated summaries
- Pluggable insight provider for summary text, with a template default
- Local tar.gz backups of the remote tree

## Architecture

- `model`: day logs, entries, derived views and request/response types
- `storage`: the [`LogStorage`] contract
- `remote`: the [`remote::ObjectStore`] seam with GitHub and in-memory stores
- `provider`: [`RemoteLogStore`], the contract over an object store
- `query`: search predicates, window handling and aggregation
- `summary`: summary templates and the [`summary::InsightProvider`] capability
- `backup`: archive creation
- `config`, `errors`, `logging`, `constants`: ambient infrastructure

## Usage Example

```rust,no_run
use chrono::Local;
use daylog::model::{CreateEntryRequest, SearchRequest};
use daylog::{Config, LogStorage, RemoteLogStore};

fn main() -> daylog::AppResult<()> {
    let config = Config::load()?;
    let logs = RemoteLogStore::from_config(&config)?;

    logs.create_entry(CreateEntryRequest {
        date: Local::now().date_naive(),
        title: "Released 1.4".to_string(),
        tags: vec!["deployment".to_string()],
        status: Some(8),
        ..Default::default()
    })?;

    let found = logs.search_logs(&SearchRequest {
        tags: vec!["deployment".to_string()],
        ..Default::default()
    })?;
    println!("{} deployments in the last three months", found.total_count);
    Ok(())
}
```
*/

/// Local archive backups
pub mod backup;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the crate
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Tracing subscriber setup
pub mod logging;
/// Entity model and request types
pub mod model;
/// Object-store backed implementation of the storage contract
pub mod provider;
/// Search and aggregation
pub mod query;
/// Object stores
pub mod remote;
/// The persistence contract
pub mod storage;
/// Summary generation
pub mod summary;

// Re-export important types for convenience
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use provider::RemoteLogStore;
pub use storage::LogStorage;
