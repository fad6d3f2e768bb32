use std::time::{SystemTime, UNIX_EPOCH};
use std::{fs::OpenOptions, io::Write, sync::Mutex};

use serde::Serialize;

use crate::store::store::{StoreEvent, StoreObserver};

// ============================================================================
// Mutation trace — JSONL append log of store events
// ============================================================================

#[derive(Serialize)]
struct TraceRecord<'a> {
    timestamp_ms: u128,
    #[serde(flatten)]
    event: &'a StoreEvent,
}

/// Appends one JSON line per store mutation. Best-effort: any I/O problem
/// degrades to a stderr warning and tracing continues disabled.
pub struct MutationTrace {
    file: Option<Mutex<std::fs::File>>,
}

impl MutationTrace {
    pub fn new(path: &str) -> Self {
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self { file: None }
            }
        }
    }
}

impl StoreObserver for MutationTrace {
    fn on_event(&self, event: &StoreEvent) {
        let file_mutex = match &self.file {
            Some(f) => f,
            None => return, // tracing disabled
        };

        let record = TraceRecord {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            event,
        };

        let json = match serde_json::to_string(&record) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace record: {}", e);
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Warning: trace lock poisoned: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            eprintln!("Warning: failed to write trace record: {}", e);
        }
    }
}
