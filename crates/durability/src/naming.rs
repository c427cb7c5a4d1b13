//! Event file naming
//!
//! The default scheme embeds the wall-clock second the writer was created in:
//!
//! ```text
//! <directory>/events.out.tfevents.<unix seconds>.v2
//! ```
//!
//! The `v2` suffix is kept for downstream readers that glob on it. Two writers
//! created in the same directory within the same second resolve to the same
//! path, and the second one truncates the first one's file. Writers that may
//! start concurrently should opt into [`FileNaming::Unique`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed marker every event file name starts with.
pub const FILE_PREFIX: &str = "events.out.tfevents";

/// Format suffix every event file name ends with.
pub const FILE_SUFFIX: &str = "v2";

static UNIQUE_SEQ: AtomicU64 = AtomicU64::new(0);

/// How the event file name is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `events.out.tfevents.<secs>.v2`; same-second writers share a path and
    /// the file is truncated on open.
    #[default]
    Seconds,

    /// `events.out.tfevents.<secs>.<micros>.<pid>.<seq>.v2`; never reuses a
    /// name within a process, and the file is created exclusively.
    Unique,
}

impl FileNaming {
    /// Check if the file must not exist before it is opened.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, FileNaming::Unique)
    }
}

/// File name for a writer created at `created_at`.
pub fn event_file_name(naming: FileNaming, created_at: DateTime<Utc>) -> String {
    let secs = created_at.timestamp();
    match naming {
        FileNaming::Seconds => format!("{}.{}.{}", FILE_PREFIX, secs, FILE_SUFFIX),
        FileNaming::Unique => format!(
            "{}.{}.{:06}.{}.{}.{}",
            FILE_PREFIX,
            secs,
            created_at.timestamp_subsec_micros(),
            std::process::id(),
            UNIQUE_SEQ.fetch_add(1, Ordering::Relaxed),
            FILE_SUFFIX
        ),
    }
}

/// Full path of the event file inside `directory`.
pub fn event_file_path(
    directory: &Path,
    naming: FileNaming,
    created_at: DateTime<Utc>,
) -> PathBuf {
    directory.join(event_file_name(naming, created_at))
}
