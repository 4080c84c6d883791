//! # File I/O
//!
//! Project and load-case files on disk:
//! - **Atomic saves**: write `.tmp`, fsync, rename over the target
//! - **Advisory locking**: an OS lock plus a `.lock` sidecar naming the holder
//! - **Version checks**: refuse project files from a newer schema
//!
//! ## File Formats
//!
//! - `.pcap` - a [`Project`] as pretty-printed JSON
//! - load-case files - a JSON array of [`LoadCase`] objects, or an object
//!   with a `"reactions"` array
//!
//! ## Example
//!
//! ```rust,no_run
//! use pilecap_core::file_io::{save_project, load_project, FileLock};
//! use pilecap_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("bridge.pcap");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock);
//!
//! let loaded = load_project(path).unwrap();
//! assert_eq!(loaded.meta.job_id, "25-001");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::{validate_load_cases, LoadCase};
use crate::project::{Project, SCHEMA_VERSION};

/// Project file extension
pub const PROJECT_EXTENSION: &str = "pcap";

/// Age after which a lock is considered abandoned
const STALE_LOCK_HOURS: i64 = 24;

fn serialization_error(e: serde_json::Error) -> CalcError {
    CalcError::SerializationError { reason: e.to_string() }
}

fn read_text(path: &Path, operation: &str) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))
}

/// Write `bytes` to `path` through a sibling `.tmp` file.
///
/// The target is either left untouched or fully replaced.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    let tmp_display = tmp_path.display().to_string();

    let mut tmp_file = File::create(&tmp_path).map_err(|e| CalcError::file_error("create temp file", &tmp_display, e.to_string()))?;
    tmp_file
        .write_all(bytes)
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("write temp file", &tmp_display, e.to_string())
        })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

// ============================================================================
// Projects
// ============================================================================

/// Save a project with atomic write semantics.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(serialization_error)?;
    write_atomic(path, json.as_bytes())
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * `CalcError::FileError` - I/O failure
/// * `CalcError::SerializationError` - not a project file
/// * `CalcError::VersionMismatch` - written by an incompatible schema
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = read_text(path, "read project")?;
    let project: Project = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid project file {}: {}", path.display(), e),
    })?;
    validate_version(&project.meta.version)?;

    tracing::debug!(path = %path.display(), items = project.item_count(), "loaded project");
    Ok(project)
}

/// Load a project and report whether someone else holds its lock.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Check a file's schema version against [`SCHEMA_VERSION`].
///
/// The major version must match; while the schema is 0.x a file from a
/// newer minor version is also refused.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.split('.').map(|p| p.trim().parse::<u32>());
        let major = parts.next()?.ok()?;
        let minor = parts.next().unwrap_or(Ok(0)).ok()?;
        Some((major, minor))
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}

// ============================================================================
// Load Cases
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum LoadCaseFile {
    List(Vec<LoadCase>),
    Table { reactions: Vec<LoadCase> },
}

/// Read and validate load cases from a JSON file.
///
/// Cases with blank names are dropped, the same as storing them in an
/// [`InMemoryLoadCases`](crate::loads::InMemoryLoadCases) repository.
pub fn load_load_cases(path: &Path) -> CalcResult<Vec<LoadCase>> {
    let contents = read_text(path, "read load cases")?;
    let file: LoadCaseFile = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid load-case file {}: {}", path.display(), e),
    })?;
    let cases: Vec<LoadCase> = match file {
        LoadCaseFile::List(cases) | LoadCaseFile::Table { reactions: cases } => cases,
    }
    .into_iter()
    .filter(|c| !c.name.trim().is_empty())
    .collect();

    validate_load_cases(&cases)?;
    tracing::debug!(path = %path.display(), count = cases.len(), "loaded load cases");
    Ok(cases)
}

/// Save load cases as a JSON array.
pub fn save_load_cases(cases: &[LoadCase], path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(cases).map_err(serialization_error)?;
    write_atomic(path, json.as_bytes())
}

// ============================================================================
// Locking
// ============================================================================

/// Contents of a `.lock` sidecar file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine the lock was taken on
    pub machine: String,
    /// Process holding the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Whether the holder is gone or the lock has been abandoned.
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid)
    }
}

fn hostname() -> Option<String> {
    let vars: &[&str] = if cfg!(windows) { &["COMPUTERNAME"] } else { &["HOSTNAME", "HOST"] };
    vars.iter().find_map(|v| std::env::var(v).ok())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive advisory lock on a project file, released on drop.
///
/// Holds an OS-level lock (via `fs2`) on the sidecar file and writes the
/// holder's [`LockInfo`] into it so other users can see who has the file.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// A sidecar left behind by a dead process or older than a day is taken over.
    ///
    /// # Errors
    ///
    /// `CalcError::FileLocked` when another live holder has it.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        if let Some(existing) = FileLock::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let lock_path = lock_path_for(path);
        let lock_display = lock_path.display().to_string();
        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", &lock_display, e.to_string()))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| CalcError::file_locked(path.display().to_string(), "another process", "unknown"))?;

        let info = LockInfo::new(user_id);
        let json = serde_json::to_string_pretty(&info).map_err(serialization_error)?;
        lock_file
            .write_all(json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", &lock_display, e.to_string()))?;

        tracing::debug!(path = %path.display(), user = %info.user_id, "acquired project lock");
        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live holder of the lock on `path`, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let contents = fs::read_to_string(lock_path_for(path)).ok()?;
        let info: LockInfo = serde_json::from_str(&contents).ok()?;
        (!info.is_stale()).then_some(info)
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `bridge.pcap` -> `bridge.pcap.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut name = project_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::PileCapInput;
    use std::env::temp_dir;

    fn temp_path(name: &str, extension: &str) -> PathBuf {
        temp_dir().join(format!("pilecap_test_{}_{}.{}", name, std::process::id(), extension))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/jobs/bridge.pcap"));
        assert_eq!(lock_path, Path::new("/jobs/bridge.pcap.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
        assert!(!info.is_stale());
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut info = LockInfo::new("someone");
        info.locked_at = Utc::now() - Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip", PROJECT_EXTENSION);

        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        let id = project.add_item(PileCapInput::new("Pier 4"));
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.get_item(&id).map(|i| i.label.as_str()), Some("Pier 4"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_path("atomic", PROJECT_EXTENSION);
        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_path("lock", PROJECT_EXTENSION);
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.project_path(), path.as_path());
        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_project_rejected() {
        let path = temp_path("newer", PROJECT_EXTENSION);
        let mut project = Project::new("Test", "TEST", "Client");
        project.meta.version = "9.0.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_path("lock_check", PROJECT_EXTENSION);
        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();

        let (loaded, lock_info) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_cases_array_and_table() {
        let path = temp_path("cases_list", "json");
        fs::write(&path, r#"[{"name": "A", "fz": 100.0}, {"name": " ", "fz": 5.0}]"#).unwrap();
        let cases = load_load_cases(&path).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].fz, 100.0);
        let _ = fs::remove_file(&path);

        let path = temp_path("cases_table", "json");
        fs::write(
            &path,
            r#"{"reactions": [{"load_case": "Dead", "dc_factor": 1.25, "fx": 0, "fy": 0, "fz": 900, "mx": 10, "my": 0}]}"#,
        )
        .unwrap();
        let cases = load_load_cases(&path).unwrap();
        assert_eq!(cases[0].name, "Dead");
        assert_eq!(cases[0].dc_factor, 1.25);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_cases_roundtrip_and_duplicates() {
        let path = temp_path("cases_roundtrip", "json");
        let cases = vec![LoadCase::new("A").with_fz(1.0), LoadCase::new("B").with_mx(2.0)];
        save_load_cases(&cases, &path).unwrap();
        assert_eq!(load_load_cases(&path).unwrap(), cases);

        fs::write(&path, r#"[{"name": "A"}, {"name": "A"}]"#).unwrap();
        assert!(load_load_cases(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = load_project(Path::new("/nonexistent/dir/none.pcap")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
