//! Where log lines come from
//!
//! The reducer itself cannot fail; reading the log can. A `LineSource` is
//! re-read on every query so each query works on its own snapshot.

use crate::reducer::{find_match, list_matches};
use log::debug;
use shared::MatchReport;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LogSourceError {
    #[error("log file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read log file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Supplies the full, ordered set of raw log lines
pub trait LineSource: Send + Sync {
    fn read_lines(&self) -> Result<Vec<String>, LogSourceError>;
}

/// Log file on disk, read in full on every call
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileLogSource {
    fn read_lines(&self) -> Result<Vec<String>, LogSourceError> {
        if !self.path.is_file() {
            return Err(LogSourceError::NotFound {
                path: self.path.clone(),
            });
        }

        // Server logs are not guaranteed to be valid UTF-8
        let bytes = fs::read(&self.path).map_err(|source| LogSourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);

        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        debug!("Read {} lines from {}", lines.len(), self.path.display());
        Ok(lines)
    }
}

/// Log held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSource {
    lines: Vec<String>,
}

impl MemoryLogSource {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }
}

impl LineSource for MemoryLogSource {
    fn read_lines(&self) -> Result<Vec<String>, LogSourceError> {
        Ok(self.lines.clone())
    }
}

pub fn list_matches_from(source: &dyn LineSource) -> Result<Vec<MatchReport>, LogSourceError> {
    let lines = source.read_lines()?;
    Ok(list_matches(&lines))
}

pub fn find_match_from(
    source: &dyn LineSource,
    name: &str,
) -> Result<Option<MatchReport>, LogSourceError> {
    let lines = source.read_lines()?;
    Ok(find_match(&lines, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_LOG: &str = "  0:00 ------------------------------------------------------------
  0:00 InitGame: \\sv_floodProtect\\1\\sv_maxPing\\0
  0:25 ClientConnect: 2
  1:08 Kill: 3 2 6: Isgalamido killed Mocinha by MOD_ROCKET
  1:26 Kill: 1022 4 22: <world> killed Zeh by MOD_TRIGGER_HURT
  1:47 ShutdownGame:
  0:00 InitGame: \\sv_floodProtect\\1
  2:00 Kill: 2 3 7: Mocinha killed Isgalamido by MOD_ROCKET_SPLASH
";

    fn write_log(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_source_reads_lines() {
        let file = write_log(SAMPLE_LOG);
        let source = FileLogSource::new(file.path());

        let lines = source.read_lines().unwrap();
        assert_eq!(lines.len(), 8);
        assert!(lines[1].contains("InitGame"));
    }

    #[test]
    fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_games.log");
        let source = FileLogSource::new(&missing);

        let err = source.read_lines().unwrap_err();
        assert!(matches!(err, LogSourceError::NotFound { .. }));
        assert!(err.to_string().contains("log file not found at"));
    }

    #[test]
    fn test_file_source_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileLogSource::new(dir.path());
        assert!(matches!(
            source.read_lines(),
            Err(LogSourceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_file_source_tolerates_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"  0:00 InitGame:\n  0:01 Kill: 2 3 6: Jo\xe3o killed Zeh by MOD_ROCKET\n")
            .unwrap();

        let reports = list_matches_from(&FileLogSource::new(file.path())).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].total_kills, 1);
        assert_eq!(reports[0].score("Zeh"), Some(0));
    }

    #[test]
    fn test_list_matches_from_file() {
        let file = write_log(SAMPLE_LOG);
        let reports = list_matches_from(&FileLogSource::new(file.path())).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].total_kills, 2);
        assert_eq!(reports[0].score("Isgalamido"), Some(1));
        assert_eq!(reports[0].score("Zeh"), Some(-1));
        assert_eq!(reports[1].total_kills, 1);
    }

    #[test]
    fn test_find_match_from_memory() {
        let source = MemoryLogSource::new(SAMPLE_LOG);

        let report = find_match_from(&source, "GAME_2").unwrap().unwrap();
        assert_eq!(report.name, "game_2");
        assert_eq!(report.score("Mocinha"), Some(1));

        assert_eq!(find_match_from(&source, "game_5").unwrap(), None);
    }

    #[test]
    fn test_source_error_propagates() {
        let source = FileLogSource::new("/definitely/not/here/games.log");
        assert!(list_matches_from(&source).is_err());
        assert!(find_match_from(&source, "game_1").is_err());
    }

    #[test]
    fn test_repeated_reads_are_independent() {
        let source = MemoryLogSource::new(SAMPLE_LOG);
        let first = list_matches_from(&source).unwrap();
        let second = list_matches_from(&source).unwrap();
        assert_eq!(first, second);
    }
}
