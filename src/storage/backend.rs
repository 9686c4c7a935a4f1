use crate::error::{EngineError, EngineResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

/// Durable medium holding one pattern record per line, append-only.
pub trait PatternBackend {
    /// All record lines in write order.
    fn read_lines(&self) -> EngineResult<Vec<String>>;

    fn append_line(&mut self, line: &str) -> EngineResult<()>;

    /// Erase the whole record collection.
    fn clear(&mut self) -> EngineResult<()>;

    fn describe(&self) -> String;
}

/// Record file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatternBackend for FileBackend {
    fn read_lines(&self) -> EngineResult<Vec<String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            // Nothing learned yet
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(EngineError::StorageUnavailable(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let mut lines = Vec::new();
        for (line_num, line_result) in BufReader::new(file).lines().enumerate() {
            match line_result {
                Ok(line) => lines.push(line),
                Err(e) if e.kind() == io::ErrorKind::InvalidData => log::warn!(
                    "Skipping unreadable line {} in {}: {}",
                    line_num + 1,
                    self.path.display(),
                    e
                ),
                Err(e) => {
                    return Err(EngineError::StorageUnavailable(format!(
                        "{}: {}",
                        self.path.display(),
                        e
                    )));
                }
            }
        }
        Ok(lines)
    }

    fn append_line(&mut self, line: &str) -> EngineResult<()> {
        let write_error =
            |e: io::Error| EngineError::WriteError(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_error)?;
        writeln!(file, "{line}").map_err(write_error)?;
        file.flush().map_err(write_error)
    }

    fn clear(&mut self) -> EngineResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::StorageUnavailable(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Volatile backend, used when no durable medium is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    lines: Vec<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl PatternBackend for MemoryBackend {
    fn read_lines(&self) -> EngineResult<Vec<String>> {
        Ok(self.lines.clone())
    }

    fn append_line(&mut self, line: &str) -> EngineResult<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn clear(&mut self) -> EngineResult<()> {
        self.lines.clear();
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("data.txt"));
        assert!(backend.read_lines().unwrap().is_empty());
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("data.txt");
        let mut backend = FileBackend::new(&path);

        backend.append_line("40.00,10,3,39.50,40.50").unwrap();
        backend.append_line("12.00,0,0,11.50,12.50").unwrap();

        assert!(path.exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "40.00,10,3,39.50,40.50\n12.00,0,0,11.50,12.50\n");
        assert_eq!(backend.read_lines().unwrap().len(), 2);
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.txt");
        let mut backend = FileBackend::new(&path);

        backend.append_line("40.00,10,3,39.50,40.50").unwrap();
        backend.clear().unwrap();
        assert!(!path.exists());

        // Clearing twice is fine
        backend.clear().unwrap();
    }

    #[test]
    fn test_unopenable_path_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened as a record file for appending
        let mut backend = FileBackend::new(temp_dir.path());

        let result = backend.append_line("40.00,10,3,39.50,40.50");
        assert!(matches!(result, Err(EngineError::WriteError(_))));

        let result = backend.read_lines();
        assert!(matches!(result, Err(EngineError::StorageUnavailable(_))));
    }

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::with_lines(["1.00,0,0,0.50,1.50"]);
        backend.append_line("2.00,0,0,1.50,2.50").unwrap();
        assert_eq!(backend.read_lines().unwrap().len(), 2);

        backend.clear().unwrap();
        assert!(backend.read_lines().unwrap().is_empty());
    }
}
