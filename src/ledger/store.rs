use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Durable storage behind a [`UsageLedger`](super::UsageLedger).
pub trait LedgerStore {
    /// Raw record, or `None` if nothing has been written yet.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the whole record with `contents`.
    fn overwrite(&mut self, contents: &str) -> io::Result<()>;

    /// Append `contents` to the end of the record, creating it if needed.
    fn append(&mut self, contents: &str) -> io::Result<()>;

    /// Human-readable location for error messages.
    fn describe(&self) -> String {
        "in-memory ledger".to_string()
    }
}

/// Ledger record kept in a scratch file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

impl LedgerStore for FileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn overwrite(&mut self, contents: &str) -> io::Result<()> {
        self.ensure_parent()?;
        fs::write(&self.path, contents)
    }

    fn append(&mut self, contents: &str) -> io::Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(contents.as_bytes())
    }
}

/// In-process ledger record, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn overwrite(&mut self, contents: &str) -> io::Result<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn append(&mut self, contents: &str) -> io::Result<()> {
        self.contents
            .get_or_insert_with(String::new)
            .push_str(contents);
        Ok(())
    }
}
