//! Directory-of-vCards store
//!
//! A vdir is a flat directory holding one `.vcf` file per contact, the layout
//! local address-book sync tools maintain. The file name is the record path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use ulid::Ulid;
use walkdir::WalkDir;

use super::{etag_for, CallContext, ContactStore, StoreError, StoreResult};
use crate::contact::{vcard, Card, ContactRecord};

const VCARD_EXTENSION: &str = "vcf";

#[derive(Debug, Clone)]
pub struct VdirStore {
    name: String,
    root: PathBuf,
}

impl VdirStore {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> StoreResult<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "address book directory {} does not exist",
                self.root.display()
            )))
        }
    }

    /// Resolve a record path to a file, refusing anything outside the root
    fn file_for(&self, path: &str) -> StoreResult<PathBuf> {
        let candidate = Path::new(path);
        let is_plain_name = candidate.components().count() == 1
            && candidate.file_name().is_some_and(|n| n == candidate.as_os_str());
        if !is_plain_name {
            return Err(StoreError::NotFound(path.to_string()));
        }
        Ok(self.root.join(candidate))
    }

    fn read_record(&self, path: &str, file: &Path) -> StoreResult<ContactRecord> {
        let bytes = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let card = vcard::parse_bytes(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_string(),
            source,
        })?;
        Ok(ContactRecord {
            path: path.to_string(),
            etag: Some(etag_for(&bytes)),
            card,
        })
    }

    /// Write through a temp file and rename so readers never see half a card
    fn write_record(&self, path: &str, file: &Path, card: &Card) -> StoreResult<ContactRecord> {
        let text = vcard::serialize(card);
        let tmp = self.root.join(format!(".{path}.tmp"));
        fs::write(&tmp, text.as_bytes())?;
        fs::rename(&tmp, file)?;
        debug!(account = %self.name, path, "wrote contact");
        Ok(ContactRecord {
            path: path.to_string(),
            etag: Some(etag_for(text.as_bytes())),
            card: card.clone(),
        })
    }
}

impl ContactStore for VdirStore {
    fn account_name(&self) -> &str {
        &self.name
    }

    fn list_contacts(&self, ctx: &CallContext) -> StoreResult<Vec<ContactRecord>> {
        ctx.check("list contacts")?;
        self.ensure_root()?;

        let mut records = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| StoreError::Unavailable(e.to_string()))?;
            let file = entry.path();
            if !entry.file_type().is_file()
                || file.extension().and_then(|e| e.to_str()) != Some(VCARD_EXTENSION)
            {
                continue;
            }
            let Some(path) = file.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.starts_with('.') {
                continue;
            }

            ctx.check("read contact")?;
            match self.read_record(path, file) {
                Ok(record) => records.push(record),
                Err(StoreError::Parse { path, source }) => {
                    warn!(account = %self.name, %path, error = %source, "skipping unreadable card");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(account = %self.name, count = records.len(), "listed contacts");
        Ok(records)
    }

    fn get_contact(&self, ctx: &CallContext, path: &str) -> StoreResult<ContactRecord> {
        ctx.check("get contact")?;
        self.ensure_root()?;
        let file = self.file_for(path)?;
        self.read_record(path, &file)
    }

    fn put_contact(&self, ctx: &CallContext, record: &ContactRecord) -> StoreResult<ContactRecord> {
        ctx.check("put contact")?;
        self.ensure_root()?;
        let file = self.file_for(&record.path)?;

        if let Some(expected) = &record.etag {
            let current = match fs::read(&file) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(StoreError::NotFound(record.path.clone()))
                }
                Err(e) => return Err(e.into()),
            };
            if &etag_for(&current) != expected {
                return Err(StoreError::Conflict {
                    path: record.path.clone(),
                });
            }
        }

        self.write_record(&record.path, &file, &record.card)
    }

    fn create_contact(&self, ctx: &CallContext, card: Card) -> StoreResult<ContactRecord> {
        ctx.check("create contact")?;
        self.ensure_root()?;
        let path = format!("{}.{VCARD_EXTENSION}", Ulid::new());
        let file = self.file_for(&path)?;
        self.write_record(&path, &file, &card)
    }
}
