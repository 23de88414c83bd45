use crate::correlation::domain::Vulnerability;
use crate::ports::outbound::PinStorage;
use crate::shared::Result;
use std::collections::HashSet;

/// PinnedSetStore - the user's durably persisted working set of tracked
/// vulnerabilities.
///
/// A single owned store with an explicit load/save lifecycle: loaded
/// once from storage at startup, persisted synchronously on every
/// mutation. The collection is ordered most-recently-pinned first and
/// unique by identifier. Views reach it only through pin/unpin/import/
/// export, never as a raw mutable collection.
pub struct PinnedSetStore<S: PinStorage> {
    storage: S,
    vulnerabilities: Vec<Vulnerability>,
}

impl<S: PinStorage> PinnedSetStore<S> {
    /// Loads the persisted set. Missing or corrupt storage degrades to an
    /// empty set with a warning; loading never fails.
    pub fn load(storage: S) -> Self {
        let vulnerabilities = match storage.load() {
            Ok(loaded) => dedup_by_cve(loaded),
            Err(e) => {
                eprintln!("⚠️  Warning: pinned set could not be loaded, starting empty: {}", e);
                vec![]
            }
        };

        Self {
            storage,
            vulnerabilities,
        }
    }

    /// Pins a vulnerability at the front of the set. Pinning an
    /// already-present identifier is a no-op that leaves existing order
    /// untouched.
    ///
    /// Returns whether the set changed.
    pub fn pin(&mut self, vulnerability: Vulnerability) -> Result<bool> {
        if self.contains(&vulnerability.cve) {
            return Ok(false);
        }
        self.vulnerabilities.insert(0, vulnerability);
        self.persist()?;
        Ok(true)
    }

    /// Removes a vulnerability by identifier. Absent identifiers are a
    /// no-op.
    pub fn unpin(&mut self, cve: &str) -> Result<bool> {
        let before = self.vulnerabilities.len();
        self.vulnerabilities.retain(|v| v.cve != cve);
        if self.vulnerabilities.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Replaces the entire set (full overwrite, not a merge). Duplicate
    /// identifiers in the input keep their first occurrence.
    pub fn import_all(&mut self, vulnerabilities: Vec<Vulnerability>) -> Result<()> {
        self.vulnerabilities = dedup_by_cve(vulnerabilities);
        self.persist()
    }

    /// Current contents, most-recently-pinned first. The returned shape
    /// is identical to what `import_all` accepts, so exports round-trip.
    pub fn export_all(&self) -> Vec<Vulnerability> {
        self.vulnerabilities.clone()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.vulnerabilities.clear();
        self.persist()
    }

    pub fn contains(&self, cve: &str) -> bool {
        self.vulnerabilities.iter().any(|v| v.cve == cve)
    }

    pub fn len(&self) -> usize {
        self.vulnerabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.vulnerabilities)
    }
}

fn dedup_by_cve(vulnerabilities: Vec<Vulnerability>) -> Vec<Vulnerability> {
    let mut seen: HashSet<String> = HashSet::new();
    vulnerabilities
        .into_iter()
        .filter(|v| seen.insert(v.cve.clone()))
        .collect()
}
