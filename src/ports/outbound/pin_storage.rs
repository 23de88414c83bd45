use crate::correlation::domain::Vulnerability;
use crate::shared::Result;

/// PinStorage port for durable persistence of the pinned vulnerability set.
///
/// The stored shape is a single JSON array of canonical vulnerabilities,
/// most-recently-pinned first, so exports are directly re-importable.
pub trait PinStorage {
    /// Loads the persisted set. Implementations report corruption as an
    /// error; the store above degrades that to an empty set.
    fn load(&self) -> Result<Vec<Vulnerability>>;

    /// Persists the whole set atomically.
    fn save(&self, vulnerabilities: &[Vulnerability]) -> Result<()>;
}
