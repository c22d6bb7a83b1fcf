//! Registry configuration: sessions loaded into the store at startup.

use serde::Deserialize;
use std::collections::HashSet;

use super::error::ValidationError;

/// One session to create at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSession {
    pub id: String,
    pub name: String,
    pub max_capacity: u32,
}

/// Registry configuration
///
/// `seed_sessions` is a comma-separated list of `id:name:capacity` entries,
/// e.g. `123:Session 1:3,456:Workshop:20`. Unset means the single default
/// session; an empty string means no seeds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    pub seed_sessions: Option<String>,
}

const DEFAULT_SEED: &str = "123:Session 1:3";

impl RegistryConfig {
    /// Parsed seed sessions.
    pub fn seeds(&self) -> Result<Vec<SeedSession>, ValidationError> {
        let raw = self.seed_sessions.as_deref().unwrap_or(DEFAULT_SEED);
        let mut seen = HashSet::new();
        let mut seeds = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let seed = parse_seed(entry)?;
            if !seen.insert(seed.id.clone()) {
                return Err(ValidationError::DuplicateSeedSession(seed.id));
            }
            seeds.push(seed);
        }
        Ok(seeds)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.seeds().map(|_| ())
    }
}

fn parse_seed(entry: &str) -> Result<SeedSession, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidSeedSession {
        entry: entry.to_string(),
        reason: reason.to_string(),
    };

    // Names may contain ':'; id is before the first, capacity after the last.
    let (id, rest) = entry.split_once(':').ok_or_else(|| invalid("expected id:name:capacity"))?;
    let (name, capacity) = rest
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected id:name:capacity"))?;

    let id = id.trim();
    let name = name.trim();
    if id.is_empty() {
        return Err(invalid("id is empty"));
    }
    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    let max_capacity = capacity
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid("capacity must be a non-negative integer"))?;

    Ok(SeedSession {
        id: id.to_string(),
        name: name.to_string(),
        max_capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: Option<&str>) -> RegistryConfig {
        RegistryConfig {
            seed_sessions: raw.map(str::to_string),
        }
    }

    #[test]
    fn unset_uses_default_seed() {
        let seeds = config(None).seeds().unwrap();
        assert_eq!(
            seeds,
            vec![SeedSession {
                id: "123".to_string(),
                name: "Session 1".to_string(),
                max_capacity: 3,
            }]
        );
    }

    #[test]
    fn empty_string_means_no_seeds() {
        assert!(config(Some("")).seeds().unwrap().is_empty());
    }

    #[test]
    fn parses_multiple_entries() {
        let seeds = config(Some("a:Keynote:100, b:Room: B:0")).seeds().unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[1].name, "Room: B");
        assert_eq!(seeds[1].max_capacity, 0);
    }

    #[test]
    fn rejects_bad_capacity() {
        let err = config(Some("a:Keynote:-1")).seeds().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSeedSession { .. }));
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(config(Some("a:Keynote")).validate().is_err());
        assert!(config(Some(":Keynote:3")).validate().is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        assert_eq!(
            config(Some("a:One:1,a:Two:2")).seeds(),
            Err(ValidationError::DuplicateSeedSession("a".to_string()))
        );
    }
}
