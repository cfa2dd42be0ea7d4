use crc32fast::Hasher;
use uuid::Uuid;

/// Source of fresh entity ids.
///
/// Rows, columns and content blocks minted by the editor take their id from
/// here. Ids are opaque tokens; uniqueness is by convention only.
pub trait IdSource {
    fn new_id(&mut self) -> String;
}

/// Random v4 UUIDs, the default for interactive editing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn new_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Generate a short seed from a name using CRC32
pub fn get_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator, deterministic for a given seed
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u32,
}

impl IDGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Get ID seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Move the counter past every `{seed}-{n}` id in `taken`.
    ///
    /// A document saved from an earlier session already holds the ids this
    /// generator minted then; resuming keeps new ids clear of them.
    pub fn resume_after<'a>(&mut self, taken: impl IntoIterator<Item = &'a str>) {
        let prefix = format!("{}-", self.seed);
        let highest = taken
            .into_iter()
            .filter_map(|id| id.strip_prefix(&prefix))
            .filter_map(|n| n.parse::<u32>().ok())
            .max();
        if let Some(highest) = highest {
            self.count = self.count.max(highest);
        }
    }
}

impl IdSource for IDGenerator {
    fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}

impl<T: IdSource + ?Sized> IdSource for Box<T> {
    fn new_id(&mut self) -> String {
        (**self).new_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_stable() {
        assert_eq!(get_seed("welcome.json"), get_seed("welcome.json"));
        assert_ne!(get_seed("welcome.json"), get_seed("promo.json"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::from_seed("t");

        assert_eq!(gen.new_id(), "t-1");
        assert_eq!(gen.new_id(), "t-2");
        assert_eq!(gen.seed(), "t");
    }

    #[test]
    fn test_resume_after_taken_ids() {
        let mut gen = IDGenerator::from_seed("t");
        gen.resume_after(["t-3", "t-12", "other-40", "t-x", "body"]);
        assert_eq!(gen.new_id(), "t-13");

        // Never winds the counter back
        gen.resume_after(["t-2"]);
        assert_eq!(gen.new_id(), "t-14");
    }

    #[test]
    fn test_random_ids_differ() {
        let mut ids = RandomIds;
        assert_ne!(ids.new_id(), ids.new_id());
    }
}
