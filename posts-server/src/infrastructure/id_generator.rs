use uuid::Uuid;

pub(crate) trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{IdGenerator, UuidV4Generator};

    #[test]
    fn generates_distinct_uuid_strings() {
        let ids: HashSet<String> = (0..1000).map(|_| UuidV4Generator.generate()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.len() == 36));
    }
}
