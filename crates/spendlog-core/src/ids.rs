/// Source of expense identifiers.
///
/// Stores call `next_id` while holding their write lock, so implementations
/// only need to guarantee that successive calls return strictly increasing
/// values.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> u64;
}
