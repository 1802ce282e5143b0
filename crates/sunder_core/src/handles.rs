use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node in a scene arena.
    ///
    /// Handles are generational: once a node is removed its handle never
    /// resolves again, even if the slot is reused. Every lookup through a
    /// stale handle yields `None`, which the engine treats as "absent".
    pub struct NodeHandle;
}
