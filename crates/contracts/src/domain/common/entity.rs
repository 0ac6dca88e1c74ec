/// Server-assigned identifier of every inventory entity.
pub type EntityId = i64;

/// Трейт для сущностей, которые можно показать в выпадающем списке или таблице.
///
/// The console only ever holds read-through copies of server-owned rows, so the
/// trait exposes identity and display data, never lifecycle hooks.
pub trait Entity {
    /// Id used to match a selection against a freshly loaded option list.
    fn id(&self) -> EntityId;

    /// Human-readable label for dropdowns.
    fn display_name(&self) -> String;

    /// Plural name for messages ("factory sections").
    fn list_name() -> &'static str
    where
        Self: Sized;
}
