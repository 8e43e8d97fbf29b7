/// Opaque slot identifier.
///
/// Client-created slots get a UUID v4 string; identifiers coming back from
/// the records service are accepted verbatim.
pub type SlotId = String;
