/// Transaction directions
///
/// Stored as text on the `transactions` table.

/// Stock received from a supplier. Increases the item's stock.
pub const DIRECTION_RECEIVING: &str = "RECEIVING";

/// Stock issued to an outlet. Decreases the item's stock.
pub const DIRECTION_ISSUING: &str = "ISSUING";

/// Unrecognized stored value. Moves no stock.
pub const DIRECTION_UNKNOWN: &str = "UNKNOWN";
