//! NUI callback names registered by the host resource.

/// Fetch the catalog filtered by a search string.
pub const GET_CATALOG: &str = "shop:getCatalog";

/// Place an order for one item.
pub const PLACE_ORDER: &str = "shop:placeOrder";

/// Tell the host that the overlay closed itself.
pub const CLOSE: &str = "shop:close";
