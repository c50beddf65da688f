pub mod item_card;
pub mod overlay;
pub mod quantity_modal;

pub use item_card::ItemCard;
pub use overlay::ShopOverlay;
pub use quantity_modal::QuantityModal;
