//! Wire contracts between the shop overlay and the game-side host resource.

pub mod commands;
pub mod item;
pub mod messages;

pub use item::Item;
pub use messages::{
    CatalogRequest, CatalogResponse, HostMessage, OpenPayload, PlaceOrderRequest, SessionConfig,
};
