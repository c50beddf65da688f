pub mod context;
pub mod controller;
pub mod gateway;
pub mod host_bridge;
pub mod session;
pub mod settings;
pub mod ui;
pub mod view_model;

pub use context::ShopContext;
pub use controller::{Outcome, ShopController, ShopEvent};
pub use gateway::{HostGateway, NuiGateway};
pub use session::ShopSession;
pub use settings::{load_settings, SearchOrdering, ShopSettings};
