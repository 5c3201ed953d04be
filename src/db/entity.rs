pub mod flat_order;

pub use flat_order::Entity as FlatOrders;
pub use flat_order::Model as FlatOrderRecord;
