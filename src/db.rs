pub mod driver;
pub mod entity;
pub mod loader;
pub mod migrations;

pub mod prelude {
    pub use super::driver::DatabaseDriver;
    pub use super::entity::*;
    pub use super::loader::Loader;
}
