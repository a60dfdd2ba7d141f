pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use gate::*;
pub use jwt::*;
pub use middleware::*;
pub use models::*;
