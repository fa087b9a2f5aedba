// Data models and request/response shapes

pub mod activity;
pub mod animal;
pub mod clinic;
pub mod history;
pub mod timestamp;
pub mod user;
pub mod weight;

pub use activity::*;
pub use animal::*;
pub use clinic::*;
pub use history::*;
pub use user::*;
pub use weight::*;
