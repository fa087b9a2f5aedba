// Business logic services

pub mod activity_service;
pub mod animal_service;
pub mod mutator;
pub mod user_service;
pub mod weight_service;

pub use activity_service::ActivityService;
pub use animal_service::AnimalService;
pub use mutator::RecordPatch;
pub use user_service::UserService;
pub use weight_service::WeightService;
