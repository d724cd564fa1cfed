//! Users module - accounts and the role each one holds.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{NewUser, User, UserUpdate};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
