mod role;
mod user;

pub use role::Role;
pub use user::{
    AuthPayload, NewUser, PaginationParameters, UpdateUser, User, UserProfile, UserSummary,
    UsersFilter,
};
