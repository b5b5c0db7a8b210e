//! Ports implemented by the infrastructure crates

mod chat;
mod repositories;

pub use chat::ChatClient;
pub use repositories::{
    ActiveEventRepository, AttendanceFilter, AttendanceRepository, MemberDirectory, RepoResult,
};
