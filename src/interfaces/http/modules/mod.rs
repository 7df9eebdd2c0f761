pub mod auth;
pub mod dashboard;
pub mod health;
pub mod labels;
pub mod memberships;
pub mod metrics;
pub mod projects;
pub mod request_id;
pub mod stories;
pub mod users;
