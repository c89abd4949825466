pub mod episode;
pub mod home;
pub mod log;
pub mod queue;
