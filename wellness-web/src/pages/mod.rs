pub mod game;
pub mod home;
pub mod mansion;
pub mod not_found;
