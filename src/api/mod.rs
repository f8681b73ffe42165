pub mod emergencies;
pub mod health;
pub mod swagger;
pub mod users;
