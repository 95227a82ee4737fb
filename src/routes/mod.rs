pub mod cities;
pub mod data;
pub mod health;
pub mod sync;
