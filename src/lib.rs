pub mod analysis;
pub mod collab;
pub mod data;
pub mod util;
