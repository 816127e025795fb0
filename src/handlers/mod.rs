pub mod sport;
pub mod tenant;
