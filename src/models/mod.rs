pub mod appointment;
pub mod enums;
pub mod medical_file;
pub mod patient;
pub mod staff;

pub use appointment::*;
pub use medical_file::*;
pub use patient::*;
pub use staff::*;
