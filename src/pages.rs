//! Page generation modules for different view types
//!
//! Each page module renders one kind of output file (index, write-up,
//! projects) from shared components.

pub mod index;
pub mod projects;
pub mod writeup;
