//! Reusable HTML components for page generation
//!
//! Maud component functions shared by the index, write-up, and projects
//! pages: the page shell, tab navigation, badges, legend colours, and SVG
//! charts.

pub mod badge;
pub mod chart;
pub mod footer;
pub mod layout;
pub mod legend;
pub mod metadata;
pub mod nav;
