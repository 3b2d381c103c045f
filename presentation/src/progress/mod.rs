//! Progress reporting for research and debate runs

pub mod reporter;
