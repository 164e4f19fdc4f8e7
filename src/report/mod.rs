//! Output rendering.

pub mod generator;

pub use generator::{
    generate_json, render_analysis, render_answer, render_project, render_provider_listing,
};
