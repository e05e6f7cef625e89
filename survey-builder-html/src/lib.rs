//! # survey-builder-html
//!
//! Render a survey as a standalone HTML preview.
//!
//! Single-choice questions become radio groups, multiple-choice questions
//! become checkbox groups and text questions become a textarea. The form is
//! not wired to anything; it shows respondents what the survey will look like.
//!
//! ```rust,ignore
//! use survey_builder_html::{HtmlOptions, to_html};
//!
//! let page = to_html(&survey, &HtmlOptions::new().with_class_prefix("preview"));
//! std::fs::write("preview.html", page)?;
//! ```

mod generator;

pub use generator::{HtmlOptions, to_html};
