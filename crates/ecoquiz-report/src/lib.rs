//! ecoquiz-report: HTML result pages for finished quiz outcomes.

pub mod html;
