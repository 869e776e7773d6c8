//! Web form front end
//!
//! A mock document model stands in for the browser, so the form binding is
//! testable on any target.

mod dom;
mod driver;
mod form;

pub use dom::{DomElement, DomEvent, MockDom, FORM_ID, HISTORY_ID, OUTPUT_ID};
pub use driver::FormDriver;
pub use form::CalculatorForm;
