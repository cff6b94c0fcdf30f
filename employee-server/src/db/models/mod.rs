//! Database Models

pub mod counter;
pub mod employee;

pub use counter::{COUNTER_TABLE, Counter};
pub use employee::{EMPLOYEE_TABLE, Employee};
