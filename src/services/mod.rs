pub mod api;
pub mod deadline;
pub mod exchange;
pub mod wake;
