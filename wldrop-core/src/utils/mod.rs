pub mod deadline;
pub mod links;
