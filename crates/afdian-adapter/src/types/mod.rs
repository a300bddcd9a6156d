/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod models;
pub mod responses;
pub mod sponsorship;

pub use models::*;
pub use responses::*;
pub use sponsorship::*;
