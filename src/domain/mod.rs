// Domain layer: draw inputs and outputs. No dependencies beyond std/serde.

pub mod model;
pub mod report;
