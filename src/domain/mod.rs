// Domain layer: models, provider faults and the ports the pipeline talks to.

pub mod fault;
pub mod model;
pub mod ports;
