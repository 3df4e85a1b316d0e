// Domain layer: form models and ports (interfaces).

pub mod model;
pub mod ports;
