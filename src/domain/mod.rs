// Domain layer: output models and the capabilities (ports) the shaping core works against.

pub mod model;
pub mod ports;
