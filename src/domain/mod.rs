// Domain layer: plain data and the ports other layers plug into.

pub mod model;
pub mod policy;
pub mod ports;
