// Domain layer: value types shared by the server and the asset helper, plus the ports they call out through.

pub mod model;
pub mod ports;
