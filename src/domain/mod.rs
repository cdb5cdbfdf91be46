// Domain layer: roster models and ports. Depends on nothing above `utils`.

pub mod model;
pub mod ports;
