// Domain layer: college records, prediction results and the dataset source port.

pub mod model;
pub mod ports;
