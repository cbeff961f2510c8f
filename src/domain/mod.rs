// Domain layer: request descriptors and ports. Payloads stay opaque serde_json values.

pub mod model;
pub mod ports;
