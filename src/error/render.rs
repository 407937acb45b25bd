use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Layer {id} does not exist.")]
    UnknownLayer { id: u64 },
    #[error("Map layer limit of {limit} reached.")]
    LayerLimit { limit: usize },
    #[error("Position ({latitude}, {longitude}) is not drawable.")]
    InvalidPosition { latitude: f64, longitude: f64 },
    #[error("Polyline needs at least two points, got {points}.")]
    DegeneratePolyline { points: usize },
    #[error("Map view is no longer attached.")]
    Detached,
}
