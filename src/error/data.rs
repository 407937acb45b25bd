use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("No GPS data available for vehicle '{vehicle_id}'.")]
    NoGpsData { vehicle_id: String },
    #[error("Sample {index} has a non-finite {field}.")]
    InvalidCoordinate { index: usize, field: &'static str },
    #[error("No data available for the selected ride or filter (ride {ride_no}, filter '{filter}').")]
    NoRoute { ride_no: u32, filter: &'static str },
    #[error("No breakpoints found for this ride (ride {ride_no}).")]
    NoBreakPoints { ride_no: u32 },
    #[error("No rides available for vehicle '{vehicle_id}'.")]
    NoRides { vehicle_id: String },
    #[error("Ride {ride_no} not found.")]
    RideNotFound { ride_no: u32 },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
