use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Please select a vehicle to track.")]
    MissingVehicleId,
    #[error("Please select both vehicle and ride before showing history.")]
    MissingVehicleOrRide,
    #[error("Invalid ride number '{value}': {source}")]
    InvalidRideNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid route filter '{value}'. Use ride or break-points.")]
    InvalidRouteFilter { value: String },
    #[error("Invalid vehicle category '{value}'. Use moving, free, or idle.")]
    InvalidCategory { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Base URL '{url}' cannot carry paths.")]
    BaseUrlCannotBeABase { url: String },
    #[error("Failed to build runtime: {source}")]
    RuntimeBuildFailed {
        #[source]
        source: std::io::Error,
    },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
