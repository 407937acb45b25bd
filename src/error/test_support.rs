use super::{ConfigError, DataError, ValidationError};

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::TestExpectation { message }
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for DataError {
    fn from(message: &'static str) -> Self {
        DataError::TestExpectation { message }
    }
}

impl From<String> for DataError {
    fn from(value: String) -> Self {
        DataError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}
