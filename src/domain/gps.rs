/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleStatus {
    #[default]
    Normal,
    Break,
}

impl SampleStatus {
    /// Maps a backend status string. Anything that is not `break` is normal
    /// travel, including the generator's `ride` value and missing fields.
    #[must_use]
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(status) if status.eq_ignore_ascii_case("break") => SampleStatus::Break,
            Some(_) | None => SampleStatus::Normal,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SampleStatus::Normal => "normal",
            SampleStatus::Break => "break",
        }
    }

    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, SampleStatus::Break)
    }
}

/// One point of a trace. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsSample {
    pub latitude: f64,
    pub longitude: f64,
    pub status: SampleStatus,
}

impl GpsSample {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, status: SampleStatus) -> Self {
        Self {
            latitude,
            longitude,
            status,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

/// Axis-aligned lat/lng box used to fit the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Position,
    pub north_east: Position,
}

impl Bounds {
    /// Smallest box containing every position, `None` for an empty input.
    #[must_use]
    pub fn enclosing<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for position in iter {
            bounds.south_west.latitude = bounds.south_west.latitude.min(position.latitude);
            bounds.south_west.longitude = bounds.south_west.longitude.min(position.longitude);
            bounds.north_east.latitude = bounds.north_east.latitude.max(position.latitude);
            bounds.north_east.longitude = bounds.north_east.longitude.max(position.longitude);
        }
        Some(bounds)
    }

    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "Midpoint of two coordinates.")]
    pub fn center(&self) -> Position {
        Position::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }
}
