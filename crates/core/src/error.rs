/// Caller-contract violations detected by the calculation
///
/// A scenario that names a station or tank the aircraft doesn't declare was built
/// against the wrong aircraft. The calculation stops at the first such id rather
/// than computing with the entry dropped or zeroed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// A station load references an undeclared station id
    UnknownStation(String),
    /// A fuel load or burn references an undeclared tank id
    UnknownFuelTank(String),
}

impl CalculationError {
    /// The id that failed to resolve
    pub fn id(&self) -> &str {
        match self {
            CalculationError::UnknownStation(id) | CalculationError::UnknownFuelTank(id) => id,
        }
    }
}

impl std::fmt::Display for CalculationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationError::UnknownStation(id) => write!(f, "Unknown station id '{id}'"),
            CalculationError::UnknownFuelTank(id) => write!(f, "Unknown fuel tank id '{id}'"),
        }
    }
}

impl std::error::Error for CalculationError {}
