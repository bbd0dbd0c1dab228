//! Errors returned by the marshaling layer.

/// The allocator could not satisfy a request.
///
/// By the time a caller sees this, everything the failed conversion had
/// allocated has already been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("memory allocation failed")]
pub struct AllocationFailure;

/// Errors from converting argument descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    #[error(transparent)]
    Allocation(#[from] AllocationFailure),

    /// The flat descriptor stores a single count for both option arrays, so
    /// they must have the same length.
    #[error("argument `{key}` has {options} options but {option_names} option names")]
    OptionCountMismatch {
        key: String,
        options: usize,
        option_names: usize,
    },
}
