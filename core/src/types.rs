use crate::envelope::EnvelopeError;
use crate::guard::GuardError;
use crate::wire::WireError;

/// Unified signing error covering wire decode, envelope, guard and input validation.
/// - Ergonomic `From<T>` impls enable `?` across layers.
/// - Messages stay stable so the bindings can surface them verbatim.
#[derive(Debug)]
pub enum SignError {
    /// Truncated or invalid wire data.
    MalformedWire(WireError),

    /// Envelope encode/decode failure.
    Envelope(EnvelopeError),

    /// Device / ticket guard failure.
    Guard(GuardError),

    /// Caller supplied non-hex text where hex was required.
    InvalidHexInput(String),

    /// Timestamp outside the representable range for a signer.
    InvalidTimestamp(i64),

    /// Block cipher setup or padding failure.
    Cipher(String),
}

impl std::fmt::Display for SignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignError::MalformedWire(e) => write!(f, "{}", e),
            SignError::Envelope(e) => write!(f, "envelope error: {}", e),
            SignError::Guard(e) => write!(f, "guard error: {}", e),
            SignError::InvalidHexInput(msg) => write!(f, "invalid hex input: {}", msg),
            SignError::InvalidTimestamp(ts) => write!(f, "invalid timestamp: {}", ts),
            SignError::Cipher(msg) => write!(f, "cipher error: {}", msg),
        }
    }
}

impl std::error::Error for SignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignError::MalformedWire(e) => Some(e),
            SignError::Envelope(e) => Some(e),
            SignError::Guard(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for SignError {
    fn from(e: WireError) -> Self {
        SignError::MalformedWire(e)
    }
}

impl From<EnvelopeError> for SignError {
    fn from(e: EnvelopeError) -> Self {
        SignError::Envelope(e)
    }
}

impl From<GuardError> for SignError {
    fn from(e: GuardError) -> Self {
        SignError::Guard(e)
    }
}
