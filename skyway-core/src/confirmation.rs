/// Source of booking confirmation codes.
///
/// Implementations only need to be practically unique; the store rejects and
/// regenerates any code it has already issued.
pub trait ConfirmationCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}
