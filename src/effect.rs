//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// POST this SOAP envelope to the weather service
    PostEnvelope { envelope: String },
}
