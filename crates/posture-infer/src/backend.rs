use crate::{InferError, ModelSource, Session};

/// Loads models into sessions for one inference runtime.
pub trait Backend {
    fn name(&self) -> &str;
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
