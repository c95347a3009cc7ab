use async_trait::async_trait;

use crate::wizard::WizardSnapshot;

#[async_trait]
pub trait WizardEventPort: Send + Sync {
    /// Called after every committed transition.
    async fn emit_state_changed(&self, snapshot: WizardSnapshot);
}
