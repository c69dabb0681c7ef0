use std::sync::Arc;

use domain::common::entity::Notice;
use domain::filedrop::entity::StagedFile;
use domain::profile::entity::{self, AvatarError, ProfileFields};
use domain::profile::password::{self, PasswordError};
use ports::secondary::backend_gateway::BackendGateway;
use ports::secondary::notification_sink::NotificationSink;

/// The profile editing view: form fields with an edit-mode snapshot,
/// avatar upload, and password change. All client-side validation runs
/// before a request is built; a violation never reaches the gateway.
pub struct ProfileAppService {
    gateway: Arc<dyn BackendGateway>,
    sink: Arc<dyn NotificationSink>,
    fields: ProfileFields,
    snapshot: Option<ProfileFields>,
    editing: bool,
    avatar_url: Option<String>,
}

impl ProfileAppService {
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        sink: Arc<dyn NotificationSink>,
        initial: ProfileFields,
    ) -> Self {
        Self {
            gateway,
            sink,
            fields: initial,
            snapshot: None,
            editing: false,
            avatar_url: None,
        }
    }

    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    pub fn editing(&self) -> bool {
        self.editing
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Enter edit mode, snapshotting the current values for cancel.
    pub fn begin_edit(&mut self) {
        if !self.editing {
            self.snapshot = Some(self.fields.clone());
            self.editing = true;
        }
    }

    /// Leave edit mode, restoring the snapshot.
    pub fn cancel_edit(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.fields = snapshot;
        }
        self.editing = false;
    }

    /// Set a field while editing. Returns false (and changes nothing)
    /// outside edit mode, mirroring the disabled inputs.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        if !self.editing {
            return false;
        }
        self.fields.set(name, value);
        true
    }

    /// Save the form. On success the server's echoed values are merged
    /// (null entries skipped), edit mode ends and the snapshot is
    /// dropped; on failure everything stays as it was.
    pub async fn save(&mut self) {
        match self.gateway.update_profile(&self.fields).await {
            Ok(outcome) => {
                if let Some(ref data) = outcome.data {
                    self.fields.merge(data);
                }
                self.snapshot = None;
                self.editing = false;
                self.sink.notify(&outcome.message, Notice::Success);
            }
            Err(err) => {
                tracing::warn!("profile save failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
    }

    /// Upload a new avatar. Size and type are gated client-side first;
    /// a violation is reported and no request is made.
    pub async fn upload_avatar(&mut self, file: StagedFile) -> Result<(), AvatarError> {
        if let Err(err) = entity::validate_avatar(file.mime.as_deref(), file.size_bytes()) {
            self.sink.notify(&err.to_string(), Notice::Error);
            return Err(err);
        }

        match self.gateway.upload_avatar(&file).await {
            Ok(outcome) => {
                self.avatar_url = Some(outcome.avatar_url);
                self.sink.notify(&outcome.message, Notice::Success);
            }
            Err(err) => {
                tracing::warn!("avatar upload failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
        Ok(())
    }

    /// Change the password. The four form rules are checked locally
    /// first; a violation is reported and no request is made.
    pub async fn change_password(
        &mut self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), PasswordError> {
        if let Err(err) = password::validate_change(current, new, confirm) {
            self.sink.notify(&err.to_string(), Notice::Error);
            return Err(err);
        }

        match self.gateway.change_password(current, new, confirm).await {
            Ok(message) => self.sink.notify(&message, Notice::Success),
            Err(err) => {
                tracing::warn!("password change failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
        Ok(())
    }
}
