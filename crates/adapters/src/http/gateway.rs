use std::collections::BTreeMap;
use std::time::Duration;

use domain::alert::entity::{AlertRecord, AlertStatus};
use domain::common::error::GatewayError;
use domain::filedrop::entity::StagedFile;
use domain::profile::entity::ProfileFields;
use domain::rule::entity::{RuleDraft, RuleRecord};
use domain::trend::entity::TrendSeries;
use ports::secondary::backend_gateway::{
    AnalysisOutcome, AvatarOutcome, BackendGateway, GatewayFuture, ProfileUpdateOutcome,
    ToggleOutcome,
};

use super::envelope::{
    AckEnvelope, AlertListEnvelope, AnalyzeEnvelope, AvatarEnvelope, ProfileEnvelope,
    RuleListEnvelope, ToggleEnvelope, ack_message, logical_failure,
};

/// `BackendGateway` over HTTP/JSON via reqwest.
///
/// Transport concerns (connect, timeout, status, body shape) collapse to
/// `GatewayError::Transport`; a decoded envelope with `success: false`
/// becomes `GatewayError::Logical` carrying the server's message.
pub struct HttpBackendGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_alerts(&self) -> Result<Vec<AlertRecord>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/alerts"))
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: AlertListEnvelope = decode(response).await?;
        if envelope.success {
            Ok(envelope.alerts)
        } else {
            Err(logical_failure(envelope.message))
        }
    }

    async fn post_alert_status(
        &self,
        id: u64,
        status: AlertStatus,
    ) -> Result<String, GatewayError> {
        let body = serde_json::json!({ "status": status.as_str() });
        let response = self
            .client
            .post(self.url(&format!("/api/alerts/update/{id}")))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        ack(response).await
    }

    async fn get_rules(&self) -> Result<Vec<RuleRecord>, GatewayError> {
        let response = self
            .client
            .get(self.url("/white-rules"))
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: RuleListEnvelope = decode(response).await?;
        if envelope.success {
            Ok(envelope.rules)
        } else {
            Err(logical_failure(envelope.message))
        }
    }

    async fn post_rule_form(&self, path: &str, draft: &RuleDraft) -> Result<String, GatewayError> {
        let form = [
            ("name", draft.name.as_str()),
            ("rule_type", draft.kind.as_str()),
            ("rule_value", draft.condition.as_str()),
            ("description", draft.description.as_str()),
        ];
        let response = self
            .client
            .post(self.url(path))
            .form(&form)
            .send()
            .await
            .map_err(transport_error)?;
        ack(response).await
    }

    async fn post_rule_toggle(&self, id: u64) -> Result<ToggleOutcome, GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("/white-rules/toggle/{id}")))
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: ToggleEnvelope = decode(response).await?;
        if envelope.success {
            Ok(ToggleOutcome {
                enabled: envelope.is_active.unwrap_or(false),
                message: ack_message(envelope.message),
            })
        } else {
            Err(logical_failure(envelope.message))
        }
    }

    async fn post_rule_delete(&self, id: u64) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("/white-rules/delete/{id}")))
            .send()
            .await
            .map_err(transport_error)?;
        ack(response).await
    }

    async fn post_files(&self, files: &[StagedFile]) -> Result<AnalysisOutcome, GatewayError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let mut part = reqwest::multipart::Part::bytes(file.data.clone())
                .file_name(file.name.clone());
            if let Some(ref mime) = file.mime {
                part = part.mime_str(mime).map_err(|_| {
                    GatewayError::Transport(format!("invalid MIME type: {mime}"))
                })?;
            }
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(self.url("/file-drop"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: AnalyzeEnvelope = decode(response).await?;
        if envelope.success {
            Ok(AnalysisOutcome {
                results: envelope.results,
                message: ack_message(envelope.message),
            })
        } else {
            // Analysis failures report through `error`, older deployments
            // through `message`.
            Err(logical_failure(envelope.error.or(envelope.message)))
        }
    }

    async fn post_profile(
        &self,
        fields: &ProfileFields,
    ) -> Result<ProfileUpdateOutcome, GatewayError> {
        let form: BTreeMap<&str, &str> = fields.iter().collect();
        let response = self
            .client
            .post(self.url("/profile/update"))
            .form(&form)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: ProfileEnvelope = decode(response).await?;
        if envelope.success {
            Ok(ProfileUpdateOutcome {
                message: ack_message(envelope.message),
                data: envelope.data,
            })
        } else {
            Err(logical_failure(envelope.message))
        }
    }

    async fn post_avatar(&self, file: &StagedFile) -> Result<AvatarOutcome, GatewayError> {
        let mut part = reqwest::multipart::Part::bytes(file.data.clone())
            .file_name(file.name.clone());
        if let Some(ref mime) = file.mime {
            part = part.mime_str(mime).map_err(|_| {
                GatewayError::Transport(format!("invalid MIME type: {mime}"))
            })?;
        }
        let form = reqwest::multipart::Form::new().part("avatar", part);

        let response = self
            .client
            .post(self.url("/profile/avatar"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: AvatarEnvelope = decode(response).await?;
        if envelope.success {
            let avatar_url = envelope.avatar_url.ok_or_else(|| {
                GatewayError::Transport("avatar response missing avatar_url".to_string())
            })?;
            Ok(AvatarOutcome {
                message: ack_message(envelope.message),
                avatar_url,
            })
        } else {
            Err(logical_failure(envelope.message))
        }
    }

    async fn post_password(
        &self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<String, GatewayError> {
        let form = [
            ("current_password", current),
            ("new_password", new),
            ("confirm_password", confirm),
        ];
        let response = self
            .client
            .post(self.url("/profile/change-password"))
            .form(&form)
            .send()
            .await
            .map_err(transport_error)?;
        ack(response).await
    }

    async fn get_trend(&self) -> Result<TrendSeries, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/traffic-trend"))
            .send()
            .await
            .map_err(transport_error)?;
        // The trend endpoint predates the success-flag convention and
        // returns the series bare.
        decode(response).await
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_connect() {
        GatewayError::Transport("cannot connect to the backend".to_string())
    } else if err.is_timeout() {
        GatewayError::Transport("request to the backend timed out".to_string())
    } else {
        GatewayError::Transport(format!("request failed: {err}"))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Transport(format!(
            "request failed with status {status}"
        )));
    }
    response
        .json::<T>()
        .await
        .map_err(|_| GatewayError::Transport("server returned a non-JSON response".to_string()))
}

async fn ack(response: reqwest::Response) -> Result<String, GatewayError> {
    let envelope: AckEnvelope = decode(response).await?;
    if envelope.success {
        Ok(ack_message(envelope.message))
    } else {
        Err(logical_failure(envelope.message))
    }
}

impl BackendGateway for HttpBackendGateway {
    fn fetch_alerts(&self) -> GatewayFuture<'_, Vec<AlertRecord>> {
        Box::pin(self.get_alerts())
    }

    fn update_alert_status(&self, id: u64, status: AlertStatus) -> GatewayFuture<'_, String> {
        Box::pin(self.post_alert_status(id, status))
    }

    fn fetch_rules(&self) -> GatewayFuture<'_, Vec<RuleRecord>> {
        Box::pin(self.get_rules())
    }

    fn add_rule<'a>(&'a self, draft: &'a RuleDraft) -> GatewayFuture<'a, String> {
        Box::pin(self.post_rule_form("/white-rules/add", draft))
    }

    fn edit_rule<'a>(&'a self, id: u64, draft: &'a RuleDraft) -> GatewayFuture<'a, String> {
        Box::pin(async move {
            self.post_rule_form(&format!("/white-rules/edit/{id}"), draft)
                .await
        })
    }

    fn toggle_rule(&self, id: u64) -> GatewayFuture<'_, ToggleOutcome> {
        Box::pin(self.post_rule_toggle(id))
    }

    fn delete_rule(&self, id: u64) -> GatewayFuture<'_, String> {
        Box::pin(self.post_rule_delete(id))
    }

    fn analyze_files<'a>(&'a self, files: &'a [StagedFile]) -> GatewayFuture<'a, AnalysisOutcome> {
        Box::pin(self.post_files(files))
    }

    fn update_profile<'a>(
        &'a self,
        fields: &'a ProfileFields,
    ) -> GatewayFuture<'a, ProfileUpdateOutcome> {
        Box::pin(self.post_profile(fields))
    }

    fn upload_avatar<'a>(&'a self, file: &'a StagedFile) -> GatewayFuture<'a, AvatarOutcome> {
        Box::pin(self.post_avatar(file))
    }

    fn change_password<'a>(
        &'a self,
        current: &'a str,
        new: &'a str,
        confirm: &'a str,
    ) -> GatewayFuture<'a, String> {
        Box::pin(self.post_password(current, new, confirm))
    }

    fn fetch_traffic_trend(&self) -> GatewayFuture<'_, TrendSeries> {
        Box::pin(self.get_trend())
    }
}
