//! Slash-command endpoint
//!
//! Receives the form-encoded slash-command payload, hands the command to
//! the dispatcher and acknowledges immediately. The caller enforces a short
//! timeout on this response; the actual work continues in the background.

use crate::core::job::RawCommand;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::info;

/// Configure slash-command routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/slack/command", web::post().to(slash_command));
}

/// Fields of the slash-command form payload consumed by the gateway
///
/// Slack sends more fields than these; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SlashCommandForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub response_url: String,
}

/// Slash-command endpoint
///
/// Never rejects a command because of its option text; invalid options are
/// absorbed by parser defaults inside the job.
pub async fn slash_command(
    state: web::Data<AppState>,
    form: web::Form<SlashCommandForm>,
) -> ActixResult<HttpResponse> {
    let form = form.into_inner();
    info!(channel_id = %form.channel_id, "slash command received");

    let command = RawCommand {
        text: form.text,
        channel_id: form.channel_id,
        response_url: form.response_url,
    };

    let ack = state.dispatcher.accept(command);
    Ok(HttpResponse::Ok().json(ack))
}
