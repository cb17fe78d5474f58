/**
 * OAuth Code Exchange
 *
 * `POST /api/oauth {code, state, redirectUrl}` trades a GitHub authorization
 * code for a signed session token. The exchange runs in three stages, each
 * triggered by the success of the one before:
 *
 * 1. `GET_ACCESS_TOKEN` - HTTP call to the provider's token endpoint
 * 2. `GET_USER` - HTTP call for the user's profile, authorized with the token
 * 3. `GET_JWT` - effect signing `{userInfo, accessToken}`
 *
 * # Failure Handling
 *
 * An invalid body is rejected with 400 before anything is declared. After
 * that, any failure ends the request with an opaque 500 and one error log
 * entry; provider detail only ever reaches the log. A token response counts
 * as successful only with a 2xx status and a string `access_token`, since
 * GitHub answers bad codes with `200 {"error": ...}`.
 */
use futures_util::future;
use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::Url;
use serde_json::{json, Value};

use crate::backend::auth::{sign_session, SessionClaims};
use crate::backend::dispatch::{ApiRequest, Handler, ResponseEnvelope, Sinks, Sources};
use crate::backend::effects::{EffectDescriptor, EffectError};
use crate::backend::error::RequestError;
use crate::backend::handlers::validation::require_strings;
use crate::backend::http::{HttpCallDescriptor, HttpCallError, HttpResponse, HttpSource};
use crate::backend::streams::combine_latest;
use crate::shared::config::AppConfig;

pub mod tags {
    pub const GET_ACCESS_TOKEN: &str = "GET_ACCESS_TOKEN";
    pub const GET_USER: &str = "GET_USER";
    pub const GET_JWT: &str = "GET_JWT";
}

/// Validated request body
#[derive(Debug, Clone, PartialEq)]
struct ExchangeParams {
    code: String,
    state: String,
    redirect_url: String,
}

impl ExchangeParams {
    fn from_body(body: &Value) -> Result<Self, RequestError> {
        let mut values = require_strings(body, &["code", "state", "redirectUrl"])?.into_iter();
        match (values.next(), values.next(), values.next()) {
            (Some(code), Some(state), Some(redirect_url)) => Ok(Self {
                code,
                state,
                redirect_url,
            }),
            _ => Err(RequestError::Validation(Vec::new())),
        }
    }
}

/// `POST /api/oauth`
#[derive(Debug, Default)]
pub struct OAuthExchange;

impl OAuthExchange {
    pub fn new() -> Self {
        Self
    }
}

impl Handler for OAuthExchange {
    fn name(&self) -> &'static str {
        "oauth.exchange"
    }

    fn handle(&self, request: &ApiRequest, config: &AppConfig, sources: Sources) -> Sinks {
        let params = match ExchangeParams::from_body(&request.body) {
            Ok(params) => params,
            Err(error) => return Sinks::respond(error.to_envelope()),
        };

        let token_call = match token_request(config, &params) {
            Ok(call) => call,
            Err(error) => {
                return Sinks::respond(error.to_opaque_envelope())
                    .with_log(stream::iter([error.log_entry()]));
            }
        };

        let user_url = format!("{}/user", config.api_base_url);
        let user_calls = access_tokens(&sources.http).map(move |token| {
            HttpCallDescriptor::get(tags::GET_USER, user_url.clone())
                .header("Accept", "application/json")
                .header("Authorization", format!("token {}", token))
        });
        let http = stream::select(stream::iter([token_call]), user_calls);

        let secret = config.secret.clone();
        let jwt_effects = combine_latest(user_profiles(&sources.http), access_tokens(&sources.http)).map(
            move |(user_info, access_token)| {
                let secret = secret.clone();
                EffectDescriptor::new(tags::GET_JWT, move || async move {
                    let claims = SessionClaims {
                        user_info,
                        access_token,
                    };
                    sign_session(&claims, &secret)
                        .map(Value::String)
                        .map_err(|e| EffectError::Signing(e.to_string()))
                })
            },
        );

        let issued = sources
            .effect
            .select_value(tags::GET_JWT)
            .map(|token| ResponseEnvelope::ok(json!({ "token": token })));
        let failed = failures(&sources).map(|error| error.to_opaque_envelope());
        let response = stream::select(issued, failed);

        let log = failures(&sources).map(|error| error.log_entry());

        Sinks::new(response)
            .with_log(log)
            .with_http(http)
            .with_effect(jwt_effects)
    }
}

fn token_request(config: &AppConfig, params: &ExchangeParams) -> Result<HttpCallDescriptor, RequestError> {
    let url = Url::parse_with_params(
        &format!("{}/login/oauth/access_token", config.oauth_base_url),
        &[
            ("client_id", config.gh_client_id.as_str()),
            ("client_secret", config.gh_client_secret.as_str()),
            ("code", params.code.as_str()),
            ("state", params.state.as_str()),
            ("redirect_uri", params.redirect_url.as_str()),
        ],
    )
    .map_err(|e| {
        RequestError::Transport(HttpCallError::new(
            tags::GET_ACCESS_TOKEN,
            format!("invalid token endpoint: {}", e),
        ))
    })?;

    Ok(HttpCallDescriptor::post(tags::GET_ACCESS_TOKEN, url.as_str()).header("Accept", "application/json"))
}

/// The access token carried by a usable token response
fn access_token(response: &HttpResponse) -> Option<String> {
    if !response.is_success() {
        return None;
    }
    response
        .body
        .get("access_token")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn access_tokens(http: &HttpSource) -> BoxStream<'static, String> {
    http.select_response(Some(tags::GET_ACCESS_TOKEN))
        .filter_map(|outcome| future::ready(outcome.response().and_then(access_token)))
        .boxed()
}

fn user_profiles(http: &HttpSource) -> BoxStream<'static, Value> {
    http.select_response(Some(tags::GET_USER))
        .filter_map(|outcome| {
            future::ready(
                outcome
                    .response()
                    .filter(|response| response.is_success())
                    .map(|response| response.body.clone()),
            )
        })
        .boxed()
}

/// Every failure anywhere in the exchange
///
/// Call once per consumer; each call subscribes afresh.
fn failures(sources: &Sources) -> BoxStream<'static, RequestError> {
    let transport = sources
        .http
        .select_response(None)
        .filter_map(|outcome| {
            future::ready(outcome.result.err().map(|error| {
                match error.category.as_str() {
                    tags::GET_ACCESS_TOKEN | tags::GET_USER => RequestError::upstream_transport(error),
                    _ => RequestError::Transport(error),
                }
            }))
        });

    let rejected_token = sources
        .http
        .select_response(Some(tags::GET_ACCESS_TOKEN))
        .filter_map(|outcome| {
            future::ready(match outcome.result {
                Ok(response) if access_token(&response).is_none() => {
                    Some(RequestError::upstream(tags::GET_ACCESS_TOKEN, response))
                }
                _ => None,
            })
        });

    let rejected_user = sources
        .http
        .select_response(Some(tags::GET_USER))
        .filter_map(|outcome| {
            future::ready(match outcome.result {
                Ok(response) if !response.is_success() => {
                    Some(RequestError::upstream(tags::GET_USER, response))
                }
                _ => None,
            })
        });

    let signing = sources
        .effect
        .select_error(tags::GET_JWT)
        .map(RequestError::from);

    stream::select_all([
        transport.boxed(),
        rejected_token.boxed(),
        rejected_user.boxed(),
        signing.boxed(),
    ])
    .boxed()
}
