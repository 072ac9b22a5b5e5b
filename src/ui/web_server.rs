use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::config::constants::{DISCLAIMER, MAX_UPLOAD_BYTES, SESSION_COOKIE_NAME, SUMMARY_FAILED_MESSAGE};
use crate::enums::report_format::ReportFormat;
use crate::errors::{LungLensError, LungLensResult};
use crate::helpers::html::escape_html;
use crate::services::image_loader::ImageLoader;
use crate::services::report_exporter::ReportExporter;
use crate::structs::analysis_report::AnalysisReport;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::api_response::ApiResponse;
use crate::structs::user::User;
use crate::ui::app_context::AppContext;
use crate::ui::session_manager::sanitize_session_id;

type Response = Box<dyn Reply>;

const LOGIN_BODY_LIMIT: u64 = 16 * 1024;
const DEFAULT_REDIRECT: &str = "/analysis";

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeBody {
    #[serde(default)]
    photo_data_uri: String,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
}

pub struct WebServer {
    context: Arc<AppContext>,
}

impl WebServer {
    pub fn new(context: AppContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// Serve until Ctrl-C.
    pub async fn start(&self, host: &str, port: u16, open_browser: bool) -> LungLensResult<()> {
        let addr: SocketAddr = format!("{}:{}", host, port).parse().map_err(|_| {
            LungLensError::config_error(
                &format!("Invalid server address '{}:{}'", host, port),
                Some("server.host"),
                Some("Use an IP address such as 127.0.0.1"),
            )
        })?;

        let (bound, server) = warp::serve(routes(Arc::clone(&self.context)))
            .try_bind_with_graceful_shutdown(addr, async {
                tokio::signal::ctrl_c().await.ok();
                log::info!("🛑 Shutting down web server...");
            })
            .map_err(|e| LungLensError::system_error("bind web server", &e.to_string()))?;

        let url = format!("http://{}", bound);
        log::info!("🌐 LungLens running at {} (provider: {})", url, self.context.analyzer.provider_name());

        if open_browser {
            if let Err(e) = webbrowser::open(&url) {
                log::warn!("⚠️ Could not open a browser: {}", e);
            }
        }

        server.await;
        log::info!("✅ Web server shutdown complete");
        Ok(())
    }
}

pub fn routes(context: Arc<AppContext>) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    let with_context = warp::any().map(move || Arc::clone(&context));
    let session_cookie = warp::cookie::optional::<String>(SESSION_COOKIE_NAME);

    let index = warp::path::end()
        .and(warp::get())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(index_page);

    let login = warp::path!("login")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(login_page);

    let analysis = warp::path!("analysis")
        .and(warp::get())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(analysis_page);

    let history = warp::path!("history")
        .and(warp::get())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(history_page);

    let about = warp::path!("about")
        .and(warp::get())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(about_page);

    let api_login = warp::path!("api" / "login")
        .and(warp::post())
        .and(warp::body::content_length_limit(LOGIN_BODY_LIMIT))
        .and(warp::body::json())
        .and(with_context.clone())
        .and_then(login_handler);

    let api_logout = warp::path!("api" / "logout")
        .and(warp::post())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(logout_handler);

    let api_analyze = warp::path!("api" / "analyze")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_UPLOAD_BYTES))
        .and(warp::body::json())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(analyze_handler);

    let api_summarize = warp::path!("api" / "summarize")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_UPLOAD_BYTES))
        .and(warp::body::json())
        .and(with_context.clone())
        .and_then(summarize_handler);

    let api_history = warp::path!("api" / "history")
        .and(warp::get())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(history_handler);

    let api_session = warp::path!("api" / "session")
        .and(warp::get())
        .and(session_cookie.clone())
        .and(with_context.clone())
        .and_then(session_handler);

    let api_report = warp::path!("api" / "report")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(session_cookie)
        .and(with_context)
        .and_then(report_handler);

    index
        .or(login)
        .or(analysis)
        .or(history)
        .or(about)
        .or(api_login)
        .or(api_logout)
        .or(api_analyze)
        .or(api_summarize)
        .or(api_history)
        .or(api_session)
        .or(api_report)
}

fn signed_in(context: &AppContext, cookie: Option<String>) -> Option<(String, User)> {
    let session_id = sanitize_session_id(&cookie?);
    let user = context.sessions.current_user(&session_id)?;
    Some((session_id, user))
}

// Only same-site paths are followed after login.
fn safe_redirect(target: Option<&String>) -> String {
    match target {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && path.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_')) =>
        {
            path.clone()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

fn redirect(location: &str) -> Response {
    Box::new(warp::reply::with_status(
        warp::reply::with_header(warp::reply(), "location", location.to_string()),
        StatusCode::SEE_OTHER,
    ))
}

fn json_status<T: Serialize>(status: StatusCode, body: &T) -> Response {
    Box::new(warp::reply::with_status(warp::reply::json(body), status))
}

fn api_error(status: StatusCode, error: &LungLensError) -> Response {
    let message = match error {
        LungLensError::UserInputError { suggestion, .. } => suggestion.clone(),
        other => other.user_message(),
    };
    json_status(status, &ApiResponse::<()>::error(&message))
}

fn page(title: &str, user: Option<&User>, content: &str) -> Response {
    let nav = match user {
        Some(user) => format!(
            "<a href=\"/analysis\">Analysis</a><a href=\"/history\">History</a><a href=\"/about\">About</a><span class=\"email\">{}</span><button onclick=\"logout()\">Log out</button>",
            escape_html(&user.email)
        ),
        None => "<a href=\"/about\">About</a><a href=\"/login\">Log in</a>".to_string(),
    };

    let html = include_str!("static/layout.html")
        .replace("{{TITLE}}", title)
        .replace("{{NAV}}", &nav)
        .replace("{{CONTENT}}", content);

    Box::new(warp::reply::html(html))
}

async fn index_page(cookie: Option<String>, context: Arc<AppContext>) -> Result<Response, Infallible> {
    match signed_in(&context, cookie) {
        Some(_) => Ok(redirect(DEFAULT_REDIRECT)),
        None => Ok(redirect("/login")),
    }
}

async fn login_page(
    params: HashMap<String, String>,
    cookie: Option<String>,
    context: Arc<AppContext>,
) -> Result<Response, Infallible> {
    let target = safe_redirect(params.get("redirect"));
    if signed_in(&context, cookie).is_some() {
        return Ok(redirect(&target));
    }

    let content = include_str!("static/login.html").replace("{{REDIRECT}}", &target);
    Ok(page("Sign in", None, &content))
}

async fn analysis_page(cookie: Option<String>, context: Arc<AppContext>) -> Result<Response, Infallible> {
    let Some((_, user)) = signed_in(&context, cookie) else {
        return Ok(redirect("/login?redirect=/analysis"));
    };

    let content = include_str!("static/analysis.html").replace("{{DISCLAIMER}}", &escape_html(DISCLAIMER));
    Ok(page("Analysis", Some(&user), &content))
}

async fn history_page(cookie: Option<String>, context: Arc<AppContext>) -> Result<Response, Infallible> {
    let Some((_, user)) = signed_in(&context, cookie) else {
        return Ok(redirect("/login?redirect=/history"));
    };

    let rows = context.history.list_for(Some(&user));
    let table = if rows.is_empty() {
        "<p class=\"muted\">No analyses yet.</p>".to_string()
    } else {
        let body: String = rows
            .iter()
            .map(|row| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td><span class=\"badge badge-{}\">{}</span></td><td>{}</td></tr>",
                    row.date.format("%Y-%m-%d"),
                    escape_html(&row.image_name),
                    row.prediction.badge_variant(),
                    row.prediction,
                    row.confidence_percent()
                )
            })
            .collect();
        format!(
            "<table><thead><tr><th>Date</th><th>Image</th><th>Prediction</th><th>Confidence</th></tr></thead><tbody>{}</tbody></table>",
            body
        )
    };

    let content = include_str!("static/history.html")
        .replace("{{EMAIL}}", &escape_html(&user.email))
        .replace("{{HISTORY}}", &table);
    Ok(page("History", Some(&user), &content))
}

async fn about_page(cookie: Option<String>, context: Arc<AppContext>) -> Result<Response, Infallible> {
    let user = signed_in(&context, cookie).map(|(_, user)| user);
    let content = include_str!("static/about.html").replace("{{DISCLAIMER}}", &escape_html(DISCLAIMER));
    Ok(page("About", user.as_ref(), &content))
}

async fn login_handler(body: LoginBody, context: Arc<AppContext>) -> Result<Response, Infallible> {
    match context.sessions.login(&body.email, body.password.as_deref()) {
        Ok(session_id) => {
            let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE_NAME, session_id);
            let reply = warp::reply::json(&ApiResponse::ok(
                json!({ "email": body.email.trim(), "redirect": safe_redirect(body.redirect.as_ref()) }),
                "Signed in",
            ));
            Ok(Box::new(warp::reply::with_header(reply, "set-cookie", cookie)))
        }
        Err(e) => Ok(api_error(StatusCode::BAD_REQUEST, &e)),
    }
}

async fn logout_handler(cookie: Option<String>, context: Arc<AppContext>) -> Result<Response, Infallible> {
    if let Some(session_id) = cookie {
        context.sessions.logout(&sanitize_session_id(&session_id));
    }

    let expired = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE_NAME);
    let reply = warp::reply::json(&ApiResponse::ok(json!({ "redirect": "/login" }), "Signed out"));
    Ok(Box::new(warp::reply::with_header(reply, "set-cookie", expired)))
}

async fn analyze_handler(
    body: AnalyzeBody,
    cookie: Option<String>,
    context: Arc<AppContext>,
) -> Result<Response, Infallible> {
    let Some((session_id, _)) = signed_in(&context, cookie) else {
        return Ok(json_status(StatusCode::UNAUTHORIZED, &ApiResponse::<()>::error("Please log in to analyze images.")));
    };

    let request = AnalysisRequest::new(body.photo_data_uri);
    let data_uri = match request.data_uri() {
        Ok(data_uri) => data_uri,
        Err(e) => return Ok(api_error(StatusCode::BAD_REQUEST, &e)),
    };

    let _pending = match context.sessions.begin_analysis(&session_id) {
        Ok(guard) => guard,
        Err(e) => return Ok(api_error(StatusCode::CONFLICT, &e)),
    };

    let file_name = body.file_name.unwrap_or_else(|| "upload".to_string());
    let file_info = ImageLoader::inspect(&file_name, &data_uri, body.last_modified.as_deref()).ok();

    let (result, state) = context.analyzer.analyze_for_display(&request).await;

    if let Err(e) = context
        .sessions
        .finish_analysis(&session_id, state, result.clone(), file_info.clone())
    {
        log::warn!("⚠️ Could not record analysis: {}", e);
    }

    let data = json!({
        "state": state,
        "badge": result.prediction.badge_variant(),
        "result": result,
        "fileInfo": file_info,
    });
    Ok(json_status(StatusCode::OK, &ApiResponse::ok(data, "Analysis complete")))
}

async fn summarize_handler(body: AnalysisRequest, context: Arc<AppContext>) -> Result<Response, Infallible> {
    match context.summarizer.summarize(&body).await {
        Ok(summary) => Ok(json_status(StatusCode::OK, &ApiResponse::ok(summary, "Summary complete"))),
        Err(e @ LungLensError::ValidationError { .. }) => Ok(api_error(StatusCode::BAD_REQUEST, &e)),
        Err(e @ LungLensError::ProviderError { .. }) => {
            log::error!("❌ Error summarizing image: {}", e.technical_details());
            Ok(json_status(StatusCode::BAD_GATEWAY, &ApiResponse::<()>::error(SUMMARY_FAILED_MESSAGE)))
        }
        Err(e) => {
            log::error!("❌ Error summarizing image: {}", e.technical_details());
            Ok(api_error(StatusCode::BAD_GATEWAY, &e))
        }
    }
}

async fn history_handler(cookie: Option<String>, context: Arc<AppContext>) -> Result<Response, Infallible> {
    let user = signed_in(&context, cookie).map(|(_, user)| user);

    let rows: Vec<_> = context
        .history
        .list_for(user.as_ref())
        .into_iter()
        .map(|row| {
            json!({
                "id": row.id,
                "date": row.date,
                "imageName": row.image_name,
                "prediction": row.prediction,
                "badge": row.prediction.badge_variant(),
                "confidence": row.confidence,
                "confidencePercent": row.confidence_percent(),
            })
        })
        .collect();

    Ok(json_status(StatusCode::OK, &ApiResponse::ok(rows, "History loaded")))
}

async fn session_handler(cookie: Option<String>, context: Arc<AppContext>) -> Result<Response, Infallible> {
    let session = cookie.and_then(|id| context.sessions.get_session(&sanitize_session_id(&id)));

    let data = match session {
        Some(session) => json!({
            "loggedIn": true,
            "email": session.user.email,
            "state": session.state,
            "lastResult": session.last_result,
        }),
        None => json!({ "loggedIn": false }),
    };
    Ok(json_status(StatusCode::OK, &ApiResponse::ok(data, "Session")))
}

async fn report_handler(
    params: HashMap<String, String>,
    cookie: Option<String>,
    context: Arc<AppContext>,
) -> Result<Response, Infallible> {
    let Some((session_id, _)) = signed_in(&context, cookie) else {
        return Ok(json_status(StatusCode::UNAUTHORIZED, &ApiResponse::<()>::error("Please log in to export reports.")));
    };

    let requested = params
        .get("format")
        .cloned()
        .unwrap_or_else(|| context.output.report_format.clone());
    let format: ReportFormat = match requested.parse() {
        Ok(format) => format,
        Err(message) => return Ok(json_status(StatusCode::BAD_REQUEST, &ApiResponse::<()>::error(&message))),
    };

    let Some(session) = context.sessions.get_session(&session_id) else {
        return Ok(json_status(StatusCode::UNAUTHORIZED, &ApiResponse::<()>::error("Session expired.")));
    };
    let Some(result) = session.last_result else {
        return Ok(json_status(StatusCode::NOT_FOUND, &ApiResponse::<()>::error("No analysis result to export yet.")));
    };

    let report = AnalysisReport::new(session.last_file_info, result);

    if context.output.save_reports {
        if let Err(e) = ReportExporter::export(std::path::Path::new(&context.output.output_dir), format, &report) {
            log::warn!("⚠️ Could not save report: {}", e);
        }
    }

    match ReportExporter::render(format, &report) {
        Ok(content) => {
            let disposition = format!("attachment; filename=\"lunglens-report.{}\"", format.extension());
            let reply = warp::reply::with_header(content, "content-type", format.content_type());
            Ok(Box::new(warp::reply::with_header(reply, "content-disposition", disposition)))
        }
        Err(e) => Ok(api_error(StatusCode::INTERNAL_SERVER_ERROR, &e)),
    }
}
