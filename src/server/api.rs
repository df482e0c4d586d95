use crate::error::AppError;
use crate::models::ResultTable;
use crate::server::AppState;
use crate::utils::parse_ticker_list;
use crate::worker;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Response for a successful analysis submission
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub run_id: Uuid,
    pub total: usize,
}

/// Query parameters selecting a run; absent means the latest submission
#[derive(Debug, Deserialize)]
pub struct RunQuery {
    pub run_id: Option<Uuid>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// GET / - upload form
pub async fn index_handler() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

/// POST /analyze - accept a ticker-list file and launch a background run.
///
/// The response returns immediately with the run id; progress and results
/// are polled separately.
#[instrument(skip(app_state, multipart))]
pub async fn analyze_handler(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut content: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        match field.text().await {
            Ok(text) => {
                content = Some(text);
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read uploaded file");
                return error_response(StatusCode::BAD_REQUEST, "Failed to read uploaded file");
            }
        }
    }

    let Some(content) = content else {
        let err = AppError::InvalidInput("no file found in request".to_string());
        return error_response(StatusCode::BAD_REQUEST, &err.to_string());
    };

    let tickers = parse_ticker_list(&content);
    let total = tickers.len();
    let (run_id, run_state) = app_state.runs.create_run(total).await;
    info!(%run_id, total, "Analysis run submitted");

    let source = app_state.source.clone();
    tokio::spawn(worker::run(tickers, source, run_state));

    Json(AnalyzeResponse {
        status: "processing",
        run_id,
        total,
    })
    .into_response()
}

/// GET /progress - snapshot of a run's {total, current, done}.
///
/// Unknown or absent runs report zeros rather than an error so pollers
/// can start before the first submission.
pub async fn progress_handler(
    State(app_state): State<AppState>,
    Query(query): Query<RunQuery>,
) -> Response {
    match app_state.runs.resolve(query.run_id).await {
        Some(state) => {
            let progress = state.read().await.progress.clone();
            Json(progress).into_response()
        }
        None => Json(crate::services::Progress::default()).into_response(),
    }
}

/// GET /result - the ranked table as HTML, or an explicit unavailable page
pub async fn result_handler(
    State(app_state): State<AppState>,
    Query(query): Query<RunQuery>,
) -> Html<String> {
    let table = match app_state.runs.resolve(query.run_id).await {
        Some(state) => state.read().await.result.clone(),
        None => None,
    };

    match table {
        Some(table) => Html(render_result_page(&table)),
        None => Html(render_message_page("No result available yet.")),
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_result_page(table: &ResultTable) -> String {
    let mut html = String::from(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <title>MACD Screener - Result</title>\
         <style>table{border-collapse:collapse}td,th{border:1px solid #999;padding:4px 8px}</style>\
         </head><body><h1>Analysis Result</h1><table><thead><tr><th>Ticker</th>",
    );
    for label in &table.date_columns {
        html.push_str(&format!("<th>{}</th>", escape_html(label)));
    }
    html.push_str("<th>Company Name</th></tr></thead><tbody>");

    for row in &table.rows {
        html.push_str(&format!("<tr><td>{}</td>", escape_html(&row.ticker)));
        for value in &row.values {
            html.push_str(&format!("<td>{:.2}</td>", value));
        }
        html.push_str(&format!("<td>{}</td></tr>", escape_html(&row.company)));
    }

    html.push_str("</tbody></table></body></html>");
    html
}

fn render_message_page(message: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <title>MACD Screener - Result</title></head>\
         <body><p>{}</p></body></html>",
        escape_html(message)
    )
}

const UPLOAD_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>MACD Screener</title>
</head>
<body>
  <h1>MACD Screener</h1>
  <p>Upload a text file with one ticker symbol per line.</p>
  <form id="upload-form">
    <input type="file" name="file" id="file" required>
    <button type="submit">Analyze</button>
  </form>
  <p id="status"></p>
  <script>
    const form = document.getElementById('upload-form');
    const status = document.getElementById('status');
    let timer = null;

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const data = new FormData();
      data.append('file', document.getElementById('file').files[0]);
      const response = await fetch('/analyze', { method: 'POST', body: data });
      const body = await response.json();
      if (!response.ok) {
        status.textContent = body.error || 'Upload failed';
        return;
      }
      status.textContent = 'Processing 0 / ' + body.total;
      if (timer) clearInterval(timer);
      timer = setInterval(async () => {
        const p = await (await fetch('/progress?run_id=' + body.run_id)).json();
        status.textContent = 'Processing ' + p.current + ' / ' + p.total;
        if (p.done) {
          clearInterval(timer);
          window.location = '/result?run_id=' + body.run_id;
        }
      }, 1000);
    });
  </script>
</body>
</html>
"#;
