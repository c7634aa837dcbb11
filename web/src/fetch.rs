//! Executes core `HttpRequest`s with the browser's `fetch`.
//!
//! No timeout and no retry: a hung request simply never completes.

use todo_core::{ApiError, HttpRequest, HttpResponse, Outcome};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub async fn execute(request: &HttpRequest) -> Outcome {
    send(request)
        .await
        .map_err(|e| ApiError::Transport(e.as_string().unwrap_or_else(|| format!("{e:?}"))))
}

async fn send(request: &HttpRequest) -> Result<HttpResponse, JsValue> {
    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    if let Some(body) = &request.body {
        init.set_body(&JsValue::from_str(body));
    }

    let req = Request::new_with_str_and_init(&request.path, &init)?;
    for (key, value) in &request.headers {
        req.headers().set(key, value)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&req)).await?.dyn_into()?;
    let status = response.status();
    let body = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();

    Ok(HttpResponse::new(status, body))
}
