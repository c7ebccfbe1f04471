//! # ドキュメントページ
//!
//! `GET /` で API の使い方を説明する静的 HTML を返す。
//! ページは起動時に一度だけレンダリングし、以降は同じ文字列を返す。

use std::sync::Arc;

use axum::{extract::State, response::Html};
use tera::{Context, Tera};

use crate::config::Environment;

/// ドキュメントページハンドラの State
pub struct DocsState {
   pub page: String,
}

/// ドキュメントページを組み立てる
pub fn render_docs_page(environment: Environment) -> Result<String, tera::Error> {
   let mut context = Context::new();
   context.insert("version", env!("CARGO_PKG_VERSION"));
   context.insert("environment", environment.as_str());

   Tera::one_off(
      include_str!("../../templates/docs/index.html"),
      &context,
      true,
   )
}

/// GET /
pub async fn docs_page(State(state): State<Arc<DocsState>>) -> Html<String> {
   Html(state.page.clone())
}
