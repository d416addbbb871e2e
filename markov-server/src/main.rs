use std::env;

use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use env_logger::Env;
use log::{error, info};
use serde::Deserialize;

use markov_core::config::DEFAULT_MAX_WORDS;
use markov_core::model::generator::generate_many;
use markov_core::output::write_emissions;
use markov_core::{Chain, ChainConfig, Generator, MarkovError};

/// Upper bound of the `runs` parameter of `/v1/batch`.
const MAX_BATCH_RUNS: usize = 64;

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	words: Option<usize>,
	debug: Option<bool>,
	seed: Option<u64>,
	prefix: Option<String> // comma-separated start window, "w1,w2"
}

/// Query parameters of the `/v1/successors` endpoint
#[derive(Deserialize)]
struct PrefixQuery {
	prefix: Option<String>
}

/// Query parameters of the `/v1/batch` endpoint
#[derive(Deserialize)]
struct BatchParams {
	runs: Option<usize>,
	words: Option<usize>
}

/// Splits a comma-separated window into its words.
fn split_prefix(prefix: &str) -> Vec<&str> {
	prefix.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Clamps a requested word count to the server limit.
fn word_limit(words: Option<usize>) -> usize {
	words.unwrap_or(DEFAULT_MAX_WORDS).min(DEFAULT_MAX_WORDS)
}

/// Maps a generation error to a response.
fn generation_failed(e: MarkovError) -> HttpResponse {
	error!("generation failed: {e}");
	HttpResponse::InternalServerError().body(e.to_string())
}

/// HTTP GET endpoint `/v1/generate`
///
/// Walks the chain once and returns the text, plain or one debug record per
/// line. `seed` pins the walk, `prefix` starts it from a recorded window.
#[get("/v1/generate")]
async fn get_generated(chain: web::Data<Chain>, query: web::Query<GenerateParams>) -> impl Responder {
	let max_words = word_limit(query.words);
	let debug = query.debug.unwrap_or(false);

	let mut generator = match query.seed {
		Some(seed) => Generator::seeded(&chain, max_words, seed),
		None => Generator::new(&chain, max_words),
	};
	if let Some(prefix) = &query.prefix {
		let window = match chain.prefix(&split_prefix(prefix)) {
			Some(window) if chain.lookup(&window).is_some() => window,
			_ => return HttpResponse::NotFound().body(format!("Unknown prefix: {prefix}")),
		};
		generator = generator.starting_at(window);
	}

	let mut body = Vec::new();
	match write_emissions(&mut body, generator, debug) {
		Ok(_) => HttpResponse::Ok().body(String::from_utf8_lossy(&body).into_owned()),
		Err(e) => generation_failed(e),
	}
}

/// HTTP GET endpoint `/v1/stats`
#[get("/v1/stats")]
async fn get_stats(chain: web::Data<Chain>) -> impl Responder {
	HttpResponse::Ok().json(chain.stats())
}

/// HTTP GET endpoint `/v1/successors`
///
/// Returns the successor counts of one window, the end of text reported
/// under the boundary label.
#[get("/v1/successors")]
async fn get_successors(chain: web::Data<Chain>, query: web::Query<PrefixQuery>) -> impl Responder {
	let prefix = match &query.prefix {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty prefix"),
	};

	match chain.successor_counts(&split_prefix(prefix)) {
		Some(counts) => HttpResponse::Ok().json(counts),
		None => HttpResponse::NotFound().body(format!("Unknown prefix: {prefix}")),
	}
}

/// HTTP GET endpoint `/v1/batch`
///
/// Runs several independent walks in parallel and returns their texts.
#[get("/v1/batch")]
async fn get_batch(chain: web::Data<Chain>, query: web::Query<BatchParams>) -> impl Responder {
	let runs = query.runs.unwrap_or(1);
	if runs > MAX_BATCH_RUNS {
		return HttpResponse::BadRequest().body(format!("runs must be <= {MAX_BATCH_RUNS}"));
	}
	let max_words = word_limit(query.words);

	let chain = chain.into_inner();
	let batch = web::block(move || generate_many(&chain, runs, max_words)).await;
	match batch {
		Ok(Ok(runs)) => {
			let texts: Vec<String> = runs.into_iter().map(|words| words.join(" ")).collect();
			HttpResponse::Ok().json(texts)
		}
		Ok(Err(e)) => generation_failed(e),
		Err(_) => HttpResponse::InternalServerError().body("Batch worker failed"),
	}
}

/// Main entry point for the server.
///
/// Builds the chain once from the corpus, then shares it read-only between
/// all workers. No lock is needed: a built chain cannot be mutated.
///
/// # Notes
/// - The corpus is the first argument, else `MARKOV_CORPUS`, else stdin.
/// - The server binds to `MARKOV_BIND`, default 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let corpus = env::args().nth(1).or_else(|| env::var("MARKOV_CORPUS").ok());
	let bind = env::var("MARKOV_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());

	let chain = Chain::from_path(ChainConfig::default(), corpus.as_deref())
		.with_context(|| format!("failed to build the chain from {}", corpus.as_deref().unwrap_or("stdin")))?;
	let shared_chain = web::Data::new(chain);

	info!("listening on {bind}");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_chain.clone())
			.service(get_generated)
			.service(get_stats)
			.service(get_successors)
			.service(get_batch)
	})
		.bind(bind)?
		.run()
		.await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	const CORPUS: &str = "the cat sat on the mat . the dog sat on the rug .";

	fn shared_chain() -> web::Data<Chain> {
		web::Data::new(Chain::from_text(ChainConfig::default(), CORPUS))
	}

	#[actix_web::test]
	async fn split_prefix_ignores_blanks() {
		assert_eq!(split_prefix("on, the"), ["on", "the"]);
		assert_eq!(split_prefix(" ,on,,the, "), ["on", "the"]);
		assert_eq!(word_limit(None), DEFAULT_MAX_WORDS);
		assert_eq!(word_limit(Some(usize::MAX)), DEFAULT_MAX_WORDS);
	}

	#[actix_web::test]
	async fn seeded_generation_matches_the_library() {
		let chain = shared_chain();
		let app = test::init_service(App::new().app_data(chain.clone()).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate?words=50&seed=7").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		let body = test::read_body(resp).await;

		let words = Generator::seeded(&chain, 50, 7).collect_words().unwrap();
		assert_eq!(String::from_utf8_lossy(&body), format!("{} \n", words.join(" ")));
	}

	#[actix_web::test]
	async fn generation_from_a_prefix() {
		let app = test::init_service(App::new().app_data(shared_chain()).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate?prefix=the,rug&debug=true").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(String::from_utf8_lossy(&body), "(the rug) -> .\n");

		let req = test::TestRequest::get().uri("/v1/generate?prefix=rug,the").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn zero_words_is_an_empty_body() {
		let app = test::init_service(App::new().app_data(shared_chain()).service(get_generated)).await;
		let req = test::TestRequest::get().uri("/v1/generate?words=0").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert!(body.is_empty());
	}

	#[actix_web::test]
	async fn stats_and_successors_are_json() {
		let app = test::init_service(
			App::new()
				.app_data(shared_chain())
				.service(get_stats)
				.service(get_successors),
		)
		.await;

		let req = test::TestRequest::get().uri("/v1/stats").to_request();
		let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(stats["states"], 13);

		let req = test::TestRequest::get().uri("/v1/successors?prefix=on,the").to_request();
		let counts: serde_json::Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(counts, serde_json::json!({ "mat": 1, "rug": 1 }));

		let req = test::TestRequest::get().uri("/v1/successors?prefix=cat,the").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

		let req = test::TestRequest::get().uri("/v1/successors").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn batch_runs_are_bounded() {
		let app = test::init_service(App::new().app_data(shared_chain()).service(get_batch)).await;

		let req = test::TestRequest::get().uri("/v1/batch?runs=4&words=3").to_request();
		let texts: Vec<String> = test::call_and_read_body_json(&app, req).await;
		assert_eq!(texts.len(), 4);
		assert!(texts.iter().all(|text| text == "the cat sat"));

		let req = test::TestRequest::get().uri("/v1/batch?runs=1000").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}
}
