// ticket-server/src/static_files.rs
use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use common::StaticFilesConfig;
use std::path::PathBuf;

// Async handler for paths that match no file (SPA support)
async fn spa_fallback(req: &HttpRequest, index_path: PathBuf) -> HttpResponse {
    if !accepts_html(req) {
        return HttpResponse::NotFound().finish();
    }

    match NamedFile::open_async(&index_path).await {
        Ok(file) => file.into_response(req),
        Err(e) => {
            tracing::warn!("Index document {} unreadable: {}", index_path.display(), e);
            HttpResponse::NotFound()
                .content_type(mime::TEXT_PLAIN_UTF_8)
                .body("Not Found")
        }
    }
}

fn accepts_html(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |accept| accept.contains("text/html"))
}

/// Serve the frontend build with SPA support.
///
/// Must be registered after every API scope: it mounts at `/` and claims
/// every path the earlier services left over.
pub fn configure(cfg: &mut web::ServiceConfig, config: StaticFilesConfig) {
    let root_path = PathBuf::from(&config.path);
    let index_path = root_path.join(&config.index);

    if !root_path.is_dir() {
        tracing::warn!("Static assets directory {} does not exist", root_path.display());
    }

    cfg.service(
        Files::new("/", &root_path)
            .index_file(config.index.clone())
            .use_etag(true)
            .use_last_modified(true)
            .default_handler(fn_service(move |req: ServiceRequest| {
                let index_path = index_path.clone();
                async move {
                    let (req, _) = req.into_parts();
                    let res = spa_fallback(&req, index_path).await;
                    Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
                }
            })),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use std::fs;
    use uuid::Uuid;

    const INDEX: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";
    const APP_JS: &str = "console.log(\"frontend\");";

    struct AssetDir(PathBuf);

    impl AssetDir {
        fn new(with_index: bool) -> Self {
            let root = std::env::temp_dir().join(format!("ticket-server-assets-{}", Uuid::new_v4()));
            fs::create_dir_all(root.join("static/js")).unwrap();
            fs::write(root.join("static/js/main.js"), APP_JS).unwrap();
            if with_index {
                fs::write(root.join("index.html"), INDEX).unwrap();
            }
            Self(root)
        }

        fn config(&self) -> StaticFilesConfig {
            StaticFilesConfig {
                path: self.0.to_string_lossy().into_owned(),
                index: "index.html".to_string(),
            }
        }
    }

    impl Drop for AssetDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[actix_web::test]
    async fn test_serves_bundled_file() {
        let assets = AssetDir::new(true);
        let config = assets.config();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, config))).await;

        let req = test::TestRequest::get().uri("/static/js/main.js").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], APP_JS.as_bytes());
    }

    #[actix_web::test]
    async fn test_root_serves_index() {
        let assets = AssetDir::new(true);
        let config = assets.config();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, config))).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], INDEX.as_bytes());
    }

    #[actix_web::test]
    async fn test_html_client_gets_index_for_unknown_path() {
        let assets = AssetDir::new(true);
        let config = assets.config();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, config))).await;

        let req = test::TestRequest::get()
            .uri("/receive")
            .insert_header((header::ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], INDEX.as_bytes());
    }

    #[actix_web::test]
    async fn test_non_html_client_gets_404() {
        let assets = AssetDir::new(true);
        let config = assets.config();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, config))).await;

        let req = test::TestRequest::get()
            .uri("/receive")
            .insert_header((header::ACCEPT, "application/json"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(test::read_body(resp).await.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_index_is_plain_404() {
        let assets = AssetDir::new(false);
        let config = assets.config();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, config))).await;

        let req = test::TestRequest::get()
            .uri("/send")
            .insert_header((header::ACCEPT, "text/html"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"Not Found");
    }
}
