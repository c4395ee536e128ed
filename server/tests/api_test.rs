//! End-to-end tests of the HTTP surface, driven through the router.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use pos_engine::{iso_timestamp, Collection, Record};
use pos_server::{app, db::CollectionStore, handlers::handle_closing, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    _dir: tempfile::TempDir,
    store: CollectionStore,
    router: Router,
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let static_dir = dir.path().join("dist");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<h1>POS</h1>").unwrap();

    let store = CollectionStore::new(dir.path().join("data"));
    store
        .ensure_initialized(Collection::ALL.iter().map(|c| c.name()))
        .await
        .unwrap();

    let router = app(
        AppState {
            store: store.clone(),
        },
        &static_dir,
    );

    TestApp {
        _dir: dir,
        store,
        router,
    }
}

async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(router, method, uri, body.map(|b| b.to_string())).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[cfg(test)]
mod product_tests {
    use super::*;

    #[tokio::test]
    async fn test_product_crud() {
        let app = test_app().await;

        let (status, created) = send(
            &app.router,
            Method::POST,
            "/productos",
            Some(json!({"codigo": "A1", "nombre": "Yerba", "menor": 10, "mayor": 8})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_u64().unwrap();
        assert_eq!(created["codigo"], "A1");
        assert!(created["fechaCreacion"].is_string());

        let (status, updated) = send(
            &app.router,
            Method::PUT,
            &format!("/productos/{id}"),
            Some(json!({"menor": 20})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["menor"], 20);
        assert_eq!(updated["nombre"], "Yerba");
        assert_eq!(updated["id"], id);

        let (_, list) = send(&app.router, Method::GET, "/productos", None).await;
        assert_eq!(list, json!([updated]));

        let (status, body) =
            send(&app.router, Method::DELETE, &format!("/productos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, list) = send(&app.router, Method::GET, "/productos", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let app = test_app().await;

        for uri in ["/productos/123", "/productos/abc"] {
            let (status, body) = send(&app.router, Method::PUT, uri, Some(json!({"a": 1}))).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"error": "Producto no encontrado"}));
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_product_succeeds() {
        let app = test_app().await;

        for uri in ["/productos/123", "/productos/abc"] {
            let (status, body) = send(&app.router, Method::DELETE, uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"success": true}));
        }
    }

    #[tokio::test]
    async fn test_string_ids_on_disk_are_addressable() {
        let app = test_app().await;
        let stored: Vec<Record> =
            serde_json::from_value(json!([{"id": "1706745600000", "codigo": "Z"}])).unwrap();
        app.store.save("productos", &stored).await.unwrap();

        let (status, updated) = send(
            &app.router,
            Method::PUT,
            "/productos/1706745600000",
            Some(json!({"codigo": "Z2"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["codigo"], "Z2");
    }

    #[tokio::test]
    async fn test_non_object_body_is_rejected() {
        let app = test_app().await;

        let (status, body) =
            send(&app.router, Method::POST, "/productos", Some(json!([1, 2]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send_raw(
            &app.router,
            Method::POST,
            "/productos",
            Some("{oops".to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].is_string());

        assert!(app.store.load("productos").await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty_and_recovers() {
        let app = test_app().await;
        std::fs::write(app.store.path("productos"), "definitely not json").unwrap();

        let (status, list) = send(&app.router, Method::GET, "/productos", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));

        let (status, _) = send(
            &app.router,
            Method::POST,
            "/productos",
            Some(json!({"codigo": "A1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.store.load("productos").await.len(), 1);
    }
}

#[cfg(test)]
mod customer_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list_customers() {
        let app = test_app().await;

        let (status, created) = send(
            &app.router,
            Method::POST,
            "/clientes",
            Some(json!({"nombre": "Ana", "descuento": 0.1, "id": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(created["id"], 5);
        assert_eq!(created["descuento"], 0.1);

        let (_, list) = send(&app.router, Method::GET, "/clientes", None).await;
        assert_eq!(list, json!([created]));
    }
}

#[cfg(test)]
mod order_tests {
    use super::*;

    #[tokio::test]
    async fn test_order_lifecycle() {
        let app = test_app().await;

        let (_, first) = send(
            &app.router,
            Method::POST,
            "/pedidos",
            Some(json!({"items": [{"codigo": "A1", "cantidad": 2}], "estado": "procesado"})),
        )
        .await;
        assert_eq!(first["estado"], "pendiente");
        assert_eq!(first["usuario"], "desconocido");
        assert!(first["fecha"].is_string());

        let (_, second) = send(
            &app.router,
            Method::POST,
            "/pedidos",
            Some(json!({"items": [], "usuario": "caja1"})),
        )
        .await;
        assert_eq!(second["usuario"], "caja1");

        let (_, pending) = send(&app.router, Method::GET, "/pedidos", None).await;
        assert_eq!(pending, json!([first, second]));

        let (status, processed) = send(
            &app.router,
            Method::PUT,
            &format!("/pedidos/{}/procesar", first["id"]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(processed["estado"], "procesado");
        assert!(processed["fechaProcesado"].is_string());

        let (_, pending) = send(&app.router, Method::GET, "/pedidos", None).await;
        assert_eq!(pending, json!([second]));

        let (status, body) = send(
            &app.router,
            Method::DELETE,
            &format!("/pedidos/{}", second["id"]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        // The processed order is still stored, only hidden from the listing.
        assert_eq!(app.store.load("pedidos").await.len(), 1);
    }

    #[tokio::test]
    async fn test_process_unknown_order() {
        let app = test_app().await;

        let (status, body) = send(&app.router, Method::PUT, "/pedidos/999/procesar", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Pedido no encontrado"}));
    }
}

#[cfg(test)]
mod sales_tests {
    use super::*;

    #[tokio::test]
    async fn test_cash_closing() {
        let app = test_app().await;
        let today = Utc.with_ymd_and_hms(2001, 3, 15, 18, 0, 0).unwrap();
        let sales: Vec<Record> = serde_json::from_value(json!([
            {"id": 1, "total": 999, "metodoPago": "efectivo", "fecha": iso_timestamp(today - Duration::days(1))},
            {"id": 2, "total": 100, "metodoPago": "efectivo", "fecha": iso_timestamp(today - Duration::hours(9))},
            {"id": 3, "total": 50, "metodoPago": "transferencia", "fecha": iso_timestamp(today - Duration::hours(1))},
            {"id": 4, "total": 30, "metodoPago": "efectivo", "fecha": iso_timestamp(today)}
        ]))
        .unwrap();
        app.store.save("ventas", &sales).await.unwrap();

        let closing = handle_closing(&app.store, today).await;
        assert_eq!(
            serde_json::to_value(&closing).unwrap(),
            json!({
                "efectivo": "130.00",
                "transferencia": "50.00",
                "total": "180.00",
                "cantidadVentas": 3
            })
        );

        // None of these sales fall on the real current day.
        let (status, closing) = send(&app.router, Method::GET, "/cierre", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            closing,
            json!({
                "efectivo": "0.00",
                "transferencia": "0.00",
                "total": "0.00",
                "cantidadVentas": 0
            })
        );
    }

    #[tokio::test]
    async fn test_created_sales_are_listed_with_a_date() {
        let app = test_app().await;

        for (total, method) in [(100, "efectivo"), (50, "transferencia")] {
            let (status, sale) = send(
                &app.router,
                Method::POST,
                "/ventas",
                Some(json!({"total": total, "metodoPago": method})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert!(sale["fecha"].is_string());
        }

        let (_, sales) = send(&app.router, Method::GET, "/ventas", None).await;
        assert_eq!(sales.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_exhausted_ids_are_a_server_error() {
        let app = test_app().await;
        let full: Vec<Record> = serde_json::from_value(json!([{"id": u64::MAX}])).unwrap();
        app.store.save("ventas", &full).await.unwrap();

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/ventas",
            Some(json!({"total": 1, "metodoPago": "efectivo"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Error interno del servidor"}));
        assert_eq!(app.store.load("ventas").await, full);
    }

    #[tokio::test]
    async fn test_write_failure_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CollectionStore::new(dir.path().join("missing"));
        let router = app(AppState { store }, &dir.path().join("dist"));

        let (status, body) = send(
            &router,
            Method::POST,
            "/ventas",
            Some(json!({"total": 1, "metodoPago": "efectivo"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Error interno del servidor"}));
    }
}

#[cfg(test)]
mod misc_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;

        let (status, body) = send(&app.router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_routes_serve_frontend() {
        let app = test_app().await;

        for uri in ["/", "/caja/ventas"] {
            let (status, body) = send_raw(&app.router, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, b"<h1>POS</h1>");
        }
    }
}
