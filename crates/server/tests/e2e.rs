mod support;

use serde_json::json;
use tokio::net::TcpListener;

use support::*;

#[tokio::test]
async fn e2e_login_crud_logout_over_http() -> anyhow::Result<()> {
    let app = build_app().await?;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let base = format!("http://{addr}");

    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let resp = client.get(format!("{base}/health")).send().await?;
    assert!(resp.status().is_success());

    let resp = client
        .post(format!("{base}/api/employees"))
        .json(&employee("Smith John", "Engineer", "male", false, "2020-01-01"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 403);

    let resp = client
        .post(format!("{base}/api/login"))
        .json(&json!({"login": ADMIN, "password": ADMIN_PASSWORD}))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = client
        .post(format!("{base}/api/employees"))
        .json(&employee("Smith John", "Engineer", "male", false, "2020-01-01"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 201);
    let created: serde_json::Value = resp.json().await?;
    let id = created["id"].as_i64().unwrap_or_default();

    let resp = client.get(format!("{base}/api/employees?search=smith")).send().await?;
    assert_eq!(resp.headers()["x-total-count"], "1");

    let resp = client
        .put(format!("{base}/api/employees/{id}"))
        .json(&employee("Smith John", "Architect", "male", true, "2020-01-01"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = client.post(format!("{base}/api/logout")).send().await?;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = client.delete(format!("{base}/api/employees/{id}")).send().await?;
    assert_eq!(resp.status().as_u16(), 403);
    Ok(())
}
