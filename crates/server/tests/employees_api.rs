mod support;

use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};

use support::*;

async fn seeded() -> anyhow::Result<(Router, String)> {
    let app = build_app().await?;
    let cookie = login(&app).await;
    create(&app, &cookie, employee("Иванов Иван", "Engineer", "male", false, "2020-01-15")).await;
    create(&app, &cookie, employee("Петрова Анна", "Accountant", "female", true, "2023-06-01")).await;
    create(&app, &cookie, employee("Иванова Мария", "Designer", "female", true, "2024-03-20")).await;
    create(&app, &cookie, employee("Smith John", "Engineer", "male", false, "2019-11-02")).await;
    Ok((app, cookie))
}

async fn list(app: &Router, query: &str) -> (u64, Vec<String>) {
    let resp = send(app, json_request("GET", &format!("/api/employees{query}"), None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let total = resp.headers()["x-total-count"].to_str().unwrap().parse().unwrap();
    let body = body_json(resp).await;
    let names = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["full_name"].as_str().unwrap().to_string())
        .collect();
    (total, names)
}

#[tokio::test]
async fn writes_without_session_are_forbidden_before_body_checks() -> anyhow::Result<()> {
    let app = build_app().await?;
    let garbage = json!({"nonsense": true});
    for (method, uri) in [("POST", "/api/employees"), ("PUT", "/api/employees/1"), ("DELETE", "/api/employees/1")] {
        let resp = send(&app, json_request(method, uri, None, Some(garbage.clone()))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body_json(resp).await, json!({"error": "not authorized"}));
    }
    Ok(())
}

#[tokio::test]
async fn reads_are_public() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    let (total, names) = list(&app, "").await;
    assert_eq!(total, 4);
    assert_eq!(names.len(), 4);

    let resp = send(&app, json_request("GET", "/api/employees/1", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["full_name"], "Иванов Иван");
    assert_eq!(body["gender"], "male");
    assert_eq!(body["hire_date"], "2020-01-15");
    assert_eq!(body["on_probation"], false);
    Ok(())
}

#[tokio::test]
async fn create_defaults_and_legacy_aliases() -> anyhow::Result<()> {
    let app = build_app().await?;
    let cookie = login(&app).await;
    let created = create(
        &app,
        &cookie,
        json!({"fio": "Сидорова Ольга", "position": "HR", "gender": "ж", "probation": true, "hire_date": "2022-09-01"}),
    )
    .await;
    assert_eq!(created["full_name"], "Сидорова Ольга");
    assert_eq!(created["gender"], "female");
    assert_eq!(created["on_probation"], true);
    assert_eq!(created["phone"], "");
    assert_eq!(created["email"], "");
    assert!(created["id"].as_i64().unwrap() > 0);
    Ok(())
}

#[tokio::test]
async fn validation_errors_name_the_field() -> anyhow::Result<()> {
    let app = build_app().await?;
    let cookie = login(&app).await;
    let cases: [(Value, &str); 4] = [
        (json!({"position": "X", "gender": "male", "hire_date": "2020-01-01"}), "full_name"),
        (json!({"full_name": "A B", "position": "X", "gender": "robot", "hire_date": "2020-01-01"}), "gender"),
        (json!({"full_name": "A B", "position": "X", "gender": "male", "hire_date": "01/02/2020"}), "hire_date"),
        (json!({"full_name": "A B", "position": "X", "gender": "male", "hire_date": "2020-01-01", "email": "nope"}), "email"),
    ];
    for (body, field) in cases {
        let resp = send(&app, json_request("POST", "/api/employees", Some(&cookie), Some(body))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(body_json(resp).await["field"], field);
    }
    let (total, _) = list(&app, "").await;
    assert_eq!(total, 0);
    Ok(())
}

#[tokio::test]
async fn search_by_surname_finds_both_forms() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    // search=Иванов
    let (total, names) = list(&app, "?search=%D0%98%D0%B2%D0%B0%D0%BD%D0%BE%D0%B2").await;
    assert_eq!(total, 2);
    assert_eq!(names, vec!["Иванов Иван", "Иванова Мария"]);

    let (total, names) = list(&app, "?search=%D0%98%D0%B2%D0%B0%D0%BD%D0%BE%D0%B2&field=full_name").await;
    assert_eq!(total, 2);
    assert_eq!(names.len(), 2);
    Ok(())
}

#[tokio::test]
async fn lowercase_cyrillic_search_sorted_desc() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    // search=иванов
    let (total, names) = list(&app, "?search=%D0%B8%D0%B2%D0%B0%D0%BD%D0%BE%D0%B2&sort=fio&order=desc&limit=2&offset=0").await;
    assert_eq!(total, 2);
    assert_eq!(names, vec!["Иванова Мария", "Иванов Иван"]);
    assert!(names.iter().all(|n| n.to_lowercase().contains("иванов")));

    // search=ИВАНОВ
    let (total, names) = list(&app, "?search=%D0%98%D0%92%D0%90%D0%9D%D0%9E%D0%92&field=full_name").await;
    assert_eq!(total, 2);
    assert_eq!(names, vec!["Иванов Иван", "Иванова Мария"]);
    Ok(())
}

#[tokio::test]
async fn search_follows_updates() -> anyhow::Result<()> {
    let (app, cookie) = seeded().await?;
    let body = employee("Сидоров Пётр", "Engineer", "male", false, "2020-01-15");
    let resp = send(&app, json_request("PUT", "/api/employees/1", Some(&cookie), Some(body))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    // search=сидоров
    let (total, names) = list(&app, "?search=%D1%81%D0%B8%D0%B4%D0%BE%D1%80%D0%BE%D0%B2").await;
    assert_eq!(total, 1);
    assert_eq!(names, vec!["Сидоров Пётр"]);
    // search=иванов
    let (total, _) = list(&app, "?search=%D0%B8%D0%B2%D0%B0%D0%BD%D0%BE%D0%B2").await;
    assert_eq!(total, 1);
    Ok(())
}

#[tokio::test]
async fn out_of_range_windows_return_empty_pages() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    for query in [
        "?offset=18446744073709551615",
        "?offset=9223372036854775808&limit=5",
        "?page=18446744073709551615",
        "?page=4294967295",
    ] {
        let (total, names) = list(&app, query).await;
        assert_eq!(total, 4, "{query}");
        assert!(names.is_empty(), "{query}");
    }

    let resp = send(&app, json_request("GET", "/?page=18446744073709551615", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn ascii_search_ignores_case() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    let (total, names) = list(&app, "?search=SMITH").await;
    assert_eq!(total, 1);
    assert_eq!(names, vec!["Smith John"]);
    let (total, _) = list(&app, "?search=engineer&field=position").await;
    assert_eq!(total, 2);
    Ok(())
}

#[tokio::test]
async fn probation_search_understands_yes_no() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    // да
    let (total, _) = list(&app, "?search=%D0%B4%D0%B0&field=on_probation").await;
    assert_eq!(total, 2);
    // нет
    let (total, names) = list(&app, "?search=%D0%BD%D0%B5%D1%82&field=on_probation").await;
    assert_eq!(total, 2);
    assert!(names.contains(&"Smith John".to_string()));
    let (total, _) = list(&app, "?search=maybe&field=on_probation").await;
    assert_eq!(total, 4);
    let (total, _) = list(&app, "?search=female&field=gender").await;
    assert_eq!(total, 2);
    Ok(())
}

#[tokio::test]
async fn hostile_sort_falls_back_to_full_name() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    let (total, names) = list(&app, "?sort=id%3B%20DROP%20TABLE%20employee&order=sideways").await;
    assert_eq!(total, 4);
    assert_eq!(names, vec!["Smith John", "Иванов Иван", "Иванова Мария", "Петрова Анна"]);
    // table still there
    let (total, _) = list(&app, "").await;
    assert_eq!(total, 4);
    Ok(())
}

#[tokio::test]
async fn sort_order_and_window() -> anyhow::Result<()> {
    let (app, _) = seeded().await?;
    let (total, names) = list(&app, "?sort_by=hire_date&order=DESC&limit=2").await;
    assert_eq!(total, 4);
    assert_eq!(names, vec!["Иванова Мария", "Петрова Анна"]);

    let (total, names) = list(&app, "?sort=hire_date&offset=1&limit=2").await;
    assert_eq!(total, 4);
    assert_eq!(names, vec!["Иванов Иван", "Петрова Анна"]);

    let (_, names) = list(&app, "?offset=abc&limit=-3").await;
    assert_eq!(names.len(), 4);
    Ok(())
}

#[tokio::test]
async fn update_is_a_full_replace() -> anyhow::Result<()> {
    let (app, cookie) = seeded().await?;
    let body = json!({"full_name": "Иванов Иван", "position": "Team Lead", "gender": "male", "hire_date": "2020-01-15"});
    let resp = send(&app, json_request("PUT", "/api/employees/1", Some(&cookie), Some(body))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["position"], "Team Lead");
    assert_eq!(updated["phone"], "");

    let partial = json!({"position": "CTO"});
    let resp = send(&app, json_request("PUT", "/api/employees/1", Some(&cookie), Some(partial))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["field"], "full_name");

    let body = employee("X Y", "Z", "male", false, "2020-01-01");
    let resp = send(&app, json_request("PUT", "/api/employees/999", Some(&cookie), Some(body))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_then_not_found() -> anyhow::Result<()> {
    let (app, cookie) = seeded().await?;
    let resp = send(&app, json_request("DELETE", "/api/employees/2", Some(&cookie), None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, json_request("DELETE", "/api/employees/2", Some(&cookie), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&app, json_request("GET", "/api/employees/2", None, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&app, json_request("GET", "/api/employees/two", None, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let (total, _) = list(&app, "").await;
    assert_eq!(total, 3);
    Ok(())
}
